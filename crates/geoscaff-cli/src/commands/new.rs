//! Implementation of the `geoscaff new` command.
//!
//! Responsibility: resolve the project name and root, call the generate
//! service, and display results. No business logic lives here.

use serde::Serialize;
use tracing::{info, instrument};

use geoscaff_adapters::LocalFilesystem;
use geoscaff_core::{
    application::GenerateService,
    domain::{Artifact, ArtifactKind},
};

use crate::{
    cli::{NewArgs, OutputFormat, ReportFormat},
    commands::{identity_for, project_root},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// One line of a dry-run report.
#[derive(Debug, Serialize)]
struct PlannedArtifact {
    kind: String,
    path: String,
    bytes: usize,
    executable: bool,
}

impl From<&Artifact> for PlannedArtifact {
    fn from(artifact: &Artifact) -> Self {
        Self {
            kind: artifact.kind.to_string(),
            path: artifact.path.to_string(),
            bytes: artifact.size(),
            executable: artifact.permissions.executable_flag(),
        }
    }
}

/// Execute the `geoscaff new` command.
///
/// 1. Resolve the name (prompting if allowed) and the project root
/// 2. `--dry-run`: list what would be written and stop
/// 3. Write the artifacts with a progress bar
/// 4. Print next-steps guidance
#[instrument(skip_all)]
pub fn execute(args: NewArgs, config: AppConfig, output: &OutputManager) -> CliResult<()> {
    let name = match args.name {
        Some(name) => name,
        None => prompt_name()?,
    };
    let identity = identity_for(&name)?;
    let root = project_root(args.root, &config);
    let json = args.format == ReportFormat::Json || output.format() == OutputFormat::Json;

    let service = GenerateService::new(Box::new(LocalFilesystem::new()));

    if args.dry_run {
        let planned: Vec<PlannedArtifact> = service
            .preview(&identity)?
            .iter()
            .map(PlannedArtifact::from)
            .collect();

        if json {
            output.json(&planned)?;
        } else {
            output.info(&format!(
                "Dry run: would write {} files under {}",
                planned.len(),
                root.display()
            ))?;
            for p in &planned {
                let mode = if p.executable { " (executable)" } else { "" };
                output.print(&format!("  {:<40} {:>6} bytes{mode}", p.path, p.bytes))?;
            }
        }
        return Ok(());
    }

    output.header(&format!("Generating '{}'...", identity))?;
    info!(project = %identity, root = %root.display(), "Generate started");

    let bar = output.progress(ArtifactKind::ALL.len() as u64);
    let report = service.generate_with(&identity, &root, |written| {
        bar.set_message(written.path.display().to_string());
        bar.inc(1);
    });
    bar.finish_and_clear();
    let report = report?;

    if json {
        output.json(&report)?;
        return Ok(());
    }

    for written in &report.written {
        output.print(&format!("  {}", written.path.display()))?;
    }
    output.success(&format!(
        "Project '{}' generated ({} files)",
        identity,
        report.file_count()
    ))?;

    if !output.is_quiet() {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", root.display()))?;
        output.print("  ./configure.sh              # or:")?;
        output.print(&format!("  geoscaff configure {}", identity))?;
    }

    Ok(())
}

#[cfg(feature = "interactive")]
fn prompt_name() -> CliResult<String> {
    use dialoguer::{Input, theme::ColorfulTheme};

    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Project name")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.is_empty() {
                Err("name cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(|e| CliError::IoError {
            message: "failed to read project name".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn prompt_name() -> CliResult<String> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}
