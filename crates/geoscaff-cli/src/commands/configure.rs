//! Implementation of the `geoscaff configure` command.
//!
//! Runs the same option translator, platform detector and build matrix
//! that `configure.sh` embeds, against the real CMake.

use tracing::{info, instrument};

use geoscaff_adapters::{CmakeBuildSystem, LocalFilesystem, UnameProbe};
use geoscaff_core::{
    application::{ConfigureOutcome, ConfigureService, MatrixReport, TreeStatus},
    domain::{
        ProjectIdentity,
        configure::{BuildTree, completion_text},
    },
};

use crate::{
    cli::{ConfigureArgs, OutputFormat},
    commands::{identity_for, project_root},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: ConfigureArgs, config: AppConfig, output: &OutputManager) -> CliResult<()> {
    let identity = identity_for(&args.name)?;
    let root = project_root(args.root, &config);

    let service = ConfigureService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(CmakeBuildSystem::new(config.configure.cmake.clone())),
        Box::new(UnameProbe::new()),
    )
    .with_build_root(config.configure.build_root.clone());

    match service.run(&identity, &root, &args.tokens)? {
        ConfigureOutcome::Help(usage) => output.raw(&usage)?,
        ConfigureOutcome::Platforms(platforms) => {
            if output.format() == OutputFormat::Json {
                output.json(&platforms)?;
            } else {
                output.print("Supported platforms:")?;
                for platform in &platforms {
                    output.print(&format!("* {platform}"))?;
                }
            }
        }
        ConfigureOutcome::Configured(report) => return render_report(&identity, &report, output),
    }

    Ok(())
}

fn render_report(
    identity: &ProjectIdentity,
    report: &MatrixReport,
    output: &OutputManager,
) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        output.json(report)?;
    } else {
        for ignored in &report.request.ignored {
            output.warning(&format!("Ignoring extra argument '{ignored}'"))?;
        }
        for outcome in &report.trees {
            let dir = outcome.tree.directory.display();
            match &outcome.status {
                TreeStatus::Configured => {
                    output.success(&format!("{} configured in {dir}", outcome.tree.label()))?
                }
                TreeStatus::Failed(reason) => {
                    output.error(&format!("{} failed: {reason}", outcome.tree.label()))?
                }
            }
        }
    }

    let failed: Vec<String> = report.failures().map(|t| t.tree.label()).collect();
    if !failed.is_empty() {
        return Err(CliError::TreesFailed { trees: failed });
    }

    info!(platform = %report.platform, "Build matrix configured");
    if output.format() != OutputFormat::Json {
        output.print("")?;
        let trees: Vec<BuildTree> = report.trees.iter().map(|t| t.tree.clone()).collect();
        output.print(&completion_text(identity, &trees))?;
    }
    Ok(())
}
