//! `geoscaff show`: print generated artifacts without writing them.

use serde::Serialize;

use geoscaff_core::{application::GenerateService, domain::Artifact};
use geoscaff_adapters::MemoryFilesystem;

use crate::{
    cli::{OutputFormat, ShowArgs},
    commands::identity_for,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct ShownArtifact<'a> {
    kind: String,
    path: String,
    executable: bool,
    content: &'a str,
}

pub fn execute(args: ShowArgs, output: &OutputManager) -> CliResult<()> {
    let identity = identity_for(&args.name)?;
    // Preview never touches the filesystem; the in-memory one is a placeholder.
    let service = GenerateService::new(Box::new(MemoryFilesystem::new()));

    let artifacts: Vec<Artifact> = service
        .preview(&identity)?
        .into_iter()
        .filter(|a| args.artifact.is_none_or(|kind| a.kind == kind))
        .collect();

    if output.format() == OutputFormat::Json {
        let shown: Vec<ShownArtifact<'_>> = artifacts
            .iter()
            .map(|a| ShownArtifact {
                kind: a.kind.to_string(),
                path: a.path.to_string(),
                executable: a.permissions.executable_flag(),
                content: &a.content,
            })
            .collect();
        output.json(&shown)?;
        return Ok(());
    }

    let single = artifacts.len() == 1;
    for artifact in &artifacts {
        if !single {
            output.header(&format!("── {} ──", artifact.path))?;
        }
        output.raw(&artifact.content)?;
        if !single {
            output.raw("\n")?;
        }
    }
    Ok(())
}
