//! Generate command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use tenant_rules::Project;

/// Runs the generate command.
pub fn run(
    dir: &Path,
    config: Option<&Path>,
    schema: Option<&Path>,
    output: Option<&Path>,
    force_stdout: bool,
) -> Result<()> {
    let project = Project::load(dir, config).context("Failed to load project configuration")?;

    let rules = super::output::or_exit(project.generate(schema))?;

    let target = if force_stdout {
        None
    } else {
        project.output_path(output)
    };

    match target {
        Some(path) => {
            Project::write_output(&path, &rules)?;
            tracing::info!("Wrote {}", path.display());
        }
        None => print!("{rules}"),
    }

    Ok(())
}
