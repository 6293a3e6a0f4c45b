//! List command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use tenant_rules::Project;

use crate::OutputFormat;

/// Runs the list command.
pub fn run(dir: &Path, config: Option<&Path>, schema: Option<&Path>, format: OutputFormat) -> Result<()> {
    let project = Project::load(dir, config).context("Failed to load project configuration")?;
    let descriptors = super::output::or_exit(project.descriptors(schema))?;
    super::output::print_descriptors(&descriptors, format)
}
