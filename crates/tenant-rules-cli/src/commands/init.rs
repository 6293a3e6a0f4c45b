//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# tenant-rules configuration

[schema]
# GraphQL schema with @collection annotations (relative to this file)
path = "schema.graphql"
# directive = "collection"

[output]
# Write here instead of stdout
# file = "firestore.rules"
service = "cloud.firestore"
rules-version = "2"
root = "/databases/{database}/documents"

# Hand-authored rules, emitted before the generated ones.
# Each allow-* key takes true, false or a condition expression.
#
# [[extra-rules]]
# match = "/tenants/{tenantId}"
# comment = "Tenant registry"
# allow-read = "request.auth != null"
"#;

/// Runs the init command.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join("tenant-rules.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Annotate types in your schema with @collection");
    println!("  2. Run: tenant-rules generate");

    Ok(())
}
