//! Shared output formatting.

use anyhow::Result;
use tenant_rules::{CollectionAccess, CollectionDescriptor, ProjectError};

use crate::OutputFormat;

/// Unwraps a project result, rendering schema errors as diagnostics.
///
/// Schema errors print a miette report and exit with status 1; other errors
/// are returned to the caller.
pub fn or_exit<T>(result: Result<T, ProjectError>) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(ProjectError::Schema { path, source }) => {
            let report = miette::Report::new(source).wrap_err(path.display().to_string());
            eprintln!("{report:?}");
            std::process::exit(1);
        }
        Err(other) => Err(other.into()),
    }
}

/// Print collection descriptors in the specified format.
pub fn print_descriptors(descriptors: &[CollectionDescriptor], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(descriptors),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(descriptors)?;
            println!("{json}");
        }
    }
    Ok(())
}

fn print_text(descriptors: &[CollectionDescriptor]) {
    println!("{:<24} {:<20} {:<20} Permissions", "Collection", "Pattern", "Type");
    println!("{}", "-".repeat(90));

    for d in descriptors {
        println!(
            "{:<24} {:<20} {:<20} {}",
            d.name,
            d.access_pattern(),
            d.type_name,
            permissions_summary(&d.access)
        );
    }

    println!("\n{} collection(s)", descriptors.len());
}

fn permissions_summary(access: &CollectionAccess) -> String {
    match access {
        CollectionAccess::IndexedByTenant {
            read_permission,
            write_permission,
            update_permission,
            delete_permission,
            allow_public_read,
            allow_update,
            allow_delete,
        } => {
            let read = if *allow_public_read {
                "public"
            } else {
                read_permission.as_str()
            };
            let update = if *allow_update {
                update_permission.as_str()
            } else {
                "-"
            };
            let delete = if *allow_delete {
                delete_permission.as_str()
            } else {
                "-"
            };
            format!("read={read} create={write_permission} update={update} delete={delete}")
        }
        CollectionAccess::DocPerTenant {
            read_permission,
            write_permission,
        } => format!("read={read_permission} write={write_permission}"),
        CollectionAccess::DocPerUser => "owner".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_marks_disabled_operations() {
        let access = CollectionAccess::IndexedByTenant {
            read_permission: "r".to_string(),
            write_permission: "w".to_string(),
            update_permission: "u".to_string(),
            delete_permission: "d".to_string(),
            allow_public_read: true,
            allow_update: true,
            allow_delete: false,
        };
        assert_eq!(
            permissions_summary(&access),
            "read=public create=w update=u delete=-"
        );
        assert_eq!(permissions_summary(&CollectionAccess::DocPerUser), "owner");
    }
}
