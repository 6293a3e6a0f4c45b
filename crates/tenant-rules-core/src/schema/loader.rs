//! DTO → descriptor conversion with per-pattern validation.

use miette::Diagnostic;

use super::directive::CollectionDirective;
use super::model::{AccessPattern, CollectionAccess, CollectionDescriptor};

/// A schema annotation that cannot be turned into a collection.
///
/// Every variant names the offending schema type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum AuthoringError {
    /// A required directive argument (`name` or `type`) is absent.
    #[error("type `{type_name}`: @collection is missing required argument `{argument}`")]
    #[diagnostic(code(tenant_rules::missing_argument))]
    MissingArgument {
        /// Offending type.
        type_name: String,
        /// Argument name.
        argument: &'static str,
    },

    /// `name` is an empty string.
    #[error("type `{type_name}`: collection name must not be empty")]
    #[diagnostic(code(tenant_rules::empty_name))]
    EmptyName {
        /// Offending type.
        type_name: String,
    },

    /// `name` cannot be used as a single path segment.
    #[error("type `{type_name}`: collection name `{name}` must be one path segment without `/`, braces or whitespace")]
    #[diagnostic(code(tenant_rules::invalid_name))]
    InvalidName {
        /// Offending type.
        type_name: String,
        /// The name found in the schema.
        name: String,
    },

    /// `type` is not one of the known access patterns.
    #[error(
        "type `{type_name}`: unknown access pattern `{value}`, expected: INDEXED_BY_TENANT, DOC_PER_TENANT, DOC_PER_USER"
    )]
    #[diagnostic(code(tenant_rules::unknown_access_pattern))]
    UnknownAccessPattern {
        /// Offending type.
        type_name: String,
        /// The value found in the schema.
        value: String,
    },

    /// A permission required by the access pattern is absent or empty.
    #[error("type `{type_name}`: access pattern {access_pattern} requires a non-empty `{permission}`")]
    #[diagnostic(
        code(tenant_rules::missing_permission),
        help("add `{permission}: \"...\"` to the @collection directive")
    )]
    MissingPermission {
        /// Offending type.
        type_name: String,
        /// Declared pattern.
        access_pattern: AccessPattern,
        /// Missing argument name.
        permission: &'static str,
    },

    /// A permission contains characters that would escape its quoted string.
    #[error("type `{type_name}`: `{permission}` must not contain quotes, backslashes or line breaks")]
    #[diagnostic(code(tenant_rules::invalid_permission))]
    InvalidPermission {
        /// Offending type.
        type_name: String,
        /// Argument name.
        permission: &'static str,
    },

    /// An argument name the directive does not define.
    #[error("type `{type_name}`: unknown @collection argument `{argument}`")]
    #[diagnostic(code(tenant_rules::unknown_argument))]
    UnknownArgument {
        /// Offending type.
        type_name: String,
        /// Argument name.
        argument: String,
    },

    /// The same argument appears twice.
    #[error("type `{type_name}`: @collection argument `{argument}` is given more than once")]
    #[diagnostic(code(tenant_rules::repeated_argument))]
    RepeatedArgument {
        /// Offending type.
        type_name: String,
        /// Argument name.
        argument: String,
    },

    /// An argument value of the wrong kind.
    #[error("type `{type_name}`: @collection argument `{argument}` must be {expected}")]
    #[diagnostic(code(tenant_rules::invalid_argument))]
    InvalidArgument {
        /// Offending type.
        type_name: String,
        /// Argument name.
        argument: String,
        /// Expected value kind.
        expected: &'static str,
    },

    /// The directive is attached more than once to the same type.
    #[error("type `{type_name}`: @collection may only be applied once")]
    #[diagnostic(code(tenant_rules::repeated_directive))]
    RepeatedDirective {
        /// Offending type.
        type_name: String,
    },

    /// The directive is attached to an `extend type` instead of the definition.
    #[error("type `{type_name}`: @collection must be on the type definition, not an extension")]
    #[diagnostic(
        code(tenant_rules::directive_on_extension),
        help("move the directive to the `type {type_name}` definition")
    )]
    DirectiveOnExtension {
        /// Extended type.
        type_name: String,
    },
}

impl AuthoringError {
    /// Returns the schema type the error refers to.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::MissingArgument { type_name, .. }
            | Self::EmptyName { type_name }
            | Self::InvalidName { type_name, .. }
            | Self::UnknownAccessPattern { type_name, .. }
            | Self::MissingPermission { type_name, .. }
            | Self::InvalidPermission { type_name, .. }
            | Self::UnknownArgument { type_name, .. }
            | Self::RepeatedArgument { type_name, .. }
            | Self::InvalidArgument { type_name, .. }
            | Self::RepeatedDirective { type_name }
            | Self::DirectiveOnExtension { type_name } => type_name,
        }
    }
}

/// Converts raw directive arguments into a validated descriptor.
///
/// Permissions the pattern does not use are ignored. Missing required
/// permissions are never defaulted.
///
/// # Errors
///
/// Returns the first authoring mistake found.
pub fn load(dto: CollectionDirective) -> Result<CollectionDescriptor, AuthoringError> {
    let type_name = dto.type_name;

    let name = dto.name.ok_or_else(|| AuthoringError::MissingArgument {
        type_name: type_name.clone(),
        argument: "name",
    })?;
    if name.trim().is_empty() {
        return Err(AuthoringError::EmptyName { type_name });
    }
    if !is_path_segment(&name) {
        return Err(AuthoringError::InvalidName { type_name, name });
    }

    let raw_pattern = dto
        .access_pattern
        .ok_or_else(|| AuthoringError::MissingArgument {
            type_name: type_name.clone(),
            argument: "type",
        })?;
    let pattern =
        AccessPattern::parse(&raw_pattern).ok_or_else(|| AuthoringError::UnknownAccessPattern {
            type_name: type_name.clone(),
            value: raw_pattern.clone(),
        })?;

    let require = |value: Option<String>, permission: &'static str| -> Result<String, AuthoringError> {
        let value = value
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AuthoringError::MissingPermission {
                type_name: type_name.clone(),
                access_pattern: pattern,
                permission,
            })?;
        if !is_quotable(&value) {
            return Err(AuthoringError::InvalidPermission {
                type_name: type_name.clone(),
                permission,
            });
        }
        Ok(value)
    };

    let access = match pattern {
        AccessPattern::IndexedByTenant => CollectionAccess::IndexedByTenant {
            read_permission: require(dto.read_permission, "readPermission")?,
            write_permission: require(dto.write_permission, "writePermission")?,
            update_permission: require(dto.update_permission, "updatePermission")?,
            delete_permission: require(dto.delete_permission, "deletePermission")?,
            allow_public_read: dto.allow_public_read.unwrap_or(false),
            allow_update: dto.allow_update.unwrap_or(true),
            allow_delete: dto.allow_delete.unwrap_or(true),
        },
        AccessPattern::DocPerTenant => CollectionAccess::DocPerTenant {
            read_permission: require(dto.read_permission, "readPermission")?,
            write_permission: require(dto.write_permission, "writePermission")?,
        },
        AccessPattern::DocPerUser => CollectionAccess::DocPerUser,
    };

    Ok(CollectionDescriptor {
        type_name,
        name,
        access,
    })
}

/// Collection names become one literal segment of a `match` path.
fn is_path_segment(name: &str) -> bool {
    !name
        .chars()
        .any(|c| matches!(c, '/' | '{' | '}') || c.is_whitespace())
}

/// Permissions are emitted inside a single-quoted rules string.
fn is_quotable(permission: &str) -> bool {
    !permission
        .chars()
        .any(|c| matches!(c, '\'' | '\\' | '\n' | '\r'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(pattern: &str) -> CollectionDirective {
        CollectionDirective {
            type_name: "Thing".to_string(),
            name: Some("things".to_string()),
            access_pattern: Some(pattern.to_string()),
            ..CollectionDirective::default()
        }
    }

    fn with_all_permissions(mut dto: CollectionDirective) -> CollectionDirective {
        dto.read_permission = Some("r".to_string());
        dto.write_permission = Some("w".to_string());
        dto.update_permission = Some("u".to_string());
        dto.delete_permission = Some("d".to_string());
        dto
    }

    // -- Happy path --

    #[test]
    fn load_indexed_by_tenant_with_defaults() {
        let descriptor = load(with_all_permissions(dto("INDEXED_BY_TENANT"))).unwrap();
        assert_eq!(descriptor.name, "things");
        assert_eq!(
            descriptor.access,
            CollectionAccess::IndexedByTenant {
                read_permission: "r".to_string(),
                write_permission: "w".to_string(),
                update_permission: "u".to_string(),
                delete_permission: "d".to_string(),
                allow_public_read: false,
                allow_update: true,
                allow_delete: true,
            }
        );
    }

    #[test]
    fn load_doc_per_tenant_ignores_extra_permissions() {
        let descriptor = load(with_all_permissions(dto("DOC_PER_TENANT"))).unwrap();
        assert_eq!(
            descriptor.access,
            CollectionAccess::DocPerTenant {
                read_permission: "r".to_string(),
                write_permission: "w".to_string(),
            }
        );
    }

    #[test]
    fn load_doc_per_user_needs_no_permissions() {
        let descriptor = load(dto("DOC_PER_USER")).unwrap();
        assert_eq!(descriptor.access_pattern(), AccessPattern::DocPerUser);
    }

    // -- Error cases --

    #[test]
    fn doc_per_tenant_without_write_permission_fails() {
        let mut input = dto("DOC_PER_TENANT");
        input.read_permission = Some("r".to_string());

        let err = load(input).unwrap_err();
        assert_eq!(
            err,
            AuthoringError::MissingPermission {
                type_name: "Thing".to_string(),
                access_pattern: AccessPattern::DocPerTenant,
                permission: "writePermission",
            }
        );
        assert!(err.to_string().contains("Thing"));
    }

    #[test]
    fn indexed_by_tenant_requires_delete_permission() {
        let mut input = with_all_permissions(dto("INDEXED_BY_TENANT"));
        input.delete_permission = None;
        let err = load(input).unwrap_err();
        assert!(matches!(
            err,
            AuthoringError::MissingPermission {
                permission: "deletePermission",
                ..
            }
        ));
    }

    #[test]
    fn blank_permission_counts_as_missing() {
        let mut input = with_all_permissions(dto("DOC_PER_TENANT"));
        input.read_permission = Some("  ".to_string());
        assert!(matches!(
            load(input),
            Err(AuthoringError::MissingPermission {
                permission: "readPermission",
                ..
            })
        ));
    }

    #[test]
    fn unknown_access_pattern_fails() {
        let err = load(dto("DOC_PER_PLANET")).unwrap_err();
        assert!(matches!(err, AuthoringError::UnknownAccessPattern { ref value, .. } if value == "DOC_PER_PLANET"));
        assert_eq!(err.type_name(), "Thing");
    }

    #[test]
    fn missing_name_and_type_fail() {
        let mut input = dto("DOC_PER_USER");
        input.name = None;
        assert!(matches!(
            load(input),
            Err(AuthoringError::MissingArgument { argument: "name", .. })
        ));

        let mut input = dto("DOC_PER_USER");
        input.access_pattern = None;
        assert!(matches!(
            load(input),
            Err(AuthoringError::MissingArgument { argument: "type", .. })
        ));
    }

    #[test]
    fn permission_cannot_escape_its_string() {
        let mut input = with_all_permissions(dto("DOC_PER_TENANT"));
        input.read_permission = Some("x', tenantId) || true || hasPermission('y".to_string());
        assert_eq!(
            load(input).unwrap_err(),
            AuthoringError::InvalidPermission {
                type_name: "Thing".to_string(),
                permission: "readPermission",
            }
        );

        for bad in ["a\\b", "a\nb"] {
            let mut input = with_all_permissions(dto("INDEXED_BY_TENANT"));
            input.delete_permission = Some(bad.to_string());
            assert!(matches!(
                load(input),
                Err(AuthoringError::InvalidPermission {
                    permission: "deletePermission",
                    ..
                })
            ));
        }
    }

    #[test]
    fn dotted_permission_is_accepted() {
        let mut input = with_all_permissions(dto("DOC_PER_TENANT"));
        input.read_permission = Some("billing.read".to_string());
        assert!(load(input).is_ok());
    }

    #[test]
    fn name_must_be_one_path_segment() {
        for bad in ["a/{x=**}", "a/b", "{tenantId}", "my things"] {
            let mut input = dto("DOC_PER_USER");
            input.name = Some(bad.to_string());
            let err = load(input).unwrap_err();
            assert!(
                matches!(err, AuthoringError::InvalidName { ref name, .. } if name == bad),
                "{bad}: {err}"
            );
            assert_eq!(err.type_name(), "Thing");
        }
    }

    #[test]
    fn empty_name_fails() {
        let mut input = dto("DOC_PER_USER");
        input.name = Some(String::new());
        assert!(matches!(load(input), Err(AuthoringError::EmptyName { .. })));
    }
}
