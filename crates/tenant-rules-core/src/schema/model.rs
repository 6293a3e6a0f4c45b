//! Validated collection descriptors.
//!
//! A [`CollectionDescriptor`] can only be built by the loader, which has
//! already checked that every permission required by the access pattern is
//! present. Downstream code never sees a half-filled descriptor.

use serde::Serialize;
use std::fmt;

/// Document layout and permission template of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessPattern {
    /// Many documents per tenant, each carrying a `tenantId` field.
    IndexedByTenant,
    /// Exactly one document per tenant, keyed by tenant id.
    DocPerTenant,
    /// Exactly one document per user, keyed by user id.
    DocPerUser,
}

impl AccessPattern {
    /// Parses the schema enum spelling (e.g. `DOC_PER_TENANT`).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "INDEXED_BY_TENANT" => Some(Self::IndexedByTenant),
            "DOC_PER_TENANT" => Some(Self::DocPerTenant),
            "DOC_PER_USER" => Some(Self::DocPerUser),
            _ => None,
        }
    }

    /// Returns the schema enum spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IndexedByTenant => "INDEXED_BY_TENANT",
            Self::DocPerTenant => "DOC_PER_TENANT",
            Self::DocPerUser => "DOC_PER_USER",
        }
    }
}

impl fmt::Display for AccessPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-pattern access settings, with exactly the fields each pattern uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectionAccess {
    /// See [`AccessPattern::IndexedByTenant`].
    #[serde(rename_all = "camelCase")]
    IndexedByTenant {
        /// Required to read a document.
        read_permission: String,
        /// Required to create a document.
        write_permission: String,
        /// Required to update a document.
        update_permission: String,
        /// Required to delete a document.
        delete_permission: String,
        /// Read is unconditional when set.
        allow_public_read: bool,
        /// `false` removes the update operation.
        allow_update: bool,
        /// `false` removes the delete operation.
        allow_delete: bool,
    },
    /// See [`AccessPattern::DocPerTenant`].
    #[serde(rename_all = "camelCase")]
    DocPerTenant {
        /// Required to read the tenant document.
        read_permission: String,
        /// Required to create, update or delete the tenant document.
        write_permission: String,
    },
    /// See [`AccessPattern::DocPerUser`].
    DocPerUser,
}

impl CollectionAccess {
    /// Returns the access pattern tag.
    #[must_use]
    pub fn pattern(&self) -> AccessPattern {
        match self {
            Self::IndexedByTenant { .. } => AccessPattern::IndexedByTenant,
            Self::DocPerTenant { .. } => AccessPattern::DocPerTenant,
            Self::DocPerUser => AccessPattern::DocPerUser,
        }
    }
}

/// Collection metadata extracted from one annotated schema type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDescriptor {
    /// Name of the schema type carrying the directive.
    pub type_name: String,
    /// Firestore collection name.
    pub name: String,
    /// Pattern plus its permissions.
    #[serde(flatten)]
    pub access: CollectionAccess,
}

impl CollectionDescriptor {
    /// Returns the access pattern of this collection.
    #[must_use]
    pub fn access_pattern(&self) -> AccessPattern {
        self.access.pattern()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_pattern_parse_roundtrips_spelling() {
        for pattern in [
            AccessPattern::IndexedByTenant,
            AccessPattern::DocPerTenant,
            AccessPattern::DocPerUser,
        ] {
            assert_eq!(AccessPattern::parse(pattern.as_str()), Some(pattern));
        }
        assert_eq!(AccessPattern::parse("doc_per_user"), None);
    }
}
