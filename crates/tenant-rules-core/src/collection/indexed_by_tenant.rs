//! Many documents per tenant, each carrying its own `tenantId` field.

use super::permission;
use crate::rule::{Access, Rule};

/// Field on every document naming the owning tenant.
pub const TENANT_FIELD: &str = "tenantId";

/// Permission names of an indexed-by-tenant collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantPermissions {
    /// Required to read.
    pub read: String,
    /// Required to create.
    pub write: String,
    /// Required to update.
    pub update: String,
    /// Required to delete.
    pub delete: String,
}

/// Optional switches of an indexed-by-tenant collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedFlags {
    /// Read is unconditional.
    pub allow_public_read: bool,
    /// `false` drops the update statement.
    pub allow_update: bool,
    /// `false` drops the delete statement.
    pub allow_delete: bool,
}

impl Default for IndexedFlags {
    fn default() -> Self {
        Self {
            allow_public_read: false,
            allow_update: true,
            allow_delete: true,
        }
    }
}

/// Collection of tenant-owned documents at `/<name>/{docId}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedByTenantCollection {
    name: String,
    permissions: TenantPermissions,
    flags: IndexedFlags,
}

impl IndexedByTenantCollection {
    /// Path placeholder bound to the document id.
    pub const ID_PLACEHOLDER: &'static str = "docId";

    /// Creates the collection.
    #[must_use]
    pub fn new(name: impl Into<String>, permissions: TenantPermissions, flags: IndexedFlags) -> Self {
        Self {
            name: name.into(),
            permissions,
            flags,
        }
    }

    /// Returns the collection name.
    #[must_use]
    pub fn collection_name(&self) -> &str {
        &self.name
    }

    /// Every check is scoped to the tenant stored on the document itself:
    /// the incoming document for create, the stored one otherwise.
    #[must_use]
    pub fn firestore_rules(&self) -> Vec<Rule> {
        let stored = format!("resource.data.{TENANT_FIELD}");
        let incoming = format!("request.resource.data.{TENANT_FIELD}");
        let p = &self.permissions;

        let read = if self.flags.allow_public_read {
            Access::Allow
        } else {
            Access::when(permission::check(&p.read, &stored))
        };
        let update = if self.flags.allow_update {
            Access::when(permission::check(&p.update, &stored))
        } else {
            Access::Deny
        };
        let delete = if self.flags.allow_delete {
            Access::when(permission::check(&p.delete, &stored))
        } else {
            Access::Deny
        };

        vec![
            Rule::new(format!("/{}/{{{}}}", self.name, Self::ID_PLACEHOLDER))
                .with_comment(format!("{}: documents indexed by tenant", self.name))
                .with_extra(permission::helper_function())
                .allow_create(permission::check(&p.write, &incoming))
                .allow_read(read)
                .allow_update(update)
                .allow_delete(delete),
        ]
    }
}
