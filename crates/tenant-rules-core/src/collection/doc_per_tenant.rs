//! Exactly one document per tenant, document id == tenant id.

use super::permission;
use crate::rule::Rule;

/// Collection holding one document per tenant at `/<name>/{tenantId}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocPerTenantCollection {
    name: String,
    read_permission: String,
    write_permission: String,
}

impl DocPerTenantCollection {
    /// Path placeholder bound to the document id.
    pub const ID_PLACEHOLDER: &'static str = "tenantId";

    /// Creates the collection.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        read_permission: impl Into<String>,
        write_permission: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            read_permission: read_permission.into(),
            write_permission: write_permission.into(),
        }
    }

    /// Returns the collection name.
    #[must_use]
    pub fn collection_name(&self) -> &str {
        &self.name
    }

    /// Create, update and delete need the write permission for the tenant in
    /// the path. Read is also granted while the document does not exist, so
    /// clients can check whether the tenant has configured it yet.
    #[must_use]
    pub fn firestore_rules(&self) -> Vec<Rule> {
        let tenant = Self::ID_PLACEHOLDER;
        let write = permission::check(&self.write_permission, tenant);
        let read = format!(
            "resource == null || {}",
            permission::check(&self.read_permission, tenant)
        );

        vec![Rule::new(format!("/{}/{{{tenant}}}", self.name))
            .with_comment(format!("{}: one document per tenant", self.name))
            .with_extra(permission::helper_function())
            .allow_read(read)
            .allow_write(write)]
    }
}
