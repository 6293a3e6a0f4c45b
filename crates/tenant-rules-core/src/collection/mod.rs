//! Collection access patterns and the factory building them from descriptors.
//!
//! | Pattern | Path | Rules |
//! |---------|------|-------|
//! | `INDEXED_BY_TENANT` | `/<name>/{docId}` | per-operation permission on the document's `tenantId` |
//! | `DOC_PER_TENANT` | `/<name>/{tenantId}` | write permission for writes, read permission or absent document for reads |
//! | `DOC_PER_USER` | `/<name>/{userId}` | owner only |

mod doc_per_tenant;
mod doc_per_user;
mod indexed_by_tenant;
pub mod permission;

pub use doc_per_tenant::DocPerTenantCollection;
pub use doc_per_user::DocPerUserCollection;
pub use indexed_by_tenant::{IndexedByTenantCollection, IndexedFlags, TenantPermissions, TENANT_FIELD};

use crate::rule::Rule;
use crate::schema::{CollectionAccess, CollectionDescriptor};

/// A collection with one of the fixed access patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collection {
    /// Many documents per tenant.
    IndexedByTenant(IndexedByTenantCollection),
    /// One document per tenant.
    DocPerTenant(DocPerTenantCollection),
    /// One document per user.
    DocPerUser(DocPerUserCollection),
}

impl Collection {
    /// Returns the collection name.
    #[must_use]
    pub fn collection_name(&self) -> &str {
        match self {
            Self::IndexedByTenant(c) => c.collection_name(),
            Self::DocPerTenant(c) => c.collection_name(),
            Self::DocPerUser(c) => c.collection_name(),
        }
    }

    /// Returns the rule blocks of this collection, in render order.
    #[must_use]
    pub fn firestore_rules(&self) -> Vec<Rule> {
        match self {
            Self::IndexedByTenant(c) => c.firestore_rules(),
            Self::DocPerTenant(c) => c.firestore_rules(),
            Self::DocPerUser(c) => c.firestore_rules(),
        }
    }
}

impl From<IndexedByTenantCollection> for Collection {
    fn from(c: IndexedByTenantCollection) -> Self {
        Self::IndexedByTenant(c)
    }
}

impl From<DocPerTenantCollection> for Collection {
    fn from(c: DocPerTenantCollection) -> Self {
        Self::DocPerTenant(c)
    }
}

impl From<DocPerUserCollection> for Collection {
    fn from(c: DocPerUserCollection) -> Self {
        Self::DocPerUser(c)
    }
}

impl From<CollectionDescriptor> for Collection {
    fn from(descriptor: CollectionDescriptor) -> Self {
        let name = descriptor.name;
        match descriptor.access {
            CollectionAccess::IndexedByTenant {
                read_permission,
                write_permission,
                update_permission,
                delete_permission,
                allow_public_read,
                allow_update,
                allow_delete,
            } => IndexedByTenantCollection::new(
                name,
                TenantPermissions {
                    read: read_permission,
                    write: write_permission,
                    update: update_permission,
                    delete: delete_permission,
                },
                IndexedFlags {
                    allow_public_read,
                    allow_update,
                    allow_delete,
                },
            )
            .into(),
            CollectionAccess::DocPerTenant {
                read_permission,
                write_permission,
            } => DocPerTenantCollection::new(name, read_permission, write_permission).into(),
            CollectionAccess::DocPerUser => DocPerUserCollection::new(name).into(),
        }
    }
}

/// Builds collections from descriptors, preserving order.
#[must_use]
pub fn build_collections(descriptors: Vec<CollectionDescriptor>) -> Vec<Collection> {
    descriptors.into_iter().map(Collection::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str, access: CollectionAccess) -> CollectionDescriptor {
        CollectionDescriptor {
            type_name: "T".to_string(),
            name: name.to_string(),
            access,
        }
    }

    #[test]
    fn factory_picks_matching_variant() {
        let collections = build_collections(vec![
            descriptor("users", CollectionAccess::DocPerUser),
            descriptor(
                "settings",
                CollectionAccess::DocPerTenant {
                    read_permission: "r".to_string(),
                    write_permission: "w".to_string(),
                },
            ),
        ]);

        assert!(matches!(collections[0], Collection::DocPerUser(_)));
        assert!(matches!(collections[1], Collection::DocPerTenant(_)));
        assert_eq!(collections[1].collection_name(), "settings");
    }

    #[test]
    fn factory_carries_indexed_flags() {
        let collection = Collection::from(descriptor(
            "posts",
            CollectionAccess::IndexedByTenant {
                read_permission: "r".to_string(),
                write_permission: "w".to_string(),
                update_permission: "u".to_string(),
                delete_permission: "d".to_string(),
                allow_public_read: true,
                allow_update: true,
                allow_delete: false,
            },
        ));

        let rule = &collection.firestore_rules()[0];
        assert_eq!(rule.allow_read, crate::rule::Access::Allow);
        assert!(rule.allow_delete.is_deny());
    }
}
