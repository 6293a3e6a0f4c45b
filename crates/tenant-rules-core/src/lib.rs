//! # tenant-rules-core
//!
//! Compiler from an annotated GraphQL schema to Firestore security rules.
//!
//! This crate provides the pure building blocks of the generator. It
//! performs no I/O. It includes:
//!
//! - [`Rule`] value object rendering one `match` block
//! - [`Collection`] variants for the three tenant access patterns
//! - [`SchemaDirectiveExtractor`] reading `@collection` annotations
//! - [`RuleSetComposer`] merging extra and generated rules into a document
//!
//! ## Example
//!
//! ```
//! use tenant_rules_core::{compile_schema, Config, Rule};
//!
//! let schema = r#"
//!   type Settings @collection(
//!     name: "settings", type: DOC_PER_TENANT,
//!     readPermission: "settings.read", writePermission: "settings.write"
//!   ) { theme: String }
//! "#;
//! let extra = [Rule::new("/tenants/{tenantId}").allow_read("request.auth != null")];
//!
//! let rules = compile_schema(schema, &extra, &Config::default())?;
//! assert!(rules.contains("match /settings/{tenantId} {"));
//! # Ok::<(), tenant_rules_core::SchemaError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod collection;
mod composer;
mod config;
pub mod extra_rules;
mod rule;
pub mod schema;

pub use collection::{
    build_collections, Collection, DocPerTenantCollection, DocPerUserCollection,
    IndexedByTenantCollection, IndexedFlags, TenantPermissions,
};
pub use composer::{compile_schema, RuleSetComposer, EXTRA_RULES_HEADER, GENERATED_RULES_HEADER};
pub use config::{Config, ConfigError, OutputConfig, SchemaConfig};
pub use extra_rules::{load_rules_from_toml, ExtraRulesError};
pub use rule::{indent, Access, Operation, Rule, INDENT};
pub use schema::{
    extract_descriptors, AccessPattern, AuthoringError, CollectionAccess, CollectionDescriptor,
    SchemaDirectiveExtractor, SchemaError,
};
