//! # tenant-rules
//!
//! Generates Firestore security rules for multi-tenant apps from a GraphQL
//! schema annotated with `@collection`.
//!
//! This is the main facade crate: it re-exports the pure compiler from
//! `tenant-rules-core` and adds the project-level file handling used by the
//! CLI.
//!
//! ## Schema Annotations
//!
//! ```graphql
//! type Invoice @collection(
//!   name: "invoices"
//!   type: INDEXED_BY_TENANT
//!   readPermission: "invoice.read"
//!   writePermission: "invoice.create"
//!   updatePermission: "invoice.update"
//!   deletePermission: "invoice.delete"
//! ) {
//!   tenantId: ID!
//! }
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use tenant_rules::Project;
//!
//! let project = Project::load(Path::new("."), None)?;
//! let rules = project.generate(None)?;
//! ```

#![forbid(unsafe_code)]

// Re-export core types and functions
pub use tenant_rules_core::*;

pub mod config_source;
mod project;

pub use config_source::ConfigSource;
pub use project::{Project, ProjectError};
