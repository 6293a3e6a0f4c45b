//! Collection metadata extraction from a GraphQL schema.
//!
//! # Architecture
//!
//! ```text
//! schema text
//!   ↓ graphql-parser
//! Document (type definitions + directives)
//!   ↓ CollectionDirective::from_ast (DTO layer)
//! CollectionDirective
//!   ↓ loader::load (per-pattern validation)
//! Vec<CollectionDescriptor>
//! ```

use std::collections::HashSet;

use graphql_parser::schema::{
    parse_schema, Definition, Directive, Document, TypeDefinition, TypeExtension,
};
use graphql_parser::Pos;
use miette::Diagnostic;

pub mod directive;
pub mod loader;
pub mod model;

pub use directive::CollectionDirective;
pub use loader::AuthoringError;
pub use model::{AccessPattern, CollectionAccess, CollectionDescriptor};

/// Directive name recognized when none is configured.
pub const DEFAULT_DIRECTIVE: &str = "collection";

/// Errors from parsing a schema and extracting collections.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum SchemaError {
    /// The text is not a valid GraphQL type-definition document.
    #[error("schema parse error: {message}")]
    #[diagnostic(code(tenant_rules::schema_parse))]
    Parse {
        /// Parser message, including the position.
        message: String,
    },

    /// An annotated type is not a valid collection declaration.
    #[error("{source} (line {line})")]
    #[diagnostic(forward(source))]
    Authoring {
        /// Line of the offending type definition.
        line: usize,
        /// The authoring mistake.
        source: AuthoringError,
    },
}

impl SchemaError {
    /// Returns the authoring error, if this is one.
    #[must_use]
    pub fn as_authoring(&self) -> Option<&AuthoringError> {
        match self {
            Self::Authoring { source, .. } => Some(source),
            Self::Parse { .. } => None,
        }
    }
}

/// Walks a schema and yields one descriptor per annotated type.
#[derive(Debug, Clone)]
pub struct SchemaDirectiveExtractor {
    directive: String,
}

impl Default for SchemaDirectiveExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_DIRECTIVE)
    }
}

impl SchemaDirectiveExtractor {
    /// Creates an extractor recognizing `@<directive>`.
    #[must_use]
    pub fn new(directive: impl Into<String>) -> Self {
        Self {
            directive: directive.into(),
        }
    }

    /// Returns the recognized directive name.
    #[must_use]
    pub fn directive(&self) -> &str {
        &self.directive
    }

    /// Parses `schema` and extracts its collections in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Parse`] for invalid SDL and
    /// [`SchemaError::Authoring`] for the first invalid annotation.
    pub fn extract(&self, schema: &str) -> Result<Vec<CollectionDescriptor>, SchemaError> {
        let document = parse_schema::<String>(schema).map_err(|e| SchemaError::Parse {
            message: e.to_string(),
        })?;
        self.extract_document(&document)
    }

    /// Extracts collections from an already parsed document.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Authoring`] for the first invalid annotation.
    pub fn extract_document(
        &self,
        document: &Document<'_, String>,
    ) -> Result<Vec<CollectionDescriptor>, SchemaError> {
        let mut descriptors = Vec::new();
        let mut seen = HashSet::new();

        for definition in &document.definitions {
            let (type_name, position, directives) = match definition {
                Definition::TypeDefinition(type_def) => type_parts(type_def),
                Definition::TypeExtension(extension) => {
                    let (type_name, position, directives) = extension_parts(extension);
                    if directives.iter().any(|d| d.name == self.directive) {
                        return Err(SchemaError::Authoring {
                            line: position.line,
                            source: AuthoringError::DirectiveOnExtension {
                                type_name: type_name.to_string(),
                            },
                        });
                    }
                    continue;
                }
                Definition::SchemaDefinition(_) | Definition::DirectiveDefinition(_) => continue,
            };

            let mut annotations = directives.iter().filter(|d| d.name == self.directive);
            let Some(annotation) = annotations.next() else {
                continue;
            };
            let at = |source| SchemaError::Authoring {
                line: position.line,
                source,
            };
            if annotations.next().is_some() {
                return Err(at(AuthoringError::RepeatedDirective {
                    type_name: type_name.to_string(),
                }));
            }

            let dto = CollectionDirective::from_ast(type_name, annotation).map_err(at)?;
            let descriptor = loader::load(dto).map_err(at)?;

            tracing::debug!(
                "Collection `{}` ({}) from type {}",
                descriptor.name,
                descriptor.access_pattern(),
                type_name
            );
            if !seen.insert(descriptor.name.clone()) {
                tracing::warn!(
                    "Collection name `{}` is declared more than once; access is granted if any of its match blocks allows it",
                    descriptor.name
                );
            }
            descriptors.push(descriptor);
        }

        Ok(descriptors)
    }
}

/// Parses `schema` with the default `@collection` directive.
///
/// # Errors
///
/// See [`SchemaDirectiveExtractor::extract`].
pub fn extract_descriptors(schema: &str) -> Result<Vec<CollectionDescriptor>, SchemaError> {
    SchemaDirectiveExtractor::default().extract(schema)
}

fn type_parts<'d, 'a>(
    type_def: &'d TypeDefinition<'a, String>,
) -> (&'d str, Pos, &'d [Directive<'a, String>]) {
    match type_def {
        TypeDefinition::Scalar(t) => (t.name.as_str(), t.position, t.directives.as_slice()),
        TypeDefinition::Object(t) => (t.name.as_str(), t.position, t.directives.as_slice()),
        TypeDefinition::Interface(t) => (t.name.as_str(), t.position, t.directives.as_slice()),
        TypeDefinition::Union(t) => (t.name.as_str(), t.position, t.directives.as_slice()),
        TypeDefinition::Enum(t) => (t.name.as_str(), t.position, t.directives.as_slice()),
        TypeDefinition::InputObject(t) => (t.name.as_str(), t.position, t.directives.as_slice()),
    }
}

fn extension_parts<'d, 'a>(
    extension: &'d TypeExtension<'a, String>,
) -> (&'d str, Pos, &'d [Directive<'a, String>]) {
    match extension {
        TypeExtension::Scalar(t) => (t.name.as_str(), t.position, t.directives.as_slice()),
        TypeExtension::Object(t) => (t.name.as_str(), t.position, t.directives.as_slice()),
        TypeExtension::Interface(t) => (t.name.as_str(), t.position, t.directives.as_slice()),
        TypeExtension::Union(t) => (t.name.as_str(), t.position, t.directives.as_slice()),
        TypeExtension::Enum(t) => (t.name.as_str(), t.position, t.directives.as_slice()),
        TypeExtension::InputObject(t) => (t.name.as_str(), t.position, t.directives.as_slice()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"
directive @collection(
  name: String!
  type: CollectionType!
  readPermission: String
  writePermission: String
  updatePermission: String
  deletePermission: String
  allowDelete: Boolean
  allowUpdate: Boolean
  allowPublicRead: Boolean
) on OBJECT

enum CollectionType { INDEXED_BY_TENANT DOC_PER_TENANT DOC_PER_USER }

scalar DateTime

type Profile @collection(name: "profiles", type: DOC_PER_USER) {
  displayName: String
}

type Query { me: Profile }

type Settings @collection(
  name: "settings"
  type: DOC_PER_TENANT
  readPermission: "settings.read"
  writePermission: "settings.write"
) @deprecated(reason: "unrelated") {
  theme: String
}

type Invoice @collection(
  name: "invoices"
  type: INDEXED_BY_TENANT
  readPermission: "invoice.read"
  writePermission: "invoice.create"
  updatePermission: "invoice.update"
  deletePermission: "invoice.delete"
) {
  tenantId: ID!
  issuedAt: DateTime
}
"#;

    #[test]
    fn extracts_annotated_types_in_declaration_order() {
        let descriptors = extract_descriptors(SCHEMA).unwrap();
        let names: Vec<_> = descriptors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["profiles", "settings", "invoices"]);

        let types: Vec<_> = descriptors.iter().map(|d| d.type_name.as_str()).collect();
        assert_eq!(types, ["Profile", "Settings", "Invoice"]);
    }

    #[test]
    fn schema_without_annotations_yields_nothing() {
        let descriptors = extract_descriptors("type Query { ping: String }").unwrap();
        assert!(descriptors.is_empty());
    }

    #[test]
    fn custom_directive_name() {
        let schema = r#"type A @firestore(name: "a", type: DOC_PER_USER) @collection(bogus: 1) { id: ID }"#;
        let descriptors = SchemaDirectiveExtractor::new("firestore")
            .extract(schema)
            .unwrap();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].name, "a");
    }

    #[test]
    fn missing_permission_names_type_and_line() {
        let schema = "type Query { ping: String }\n\ntype Billing @collection(name: \"billing\", type: DOC_PER_TENANT, readPermission: \"r\") { id: ID }";
        let err = extract_descriptors(schema).unwrap_err();

        let authoring = err.as_authoring().unwrap();
        assert_eq!(authoring.type_name(), "Billing");
        assert!(matches!(err, SchemaError::Authoring { line: 3, .. }));
        assert!(err.to_string().contains("writePermission"));
    }

    #[test]
    fn repeated_directive_fails() {
        let schema = r#"type A @collection(name: "a", type: DOC_PER_USER) @collection(name: "b", type: DOC_PER_USER) { id: ID }"#;
        let err = extract_descriptors(schema).unwrap_err();
        assert!(matches!(
            err.as_authoring(),
            Some(AuthoringError::RepeatedDirective { .. })
        ));
    }

    #[test]
    fn directive_on_type_extension_fails() {
        let schema = r#"
type A { id: ID }

extend type A @collection(name: "a", type: DOC_PER_TENANT)
"#;
        let err = extract_descriptors(schema).unwrap_err();
        assert!(matches!(err, SchemaError::Authoring { line: 4, .. }));
        assert_eq!(
            err.as_authoring(),
            Some(&AuthoringError::DirectiveOnExtension {
                type_name: "A".to_string()
            })
        );
    }

    #[test]
    fn unannotated_type_extension_is_ignored() {
        let schema = r#"
type A @collection(name: "a", type: DOC_PER_USER) { id: ID }
extend type A @deprecated(reason: "x")
extend type Query { ping: String }
"#;
        assert_eq!(extract_descriptors(schema).unwrap().len(), 1);
    }

    #[test]
    fn invalid_sdl_is_a_parse_error() {
        let err = extract_descriptors("type {").unwrap_err();
        assert!(matches!(err, SchemaError::Parse { .. }));
    }

    #[test]
    fn duplicate_collection_names_are_kept() {
        let schema = r#"
type A @collection(name: "same", type: DOC_PER_USER) { id: ID }
type B @collection(name: "same", type: DOC_PER_USER) { id: ID }
"#;
        assert_eq!(extract_descriptors(schema).unwrap().len(), 2);
    }
}
