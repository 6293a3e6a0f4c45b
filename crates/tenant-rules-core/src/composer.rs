//! Assembly of the final rules document.

use std::fmt::Write;

use crate::collection::{build_collections, Collection};
use crate::config::{Config, OutputConfig};
use crate::rule::{indent, Rule, INDENT};
use crate::schema::{SchemaDirectiveExtractor, SchemaError};

/// Header of the hand-authored section.
pub const EXTRA_RULES_HEADER: &str = "// Extra rules";

/// Header of the schema-generated section.
pub const GENERATED_RULES_HEADER: &str = "// Generated rules";

/// Nesting depth of rule blocks inside the envelope.
const BLOCK_DEPTH: usize = 2;

/// Merges extra rules and collection rules into one rules document.
///
/// Output is a pure function of the inputs and the [`OutputConfig`].
/// Collections sharing a name are not detected here; both blocks are
/// emitted and Firestore grants access if either allows it.
#[derive(Debug, Clone, Default)]
pub struct RuleSetComposer {
    output: OutputConfig,
}

impl RuleSetComposer {
    /// Creates a composer with the given envelope settings.
    #[must_use]
    pub fn new(output: OutputConfig) -> Self {
        Self { output }
    }

    /// Renders the document: envelope, extra rules in input order, then
    /// every collection's rules in input order.
    #[must_use]
    pub fn generate(&self, collections: &[Collection], extra_rules: &[Rule]) -> String {
        let extra = render_blocks(extra_rules.iter());
        let generated = render_blocks(collections.iter().flat_map(Collection::firestore_rules));
        let section = INDENT.repeat(BLOCK_DEPTH);

        let mut out = String::new();
        if let Some(version) = self.output.rules_version.as_deref().filter(|v| !v.is_empty()) {
            let _ = writeln!(out, "rules_version = '{version}';");
        }
        let _ = writeln!(out, "service {} {{", self.output.service);
        let _ = writeln!(out, "{INDENT}match {} {{", self.output.root);

        let _ = writeln!(out, "{section}{EXTRA_RULES_HEADER}");
        if !extra.is_empty() {
            let _ = writeln!(out, "{extra}");
        }
        out.push('\n');
        let _ = writeln!(out, "{section}{GENERATED_RULES_HEADER}");
        if !generated.is_empty() {
            let _ = writeln!(out, "{generated}");
        }

        let _ = writeln!(out, "{INDENT}}}");
        out.push_str("}\n");
        out
    }
}

fn render_blocks<R: std::borrow::Borrow<Rule>>(rules: impl Iterator<Item = R>) -> String {
    rules
        .map(|rule| indent(&rule.borrow().to_text(), BLOCK_DEPTH))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Runs the whole pipeline on schema text: extract, build, compose.
///
/// No text is produced if any annotation is invalid.
///
/// # Errors
///
/// Returns the schema parse or authoring error.
pub fn compile_schema(
    schema: &str,
    extra_rules: &[Rule],
    config: &Config,
) -> Result<String, SchemaError> {
    let descriptors = SchemaDirectiveExtractor::new(config.schema.directive.as_str()).extract(schema)?;
    let collections = build_collections(descriptors);
    tracing::debug!(
        "Composing {} collection(s) and {} extra rule(s)",
        collections.len(),
        extra_rules.len()
    );
    Ok(RuleSetComposer::new(config.output.clone()).generate(&collections, extra_rules))
}
