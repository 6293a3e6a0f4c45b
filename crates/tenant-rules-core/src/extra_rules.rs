//! Hand-authored rules declared as `[[extra-rules]]` in the config file.
//!
//! ```text
//! TOML text
//!   ↓ serde (DTO layer)
//! ExtraRuleDto
//!   ↓ validate + convert
//! Vec<Rule>
//! ```

use serde::Deserialize;

use crate::rule::{Access, Operation, Rule};

/// Raw TOML representation of the extra-rules section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtraRulesConfigDto {
    /// Rule tables in declaration order.
    #[serde(rename = "extra-rules", default)]
    pub extra_rules: Vec<ExtraRuleDto>,
}

/// TOML representation of one rule block.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ExtraRuleDto {
    /// Match path (e.g., "/tenants/{tenantId}").
    #[serde(rename = "match")]
    pub match_path: String,
    /// Comment line above the block.
    #[serde(default)]
    pub comment: Option<String>,
    /// Text emitted first inside the block.
    #[serde(default)]
    pub extra: Option<String>,
    /// `create` access (default: deny).
    #[serde(default)]
    pub allow_create: Option<AccessDto>,
    /// `read` access (default: deny).
    #[serde(default)]
    pub allow_read: Option<AccessDto>,
    /// `update` access (default: deny).
    #[serde(default)]
    pub allow_update: Option<AccessDto>,
    /// `delete` access (default: deny).
    #[serde(default)]
    pub allow_delete: Option<AccessDto>,
}

/// `true`, `false` or a condition string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AccessDto {
    /// Boolean form.
    Flag(bool),
    /// Condition expression.
    Condition(String),
}

/// Errors from parsing TOML and loading extra rules.
#[derive(Debug, thiserror::Error)]
pub enum ExtraRulesError {
    /// TOML deserialization failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The match path is empty or not absolute.
    #[error("extra-rules[{index}].match: `{path}` must be a non-empty path starting with `/`")]
    InvalidMatchPath {
        /// Position of the rule in the file.
        index: usize,
        /// The offending path.
        path: String,
    },

    /// A condition string is blank.
    #[error("extra-rules[{index}].allow-{operation}: condition must not be empty")]
    EmptyCondition {
        /// Position of the rule in the file.
        index: usize,
        /// Operation with the blank condition.
        operation: Operation,
    },
}

/// Parses TOML content and returns the declared extra rules in order.
///
/// Returns `Ok(vec![])` if there is no `[[extra-rules]]` section.
///
/// # Errors
///
/// Returns an error if TOML parsing or validation fails.
pub fn load_rules_from_toml(content: &str) -> Result<Vec<Rule>, ExtraRulesError> {
    let dto: ExtraRulesConfigDto = toml::from_str(content)?;
    load(dto)
}

/// Converts the DTO section into rules.
///
/// # Errors
///
/// Returns the first invalid rule.
pub fn load(dto: ExtraRulesConfigDto) -> Result<Vec<Rule>, ExtraRulesError> {
    dto.extra_rules
        .into_iter()
        .enumerate()
        .map(|(index, rule)| convert_rule(rule, index))
        .collect()
}

fn convert_rule(dto: ExtraRuleDto, index: usize) -> Result<Rule, ExtraRulesError> {
    let path = dto.match_path.trim();
    if !path.starts_with('/') {
        return Err(ExtraRulesError::InvalidMatchPath {
            index,
            path: dto.match_path,
        });
    }

    let access = |value: Option<AccessDto>, operation| match value {
        None | Some(AccessDto::Flag(false)) => Ok(Access::Deny),
        Some(AccessDto::Flag(true)) => Ok(Access::Allow),
        Some(AccessDto::Condition(expr)) if expr.trim().is_empty() => {
            Err(ExtraRulesError::EmptyCondition { index, operation })
        }
        Some(AccessDto::Condition(expr)) => Ok(Access::If(expr)),
    };

    let mut rule = Rule::new(path)
        .allow_create(access(dto.allow_create, Operation::Create)?)
        .allow_read(access(dto.allow_read, Operation::Read)?)
        .allow_update(access(dto.allow_update, Operation::Update)?)
        .allow_delete(access(dto.allow_delete, Operation::Delete)?);
    if let Some(comment) = dto.comment {
        rule = rule.with_comment(comment);
    }
    if let Some(extra) = dto.extra {
        rule = rule.with_extra(extra);
    }
    Ok(rule)
}
