//! Rule value object and its Firestore rendering.

use std::fmt::Write;

/// Indentation unit used for nested rule text.
pub const INDENT: &str = "  ";

/// Access granted for a single operation inside a rule block.
///
/// Maps onto the three configurable states of an `allow` statement:
/// omitted, unconditional, or guarded by an expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Access {
    /// No `allow` line is emitted; the engine's implicit deny applies.
    #[default]
    Deny,
    /// Renders `if true`.
    Allow,
    /// Renders `if <expr>` verbatim, without escaping or validation.
    If(String),
}

impl Access {
    /// Builds a conditional access from any string-like expression.
    #[must_use]
    pub fn when(expr: impl Into<String>) -> Self {
        Self::If(expr.into())
    }

    /// Returns true if this operation is omitted from the rendered block.
    #[must_use]
    pub fn is_deny(&self) -> bool {
        matches!(self, Self::Deny)
    }

    /// Returns the condition text, or `None` for [`Access::Deny`].
    #[must_use]
    pub fn condition(&self) -> Option<&str> {
        match self {
            Self::Deny => None,
            Self::Allow => Some("true"),
            Self::If(expr) => Some(expr),
        }
    }
}

impl From<bool> for Access {
    fn from(value: bool) -> Self {
        if value {
            Self::Allow
        } else {
            Self::Deny
        }
    }
}

impl From<&str> for Access {
    fn from(value: &str) -> Self {
        Self::If(value.to_string())
    }
}

impl From<String> for Access {
    fn from(value: String) -> Self {
        Self::If(value)
    }
}

/// Operations that can appear in an `allow` statement, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `allow create`
    Create,
    /// `allow read`
    Read,
    /// `allow update`
    Update,
    /// `allow delete`
    Delete,
}

impl Operation {
    /// All operations in the order they are rendered.
    pub const ALL: [Self; 4] = [Self::Create, Self::Read, Self::Update, Self::Delete];

    /// Returns the keyword used in rule text.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `match` block of a Firestore rules document.
///
/// Rules are immutable values: the `with_*` / `allow_*` methods consume and
/// return a new rule, so a block can be assembled in one expression.
///
/// # Example
///
/// ```
/// use tenant_rules_core::{Access, Rule};
///
/// let rule = Rule::new("/tenants/{tenantId}")
///     .with_comment("Tenant registry")
///     .allow_read(Access::when("request.auth != null"));
///
/// assert!(rule.to_text().contains("allow read: if request.auth != null;"));
/// assert!(!rule.to_text().contains("allow delete"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    /// Path after the `match` keyword, including placeholders.
    pub match_path: String,
    /// Line comment emitted just above the block.
    pub comment: Option<String>,
    /// Access for `create`.
    pub allow_create: Access,
    /// Access for `read`.
    pub allow_read: Access,
    /// Access for `update`.
    pub allow_update: Access,
    /// Access for `delete`.
    pub allow_delete: Access,
    /// Free text emitted first inside the block (helper functions, nested matches).
    pub extra: Option<String>,
}

impl Rule {
    /// Creates a rule that denies every operation on `match_path`.
    #[must_use]
    pub fn new(match_path: impl Into<String>) -> Self {
        Self {
            match_path: match_path.into(),
            comment: None,
            allow_create: Access::Deny,
            allow_read: Access::Deny,
            allow_update: Access::Deny,
            allow_delete: Access::Deny,
            extra: None,
        }
    }

    /// Sets the comment line.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the text emitted before the `allow` lines.
    #[must_use]
    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = Some(extra.into());
        self
    }

    /// Sets `create` access.
    #[must_use]
    pub fn allow_create(mut self, access: impl Into<Access>) -> Self {
        self.allow_create = access.into();
        self
    }

    /// Sets `read` access.
    #[must_use]
    pub fn allow_read(mut self, access: impl Into<Access>) -> Self {
        self.allow_read = access.into();
        self
    }

    /// Sets `update` access.
    #[must_use]
    pub fn allow_update(mut self, access: impl Into<Access>) -> Self {
        self.allow_update = access.into();
        self
    }

    /// Sets `delete` access.
    #[must_use]
    pub fn allow_delete(mut self, access: impl Into<Access>) -> Self {
        self.allow_delete = access.into();
        self
    }

    /// Sets `create`, `update` and `delete` to the same access.
    #[must_use]
    pub fn allow_write(self, access: impl Into<Access>) -> Self {
        let access = access.into();
        self.allow_create(access.clone())
            .allow_update(access.clone())
            .allow_delete(access)
    }

    /// Returns the configured access for an operation.
    #[must_use]
    pub fn access(&self, op: Operation) -> &Access {
        match op {
            Operation::Create => &self.allow_create,
            Operation::Read => &self.allow_read,
            Operation::Update => &self.allow_update,
            Operation::Delete => &self.allow_delete,
        }
    }

    /// Renders this rule as a Firestore `match` block.
    ///
    /// Rendering is total: any field combination produces text. Condition
    /// strings are trusted and copied as-is.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        if let Some(comment) = &self.comment {
            for line in comment.lines() {
                let _ = writeln!(out, "// {line}");
            }
        }
        let _ = writeln!(out, "match {} {{", self.match_path);
        if let Some(extra) = &self.extra {
            out.push_str(&indent(extra, 1));
            out.push('\n');
        }
        for op in Operation::ALL {
            if let Some(condition) = self.access(op).condition() {
                let _ = writeln!(out, "{INDENT}allow {op}: if {condition};");
            }
        }
        out.push('}');
        out
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Indents every non-empty line of `text` by `levels` units.
#[must_use]
pub fn indent(text: &str, levels: usize) -> String {
    let prefix = INDENT.repeat(levels);
    text.trim_end_matches('\n')
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
