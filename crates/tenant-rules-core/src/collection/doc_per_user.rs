//! One document per authenticated user, keyed by user id.

use crate::rule::Rule;

/// Collection holding one document per user at `/<name>/{userId}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocPerUserCollection {
    name: String,
}

impl DocPerUserCollection {
    /// Path placeholder bound to the document id.
    pub const ID_PLACEHOLDER: &'static str = "userId";

    /// Creates the collection. Permissions do not apply to this pattern.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the collection name.
    #[must_use]
    pub fn collection_name(&self) -> &str {
        &self.name
    }

    /// Only the owner may read or write their document.
    #[must_use]
    pub fn firestore_rules(&self) -> Vec<Rule> {
        let owner = format!(
            "request.auth != null && request.auth.uid == {}",
            Self::ID_PLACEHOLDER
        );
        vec![Rule::new(format!("/{}/{{{}}}", self.name, Self::ID_PLACEHOLDER))
            .with_comment(format!("{}: one document per user", self.name))
            .allow_read(owner.as_str())
            .allow_write(owner)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Access;

    #[test]
    fn single_owner_rule() {
        let rules = DocPerUserCollection::new("profiles").firestore_rules();
        assert_eq!(rules.len(), 1);

        let rule = &rules[0];
        let owner = Access::when("request.auth != null && request.auth.uid == userId");
        assert_eq!(rule.match_path, "/profiles/{userId}");
        assert_eq!(rule.allow_read, owner);
        assert_eq!(rule.allow_create, owner);
        assert_eq!(rule.allow_update, owner);
        assert_eq!(rule.allow_delete, owner);
        assert!(rule.extra.is_none());
    }
}
