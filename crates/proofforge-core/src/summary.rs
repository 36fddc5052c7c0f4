//! Repository metadata summary - the immutable input to evaluation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Snapshot of repository metadata, produced by an external metadata
/// provider and consumed by the evaluator. Request-scoped and immutable.
///
/// The optional fields may be absent when the provider could not determine
/// them; rules over absent fields simply do not match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    /// Repository owner (user or organization)
    pub owner: String,

    /// Repository name
    pub name: String,

    /// Stargazer count
    pub star_count: u64,

    /// Open issue count
    pub open_issue_count: u64,

    /// Whether a tests/ or test/ directory exists at the repository root
    pub has_tests: bool,

    /// Number of commits observed on the default branch
    pub commit_count: u64,

    /// Primary language, if detected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Repository size in kilobytes, if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_kb: Option<u64>,

    /// Repository description, if set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RepositorySummary {
    /// The canonical `owner/name` key used for record lookup and the
    /// ledger proof message.
    pub fn repository_key(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Validate owner and name against the hosting-provider grammar.
    pub fn validate(&self) -> crate::Result<()> {
        if !is_valid_owner(&self.owner) {
            return Err(CoreError::InvalidIdentifier {
                identifier: self.owner.clone(),
            });
        }
        if !is_valid_repo_name(&self.name) {
            return Err(CoreError::InvalidIdentifier {
                identifier: self.name.clone(),
            });
        }
        Ok(())
    }
}

/// Owner grammar: alphanumeric, with inner hyphens allowed.
pub fn is_valid_owner(owner: &str) -> bool {
    valid_identifier(owner, |c| c == '-')
}

/// Repository-name grammar: alphanumeric, with inner `.`, `_`, `-` allowed.
pub fn is_valid_repo_name(name: &str) -> bool {
    valid_identifier(name, |c| c == '.' || c == '_' || c == '-')
}

fn valid_identifier(s: &str, inner_ok: impl Fn(char) -> bool) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_alphanumeric() {
        return false;
    }
    // First and last must be alphanumeric; separators only in between.
    let Some(last) = s.chars().last() else {
        return false;
    };
    if !last.is_ascii_alphanumeric() {
        return false;
    }
    s.chars().all(|c| c.is_ascii_alphanumeric() || inner_ok(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(owner: &str, name: &str) -> RepositorySummary {
        RepositorySummary {
            owner: owner.to_string(),
            name: name.to_string(),
            star_count: 0,
            open_issue_count: 0,
            has_tests: false,
            commit_count: 0,
            language: None,
            size_kb: None,
            description: None,
        }
    }

    #[test]
    fn repository_key_joins_owner_and_name() {
        assert_eq!(summary("octo", "hello").repository_key(), "octo/hello");
    }

    #[test]
    fn valid_identifiers_accepted() {
        assert!(summary("rust-lang", "rust").validate().is_ok());
        assert!(summary("a", "b").validate().is_ok());
        assert!(summary("user1", "my_repo.rs").validate().is_ok());
    }

    #[test]
    fn invalid_identifiers_rejected() {
        assert!(summary("", "repo").validate().is_err());
        assert!(summary("-leading", "repo").validate().is_err());
        assert!(summary("trailing-", "repo").validate().is_err());
        assert!(summary("owner", "repo!").validate().is_err());
        assert!(summary("own er", "repo").validate().is_err());
        assert!(summary("owner", ".hidden").validate().is_err());
    }

    #[test]
    fn optional_fields_skipped_in_json_when_absent() {
        let json = serde_json::to_string(&summary("o", "n")).unwrap();
        assert!(!json.contains("language"));
        assert!(!json.contains("size_kb"));
    }
}
