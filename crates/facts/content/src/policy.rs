//! Load policy configuration.

use std::path::Path;

use serde::Deserialize;

use crate::{LoadResult, read_file};

/// What to do when one object sets the same fact more than once in a pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Later entries overwrite earlier ones (the default).
    #[default]
    LastWins,

    /// A repeated set without an intervening clear is a per-entry issue.
    Reject,
}

/// Tunable behavior of a data-file load pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LoadPolicy {
    pub duplicate_facts: DuplicatePolicy,
}

/// Loader for load policy from TOML files.
pub struct PolicyLoader;

impl PolicyLoader {
    /// Load policy from a TOML file.
    pub fn load(path: &Path) -> LoadResult<LoadPolicy> {
        let content = read_file(path)?;
        let policy: LoadPolicy = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse policy TOML: {}", e))?;

        Ok(policy)
    }

    /// Load policy from a TOML file, falling back to defaults when the file
    /// does not exist. A present-but-broken file is still an error.
    pub fn load_or_default(path: &Path) -> LoadResult<LoadPolicy> {
        if !path.exists() {
            return Ok(LoadPolicy::default());
        }
        Self::load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_last_wins() {
        assert_eq!(LoadPolicy::default().duplicate_facts, DuplicatePolicy::LastWins);
    }

    #[test]
    fn parses_reject_policy() {
        let policy: LoadPolicy = toml::from_str("duplicate-facts = \"reject\"").unwrap();
        assert_eq!(policy.duplicate_facts, DuplicatePolicy::Reject);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let policy: LoadPolicy = toml::from_str("").unwrap();
        assert_eq!(policy, LoadPolicy::default());
    }
}
