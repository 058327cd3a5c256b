//! Data-file loader and serializer.
//!
//! Data files are line-oriented: one object per line, the object's name
//! first, then tab-separated `FACT:NAME|value` entries. `#` starts a comment
//! line and blank lines are ignored.
//!
//! ```text
//! # creatures.lst
//! Ogre	FACT:SIZE|LARGE	FACT:LEGS|2
//! Wisp	FACT:SIZE|.CLEAR	FACT:SIZE|SMALL
//! ```
//!
//! A load pass never aborts on bad data: unknown facts, empty values, and
//! conversion failures are collected per entry into a [`LoadReport`] with
//! their line numbers, the failed entry stores nothing, and the rest of the
//! file still applies.

use std::path::Path;

use facts_core::{DOT_CLEAR, FactError, FactKey, ObjectId, ObjectKind};

use crate::policy::{DuplicatePolicy, LoadPolicy};
use crate::store::ObjectStore;
use crate::tokens::TokenSet;
use crate::{LoadResult, read_file};

/// One problem found in a load pass, tied to its source line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadIssue {
    /// 1-based line number in the source.
    pub line: usize,
    /// The entry text that failed.
    pub entry: String,
    /// Stable error code (see [`FactError::error_code`]).
    pub code: &'static str,
    pub message: String,
}

/// Outcome of loading one data source.
#[derive(Clone, Debug, Default)]
pub struct LoadReport {
    /// File path or other display name of the source.
    pub source: String,
    /// Entries successfully applied.
    pub applied: usize,
    /// Per-entry problems, in source order.
    pub issues: Vec<LoadIssue>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Applies data files to an object store through a schema's tokens.
pub struct DataLoader<'a> {
    tokens: &'a TokenSet,
    policy: LoadPolicy,
}

impl<'a> DataLoader<'a> {
    pub fn new(tokens: &'a TokenSet, policy: LoadPolicy) -> Self {
        Self { tokens, policy }
    }

    /// Load a data file whose objects are all of the given kind.
    pub fn load_file(
        &self,
        path: &Path,
        kind: &ObjectKind,
        store: &mut ObjectStore,
    ) -> LoadResult<LoadReport> {
        let content = read_file(path)?;
        Ok(self.load_str(&path.display().to_string(), kind, &content, store))
    }

    /// Apply data-file text to the store, one pass.
    pub fn load_str(
        &self,
        source: &str,
        kind: &ObjectKind,
        content: &str,
        store: &mut ObjectStore,
    ) -> LoadReport {
        let mut report = LoadReport {
            source: source.to_owned(),
            ..LoadReport::default()
        };
        // Tracks which slots this pass has set, for the Reject policy.
        let mut seen: Vec<(ObjectId, FactKey)> = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            let lineno = idx + 1;
            let line = line.trim_end();
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            let mut fields = line.split('\t');
            // First field names the object; split always yields at least one.
            let name = fields.next().unwrap_or_default().trim();
            if name.is_empty() {
                report.issues.push(LoadIssue {
                    line: lineno,
                    entry: line.to_owned(),
                    code: "LOAD_UNNAMED_OBJECT",
                    message: "line starts with an entry instead of an object name".to_owned(),
                });
                continue;
            }
            let object = store.intern(kind, name);
            for entry in fields {
                let entry = entry.trim();
                if entry.is_empty() {
                    continue;
                }
                self.apply_entry(entry, lineno, kind, object, store, &mut seen, &mut report);
            }
        }

        tracing::debug!(
            source = %report.source,
            applied = report.applied,
            issues = report.issues.len(),
            "data file pass finished"
        );
        report
    }

    fn apply_entry(
        &self,
        entry: &str,
        lineno: usize,
        kind: &ObjectKind,
        object: ObjectId,
        store: &mut ObjectStore,
        seen: &mut Vec<(ObjectId, FactKey)>,
        report: &mut LoadReport,
    ) {
        let Some(rest) = entry.strip_prefix("FACT:") else {
            push_issue(
                report,
                lineno,
                entry,
                "LOAD_UNKNOWN_ENTRY",
                "entry is not a FACT: token".to_owned(),
            );
            return;
        };
        let Some((fact_name, raw)) = rest.split_once('|') else {
            push_issue(
                report,
                lineno,
                entry,
                "LOAD_MALFORMED_ENTRY",
                "missing '|' between fact name and value".to_owned(),
            );
            return;
        };
        let Some(token) = self.tokens.get(kind, fact_name) else {
            push_issue(
                report,
                lineno,
                entry,
                "LOAD_UNKNOWN_FACT",
                format!("no fact named '{}' is declared for kind {}", fact_name, kind),
            );
            return;
        };

        let key = token.definition().fact_key();
        if raw == DOT_CLEAR {
            seen.retain(|slot| *slot != (object, key));
        } else if seen.contains(&(object, key))
            && self.policy.duplicate_facts == DuplicatePolicy::Reject
        {
            push_issue(
                report,
                lineno,
                entry,
                "LOAD_DUPLICATE_ENTRY",
                format!(
                    "fact '{}' was already set for this object in this pass",
                    token.token_name()
                ),
            );
            return;
        }

        match token.parse(store, object, raw) {
            Ok(()) => {
                if raw != DOT_CLEAR && !seen.contains(&(object, key)) {
                    seen.push((object, key));
                }
                report.applied += 1;
            }
            Err(e) => push_issue(report, lineno, entry, e.error_code(), e.to_string()),
        }
    }

    /// Emit the minimal entries that reproduce one object's fact state,
    /// sorted by fact name.
    pub fn unparse_object(&self, store: &ObjectStore, object: ObjectId) -> Vec<String> {
        let Some(kind) = store.kind(object) else {
            return Vec::new();
        };
        let mut entries = Vec::new();
        for token in self.tokens.tokens_for_kind(kind) {
            for part in token.unparse(store, object) {
                entries.push(format!("FACT:{}|{}", token.token_name(), part));
            }
        }
        entries
    }

    /// Serialize every object of a kind back to data-file text, in load
    /// order. Feeding the result back through [`DataLoader::load_str`]
    /// reproduces the same fact state.
    pub fn unparse_str(&self, store: &ObjectStore, kind: &ObjectKind) -> String {
        let mut out = String::new();
        for object in store.objects_of(kind) {
            let Some(name) = store.name(object) else {
                continue;
            };
            out.push_str(name);
            for entry in self.unparse_object(store, object) {
                out.push('\t');
                out.push_str(&entry);
            }
            out.push('\n');
        }
        out
    }
}

fn push_issue(
    report: &mut LoadReport,
    line: usize,
    entry: &str,
    code: &'static str,
    message: String,
) {
    tracing::warn!(line, entry, code, "entry skipped: {message}");
    report.issues.push(LoadIssue {
        line,
        entry: entry.to_owned(),
        code,
        message,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaLoader;

    const SCHEMA: &str = r#"[
        (name: "SIZE", kind: "CREATURE", format: Enumerated(["SMALL", "MEDIUM", "LARGE"])),
        (name: "LEGS", kind: "CREATURE", format: Integer),
        (name: "DEITY", kind: "CREATURE", format: Reference("DEITY")),
    ]"#;

    fn creature() -> ObjectKind {
        ObjectKind::new("CREATURE")
    }

    #[test]
    fn applies_entries_and_reports_clean() {
        let schema = SchemaLoader::load_str(SCHEMA).unwrap();
        let loader = DataLoader::new(&schema.tokens, LoadPolicy::default());
        let mut store = ObjectStore::new();

        let report = loader.load_str(
            "creatures.lst",
            &creature(),
            "Ogre\tFACT:SIZE|LARGE\tFACT:LEGS|2\n",
            &mut store,
        );
        assert!(report.is_clean());
        assert_eq!(report.applied, 2);

        let ogre = store.lookup(&creature(), "Ogre").unwrap();
        assert_eq!(
            loader.unparse_object(&store, ogre),
            vec!["FACT:LEGS|2", "FACT:SIZE|LARGE"]
        );
    }

    #[test]
    fn bad_entries_accumulate_and_good_ones_apply() {
        let schema = SchemaLoader::load_str(SCHEMA).unwrap();
        let loader = DataLoader::new(&schema.tokens, LoadPolicy::default());
        let mut store = ObjectStore::new();

        let text = "\
# comment line\n\
Ogre\tFACT:SIZE|HUGE\tFACT:LEGS|2\n\
\n\
Wisp\tFACT:WINGS|2\tFACT:LEGS|\tFACT:SIZE|SMALL\n";
        let report = loader.load_str("creatures.lst", &creature(), text, &mut store);

        assert_eq!(report.applied, 2);
        let codes: Vec<&str> = report.issues.iter().map(|i| i.code).collect();
        assert_eq!(
            codes,
            vec!["PARSE_CONVERSION", "LOAD_UNKNOWN_FACT", "PARSE_EMPTY_VALUE"]
        );
        assert_eq!(report.issues[0].line, 2);
        assert_eq!(report.issues[1].line, 4);

        // Failed SIZE stored nothing on Ogre; Wisp's SIZE applied.
        let ogre = store.lookup(&creature(), "Ogre").unwrap();
        assert_eq!(loader.unparse_object(&store, ogre), vec!["FACT:LEGS|2"]);
        let wisp = store.lookup(&creature(), "Wisp").unwrap();
        assert_eq!(loader.unparse_object(&store, wisp), vec!["FACT:SIZE|SMALL"]);
    }

    #[test]
    fn clear_then_reset_unparses_in_order() {
        let schema = SchemaLoader::load_str(SCHEMA).unwrap();
        let loader = DataLoader::new(&schema.tokens, LoadPolicy::default());
        let mut store = ObjectStore::new();

        loader.load_str(
            "creatures.lst",
            &creature(),
            "Wisp\tFACT:SIZE|.CLEAR\tFACT:SIZE|SMALL\n",
            &mut store,
        );
        let wisp = store.lookup(&creature(), "Wisp").unwrap();
        assert_eq!(
            loader.unparse_object(&store, wisp),
            vec!["FACT:SIZE|.CLEAR", "FACT:SIZE|SMALL"]
        );
    }

    #[test]
    fn reject_policy_flags_repeated_sets() {
        let schema = SchemaLoader::load_str(SCHEMA).unwrap();
        let policy = LoadPolicy {
            duplicate_facts: DuplicatePolicy::Reject,
        };
        let loader = DataLoader::new(&schema.tokens, policy);
        let mut store = ObjectStore::new();

        let report = loader.load_str(
            "creatures.lst",
            &creature(),
            "Ogre\tFACT:SIZE|SMALL\tFACT:SIZE|LARGE\n",
            &mut store,
        );
        assert_eq!(report.applied, 1);
        assert_eq!(report.issues[0].code, "LOAD_DUPLICATE_ENTRY");

        // First value stands.
        let ogre = store.lookup(&creature(), "Ogre").unwrap();
        assert_eq!(loader.unparse_object(&store, ogre), vec!["FACT:SIZE|SMALL"]);
    }

    #[test]
    fn reject_policy_allows_clear_then_reset() {
        let schema = SchemaLoader::load_str(SCHEMA).unwrap();
        let policy = LoadPolicy {
            duplicate_facts: DuplicatePolicy::Reject,
        };
        let loader = DataLoader::new(&schema.tokens, policy);
        let mut store = ObjectStore::new();

        let report = loader.load_str(
            "creatures.lst",
            &creature(),
            "Ogre\tFACT:SIZE|SMALL\tFACT:SIZE|.CLEAR\tFACT:SIZE|LARGE\n",
            &mut store,
        );
        assert!(report.is_clean());
    }

    #[test]
    fn last_wins_by_default() {
        let schema = SchemaLoader::load_str(SCHEMA).unwrap();
        let loader = DataLoader::new(&schema.tokens, LoadPolicy::default());
        let mut store = ObjectStore::new();

        let report = loader.load_str(
            "creatures.lst",
            &creature(),
            "Ogre\tFACT:SIZE|SMALL\tFACT:SIZE|LARGE\n",
            &mut store,
        );
        assert!(report.is_clean());
        let ogre = store.lookup(&creature(), "Ogre").unwrap();
        assert_eq!(loader.unparse_object(&store, ogre), vec!["FACT:SIZE|LARGE"]);
    }

    #[test]
    fn round_trip_through_text() {
        let schema = SchemaLoader::load_str(SCHEMA).unwrap();
        let loader = DataLoader::new(&schema.tokens, LoadPolicy::default());
        let mut store = ObjectStore::new();

        let text = "Ogre\tFACT:LEGS|2\tFACT:SIZE|LARGE\nWisp\tFACT:SIZE|.CLEAR\n";
        loader.load_str("creatures.lst", &creature(), text, &mut store);

        let emitted = loader.unparse_str(&store, &creature());
        assert_eq!(emitted, text);

        // And the emitted text loads to the same state again.
        let mut store2 = ObjectStore::new();
        let report = loader.load_str("emitted", &creature(), &emitted, &mut store2);
        assert!(report.is_clean());
        assert_eq!(loader.unparse_str(&store2, &creature()), emitted);
    }
}
