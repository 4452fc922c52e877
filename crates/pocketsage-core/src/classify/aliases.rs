use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One configured account alias: a case-insensitive pattern over the question
/// text mapped to an account mask and display name. `unless` is an optional
/// veto pattern; the alias only matches when `pattern` hits and `unless`
/// does not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountAlias {
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unless: Option<String>,
    pub mask: String,
    pub name: String,
}

/// Ordered alias table. Scanned top-down; the first matching entry wins, so
/// more specific entries belong earlier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasTable {
    pub aliases: Vec<AccountAlias>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self {
            aliases: vec![
                AccountAlias {
                    pattern: r"main\s*check|checking|3903".to_string(),
                    unless: None,
                    mask: "3903".to_string(),
                    name: "Main Checking".to_string(),
                },
                AccountAlias {
                    pattern: r"\bmain\b|7255".to_string(),
                    unless: Some(r"\bmain\b.*check".to_string()),
                    mask: "7255".to_string(),
                    name: "Main".to_string(),
                },
                AccountAlias {
                    pattern: r"business|7561".to_string(),
                    unless: None,
                    mask: "7561".to_string(),
                    name: "Business".to_string(),
                },
                AccountAlias {
                    pattern: r"work|8217".to_string(),
                    unless: None,
                    mask: "8217".to_string(),
                    name: "Work".to_string(),
                },
            ],
        }
    }
}

impl AliasTable {
    /// Loads the table from `accounts.json` in the pocketsage home. A missing
    /// file yields the built-in defaults; an unreadable or malformed file is
    /// reported and also falls back, since alias lookup must never fail a
    /// question.
    pub fn load_or_default(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(value) => value,
            Err(error) => {
                if error.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %path.display(), %error, "alias table unreadable, using defaults");
                }
                return Self::default();
            }
        };

        match serde_json::from_str::<Self>(&content) {
            Ok(table) => table,
            Err(error) => {
                warn!(path = %path.display(), %error, "alias table malformed, using defaults");
                Self::default()
            }
        }
    }

    pub fn display_name_for_mask(&self, mask: &str) -> Option<&str> {
        self.aliases
            .iter()
            .find(|alias| alias.mask == mask)
            .map(|alias| alias.name.as_str())
    }
}

#[derive(Debug)]
pub(crate) struct CompiledAlias {
    pub(crate) pattern: Regex,
    pub(crate) unless: Option<Regex>,
    pub(crate) mask: String,
    pub(crate) name: String,
}

pub(crate) fn compile_aliases(table: &AliasTable) -> Vec<CompiledAlias> {
    let mut compiled = Vec::with_capacity(table.aliases.len());
    for alias in &table.aliases {
        let pattern = match Regex::new(&alias.pattern) {
            Ok(value) => value,
            Err(error) => {
                warn!(pattern = %alias.pattern, %error, "skipping alias with invalid pattern");
                continue;
            }
        };
        let unless = match &alias.unless {
            Some(raw) => match Regex::new(raw) {
                Ok(value) => Some(value),
                Err(error) => {
                    warn!(pattern = %raw, %error, "skipping alias with invalid unless pattern");
                    continue;
                }
            },
            None => None,
        };
        compiled.push(CompiledAlias {
            pattern,
            unless,
            mask: alias.mask.clone(),
            name: alias.name.clone(),
        });
    }
    compiled
}

impl CompiledAlias {
    pub(crate) fn matches(&self, question: &str) -> bool {
        if !self.pattern.is_match(question) {
            return false;
        }
        match &self.unless {
            Some(veto) => !veto.is_match(question),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{compile_aliases, AliasTable};

    #[test]
    fn default_table_resolves_known_masks() {
        let table = AliasTable::default();
        assert_eq!(table.display_name_for_mask("3903"), Some("Main Checking"));
        assert_eq!(table.display_name_for_mask("7561"), Some("Business"));
        assert_eq!(table.display_name_for_mask("0000"), None);
    }

    #[test]
    fn unless_pattern_vetoes_the_match() {
        let table = AliasTable::default();
        let compiled = compile_aliases(&table);
        let main = compiled
            .iter()
            .find(|alias| alias.mask == "7255")
            .expect("default table has a Main entry");

        assert!(main.matches("how much did my main account spend"));
        assert!(!main.matches("main checking balance"));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("accounts.json");
        std::fs::write(&path, "{ not json").expect("write");

        let table = AliasTable::load_or_default(&path);
        assert_eq!(table.aliases.len(), AliasTable::default().aliases.len());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let table = AliasTable::load_or_default(&dir.path().join("absent.json"));
        assert!(!table.aliases.is_empty());
    }
}
