//! Alias table: canonical skill → synonyms and alternate spellings.
//!
//! Loaded once at startup from a JSON data file, read-only afterwards.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::scoring::text::normalize;

#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: HashMap<String, Vec<String>>,
}

impl AliasTable {
    /// Builds a table from raw entries. Keys are lowercased; aliases are
    /// normalized, and empty or duplicate aliases are dropped.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator,
        V::Item: AsRef<str>,
    {
        let mut table: HashMap<String, Vec<String>> = HashMap::new();
        for (skill, aliases) in entries {
            let key = skill.as_ref().trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            let slot = table.entry(key).or_default();
            for alias in aliases {
                let alias = normalize(alias.as_ref());
                if !alias.is_empty() && !slot.contains(&alias) {
                    slot.push(alias);
                }
            }
        }
        Self { entries: table }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, Vec<String>> =
            serde_json::from_str(json).context("alias table must be an object of string arrays")?;
        Ok(Self::from_entries(raw))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read alias table at {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid alias table at {}", path.display()))
    }

    /// Aliases for a skill (case-insensitive). Unknown skill → empty slice.
    pub fn aliases(&self, skill: &str) -> &[String] {
        self.entries
            .get(&skill.trim().to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The normalized skill itself followed by its aliases, deduplicated.
    pub fn candidates(&self, skill: &str) -> Vec<String> {
        let mut out = Vec::with_capacity(1 + self.aliases(skill).len());
        let canonical = normalize(skill);
        if !canonical.is_empty() {
            out.push(canonical);
        }
        for alias in self.aliases(skill) {
            if !out.contains(alias) {
                out.push(alias.clone());
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
