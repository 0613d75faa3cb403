//! Skill taxonomy: category → role → required skills.
//!
//! Loaded once at startup and shared read-only. Two role shapes are accepted
//! in the dataset: a bare skill list, or an object with a description.

pub mod handlers;

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RoleEntry {
    Skills(Vec<String>),
    Described {
        #[serde(default)]
        description: String,
        required_skills: Vec<String>,
    },
}

impl From<RoleEntry> for RoleProfile {
    fn from(entry: RoleEntry) -> Self {
        match entry {
            RoleEntry::Skills(required_skills) => RoleProfile {
                description: String::new(),
                required_skills,
            },
            RoleEntry::Described {
                description,
                required_skills,
            } => RoleProfile {
                description,
                required_skills,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleProfile {
    pub description: String,
    pub required_skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Taxonomy {
    categories: BTreeMap<String, BTreeMap<String, RoleProfile>>,
}

impl Taxonomy {
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, BTreeMap<String, RoleEntry>> =
            serde_json::from_str(json).context("Skill taxonomy must map category → role → skills")?;
        let categories = raw
            .into_iter()
            .map(|(category, roles)| {
                let roles = roles
                    .into_iter()
                    .map(|(role, entry)| (role, RoleProfile::from(entry)))
                    .collect();
                (category, roles)
            })
            .collect();
        Ok(Self { categories })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read skill taxonomy {}", path.display()))?;
        Self::from_json(&json)
    }

    /// Category names, sorted.
    pub fn categories(&self) -> Vec<&str> {
        self.categories.keys().map(String::as_str).collect()
    }

    /// Role names for a category, sorted. Unknown category → empty.
    pub fn roles(&self, category: &str) -> Vec<&str> {
        self.categories
            .get(category)
            .map(|roles| roles.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn profile(&self, category: &str, role: &str) -> Option<&RoleProfile> {
        self.categories.get(category)?.get(role)
    }

    /// Required skills for a role, or `None` when the pair is unknown.
    pub fn skills(&self, category: &str, role: &str) -> Option<&[String]> {
        self.profile(category, role)
            .map(|p| p.required_skills.as_slice())
    }

    pub fn role_count(&self) -> usize {
        self.categories.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: &str = r#"{
        "Technology": {
            "Software Engineer": {
                "description": "Builds software",
                "required_skills": ["python", "git"]
            },
            "Backend Developer": ["sql", "docker"]
        },
        "Design": {
            "UI Designer": ["figma"]
        }
    }"#;

    #[test]
    fn test_accepts_both_role_shapes() {
        let t = Taxonomy::from_json(MIXED).unwrap();
        assert_eq!(
            t.skills("Technology", "Software Engineer"),
            Some(&["python".to_string(), "git".to_string()][..])
        );
        let backend = t.profile("Technology", "Backend Developer").unwrap();
        assert_eq!(backend.description, "");
        assert_eq!(backend.required_skills, vec!["sql", "docker"]);
    }

    #[test]
    fn test_categories_and_roles_are_sorted() {
        let t = Taxonomy::from_json(MIXED).unwrap();
        assert_eq!(t.categories(), vec!["Design", "Technology"]);
        assert_eq!(
            t.roles("Technology"),
            vec!["Backend Developer", "Software Engineer"]
        );
        assert!(t.roles("Cooking").is_empty());
        assert_eq!(t.role_count(), 3);
    }

    #[test]
    fn test_unknown_pair_has_no_skills() {
        let t = Taxonomy::from_json(MIXED).unwrap();
        assert!(t.skills("Technology", "Chef").is_none());
        assert!(t.skills("Cooking", "Chef").is_none());
    }

    #[test]
    fn test_rejects_malformed_dataset() {
        assert!(Taxonomy::from_json(r#"{"Technology": 3}"#).is_err());
        assert!(Taxonomy::from_json("not json").is_err());
    }

    #[test]
    fn test_serializes_nested_with_descriptions() {
        let t = Taxonomy::from_json(MIXED).unwrap();
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(
            v["Technology"]["Software Engineer"]["description"],
            "Builds software"
        );
        assert_eq!(v["Design"]["UI Designer"]["required_skills"][0], "figma");
    }

    #[test]
    fn test_shipped_dataset_parses() {
        let t = Taxonomy::from_json(include_str!("../../data/roles.json")).unwrap();
        assert!(t.categories().contains(&"Technology"));
        let skills = t.skills("Technology", "Software Engineer").unwrap();
        assert!(skills.iter().any(|s| s == "python"));
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(Taxonomy::load(Path::new("/nonexistent/roles.json")).is_err());
    }
}
