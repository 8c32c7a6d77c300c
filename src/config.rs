//! Semester definitions: which subjects are taken and what each is worth.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::debug;

use crate::calculator::total_credits;

/// A subject offered in a semester.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubjectConfig {
    pub id: String,
    #[serde(default)]
    name: Option<String>,
    pub credits: u32,
}

impl SubjectConfig {
    pub fn new(id: impl Into<String>, credits: u32) -> Self {
        Self {
            id: id.into(),
            name: None,
            credits,
        }
    }

    /// Display name, falling back to the id.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// The subject list of one semester.
///
/// Stored as JSON on disk:
/// ```json
/// {
///   "name": "Semester 3",
///   "subjects": [
///     { "id": "maths", "name": "Engineering Mathematics", "credits": 4 },
///     { "id": "dsa", "credits": 3 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SemesterConfig {
    pub name: String,
    pub subjects: Vec<SubjectConfig>,
}

impl SemesterConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read semester file {path}"))?;
        Self::from_json(&content).with_context(|| format!("invalid semester file {path}"))
    }

    /// Parses a config from JSON text. Duplicate subject ids are rejected.
    pub fn from_json(content: &str) -> Result<Self> {
        let config: SemesterConfig = serde_json::from_str(content)?;

        let mut seen = HashSet::new();
        for subject in &config.subjects {
            if !seen.insert(subject.id.as_str()) {
                bail!("duplicate subject id {:?}", subject.id);
            }
        }

        debug!(
            semester = %config.name,
            subjects = config.subjects.len(),
            "Semester config loaded"
        );
        Ok(config)
    }

    pub fn total_credits(&self) -> u64 {
        total_credits(self.subjects.iter().map(|s| s.credits))
    }

    pub fn subject(&self, id: &str) -> Option<&SubjectConfig> {
        self.subjects.iter().find(|s| s.id == id)
    }
}
