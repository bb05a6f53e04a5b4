use std::collections::{HashMap, HashSet};

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// One registered problem. Immutable once loaded.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Problem {
    pub id: String,
    pub title: String,
    /// Entry point contract keyed by language identifier
    #[serde(default)]
    pub signatures: HashMap<String, Signature>,
    pub examples: Vec<Example>,
    #[serde(default)]
    pub constraints: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub entry_point: String,
    pub params: Vec<Param>,
    pub returns: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// A worked example as shown to the candidate, kept as raw text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub input: String,
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Read-only problem catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    problems: Vec<Problem>,
}

impl Catalog {
    /// Builds the catalog, rejecting duplicate problem ids.
    pub fn new(problems: Vec<Problem>) -> Result<Self> {
        let mut seen = HashSet::new();
        for problem in &problems {
            if !seen.insert(problem.id.as_str()) {
                bail!("Duplicate problem id in catalog: {}", problem.id);
            }
        }
        Ok(Self { problems })
    }

    pub fn find(&self, id: &str) -> Option<&Problem> {
        self.problems.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Problem> {
        self.problems.iter()
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}
