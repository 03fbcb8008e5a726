use super::definition::Rule;
use crate::error::RuleParseError;
use serde::{Deserialize, Serialize};
use std::fs;

/// A persistable collection of compiled rules.
///
/// Rules are stored as JSON: the condition tree is discriminated
/// structurally on the wire, so the encoding must be self-describing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleArchive {
    pub rules: Vec<Rule>,
}

impl RuleArchive {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Saves the archive to a file as pretty-printed JSON.
    pub fn save(&self, path: &str) -> Result<(), RuleParseError> {
        let json =
            serde_json::to_string_pretty(self).map_err(|e| RuleParseError::Json(e.to_string()))?;
        fs::write(path, json).map_err(|e| RuleParseError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Loads an archive from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, RuleParseError> {
        let content = fs::read_to_string(path).map_err(|e| RuleParseError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    /// Deserializes an archive from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, RuleParseError> {
        serde_json::from_str(json).map_err(|e| RuleParseError::Json(e.to_string()))
    }
}
