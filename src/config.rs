// Copyright 2025 Cowboy AI, LLC.

//! Interpreter configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::OntologyResult;

/// Options controlling how leniently a document is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fail with an unresolved-reference error instead of skipping declarations
    /// whose referents are missing
    pub strict_references: bool,

    /// Join a number and the identifier directly after it into one attribute,
    /// so `5MW` stays a single value
    pub join_unit_suffixes: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strict_references: false,
            join_unit_suffixes: true,
        }
    }
}

impl EngineConfig {
    /// Strict configuration: every unresolved reference is an error
    pub fn strict() -> Self {
        Self {
            strict_references: true,
            ..Self::default()
        }
    }

    /// Parse a JSON configuration; absent fields keep their defaults
    pub fn from_json_str(json: &str) -> OntologyResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file
    pub fn from_path(path: impl AsRef<Path>) -> OntologyResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
