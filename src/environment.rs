// Copyright 2025 Cowboy AI, LLC.

//! Symbol tables built while interpreting a document
//!
//! An [`Environment`] is created per parse and returned to the caller; nothing
//! is shared between runs. Tables keep declaration order.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::category::{Category, CategoryRecord, Functor, FunctorRecord};
use crate::errors::OntologyResult;

/// Depth at which an external validator should judge a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationLevel {
    /// Shape only
    Structural,
    /// Meaning of entities and relationships
    Semantic,
    /// Fitness for the intended use
    Pragmatic,
}

impl ValidationLevel {
    /// All levels
    pub const ALL: [ValidationLevel; 3] = [
        ValidationLevel::Structural,
        ValidationLevel::Semantic,
        ValidationLevel::Pragmatic,
    ];

    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationLevel::Structural => "structural",
            ValidationLevel::Semantic => "semantic",
            ValidationLevel::Pragmatic => "pragmatic",
        }
    }
}

impl fmt::Display for ValidationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a name matches none of the validation levels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseValidationLevelError(pub String);

impl fmt::Display for ParseValidationLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown validation level: {}", self.0)
    }
}

impl std::error::Error for ParseValidationLevelError {}

impl FromStr for ValidationLevel {
    type Err = ParseValidationLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValidationLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseValidationLevelError(s.to_string()))
    }
}

/// A `VALIDATE <target> WITH <level>` statement, kept for an external validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRequest {
    /// Name of the ontology or result to validate
    pub target: String,
    /// Requested depth
    pub level: ValidationLevel,
}

/// A declaration skipped because something it referenced was missing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Line of the skipped construct
    pub line: usize,
    /// Column of the skipped construct
    pub column: usize,
    /// What was skipped and why
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

/// Named ontologies, functors and operation results of one document
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Declared ontologies
    pub ontologies: IndexMap<String, Arc<Category>>,
    /// Declared and composed functors
    pub functors: IndexMap<String, Arc<Functor>>,
    /// Categories produced by operation statements
    pub results: IndexMap<String, Arc<Category>>,
    /// Recorded validation statements
    pub validations: Vec<ValidationRequest>,
    /// Skipped declarations, in source order
    pub warnings: Vec<Warning>,
}

impl Environment {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a category operand: ontologies first, then results
    pub fn category(&self, name: &str) -> Option<&Arc<Category>> {
        self.ontologies.get(name).or_else(|| self.results.get(name))
    }

    /// Look up a functor
    pub fn functor(&self, name: &str) -> Option<&Arc<Functor>> {
        self.functors.get(name)
    }

    /// `true` when nothing at all was declared
    pub fn is_empty(&self) -> bool {
        self.ontologies.is_empty()
            && self.functors.is_empty()
            && self.results.is_empty()
            && self.validations.is_empty()
    }

    /// Serializable projection of the whole environment
    pub fn to_record(&self) -> EnvironmentRecord {
        EnvironmentRecord {
            ontologies: self.ontologies.values().map(|c| c.to_record()).collect(),
            functors: self.functors.values().map(|f| f.to_record()).collect(),
            results: self.results.values().map(|c| c.to_record()).collect(),
            validations: self.validations.clone(),
            warnings: self.warnings.clone(),
        }
    }

    /// JSON form of [`Environment::to_record`]
    pub fn to_json(&self) -> OntologyResult<serde_json::Value> {
        Ok(serde_json::to_value(self.to_record())?)
    }
}

/// Ordered JSON projection of an [`Environment`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentRecord {
    /// Ontology records in declaration order
    pub ontologies: Vec<CategoryRecord>,
    /// Functor records in declaration order
    pub functors: Vec<FunctorRecord>,
    /// Result records in evaluation order
    pub results: Vec<CategoryRecord>,
    /// Validation statements
    pub validations: Vec<ValidationRequest>,
    /// Skipped declarations
    pub warnings: Vec<Warning>,
}
