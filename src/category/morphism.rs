// Copyright 2025 Cowboy AI, LLC.

//! Morphisms - typed relationships between ontology objects
//!
//! A morphism is identified by its name together with its source and target
//! objects. The morphism type and descriptive payload never take part in
//! equality.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::object::Object;

/// Kinds of relationship a morphism can express
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum MorphismType {
    /// Structural relation (has-part, is-a)
    #[default]
    Structural,
    /// Functional relation (produces, consumes)
    Functional,
    /// Temporal relation (before, after, during)
    Temporal,
    /// Causal relation (causes, enables)
    Causal,
    /// Measurement relation (measures, quantifies)
    Measurement,
    /// Identity morphism
    Identity,
}

impl MorphismType {
    /// All morphism types in declaration order
    pub const ALL: [MorphismType; 6] = [
        MorphismType::Structural,
        MorphismType::Functional,
        MorphismType::Temporal,
        MorphismType::Causal,
        MorphismType::Measurement,
        MorphismType::Identity,
    ];

    /// Canonical lowercase value
    pub fn as_str(self) -> &'static str {
        match self {
            MorphismType::Structural => "structural",
            MorphismType::Functional => "functional",
            MorphismType::Temporal => "temporal",
            MorphismType::Causal => "causal",
            MorphismType::Measurement => "measurement",
            MorphismType::Identity => "identity",
        }
    }
}

impl fmt::Display for MorphismType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a name matches none of the morphism types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMorphismTypeError(pub String);

impl fmt::Display for ParseMorphismTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown morphism type: {}", self.0)
    }
}

impl std::error::Error for ParseMorphismTypeError {}

impl FromStr for MorphismType {
    type Err = ParseMorphismTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MorphismType::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseMorphismTypeError(s.to_string()))
    }
}

/// A typed, directed relationship between two objects
#[derive(Debug, Clone)]
pub struct Morphism {
    /// Name of the relationship, unique within its category
    pub name: String,

    /// Source object
    pub source: Object,

    /// Target object
    pub target: Object,

    /// Kind of relationship
    pub morphism_type: MorphismType,

    /// Ordered property tokens
    pub properties: Vec<String>,

    /// Free-text description of the relationship
    pub semantic_description: String,
}

impl Morphism {
    /// Create a morphism without properties or description
    pub fn new(
        name: impl Into<String>,
        source: Object,
        target: Object,
        morphism_type: MorphismType,
    ) -> Self {
        Self {
            name: name.into(),
            source,
            target,
            morphism_type,
            properties: Vec::new(),
            semantic_description: String::new(),
        }
    }

    /// Identity morphism `id_<name>` on an object
    pub fn identity(object: &Object) -> Self {
        Self {
            name: format!("id_{}", object.name),
            source: object.clone(),
            target: object.clone(),
            morphism_type: MorphismType::Identity,
            properties: Vec::new(),
            semantic_description: format!("Identity on {}", object.name),
        }
    }

    /// Replace the property list
    pub fn with_properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties = properties.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the semantic description
    pub fn with_semantic(mut self, semantic: impl Into<String>) -> Self {
        self.semantic_description = semantic.into();
        self
    }

    /// Compose `self ∘ other`, applying `other` first
    ///
    /// Defined only when `other` ends where `self` starts. The composite runs
    /// from `other.source` to `self.target` and is always structural.
    pub fn compose(&self, other: &Morphism) -> Option<Morphism> {
        if self.source != other.target {
            return None;
        }
        Some(Morphism {
            name: format!("({} ∘ {})", self.name, other.name),
            source: other.source.clone(),
            target: self.target.clone(),
            morphism_type: MorphismType::Structural,
            properties: Vec::new(),
            semantic_description: format!(
                "Composition: {} then {}",
                other.semantic_description, self.semantic_description
            ),
        })
    }

    /// `true` for auto-generated identities
    pub fn is_identity(&self) -> bool {
        self.morphism_type == MorphismType::Identity
    }

    /// Signature used by structural comparisons: `(source, target, type)`
    pub fn signature(&self) -> (&str, &str, MorphismType) {
        (&self.source.name, &self.target.name, self.morphism_type)
    }
}

impl PartialEq for Morphism {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.source == other.source && self.target == other.target
    }
}

impl Eq for Morphism {}

impl Hash for Morphism {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.source.hash(state);
        self.target.hash(state);
    }
}

impl fmt::Display for Morphism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {} [{}]",
            self.name, self.source.name, self.target.name, self.morphism_type
        )
    }
}
