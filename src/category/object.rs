// Copyright 2025 Cowboy AI, LLC.

//! Objects of an ontology category
//!
//! An object is an ontology entity. Its identity is the `(name, domain)` pair:
//! the same concept name in two different domains denotes two distinct entities.
//! Attributes and the semantic signature are descriptive and never take part in
//! equality, hashing or ordering.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Domain assigned to morphism endpoints that were referenced before being declared
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// An entity in an ontology
#[derive(Debug, Clone)]
pub struct Object {
    /// Name of the entity, unique within its category
    pub name: String,

    /// Domain the entity belongs to
    pub domain: String,

    /// Ordered attribute tokens
    pub attributes: Vec<String>,

    /// Free-text description for human or model consumption
    pub semantic_signature: String,
}

impl Object {
    /// Create an object without attributes or semantic signature
    pub fn new(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
            attributes: Vec::new(),
            semantic_signature: String::new(),
        }
    }

    /// Placeholder for an endpoint that has not been declared yet
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self::new(name, UNKNOWN_DOMAIN)
    }

    /// Replace the attribute list
    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the semantic signature
    pub fn with_semantic(mut self, semantic: impl Into<String>) -> Self {
        self.semantic_signature = semantic.into();
        self
    }

    /// Same entity under a different name, keeping domain and attributes
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// `true` for endpoints registered implicitly by a morphism declaration
    pub fn is_placeholder(&self) -> bool {
        self.domain == UNKNOWN_DOMAIN
    }

    /// Key used for identity comparisons
    pub fn key(&self) -> (&str, &str) {
        (&self.name, &self.domain)
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Object {}

impl Hash for Object {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.domain.hash(state);
    }
}

impl PartialOrd for Object {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Object {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.domain)
    }
}
