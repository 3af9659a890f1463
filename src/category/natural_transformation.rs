// Copyright 2025 Cowboy AI, LLC.

//! Natural transformations between functors
//!
//! A natural transformation aligns two functors that share a source category.
//! Each component assigns a morphism of the target category to an object of the
//! source category, optionally with a confidence score.

use std::sync::Arc;

use indexmap::IndexMap;

use super::functor::{ConsistencyReport, Functor};
use crate::errors::{OntologyError, OntologyResult};

/// A map between two functors with a common source category
#[derive(Debug, Clone)]
pub struct NaturalTransformation {
    /// Name of the transformation
    pub name: String,

    source_functor: Arc<Functor>,
    target_functor: Arc<Functor>,

    /// Object name to component morphism name in the target category
    pub components: IndexMap<String, String>,

    /// Confidence per component, in `[0.0, 1.0]`
    pub confidence_scores: IndexMap<String, f64>,
}

impl NaturalTransformation {
    /// Create a transformation between two functors
    ///
    /// Fails when the functors do not share a source category.
    pub fn new(
        name: impl Into<String>,
        source_functor: Arc<Functor>,
        target_functor: Arc<Functor>,
    ) -> OntologyResult<Self> {
        let name = name.into();
        let left = &source_functor.source_category().name;
        let right = &target_functor.source_category().name;
        if left != right {
            return Err(OntologyError::InvalidOperation {
                reason: format!(
                    "natural transformation '{name}' needs functors with a common source, got '{left}' and '{right}'"
                ),
            });
        }
        Ok(Self {
            name,
            source_functor,
            target_functor,
            components: IndexMap::new(),
            confidence_scores: IndexMap::new(),
        })
    }

    /// Add a component, optionally scored
    pub fn with_component(
        mut self,
        object: impl Into<String>,
        morphism: impl Into<String>,
        confidence: Option<f64>,
    ) -> Self {
        let object = object.into();
        if let Some(score) = confidence {
            self.confidence_scores.insert(object.clone(), score.clamp(0.0, 1.0));
        }
        self.components.insert(object, morphism.into());
        self
    }

    /// Source functor
    pub fn source_functor(&self) -> &Arc<Functor> {
        &self.source_functor
    }

    /// Target functor
    pub fn target_functor(&self) -> &Arc<Functor> {
        &self.target_functor
    }

    /// Confidence recorded for a component
    pub fn confidence(&self, object: &str) -> Option<f64> {
        self.confidence_scores.get(object).copied()
    }

    /// Naturality condition `η_B ∘ F(f) = G(f) ∘ η_A`
    ///
    /// Commuting squares are judged by the semantic validator, not here; this
    /// always reports valid.
    pub fn is_natural(&self) -> ConsistencyReport {
        ConsistencyReport::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{Category, Object};

    fn category(name: &str, objects: &[&str]) -> Arc<Category> {
        let mut category = Category::new(name, "");
        for object in objects {
            category.add_object(Object::new(*object, "d"));
        }
        Arc::new(category)
    }

    #[test]
    fn test_common_source_required() {
        let a = category("A", &["a"]);
        let b = category("B", &["b"]);
        let c = category("C", &["c"]);

        let f = Arc::new(Functor::new("F", Arc::clone(&a), Arc::clone(&b)).map_object("a", "b"));
        let g = Arc::new(Functor::new("G", Arc::clone(&a), Arc::clone(&b)).map_object("a", "b"));
        let h = Arc::new(Functor::new("H", Arc::clone(&c), Arc::clone(&b)));

        assert!(NaturalTransformation::new("eta", Arc::clone(&f), g).is_ok());

        let err = NaturalTransformation::new("bad", f, h).unwrap_err();
        assert!(matches!(err, OntologyError::InvalidOperation { .. }));
    }

    #[test]
    fn test_components_and_confidence() {
        let a = category("A", &["a1", "a2"]);
        let b = category("B", &["b"]);
        let f = Arc::new(Functor::new("F", Arc::clone(&a), Arc::clone(&b)));
        let g = Arc::new(Functor::new("G", a, b));

        let eta = NaturalTransformation::new("eta", f, g)
            .unwrap()
            .with_component("a1", "id_b", Some(0.9))
            .with_component("a2", "id_b", None)
            .with_component("a3", "id_b", Some(4.0));

        assert_eq!(eta.components.len(), 3);
        assert_eq!(eta.confidence("a1"), Some(0.9));
        assert_eq!(eta.confidence("a2"), None);
        assert_eq!(eta.confidence("a3"), Some(1.0));

        let (valid, issues) = eta.is_natural().into_parts();
        assert!(valid);
        assert!(issues.is_empty());
    }
}
