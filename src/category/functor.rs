// Copyright 2025 Cowboy AI, LLC.

//! Functors for mapping between ontology categories
//!
//! A functor maps object names and morphism names of a source category to names
//! in a target category. Both maps may be partial. The functor references its
//! categories through `Arc` and never copies them.

use std::sync::Arc;

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::morphism::Morphism;
use super::object::Object;
use super::ontology_category::Category;

/// Outcome of a shallow structural check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsistencyReport {
    /// Human-readable findings, in the order they were detected
    pub issues: Vec<String>,
}

impl ConsistencyReport {
    /// `true` when no issue was found
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Record a finding
    pub fn push(&mut self, issue: impl Into<String>) {
        self.issues.push(issue.into());
    }

    /// Split into `(is_valid, issues)`
    pub fn into_parts(self) -> (bool, Vec<String>) {
        (self.issues.is_empty(), self.issues)
    }
}

/// A structure-preserving map between two ontology categories
#[derive(Debug, Clone)]
pub struct Functor {
    /// Name of the functor
    pub name: String,

    source_category: Arc<Category>,
    target_category: Arc<Category>,

    /// Source object name to target object name
    pub object_map: IndexMap<String, String>,

    /// Source morphism name to target morphism name
    pub morphism_map: IndexMap<String, String>,

    /// Free-text semantic mapping rules
    pub mapping_rules: Vec<String>,
}

impl Functor {
    /// Create a functor with empty maps
    pub fn new(
        name: impl Into<String>,
        source_category: Arc<Category>,
        target_category: Arc<Category>,
    ) -> Self {
        Self {
            name: name.into(),
            source_category,
            target_category,
            object_map: IndexMap::new(),
            morphism_map: IndexMap::new(),
            mapping_rules: Vec::new(),
        }
    }

    /// Add an object mapping
    pub fn map_object(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.object_map.insert(source.into(), target.into());
        self
    }

    /// Add a morphism mapping
    pub fn map_morphism(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.morphism_map.insert(source.into(), target.into());
        self
    }

    /// Add a semantic mapping rule
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.mapping_rules.push(rule.into());
        self
    }

    /// Source category
    pub fn source_category(&self) -> &Arc<Category> {
        &self.source_category
    }

    /// Target category
    pub fn target_category(&self) -> &Arc<Category> {
        &self.target_category
    }

    /// Image of an object, if mapped and present in the target category
    pub fn apply_to_object(&self, object: &Object) -> Option<&Object> {
        self.object_map
            .get(&object.name)
            .and_then(|target| self.target_category.object(target))
    }

    /// Image of a morphism, if mapped and present in the target category
    pub fn apply_to_morphism(&self, morphism: &Morphism) -> Option<&Morphism> {
        self.morphism_map
            .get(&morphism.name)
            .and_then(|target| self.target_category.find_morphism(target))
    }

    /// Shallow check that the maps reference real objects and preserve endpoints
    ///
    /// The functor laws themselves are not verified.
    pub fn is_valid(&self) -> ConsistencyReport {
        let mut report = ConsistencyReport::default();

        for (source, target) in &self.object_map {
            if !self.source_category.contains_object(source) {
                report.push(format!("Source object '{source}' not found"));
            }
            if !self.target_category.contains_object(target) {
                report.push(format!("Target object '{target}' not found"));
            }
        }

        for (source_name, target_name) in &self.morphism_map {
            let source = self.source_category.find_morphism(source_name);
            let target = self.target_category.find_morphism(target_name);
            let (source, target) = match (source, target) {
                (Some(source), Some(target)) => (source, target),
                (source, target) => {
                    if source.is_none() {
                        report.push(format!("Source morphism '{source_name}' not found"));
                    }
                    if target.is_none() {
                        report.push(format!("Target morphism '{target_name}' not found"));
                    }
                    continue;
                }
            };

            // F(f: A -> B) must be F(A) -> F(B)
            let expected_source = self.object_map.get(&source.source.name);
            let expected_target = self.object_map.get(&source.target.name);
            if expected_source != Some(&target.source.name) {
                report.push(format!(
                    "Functor does not preserve source of '{source_name}'"
                ));
            }
            if expected_target != Some(&target.target.name) {
                report.push(format!(
                    "Functor does not preserve target of '{source_name}'"
                ));
            }
        }

        report
    }

    /// Image category of `category` under this functor
    ///
    /// Contains the resolved image of every object (first occurrence per
    /// name) and of every mapped morphism.
    pub fn image_of(&self, category: &Category, name: impl Into<String>) -> Category {
        let mut image = Category::new(
            name,
            format!("Image of {} under {}", category.name, self.name),
        );
        for object in category.objects().values() {
            if let Some(target) = self.apply_to_object(object) {
                if !image.contains_object(&target.name) {
                    image.add_object(target.clone());
                }
            }
        }
        for morphism in category.morphisms().values() {
            if let Some(target) = self.apply_to_morphism(morphism) {
                if !target.is_identity() {
                    image.add_morphism(target.clone());
                }
            }
        }
        image
    }

    /// JSON-compatible projection of the functor
    pub fn to_record(&self) -> FunctorRecord {
        FunctorRecord {
            name: self.name.clone(),
            source: self.source_category.name.clone(),
            target: self.target_category.name.clone(),
            object_map: self.object_map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            morphism_map: self
                .morphism_map
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            mapping_rules: self.mapping_rules.clone(),
        }
    }
}

/// Serialized form of a functor; categories are referenced by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FunctorRecord {
    /// Functor name
    pub name: String,
    /// Source category name
    pub source: String,
    /// Target category name
    pub target: String,
    /// Object mapping pairs in insertion order
    pub object_map: Vec<(String, String)>,
    /// Morphism mapping pairs in insertion order
    pub morphism_map: Vec<(String, String)>,
    /// Semantic mapping rules
    pub mapping_rules: Vec<String>,
}

/// Compose `f ∘ g`, applying `g` first
///
/// Requires `g`'s target category to be `f`'s source category (by name).
/// Keys whose intermediate lookup fails are left out of the composite maps.
pub fn compose(f: &Functor, g: &Functor) -> Option<Functor> {
    if g.target_category.name != f.source_category.name {
        return None;
    }

    let object_map = g
        .object_map
        .iter()
        .filter_map(|(a, b)| f.object_map.get(b).map(|c| (a.clone(), c.clone())))
        .collect();
    let morphism_map = g
        .morphism_map
        .iter()
        .filter_map(|(a, b)| f.morphism_map.get(b).map(|c| (a.clone(), c.clone())))
        .collect();

    Some(Functor {
        name: format!("({} ∘ {})", f.name, g.name),
        source_category: Arc::clone(&g.source_category),
        target_category: Arc::clone(&f.target_category),
        object_map,
        morphism_map,
        mapping_rules: g
            .mapping_rules
            .iter()
            .chain(f.mapping_rules.iter())
            .cloned()
            .collect(),
    })
}
