// Copyright 2025 Cowboy AI, LLC.

//! Ontology categories
//!
//! Each ontology is modeled as a category where:
//! - Objects are ontology entities
//! - Morphisms are typed relationships between entities
//! - Every object carries an automatically maintained identity morphism
//!
//! A category is mutated only while it is being built (by the parser or by a
//! category operation). Once published it is shared read-only behind an `Arc`.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::morphism::{Morphism, MorphismType};
use super::object::Object;

/// An ontology as a category
#[derive(Debug, Clone, Default)]
pub struct Category {
    /// Name of the ontology
    pub name: String,

    /// Human-readable description
    pub description: String,

    objects: IndexMap<String, Object>,
    morphisms: IndexMap<String, Morphism>,
    identities: IndexMap<String, Morphism>,
}

impl Category {
    /// Create an empty category
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Register an object and its identity morphism
    ///
    /// An object with the same name replaces the previous one.
    pub fn add_object(&mut self, object: Object) -> &mut Self {
        let identity = Morphism::identity(&object);
        self.identities.insert(object.name.clone(), identity);
        self.objects.insert(object.name.clone(), object);
        self
    }

    /// Register a morphism, registering its endpoints first when absent
    pub fn add_morphism(&mut self, morphism: Morphism) -> &mut Self {
        if !self.objects.contains_key(&morphism.source.name) {
            self.add_object(morphism.source.clone());
        }
        if !self.objects.contains_key(&morphism.target.name) {
            self.add_object(morphism.target.clone());
        }
        self.morphisms.insert(morphism.name.clone(), morphism);
        self
    }

    /// Objects in insertion order
    pub fn objects(&self) -> &IndexMap<String, Object> {
        &self.objects
    }

    /// Declared morphisms in insertion order (identities excluded)
    pub fn morphisms(&self) -> &IndexMap<String, Morphism> {
        &self.morphisms
    }

    /// Identity morphisms keyed by object name
    pub fn identities(&self) -> &IndexMap<String, Morphism> {
        &self.identities
    }

    /// Look up an object by name
    pub fn object(&self, name: &str) -> Option<&Object> {
        self.objects.get(name)
    }

    /// Look up a declared morphism by name
    pub fn morphism(&self, name: &str) -> Option<&Morphism> {
        self.morphisms.get(name)
    }

    /// Identity morphism of the named object
    pub fn identity(&self, object_name: &str) -> Option<&Morphism> {
        self.identities.get(object_name)
    }

    /// Look up a morphism by name among declared morphisms, then identities
    pub fn find_morphism(&self, name: &str) -> Option<&Morphism> {
        self.morphisms.get(name).or_else(|| {
            self.identities.values().find(|identity| identity.name == name)
        })
    }

    /// `true` when an object with this name is registered
    pub fn contains_object(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    /// Number of objects
    pub fn len_objects(&self) -> usize {
        self.objects.len()
    }

    /// Number of declared morphisms (identities excluded)
    pub fn len_morphisms(&self) -> usize {
        self.morphisms.len()
    }

    /// `true` when the category has no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Morphisms leaving an object
    pub fn morphisms_from(&self, object: &Object) -> Vec<&Morphism> {
        self.morphisms
            .values()
            .filter(|morphism| &morphism.source == object)
            .collect()
    }

    /// Morphisms entering an object
    pub fn morphisms_to(&self, object: &Object) -> Vec<&Morphism> {
        self.morphisms
            .values()
            .filter(|morphism| &morphism.target == object)
            .collect()
    }

    /// Deterministic content hash of the category structure
    ///
    /// Covers `name:domain` of every object and `source->target:type` of every
    /// declared morphism, each list sorted. Names of the category and of its
    /// morphisms do not contribute.
    pub fn signature(&self) -> String {
        let mut objects: Vec<String> = self
            .objects
            .values()
            .map(|o| format!("{}:{}", o.name, o.domain))
            .collect();
        objects.sort();

        let mut morphisms: Vec<String> = self
            .morphisms
            .values()
            .map(|m| format!("{}->{}:{}", m.source.name, m.target.name, m.morphism_type))
            .collect();
        morphisms.sort();

        let payload = serde_json::json!({ "objects": objects, "morphisms": morphisms });
        blake3::hash(payload.to_string().as_bytes()).to_hex().to_string()
    }

    /// JSON-compatible projection of the category
    pub fn to_record(&self) -> CategoryRecord {
        CategoryRecord {
            name: self.name.clone(),
            description: self.description.clone(),
            objects: self.objects.values().map(ObjectRecord::from).collect(),
            morphisms: self.morphisms.values().map(MorphismRecord::from).collect(),
        }
    }
}

/// Serialized form of a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryRecord {
    /// Name of the category
    pub name: String,
    /// Description of the category
    pub description: String,
    /// Objects in insertion order
    pub objects: Vec<ObjectRecord>,
    /// Declared morphisms in insertion order
    pub morphisms: Vec<MorphismRecord>,
}

/// Serialized form of an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ObjectRecord {
    /// Object name
    pub name: String,
    /// Object domain
    pub domain: String,
    /// Attribute tokens
    pub attributes: Vec<String>,
    /// Semantic signature
    pub semantic_signature: String,
}

impl From<&Object> for ObjectRecord {
    fn from(object: &Object) -> Self {
        Self {
            name: object.name.clone(),
            domain: object.domain.clone(),
            attributes: object.attributes.clone(),
            semantic_signature: object.semantic_signature.clone(),
        }
    }
}

/// Serialized form of a morphism; endpoints are referenced by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MorphismRecord {
    /// Morphism name
    pub name: String,
    /// Source object name
    pub source: String,
    /// Target object name
    pub target: String,
    /// Morphism type
    #[serde(rename = "type")]
    pub morphism_type: MorphismType,
    /// Property tokens
    pub properties: Vec<String>,
    /// Semantic description
    pub semantic_description: String,
}

impl From<&Morphism> for MorphismRecord {
    fn from(morphism: &Morphism) -> Self {
        Self {
            name: morphism.name.clone(),
            source: morphism.source.name.clone(),
            target: morphism.target.name.clone(),
            morphism_type: morphism.morphism_type,
            properties: morphism.properties.clone(),
            semantic_description: morphism.semantic_description.clone(),
        }
    }
}

/// JSON schema of [`CategoryRecord`]
pub fn category_record_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(CategoryRecord)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Category {
        let mut category = Category::new("TestCat", "Test Category");
        let a = Object::new("A", "domain1").with_attributes(["attr1"]);
        let b = Object::new("B", "domain1").with_attributes(["attr2"]);
        let c = Object::new("C", "domain2").with_attributes(["attr3"]);
        category.add_object(a.clone()).add_object(b.clone()).add_object(c.clone());
        category
            .add_morphism(Morphism::new("f", a, b.clone(), MorphismType::Structural))
            .add_morphism(Morphism::new("g", b, c, MorphismType::Structural));
        category
    }

    #[test]
    fn test_object_and_morphism_addition() {
        let category = sample();
        assert_eq!(category.len_objects(), 3);
        assert_eq!(category.len_morphisms(), 2);
        assert!(category.contains_object("A"));
        assert!(category.morphism("f").is_some());
    }

    #[test]
    fn test_identity_generated_per_object() {
        let category = sample();
        assert_eq!(category.identities().len(), 3);
        let id_a = category.identity("A").unwrap();
        assert_eq!(id_a.name, "id_A");
        assert_eq!(id_a.source, Object::new("A", "domain1"));
        assert_eq!(id_a.target, Object::new("A", "domain1"));
        assert_eq!(id_a.morphism_type, MorphismType::Identity);
    }

    #[test]
    fn test_morphism_registers_missing_endpoints() {
        let mut category = Category::new("T", "");
        category.add_morphism(Morphism::new(
            "f",
            Object::new("X", "d"),
            Object::new("Y", "d"),
            MorphismType::Causal,
        ));
        assert_eq!(category.len_objects(), 2);
        assert!(category.identity("X").is_some());
        assert!(category.identity("Y").is_some());
    }

    #[test]
    fn test_find_morphism_falls_back_to_identities() {
        let category = sample();
        assert_eq!(category.find_morphism("f").map(|m| m.name.as_str()), Some("f"));
        assert_eq!(category.find_morphism("id_B").map(|m| m.name.as_str()), Some("id_B"));
        assert!(category.find_morphism("missing").is_none());
    }

    #[test]
    fn test_morphisms_from_and_to() {
        let category = sample();
        let b = category.object("B").unwrap().clone();
        let from_a = category.morphisms_from(category.object("A").unwrap());
        assert_eq!(from_a.len(), 1);
        assert_eq!(from_a[0].name, "f");
        assert_eq!(category.morphisms_to(&b)[0].name, "f");
        assert_eq!(category.morphisms_from(&b)[0].name, "g");
    }

    #[test]
    fn test_signature_is_deterministic_and_content_based() {
        let category = sample();
        assert_eq!(category.signature(), category.signature());

        let mut renamed = sample();
        renamed.name = "Other".to_string();
        assert_eq!(category.signature(), renamed.signature());

        let mut extended = sample();
        extended.add_object(Object::new("D", "domain2"));
        assert_ne!(category.signature(), extended.signature());
    }

    #[test]
    fn test_signature_ignores_insertion_order() {
        let mut first = Category::new("X", "");
        first.add_object(Object::new("A", "d")).add_object(Object::new("B", "d"));
        let mut second = Category::new("X", "");
        second.add_object(Object::new("B", "d")).add_object(Object::new("A", "d"));
        assert_eq!(first.signature(), second.signature());
    }

    #[test]
    fn test_record_projection_is_ordered() {
        let record = sample().to_record();
        let names: Vec<&str> = record.objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(record.morphisms[0].source, "A");
        assert_eq!(record.morphisms[0].target, "B");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["morphisms"][0]["type"], "structural");
        assert_eq!(json["objects"][0]["attributes"][0], "attr1");
    }

    #[test]
    fn test_record_schema_names_fields() {
        let schema = serde_json::to_value(category_record_schema()).unwrap();
        let properties = &schema["properties"];
        assert!(properties.get("objects").is_some());
        assert!(properties.get("morphisms").is_some());
    }
}
