// Copyright 2025 Cowboy AI, LLC.

//! Category theory model of ontologies
//!
//! An ontology is a category: entities are objects, typed relationships are
//! morphisms, and every object carries an identity. Functors map one ontology
//! onto another, natural transformations align functors, and the operations in
//! [`limits`] combine whole ontologies.

pub mod functor;
pub mod limits;
pub mod morphism;
pub mod natural_transformation;
pub mod object;
pub mod ontology_category;

pub use functor::{ConsistencyReport, Functor, FunctorRecord};
pub use limits::{coproduct, difference, product, pullback, pushout, pushout_equivalences};
pub use morphism::{Morphism, MorphismType, ParseMorphismTypeError};
pub use natural_transformation::NaturalTransformation;
pub use object::{Object, UNKNOWN_DOMAIN};
pub use ontology_category::{
    category_record_schema, Category, CategoryRecord, MorphismRecord, ObjectRecord,
};
