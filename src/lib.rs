// Copyright 2025 Cowboy AI, LLC.

//! # CIM Ontology
//!
//! Ontologies as categories, with a small DSL to declare them and an algebra to
//! combine them.
//!
//! This crate provides:
//! - **Data model**: [`Object`], [`Morphism`], [`Category`], [`Functor`] and
//!   [`NaturalTransformation`]
//! - **Category operations**: coproduct, product, pullback, pushout and
//!   difference
//! - **Functor operations**: composition and validity checks
//! - **DSL**: tokenizer and single-pass parser/evaluator
//! - **Engine**: [`Interpreter`] returning an [`Environment`] of named results
//!
//! ## Example
//!
//! ```
//! use cim_ontology::execute;
//!
//! let env = execute(
//!     "ONTOLOGY A { OBJECT X : d }
//!      ONTOLOGY B { OBJECT Y : d }
//!      OPERATION { C = COPRODUCT(A, B) }",
//! )
//! .unwrap();
//!
//! let c = &env.results["C"];
//! assert!(c.contains_object("A.X"));
//! assert!(c.contains_object("B.Y"));
//! ```

#![warn(missing_docs)]

pub mod category;
pub mod config;
pub mod dsl;
pub mod engine;
pub mod environment;
pub mod errors;

pub use category::{
    coproduct, difference, product, pullback, pushout, Category, CategoryRecord,
    ConsistencyReport, Functor, FunctorRecord, Morphism, MorphismType, NaturalTransformation,
    Object,
};
pub use config::EngineConfig;
pub use dsl::{tokenize, Token, TokenKind};
pub use engine::{execute, Interpreter};
pub use environment::{
    Environment, EnvironmentRecord, ParseValidationLevelError, ValidationLevel, ValidationRequest,
    Warning,
};
pub use errors::{OntologyError, OntologyResult};
