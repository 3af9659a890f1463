// Copyright 2025 Cowboy AI, LLC.

//! Error types for ontology parsing and category operations

use thiserror::Error;

/// Errors that can occur while building or transforming ontologies
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OntologyError {
    /// The token stream does not match the expected production
    #[error("Syntax error at {line}:{column}: expected {expected}, found {found}")]
    Syntax {
        /// Description of the expected token
        expected: String,
        /// The token actually present
        found: String,
        /// Line of the offending token
        line: usize,
        /// Column of the offending token
        column: usize,
    },

    /// A `type:` value outside the morphism type enumeration
    #[error("Unknown morphism type '{name}' at {line}:{column}")]
    UnknownMorphismType {
        /// The unrecognized type name
        name: String,
        /// Line of the type token
        line: usize,
        /// Column of the type token
        column: usize,
    },

    /// A `WITH <level>` value outside the validation level enumeration
    #[error("Unknown validation level '{name}' at {line}:{column}")]
    UnknownValidationLevel {
        /// The unrecognized level name
        name: String,
        /// Line of the level token
        line: usize,
        /// Column of the level token
        column: usize,
    },

    /// A declaration references something that does not exist (strict mode only)
    #[error("Unresolved reference: {0}")]
    UnresolvedReference(String),

    /// Invalid operation
    #[error("Invalid operation: {reason}")]
    InvalidOperation {
        /// Reason why the operation is invalid
        reason: String,
    },

    /// Failure reading a source document or configuration file
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for ontology operations
pub type OntologyResult<T> = Result<T, OntologyError>;

impl From<serde_json::Error> for OntologyError {
    fn from(err: serde_json::Error) -> Self {
        OntologyError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for OntologyError {
    fn from(err: std::io::Error) -> Self {
        OntologyError::Io(err.to_string())
    }
}

impl OntologyError {
    /// Check if this is a grammar-level failure
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            OntologyError::Syntax { .. }
                | OntologyError::UnknownMorphismType { .. }
                | OntologyError::UnknownValidationLevel { .. }
        )
    }

    /// Check if this is an unresolved cross-reference
    pub fn is_reference_error(&self) -> bool {
        matches!(self, OntologyError::UnresolvedReference(_))
    }

    /// Source position (line, column) carried by grammar errors
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            OntologyError::Syntax { line, column, .. }
            | OntologyError::UnknownMorphismType { line, column, .. }
            | OntologyError::UnknownValidationLevel { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }
}
