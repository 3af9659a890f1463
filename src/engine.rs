// Copyright 2025 Cowboy AI, LLC.

//! Entry points that run a whole document

use std::path::Path;

use tracing::info;

use crate::config::EngineConfig;
use crate::dsl::{Lexer, Parser};
use crate::environment::Environment;
use crate::errors::OntologyResult;

/// Tokenizes, parses and evaluates DSL documents
#[derive(Debug, Clone, Copy, Default)]
pub struct Interpreter {
    config: EngineConfig,
}

impl Interpreter {
    /// Create an interpreter with the given configuration
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run a document held in memory
    pub fn execute(&self, source: &str) -> OntologyResult<Environment> {
        let tokens = Lexer::new(source).tokenize();
        let env = Parser::new(tokens, self.config).parse()?;

        info!(
            ontologies = env.ontologies.len(),
            functors = env.functors.len(),
            results = env.results.len(),
            warnings = env.warnings.len(),
            "Executed ontology document"
        );
        Ok(env)
    }

    /// Run a document read from `path`
    pub fn execute_file(&self, path: impl AsRef<Path>) -> OntologyResult<Environment> {
        let source = std::fs::read_to_string(path)?;
        self.execute(&source)
    }
}

/// Run a document with the default configuration
pub fn execute(source: &str) -> OntologyResult<Environment> {
    Interpreter::default().execute(source)
}
