// Copyright 2025 Cowboy AI, LLC.

//! Recursive-descent parser and evaluator for the ontology DSL
//!
//! The parser works in a single pass and builds categories and functors
//! directly, with no syntax tree in between. Operation statements are
//! evaluated as soon as they are read, so later statements can use earlier
//! results.
//!
//! Two kinds of failure are kept apart:
//! - a token out of place aborts the parse with [`OntologyError::Syntax`]
//! - a missing referent drops the declaration and records a [`Warning`], or
//!   fails with [`OntologyError::UnresolvedReference`] under
//!   [`EngineConfig::strict_references`]
//!
//! Functors that exist but do not compose are skipped the same way. Under
//! strict references they fail with [`OntologyError::InvalidOperation`].

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::token::{Token, TokenKind};
use crate::category::{self, functor, Category, Functor, Morphism, MorphismType, Object};
use crate::config::EngineConfig;
use crate::environment::{
    Environment, ParseValidationLevelError, ValidationLevel, ValidationRequest, Warning,
};
use crate::errors::{OntologyError, OntologyResult};

/// Top-level productions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration {
    /// `ONTOLOGY <name> { ... }`
    Ontology,
    /// `FUNCTOR <name> : <source> -> <target> { ... }`
    Functor,
    /// `OPERATION { ... }`
    Operation,
    /// `VALIDATE <target> WITH <level>`
    Validate,
}

impl Declaration {
    /// Production introduced by `keyword`
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "ONTOLOGY" => Some(Declaration::Ontology),
            "FUNCTOR" => Some(Declaration::Functor),
            "OPERATION" => Some(Declaration::Operation),
            "VALIDATE" => Some(Declaration::Validate),
            _ => None,
        }
    }
}

/// Operators allowed on the right-hand side of an operation statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// `COPRODUCT(A, B)`
    Coproduct,
    /// `PRODUCT(A, B)`
    Product,
    /// `DIFFERENCE(A, B)`
    Difference,
    /// `PULLBACK(A, B, C, F, G)` with `F: A -> C`, `G: B -> C`
    Pullback,
    /// `PUSHOUT(A, B, C, F, G)` with `F: C -> A`, `G: C -> B`
    Pushout,
    /// `COMPOSE(F, G)`, the functor `F ∘ G`
    Compose,
    /// `APPLY(F, O)`, the image of `O` under `F`
    Apply,
}

impl OperationKind {
    /// Operator named by `keyword`
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "COPRODUCT" => Some(OperationKind::Coproduct),
            "PRODUCT" => Some(OperationKind::Product),
            "DIFFERENCE" => Some(OperationKind::Difference),
            "PULLBACK" => Some(OperationKind::Pullback),
            "PUSHOUT" => Some(OperationKind::Pushout),
            "COMPOSE" => Some(OperationKind::Compose),
            "APPLY" => Some(OperationKind::Apply),
            _ => None,
        }
    }

    /// Keyword spelling
    pub fn keyword(self) -> &'static str {
        match self {
            OperationKind::Coproduct => "COPRODUCT",
            OperationKind::Product => "PRODUCT",
            OperationKind::Difference => "DIFFERENCE",
            OperationKind::Pullback => "PULLBACK",
            OperationKind::Pushout => "PUSHOUT",
            OperationKind::Compose => "COMPOSE",
            OperationKind::Apply => "APPLY",
        }
    }

    /// Number of operands
    pub fn arity(self) -> usize {
        match self {
            OperationKind::Pullback | OperationKind::Pushout => 5,
            _ => 2,
        }
    }
}

enum Evaluated {
    Category(Category),
    Functor(Functor),
}

/// Why an operation statement produced nothing
enum Rejection {
    /// An operand name resolves to nothing
    Missing(String),
    /// The operands exist but do not fit together
    Incompatible(String),
}

/// Parser over a token sequence
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    config: EngineConfig,
    env: Environment,
}

impl Parser {
    /// Create a parser; an end-of-input token is appended when missing
    pub fn new(mut tokens: Vec<Token>, config: EngineConfig) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let (line, column) = tokens.last().map_or((1, 1), |t| (t.line, t.column));
            tokens.push(Token::new(TokenKind::Eof, "", line, column));
        }
        Self {
            tokens,
            pos: 0,
            config,
            env: Environment::new(),
        }
    }

    /// Parse every declaration and return the resulting environment
    pub fn parse(mut self) -> OntologyResult<Environment> {
        while !self.is_at_end() {
            self.parse_declaration()?;
        }
        Ok(self.env)
    }

    fn parse_declaration(&mut self) -> OntologyResult<()> {
        let current = self.current();
        let declaration = match current.kind {
            TokenKind::Keyword => Declaration::from_keyword(&current.text),
            _ => None,
        };

        match declaration {
            Some(Declaration::Ontology) => self.parse_ontology(),
            Some(Declaration::Functor) => self.parse_functor(),
            Some(Declaration::Operation) => self.parse_operation(),
            Some(Declaration::Validate) => self.parse_validation(),
            None => {
                self.advance();
                Ok(())
            }
        }
    }

    fn parse_ontology(&mut self) -> OntologyResult<()> {
        self.expect_keyword("ONTOLOGY")?;
        let name = self.expect_identifier("ontology name")?;
        self.expect_symbol("{")?;

        let mut category = Category::new(name.clone(), format!("Ontology: {name}"));
        loop {
            if self.check_keyword("OBJECT") {
                let object = self.parse_object()?;
                category.add_object(object);
            } else if self.check_keyword("MORPHISM") {
                let morphism = self.parse_morphism(&category)?;
                category.add_morphism(morphism);
            } else {
                break;
            }
        }
        self.consume(TokenKind::Symbol, Some("}"), "OBJECT, MORPHISM or '}'")?;

        debug!(
            name = %name,
            objects = category.len_objects(),
            morphisms = category.len_morphisms(),
            "Parsed ontology"
        );
        self.env.ontologies.insert(name, Arc::new(category));
        Ok(())
    }

    fn parse_object(&mut self) -> OntologyResult<Object> {
        self.expect_keyword("OBJECT")?;
        let name = self.expect_identifier("object name")?;
        self.expect_symbol(":")?;
        let domain = self.expect_identifier("object domain")?;
        let mut object = Object::new(name, domain);

        if self.check_symbol("{") {
            self.advance();
            loop {
                if self.check_keyword("attributes") {
                    self.advance();
                    self.expect_symbol(":")?;
                    let attributes = self.parse_attribute_list()?;
                    object.attributes.extend(attributes);
                } else if self.check_keyword("semantic") {
                    self.advance();
                    self.expect_symbol(":")?;
                    object.semantic_signature = self.expect_string("semantic text")?;
                } else {
                    break;
                }
            }
            self.consume(TokenKind::Symbol, Some("}"), "attributes, semantic or '}'")?;
        }

        Ok(object)
    }

    fn parse_attribute_list(&mut self) -> OntologyResult<Vec<String>> {
        self.expect_symbol("[")?;
        let mut attributes = Vec::new();

        while !self.check_symbol("]") {
            let token = self.current().clone();
            match token.kind {
                TokenKind::Identifier | TokenKind::String => {
                    self.advance();
                    attributes.push(token.text);
                }
                TokenKind::Number => {
                    self.advance();
                    let mut text = token.text.clone();
                    if self.config.join_unit_suffixes && self.is_unit_suffix_of(&token) {
                        text.push_str(&self.advance().text);
                    }
                    attributes.push(text);
                }
                _ => return Err(self.error("attribute")),
            }
            if self.check_symbol(",") {
                self.advance();
            }
        }

        self.expect_symbol("]")?;
        Ok(attributes)
    }

    /// `true` when the current token is an identifier written directly after `number`
    fn is_unit_suffix_of(&self, number: &Token) -> bool {
        let current = self.current();
        current.kind == TokenKind::Identifier
            && current.line == number.line
            && current.column == number.column + number.text.chars().count()
    }

    fn parse_morphism(&mut self, category: &Category) -> OntologyResult<Morphism> {
        let keyword = self.expect_keyword("MORPHISM")?;
        let name = self.expect_identifier("morphism name")?;
        self.expect_symbol(":")?;
        let source_name = self.expect_identifier("source object")?;
        self.expect_symbol("->")?;
        let target_name = self.expect_identifier("target object")?;

        let mut morphism_type = MorphismType::default();
        let mut semantic = String::new();

        if self.check_symbol("{") {
            self.advance();
            loop {
                if self.check_keyword("type") {
                    self.advance();
                    self.expect_symbol(":")?;
                    let token = self.consume(TokenKind::Identifier, None, "morphism type")?;
                    morphism_type = token.text.parse().map_err(|_| {
                        OntologyError::UnknownMorphismType {
                            name: token.text.clone(),
                            line: token.line,
                            column: token.column,
                        }
                    })?;
                } else if self.check_keyword("semantic") {
                    self.advance();
                    self.expect_symbol(":")?;
                    semantic = self.expect_string("semantic text")?;
                } else {
                    break;
                }
            }
            self.consume(TokenKind::Symbol, Some("}"), "type, semantic or '}'")?;
        }

        let source = self.resolve_endpoint(category, &name, &source_name, &keyword)?;
        let target = self.resolve_endpoint(category, &name, &target_name, &keyword)?;

        Ok(Morphism::new(name, source, target, morphism_type).with_semantic(semantic))
    }

    fn resolve_endpoint(
        &mut self,
        category: &Category,
        morphism: &str,
        object: &str,
        at: &Token,
    ) -> OntologyResult<Object> {
        if let Some(found) = category.object(object) {
            return Ok(found.clone());
        }
        self.skip(
            at,
            format!("morphism '{morphism}' references undeclared object '{object}', using a placeholder"),
        )?;
        Ok(Object::placeholder(object))
    }

    fn parse_functor(&mut self) -> OntologyResult<()> {
        let keyword = self.expect_keyword("FUNCTOR")?;
        let name = self.expect_identifier("functor name")?;
        self.expect_symbol(":")?;
        let source_name = self.expect_identifier("source ontology")?;
        self.expect_symbol("->")?;
        let target_name = self.expect_identifier("target ontology")?;
        self.expect_symbol("{")?;

        let mut object_map = IndexMap::new();
        let mut morphism_map = IndexMap::new();
        let mut rules = Vec::new();

        loop {
            if self.check_keyword("MAP") {
                self.advance();
                if self.check_keyword("OBJECT") {
                    self.advance();
                    let (from, to) = self.parse_mapping()?;
                    object_map.insert(from, to);
                } else if self.check_keyword("MORPHISM") {
                    self.advance();
                    let (from, to) = self.parse_mapping()?;
                    morphism_map.insert(from, to);
                } else {
                    return Err(self.error("OBJECT or MORPHISM"));
                }
            } else if self.check_keyword("RULE") {
                self.advance();
                rules.push(self.expect_string("rule text")?);
            } else {
                break;
            }
        }
        self.consume(TokenKind::Symbol, Some("}"), "MAP, RULE or '}'")?;

        let source = self.env.ontologies.get(&source_name).cloned();
        let target = self.env.ontologies.get(&target_name).cloned();
        let (Some(source), Some(target)) = (source, target) else {
            let missing = if self.env.ontologies.contains_key(&source_name) {
                target_name
            } else {
                source_name
            };
            return self.skip(
                &keyword,
                format!("functor '{name}' dropped, ontology '{missing}' not found"),
            );
        };

        let mut functor = Functor::new(name.clone(), source, target);
        functor.object_map = object_map;
        functor.morphism_map = morphism_map;
        functor.mapping_rules = rules;

        debug!(
            name = %name,
            objects = functor.object_map.len(),
            morphisms = functor.morphism_map.len(),
            "Parsed functor"
        );
        self.env.functors.insert(name, Arc::new(functor));
        Ok(())
    }

    fn parse_mapping(&mut self) -> OntologyResult<(String, String)> {
        let from = self.expect_identifier("mapping source")?;
        self.expect_symbol("->")?;
        let to = self.expect_identifier("mapping target")?;
        Ok((from, to))
    }

    fn parse_operation(&mut self) -> OntologyResult<()> {
        self.expect_keyword("OPERATION")?;
        self.expect_symbol("{")?;
        while !self.check_symbol("}") {
            self.parse_operation_statement()?;
        }
        self.expect_symbol("}")?;
        Ok(())
    }

    fn parse_operation_statement(&mut self) -> OntologyResult<()> {
        let result = self.expect_identifier("result name or '}'")?;
        self.expect_symbol("=")?;

        let operator = self.current().clone();
        let kind = match operator.kind {
            TokenKind::Keyword => OperationKind::from_keyword(&operator.text),
            _ => None,
        };
        let Some(kind) = kind else {
            return Err(self.error("operation"));
        };
        self.advance();

        self.expect_symbol("(")?;
        let mut operands = vec![self.expect_identifier("operand")?];
        while self.check_symbol(",") {
            self.advance();
            operands.push(self.expect_identifier("operand")?);
        }
        self.expect_symbol(")")?;

        if operands.len() != kind.arity() {
            return Err(OntologyError::Syntax {
                expected: format!("{} operands for {}", kind.arity(), kind.keyword()),
                found: format!("{} operands", operands.len()),
                line: operator.line,
                column: operator.column,
            });
        }

        match self.evaluate(kind, &result, &operands) {
            Ok(Evaluated::Category(category)) => {
                debug!(
                    name = %result,
                    operation = kind.keyword(),
                    objects = category.len_objects(),
                    morphisms = category.len_morphisms(),
                    "Evaluated operation"
                );
                self.env.results.insert(result, Arc::new(category));
                Ok(())
            }
            Ok(Evaluated::Functor(functor)) => {
                debug!(
                    name = %result,
                    operation = kind.keyword(),
                    objects = functor.object_map.len(),
                    morphisms = functor.morphism_map.len(),
                    "Evaluated operation"
                );
                self.env.functors.insert(result, Arc::new(functor));
                Ok(())
            }
            Err(Rejection::Missing(reason)) => {
                self.skip(&operator, format!("operation '{result}' skipped, {reason}"))
            }
            Err(Rejection::Incompatible(reason)) => {
                let message = format!("operation '{result}' skipped, {reason}");
                if self.config.strict_references {
                    return Err(OntologyError::InvalidOperation {
                        reason: format!("{message} (at {}:{})", operator.line, operator.column),
                    });
                }
                self.record_warning(&operator, message);
                Ok(())
            }
        }
    }

    /// Run one operator; `Err` carries the reason the statement is skipped
    fn evaluate(
        &self,
        kind: OperationKind,
        result: &str,
        operands: &[String],
    ) -> Result<Evaluated, Rejection> {
        let name = Some(result);
        let evaluated = match kind {
            OperationKind::Coproduct => {
                let (a, b) = self.category_pair(operands)?;
                Evaluated::Category(category::coproduct(&a, &b, name))
            }
            OperationKind::Product => {
                let (a, b) = self.category_pair(operands)?;
                Evaluated::Category(category::product(&a, &b, name))
            }
            OperationKind::Difference => {
                let (a, b) = self.category_pair(operands)?;
                Evaluated::Category(category::difference(&a, &b, name))
            }
            OperationKind::Pullback => {
                let (a, b, c, f, g) = self.span(operands)?;
                Evaluated::Category(category::pullback(&a, &b, &c, &f, &g, name))
            }
            OperationKind::Pushout => {
                let (a, b, c, f, g) = self.span(operands)?;
                Evaluated::Category(category::pushout(&a, &b, &c, &f, &g, name))
            }
            OperationKind::Compose => {
                let f = self.functor_operand(&operands[0])?;
                let g = self.functor_operand(&operands[1])?;
                let mut composite = functor::compose(&f, &g).ok_or_else(|| {
                    Rejection::Incompatible(format!(
                        "functor '{}' ends in '{}' but '{}' starts in '{}'",
                        g.name,
                        g.target_category().name,
                        f.name,
                        f.source_category().name
                    ))
                })?;
                composite.name = result.to_string();
                Evaluated::Functor(composite)
            }
            OperationKind::Apply => {
                let f = self.functor_operand(&operands[0])?;
                let o = self.category_operand(&operands[1])?;
                Evaluated::Category(f.image_of(&o, result))
            }
        };
        Ok(evaluated)
    }

    fn category_operand(&self, name: &str) -> Result<Arc<Category>, Rejection> {
        self.env
            .category(name)
            .cloned()
            .ok_or_else(|| Rejection::Missing(format!("category '{name}' not found")))
    }

    fn functor_operand(&self, name: &str) -> Result<Arc<Functor>, Rejection> {
        self.env
            .functor(name)
            .cloned()
            .ok_or_else(|| Rejection::Missing(format!("functor '{name}' not found")))
    }

    fn category_pair(&self, operands: &[String]) -> Result<(Arc<Category>, Arc<Category>), Rejection> {
        Ok((
            self.category_operand(&operands[0])?,
            self.category_operand(&operands[1])?,
        ))
    }

    #[allow(clippy::type_complexity)]
    fn span(
        &self,
        operands: &[String],
    ) -> Result<(Arc<Category>, Arc<Category>, Arc<Category>, Arc<Functor>, Arc<Functor>), Rejection> {
        Ok((
            self.category_operand(&operands[0])?,
            self.category_operand(&operands[1])?,
            self.category_operand(&operands[2])?,
            self.functor_operand(&operands[3])?,
            self.functor_operand(&operands[4])?,
        ))
    }

    fn parse_validation(&mut self) -> OntologyResult<()> {
        self.expect_keyword("VALIDATE")?;
        let target = self.expect_identifier("validation target")?;
        self.expect_keyword("WITH")?;

        let token = self.current().clone();
        if !matches!(token.kind, TokenKind::Identifier | TokenKind::Keyword) {
            return Err(self.error("validation level"));
        }
        self.advance();
        let level: ValidationLevel = token.text.parse().map_err(
            |ParseValidationLevelError(name)| OntologyError::UnknownValidationLevel {
                name,
                line: token.line,
                column: token.column,
            },
        )?;

        debug!(validation_target = %target, level = %level, "Recorded validation request");
        self.env.validations.push(ValidationRequest { target, level });
        Ok(())
    }

    /// Drop a construct with a missing referent, or fail in strict mode
    fn skip(&mut self, at: &Token, message: String) -> OntologyResult<()> {
        if self.config.strict_references {
            return Err(OntologyError::UnresolvedReference(format!(
                "{message} (at {}:{})",
                at.line, at.column
            )));
        }
        self.record_warning(at, message);
        Ok(())
    }

    fn record_warning(&mut self, at: &Token, message: String) {
        warn!(line = at.line, column = at.column, "{}", message);
        self.env.warnings.push(Warning {
            line: at.line,
            column: at.column,
            message,
        });
    }

    // The token list always ends with Eof and `pos` never moves past it.
    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn is_at_end(&self) -> bool {
        self.current().is_eof()
    }

    fn check(&self, kind: TokenKind, text: Option<&str>) -> bool {
        !self.is_at_end() && self.current().is(kind, text)
    }

    fn check_keyword(&self, keyword: &str) -> bool {
        self.check(TokenKind::Keyword, Some(keyword))
    }

    fn check_symbol(&self, symbol: &str) -> bool {
        self.check(TokenKind::Symbol, Some(symbol))
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    fn consume(&mut self, kind: TokenKind, text: Option<&str>, expected: &str) -> OntologyResult<Token> {
        if self.check(kind, text) {
            Ok(self.advance())
        } else {
            Err(self.error(expected))
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> OntologyResult<Token> {
        self.consume(TokenKind::Keyword, Some(keyword), keyword)
    }

    fn expect_symbol(&mut self, symbol: &str) -> OntologyResult<Token> {
        self.consume(TokenKind::Symbol, Some(symbol), &format!("'{symbol}'"))
    }

    fn expect_identifier(&mut self, what: &str) -> OntologyResult<String> {
        self.consume(TokenKind::Identifier, None, what).map(|token| token.text)
    }

    fn expect_string(&mut self, what: &str) -> OntologyResult<String> {
        self.consume(TokenKind::String, None, what).map(|token| token.text)
    }

    fn error(&self, expected: &str) -> OntologyError {
        let token = self.current();
        OntologyError::Syntax {
            expected: expected.to_string(),
            found: token.to_string(),
            line: token.line,
            column: token.column,
        }
    }
}
