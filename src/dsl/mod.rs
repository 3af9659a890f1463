// Copyright 2025 Cowboy AI, LLC.

//! The categorical ontology DSL
//!
//! ```text
//! ONTOLOGY FactoryA {
//!     OBJECT Boiler : equipment { attributes: [gas_boiler, 5MW] }
//!     OBJECT NaturalGas : energy
//!     MORPHISM consumes : Boiler -> NaturalGas { type: FUNCTIONAL }
//! }
//! OPERATION { Combined = COPRODUCT(FactoryA, FactoryB) }
//! ```

pub mod lexer;
pub mod parser;
pub mod token;

pub use lexer::{tokenize, Lexer};
pub use parser::{Declaration, OperationKind, Parser};
pub use token::{is_keyword, Token, TokenKind, KEYWORDS};
