//! Interpreter errors

use std::fmt;
use thiserror::Error;

/// Which grammar production the parser was trying to match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductionKind {
    Program,
    Condition,
}

impl fmt::Display for ProductionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductionKind::Program => write!(f, "program"),
            ProductionKind::Condition => write!(f, "condition"),
        }
    }
}

/// Malformed program or condition text
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    #[error("empty {0}")]
    Empty(ProductionKind),

    #[error("unrecognized {kind}: {text}")]
    Unrecognized { kind: ProductionKind, text: String },

    #[error("unbalanced parentheses in: {text}")]
    Unbalanced { text: String },

    #[error("'{tag}' expects {expected} argument(s), found {found}")]
    Arity {
        tag: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid number: {text}")]
    InvalidNumber { text: String },

    #[error("forms nested deeper than {limit} levels")]
    TooDeep { limit: usize },
}

pub type ParseResult<T> = Result<T, SyntaxError>;

/// Misuse of a `ProgramRunner`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunnerError {
    #[error("no program attached")]
    NoProgram,
}
