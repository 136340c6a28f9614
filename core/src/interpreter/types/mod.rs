//! Type definitions for the interpreter
//!
//! - AST nodes (Command, Condition and their leaf kinds)
//! - The execution context capability trait and action outcomes

pub mod ast;
pub mod context;

pub use ast::{Command, Condition, PrimitiveKind, SensorKind};
pub use context::{ActionOutcome, ExecutionContext, Refusal};
