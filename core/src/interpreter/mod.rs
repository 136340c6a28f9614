//! Robot control language: parsing, printing and execution
//!
//! Text goes through the parser into an immutable command tree, which is then
//! either run to completion or driven one primitive action at a time.

pub mod errors;
pub mod executor;
pub mod parser;
pub mod printer;
pub mod types;

pub use errors::{ParseResult, ProductionKind, RunnerError, SyntaxError};
pub use executor::{
    count_primitives, evaluate, has_next, next_step, next_step_index, run, run_step, Performed,
    ProgramRunner, Step,
};
pub use parser::{parse_command, parse_condition, MAX_DEPTH};
pub use types::{
    ActionOutcome, Command, Condition, ExecutionContext, PrimitiveKind, Refusal, SensorKind,
};
