pub mod cli;
pub mod config;
pub mod interpreter;
pub mod sandbox;

// Re-export main types
pub use config::Config;
pub use interpreter::{
    parse_command, parse_condition, Command, Condition, ExecutionContext, ProgramRunner, Step,
};
