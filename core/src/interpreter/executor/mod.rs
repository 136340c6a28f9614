//! # Executor - full and resumable execution of command trees
//!
//! Two ways to execute the same tree:
//!
//! 1. **Full run** (`run`): recursive walk to completion in a single call.
//! 2. **Step addressing** (`count_primitives`, `has_next`, `next_step_index`,
//!    `run_step`): one primitive action per call, resumable at any point from a
//!    single integer cursor. `ProgramRunner` owns that cursor.
//!
//! Both modes attempt the same primitive actions in the same order against the
//! same context, and so leave it in the same final state.

pub mod conditions;
pub mod primitives;
pub mod run;
pub mod runner;
pub mod steps;

#[cfg(test)]
mod tests;

pub use conditions::evaluate;
pub use primitives::{perform, Performed};
pub use run::run;
pub use runner::{ProgramRunner, Step};
pub use steps::{count_primitives, has_next, next_step, next_step_index, run_step};
