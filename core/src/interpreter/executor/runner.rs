//! Program runner - owns an attached program and its execution cursor
//!
//! The cursor is the program-local index of the last primitive action delivered
//! (0 = not started). Attaching a program resets it; full runs leave it alone.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::run::run;
use super::steps::{has_next, next_step, run_step};
use crate::interpreter::errors::RunnerError;
use crate::interpreter::types::{ActionOutcome, Command, ExecutionContext, PrimitiveKind};

/* ===================== Step Result ===================== */

/// Result of asking the runner for one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum Step {
    /// One primitive action was attempted
    Executed {
        index: usize,
        primitive: PrimitiveKind,
        outcome: ActionOutcome,
    },
    /// No primitive action follows under the current context
    Done,
}

/* ===================== Runner ===================== */

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgramRunner {
    program: Option<Command>,
    cursor: usize,
}

impl ProgramRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(program: Command) -> Self {
        Self {
            program: Some(program),
            cursor: 0,
        }
    }

    /// Replace the attached program and start it from the beginning
    pub fn attach(&mut self, program: Command) {
        self.program = Some(program);
        self.cursor = 0;
    }

    pub fn detach(&mut self) -> Option<Command> {
        self.cursor = 0;
        self.program.take()
    }

    pub fn program(&self) -> Option<&Command> {
        self.program.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn has_next<C: ExecutionContext + ?Sized>(&self, ctx: &C) -> Result<bool, RunnerError> {
        let program = self.program.as_ref().ok_or(RunnerError::NoProgram)?;
        Ok(has_next(program, ctx, self.cursor))
    }

    /// Execute the next primitive action of the attached program
    ///
    /// The cursor advances to the delivered index whether the world applied the
    /// action or refused it; a refused action is not retried.
    pub fn step<C: ExecutionContext + ?Sized>(&mut self, ctx: &mut C) -> Result<Step, RunnerError> {
        let program = self.program.as_ref().ok_or(RunnerError::NoProgram)?;

        let Some(index) = next_step(program, &*ctx, self.cursor) else {
            return Ok(Step::Done);
        };

        let performed = run_step(program, ctx, index);
        self.cursor = index;

        debug!(
            index,
            primitive = %performed.primitive,
            outcome = %performed.outcome,
            "step executed"
        );

        Ok(Step::Executed {
            index,
            primitive: performed.primitive,
            outcome: performed.outcome,
        })
    }

    /// Execute up to `n` steps, stopping early when the program has no next step
    ///
    /// Returns the number of steps delivered.
    pub fn step_n<C: ExecutionContext + ?Sized>(
        &mut self,
        ctx: &mut C,
        n: usize,
    ) -> Result<usize, RunnerError> {
        let mut delivered = 0;
        while delivered < n {
            match self.step(ctx)? {
                Step::Executed { .. } => delivered += 1,
                Step::Done => break,
            }
        }
        Ok(delivered)
    }

    /// Execute the attached program to completion without touching the cursor
    pub fn run<C: ExecutionContext + ?Sized>(&self, ctx: &mut C) -> Result<usize, RunnerError> {
        let program = self.program.as_ref().ok_or(RunnerError::NoProgram)?;
        Ok(run(program, ctx))
    }
}
