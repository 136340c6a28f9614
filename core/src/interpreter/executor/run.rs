//! Full execution - walks the whole tree to completion in one call

use tracing::trace;

use super::conditions::evaluate;
use super::primitives::perform;
use crate::interpreter::types::{Command, ExecutionContext};

/// Execute a command tree to completion
///
/// Returns the number of primitive actions attempted, refused ones included.
/// A loop stops the first time its condition is false, or after an iteration that
/// attempted nothing: such an iteration cannot change the context, so every later
/// one would be identical.
pub fn run<C: ExecutionContext + ?Sized>(command: &Command, ctx: &mut C) -> usize {
    match command {
        Command::Primitive { kind } => {
            perform(*kind, ctx);
            1
        }

        Command::Sequence { body } => {
            let mut attempted = 0;
            for child in body {
                attempted += run(child, ctx);
            }
            attempted
        }

        Command::Conditional {
            test,
            then_c,
            else_c,
        } => {
            if evaluate(test, &*ctx) {
                run(then_c, ctx)
            } else {
                run(else_c, ctx)
            }
        }

        Command::Loop { test, body } => {
            let mut attempted = 0;
            while evaluate(test, &*ctx) {
                let iteration = run(body, ctx);
                if iteration == 0 {
                    trace!("loop iteration attempted no primitive, stopping");
                    break;
                }
                attempted += iteration;
            }
            attempted
        }
    }
}
