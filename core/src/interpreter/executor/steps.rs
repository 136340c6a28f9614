//! Step addressing - resumable, one-primitive-at-a-time execution
//!
//! The tree is treated as if it were flattened into one numbered sequence of
//! primitive actions. Numbers are local to the node being asked and start at 1;
//! `last == 0` means nothing inside the node has run yet.
//!
//! - `Sequence` children occupy consecutive ranges, one after another.
//! - `Conditional` numbers its then-branch first and its else-branch after it, so
//!   both ranges exist even though only one branch ever runs.
//! - `Loop` reuses its body's numbering on every iteration. Whether another
//!   iteration exists is decided from the live context each time the body runs out.
//!
//! Conditions are evaluated fresh on every call and nothing is cached, so the
//! remaining length of a loop follows the world as it changes between steps.

use tracing::trace;

use super::conditions::evaluate;
use super::primitives::{perform, Performed};
use crate::interpreter::types::{Command, ExecutionContext};

/* ===================== Public API ===================== */

/// Static number of addressable steps in a command
///
/// Both branches of a conditional count. A loop counts one iteration of its body.
pub fn count_primitives(command: &Command) -> usize {
    match command {
        Command::Primitive { .. } => 1,
        Command::Sequence { body } => body.iter().map(count_primitives).sum(),
        Command::Conditional { then_c, else_c, .. } => {
            count_primitives(then_c) + count_primitives(else_c)
        }
        Command::Loop { body, .. } => count_primitives(body),
    }
}

/// Whether a primitive action follows local step `last` under the current context
pub fn has_next<C: ExecutionContext + ?Sized>(command: &Command, ctx: &C, last: usize) -> bool {
    next_step(command, ctx, last).is_some()
}

/// Local index of the primitive action that follows step `last`
///
/// # Panics
///
/// When `has_next` is false for the same context and `last`.
pub fn next_step_index<C: ExecutionContext + ?Sized>(
    command: &Command,
    ctx: &C,
    last: usize,
) -> usize {
    match next_step(command, ctx, last) {
        Some(step) => step,
        None => panic!("next_step_index: no primitive action follows step {}", last),
    }
}

/// Execute exactly the primitive action at local index `step`
///
/// # Panics
///
/// When `step` does not address a primitive action of `command`.
pub fn run_step<C: ExecutionContext + ?Sized>(
    command: &Command,
    ctx: &mut C,
    step: usize,
) -> Performed {
    match command {
        Command::Primitive { kind } => {
            if step != 1 {
                out_of_range(step);
            }
            perform(*kind, ctx)
        }

        Command::Sequence { body } => {
            let mut offset = 0;
            for child in body {
                let count = count_primitives(child);
                if step > offset && step <= offset + count {
                    return run_step(child, ctx, step - offset);
                }
                offset += count;
            }
            out_of_range(step)
        }

        Command::Conditional { then_c, else_c, .. } => {
            let then_count = count_primitives(then_c);
            if step == 0 {
                out_of_range(step);
            }
            if step <= then_count {
                run_step(then_c, ctx, step)
            } else {
                run_step(else_c, ctx, step - then_count)
            }
        }

        // The body is addressed from 1 again on every iteration
        Command::Loop { body, .. } => run_step(body, ctx, step),
    }
}

/* ===================== Delegation ===================== */

/// Local index of the next primitive action after step `last`, if any
///
/// The single walk behind `has_next` and `next_step_index`, so the two can never
/// disagree. Drivers that want both answers at once call this directly and pay
/// for each condition evaluation only once.
pub fn next_step<C: ExecutionContext + ?Sized>(
    command: &Command,
    ctx: &C,
    last: usize,
) -> Option<usize> {
    match command {
        Command::Primitive { .. } => (last == 0).then_some(1),

        Command::Sequence { body } => {
            let mut offset = 0;
            for child in body {
                let count = count_primitives(child);
                // A child whose range ends exactly at `last` still gets asked: a loop
                // that just finished an iteration may start another one.
                if last <= offset + count {
                    let local = last.saturating_sub(offset);
                    if let Some(step) = next_step(child, ctx, local) {
                        return Some(offset + step);
                    }
                }
                offset += count;
            }
            None
        }

        Command::Conditional {
            test,
            then_c,
            else_c,
        } => {
            let then_count = count_primitives(then_c);
            if last == 0 {
                if evaluate(test, ctx) {
                    next_step(then_c, ctx, 0)
                } else {
                    next_step(else_c, ctx, 0).map(|step| then_count + step)
                }
            } else if last <= then_count {
                next_step(then_c, ctx, last)
            } else {
                next_step(else_c, ctx, last - then_count).map(|step| then_count + step)
            }
        }

        Command::Loop { test, body } => {
            if last > 0 {
                if let Some(step) = next_step(body, ctx, last) {
                    return Some(step);
                }
                trace!(last, "loop body exhausted, re-testing condition");
            }
            if evaluate(test, ctx) {
                next_step(body, ctx, 0)
            } else {
                None
            }
        }
    }
}

fn out_of_range(step: usize) -> ! {
    panic!("run_step: step {} does not address a primitive action", step)
}
