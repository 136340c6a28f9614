//! Primitive action dispatch

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::interpreter::types::{ActionOutcome, ExecutionContext, PrimitiveKind};

/// A primitive action that was attempted, and what the world made of it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performed {
    pub primitive: PrimitiveKind,
    pub outcome: ActionOutcome,
}

/// Attempt one primitive action
///
/// A refusal is not an error: the context is left untouched and the caller moves on.
pub fn perform<C: ExecutionContext + ?Sized>(primitive: PrimitiveKind, ctx: &mut C) -> Performed {
    let outcome = match primitive {
        PrimitiveKind::Move => ctx.move_forward(),
        PrimitiveKind::TurnClockwise => ctx.turn_clockwise(),
        PrimitiveKind::TurnCounterclockwise => ctx.turn_counterclockwise(),
        PrimitiveKind::Shoot => ctx.fire_weapon(),
        PrimitiveKind::PickUpAndUse => ctx.pick_up_and_use_item(),
    };

    if let ActionOutcome::Refused(reason) = outcome {
        debug!(%primitive, %reason, "primitive action refused");
    }

    Performed { primitive, outcome }
}
