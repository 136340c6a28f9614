//! Condition evaluation
//!
//! Evaluation is pure: it reads sensors through the context and never mutates it.
//! `And`/`Or` short-circuit left to right; an empty `And` is true and an empty
//! `Or` is false.

use crate::interpreter::types::{Condition, ExecutionContext, SensorKind};

pub fn evaluate<C: ExecutionContext + ?Sized>(condition: &Condition, ctx: &C) -> bool {
    match condition {
        Condition::Constant { v } => *v,

        Condition::Sensor { kind } => match kind {
            SensorKind::Wall => ctx.obstacle_to_right(),
            SensorKind::AtItem => ctx.item_here(),
            SensorKind::CanHitRobot => ctx.can_hit_agent(),
        },

        Condition::EnergyAtLeast { amount } => ctx.energy() >= *amount,

        Condition::And { operands } => operands.iter().all(|operand| evaluate(operand, ctx)),

        Condition::Or { operands } => operands.iter().any(|operand| evaluate(operand, ctx)),

        Condition::Not { operand } => !evaluate(operand, ctx),
    }
}
