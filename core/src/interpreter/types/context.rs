//! Capability interface between the interpreter and the world it drives
//!
//! The interpreter never touches positions or entities directly. Everything it
//! knows about the world comes through `ExecutionContext`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why the world refused a primitive action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Refusal {
    InsufficientEnergy,
    Blocked,
    NothingHere,
}

impl fmt::Display for Refusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Refusal::InsufficientEnergy => write!(f, "insufficient energy"),
            Refusal::Blocked => write!(f, "blocked"),
            Refusal::NothingHere => write!(f, "nothing here"),
        }
    }
}

/// Result of attempting one primitive action
///
/// Actions are atomic: a refused action leaves the context exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t", content = "v")]
pub enum ActionOutcome {
    Applied,
    Refused(Refusal),
}

impl ActionOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, ActionOutcome::Applied)
    }
}

impl fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionOutcome::Applied => write!(f, "applied"),
            ActionOutcome::Refused(reason) => write!(f, "refused ({})", reason),
        }
    }
}

/// The agent a program manipulates and queries
pub trait ExecutionContext {
    fn move_forward(&mut self) -> ActionOutcome;
    fn turn_clockwise(&mut self) -> ActionOutcome;
    fn turn_counterclockwise(&mut self) -> ActionOutcome;
    fn fire_weapon(&mut self) -> ActionOutcome;
    fn pick_up_and_use_item(&mut self) -> ActionOutcome;

    /// Static obstacle on the cell one step to the right of the current facing
    fn obstacle_to_right(&self) -> bool;
    /// An item lies on the agent's own cell
    fn item_here(&self) -> bool;
    /// The first occupied cell ahead, up to the world boundary, holds another agent
    fn can_hit_agent(&self) -> bool;
    /// Stored energy in watt-seconds
    fn energy(&self) -> f64;
}
