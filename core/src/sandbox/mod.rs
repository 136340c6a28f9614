//! Sandbox arena - a small grid world implementing `ExecutionContext`
//!
//! Used by the CLI to try programs out and by tests. It models just enough of a
//! board to give every primitive action and sensor a concrete meaning.

pub mod arena;
pub mod layout;

pub use arena::{Arena, ArenaError, Orientation, Position, Robot};
pub use layout::{ArenaLayout, BatteryLayout, RobotLayout};
