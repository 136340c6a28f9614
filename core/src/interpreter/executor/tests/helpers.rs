//! Test helpers for executor tests
//!
//! A scripted context with fixed sensor readings, plus shortcuts for parsing
//! programs, building sandbox arenas and driving the step protocol by hand.

use std::cell::Cell;
use std::collections::HashSet;

use crate::config::EnergyConfig;
use crate::interpreter::executor::{has_next, next_step_index, run_step};
use crate::interpreter::parser::{parse_command, parse_condition};
use crate::interpreter::types::{
    ActionOutcome, Command, Condition, ExecutionContext, PrimitiveKind, Refusal,
};
use crate::sandbox::{Arena, Orientation, Position, Robot};

/// Upper bound for hand-driven loops, so a broken protocol fails instead of hanging
pub const STEP_LIMIT: usize = 1_000;

pub fn program(source: &str) -> Command {
    parse_command(source).expect("Parse program failed")
}

pub fn condition(source: &str) -> Condition {
    parse_condition(source).expect("Parse condition failed")
}

/// Context with settable sensors; every applied action costs `cost`
#[derive(Debug, Default)]
pub struct ScriptedContext {
    pub wall: bool,
    pub at_item: bool,
    pub can_hit: bool,
    pub energy: f64,
    pub cost: f64,
    pub refuse: HashSet<PrimitiveKind>,
    pub actions: Vec<PrimitiveKind>,
    pub sensor_reads: Cell<usize>,
}

impl ScriptedContext {
    pub fn with_energy(energy: f64, cost: f64) -> Self {
        Self {
            energy,
            cost,
            ..Self::default()
        }
    }

    fn act(&mut self, primitive: PrimitiveKind) -> ActionOutcome {
        self.actions.push(primitive);
        if self.refuse.contains(&primitive) {
            return ActionOutcome::Refused(Refusal::Blocked);
        }
        if self.energy < self.cost {
            return ActionOutcome::Refused(Refusal::InsufficientEnergy);
        }
        self.energy -= self.cost;
        ActionOutcome::Applied
    }

    fn read(&self, value: bool) -> bool {
        self.sensor_reads.set(self.sensor_reads.get() + 1);
        value
    }
}

impl ExecutionContext for ScriptedContext {
    fn move_forward(&mut self) -> ActionOutcome {
        self.act(PrimitiveKind::Move)
    }

    fn turn_clockwise(&mut self) -> ActionOutcome {
        self.act(PrimitiveKind::TurnClockwise)
    }

    fn turn_counterclockwise(&mut self) -> ActionOutcome {
        self.act(PrimitiveKind::TurnCounterclockwise)
    }

    fn fire_weapon(&mut self) -> ActionOutcome {
        self.act(PrimitiveKind::Shoot)
    }

    fn pick_up_and_use_item(&mut self) -> ActionOutcome {
        self.act(PrimitiveKind::PickUpAndUse)
    }

    fn obstacle_to_right(&self) -> bool {
        self.read(self.wall)
    }

    fn item_here(&self) -> bool {
        self.read(self.at_item)
    }

    fn can_hit_agent(&self) -> bool {
        self.read(self.can_hit)
    }

    fn energy(&self) -> f64 {
        self.sensor_reads.set(self.sensor_reads.get() + 1);
        self.energy
    }
}

/// Open arena with the robot at `(x, y)`
pub fn open_arena(width: u32, height: u32, x: u32, y: u32, facing: Orientation, energy: f64) -> Arena {
    let robot = Robot {
        position: Position::new(x, y),
        facing,
        energy,
    };
    Arena::new(width, height, robot, EnergyConfig::default()).expect("Arena construction failed")
}

/// Drive the protocol on the root node until it reports no next step
///
/// Returns the delivered step indices in order.
pub fn drive<C: ExecutionContext>(program: &Command, ctx: &mut C) -> Vec<usize> {
    let mut cursor = 0;
    let mut delivered = Vec::new();

    while has_next(program, &*ctx, cursor) {
        assert!(delivered.len() < STEP_LIMIT, "step limit exceeded");
        let index = next_step_index(program, &*ctx, cursor);
        run_step(program, ctx, index);
        delivered.push(index);
        cursor = index;
    }

    delivered
}

pub fn primitives(arena: &Arena) -> Vec<PrimitiveKind> {
    arena.journal().iter().map(|performed| performed.primitive).collect()
}
