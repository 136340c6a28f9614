//! Abstract Syntax Tree node types
//!
//! A program is a finite tree of `Command` nodes. Every node exclusively owns its
//! children, so a tree can be cloned, compared and serialized freely.

use serde::{Deserialize, Serialize};

/// Primitive robot action - the leaves of every program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Move,
    TurnClockwise,
    TurnCounterclockwise,
    Shoot,
    PickUpAndUse,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 5] = [
        PrimitiveKind::Move,
        PrimitiveKind::TurnClockwise,
        PrimitiveKind::TurnCounterclockwise,
        PrimitiveKind::Shoot,
        PrimitiveKind::PickUpAndUse,
    ];

    /// Source keyword, without parentheses
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Move => "move",
            PrimitiveKind::TurnClockwise => "turnclockwise",
            PrimitiveKind::TurnCounterclockwise => "turncounterclockwise",
            PrimitiveKind::Shoot => "shoot",
            PrimitiveKind::PickUpAndUse => "pick-up-and-use",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }
}

/// Sensor queried by a condition leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    /// Static obstacle one cell to the robot's right
    Wall,
    /// Item on the robot's own cell
    AtItem,
    /// First occupied cell along the facing direction holds a robot
    CanHitRobot,
}

impl SensorKind {
    pub const ALL: [SensorKind; 3] = [SensorKind::Wall, SensorKind::AtItem, SensorKind::CanHitRobot];

    pub fn keyword(self) -> &'static str {
        match self {
            SensorKind::Wall => "wall",
            SensorKind::AtItem => "at-item",
            SensorKind::CanHitRobot => "can-hit-robot",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }
}

/// Command AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    Primitive {
        kind: PrimitiveKind,
    },
    Sequence {
        body: Vec<Command>,
    },
    Conditional {
        test: Condition,
        then_c: Box<Command>,
        else_c: Box<Command>,
    },
    Loop {
        test: Condition,
        body: Box<Command>,
    },
}

impl Command {
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Command::Primitive { kind }
    }

    pub fn sequence(body: Vec<Command>) -> Self {
        Command::Sequence { body }
    }

    pub fn conditional(test: Condition, then_c: Command, else_c: Command) -> Self {
        Command::Conditional {
            test,
            then_c: Box::new(then_c),
            else_c: Box::new(else_c),
        }
    }

    pub fn looping(test: Condition, body: Command) -> Self {
        Command::Loop {
            test,
            body: Box::new(body),
        }
    }
}

/// Condition AST node
///
/// Conditions never mutate the execution context; they only read sensors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Condition {
    Constant { v: bool },
    Sensor { kind: SensorKind },
    /// Stored energy, in watt-seconds, is at least `amount`
    EnergyAtLeast { amount: f64 },
    And { operands: Vec<Condition> },
    Or { operands: Vec<Condition> },
    Not { operand: Box<Condition> },
}

impl Condition {
    pub fn constant(v: bool) -> Self {
        Condition::Constant { v }
    }

    pub fn sensor(kind: SensorKind) -> Self {
        Condition::Sensor { kind }
    }

    pub fn energy_at_least(amount: f64) -> Self {
        Condition::EnergyAtLeast { amount }
    }

    pub fn negate(operand: Condition) -> Self {
        Condition::Not {
            operand: Box::new(operand),
        }
    }
}
