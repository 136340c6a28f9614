//! Grid state and the primitive actions and sensors over it

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::config::EnergyConfig;
use crate::interpreter::executor::Performed;
use crate::interpreter::types::{ActionOutcome, ExecutionContext, PrimitiveKind, Refusal};

/* ===================== Geometry ===================== */

/// Cell coordinates; `(0, 0)` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Orientation {
    pub fn clockwise(self) -> Self {
        match self {
            Orientation::Up => Orientation::Right,
            Orientation::Right => Orientation::Down,
            Orientation::Down => Orientation::Left,
            Orientation::Left => Orientation::Up,
        }
    }

    pub fn counterclockwise(self) -> Self {
        match self {
            Orientation::Up => Orientation::Left,
            Orientation::Left => Orientation::Down,
            Orientation::Down => Orientation::Right,
            Orientation::Right => Orientation::Up,
        }
    }
}

/* ===================== Arena ===================== */

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("arena must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error("({}, {}) lies outside the {width}x{height} arena", .position.x, .position.y)]
    OutOfBounds {
        position: Position,
        width: u32,
        height: u32,
    },

    #[error("({}, {}) is already occupied", .position.x, .position.y)]
    Occupied { position: Position },

    #[error("energy {energy} is outside 0..={capacity}")]
    InvalidEnergy { energy: f64, capacity: f64 },

    #[error("battery at ({}, {}) must hold a finite, non-negative charge, got {energy}", .position.x, .position.y)]
    InvalidCharge { position: Position, energy: f64 },

    #[error("invalid arena layout: {0}")]
    Layout(#[from] toml::de::Error),
}

/// The robot a program controls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Robot {
    pub position: Position,
    pub facing: Orientation,
    /// Stored energy in watt-seconds
    pub energy: f64,
}

#[derive(Debug, Clone)]
pub struct Arena {
    width: u32,
    height: u32,
    walls: HashSet<Position>,
    batteries: HashMap<Position, Vec<f64>>,
    robots: HashSet<Position>,
    robot: Robot,
    costs: EnergyConfig,
    journal: Vec<Performed>,
}

impl Arena {
    pub fn new(width: u32, height: u32, robot: Robot, costs: EnergyConfig) -> Result<Self, ArenaError> {
        if width == 0 || height == 0 {
            return Err(ArenaError::EmptyGrid { width, height });
        }
        if !(0.0..=costs.capacity).contains(&robot.energy) {
            return Err(ArenaError::InvalidEnergy {
                energy: robot.energy,
                capacity: costs.capacity,
            });
        }

        let arena = Self {
            width,
            height,
            walls: HashSet::new(),
            batteries: HashMap::new(),
            robots: HashSet::new(),
            robot,
            costs,
            journal: Vec::new(),
        };
        arena.check_in_bounds(robot.position)?;
        Ok(arena)
    }

    pub fn with_walls(mut self, walls: impl IntoIterator<Item = Position>) -> Result<Self, ArenaError> {
        for wall in walls {
            self.check_free(wall)?;
            self.walls.insert(wall);
        }
        Ok(self)
    }

    pub fn with_robots(mut self, robots: impl IntoIterator<Item = Position>) -> Result<Self, ArenaError> {
        for other in robots {
            self.check_free(other)?;
            self.robots.insert(other);
        }
        Ok(self)
    }

    /// Place a battery holding `energy` watt-seconds; several may share a cell
    pub fn with_battery(mut self, position: Position, energy: f64) -> Result<Self, ArenaError> {
        self.check_in_bounds(position)?;
        if self.walls.contains(&position) || self.robots.contains(&position) {
            return Err(ArenaError::Occupied { position });
        }
        if !energy.is_finite() || energy < 0.0 {
            return Err(ArenaError::InvalidCharge { position, energy });
        }
        self.batteries.entry(position).or_default().push(energy);
        Ok(self)
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    pub fn other_robots(&self) -> &HashSet<Position> {
        &self.robots
    }

    pub fn battery_count(&self) -> usize {
        self.batteries.values().map(Vec::len).sum()
    }

    /// Every primitive action attempted so far, in order
    pub fn journal(&self) -> &[Performed] {
        &self.journal
    }

    /* ===================== Helpers ===================== */

    fn check_in_bounds(&self, position: Position) -> Result<(), ArenaError> {
        if position.x < self.width && position.y < self.height {
            Ok(())
        } else {
            Err(ArenaError::OutOfBounds {
                position,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// A wall or robot may not share its cell with anything but batteries placed later
    fn check_free(&self, position: Position) -> Result<(), ArenaError> {
        self.check_in_bounds(position)?;
        if position == self.robot.position
            || self.walls.contains(&position)
            || self.robots.contains(&position)
        {
            return Err(ArenaError::Occupied { position });
        }
        Ok(())
    }

    /// Neighbouring cell in `direction`, if it is on the grid
    fn neighbour(&self, from: Position, direction: Orientation) -> Option<Position> {
        let Position { x, y } = from;
        match direction {
            Orientation::Up => y.checked_sub(1).map(|y| Position { x, y }),
            Orientation::Down => (y + 1 < self.height).then(|| Position { x, y: y + 1 }),
            Orientation::Left => x.checked_sub(1).map(|x| Position { x, y }),
            Orientation::Right => (x + 1 < self.width).then(|| Position { x: x + 1, y }),
        }
    }

    fn is_occupied(&self, position: Position) -> bool {
        self.walls.contains(&position)
            || self.robots.contains(&position)
            || self.batteries.contains_key(&position)
    }

    /// First occupied cell ahead of the robot, up to the edge of the grid
    fn first_occupied_ahead(&self) -> Option<Position> {
        let mut cell = self.robot.position;
        while let Some(next) = self.neighbour(cell, self.robot.facing) {
            if self.is_occupied(next) {
                return Some(next);
            }
            cell = next;
        }
        None
    }

    /// Deduct `cost` if affordable, otherwise refuse
    fn pay(&mut self, cost: f64) -> Result<(), Refusal> {
        if self.robot.energy < cost {
            return Err(Refusal::InsufficientEnergy);
        }
        self.robot.energy -= cost;
        Ok(())
    }

    fn record(&mut self, primitive: PrimitiveKind, result: Result<(), Refusal>) -> ActionOutcome {
        let outcome = match result {
            Ok(()) => ActionOutcome::Applied,
            Err(reason) => ActionOutcome::Refused(reason),
        };
        self.journal.push(Performed { primitive, outcome });
        outcome
    }

    fn turn(&mut self, turned: Orientation) -> Result<(), Refusal> {
        self.pay(self.costs.turn_cost)?;
        self.robot.facing = turned;
        Ok(())
    }

    fn try_move(&mut self) -> Result<(), Refusal> {
        if self.robot.energy < self.costs.move_cost {
            return Err(Refusal::InsufficientEnergy);
        }
        let target = self
            .neighbour(self.robot.position, self.robot.facing)
            .filter(|cell| !self.walls.contains(cell) && !self.robots.contains(cell))
            .ok_or(Refusal::Blocked)?;
        self.pay(self.costs.move_cost)?;
        self.robot.position = target;
        Ok(())
    }

    fn try_shoot(&mut self) -> Result<(), Refusal> {
        self.pay(self.costs.shoot_cost)?;
        if let Some(target) = self.first_occupied_ahead() {
            // Walls absorb the shot; a robot is hit before any battery sharing its cell
            if !self.robots.remove(&target) {
                self.batteries.remove(&target);
            }
        }
        Ok(())
    }

    fn try_pick_up(&mut self) -> Result<(), Refusal> {
        let position = self.robot.position;
        let cell = self.batteries.get_mut(&position).ok_or(Refusal::NothingHere)?;
        let stored = cell.pop().ok_or(Refusal::NothingHere)?;
        if cell.is_empty() {
            self.batteries.remove(&position);
        }
        self.robot.energy = (self.robot.energy + stored).min(self.costs.capacity);
        Ok(())
    }
}

impl ExecutionContext for Arena {
    fn move_forward(&mut self) -> ActionOutcome {
        let result = self.try_move();
        self.record(PrimitiveKind::Move, result)
    }

    fn turn_clockwise(&mut self) -> ActionOutcome {
        let result = self.turn(self.robot.facing.clockwise());
        self.record(PrimitiveKind::TurnClockwise, result)
    }

    fn turn_counterclockwise(&mut self) -> ActionOutcome {
        let result = self.turn(self.robot.facing.counterclockwise());
        self.record(PrimitiveKind::TurnCounterclockwise, result)
    }

    fn fire_weapon(&mut self) -> ActionOutcome {
        let result = self.try_shoot();
        self.record(PrimitiveKind::Shoot, result)
    }

    fn pick_up_and_use_item(&mut self) -> ActionOutcome {
        let result = self.try_pick_up();
        self.record(PrimitiveKind::PickUpAndUse, result)
    }

    fn obstacle_to_right(&self) -> bool {
        self.neighbour(self.robot.position, self.robot.facing.clockwise())
            .is_some_and(|cell| self.walls.contains(&cell))
    }

    fn item_here(&self) -> bool {
        self.batteries.contains_key(&self.robot.position)
    }

    fn can_hit_agent(&self) -> bool {
        self.first_occupied_ahead()
            .is_some_and(|cell| self.robots.contains(&cell))
    }

    fn energy(&self) -> f64 {
        self.robot.energy
    }
}
