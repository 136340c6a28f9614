//! Arena layouts stored as TOML
//!
//! ```toml
//! width = 8
//! height = 6
//! walls = [{ x = 3, y = 0 }, { x = 3, y = 1 }]
//! robots = [{ x = 7, y = 5 }]
//!
//! [robot]
//! x = 0
//! y = 5
//! facing = "up"
//! energy = 3000
//!
//! [[batteries]]
//! x = 0
//! y = 2
//! energy = 2500
//! ```

use serde::{Deserialize, Serialize};

use super::arena::{Arena, ArenaError, Orientation, Position, Robot};
use crate::config::EnergyConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaLayout {
    pub width: u32,
    pub height: u32,
    pub robot: RobotLayout,
    #[serde(default)]
    pub walls: Vec<Position>,
    #[serde(default)]
    pub robots: Vec<Position>,
    #[serde(default)]
    pub batteries: Vec<BatteryLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotLayout {
    pub x: u32,
    pub y: u32,
    #[serde(default)]
    pub facing: Orientation,
    /// Defaults to a full charge
    pub energy: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryLayout {
    pub x: u32,
    pub y: u32,
    pub energy: f64,
}

impl ArenaLayout {
    pub fn from_toml_str(source: &str) -> Result<Self, ArenaError> {
        Ok(toml::from_str(source)?)
    }

    /// Build the arena this layout describes, charging actions per `costs`
    pub fn build(&self, costs: EnergyConfig) -> Result<Arena, ArenaError> {
        let robot = Robot {
            position: Position::new(self.robot.x, self.robot.y),
            facing: self.robot.facing,
            energy: self.robot.energy.unwrap_or(costs.capacity),
        };

        let mut arena = Arena::new(self.width, self.height, robot, costs)?
            .with_walls(self.walls.iter().copied())?
            .with_robots(self.robots.iter().copied())?;
        for battery in &self.batteries {
            arena = arena.with_battery(Position::new(battery.x, battery.y), battery.energy)?;
        }
        Ok(arena)
    }
}
