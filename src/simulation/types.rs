//! Core types for the intersection simulation
//!
//! Approaches, signal colors, positions and the default tuning constants.

use anyhow::bail;
use std::fmt;
use std::str::FromStr;

/// One of the four directions from which vehicles enter the intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Approach {
    Up,
    Down,
    Left,
    Right,
}

impl Approach {
    /// Canonical order. Every tie-break in the controller picks the earliest entry.
    pub const ALL: [Approach; 4] = [Approach::Up, Approach::Down, Approach::Left, Approach::Right];

    /// Position of this approach in [`Approach::ALL`]
    pub fn index(self) -> usize {
        match self {
            Approach::Up => 0,
            Approach::Down => 1,
            Approach::Left => 2,
            Approach::Right => 3,
        }
    }
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Approach::Up => "UP",
            Approach::Down => "DOWN",
            Approach::Left => "LEFT",
            Approach::Right => "RIGHT",
        })
    }
}

impl FromStr for Approach {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UP" => Ok(Approach::Up),
            "DOWN" => Ok(Approach::Down),
            "LEFT" => Ok(Approach::Left),
            "RIGHT" => Ok(Approach::Right),
            _ => bail!("Unrecognized approach '{}' (expected UP, DOWN, LEFT or RIGHT)", s),
        }
    }
}

/// Color shown to an approach
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalColor {
    Red,
    Green,
}

impl SignalColor {
    pub fn is_green(self) -> bool {
        matches!(self, SignalColor::Green)
    }
}

impl fmt::Display for SignalColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalColor::Red => f.pad("RED"),
            SignalColor::Green => f.pad("GREEN"),
        }
    }
}

/// A wrapper type for vehicle IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub usize);

/// A 2D position in screen coordinates (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Move by `distance` along a unit heading
    pub fn offset(&self, heading: Heading, distance: f32) -> Position {
        let (dx, dy) = heading.unit();
        Position {
            x: self.x + dx * distance,
            y: self.y + dy * distance,
        }
    }
}

/// Direction of travel for an approach, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    /// Towards smaller y
    North,
    /// Towards larger y
    South,
    /// Towards smaller x
    West,
    /// Towards larger x
    East,
}

impl Heading {
    pub fn unit(self) -> (f32, f32) {
        match self {
            Heading::North => (0.0, -1.0),
            Heading::South => (0.0, 1.0),
            Heading::West => (-1.0, 0.0),
            Heading::East => (1.0, 0.0),
        }
    }

    /// Coordinate of `position` along this heading's axis
    pub fn axis_value(self, position: &Position) -> f32 {
        match self {
            Heading::North | Heading::South => position.y,
            Heading::West | Heading::East => position.x,
        }
    }

    /// +1 when travel increases the axis coordinate, -1 otherwise
    pub fn sign(self) -> f32 {
        match self {
            Heading::South | Heading::East => 1.0,
            Heading::North | Heading::West => -1.0,
        }
    }
}

/// Width of the simulated field
pub const FIELD_WIDTH: f32 = 800.0;

/// Height of the simulated field
pub const FIELD_HEIGHT: f32 = 800.0;

/// Distance past the field edge at which a vehicle is considered gone
pub const EXIT_MARGIN: f32 = 60.0;

/// Speed of a regular vehicle, in units per tick
pub const VEHICLE_SPEED: f32 = 2.0;

/// Speed of a priority (emergency) vehicle, in units per tick
pub const PRIORITY_SPEED: f32 = 3.0;

/// Shortest green phase, in seconds
pub const MIN_GREEN: f32 = 3.0;

/// Longest green phase, in seconds
pub const MAX_GREEN: f32 = 6.0;

/// Extra green time granted per queued vehicle, in seconds
pub const GREEN_PER_VEHICLE: f32 = 0.5;

/// Simulation ticks per simulated second
pub const TICKS_PER_SECOND: u32 = 60;

/// Idle ticks between two spawns
pub const SPAWN_INTERVAL: u32 = 35;

/// Probability that a spawned vehicle is a priority vehicle
pub const PRIORITY_CHANCE: f64 = 0.12;
