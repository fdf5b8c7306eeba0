//! Configuration for a single intersection
//!
//! Everything here is fixed at construction time. `SimConfig::validate` is the
//! only place configuration errors are reported.

use anyhow::{bail, Result};

use super::types::{
    Approach, Heading, Position, EXIT_MARGIN, FIELD_HEIGHT, FIELD_WIDTH, MAX_GREEN, MIN_GREEN,
    PRIORITY_SPEED, VEHICLE_SPEED,
};

/// Where vehicles of one approach enter, which way they travel and where they leave
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproachGeometry {
    pub spawn: Position,
    pub heading: Heading,
    /// Axis coordinate past which a vehicle has left the intersection
    pub exit_threshold: f32,
}

impl ApproachGeometry {
    pub fn new(spawn: Position, heading: Heading, exit_threshold: f32) -> Self {
        Self {
            spawn,
            heading,
            exit_threshold,
        }
    }

    /// True once `position` is strictly beyond the exit threshold in the direction of travel
    pub fn is_beyond_exit(&self, position: &Position) -> bool {
        let along = self.heading.axis_value(position) * self.heading.sign();
        along > self.exit_threshold * self.heading.sign()
    }

    /// Default layout on the 800x800 field, spawning just off-screen
    pub fn default_for(approach: Approach) -> Self {
        match approach {
            Approach::Up => Self::new(
                Position::new(390.0, FIELD_HEIGHT + 20.0),
                Heading::North,
                -EXIT_MARGIN,
            ),
            Approach::Down => Self::new(
                Position::new(360.0, -40.0),
                Heading::South,
                FIELD_HEIGHT + EXIT_MARGIN,
            ),
            Approach::Left => Self::new(
                Position::new(FIELD_WIDTH + 20.0, 360.0),
                Heading::West,
                -EXIT_MARGIN,
            ),
            Approach::Right => Self::new(
                Position::new(-40.0, 390.0),
                Heading::East,
                FIELD_WIDTH + EXIT_MARGIN,
            ),
        }
    }
}

/// Per-approach geometry, indexed by [`Approach::index`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryTable([ApproachGeometry; 4]);

impl GeometryTable {
    pub fn new(geometry: [ApproachGeometry; 4]) -> Self {
        Self(geometry)
    }

    pub fn get(&self, approach: Approach) -> &ApproachGeometry {
        &self.0[approach.index()]
    }

    pub fn set(&mut self, approach: Approach, geometry: ApproachGeometry) {
        self.0[approach.index()] = geometry;
    }
}

impl Default for GeometryTable {
    fn default() -> Self {
        Self(Approach::ALL.map(ApproachGeometry::default_for))
    }
}

/// Configuration for an intersection and its controller
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Shortest green phase, in seconds
    pub min_green: f32,
    /// Longest green phase, in seconds
    pub max_green: f32,
    /// Speed of regular vehicles, in units per tick
    pub vehicle_speed: f32,
    /// Speed of priority vehicles, in units per tick
    pub priority_speed: f32,
    /// Approach that is green at startup
    pub initial_approach: Approach,
    pub geometry: GeometryTable,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            min_green: MIN_GREEN,
            max_green: MAX_GREEN,
            vehicle_speed: VEHICLE_SPEED,
            priority_speed: PRIORITY_SPEED,
            initial_approach: Approach::Up,
            geometry: GeometryTable::default(),
        }
    }
}

impl SimConfig {
    /// Speed assigned to a newly spawned vehicle
    pub fn speed_for(&self, is_priority: bool) -> f32 {
        if is_priority {
            self.priority_speed
        } else {
            self.vehicle_speed
        }
    }

    /// Reject configurations the controller cannot run with
    pub fn validate(&self) -> Result<()> {
        if !self.min_green.is_finite() || !self.max_green.is_finite() {
            bail!(
                "Green bounds must be finite (min_green={}, max_green={})",
                self.min_green,
                self.max_green
            );
        }
        if self.min_green < 0.0 {
            bail!("min_green must not be negative (got {})", self.min_green);
        }
        if self.min_green > self.max_green {
            bail!(
                "min_green ({}) must not exceed max_green ({})",
                self.min_green,
                self.max_green
            );
        }
        for (name, speed) in [
            ("vehicle_speed", self.vehicle_speed),
            ("priority_speed", self.priority_speed),
        ] {
            if !speed.is_finite() || speed <= 0.0 {
                bail!("{} must be a positive number (got {})", name, speed);
            }
        }
        for approach in Approach::ALL {
            let geometry = self.geometry.get(approach);
            if !geometry.exit_threshold.is_finite() {
                bail!("Exit threshold for {} must be finite", approach);
            }
            if geometry.is_beyond_exit(&geometry.spawn) {
                bail!(
                    "Spawn point for {} ({:.1}, {:.1}) is already past its exit threshold {}",
                    approach,
                    geometry.spawn.x,
                    geometry.spawn.y,
                    geometry.exit_threshold
                );
            }
        }
        Ok(())
    }
}
