//! Standalone intersection simulation module
//!
//! This module contains the queue model, the adaptive signal controller and
//! the tick loop around them. It runs without any rendering and can be
//! driven entirely from tests or the console.

mod config;
mod controller;
mod intersection;
mod queue;
mod spawner;
mod stats;
mod types;
mod vehicle;
mod world;

pub use config::{ApproachGeometry, GeometryTable, SimConfig};
pub use controller::{
    busiest_approach, emergency_approach, green_duration, PhaseChange, PhaseReason,
    SignalController, SignalState,
};
pub use intersection::{SimIntersection, TickReport};
pub use queue::ApproachQueues;
pub use spawner::{CadenceSpawner, NoSpawner, ScriptedSpawner, SpawnPolicy, SpawnRequest};
pub use stats::SimulationStats;
pub use types::{
    Approach, Heading, Position, SignalColor, VehicleId, EXIT_MARGIN, FIELD_HEIGHT, FIELD_WIDTH,
    GREEN_PER_VEHICLE, MAX_GREEN, MIN_GREEN, PRIORITY_CHANCE, PRIORITY_SPEED, SPAWN_INTERVAL,
    TICKS_PER_SECOND, VEHICLE_SPEED,
};
pub use vehicle::SimVehicle;
pub use world::SimWorld;
