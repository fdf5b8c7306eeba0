//! Simulation driver that ties the environment and the intersection together
//!
//! This is the entry point for running the simulation headless. Each tick
//! runs to completion: spawn, controller decision, then motion.

use anyhow::Result;

use super::config::SimConfig;
use super::intersection::{SimIntersection, TickReport};
use super::spawner::{CadenceSpawner, NoSpawner, SpawnPolicy};
use super::stats::SimulationStats;
use super::types::{Approach, VehicleId, PRIORITY_CHANCE, SPAWN_INTERVAL};

/// The main simulation world
pub struct SimWorld {
    /// The intersection being simulated
    pub intersection: SimIntersection,

    /// Decides when and where vehicles appear
    spawner: Box<dyn SpawnPolicy>,

    /// Ticks run so far
    ticks: u64,

    /// Simulation time in seconds, kept in `f64` so small deltas still
    /// register after long runs
    pub time: f64,
}

impl SimWorld {
    /// Create a world with a custom spawn policy
    pub fn new(config: SimConfig, spawner: Box<dyn SpawnPolicy>) -> Result<Self> {
        Ok(Self {
            intersection: SimIntersection::new(config)?,
            spawner,
            ticks: 0,
            time: 0.0,
        })
    }

    /// Create a world with the default config and random spawning
    pub fn new_default() -> Result<Self> {
        let spawner = CadenceSpawner::new(SPAWN_INTERVAL, PRIORITY_CHANCE)?;
        Self::new(SimConfig::default(), Box::new(spawner))
    }

    /// Create a world with default spawning driven by a seeded RNG
    pub fn new_with_seed(config: SimConfig, seed: u64) -> Result<Self> {
        let spawner = CadenceSpawner::new_with_seed(SPAWN_INTERVAL, PRIORITY_CHANCE, seed)?;
        Self::new(config, Box::new(spawner))
    }

    /// Create a world where vehicles only appear through [`SimWorld::spawn`]
    pub fn new_without_spawning(config: SimConfig) -> Result<Self> {
        Self::new(config, Box::new(NoSpawner))
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn stats(&self) -> &SimulationStats {
        self.intersection.stats()
    }

    /// Insert a vehicle outside of the spawn policy
    pub fn spawn(&mut self, approach: Approach, is_priority: bool) -> VehicleId {
        self.intersection.spawn(approach, is_priority)
    }

    /// Main simulation tick
    pub fn tick(&mut self, delta_secs: f32) -> TickReport {
        self.ticks += 1;
        self.time += f64::from(delta_secs);

        if let Some(request) = self.spawner.next_spawn(self.ticks) {
            self.intersection.spawn(request.approach, request.is_priority);
        }

        self.intersection.tick(self.time)
    }

    /// Print a summary of the intersection state
    pub fn print_summary(&self) {
        let controller = self.intersection.controller();
        let signals = self.intersection.signals();

        println!("=== Intersection Summary ===");
        println!("Time: {:.2}s (tick {})", self.time, self.ticks);
        println!(
            "GREEN : {} ({:.1}s of {:.1}s left)",
            signals.green(),
            controller.remaining(self.time),
            controller.phase_duration()
        );
        for (approach, color) in signals.iter() {
            let queues = self.intersection.queues();
            let priority = queues.iter(approach).filter(|v| v.is_priority()).count();
            println!(
                "  {:<5} {:<5} queued={} priority={}",
                approach,
                color,
                queues.size(approach),
                priority
            );
        }

        let stats = self.stats();
        println!(
            "Spawned: {}, Exited: {}, Preemptions: {}, Rotations: {}",
            stats.total_vehicles_spawned,
            stats.total_vehicles_exited,
            stats.preemptions,
            stats.rotations
        );
    }
}
