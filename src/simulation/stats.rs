//! Running counters for a simulated intersection

use log::info;

use super::controller::{PhaseChange, PhaseReason};

/// Statistics collected while the intersection runs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationStats {
    pub total_vehicles_spawned: u32,
    pub priority_vehicles_spawned: u32,
    pub total_vehicles_exited: u32,
    pub active_vehicles: u32,
    pub preemptions: u32,
    pub rotations: u32,
    /// Simulated time of the last tick, in seconds
    pub elapsed_time: f64,
}

impl SimulationStats {
    pub fn record_spawn(&mut self, is_priority: bool) {
        self.total_vehicles_spawned += 1;
        if is_priority {
            self.priority_vehicles_spawned += 1;
        }
        self.active_vehicles += 1;
    }

    pub fn record_exits(&mut self, count: usize) {
        let count = count as u32;
        self.total_vehicles_exited += count;
        self.active_vehicles = self.active_vehicles.saturating_sub(count);
    }

    pub fn record_phase_change(&mut self, change: &PhaseChange) {
        match change.reason {
            PhaseReason::Preempted => self.preemptions += 1,
            PhaseReason::Rotated => self.rotations += 1,
        }
    }

    /// Share of spawned vehicles that made it through, in percent
    pub fn throughput_rate(&self) -> f32 {
        if self.total_vehicles_spawned > 0 {
            (self.total_vehicles_exited as f32 / self.total_vehicles_spawned as f32) * 100.0
        } else {
            0.0
        }
    }

    /// Log the end-of-run report
    pub fn log_completion(&self) {
        info!("=== SIMULATION COMPLETE ===");
        info!("Elapsed time: {:.2}s", self.elapsed_time);
        info!("Total vehicles spawned: {}", self.total_vehicles_spawned);
        info!("Priority vehicles spawned: {}", self.priority_vehicles_spawned);
        info!("Total vehicles exited: {}", self.total_vehicles_exited);
        info!("Active vehicles: {}", self.active_vehicles);
        info!("Preemptions: {}", self.preemptions);
        info!("Rotations: {}", self.rotations);
        info!("Throughput rate: {:.1}%", self.throughput_rate());
    }
}
