//! A single signalised four-way intersection
//!
//! Owns the queues and the controller, and runs one tick as decision step
//! followed by the motion and removal pass.

use anyhow::{Context, Result};
use log::{debug, trace};

use super::config::SimConfig;
use super::controller::{PhaseChange, SignalController, SignalState};
use super::queue::ApproachQueues;
use super::stats::SimulationStats;
use super::types::{Approach, VehicleId};
use super::vehicle::SimVehicle;

/// What one tick produced, for display by the caller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub signals: SignalState,
    pub active: Approach,
    /// Phase transition made during this tick, if any
    pub change: Option<PhaseChange>,
}

/// An intersection and the vehicles queued on its four approaches
#[derive(Debug, Clone)]
pub struct SimIntersection {
    config: SimConfig,
    queues: ApproachQueues,
    controller: SignalController,
    next_id: usize,
    stats: SimulationStats,
}

impl SimIntersection {
    /// Build an intersection whose first phase starts at time zero
    pub fn new(config: SimConfig) -> Result<Self> {
        Self::new_at(config, 0.0)
    }

    /// Build an intersection whose first phase starts at `now`
    pub fn new_at(config: SimConfig, now: f64) -> Result<Self> {
        config.validate().context("Invalid intersection configuration")?;
        let controller =
            SignalController::new(config.min_green, config.max_green, config.initial_approach, now);
        Ok(Self {
            config,
            queues: ApproachQueues::new(),
            controller,
            next_id: 0,
            stats: SimulationStats::default(),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn queues(&self) -> &ApproachQueues {
        &self.queues
    }

    pub fn controller(&self) -> &SignalController {
        &self.controller
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    pub fn signals(&self) -> SignalState {
        self.controller.signals()
    }

    pub fn active_approach(&self) -> Approach {
        self.controller.active_approach()
    }

    pub fn queue_size(&self, approach: Approach) -> usize {
        self.queues.size(approach)
    }

    /// Find a queued vehicle by ID
    pub fn vehicle(&self, id: VehicleId) -> Option<&SimVehicle> {
        Approach::ALL
            .into_iter()
            .flat_map(|approach| self.queues.iter(approach))
            .find(|vehicle| vehicle.id() == id)
    }

    /// Put a new vehicle at the spawn point of `approach`
    pub fn spawn(&mut self, approach: Approach, is_priority: bool) -> VehicleId {
        let id = VehicleId(self.next_id);
        self.next_id += 1;

        let spawn = self.config.geometry.get(approach).spawn;
        let speed = self.config.speed_for(is_priority);
        self.queues
            .enqueue(approach, SimVehicle::new(id, approach, is_priority, speed, spawn));
        self.stats.record_spawn(is_priority);

        debug!(
            "Spawned {} {:?} on {} at ({:.0}, {:.0})",
            if is_priority { "priority vehicle" } else { "vehicle" },
            id.0,
            approach,
            spawn.x,
            spawn.y
        );
        id
    }

    /// Advance the intersection by one tick at simulated time `now`
    pub fn tick(&mut self, now: f64) -> TickReport {
        // Decide on the queues as they are before anything moves
        let change = self.controller.decide(&self.queues, now);
        if let Some(change) = &change {
            self.stats.record_phase_change(change);
        }

        let signals = self.controller.signals();
        self.move_vehicles(&signals);
        self.stats.elapsed_time = now;

        trace!(
            "t={:.2}s green={} queues={:?}",
            now,
            signals.green(),
            Approach::ALL.map(|approach| self.queues.size(approach))
        );

        TickReport {
            signals,
            active: signals.green(),
            change,
        }
    }

    /// Move every vehicle that may go, then drop the ones that have left
    fn move_vehicles(&mut self, signals: &SignalState) {
        for approach in Approach::ALL {
            let geometry = *self.config.geometry.get(approach);
            let green = signals.is_green(approach);

            let exited = self.queues.for_each_removable(
                approach,
                |vehicle| vehicle.has_exited(&geometry),
                |vehicle| {
                    if green || vehicle.is_priority() {
                        vehicle.advance(&geometry);
                    }
                },
            );

            if exited > 0 {
                debug!("{} vehicle(s) left via {}", exited, approach);
                self.stats.record_exits(exited);
            }
        }
    }
}
