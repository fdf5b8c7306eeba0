//! Spawn policies deciding when and where new vehicles appear
//!
//! Kept apart from the controller so the signal logic stays deterministic.

use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;
use rand::SeedableRng;
use std::collections::VecDeque;

use super::types::Approach;

/// A request to put one vehicle on an approach
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnRequest {
    pub approach: Approach,
    pub is_priority: bool,
}

impl SpawnRequest {
    pub fn new(approach: Approach, is_priority: bool) -> Self {
        Self {
            approach,
            is_priority,
        }
    }
}

/// Decides, given the tick count, whether and where to spawn a vehicle
pub trait SpawnPolicy {
    /// Called once per tick, before the controller runs. `tick` starts at 1.
    fn next_spawn(&mut self, tick: u64) -> Option<SpawnRequest>;
}

/// Never spawns anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpawner;

impl SpawnPolicy for NoSpawner {
    fn next_spawn(&mut self, _tick: u64) -> Option<SpawnRequest> {
        None
    }
}

/// Spawns one vehicle on a random approach each time the idle counter
/// passes `interval`, then starts counting again
pub struct CadenceSpawner {
    interval: u32,
    priority_chance: f64,
    counter: u32,
    /// Optional seeded RNG for reproducible runs
    rng: Option<StdRng>,
}

impl CadenceSpawner {
    fn new_internal(interval: u32, priority_chance: f64, rng: Option<StdRng>) -> Result<Self> {
        if !(0.0..=1.0).contains(&priority_chance) {
            bail!(
                "Priority chance must be between 0 and 1 (got {})",
                priority_chance
            );
        }
        Ok(Self {
            interval,
            priority_chance,
            counter: 0,
            rng,
        })
    }

    pub fn new(interval: u32, priority_chance: f64) -> Result<Self> {
        Self::new_internal(interval, priority_chance, None)
    }

    /// Create a spawner with a seeded RNG for reproducible simulations
    pub fn new_with_seed(interval: u32, priority_chance: f64, seed: u64) -> Result<Self> {
        Self::new_internal(interval, priority_chance, Some(StdRng::seed_from_u64(seed)))
    }

    /// Pick an approach, using seeded RNG if available
    fn choose_approach(&mut self) -> Approach {
        let choice = match &mut self.rng {
            Some(rng) => Approach::ALL.choose(rng).copied(),
            None => Approach::ALL.choose(&mut rand::rng()).copied(),
        };
        // ALL is never empty
        choice.unwrap_or(Approach::Up)
    }

    /// Roll for a priority vehicle, using seeded RNG if available
    fn roll_priority(&mut self) -> bool {
        match &mut self.rng {
            Some(rng) => rng.random_bool(self.priority_chance),
            None => rand::rng().random_bool(self.priority_chance),
        }
    }
}

impl SpawnPolicy for CadenceSpawner {
    fn next_spawn(&mut self, _tick: u64) -> Option<SpawnRequest> {
        self.counter += 1;
        if self.counter <= self.interval {
            return None;
        }
        self.counter = 0;

        let approach = self.choose_approach();
        let is_priority = self.roll_priority();
        Some(SpawnRequest::new(approach, is_priority))
    }
}

/// Replays a fixed list of spawns, each tagged with the tick it happens on
#[derive(Debug, Clone, Default)]
pub struct ScriptedSpawner {
    /// Pending spawns sorted by tick
    pending: VecDeque<(u64, SpawnRequest)>,
}

impl ScriptedSpawner {
    pub fn new(script: impl IntoIterator<Item = (u64, Approach, bool)>) -> Self {
        let mut pending: Vec<(u64, SpawnRequest)> = script
            .into_iter()
            .map(|(tick, approach, is_priority)| (tick, SpawnRequest::new(approach, is_priority)))
            .collect();
        // Stable sort keeps script order for spawns sharing a tick
        pending.sort_by_key(|(tick, _)| *tick);
        Self {
            pending: pending.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl SpawnPolicy for ScriptedSpawner {
    /// Yields at most one spawn per tick; later entries for the same tick slip
    /// to the following ticks.
    fn next_spawn(&mut self, tick: u64) -> Option<SpawnRequest> {
        match self.pending.front() {
            Some((due, _)) if *due <= tick => self.pending.pop_front().map(|(_, request)| request),
            _ => None,
        }
    }
}
