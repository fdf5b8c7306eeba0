//! Adaptive signal controller
//!
//! A four-state machine, one state per approach. Each decision step first
//! checks for emergency vehicles, then rotates to the busiest approach once
//! the current phase has run out. Timestamps are `f64` seconds so long runs
//! keep sub-tick resolution.

use log::{debug, info};

use super::queue::ApproachQueues;
use super::types::{Approach, SignalColor, GREEN_PER_VEHICLE};

/// Signal colors for all four approaches
///
/// Derived from the single green approach, so exactly one approach is green
/// and the other three are red.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalState {
    green: Approach,
}

impl SignalState {
    pub fn new(green: Approach) -> Self {
        Self { green }
    }

    pub fn green(&self) -> Approach {
        self.green
    }

    pub fn color(&self, approach: Approach) -> SignalColor {
        if approach == self.green {
            SignalColor::Green
        } else {
            SignalColor::Red
        }
    }

    pub fn is_green(&self, approach: Approach) -> bool {
        self.color(approach).is_green()
    }

    /// Colors in canonical approach order
    pub fn iter(&self) -> impl Iterator<Item = (Approach, SignalColor)> + '_ {
        Approach::ALL
            .into_iter()
            .map(move |approach| (approach, self.color(approach)))
    }
}

/// Why the controller changed phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseReason {
    /// A priority vehicle is waiting on a red approach
    Preempted,
    /// The current phase ran out and the busiest approach was picked
    Rotated,
}

/// A phase transition performed by [`SignalController::decide`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseChange {
    pub from: Approach,
    pub to: Approach,
    pub reason: PhaseReason,
    /// Duration of the new phase, in seconds
    pub duration: f32,
}

/// First approach in canonical order holding a priority vehicle
pub fn emergency_approach(queues: &ApproachQueues) -> Option<Approach> {
    Approach::ALL
        .into_iter()
        .find(|&approach| queues.any_priority(approach))
}

/// Approach with the largest queue; ties go to the earliest in canonical order
pub fn busiest_approach(queues: &ApproachQueues) -> Approach {
    let mut best = Approach::ALL[0];
    for approach in Approach::ALL.into_iter().skip(1) {
        if queues.size(approach) > queues.size(best) {
            best = approach;
        }
    }
    best
}

/// Green time for an approach with `queue_len` waiting vehicles, capped at `max_green`
pub fn green_duration(queue_len: usize, min_green: f32, max_green: f32) -> f32 {
    (min_green + GREEN_PER_VEHICLE * queue_len as f32)
        .min(max_green)
        .max(min_green)
}

/// Owns the signal state and the timing of the current phase
#[derive(Debug, Clone)]
pub struct SignalController {
    min_green: f32,
    max_green: f32,
    active: Approach,
    phase_start: f64,
    phase_duration: f32,
}

impl SignalController {
    /// Start with `initial` green for `min_green` seconds from `now`
    ///
    /// Bounds are expected to be validated already (see `SimConfig::validate`).
    pub fn new(min_green: f32, max_green: f32, initial: Approach, now: f64) -> Self {
        Self {
            min_green,
            max_green,
            active: initial,
            phase_start: now,
            phase_duration: min_green,
        }
    }

    pub fn active_approach(&self) -> Approach {
        self.active
    }

    pub fn signals(&self) -> SignalState {
        SignalState::new(self.active)
    }

    pub fn phase_start(&self) -> f64 {
        self.phase_start
    }

    pub fn phase_duration(&self) -> f32 {
        self.phase_duration
    }

    /// Seconds left in the current phase at `now` (zero once expired)
    pub fn remaining(&self, now: f64) -> f32 {
        (self.phase_duration as f64 - (now - self.phase_start)).max(0.0) as f32
    }

    /// Whether the current phase has run past its duration at `now`
    pub fn is_expired(&self, now: f64) -> bool {
        now - self.phase_start > self.phase_duration as f64
    }

    /// Run one decision step against the queues as observed at `now`
    ///
    /// Preemption cuts the current phase short regardless of elapsed time and
    /// leaves `phase_duration` untouched. While a priority vehicle waits on the
    /// green approach nothing changes, not even an expired timer. A timed
    /// rotation recomputes the duration from the new approach's queue.
    pub fn decide(&mut self, queues: &ApproachQueues, now: f64) -> Option<PhaseChange> {
        if let Some(emergency) = emergency_approach(queues) {
            if emergency == self.active {
                return None;
            }
            let change = PhaseChange {
                from: self.active,
                to: emergency,
                reason: PhaseReason::Preempted,
                duration: self.phase_duration,
            };
            self.switch_to(emergency, now);
            info!(
                "Priority vehicle on {}: preempting {} at t={:.2}s",
                change.to, change.from, now
            );
            return Some(change);
        }

        if self.is_expired(now) {
            let from = self.active;
            let next = busiest_approach(queues);
            let queue_len = queues.size(next);
            self.switch_to(next, now);
            self.phase_duration = green_duration(queue_len, self.min_green, self.max_green);
            debug!(
                "Phase expired: {} -> {} (queue={}, green for {:.1}s) at t={:.2}s",
                from, next, queue_len, self.phase_duration, now
            );
            return Some(PhaseChange {
                from,
                to: next,
                reason: PhaseReason::Rotated,
                duration: self.phase_duration,
            });
        }

        None
    }

    fn switch_to(&mut self, approach: Approach, now: f64) {
        self.active = approach;
        self.phase_start = now;
    }
}
