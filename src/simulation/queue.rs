//! Per-approach vehicle queues
//!
//! Plain storage with no policy: the controller reads sizes and priority
//! flags, the motion pass mutates and compacts.

use super::types::Approach;
use super::vehicle::SimVehicle;

/// One arrival-ordered queue per approach, always present for all four
#[derive(Debug, Clone, Default)]
pub struct ApproachQueues {
    queues: [Vec<SimVehicle>; 4],
}

impl ApproachQueues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vehicle to the back of an approach's queue
    pub fn enqueue(&mut self, approach: Approach, vehicle: SimVehicle) {
        self.queues[approach.index()].push(vehicle);
    }

    /// Apply `action` to every vehicle of `approach` in arrival order, then drop
    /// those for which `remove` holds.
    ///
    /// Each vehicle is visited exactly once and `remove` sees the vehicle after
    /// `action` ran. Survivors keep their relative order. Returns the number of
    /// vehicles removed.
    pub fn for_each_removable<P, A>(&mut self, approach: Approach, remove: P, mut action: A) -> usize
    where
        P: Fn(&SimVehicle) -> bool,
        A: FnMut(&mut SimVehicle),
    {
        let queue = &mut self.queues[approach.index()];
        let before = queue.len();
        queue.retain_mut(|vehicle| {
            action(vehicle);
            !remove(vehicle)
        });
        before - queue.len()
    }

    /// Number of vehicles currently queued on `approach`
    pub fn size(&self, approach: Approach) -> usize {
        self.queues[approach.index()].len()
    }

    /// True iff any vehicle queued on `approach` is a priority vehicle
    pub fn any_priority(&self, approach: Approach) -> bool {
        self.queues[approach.index()]
            .iter()
            .any(|vehicle| vehicle.is_priority())
    }

    pub fn iter(&self, approach: Approach) -> impl Iterator<Item = &SimVehicle> {
        self.queues[approach.index()].iter()
    }

    /// Vehicles across all approaches
    pub fn total(&self) -> usize {
        self.queues.iter().map(Vec::len).sum()
    }
}
