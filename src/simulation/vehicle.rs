//! Vehicle movement for the intersection simulation

use super::config::ApproachGeometry;
use super::types::{Approach, Position, VehicleId};

/// A vehicle waiting at, or driving through, the intersection
///
/// Approach, priority flag and speed are fixed at creation. The position is
/// only ever changed by [`SimVehicle::advance`].
#[derive(Debug, Clone, PartialEq)]
pub struct SimVehicle {
    id: VehicleId,
    approach: Approach,
    is_priority: bool,
    speed: f32,
    position: Position,
}

impl SimVehicle {
    pub fn new(
        id: VehicleId,
        approach: Approach,
        is_priority: bool,
        speed: f32,
        position: Position,
    ) -> Self {
        Self {
            id,
            approach,
            is_priority,
            speed,
            position,
        }
    }

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn approach(&self) -> Approach {
        self.approach
    }

    /// Emergency vehicles ignore the signal and trigger preemption
    pub fn is_priority(&self) -> bool {
        self.is_priority
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Move one step along the approach heading
    pub fn advance(&mut self, geometry: &ApproachGeometry) {
        self.position = self.position.offset(geometry.heading, self.speed);
    }

    /// Whether the vehicle has left through the far side of the intersection
    pub fn has_exited(&self, geometry: &ApproachGeometry) -> bool {
        geometry.is_beyond_exit(&self.position)
    }
}
