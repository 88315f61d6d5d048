use crate::{
    core::plant::PlantId,
    quantity::{cost::Cost, energy::KilowattHours},
};

/// Single day of a complete schedule.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Step {
    /// Day of the month, starting from 1.
    pub day: usize,

    pub plant_id: PlantId,
    pub consumption: KilowattHours,

    /// Zero unless the previous day went to another plant.
    pub switching_penalty: Cost,
}

impl Step {
    pub fn cost(&self) -> Cost {
        self.consumption.as_cost() + self.switching_penalty
    }
}
