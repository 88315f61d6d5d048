use std::time::Duration;

use crate::{
    core::{plant::PlantId, solver::step::Step, week::DAYS_PER_WEEK},
    quantity::cost::Cost,
};

#[must_use]
pub struct Solution {
    /// Minimum total cost, as accumulated by the search.
    pub total_cost: Cost,

    pub steps: [Step; DAYS_PER_WEEK],
    pub statistics: Statistics,
}

impl Solution {
    pub fn sequence(&self) -> [PlantId; DAYS_PER_WEEK] {
        self.steps.map(|step| step.plant_id)
    }
}

/// Search effort spent on a solution.
#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct Statistics {
    pub n_visited: u64,
    pub n_pruned: u64,
    pub n_improvements: u64,
    pub elapsed: Duration,
}
