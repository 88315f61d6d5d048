use crate::{
    core::{plant::PlantId, week::DAYS_PER_WEEK},
    prelude::*,
    quantity::cost::Cost,
};

/// Best complete sequence found so far.
#[derive(Copy, Clone, Debug)]
pub struct Incumbent {
    pub cost: Cost,
    pub sequence: [PlantId; DAYS_PER_WEEK],
}

/// Mutable state of a single search run.
///
/// A fresh state is created for every [`super::Solver::solve`] call, so concurrent searches
/// never observe each other's bound.
#[derive(Default)]
pub struct SearchState {
    /// [`None`] stands for the infinite bound before the first complete sequence.
    pub incumbent: Option<Incumbent>,

    pub n_visited: u64,
    pub n_pruned: u64,
    pub n_improvements: u64,
}

impl SearchState {
    /// Check whether the cost beats the bound.
    ///
    /// Ties are not improvements: the first sequence to reach the optimum is kept.
    pub fn improves(&self, cost: Cost) -> bool {
        self.incumbent.is_none_or(|incumbent| cost < incumbent.cost)
    }

    /// Record the complete sequence if it beats the incumbent.
    pub fn offer(&mut self, cost: Cost, sequence: [PlantId; DAYS_PER_WEEK]) {
        if self.improves(cost) {
            self.n_improvements += 1;
            debug!(?cost, ?sequence, "improved");
            self.incumbent = Some(Incumbent { cost, sequence });
        }
    }
}
