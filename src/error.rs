use std::time::Duration;

use crate::core::plant::PlantId;

/// Failures of the public planning operations.
///
/// None of these are transient: the computations are deterministic, so retrying does not help.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("invalid month {0}, expected a number from 1 to 12")]
    InvalidMonth(u32),

    #[error("no feasible schedule: there are no plants to assign")]
    NoFeasibleSchedule,

    /// The plant is registered but was left out of the weekly consumption.
    #[error("plant {0} is missing from the weekly consumption map")]
    MissingWeeklyConsumption(PlantId),

    /// The schedule refers to a plant absent from the registry snapshot.
    #[error("plant {0} is missing from the registry snapshot")]
    UnknownPlant(PlantId),

    #[error("the schedule search did not finish within {}", humantime::format_duration(*.0))]
    DeadlineExceeded(Duration),
}
