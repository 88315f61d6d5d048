use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
    time::Duration,
};

use bon::Builder;
use chrono::Month;

use crate::{
    core::{
        average::AverageConsumption,
        plant::{Plant, PlantId},
        provider::{ConsumptionReader, PlantRegistry},
        solver::{
            Solver,
            solution::{Solution, Statistics},
        },
        week::{DAYS_PER_WEEK, WeeklyConsumptionMap},
    },
    error::PlannerError,
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours},
};

/// Entry point of the planning operations.
///
/// The planner only borrows its collaborators and keeps no state between the calls,
/// so it may be shared between threads as is.
#[derive(Builder)]
pub struct Planner<'a> {
    registry: &'a dyn PlantRegistry,
    reader: &'a dyn ConsumptionReader,

    #[builder(default = Cost::SWITCHING_PENALTY)]
    switching_penalty: Cost,

    time_limit: Option<Duration>,
}

impl Planner<'_> {
    /// Average daily consumption of every plant over the given month of any year.
    ///
    /// # Errors
    ///
    /// [`PlannerError::InvalidMonth`] unless the month is within `1..=12`.
    #[instrument(skip(self))]
    pub fn compute_average_consumption(
        &self,
        month: u32,
    ) -> Result<Vec<AverageConsumption>, PlannerError> {
        let month = parse_month(month)?;
        Ok(AverageConsumption::report(&self.registry.list_plants(), self.reader, month))
    }

    /// Consumption of every plant on the first 7 days of the given month.
    ///
    /// # Errors
    ///
    /// [`PlannerError::InvalidMonth`] unless the month is within `1..=12`.
    #[instrument(skip(self))]
    pub fn weekly_consumption(&self, month: u32) -> Result<WeeklyConsumptionMap, PlannerError> {
        let month = parse_month(month)?;
        Ok(WeeklyConsumptionMap::extract(&self.registry.list_plants(), self.reader, month))
    }

    /// Cheapest assignment of one plant per day over the first week of the given month.
    ///
    /// # Errors
    ///
    /// - [`PlannerError::InvalidMonth`] unless the month is within `1..=12`
    /// - [`PlannerError::NoFeasibleSchedule`] when the registry is empty
    /// - [`PlannerError::DeadlineExceeded`] when the time limit is set and hit
    #[instrument(skip(self))]
    pub fn compute_optimal_schedule(&self, month: u32) -> Result<OptimalSchedule, PlannerError> {
        let month = parse_month(month)?;

        // Single snapshot for both the extraction and the name lookup.
        let plants = self.registry.list_plants();
        let weekly_consumption = WeeklyConsumptionMap::extract(&plants, self.reader, month);

        let solution = Solver::builder()
            .plants(&plants)
            .weekly_consumption(&weekly_consumption)
            .switching_penalty(self.switching_penalty)
            .maybe_time_limit(self.time_limit)
            .solve()?;

        OptimalSchedule::from_solution(solution, &plants)
    }
}

/// Validate the month number.
///
/// # Errors
///
/// [`PlannerError::InvalidMonth`] unless the month is within `1..=12`.
pub fn parse_month(month: u32) -> Result<Month, PlannerError> {
    u8::try_from(month)
        .ok()
        .and_then(|number| Month::try_from(number).ok())
        .ok_or(PlannerError::InvalidMonth(month))
}

/// Optimal one-week intervention schedule.
#[must_use]
#[derive(Clone, Debug)]
pub struct OptimalSchedule {
    pub days: [ScheduledDay; DAYS_PER_WEEK],
    pub total_cost: Cost,
    pub statistics: Statistics,
}

impl OptimalSchedule {
    /// Attach the plants to the solver steps through a single id lookup.
    fn from_solution(solution: Solution, plants: &[Plant]) -> Result<Self, PlannerError> {
        let lookup: HashMap<PlantId, &Plant> =
            plants.iter().map(|plant| (plant.id, plant)).collect();
        if let Some(step) = solution.steps.iter().find(|step| !lookup.contains_key(&step.plant_id))
        {
            return Err(PlannerError::UnknownPlant(step.plant_id));
        }
        let days = solution.steps.map(|step| ScheduledDay {
            day: step.day,
            plant: lookup[&step.plant_id].clone(),
            consumption: step.consumption,
            switching_penalty: step.switching_penalty,
        });
        Ok(Self { days, total_cost: solution.total_cost, statistics: solution.statistics })
    }

    /// Human-readable labels, one per day: `Day 1: North`.
    pub fn labels(&self) -> impl Iterator<Item = String> + '_ {
        self.days.iter().map(ToString::to_string)
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledDay {
    /// Day of the month, starting from 1.
    pub day: usize,

    pub plant: Plant,
    pub consumption: KilowattHours,
    pub switching_penalty: Cost,
}

impl Display for ScheduledDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Day {}: {}", self.day, self.plant.name)
    }
}
