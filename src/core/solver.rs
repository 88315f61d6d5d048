pub mod solution;
mod state;
pub mod step;

use std::time::{Duration, Instant};

use bon::Builder;

use crate::{
    core::{
        plant::{Plant, PlantId},
        solver::{
            solution::{Solution, Statistics},
            state::SearchState,
            step::Step,
        },
        week::{DAYS_PER_WEEK, WeeklyConsumptionMap},
    },
    error::PlannerError,
    prelude::*,
    quantity::cost::Cost,
};

#[derive(Builder)]
#[builder(finish_fn(vis = ""))]
pub struct Solver<'a> {
    /// Candidate plants in enumeration order, which is also the tie-breaking order.
    plants: &'a [Plant],

    weekly_consumption: &'a WeeklyConsumptionMap,

    #[builder(default = Cost::SWITCHING_PENALTY)]
    switching_penalty: Cost,

    /// Give up when the search is still running after this long.
    time_limit: Option<Duration>,
}

impl<S: solver_builder::IsComplete> SolverBuilder<'_, S> {
    pub fn solve(self) -> Result<Solution, PlannerError> {
        self.build().solve()
    }
}

impl Solver<'_> {
    /// Find the cheapest assignment of plants to the 7 days.
    ///
    /// Depth-first [branch-and-bound][1] over the days. A branch is abandoned as soon as its
    /// accumulated cost cannot beat the best complete schedule found so far. Only strictly
    /// cheaper schedules replace the incumbent, so the first optimum in plant enumeration order
    /// is the one returned.
    ///
    /// [1]: https://en.wikipedia.org/wiki/Branch_and_bound
    #[instrument(skip_all, fields(n_plants = self.plants.len()))]
    fn solve(self) -> Result<Solution, PlannerError> {
        let start_instant = Instant::now();

        let mut candidates = Vec::with_capacity(self.plants.len());
        for plant in self.plants {
            let week = self
                .weekly_consumption
                .get(plant.id)
                .ok_or(PlannerError::MissingWeeklyConsumption(plant.id))?;
            candidates.push(Candidate {
                plant_id: plant.id,
                daily_costs: week.0.map(|amount| amount.as_cost()),
            });
        }
        let first_plant_id = candidates
            .first()
            .map(|candidate| candidate.plant_id)
            .ok_or(PlannerError::NoFeasibleSchedule)?;

        info!(
            switching_penalty = ?self.switching_penalty,
            time_limit = ?self.time_limit,
            "optimizing…",
        );
        let search = Search {
            candidates,
            switching_penalty: self.switching_penalty,
            // A limit too far in the future to represent is no limit.
            deadline: self.time_limit.and_then(|time_limit| {
                Some((start_instant.checked_add(time_limit)?, time_limit))
            }),
        };
        let mut state = SearchState::default();
        let mut partial = [first_plant_id; DAYS_PER_WEEK];
        search.branch(&mut state, &mut partial, 0, None, Cost::ZERO)?;

        let incumbent = state.incumbent.ok_or(PlannerError::NoFeasibleSchedule)?;
        let steps = evaluate(&incumbent.sequence, self.weekly_consumption, self.switching_penalty)?;
        debug_assert!(
            (steps.iter().map(Step::cost).sum::<Cost>() - incumbent.cost).abs() < Cost::from(1e-6),
            "the breakdown should add up to the total cost",
        );

        let statistics = Statistics {
            n_visited: state.n_visited,
            n_pruned: state.n_pruned,
            n_improvements: state.n_improvements,
            elapsed: start_instant.elapsed(),
        };
        info!(
            total_cost = ?incumbent.cost,
            n_visited = statistics.n_visited,
            n_pruned = statistics.n_pruned,
            n_improvements = statistics.n_improvements,
            elapsed = ?statistics.elapsed,
            "optimized",
        );
        Ok(Solution { total_cost: incumbent.cost, steps, statistics })
    }
}

/// Recompute the per-day breakdown of a complete sequence.
///
/// # Errors
///
/// [`PlannerError::MissingWeeklyConsumption`] when a plant of the sequence has no weekly entry.
pub fn evaluate(
    sequence: &[PlantId; DAYS_PER_WEEK],
    weekly_consumption: &WeeklyConsumptionMap,
    switching_penalty: Cost,
) -> Result<[Step; DAYS_PER_WEEK], PlannerError> {
    let mut weeks = Vec::with_capacity(DAYS_PER_WEEK);
    for plant_id in sequence {
        weeks.push(
            weekly_consumption
                .get(*plant_id)
                .ok_or(PlannerError::MissingWeeklyConsumption(*plant_id))?,
        );
    }
    Ok(std::array::from_fn(|day_index| {
        let plant_id = sequence[day_index];
        let is_switch = day_index != 0 && sequence[day_index - 1] != plant_id;
        Step {
            day: day_index + 1,
            plant_id,
            consumption: weeks[day_index][day_index],
            switching_penalty: if is_switch { switching_penalty } else { Cost::ZERO },
        }
    }))
}

/// Plant with its consumption already expressed as cost.
struct Candidate {
    plant_id: PlantId,
    daily_costs: [Cost; DAYS_PER_WEEK],
}

/// Read-only inputs of one search run.
struct Search {
    candidates: Vec<Candidate>,
    switching_penalty: Cost,

    /// Absolute deadline along with the configured time limit for the error message.
    deadline: Option<(Instant, Duration)>,
}

impl Search {
    /// Extend the partial sequence, which is fixed up to `day_index` (exclusive).
    fn branch(
        &self,
        state: &mut SearchState,
        partial: &mut [PlantId; DAYS_PER_WEEK],
        day_index: usize,
        last_plant_id: Option<PlantId>,
        accumulated_cost: Cost,
    ) -> Result<(), PlannerError> {
        state.n_visited += 1;

        if day_index == DAYS_PER_WEEK {
            state.offer(accumulated_cost, *partial);
            return Ok(());
        }

        if let Some((deadline, time_limit)) = self.deadline
            && Instant::now() >= deadline
        {
            warn!(n_visited = state.n_visited, "search deadline exceeded");
            return Err(PlannerError::DeadlineExceeded(time_limit));
        }

        for candidate in &self.candidates {
            let switching_penalty = if last_plant_id.is_some_and(|id| id != candidate.plant_id) {
                self.switching_penalty
            } else {
                Cost::ZERO
            };
            let cost = accumulated_cost + candidate.daily_costs[day_index] + switching_penalty;
            if !state.improves(cost) {
                state.n_pruned += 1;
                continue;
            }
            partial[day_index] = candidate.plant_id;
            self.branch(state, partial, day_index + 1, Some(candidate.plant_id), cost)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use itertools::Itertools;

    use super::*;
    use crate::{core::week::WeeklyConsumption, quantity::energy::KilowattHours};

    fn week(amounts: [f64; DAYS_PER_WEEK]) -> WeeklyConsumption {
        WeeklyConsumption(amounts.map(KilowattHours::from))
    }

    fn fixture(weeks: &[[f64; DAYS_PER_WEEK]]) -> (Vec<Plant>, WeeklyConsumptionMap) {
        let plants = (1..)
            .zip(weeks)
            .map(|(id, _)| Plant::new(PlantId(id), format!("Plant {id}")))
            .collect_vec();
        let map =
            plants.iter().zip(weeks).map(|(plant, amounts)| (plant.id, week(*amounts))).collect();
        (plants, map)
    }

    fn solve(plants: &[Plant], map: &WeeklyConsumptionMap) -> Solution {
        Solver::builder().plants(plants).weekly_consumption(map).solve().unwrap()
    }

    /// Exhaustive minimum over all assignments.
    fn brute_force(plants: &[Plant], map: &WeeklyConsumptionMap) -> Cost {
        itertools::repeat_n(plants.iter().map(|plant| plant.id), DAYS_PER_WEEK)
            .multi_cartesian_product()
            .map(|sequence| {
                let sequence: [PlantId; DAYS_PER_WEEK] = sequence.try_into().unwrap();
                evaluate(&sequence, map, Cost::SWITCHING_PENALTY)
                    .unwrap()
                    .iter()
                    .map(Step::cost)
                    .sum::<Cost>()
            })
            .min()
            .unwrap()
    }

    #[test]
    fn test_cheaper_plant_every_day() {
        let (plants, map) = fixture(&[[10.0; 7], [1.0; 7]]);
        let solution = solve(&plants, &map);
        assert_eq!(solution.sequence(), [PlantId(2); DAYS_PER_WEEK]);
        assert_abs_diff_eq!(f64::from(solution.total_cost), 7.0);
    }

    #[test]
    fn test_single_plant() {
        let (plants, map) = fixture(&[[0.0; 7]]);
        let solution = solve(&plants, &map);
        assert_eq!(solution.sequence(), [PlantId(1); DAYS_PER_WEEK]);
        assert_eq!(solution.total_cost, Cost::ZERO);
        assert!(solution.steps.iter().all(|step| step.switching_penalty == Cost::ZERO));
    }

    #[test]
    fn test_switches_when_worth_it() {
        let (plants, map) = fixture(&[
            [1.0, 1.0, 1.0, 50.0, 50.0, 50.0, 50.0],
            [50.0, 50.0, 50.0, 1.0, 1.0, 1.0, 1.0],
        ]);
        let solution = solve(&plants, &map);
        assert_eq!(solution.sequence().map(|id| id.0), [1, 1, 1, 2, 2, 2, 2]);
        assert_abs_diff_eq!(f64::from(solution.total_cost), 12.0);
        assert_eq!(solution.steps[3].switching_penalty, Cost::SWITCHING_PENALTY);
    }

    #[test]
    fn test_does_not_switch_for_small_gain() {
        let (plants, map) = fixture(&[
            [1.0, 1.0, 1.0, 4.0, 1.0, 1.0, 1.0],
            [9.0, 9.0, 9.0, 0.0, 9.0, 9.0, 9.0],
        ]);
        let solution = solve(&plants, &map);
        assert_eq!(solution.sequence(), [PlantId(1); DAYS_PER_WEEK]);
        assert_abs_diff_eq!(f64::from(solution.total_cost), 10.0);
    }

    #[test]
    fn test_first_optimum_wins_ties() {
        let (plants, map) = fixture(&[[3.0; 7], [3.0; 7], [3.0; 7]]);
        let solution = solve(&plants, &map);
        assert_eq!(solution.sequence(), [PlantId(1); DAYS_PER_WEEK]);
        assert_eq!(solution.statistics.n_improvements, 1);
    }

    #[test]
    fn test_matches_brute_force() {
        let cases = [
            vec![[4.0, 2.0, 8.0, 1.0, 9.0, 3.0, 7.0], [3.0, 9.0, 1.0, 7.0, 2.0, 8.0, 4.0]],
            vec![
                [5.0, 0.0, 12.0, 3.0, 3.0, 11.0, 0.5],
                [0.0, 6.0, 1.0, 9.0, 10.0, 0.0, 4.0],
                [2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5],
            ],
            vec![[0.0; 7], [0.0; 7], [0.0; 7]],
            vec![
                [20.0, 0.0, 20.0, 0.0, 20.0, 0.0, 20.0],
                [0.0, 20.0, 0.0, 20.0, 0.0, 20.0, 0.0],
                [6.0, 6.0, 6.0, 6.0, 6.0, 6.0, 6.0],
            ],
        ];
        for weeks in cases {
            let (plants, map) = fixture(&weeks);
            let solution = solve(&plants, &map);
            assert_abs_diff_eq!(
                f64::from(solution.total_cost),
                f64::from(brute_force(&plants, &map)),
                epsilon = 1e-9,
            );
        }
    }

    #[test]
    fn test_total_cost_matches_recomputation() {
        let (plants, map) = fixture(&[
            [5.0, 0.0, 12.0, 3.0, 3.0, 11.0, 0.5],
            [0.0, 6.0, 1.0, 9.0, 10.0, 0.0, 4.0],
        ]);
        let solution = solve(&plants, &map);
        let sequence = solution.sequence();
        let mut expected = 0.0;
        for (day_index, plant_id) in sequence.iter().enumerate() {
            expected += f64::from(map.get(*plant_id).unwrap()[day_index]);
            if day_index > 0 && sequence[day_index - 1] != *plant_id {
                expected += 5.0;
            }
        }
        assert_abs_diff_eq!(f64::from(solution.total_cost), expected, epsilon = 1e-9);
        assert_eq!(solution.steps.map(|step| step.day), [1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_pruning_skips_branches() {
        let (plants, map) = fixture(&[[10.0; 7], [1.0; 7], [2.0; 7]]);
        let solution = solve(&plants, &map);
        assert!(solution.statistics.n_pruned > 0);
        assert!(solution.statistics.n_visited < 3_u64.pow(7));
    }

    #[test]
    fn test_deterministic() {
        let (plants, map) = fixture(&[
            [4.0, 2.0, 8.0, 1.0, 9.0, 3.0, 7.0],
            [3.0, 9.0, 1.0, 7.0, 2.0, 8.0, 4.0],
            [4.0, 2.0, 8.0, 1.0, 9.0, 3.0, 7.0],
        ]);
        let first = solve(&plants, &map);
        let second = solve(&plants, &map);
        assert_eq!(first.sequence(), second.sequence());
        assert_eq!(first.total_cost, second.total_cost);
    }

    #[test]
    fn test_custom_switching_penalty() {
        let (plants, map) = fixture(&[
            [1.0, 1.0, 1.0, 4.0, 1.0, 1.0, 1.0],
            [9.0, 9.0, 9.0, 0.0, 9.0, 9.0, 9.0],
        ]);
        let solution = Solver::builder()
            .plants(&plants)
            .weekly_consumption(&map)
            .switching_penalty(Cost::ZERO)
            .solve()
            .unwrap();
        assert_eq!(solution.sequence().map(|id| id.0), [1, 1, 1, 2, 1, 1, 1]);
        assert_abs_diff_eq!(f64::from(solution.total_cost), 6.0);
    }

    #[test]
    fn test_no_plants() {
        let map = WeeklyConsumptionMap::default();
        let result = Solver::builder().plants(&[]).weekly_consumption(&map).solve();
        assert!(matches!(result, Err(PlannerError::NoFeasibleSchedule)));
    }

    #[test]
    fn test_missing_weekly_consumption() {
        let (mut plants, map) = fixture(&[[1.0; 7]]);
        plants.push(Plant::new(PlantId(42), "Unlisted"));
        let result = Solver::builder().plants(&plants).weekly_consumption(&map).solve();
        assert!(matches!(result, Err(PlannerError::MissingWeeklyConsumption(PlantId(42)))));
    }

    #[test]
    fn test_zero_time_limit() {
        let (plants, map) = fixture(&[[1.0; 7], [2.0; 7]]);
        let result = Solver::builder()
            .plants(&plants)
            .weekly_consumption(&map)
            .time_limit(Duration::ZERO)
            .solve();
        assert!(matches!(result, Err(PlannerError::DeadlineExceeded(_))));
    }

    #[test]
    fn test_evaluate_charges_every_switch() {
        let (_, map) = fixture(&[[1.0; 7], [2.0; 7]]);
        let sequence = [1, 2, 1, 2, 2, 2, 1].map(PlantId);
        let steps = evaluate(&sequence, &map, Cost::SWITCHING_PENALTY).unwrap();
        let n_switches = steps.iter().filter(|step| step.switching_penalty > Cost::ZERO).count();
        assert_eq!(n_switches, 4);
        assert_abs_diff_eq!(f64::from(steps.iter().map(Step::cost).sum::<Cost>()), 31.0);
    }
}
