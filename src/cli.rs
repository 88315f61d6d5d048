mod dataset;
mod search;

use clap::{Parser, Subcommand};
use itertools::Itertools;
use plant_planner::{
    core::provider::PlantRegistry,
    planner::Planner,
    prelude::*,
    tables::{build_averages_table, build_schedule_table, build_weekly_table},
};

use crate::cli::{dataset::DatasetArgs, search::SearchArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the average daily consumption of every plant in the month.
    #[clap(name = "average")]
    Average(AverageArgs),

    /// Print the first-week consumption of every plant in the month.
    #[clap(name = "week")]
    Week(WeekArgs),

    /// Main command: find the cheapest first-week intervention schedule.
    #[clap(name = "schedule")]
    Schedule(ScheduleArgs),
}

impl Command {
    pub fn run(self) -> Result {
        match self {
            Self::Average(args) => args.run(),
            Self::Week(args) => args.run(),
            Self::Schedule(args) => args.run(),
        }
    }
}

#[derive(Parser)]
pub struct MonthArgs {
    /// Month number from 1 (January) to 12 (December), matched across all years.
    #[clap(long, short)]
    month: u32,
}

#[derive(Parser)]
pub struct AverageArgs {
    #[clap(flatten)]
    dataset: DatasetArgs,

    #[clap(flatten)]
    month: MonthArgs,
}

impl AverageArgs {
    fn run(self) -> Result {
        let dataset = self.dataset.load()?;
        let planner = Planner::builder().registry(&dataset).reader(&dataset).build();
        let averages = planner.compute_average_consumption(self.month.month)?;
        println!("{}", build_averages_table(&averages));
        Ok(())
    }
}

#[derive(Parser)]
pub struct WeekArgs {
    #[clap(flatten)]
    dataset: DatasetArgs,

    #[clap(flatten)]
    month: MonthArgs,
}

impl WeekArgs {
    fn run(self) -> Result {
        let dataset = self.dataset.load()?;
        let planner = Planner::builder().registry(&dataset).reader(&dataset).build();
        let weekly_consumption = planner.weekly_consumption(self.month.month)?;
        let plants = dataset.list_plants();
        println!("{}", build_weekly_table(&plants, &weekly_consumption));
        Ok(())
    }
}

#[derive(Parser)]
pub struct ScheduleArgs {
    #[clap(flatten)]
    dataset: DatasetArgs,

    #[clap(flatten)]
    month: MonthArgs,

    #[clap(flatten)]
    search: SearchArgs,
}

impl ScheduleArgs {
    #[instrument(skip_all, fields(month = self.month.month))]
    fn run(self) -> Result {
        let dataset = self.dataset.load()?;
        let planner = Planner::builder()
            .registry(&dataset)
            .reader(&dataset)
            .switching_penalty(self.search.switching_penalty()?)
            .maybe_time_limit(self.search.time_limit())
            .build();
        let schedule = planner
            .compute_optimal_schedule(self.month.month)
            .context("failed to compute the optimal schedule")?;
        println!("{}", build_schedule_table(&schedule));
        info!(
            total_cost = %schedule.total_cost,
            days = schedule.labels().join(", "),
            "scheduled",
        );
        Ok(())
    }
}
