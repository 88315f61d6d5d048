#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

pub mod core;
pub mod db;
pub mod error;
pub mod planner;
pub mod prelude;
pub mod quantity;
pub mod tables;

pub use self::{
    core::{
        average::AverageConsumption,
        plant::{ConsumptionRecord, Plant, PlantId},
        provider::{ConsumptionReader, PlantRegistry},
        week::{WeeklyConsumption, WeeklyConsumptionMap},
    },
    db::Dataset,
    error::PlannerError,
    planner::{OptimalSchedule, Planner, ScheduledDay},
};
