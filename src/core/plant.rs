use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::quantity::energy::KilowattHours;

/// Stable plant identifier.
#[derive(
    Copy,
    Clone,
    Debug,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
    derive_more::FromStr,
)]
#[serde(transparent)]
pub struct PlantId(pub u32);

/// Monitored energy-consuming installation.
#[must_use]
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plant {
    pub id: PlantId,
    pub name: String,
}

impl Plant {
    pub fn new(id: PlantId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// Single dated consumption reading of a plant.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConsumptionRecord {
    pub date: NaiveDate,
    pub amount: KilowattHours,
}

impl ConsumptionRecord {
    pub const fn new(date: NaiveDate, amount: KilowattHours) -> Self {
        Self { date, amount }
    }
}
