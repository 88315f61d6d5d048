use std::{
    collections::BTreeMap,
    ops::{Index, RangeInclusive},
};

use chrono::{Datelike, Month};

use crate::{
    core::{
        plant::{Plant, PlantId},
        provider::ConsumptionReader,
    },
    prelude::*,
    quantity::energy::KilowattHours,
};

pub const DAYS_PER_WEEK: usize = 7;

/// Days of the month that make up the scheduling window.
pub const WINDOW: RangeInclusive<u32> = 1..=7;

/// Consumption of a single plant on days 1 through 7 of a month.
///
/// Index `0` is the first day of the month.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WeeklyConsumption(pub [KilowattHours; DAYS_PER_WEEK]);

impl WeeklyConsumption {
    pub const ZERO: Self = Self([KilowattHours::ZERO; DAYS_PER_WEEK]);

    pub fn iter(&self) -> impl Iterator<Item = KilowattHours> + '_ {
        self.0.iter().copied()
    }

    pub fn total(&self) -> KilowattHours {
        self.iter().sum()
    }
}

impl Index<usize> for WeeklyConsumption {
    type Output = KilowattHours;

    fn index(&self, day_index: usize) -> &Self::Output {
        &self.0[day_index]
    }
}

/// Weekly consumption of every known plant.
#[must_use]
#[derive(Clone, Debug, Default)]
pub struct WeeklyConsumptionMap(BTreeMap<PlantId, WeeklyConsumption>);

impl WeeklyConsumptionMap {
    /// Collect the first-week consumption of the plants in the given month.
    ///
    /// Days without a reading stay at zero. When a plant has several readings on the same day,
    /// the last one returned by the reader wins.
    #[instrument(skip_all, fields(month = month.number_from_month(), n_plants = plants.len()))]
    pub fn extract(plants: &[Plant], reader: &dyn ConsumptionReader, month: Month) -> Self {
        let mut map: BTreeMap<PlantId, WeeklyConsumption> =
            plants.iter().map(|plant| (plant.id, WeeklyConsumption::ZERO)).collect();

        for plant in plants {
            let week = map.entry(plant.id).or_default();
            let mut n_matched = 0_usize;
            for record in reader.get_consumption_records(plant.id) {
                let day = record.date.day();
                if record.date.month() == month.number_from_month() && WINDOW.contains(&day) {
                    week.0[(day - 1) as usize] = record.amount;
                    n_matched += 1;
                }
            }
            trace!(plant_id = %plant.id, n_matched, "extracted");
        }

        Self(map)
    }

    pub fn get(&self, plant_id: PlantId) -> Option<&WeeklyConsumption> {
        self.0.get(&plant_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(PlantId, WeeklyConsumption)> for WeeklyConsumptionMap {
    fn from_iter<T: IntoIterator<Item = (PlantId, WeeklyConsumption)>>(iterator: T) -> Self {
        Self(iterator.into_iter().collect())
    }
}
