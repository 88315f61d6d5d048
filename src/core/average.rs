use chrono::{Datelike, Month};
use derive_more::AddAssign;

use crate::{
    core::{plant::Plant, provider::ConsumptionReader},
    prelude::*,
    quantity::energy::KilowattHours,
};

/// Average daily consumption of a plant over a month.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AverageConsumption {
    pub plant_name: String,
    pub average: KilowattHours,
}

impl AverageConsumption {
    /// Average every plant over the records dated in the given month, regardless of the year.
    ///
    /// Plants without any matching record average to zero. The output follows the plant order.
    #[instrument(skip_all, fields(month = month.number_from_month(), n_plants = plants.len()))]
    pub fn report(plants: &[Plant], reader: &dyn ConsumptionReader, month: Month) -> Vec<Self> {
        plants
            .iter()
            .map(|plant| {
                let accumulator: Accumulator = reader
                    .get_consumption_records(plant.id)
                    .into_iter()
                    .filter(|record| record.date.month() == month.number_from_month())
                    .map(|record| Accumulator { n_records: 1, total: record.amount })
                    .fold(Accumulator::default(), |mut total, delta| {
                        total += delta;
                        total
                    });
                trace!(plant_id = %plant.id, n_records = accumulator.n_records, "averaged");
                Self {
                    plant_name: plant.name.clone(),
                    average: accumulator.average().unwrap_or(KilowattHours::ZERO),
                }
            })
            .collect()
    }
}

#[derive(Copy, Clone, Default, AddAssign)]
struct Accumulator {
    n_records: usize,
    total: KilowattHours,
}

impl Accumulator {
    #[expect(clippy::cast_precision_loss)]
    fn average(self) -> Option<KilowattHours> {
        if self.n_records == 0 { None } else { Some(self.total / self.n_records as f64) }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    use super::*;
    use crate::core::plant::{ConsumptionRecord, PlantId};

    struct Readings(Vec<(PlantId, ConsumptionRecord)>);

    impl ConsumptionReader for Readings {
        fn get_consumption_records(&self, plant_id: PlantId) -> Vec<ConsumptionRecord> {
            self.0.iter().filter(|(id, _)| *id == plant_id).map(|(_, record)| *record).collect()
        }
    }

    fn reading(plant_id: u32, month: u32, day: u32, kwh: f64) -> (PlantId, ConsumptionRecord) {
        let date = NaiveDate::from_ymd_opt(2024, month, day).unwrap();
        (PlantId(plant_id), ConsumptionRecord::new(date, KilowattHours::from(kwh)))
    }

    fn plants() -> Vec<Plant> {
        vec![Plant::new(PlantId(1), "North"), Plant::new(PlantId(2), "South")]
    }

    #[test]
    fn test_mean_over_whole_month() {
        let reader = Readings(vec![
            reading(1, 2, 1, 10.0),
            reading(1, 2, 15, 20.0),
            reading(1, 2, 28, 36.0),
            reading(1, 3, 1, 1000.0),
        ]);
        let report = AverageConsumption::report(&plants(), &reader, Month::February);
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].plant_name, "North");
        assert_abs_diff_eq!(f64::from(report[0].average), 22.0);
    }

    #[test]
    fn test_zero_without_records() {
        let reader = Readings(vec![reading(1, 2, 1, 10.0)]);
        let report = AverageConsumption::report(&plants(), &reader, Month::February);
        assert_eq!(report[1].plant_name, "South");
        assert_eq!(report[1].average, KilowattHours::ZERO);
    }

    #[test]
    fn test_zero_without_records_in_month() {
        let reader = Readings(vec![reading(1, 2, 1, 10.0), reading(2, 4, 3, 7.0)]);
        for month in [Month::January, Month::March, Month::December] {
            let report = AverageConsumption::report(&plants(), &reader, month);
            assert!(report.iter().all(|entry| entry.average == KilowattHours::ZERO));
        }
    }

    #[test]
    fn test_follows_plant_order() {
        let reversed = vec![Plant::new(PlantId(2), "South"), Plant::new(PlantId(1), "North")];
        let report = AverageConsumption::report(&reversed, &Readings(vec![]), Month::July);
        let names: Vec<_> = report.iter().map(|entry| entry.plant_name.as_str()).collect();
        assert_eq!(names, ["South", "North"]);
    }
}
