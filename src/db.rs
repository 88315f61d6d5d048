use std::{collections::BTreeMap, fmt::Debug, fs, path::Path};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    core::{
        plant::{ConsumptionRecord, Plant, PlantId},
        provider::{ConsumptionReader, PlantRegistry},
    },
    prelude::*,
    quantity::energy::KilowattHours,
};

/// Validated in-memory plants and their consumption history.
#[must_use]
#[derive(Debug, Default)]
pub struct Dataset {
    /// Plants in file order.
    plants: Vec<Plant>,

    /// Records in file order.
    records: BTreeMap<PlantId, Vec<ConsumptionRecord>>,
}

impl Dataset {
    #[instrument(name = "reading the dataset…")]
    pub fn from_toml_file<P: AsRef<Path> + Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid dataset `{}`", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: DatasetFile = toml::from_str(contents).context("failed to parse the dataset")?;
        let readings = file.readings.into_iter().map(|reading| {
            (reading.plant_id, ConsumptionRecord::new(reading.date, reading.amount))
        });
        Self::new(file.plants, readings)
    }

    pub fn new(
        plants: Vec<Plant>,
        readings: impl IntoIterator<Item = (PlantId, ConsumptionRecord)>,
    ) -> Result<Self> {
        let mut records: BTreeMap<PlantId, Vec<ConsumptionRecord>> = BTreeMap::new();
        for plant in &plants {
            ensure!(
                records.insert(plant.id, Vec::new()).is_none(),
                "plant #{} is defined more than once",
                plant.id,
            );
        }
        for (plant_id, record) in readings {
            ensure!(
                record.amount.is_finite() && record.amount.is_non_negative(),
                "reading of plant #{plant_id} on {} has invalid amount {:?}",
                record.date,
                record.amount,
            );
            let plant_records = records.get_mut(&plant_id).with_context(|| {
                format!("reading on {} refers to unknown plant #{plant_id}", record.date)
            })?;
            plant_records.push(record);
        }
        let n_records: usize = records.values().map(Vec::len).sum();
        info!(n_plants = plants.len(), n_records, "loaded");
        Ok(Self { plants, records })
    }
}

impl PlantRegistry for Dataset {
    fn list_plants(&self) -> Vec<Plant> {
        self.plants.clone()
    }
}

impl ConsumptionReader for Dataset {
    fn get_consumption_records(&self, plant_id: PlantId) -> Vec<ConsumptionRecord> {
        self.records.get(&plant_id).cloned().unwrap_or_default()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DatasetFile {
    #[serde(default)]
    plants: Vec<Plant>,

    #[serde(default)]
    readings: Vec<Reading>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Reading {
    plant_id: PlantId,
    date: NaiveDate,

    #[serde(rename = "kwh")]
    amount: KilowattHours,
}
