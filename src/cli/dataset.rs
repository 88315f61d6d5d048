use std::path::PathBuf;

use clap::Parser;
use plant_planner::{db::Dataset, prelude::*};

#[derive(Parser)]
pub struct DatasetArgs {
    /// TOML file with the plants and their consumption readings.
    #[clap(long = "dataset", env = "DATASET_PATH", default_value = "data/sample.toml")]
    path: PathBuf,
}

impl DatasetArgs {
    pub fn load(&self) -> Result<Dataset> {
        Dataset::from_toml_file(&self.path)
    }
}
