use std::time::Duration;

use clap::Parser;
use plant_planner::{prelude::*, quantity::cost::Cost};

#[derive(Parser)]
pub struct SearchArgs {
    /// Cost of handing the intervention over to another plant between two consecutive days.
    #[clap(long, env, default_value = "5")]
    switching_penalty: Cost,

    /// Abort the schedule search after this long, for example `500ms` or `2s`.
    #[clap(long = "time-limit", env = "SEARCH_TIME_LIMIT")]
    time_limit: Option<humantime::Duration>,
}

impl SearchArgs {
    pub fn switching_penalty(&self) -> Result<Cost> {
        ensure!(
            self.switching_penalty.is_finite() && self.switching_penalty >= Cost::ZERO,
            "switching penalty must be a finite non-negative number, got {}",
            self.switching_penalty,
        );
        Ok(self.switching_penalty)
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit.map(Into::into)
    }
}
