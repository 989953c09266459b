use thiserror::Error;

use crate::season::{DayType, Season};

#[derive(Debug, Error)]
pub enum Error {
    #[error("time arithmetic failed: {0}")]
    Time(#[from] jiff::Error),

    #[error("schedule for {season:?}/{day_type:?} does not cover the day: {reason}")]
    Coverage {
        season: Season,
        day_type: DayType,
        reason: String,
    },

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
}
