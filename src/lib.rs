pub mod error;
pub mod price;
pub mod refresh;
pub mod resolver;
pub mod schedule;
pub mod season;
pub mod view;

pub use error::Error;
pub use price::{price_for, Rate};
pub use resolver::{current_block, next_block, BlockInstance};
pub use schedule::{daily_schedule, BlockId, BlockInterval, DailySchedule};
pub use season::{classify_day_type, classify_season, DayType, Season};

/// Source of the local wall-clock time.
pub trait Clock: core::fmt::Debug + Sync + Send {
    fn now(&self) -> jiff::Zoned;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&self) -> jiff::Zoned {
        jiff::Zoned::now()
    }
}
