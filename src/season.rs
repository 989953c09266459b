use jiff::civil::{Date, Weekday};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Season {
    /// November through February.
    High,
    Low,
}
impl Season {
    pub fn label(&self) -> &'static str {
        match self {
            Season::High => "High season",
            Season::Low => "Low season",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DayType {
    Workday,
    /// Saturday and Sunday.
    NonWorkingDay,
}
impl DayType {
    pub fn label(&self) -> &'static str {
        match self {
            DayType::Workday => "Workday",
            DayType::NonWorkingDay => "Non-working day",
        }
    }
}

pub fn classify_season(now: &jiff::Zoned) -> Season {
    season_of(now.date())
}

pub fn classify_day_type(now: &jiff::Zoned) -> DayType {
    day_type_of(now.date())
}

pub fn season_of(date: Date) -> Season {
    match date.month() {
        11 | 12 | 1 | 2 => Season::High,
        _ => Season::Low,
    }
}

pub fn day_type_of(date: Date) -> DayType {
    match date.weekday() {
        Weekday::Saturday | Weekday::Sunday => DayType::NonWorkingDay,
        _ => DayType::Workday,
    }
}
