use jiff::civil::Date;

use crate::{
    error::Error,
    season::{day_type_of, season_of, DayType, Season},
};

pub type BlockId = u32;

/// Half-open clock range `[start_hour:00, end_hour:00)` within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInterval {
    pub block: BlockId,
    pub start_hour: u8,
    pub end_hour: u8,
}
impl BlockInterval {
    const fn new(block: BlockId, start_hour: u8, end_hour: u8) -> Self {
        Self {
            block,
            start_hour,
            end_hour,
        }
    }

    pub fn start_minutes(&self) -> f64 {
        f64::from(self.start_hour) * 60.
    }

    pub fn end_minutes(&self) -> f64 {
        f64::from(self.end_hour) * 60.
    }

    pub fn contains(&self, minutes: f64) -> bool {
        self.start_minutes() <= minutes && minutes < self.end_minutes()
    }

    pub fn is_end_of_day(&self) -> bool {
        self.end_hour == 24
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    pub season: Season,
    pub day_type: DayType,
    pub intervals: &'static [BlockInterval],
}
impl DailySchedule {
    pub fn lookup(season: Season, day_type: DayType) -> Self {
        let intervals = match (season, day_type) {
            (Season::High, DayType::Workday) => &HIGH_WORKDAY,
            (Season::High, DayType::NonWorkingDay) => &HIGH_NON_WORKING_DAY,
            (Season::Low, DayType::Workday) => &LOW_WORKDAY,
            (Season::Low, DayType::NonWorkingDay) => &LOW_NON_WORKING_DAY,
        };
        Self {
            season,
            day_type,
            intervals,
        }
    }

    pub fn for_date(date: Date) -> Self {
        Self::lookup(season_of(date), day_type_of(date))
    }

    /// Index of the interval containing `minutes` since midnight.
    pub fn position(&self, minutes: f64) -> Option<usize> {
        self.intervals.iter().position(|i| i.contains(minutes))
    }

    pub fn first(&self) -> &BlockInterval {
        &self.intervals[0]
    }

    /// Checks that the intervals are ascending, gap-free and cover `[0, 24)`.
    pub fn validate(&self) -> Result<(), Error> {
        let coverage = |reason: String| Error::Coverage {
            season: self.season,
            day_type: self.day_type,
            reason,
        };
        let Some(first) = self.intervals.first() else {
            return Err(coverage("no intervals".to_string()));
        };
        if first.start_hour != 0 {
            return Err(coverage(format!("first interval starts at {}", first.start_hour)));
        }
        for interval in self.intervals {
            if interval.start_hour >= interval.end_hour {
                return Err(coverage(format!(
                    "empty interval {}..{}",
                    interval.start_hour, interval.end_hour
                )));
            }
        }
        for pair in self.intervals.windows(2) {
            if pair[0].end_hour != pair[1].start_hour {
                return Err(coverage(format!(
                    "interval ending at {} is followed by one starting at {}",
                    pair[0].end_hour, pair[1].start_hour
                )));
            }
        }
        let last = self.intervals[self.intervals.len() - 1];
        if !last.is_end_of_day() {
            return Err(coverage(format!("last interval ends at {}", last.end_hour)));
        }
        Ok(())
    }
}

pub fn daily_schedule(now: &jiff::Zoned) -> DailySchedule {
    DailySchedule::for_date(now.date())
}

pub fn validate_schedule_table() -> Result<(), Error> {
    for season in [Season::High, Season::Low] {
        for day_type in [DayType::Workday, DayType::NonWorkingDay] {
            DailySchedule::lookup(season, day_type).validate()?;
        }
    }
    Ok(())
}

const HIGH_WORKDAY: [BlockInterval; 7] = [
    BlockInterval::new(3, 0, 6),
    BlockInterval::new(2, 6, 7),
    BlockInterval::new(1, 7, 14),
    BlockInterval::new(2, 14, 16),
    BlockInterval::new(1, 16, 20),
    BlockInterval::new(2, 20, 22),
    BlockInterval::new(3, 22, 24),
];

const HIGH_NON_WORKING_DAY: [BlockInterval; 7] = [
    BlockInterval::new(4, 0, 6),
    BlockInterval::new(3, 6, 7),
    BlockInterval::new(2, 7, 14),
    BlockInterval::new(3, 14, 16),
    BlockInterval::new(2, 16, 20),
    BlockInterval::new(3, 20, 22),
    BlockInterval::new(4, 22, 24),
];

// Same shape as the high season non-working day.
const LOW_WORKDAY: [BlockInterval; 7] = HIGH_NON_WORKING_DAY;

const LOW_NON_WORKING_DAY: [BlockInterval; 7] = [
    BlockInterval::new(5, 0, 6),
    BlockInterval::new(4, 6, 7),
    BlockInterval::new(3, 7, 14),
    BlockInterval::new(4, 14, 16),
    BlockInterval::new(3, 16, 20),
    BlockInterval::new(4, 20, 22),
    BlockInterval::new(5, 22, 24),
];
