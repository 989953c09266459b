use jiff::{civil::Date, tz::TimeZone, Zoned};
use tracing::{debug, warn};

use crate::{
    error::Error,
    price::{price_for, Rate},
    schedule::{daily_schedule, BlockId, BlockInterval, DailySchedule},
    season::{DayType, Season},
};

/// A schedule interval anchored to a calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockInstance {
    pub season: Season,
    pub day_type: DayType,
    pub block: BlockId,
    pub start: Zoned,
    pub end: Zoned,
}
impl BlockInstance {
    fn anchor(
        date: Date,
        time_zone: &TimeZone,
        schedule: &DailySchedule,
        interval: &BlockInterval,
    ) -> Result<Self, Error> {
        let start = date
            .at(interval.start_hour as i8, 0, 0, 0)
            .to_zoned(time_zone.clone())?;
        // Hour 24 is midnight of the following date
        let end = if interval.is_end_of_day() {
            date.tomorrow()?.at(0, 0, 0, 0)
        } else {
            date.at(interval.end_hour as i8, 0, 0, 0)
        };
        let end = end.to_zoned(time_zone.clone())?;
        Ok(Self {
            season: schedule.season,
            day_type: schedule.day_type,
            block: interval.block,
            start,
            end,
        })
    }

    pub fn contains(&self, time: &Zoned) -> bool {
        &self.start <= time && time < &self.end
    }

    pub fn price(&self) -> Rate {
        price_for(self.block)
    }
}

pub fn minutes_from_midnight(time: &Zoned) -> f64 {
    f64::from(time.hour()) * 60. + f64::from(time.minute()) + f64::from(time.second()) / 60.
}

pub fn current_block(now: &Zoned) -> Result<Option<BlockInstance>, Error> {
    let schedule = daily_schedule(now);
    let minutes = minutes_from_midnight(now);
    let Some(index) = schedule.position(minutes) else {
        warn!(season = ?schedule.season, day_type = ?schedule.day_type, minutes, "No interval covers the time of day");
        return Ok(None);
    };
    let instance = BlockInstance::anchor(
        now.date(),
        now.time_zone(),
        &schedule,
        &schedule.intervals[index],
    )?;
    debug!(block = instance.block, start = %instance.start, end = %instance.end, "Current block");
    Ok(Some(instance))
}

pub fn next_block(now: &Zoned) -> Result<BlockInstance, Error> {
    let schedule = daily_schedule(now);
    let minutes = minutes_from_midnight(now);
    let index = match schedule.position(minutes) {
        Some(index) => index,
        None => {
            warn!(season = ?schedule.season, day_type = ?schedule.day_type, minutes, "No interval covers the time of day");
            schedule
                .intervals
                .iter()
                .position(|i| i.start_minutes() > minutes)
                .unwrap_or_default()
        }
    };

    let instance = match schedule.intervals.get(index + 1) {
        Some(interval) => BlockInstance::anchor(now.date(), now.time_zone(), &schedule, interval)?,
        None => {
            let tomorrow = now.date().tomorrow()?;
            let schedule = DailySchedule::for_date(tomorrow);
            BlockInstance::anchor(tomorrow, now.time_zone(), &schedule, schedule.first())?
        }
    };
    debug!(block = instance.block, start = %instance.start, end = %instance.end, "Next block");
    Ok(instance)
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, tz};

    use super::*;

    fn utc(y: i16, m: i8, d: i8, h: i8, min: i8, s: i8) -> Zoned {
        date(y, m, d).at(h, min, s, 0).to_zoned(TimeZone::UTC).unwrap()
    }

    fn spans(instance: &BlockInstance) -> (BlockId, Date, i8, Date, i8) {
        (
            instance.block,
            instance.start.date(),
            instance.start.hour(),
            instance.end.date(),
            instance.end.hour(),
        )
    }

    #[test]
    fn test_minutes_from_midnight() {
        assert_eq!(minutes_from_midnight(&utc(2024, 3, 3, 0, 0, 0)), 0.);
        assert_eq!(minutes_from_midnight(&utc(2024, 3, 3, 6, 30, 30)), 390.5);
        assert_eq!(minutes_from_midnight(&utc(2024, 3, 3, 23, 59, 0)), 1439.);
    }

    #[test]
    fn test_high_workday_morning() {
        let now = utc(2024, 1, 15, 10, 0, 0);
        let current = current_block(&now).unwrap().unwrap();
        assert_eq!(current.season, Season::High);
        assert_eq!(current.day_type, DayType::Workday);
        assert_eq!(spans(&current), (1, date(2024, 1, 15), 7, date(2024, 1, 15), 14));
        assert_eq!(current.price(), Rate(1.71));

        let next = next_block(&now).unwrap();
        assert_eq!(spans(&next), (2, date(2024, 1, 15), 14, date(2024, 1, 15), 16));
    }

    #[test]
    fn test_low_weekend_rollover() {
        let now = utc(2024, 7, 6, 23, 45, 0);
        let current = current_block(&now).unwrap().unwrap();
        assert_eq!(current.season, Season::Low);
        assert_eq!(current.day_type, DayType::NonWorkingDay);
        assert_eq!(spans(&current), (5, date(2024, 7, 6), 22, date(2024, 7, 7), 0));
        assert!(current.price().is_free());

        let next = next_block(&now).unwrap();
        assert_eq!(next.season, Season::Low);
        assert_eq!(next.day_type, DayType::NonWorkingDay);
        assert_eq!(spans(&next), (5, date(2024, 7, 7), 0, date(2024, 7, 7), 6));
        assert_eq!(next.start, current.end);
    }

    #[test]
    fn test_rollover_changes_classification() {
        // Friday night in February into Saturday
        let now = utc(2024, 2, 23, 22, 0, 0);
        let next = next_block(&now).unwrap();
        assert_eq!(next.day_type, DayType::NonWorkingDay);
        assert_eq!(spans(&next), (4, date(2024, 2, 24), 0, date(2024, 2, 24), 6));

        // Leap day Thursday into the low season
        let now = utc(2024, 2, 29, 23, 30, 0);
        let next = next_block(&now).unwrap();
        assert_eq!(next.season, Season::Low);
        assert_eq!(next.day_type, DayType::Workday);
        assert_eq!(spans(&next), (4, date(2024, 3, 1), 0, date(2024, 3, 1), 6));

        // New year's eve
        let now = utc(2024, 12, 31, 23, 59, 59);
        let next = next_block(&now).unwrap();
        assert_eq!(spans(&next), (3, date(2025, 1, 1), 0, date(2025, 1, 1), 6));
    }

    #[test]
    fn test_boundaries() {
        let now = utc(2024, 1, 16, 14, 0, 0);
        let current = current_block(&now).unwrap().unwrap();
        assert_eq!(spans(&current), (2, date(2024, 1, 16), 14, date(2024, 1, 16), 16));

        let now = utc(2024, 1, 16, 13, 59, 59);
        let current = current_block(&now).unwrap().unwrap();
        assert_eq!(spans(&current), (1, date(2024, 1, 16), 7, date(2024, 1, 16), 14));

        let now = utc(2024, 1, 16, 0, 0, 0);
        let current = current_block(&now).unwrap().unwrap();
        assert_eq!(spans(&current), (3, date(2024, 1, 16), 0, date(2024, 1, 16), 6));
    }

    #[test]
    fn test_every_minute_of_a_week() {
        for day in 1..=7 {
            for minute in (0..24 * 60).step_by(7) {
                let now = utc(2024, 4, day, (minute / 60) as i8, (minute % 60) as i8, 30);
                let current = current_block(&now).unwrap().unwrap();
                assert!(current.contains(&now), "{now}");

                let next = next_block(&now).unwrap();
                assert_eq!(next.start, current.end, "{now}");
                if current.end.date() == now.date() {
                    assert_eq!(next.start.date(), current.start.date(), "{now}");
                } else {
                    let tomorrow = now.date().tomorrow().unwrap();
                    let first = DailySchedule::for_date(tomorrow).first().block;
                    assert_eq!(next.start.date(), tomorrow, "{now}");
                    assert_eq!(next.start.hour(), 0, "{now}");
                    assert_eq!(next.block, first, "{now}");
                }
            }
        }
    }

    #[test]
    fn test_keeps_time_zone() {
        let zone = TimeZone::fixed(tz::offset(2));
        let now = date(2024, 11, 9).at(21, 15, 0, 0).to_zoned(zone).unwrap();
        let current = current_block(&now).unwrap().unwrap();
        assert_eq!(current.start.offset(), tz::offset(2));
        assert_eq!(spans(&current), (3, date(2024, 11, 9), 20, date(2024, 11, 9), 22));
        let next = next_block(&now).unwrap();
        assert_eq!(next.end.offset(), tz::offset(2));
        assert_eq!(spans(&next), (4, date(2024, 11, 9), 22, date(2024, 11, 10), 0));
    }
}
