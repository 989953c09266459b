use std::io::Write;

use jiff::{civil::Date, Zoned};
use serde::Serialize;

use crate::{
    error::Error,
    price::{price_for, Rate},
    resolver::{current_block, next_block, BlockInstance},
    schedule::{BlockId, DailySchedule},
    season::{DayType, Season},
};

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRow {
    pub block: BlockId,
    pub start_hour: u8,
    pub end_hour: u8,
    pub price: Rate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayView {
    pub date: Date,
    pub season: Season,
    pub day_type: DayType,
    pub rows: Vec<ScheduleRow>,
}

pub fn day_view(date: Date) -> DayView {
    let schedule = DailySchedule::for_date(date);
    let rows = schedule
        .intervals
        .iter()
        .map(|interval| ScheduleRow {
            block: interval.block,
            start_hour: interval.start_hour,
            end_hour: interval.end_hour,
            price: price_for(interval.block),
        })
        .collect();
    DayView {
        date,
        season: schedule.season,
        day_type: schedule.day_type,
        rows,
    }
}

/// Current and next block plus the full schedules of today and tomorrow.
#[derive(Debug, Clone)]
pub struct TwoDayView {
    pub now: Zoned,
    pub current: Option<BlockInstance>,
    pub next: BlockInstance,
    pub today: DayView,
    pub tomorrow: DayView,
}
impl TwoDayView {
    pub fn at(now: &Zoned) -> Result<Self, Error> {
        let today = now.date();
        let tomorrow = today.tomorrow()?;
        Ok(Self {
            now: now.clone(),
            current: current_block(now)?,
            next: next_block(now)?,
            today: day_view(today),
            tomorrow: day_view(tomorrow),
        })
    }

    pub fn days(&self) -> [&DayView; 2] {
        [&self.today, &self.tomorrow]
    }

    pub fn write_csv<W>(&self, writer: W) -> Result<(), Error>
    where
        W: Write,
    {
        let mut writer = csv::Writer::from_writer(writer);
        for day in self.days() {
            for row in &day.rows {
                writer.serialize(CsvRow {
                    date: day.date.to_string(),
                    block: row.block,
                    from: clock_hour(row.start_hour),
                    to: clock_hour(row.end_hour),
                    price: row.price.to_string(),
                })?;
            }
        }
        writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

#[derive(Serialize)]
struct CsvRow {
    date: String,
    block: BlockId,
    from: String,
    to: String,
    price: String,
}

fn clock_hour(hour: u8) -> String {
    format!("{hour:02}:00")
}
