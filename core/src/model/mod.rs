pub mod annual;
pub mod monthly;
pub mod multi_date;
pub mod single;
pub mod task;
pub mod weekly;

pub use annual::Annual;
pub use monthly::Monthly;
pub use multi_date::{MonthDay, MultiDate};
pub use single::Single;
pub use task::{Task, TaskKind};
pub use weekly::Weekly;

use chrono::Month;

use crate::calendar::parse_month;
use crate::error::DateParseError;

fn parse_day(s: &str) -> Result<u32, DateParseError> {
    match s.parse::<u32>() {
        Ok(day) if (1..=31).contains(&day) => Ok(day),
        _ => Err(DateParseError::InvalidDay(s.to_string())),
    }
}

fn parse_month_name(s: &str) -> Result<Month, DateParseError> {
    parse_month(s).ok_or_else(|| DateParseError::InvalidMonth(s.to_string()))
}
