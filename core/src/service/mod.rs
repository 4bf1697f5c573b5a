pub mod aggregator;
pub mod dto;

pub use aggregator::{Aggregator, DayGroups};
pub use dto::{DayGroupDto, TaskDto};
