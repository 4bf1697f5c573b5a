pub mod calendar;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod usecase;

pub use config::{Config, EmptySourcePolicy};
pub use error::{DateParseError, LoadError, MalformedLineError};
pub use input::{parse_line, split_line, RawTask};
pub use model::task::{Task, TaskKind};
pub use repository::Loader;
pub use service::aggregator::{Aggregator, DayGroups};
pub use service::dto::{DayGroupDto, TaskDto};
pub use usecase::agenda::{AgendaUseCase, AgendaWindow};
