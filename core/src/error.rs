use std::io;
use std::path::PathBuf;

use crate::model::task::TaskKind;

/// A source line without the `:` between date and text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid line [{line}]: missing ':' between date and text")]
pub struct MalformedLineError {
    pub line: String,
}

/// A date specification rejected while building a task.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DateParseError {
    #[error("invalid weekday [{0}]")]
    InvalidWeekday(String),

    #[error("invalid month [{0}]")]
    InvalidMonth(String),

    #[error("invalid day [{0}], expected a number from 1 to 31")]
    InvalidDay(String),

    #[error("invalid year [{0}], expected a number from 0 to 9999")]
    InvalidYear(String),

    #[error("too many months in [{0}], at most 12 are allowed")]
    TooManyMonths(String),

    #[error("invalid {kind} date [{spec}]")]
    Malformed { kind: TaskKind, spec: String },
}

/// Fatal errors raised while loading source files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: failed to load line: {source}", path.display())]
    MalformedLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: MalformedLineError,
    },

    #[error("{}:{line}: failed to parse line: {source}", path.display())]
    DateParse {
        path: PathBuf,
        line: usize,
        #[source]
        source: DateParseError,
    },

    #[error("{}: failed to load any tasks", path.display())]
    EmptySource { path: PathBuf },

    #[error("task channel closed before loading finished")]
    ChannelClosed,

    #[error("loader worker failed: {0}")]
    Worker(String),
}
