use std::fmt::Write as _;

use anyhow::Result;
use calendar_tasks_core::{AgendaWindow, DayGroupDto, DayGroups, TaskDto};
use chrono::{NaiveDate, TimeZone};
use crossterm::style::Stylize;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

const DAY_FORMAT: &str = "[%a] %b %-d %Y";
const NO_TASKS: &str = "no tasks";

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    List,
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tense {
    Past,
    Today,
    Future,
}

/// The non-empty days of the window in order, tasks sorted by text
/// ignoring case.
pub fn day_groups<Tz: TimeZone>(groups: &DayGroups, window: &AgendaWindow<Tz>) -> Vec<DayGroupDto> {
    let back = window.back();
    (0..=i64::from(window.num_days))
        .filter_map(|offset| {
            let tasks = groups.get(&offset).filter(|tasks| !tasks.is_empty())?;
            let mut tasks: Vec<TaskDto> = tasks
                .iter()
                .map(|task| TaskDto::from_entity(task, offset + back))
                .collect();
            tasks.sort_by_key(|task| task.text.to_lowercase());
            Some(DayGroupDto {
                offset,
                date: window.date_at(offset),
                tasks,
            })
        })
        .collect()
}

pub fn render(format: Format, days: &[DayGroupDto], today: NaiveDate, color: bool) -> Result<String> {
    Ok(match format {
        Format::List => render_list(days, today, color),
        Format::Table => render_table(days, today, color),
        Format::Json => serde_json::to_string_pretty(days)?,
    })
}

fn tense(date: NaiveDate, today: NaiveDate) -> Tense {
    match date.cmp(&today) {
        std::cmp::Ordering::Less => Tense::Past,
        std::cmp::Ordering::Equal => Tense::Today,
        std::cmp::Ordering::Greater => Tense::Future,
    }
}

fn day_header(date: NaiveDate, today: NaiveDate) -> String {
    let header = date.format(DAY_FORMAT).to_string();
    if date == today {
        format!("{header} (today)")
    } else {
        header
    }
}

fn paint(text: &str, tense: Tense, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match tense {
        Tense::Today => text.dark_yellow().to_string(),
        Tense::Past => text.dark_blue().to_string(),
        Tense::Future => text.grey().to_string(),
    }
}

fn render_list(days: &[DayGroupDto], today: NaiveDate, color: bool) -> String {
    let mut out = String::new();
    for day in days {
        let tense = tense(day.date, today);
        let _ = writeln!(out, "{}", paint(&day_header(day.date, today), tense, color));
        for task in &day.tasks {
            let _ = writeln!(out, "{}", paint(&format!("\t-{}", task.text), tense, color));
        }
    }
    if out.is_empty() {
        out.push_str(NO_TASKS);
        out.push('\n');
    }
    out
}

#[derive(Tabled)]
struct AgendaRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "In")]
    days: String,
    #[tabled(rename = "Task")]
    text: String,
}

fn relative_days(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "1 day".to_string(),
        -1 => "1 day ago".to_string(),
        d if d < 0 => format!("{} days ago", -d),
        d => format!("{d} days"),
    }
}

fn render_table(days: &[DayGroupDto], today: NaiveDate, color: bool) -> String {
    if days.is_empty() {
        return format!("{NO_TASKS}\n");
    }

    let mut rows = Vec::new();
    for day in days {
        let header = day_header(day.date, today);
        for (i, task) in day.tasks.iter().enumerate() {
            // Date column only on the first row of the day
            rows.push(AgendaRow {
                date: if i == 0 { header.clone() } else { String::new() },
                days: relative_days(task.days),
                text: task.text.clone(),
            });
        }
    }

    let mut table = Table::new(rows);
    table.with(Style::modern());
    if color {
        table.with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    }
    format!("{table}\n")
}
