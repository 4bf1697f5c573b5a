use crate::error::MalformedLineError;

const DATE_TEXT_SEPARATOR: char = ':';
const DATE_LIST_SEPARATOR: char = '/';

/// One (date specification, text) pair read from a source line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTask {
    pub date: String,
    pub text: String,
}

impl RawTask {
    pub fn new(date: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            text: text.into(),
        }
    }
}

/// Splits a line on its first `:` without expanding the date part.
pub fn split_line(line: &str) -> Result<RawTask, MalformedLineError> {
    let (date, text) = line
        .split_once(DATE_TEXT_SEPARATOR)
        .ok_or_else(|| MalformedLineError {
            line: line.to_string(),
        })?;

    Ok(RawTask::new(date.trim(), clean_text(text)))
}

/// Splits a line on its first `:` and expands a `/`-delimited date list into
/// one pair per date, all sharing the same text.
pub fn parse_line(line: &str) -> Result<Vec<RawTask>, MalformedLineError> {
    let raw = split_line(line)?;

    Ok(raw
        .date
        .split(DATE_LIST_SEPARATOR)
        .map(|date| RawTask::new(date.trim(), raw.text.clone()))
        .collect())
}

fn clean_text(s: &str) -> &str {
    s.trim_start_matches(' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_line() {
        assert_eq!(split_line("foo:bar").unwrap(), RawTask::new("foo", "bar"));
        assert_eq!(split_line("foo:  bar").unwrap(), RawTask::new("foo", "bar"));
        assert_eq!(split_line("foo:bar:baz").unwrap(), RawTask::new("foo", "bar:baz"));
        assert_eq!(split_line("april/may 12: taxes").unwrap(), RawTask::new("april/may 12", "taxes"));
        assert_eq!(split_line("15:").unwrap(), RawTask::new("15", ""));
    }

    #[test]
    fn test_split_line_errors() {
        assert!(split_line("").is_err());
        assert!(split_line("    ").is_err());
        assert!(split_line("foobar").is_err());

        let err = split_line("Saturday cook").unwrap_err();
        assert_eq!(err.line, "Saturday cook");
    }

    #[test]
    fn test_parse_line_single_date() {
        let raws = parse_line("Saturday: cook").unwrap();
        assert_eq!(raws, vec![RawTask::new("Saturday", "cook")]);
    }

    #[test]
    fn test_parse_line_expands_date_list() {
        let raws = parse_line("Saturday/Sunday: cook").unwrap();
        assert_eq!(
            raws,
            vec![RawTask::new("Saturday", "cook"), RawTask::new("Sunday", "cook")]
        );

        let raws = parse_line("4/25/31:   pay bills").unwrap();
        let dates: Vec<&str> = raws.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["4", "25", "31"]);
        assert!(raws.iter().all(|r| r.text == "pay bills"));
    }

    #[test]
    fn test_parse_line_trims_dates() {
        let raws = parse_line(" Saturday / Sunday : cook").unwrap();
        assert_eq!(
            raws,
            vec![RawTask::new("Saturday", "cook"), RawTask::new("Sunday", "cook")]
        );
    }

    #[test]
    fn test_parse_line_keeps_text_separators() {
        let raws = parse_line("mon: a/b: c").unwrap();
        assert_eq!(raws, vec![RawTask::new("mon", "a/b: c")]);
    }
}
