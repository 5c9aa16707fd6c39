//! Free-form duration input such as `90m`, `1h`, `1.5h` or `1h30m`.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:(\d+(?:\.\d+)?|\.\d+)\s*h)?\s*(?:(\d+)\s*m)?\s*$").unwrap()
});

pub const DURATION_HINT: &str = "(ex. 60m / 1h / 1h30m)";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid duration {0:?}, use formats like 60m, 1h or 1h30m")]
    Malformed(String),
}

/// A non-negative amount of time in hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedDuration {
    pub hours: f64,
}

impl ParsedDuration {
    pub fn total_minutes(&self) -> u64 {
        (self.hours * 60.0).round() as u64
    }
}

impl fmt::Display for ParsedDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.total_minutes();
        write!(f, "{}h{}m", minutes / 60, minutes % 60)
    }
}

impl std::str::FromStr for ParsedDuration {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parse `input` into hours.
///
/// The hour segment may carry a decimal point, the minute segment may not. Hours must come
/// before minutes and at least one of them has to be present.
///
/// ```ignore
/// assert_eq!(parse("1h30m")?.hours, 1.5);
/// assert_eq!(parse("90m")?.hours, 1.5);
/// ```
pub fn parse(input: &str) -> Result<ParsedDuration, ParseError> {
    let malformed = || ParseError::Malformed(input.trim().to_string());

    let captures = DURATION_PATTERN.captures(input).ok_or_else(malformed)?;
    let hours_text = captures.get(1).map(|m| m.as_str());
    let minutes_text = captures.get(2).map(|m| m.as_str());

    if hours_text.is_none() && minutes_text.is_none() {
        return Err(malformed());
    }

    let mut hours = 0.0;
    if let Some(text) = hours_text {
        hours += text.parse::<f64>().map_err(|_| malformed())?;
    }
    if let Some(text) = minutes_text {
        let minutes = text.parse::<u32>().map_err(|_| malformed())?;
        hours += f64::from(minutes) / 60.0;
    }

    if !hours.is_finite() {
        return Err(malformed());
    }

    Ok(ParsedDuration { hours })
}
