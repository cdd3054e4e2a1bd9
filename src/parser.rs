use crate::error::{InsightsError, Result};
use chrono::NaiveDate;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Controls how the parser treats rows it cannot interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Drop malformed rows and keep going. Chart consumers rely on this
    /// permissiveness to render sparse or irregular series.
    #[default]
    Lenient,
    /// Reject the whole input on the first malformed row.
    Strict,
}

/// One observation of the portfolio (and optionally the market index).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Date token as it appeared in the source, kept for display and map keys.
    pub date: String,
    /// Resolved calendar date, used for ordering and month grouping.
    pub calendar_date: NaiveDate,
    /// Portfolio value. Fractional source values are truncated, not rounded.
    pub value: i64,
    /// Market-index value, present only when a third column was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<f64>,
}

/// Converts raw delimited text into an ordered, typed point series.
///
/// Construct one explicitly and pass it where it is needed; the token pattern
/// is compiled once per instance.
pub struct SeriesParser {
    token_pattern: Regex,
    mode: ParseMode,
}

impl SeriesParser {
    pub fn new() -> Self {
        Self::with_mode(ParseMode::Lenient)
    }

    pub fn with_mode(mode: ParseMode) -> Self {
        // A token is either quoted (and may then contain commas, e.g.
        // "35,000,000") or an unquoted run of non-separator characters.
        let token_pattern = Regex::new(r#""[^"]*"|[^",]+"#).expect("regex is valid");
        Self {
            token_pattern,
            mode,
        }
    }

    /// Parses newline-delimited text into a series sorted ascending by
    /// calendar date.
    ///
    /// The first line is a header and is discarded unconditionally. In
    /// lenient mode this never fails for textual input; rows that cannot be
    /// interpreted are excluded from the result, and an empty or header-only
    /// input yields an empty series.
    pub fn parse(&self, raw_text: &str) -> Result<Vec<DataPoint>> {
        let mut points = Vec::new();

        for (number, line) in raw_text.lines().enumerate().skip(1) {
            match self.parse_line(line) {
                Ok(Some(point)) => points.push(point),
                Ok(None) => continue,
                Err(details) => match self.mode {
                    ParseMode::Lenient => {
                        debug!("Dropping line {}: {}", number + 1, details);
                    }
                    ParseMode::Strict => {
                        return Err(InsightsError::MalformedLine {
                            line: number + 1,
                            details,
                        });
                    }
                },
            }
        }

        // Stable sort: rows sharing a calendar date keep their input order.
        points.sort_by_key(|p| p.calendar_date);
        Ok(points)
    }

    fn parse_line(&self, line: &str) -> std::result::Result<Option<DataPoint>, String> {
        if line.trim().is_empty() {
            return Ok(None);
        }

        let tokens: Vec<&str> = self
            .token_pattern
            .find_iter(line)
            .map(|m| m.as_str().trim())
            .collect();

        if tokens.len() < 2 {
            return Err(format!(
                "expected at least two fields, found {}",
                tokens.len()
            ));
        }

        let calendar_date = parse_calendar_date(tokens[0])
            .ok_or_else(|| format!("invalid date token '{}'", tokens[0]))?;
        let value = parse_grouped_integer(tokens[1])
            .ok_or_else(|| format!("invalid value token '{}'", tokens[1]))?;
        // A third column that fails to parse leaves the index unset rather
        // than rejecting the row.
        let index = tokens.get(2).and_then(|t| parse_grouped_float(t));

        Ok(Some(DataPoint {
            date: tokens[0].to_string(),
            calendar_date,
            value,
            index,
        }))
    }
}

impl Default for SeriesParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves a `YYYY/MM/DD` token. A token that does not name a real calendar
/// date is rejected so an invalid date can never become a sort key.
fn parse_calendar_date(token: &str) -> Option<NaiveDate> {
    let mut parts = token.split('/');
    let year = parts.next()?.trim().parse().ok()?;
    let month = parts.next()?.trim().parse().ok()?;
    let day = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn strip_grouping(token: &str) -> String {
    token.chars().filter(|c| *c != '"' && *c != ',').collect()
}

fn parse_grouped_integer(token: &str) -> Option<i64> {
    let parsed: f64 = strip_grouping(token).parse().ok()?;
    if !parsed.is_finite() {
        return None;
    }
    // Truncates toward zero: "1100.75" becomes 1100.
    Some(parsed.trunc() as i64)
}

fn parse_grouped_float(token: &str) -> Option<f64> {
    strip_grouping(token).parse().ok()
}
