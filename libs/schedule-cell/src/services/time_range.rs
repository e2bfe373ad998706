use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::models::{IssueKind, TimeRange, TimeRangeInput, ValidationIssue};

/// 24-hour `H:MM` / `HH:MM`; hour 0-23, minute 00-59.
static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-1]?[0-9]|2[0-3]):([0-5][0-9])$").expect("time pattern is a valid regex")
});

#[derive(Debug, Default, Clone, Copy)]
pub struct TimeRangeValidator;

impl TimeRangeValidator {
    pub fn new() -> Self {
        Self
    }

    /// Parses a single `HH:MM` value, accepting a one-digit hour.
    pub fn parse_time(&self, raw: &str) -> Option<NaiveTime> {
        let caps = TIME_PATTERN.captures(raw)?;
        let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
        let minute: u32 = caps.get(2)?.as_str().parse().ok()?;
        NaiveTime::from_hms_opt(hour, minute, 0)
    }

    fn parse_value(&self, raw: &Value) -> Option<NaiveTime> {
        raw.as_str().and_then(|s| self.parse_time(s))
    }

    /// Checks both ends for format, then ordering. Issue fields are relative
    /// (`start`, `end`); callers scope them.
    pub fn validate(&self, input: &TimeRangeInput) -> Result<TimeRange, Vec<ValidationIssue>> {
        let mut issues = Vec::new();

        let start = self.parse_value(&input.start);
        if start.is_none() {
            issues.push(ValidationIssue::new(
                IssueKind::FormatError,
                "start",
                format!("start time {} must be in 24-hour HH:MM format", input.start),
            ));
        }

        let end = self.parse_value(&input.end);
        if end.is_none() {
            issues.push(ValidationIssue::new(
                IssueKind::FormatError,
                "end",
                format!("end time {} must be in 24-hour HH:MM format", input.end),
            ));
        }

        let (Some(start), Some(end)) = (start, end) else {
            debug!("Rejected malformed time range {}-{}", input.start, input.end);
            return Err(issues);
        };

        if start >= end {
            return Err(vec![ValidationIssue::new(
                IssueKind::OrderError,
                "end",
                "end time must be after start time",
            )]);
        }

        Ok(TimeRange { start, end })
    }
}
