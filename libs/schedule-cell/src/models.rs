use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const DAYS_PER_WEEK: usize = 7;

// =====================================================================================
// CANDIDATE INPUT
// =====================================================================================

/// A time range as typed into the schedule form, before any checking. Values
/// stay as raw JSON so a non-string reaches the validator as a `FormatError`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRangeInput {
    #[serde(default)]
    pub start: Value,
    #[serde(default)]
    pub end: Value,
}

impl TimeRangeInput {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Value::String(start.into()),
            end: Value::String(end.into()),
        }
    }
}

/// One submitted day. Scalar fields are kept as raw JSON (missing ones become
/// `null`) so wrongly typed values come back as field-scoped issues instead
/// of failing the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayScheduleInput {
    #[serde(default)]
    pub day_of_week: Value,
    #[serde(default)]
    pub status: Value,
    #[serde(default)]
    pub avg_consultation_time: Value,
    #[serde(default)]
    pub time_ranges: Vec<TimeRangeInput>,
}

impl DayScheduleInput {
    pub fn new(
        day_of_week: i64,
        status: DayStatus,
        avg_consultation_time: i64,
        time_ranges: Vec<TimeRangeInput>,
    ) -> Self {
        Self {
            day_of_week: Value::from(day_of_week),
            status: Value::from(status.as_str()),
            avg_consultation_time: Value::from(avg_consultation_time),
            time_ranges,
        }
    }
}

/// A submitted week. Accepts either a bare JSON array of day entries or an
/// object wrapping them under `schedules`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct WeekScheduleInput {
    pub schedules: Vec<DayScheduleInput>,
}

impl TryFrom<Value> for WeekScheduleInput {
    type Error = serde_json::Error;

    fn try_from(doc: Value) -> Result<Self, Self::Error> {
        let schedules = match doc {
            Value::Array(_) => serde_json::from_value(doc)?,
            Value::Object(mut fields) => match fields.remove("schedules") {
                Some(schedules) => serde_json::from_value(schedules)?,
                None => {
                    return Err(serde::de::Error::missing_field("schedules"));
                }
            },
            other => {
                return Err(serde::de::Error::custom(format!(
                    "expected an array of day schedules or an object with a `schedules` array, got {}",
                    other
                )));
            }
        };

        Ok(Self { schedules })
    }
}

impl From<Vec<DayScheduleInput>> for WeekScheduleInput {
    fn from(schedules: Vec<DayScheduleInput>) -> Self {
        Self { schedules }
    }
}

impl WeekScheduleInput {
    /// Seven-day starting point for a schedule form: Monday to Friday active
    /// with one range, weekend inactive.
    pub fn template(start: &str, end: &str, avg_consultation_time: i64) -> Self {
        let schedules = (0..DAYS_PER_WEEK as i64)
            .map(|day| {
                let status = if day == 0 || day == 6 {
                    DayStatus::Inactive
                } else {
                    DayStatus::Active
                };
                DayScheduleInput::new(
                    day,
                    status,
                    avg_consultation_time,
                    vec![TimeRangeInput::new(start, end)],
                )
            })
            .collect();

        Self { schedules }
    }
}

// =====================================================================================
// VALIDATED SCHEDULE
// =====================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DayStatus {
    Active,
    Inactive,
}

impl DayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayStatus::Active => "ACTIVE",
            DayStatus::Inactive => "INACTIVE",
        }
    }
}

impl FromStr for DayStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(DayStatus::Active),
            "INACTIVE" => Ok(DayStatus::Inactive),
            other => Err(format!("status must be ACTIVE or INACTIVE, got {:?}", other)),
        }
    }
}

impl fmt::Display for DayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A checked, zero-padded time range with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn duration_minutes(&self) -> u32 {
        minutes_of_day(self.end) - minutes_of_day(self.start)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

/// The per-day fields that survive validation, not yet tied to a weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAvailability {
    pub status: DayStatus,
    pub avg_consultation_time: u32,
    pub time_ranges: Vec<TimeRange>,
}

impl DayAvailability {
    pub fn for_day(self, day_of_week: u8) -> DaySchedule {
        DaySchedule {
            day_of_week,
            status: self.status,
            avg_consultation_time: self.avg_consultation_time,
            time_ranges: self.time_ranges,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub day_of_week: u8, // 0 = Sunday, 1 = Monday, etc.
    pub status: DayStatus,
    pub avg_consultation_time: u32,
    pub time_ranges: Vec<TimeRange>,
}

impl DaySchedule {
    pub fn is_active(&self) -> bool {
        self.status == DayStatus::Active
    }

    pub fn day_name(&self) -> &'static str {
        day_name(self.day_of_week)
    }
}

/// Seven validated days, one per weekday, in submission order. Only the
/// week validator builds one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeekSchedule {
    days: Vec<DaySchedule>,
}

impl WeekSchedule {
    pub(crate) fn new(days: Vec<DaySchedule>) -> Self {
        Self { days }
    }

    pub fn days(&self) -> &[DaySchedule] {
        &self.days
    }

    pub fn day(&self, day_of_week: u8) -> Option<&DaySchedule> {
        self.days.iter().find(|d| d.day_of_week == day_of_week)
    }

    /// Converts back into candidate form, e.g. to resubmit an edited week.
    pub fn to_input(&self) -> WeekScheduleInput {
        let schedules = self
            .days
            .iter()
            .map(|day| DayScheduleInput {
                day_of_week: Value::from(day.day_of_week),
                status: Value::from(day.status.as_str()),
                avg_consultation_time: Value::from(day.avg_consultation_time),
                time_ranges: day
                    .time_ranges
                    .iter()
                    .map(|r| {
                        TimeRangeInput::new(
                            r.start.format("%H:%M").to_string(),
                            r.end.format("%H:%M").to_string(),
                        )
                    })
                    .collect(),
            })
            .collect();

        WeekScheduleInput { schedules }
    }
}

// =====================================================================================
// VALIDATION ISSUES
// =====================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    CountError,
    DayIndexError,
    MissingDayError,
    FormatError,
    OrderError,
    OverlapError,
    RangeError,
    MissingDataError,
    EnumError,
}

/// A field-scoped problem ready to be shown next to the offending form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(kind: IssueKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Re-scopes the field path under `prefix`, e.g. `status` under
    /// `schedules[2]` becomes `schedules[2].status`.
    pub fn scoped(mut self, prefix: &str) -> Self {
        self.field = format!("{}.{}", prefix, self.field);
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Aggregate outcome of validating a week. Serializes as
/// `{"valid": true, "data": [...]}` or `{"valid": false, "errors": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<WeekSchedule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationIssue>,
}

impl WeekValidation {
    pub fn accepted(week: WeekSchedule) -> Self {
        Self {
            valid: true,
            data: Some(week),
            errors: Vec::new(),
        }
    }

    pub fn rejected(errors: Vec<ValidationIssue>) -> Self {
        Self {
            valid: false,
            data: None,
            errors,
        }
    }

    pub fn has_issue(&self, kind: IssueKind) -> bool {
        self.errors.iter().any(|issue| issue.kind == kind)
    }

    pub fn issues_of(&self, kind: IssueKind) -> Vec<&ValidationIssue> {
        self.errors.iter().filter(|issue| issue.kind == kind).collect()
    }

    pub fn into_result(self) -> Result<WeekSchedule, ScheduleError> {
        match self.data {
            Some(week) if self.valid => Ok(week),
            _ => Err(ScheduleError::ValidationFailed(self.errors)),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Schedule validation failed with {} issue(s)", .0.len())]
    ValidationFailed(Vec<ValidationIssue>),

    #[error("Invalid time slot: {0}")]
    InvalidTimeSlot(String),
}

// =====================================================================================
// SLOT PLANNING
// =====================================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlot {
    pub day_of_week: u8,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub duration_minutes: u32,
    pub timezone: String,
}

/// An already-booked interval on a given day; slots touching it are withheld.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedInterval {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl BookedInterval {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, ScheduleError> {
        if start >= end {
            return Err(ScheduleError::InvalidTimeSlot(format!(
                "booking ends at {} before it starts at {}",
                end.format("%H:%M"),
                start.format("%H:%M")
            )));
        }
        Ok(Self { start, end })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCapacity {
    pub day_of_week: u8,
    pub status: DayStatus,
    pub slots: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyCapacity {
    pub days: Vec<DayCapacity>,
    pub total_slots: usize,
}

// =====================================================================================
// HELPERS
// =====================================================================================

pub fn day_name(day_of_week: u8) -> &'static str {
    match day_of_week {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "Unknown",
    }
}

pub(crate) fn minutes_of_day(time: NaiveTime) -> u32 {
    use chrono::Timelike;
    time.hour() * 60 + time.minute()
}

/// `HH:MM` on the wire, matching what the form submits.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M").map_err(serde::de::Error::custom)
    }
}
