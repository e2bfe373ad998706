use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::models::{
    DaySchedule, IssueKind, ValidationIssue, WeekSchedule, WeekScheduleInput, WeekValidation,
    DAYS_PER_WEEK,
};
use crate::services::day::DayScheduleValidator;

/// Validates a whole submitted week in one pass so the form can show every
/// problem at once. Only a wrong entry count stops early.
#[derive(Debug, Default, Clone, Copy)]
pub struct WeekScheduleValidator {
    days: DayScheduleValidator,
}

impl WeekScheduleValidator {
    pub fn new() -> Self {
        Self {
            days: DayScheduleValidator::new(),
        }
    }

    #[instrument(skip(self, input), fields(entries = input.schedules.len()))]
    pub fn validate(&self, input: &WeekScheduleInput) -> WeekValidation {
        let schedules = &input.schedules;

        if schedules.len() != DAYS_PER_WEEK {
            warn!("Rejected schedule with {} day entries", schedules.len());
            return WeekValidation::rejected(vec![ValidationIssue::new(
                IssueKind::CountError,
                "schedules",
                "exactly 7 days of schedules are required",
            )]);
        }

        let mut errors = day_index_issues(input);
        let mut validated: Vec<DaySchedule> = Vec::with_capacity(DAYS_PER_WEEK);

        for (idx, entry) in schedules.iter().enumerate() {
            match self.days.validate(entry) {
                Ok(availability) => {
                    // an out-of-range index has already been reported above
                    if let Some(day) = day_index(&entry.day_of_week) {
                        validated.push(availability.for_day(day));
                    }
                }
                Err(day_issues) => {
                    let prefix = format!("schedules[{}]", idx);
                    errors.extend(day_issues.into_iter().map(|issue| issue.scoped(&prefix)));
                }
            }
        }

        if !errors.is_empty() {
            warn!("Rejected schedule with {} issue(s)", errors.len());
            return WeekValidation::rejected(errors);
        }

        debug!("Schedule accepted");
        WeekValidation::accepted(WeekSchedule::new(validated))
    }
}

fn day_index(raw: &Value) -> Option<u8> {
    raw.as_u64()
        .and_then(|day| u8::try_from(day).ok())
        .filter(|day| usize::from(*day) < DAYS_PER_WEEK)
}

/// Out-of-range and repeated indices in input order, then one issue listing
/// every weekday nobody covered.
fn day_index_issues(input: &WeekScheduleInput) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen = [false; DAYS_PER_WEEK];

    for (idx, entry) in input.schedules.iter().enumerate() {
        let field = format!("schedules[{}].dayOfWeek", idx);
        match day_index(&entry.day_of_week) {
            Some(day) if seen[usize::from(day)] => issues.push(ValidationIssue::new(
                IssueKind::DayIndexError,
                field,
                format!("day {} appears more than once", day),
            )),
            Some(day) => seen[usize::from(day)] = true,
            None => issues.push(ValidationIssue::new(
                IssueKind::DayIndexError,
                field,
                format!(
                    "day of week must be between 0 (Sunday) and 6 (Saturday), got {}",
                    entry.day_of_week
                ),
            )),
        }
    }

    let missing: Vec<String> = seen
        .iter()
        .enumerate()
        .filter(|(_, covered)| !**covered)
        .map(|(day, _)| day.to_string())
        .collect();

    if !missing.is_empty() {
        issues.push(ValidationIssue::new(
            IssueKind::MissingDayError,
            "schedules",
            format!("missing schedules for days: {}", missing.join(", ")),
        ));
    }

    issues
}
