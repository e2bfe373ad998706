use tracing::debug;

use crate::models::{DayAvailability, DayScheduleInput, DayStatus, IssueKind, TimeRange, ValidationIssue};
use crate::services::time_range::TimeRangeValidator;

#[derive(Debug, Default, Clone, Copy)]
pub struct DayScheduleValidator {
    ranges: TimeRangeValidator,
}

impl DayScheduleValidator {
    pub fn new() -> Self {
        Self {
            ranges: TimeRangeValidator::new(),
        }
    }

    /// Runs every per-day check and collects all issues. `dayOfWeek` is left
    /// to the week validator, which knows about the other six entries.
    pub fn validate(&self, input: &DayScheduleInput) -> Result<DayAvailability, Vec<ValidationIssue>> {
        let mut issues = Vec::new();

        let minutes = input
            .avg_consultation_time
            .as_u64()
            .and_then(|m| u32::try_from(m).ok())
            .filter(|m| *m > 0);

        let avg_consultation_time = match minutes {
            Some(minutes) => Some(minutes),
            None => {
                issues.push(ValidationIssue::new(
                    IssueKind::RangeError,
                    "avgConsultationTime",
                    format!(
                        "average consultation time must be a positive number of minutes, got {}",
                        input.avg_consultation_time
                    ),
                ));
                None
            }
        };

        if input.time_ranges.is_empty() {
            issues.push(ValidationIssue::new(
                IssueKind::MissingDataError,
                "timeRanges",
                "at least one time range is required",
            ));
        }

        // (input position, range) for every range that passed its own checks
        let mut checked: Vec<(usize, TimeRange)> = Vec::with_capacity(input.time_ranges.len());
        for (idx, raw) in input.time_ranges.iter().enumerate() {
            match self.ranges.validate(raw) {
                Ok(range) => checked.push((idx, range)),
                Err(range_issues) => {
                    let prefix = format!("timeRanges[{}]", idx);
                    issues.extend(range_issues.into_iter().map(|issue| issue.scoped(&prefix)));
                }
            }
        }

        issues.extend(overlap_issues(&checked));

        let parsed = match input.status.as_str() {
            Some(raw) => raw.parse::<DayStatus>(),
            None => Err(format!("status must be ACTIVE or INACTIVE, got {}", input.status)),
        };

        let status = match parsed {
            Ok(status) => Some(status),
            Err(message) => {
                issues.push(ValidationIssue::new(IssueKind::EnumError, "status", message));
                None
            }
        };

        match (status, avg_consultation_time) {
            (Some(status), Some(avg_consultation_time)) if issues.is_empty() => Ok(DayAvailability {
                status,
                avg_consultation_time,
                time_ranges: checked.into_iter().map(|(_, range)| range).collect(),
            }),
            _ => {
                debug!("Day {} failed with {} issue(s)", input.day_of_week, issues.len());
                Err(issues)
            }
        }
    }
}

/// Sorts by start and compares neighbours; touching ends are fine.
fn overlap_issues(checked: &[(usize, TimeRange)]) -> Vec<ValidationIssue> {
    let mut sorted: Vec<&(usize, TimeRange)> = checked.iter().collect();
    sorted.sort_by_key(|(_, range)| range.start);

    sorted
        .windows(2)
        .filter(|pair| pair[0].1.overlaps(&pair[1].1))
        .map(|pair| {
            let (first_idx, first) = pair[0];
            let (second_idx, second) = pair[1];
            ValidationIssue::new(
                IssueKind::OverlapError,
                format!("timeRanges[{}]", second_idx),
                format!(
                    "time range {} (timeRanges[{}]) overlaps {} (timeRanges[{}])",
                    second, second_idx, first, first_idx
                ),
            )
        })
        .collect()
}
