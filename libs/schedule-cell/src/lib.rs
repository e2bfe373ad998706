// =====================================================================================
// SCHEDULE CELL - WEEKLY DOCTOR SCHEDULE VALIDATION & SLOT PLANNING
// =====================================================================================
//
// Checks a submitted week of doctor availability before it is handed to the
// persistence API:
// - exactly seven day entries, one per weekday
// - HH:MM time ranges, correctly ordered and non-overlapping
// - positive average consultation time and a known status
//
// Every problem is collected and returned as field-scoped issues rather than
// stopping at the first one.
//
// =====================================================================================

pub mod models;
pub mod services;

pub use models::{
    AvailableSlot, BookedInterval, DaySchedule, DayScheduleInput, DayStatus, IssueKind,
    ScheduleError, TimeRange, TimeRangeInput, ValidationIssue, WeekSchedule, WeekScheduleInput,
    WeekValidation, WeeklyCapacity,
};

pub use services::{DayScheduleValidator, SlotPlanner, TimeRangeValidator, WeekScheduleValidator};

/// Validates a week with the default validator.
pub fn validate_week(input: &WeekScheduleInput) -> WeekValidation {
    WeekScheduleValidator::new().validate(input)
}
