pub mod day;
pub mod slots;
pub mod time_range;
pub mod week;

pub use day::DayScheduleValidator;
pub use slots::SlotPlanner;
pub use time_range::TimeRangeValidator;
pub use week::WeekScheduleValidator;
