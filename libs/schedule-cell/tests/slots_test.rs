use assert_matches::assert_matches;
use chrono::{NaiveDate, NaiveTime};

use schedule_cell::*;
use shared_config::AppConfig;

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn config(buffer_minutes: u32) -> AppConfig {
    AppConfig {
        schedule_timezone: "Africa/Accra".to_string(),
        slot_buffer_minutes: buffer_minutes,
    }
}

/// Weekdays 09:00-12:00 in 30 minute consultations, weekend off.
fn validated_week() -> WeekSchedule {
    WeekScheduleValidator::new()
        .validate(&WeekScheduleInput::template("09:00", "12:00", 30))
        .into_result()
        .expect("template week should validate")
}

#[test]
fn test_slots_fill_each_range() {
    let week = validated_week();
    let planner = SlotPlanner::new(&config(0));

    let monday = week.day(1).unwrap();
    let slots = planner.slots_for_day(monday);

    assert_eq!(slots.len(), 6);
    assert_eq!(slots[0].start_time, at(9, 0));
    assert_eq!(slots[0].end_time, at(9, 30));
    assert_eq!(slots[5].end_time, at(12, 0));
    assert!(slots.iter().all(|s| s.duration_minutes == 30));
    assert!(slots.iter().all(|s| s.timezone == "Africa/Accra"));
    assert_eq!(monday.time_ranges[0].duration_minutes(), 180);
}

#[test]
fn test_buffer_spaces_slots_and_drops_remainder() {
    let week = validated_week();
    let planner = SlotPlanner::new(&config(15));

    let slots = planner.slots_for_day(week.day(2).unwrap());

    // 09:00, 09:45, 10:30, 11:15 fit; 12:00 would start at the range end
    let starts: Vec<NaiveTime> = slots.iter().map(|s| s.start_time).collect();
    assert_eq!(starts, vec![at(9, 0), at(9, 45), at(10, 30), at(11, 15)]);
}

#[test]
fn test_inactive_day_has_no_slots() {
    let week = validated_week();
    let planner = SlotPlanner::new(&config(0));

    let sunday = week.day(0).unwrap();
    assert!(!sunday.is_active());
    assert_eq!(sunday.day_name(), "Sunday");
    assert!(planner.slots_for_day(sunday).is_empty());
}

#[test]
fn test_slots_from_multiple_ranges_are_sorted() {
    let mut input = WeekScheduleInput::template("09:00", "12:00", 60);
    input.schedules[3].time_ranges = vec![
        TimeRangeInput::new("14:00", "16:00"),
        TimeRangeInput::new("08:00", "10:00"),
    ];
    let week = validate_week(&input).into_result().unwrap();

    let slots = SlotPlanner::new(&config(0)).slots_for_day(week.day(3).unwrap());
    let starts: Vec<NaiveTime> = slots.iter().map(|s| s.start_time).collect();

    assert_eq!(starts, vec![at(8, 0), at(9, 0), at(14, 0), at(15, 0)]);
}

#[test]
fn test_slots_for_date_maps_weekday_and_skips_bookings() {
    let week = validated_week();
    let planner = SlotPlanner::new(&config(0));

    // 2024-01-03 was a Wednesday
    let date = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
    let booked = vec![BookedInterval::new(at(9, 15), at(10, 0)).unwrap()];

    let slots = planner.slots_for_date(&week, date, &booked);
    let starts: Vec<NaiveTime> = slots.iter().map(|s| s.start_time).collect();

    assert!(slots.iter().all(|s| s.day_of_week == 3));
    assert_eq!(starts, vec![at(10, 0), at(10, 30), at(11, 0), at(11, 30)]);
}

#[test]
fn test_booking_touching_slot_edge_does_not_block_it() {
    let week = validated_week();
    let planner = SlotPlanner::new(&config(0));

    let date = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
    let booked = vec![BookedInterval::new(at(8, 0), at(9, 0)).unwrap()];

    assert_eq!(planner.slots_for_date(&week, date, &booked).len(), 6);
}

#[test]
fn test_weekend_date_has_no_slots() {
    let week = validated_week();
    let planner = SlotPlanner::new(&config(0));

    // 2024-01-06 was a Saturday
    let date = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
    assert!(planner.slots_for_date(&week, date, &[]).is_empty());
}

#[test]
fn test_weekly_capacity_totals() {
    let week = validated_week();
    let capacity = SlotPlanner::new(&config(0)).weekly_capacity(&week);

    assert_eq!(capacity.days.len(), 7);
    assert_eq!(capacity.days[0].slots, 0);
    assert_eq!(capacity.days[1].slots, 6);
    assert_eq!(capacity.days[6].status, DayStatus::Inactive);
    assert_eq!(capacity.total_slots, 30);
}

#[test]
fn test_booked_interval_must_be_ordered() {
    let err = BookedInterval::new(at(11, 0), at(10, 0)).unwrap_err();
    assert_matches!(err, ScheduleError::InvalidTimeSlot(_));
}

#[test]
fn test_consultation_longer_than_any_range_yields_no_slots() {
    let week = validate_week(&WeekScheduleInput::template("09:00", "12:00", i64::from(u32::MAX)))
        .into_result()
        .expect("a very long consultation time is still a positive integer");
    let planner = SlotPlanner::new(&config(0));

    assert!(planner.slots_for_day(week.day(1).unwrap()).is_empty());
    assert_eq!(planner.weekly_capacity(&week).total_slots, 0);
}

#[test]
fn test_huge_buffer_leaves_one_slot_per_range() {
    let week = validated_week();
    let planner = SlotPlanner::new(&config(u32::MAX));

    let slots = planner.slots_for_day(week.day(1).unwrap());

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].start_time, at(9, 0));
    assert_eq!(slots[0].end_time, at(9, 30));
}

#[test]
fn test_buffer_longer_than_day_with_max_duration() {
    let week = validate_week(&WeekScheduleInput::template("00:00", "23:59", i64::from(u32::MAX)))
        .into_result()
        .unwrap();
    let planner = SlotPlanner::new(&config(u32::MAX));

    let capacity = planner.weekly_capacity(&week);
    assert_eq!(capacity.total_slots, 0);
}
