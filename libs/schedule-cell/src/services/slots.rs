use chrono::{Datelike, NaiveDate, NaiveTime};
use tracing::{debug, instrument};

use shared_config::AppConfig;

use crate::models::{
    minutes_of_day, AvailableSlot, BookedInterval, DayCapacity, DaySchedule, WeekSchedule,
    WeeklyCapacity,
};

/// Expands a validated week into bookable consultation slots.
#[derive(Debug, Clone)]
pub struct SlotPlanner {
    buffer_minutes: u32,
    timezone: String,
}

impl SlotPlanner {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            buffer_minutes: config.slot_buffer_minutes,
            timezone: config.schedule_timezone.clone(),
        }
    }

    /// Back-to-back slots of `avgConsultationTime` minutes (plus buffer)
    /// inside each range. A trailing remainder shorter than one consultation
    /// is dropped. Inactive days have no slots.
    pub fn slots_for_day(&self, day: &DaySchedule) -> Vec<AvailableSlot> {
        if !day.is_active() {
            return Vec::new();
        }

        // u64 so a huge consultation time or buffer cannot overflow the walk
        let duration = u64::from(day.avg_consultation_time);
        let step = duration + u64::from(self.buffer_minutes);
        let mut slots = Vec::new();

        for range in &day.time_ranges {
            let range_end = u64::from(minutes_of_day(range.end));
            let mut current = u64::from(minutes_of_day(range.start));

            while current + duration <= range_end {
                let (Some(start_time), Some(end_time)) = (time_of_day(current), time_of_day(current + duration)) else {
                    break;
                };

                slots.push(AvailableSlot {
                    day_of_week: day.day_of_week,
                    start_time,
                    end_time,
                    duration_minutes: day.avg_consultation_time,
                    timezone: self.timezone.clone(),
                });

                current += step;
            }
        }

        slots.sort_by_key(|slot| slot.start_time);
        slots
    }

    /// Slots for a calendar date, leaving out any that collide with a booking.
    #[instrument(skip(self, week, booked))]
    pub fn slots_for_date(
        &self,
        week: &WeekSchedule,
        date: NaiveDate,
        booked: &[BookedInterval],
    ) -> Vec<AvailableSlot> {
        let day_of_week = date.weekday().num_days_from_sunday() as u8;

        let Some(day) = week.day(day_of_week) else {
            return Vec::new();
        };

        let mut slots = self.slots_for_day(day);
        slots.retain(|slot| {
            !booked
                .iter()
                .any(|b| slot.start_time < b.end && b.start < slot.end_time)
        });

        debug!("Found {} available slots on {}", slots.len(), date);
        slots
    }

    pub fn weekly_capacity(&self, week: &WeekSchedule) -> WeeklyCapacity {
        let mut days: Vec<DayCapacity> = week
            .days()
            .iter()
            .map(|day| DayCapacity {
                day_of_week: day.day_of_week,
                status: day.status,
                slots: self.slots_for_day(day).len(),
            })
            .collect();
        days.sort_by_key(|d| d.day_of_week);

        let total_slots = days.iter().map(|d| d.slots).sum();

        WeeklyCapacity { days, total_slots }
    }
}

fn time_of_day(minutes: u64) -> Option<NaiveTime> {
    let hour = u32::try_from(minutes / 60).ok()?;
    NaiveTime::from_hms_opt(hour, (minutes % 60) as u32, 0)
}
