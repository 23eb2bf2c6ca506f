#[cfg(test)]
mod tests {
    use crate::logic::{
        format_slot_time, generate_day_slots, is_cancellable, slot_start, slot_times, Booking,
        SLOTS_PER_DAY, SLOT_STEP_MINUTES,
    };
    use crate::service::FixedCapacity;
    use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
    use uuid::Uuid;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 5).unwrap()
    }

    #[test]
    fn test_grid_shape() {
        // A day well in the future so no slot is in the past
        let now = Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap();
        let slots = generate_day_slots(day(), now, chrono_tz::UTC, &FixedCapacity(1));

        assert_eq!(slots.len(), SLOTS_PER_DAY);
        assert_eq!(slots[0].time, "9:00");
        assert_eq!(slots[1].time, "9:30");
        assert_eq!(slots[slots.len() - 2].time, "20:00");
        assert_eq!(slots[slots.len() - 1].time, "20:30");

        for pair in slots.windows(2) {
            assert_eq!(
                pair[1].start - pair[0].start,
                Duration::minutes(SLOT_STEP_MINUTES),
                "Slots must be 30 minutes apart: {} then {}",
                pair[0].time,
                pair[1].time
            );
        }
        for slot in &slots {
            assert_eq!(slot.capacity, 1);
        }
    }

    #[test]
    fn test_past_slots_have_zero_capacity() {
        // Midway through the day: every slot starting at or before 14:00
        // must be zeroed even though the provider reports full capacity.
        let now = Utc.with_ymd_and_hms(2025, 10, 5, 14, 0, 0).unwrap();
        let slots = generate_day_slots(day(), now, chrono_tz::UTC, &FixedCapacity(2));

        for slot in &slots {
            if slot.start <= now {
                assert_eq!(slot.capacity, 0, "Past slot {} must be disabled", slot.time);
            } else {
                assert_eq!(slot.capacity, 2, "Future slot {} keeps capacity", slot.time);
            }
        }
        // 9:00 through 14:00 inclusive is 11 grid positions
        let disabled = slots.iter().filter(|s| s.capacity == 0).count();
        assert_eq!(disabled, 11);
    }

    #[test]
    fn test_slot_exactly_at_now_is_disabled() {
        let now = Utc.with_ymd_and_hms(2025, 10, 5, 9, 30, 0).unwrap();
        let slots = generate_day_slots(day(), now, chrono_tz::UTC, &FixedCapacity(2));
        let slot = slots.iter().find(|s| s.time == "9:30").unwrap();
        assert_eq!(slot.start, now);
        assert_eq!(slot.capacity, 0);
    }

    #[test]
    fn test_provider_capacity_is_clamped() {
        let now = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
        let slots = generate_day_slots(day(), now, chrono_tz::UTC, &FixedCapacity(7));
        assert!(slots.iter().all(|s| s.capacity == 2));
    }

    #[test]
    fn test_slot_times_are_fixed() {
        let times = slot_times();
        assert_eq!(times.len(), SLOTS_PER_DAY);
        assert_eq!(format_slot_time(times[0]), "9:00");
        assert_eq!(format_slot_time(times[23]), "20:30");
    }

    #[test]
    fn test_slot_start_uses_studio_time_zone() {
        // 9:00 Zurich wall time in winter is 8:00 UTC
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let time = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let start = slot_start(date, time, chrono_tz::Europe::Zurich);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap());
    }

    fn booking_starting_at(start: chrono::DateTime<Utc>) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            date: day(),
            time: "9:00".to_string(),
            quantity: 1,
            start,
        }
    }

    #[test]
    fn test_cancellation_boundary_is_inclusive() {
        let now = Utc.with_ymd_and_hms(2025, 10, 5, 5, 0, 0).unwrap();
        let notice = Duration::hours(4);

        // Exactly 4 hours (14_400_000 ms) of lead time: still cancellable
        let at_boundary = booking_starting_at(now + Duration::milliseconds(14_400_000));
        assert!(is_cancellable(&at_boundary, now, notice));

        // One millisecond less: refused
        let past_boundary = booking_starting_at(now + Duration::milliseconds(14_399_999));
        assert!(!is_cancellable(&past_boundary, now, notice));
    }

    #[test]
    fn test_cancellation_for_started_booking_is_refused() {
        let now = Utc.with_ymd_and_hms(2025, 10, 5, 10, 0, 0).unwrap();
        let booking = booking_starting_at(now - Duration::hours(1));
        assert!(!is_cancellable(&booking, now, Duration::hours(4)));
    }
}
