#[cfg(test)]
mod tests {
    use crate::logic::{generate_day_slots, SLOTS_PER_DAY};
    use crate::service::{FixedCapacity, RandomizedCapacity};
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use proptest::prelude::*;

    fn base_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    proptest! {
        // The grid shape never depends on the date, the clock, or the
        // capacity draw.
        #[test]
        fn test_grid_shape_is_invariant(
            day_offset in -365i64..365,
            now_hour in 0u32..24,
            now_minute in 0u32..60,
        ) {
            let date = base_date() + Duration::days(day_offset);
            let now = Utc
                .with_ymd_and_hms(2025, 6, 15, now_hour, now_minute, 0)
                .unwrap();
            let slots = generate_day_slots(date, now, chrono_tz::UTC, &RandomizedCapacity);

            prop_assert_eq!(slots.len(), SLOTS_PER_DAY);
            for pair in slots.windows(2) {
                prop_assert_eq!(pair[1].start - pair[0].start, Duration::minutes(30));
            }
            for slot in &slots {
                prop_assert!(slot.capacity <= 2);
            }
        }

        // Past-or-now slots are zeroed no matter what the provider reports.
        #[test]
        fn test_past_slots_always_disabled(
            now_hour in 0u32..24,
            now_minute in 0u32..60,
            capacity in 0u8..=2,
        ) {
            let date = base_date();
            let now = Utc
                .with_ymd_and_hms(2025, 6, 15, now_hour, now_minute, 0)
                .unwrap();
            let slots = generate_day_slots(date, now, chrono_tz::UTC, &FixedCapacity(capacity));

            for slot in &slots {
                if slot.start <= now {
                    prop_assert_eq!(slot.capacity, 0);
                } else {
                    prop_assert_eq!(slot.capacity, capacity);
                }
            }
        }
    }
}
