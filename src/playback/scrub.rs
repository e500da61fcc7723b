//! Conversions between milliseconds and the 0..=1000 scrubber scale.
//!
//! Both directions use floor division so dragging the scrubber and reading
//! it back behave the same way.

/// Upper bound of the scrubber scale.
pub const SCRUB_MAX: u32 = 1000;

/// Scrubber value to a position in milliseconds.
///
/// `None` while the duration is unknown (0): there is nothing to scale against.
pub fn to_position_ms(value: u32, duration_ms: u64) -> Option<u64> {
    if duration_ms == 0 {
        return None;
    }
    let value = u64::from(value.min(SCRUB_MAX));
    Some(value * duration_ms / u64::from(SCRUB_MAX))
}

/// Position in milliseconds to a scrubber value; 0 while the duration is unknown.
pub fn to_scrub_value(position_ms: u64, duration_ms: u64) -> u32 {
    if duration_ms == 0 {
        return 0;
    }
    let position_ms = position_ms.min(duration_ms);
    (position_ms * u64::from(SCRUB_MAX) / duration_ms) as u32
}

fn format_mmss(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `elapsed / total` as `mm:ss / mm:ss`.
pub fn format_time_text(position_ms: u64, duration_ms: u64) -> String {
    format!("{} / {}", format_mmss(position_ms), format_mmss(duration_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_duration_has_no_position_and_zero_scrub() {
        assert_eq!(to_position_ms(500, 0), None);
        assert_eq!(to_scrub_value(1234, 0), 0);
    }

    #[test]
    fn conversions_floor() {
        assert_eq!(to_position_ms(1, 1999), Some(1));
        assert_eq!(to_position_ms(1000, 1999), Some(1999));
        assert_eq!(to_scrub_value(1999, 2000), 999);
        assert_eq!(to_scrub_value(2000, 2000), 1000);
    }

    #[test]
    fn values_past_the_end_are_clamped() {
        assert_eq!(to_position_ms(4000, 10_000), Some(10_000));
        assert_eq!(to_scrub_value(20_000, 10_000), SCRUB_MAX);
    }

    #[test]
    fn round_trip_is_exact_when_divisible() {
        let duration = 200_000;
        for v in 0..=SCRUB_MAX {
            let ms = to_position_ms(v, duration).unwrap();
            assert_eq!(to_scrub_value(ms, duration), v);
        }
    }

    #[test]
    fn round_trip_is_within_one_step_for_track_length_durations() {
        for duration in [1_000u64, 1_001, 1_337, 59_999, 187_413, 3_600_007] {
            for v in 0..=SCRUB_MAX {
                let ms = to_position_ms(v, duration).unwrap();
                let back = to_scrub_value(ms, duration);
                assert!(
                    back.abs_diff(v) <= 1,
                    "duration {duration}: {v} -> {ms}ms -> {back}"
                );
            }
        }
    }

    #[test]
    fn time_text_is_mm_ss_pair() {
        assert_eq!(format_time_text(0, 0), "00:00 / 00:00");
        assert_eq!(format_time_text(65_999, 215_000), "01:05 / 03:35");
        assert_eq!(format_time_text(3_725_000, 3_725_000), "62:05 / 62:05");
    }
}
