//! Elapsed-time rounding and display formatting.

/// Granularity of recorded time, in minutes.
pub const ROUNDING_STEP_MINS: u32 = 5;

/// Readout shown while no session is running.
pub const IDLE_DISPLAY: &str = "00:00:00";

/// Rounds elapsed wall-clock seconds up to the next multiple of five minutes.
///
/// The result is never below [`ROUNDING_STEP_MINS`], so a session of zero
/// seconds still records five minutes. A value exactly on a multiple stays
/// there: 300 seconds is 5 minutes, 301 seconds is 10.
///
/// Negative or non-finite input (clock skew) counts as zero.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is finite, non-negative and clamped to u32 range"
)]
pub fn round_to_billable_minutes(elapsed_secs: f64) -> u32 {
    let secs = if elapsed_secs.is_finite() && elapsed_secs > 0.0 {
        elapsed_secs
    } else {
        0.0
    };
    let step = f64::from(ROUNDING_STEP_MINS);
    let minutes = secs / 60.0;
    let rounded = ((minutes / step).ceil() * step).max(step);
    rounded.min(f64::from(u32::MAX)) as u32
}

/// Formats elapsed seconds as a zero-padded `HH:MM:SS` readout.
///
/// Fractional seconds are truncated. Hours are not wrapped at 24.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is finite and non-negative"
)]
pub fn format_elapsed(elapsed_secs: f64) -> String {
    let total = if elapsed_secs.is_finite() && elapsed_secs > 0.0 {
        elapsed_secs.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let remainder = total % 3600;
    let minutes = remainder / 60;
    let seconds = remainder % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_boundaries() {
        let cases = [
            (0.0, 5),
            (299.0, 5),
            (300.0, 5),
            (301.0, 10),
            (600.0, 10),
            (601.0, 15),
        ];
        for (secs, expected) in cases {
            assert_eq!(
                round_to_billable_minutes(secs),
                expected,
                "rounding {secs} seconds"
            );
        }
    }

    #[test]
    fn rounding_sub_second_values() {
        assert_eq!(round_to_billable_minutes(0.4), 5);
        assert_eq!(round_to_billable_minutes(300.5), 10);
    }

    #[test]
    fn rounding_is_always_positive_multiple_of_step() {
        let mut secs = 0.0;
        while secs < 4.0 * 3600.0 {
            let minutes = round_to_billable_minutes(secs);
            assert_eq!(minutes % ROUNDING_STEP_MINS, 0, "{secs} seconds");
            assert!(minutes >= ROUNDING_STEP_MINS, "{secs} seconds");
            assert!(f64::from(minutes) * 60.0 >= secs, "{secs} seconds not covered");
            secs += 7.3;
        }
    }

    #[test]
    fn rounding_treats_negative_and_nan_as_zero() {
        assert_eq!(round_to_billable_minutes(-42.0), 5);
        assert_eq!(round_to_billable_minutes(f64::NAN), 5);
    }

    #[test]
    fn format_examples() {
        assert_eq!(format_elapsed(0.0), IDLE_DISPLAY);
        assert_eq!(format_elapsed(3725.0), "01:02:05");
        assert_eq!(format_elapsed(59.999), "00:00:59");
        assert_eq!(format_elapsed(86_400.0), "24:00:00");
        assert_eq!(format_elapsed(360_000.0), "100:00:00");
    }
}
