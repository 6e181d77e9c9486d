/// Replay frames per display minute, the clock the mission list renders
/// durations with.
const MINUTES_PER_FRAME: f64 = 0.016;

/// Format a mission duration from its replay frame count. Under an hour
/// renders as minutes, otherwise hours with a minute remainder.
pub fn format_duration(frames: u32) -> String {
    let total_minutes = frames as f64 * MINUTES_PER_FRAME;
    if total_minutes < 60.0 {
        return format!("{} мин", total_minutes.round() as i64);
    }
    let hours = (total_minutes / 60.0).floor() as i64;
    let minutes = (total_minutes % 60.0).round() as i64;
    if minutes == 0 {
        format!("{hours} ч")
    } else {
        format!("{hours} ч {minutes} мин")
    }
}

/// Two-decimal rounding used for K/D display values.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::{format_duration, round2};

    #[test]
    fn formats_zero_frames() {
        assert_eq!(format_duration(0), "0 мин");
    }

    #[test]
    fn formats_minutes_under_an_hour() {
        assert_eq!(format_duration(1000), "16 мин");
    }

    #[test]
    fn formats_exact_hour() {
        // 3750 * 0.016 = 60.0
        assert_eq!(format_duration(3750), "1 ч");
    }

    #[test]
    fn formats_hours_with_remainder() {
        // 5000 * 0.016 = 80.0
        assert_eq!(format_duration(5000), "1 ч 20 мин");
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(1.2345), 1.23);
        assert_eq!(round2(7.0 / 3.0), 2.33);
        assert_eq!(round2(3.0), 3.0);
    }
}
