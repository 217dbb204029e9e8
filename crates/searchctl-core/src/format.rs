//! Display formatting for raw node telemetry.
//!
//! Pure functions: byte counts, percentages, and running times.

use std::time::Duration;

use searchctl_api::RunningTime;

const BYTE_UNIT: &str = "byte";

/// Units above `byte`, each 1024 times the previous. `TB` is unbounded above.
const SCALED_UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

/// Render a byte count with the largest unit whose scaled value is `< 1024`.
///
/// Counts below 1024 print as a bare integer (`"512 byte"`); everything else
/// gets two decimals (`"1.50 KB"`). Values of 1024^4 and beyond stay in TB.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn human_readable_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} {BYTE_UNIT}");
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < SCALED_UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", SCALED_UNITS[unit])
}

/// Render a value that is already a percentage (`13.456` -> `"13.46%"`).
pub fn percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Render a `0..=1` fraction as a percentage (`0.4213` -> `"42.13%"`).
pub fn fraction_percent(fraction: f64) -> String {
    percent(fraction * 100.0)
}

/// Render node uptime: text verbatim, seconds as a humantime duration.
pub fn running_time(value: &RunningTime) -> String {
    match value {
        RunningTime::Text(text) => text.clone(),
        RunningTime::Seconds(secs) => {
            humantime::format_duration(Duration::from_secs(*secs)).to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    #[test]
    fn sizes_below_a_kilobyte_are_bare_integers() {
        assert_eq!(human_readable_size(0), "0 byte");
        assert_eq!(human_readable_size(1), "1 byte");
        assert_eq!(human_readable_size(1023), "1023 byte");
    }

    #[test]
    fn sizes_pick_the_largest_unit_below_1024() {
        assert_eq!(human_readable_size(KB), "1.00 KB");
        assert_eq!(human_readable_size(1536), "1.50 KB");
        assert_eq!(human_readable_size(MB), "1.00 MB");
        assert_eq!(human_readable_size(5 * MB + MB / 4), "5.25 MB");
        assert_eq!(human_readable_size(GB), "1.00 GB");
        assert_eq!(human_readable_size(1023 * GB), "1023.00 GB");
    }

    #[test]
    fn sizes_at_or_above_a_terabyte_stay_in_terabytes() {
        assert_eq!(human_readable_size(TB), "1.00 TB");
        assert_eq!(human_readable_size(3 * TB / 2), "1.50 TB");
        assert_eq!(human_readable_size(1024 * TB), "1024.00 TB");
        assert!(human_readable_size(u64::MAX).ends_with(" TB"));
    }

    #[test]
    fn percentages_use_two_decimals() {
        assert_eq!(percent(13.456), "13.46%");
        assert_eq!(percent(0.0), "0.00%");
        assert_eq!(fraction_percent(0.4213), "42.13%");
        assert_eq!(fraction_percent(1.0), "100.00%");
    }

    #[test]
    fn running_time_formats() {
        assert_eq!(running_time(&RunningTime::Text("2 days".into())), "2 days");
        assert_eq!(running_time(&RunningTime::Seconds(3720)), "1h 2m");
        assert_eq!(running_time(&RunningTime::Seconds(0)), "0s");
    }
}
