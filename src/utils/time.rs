// Mon Aug 17 2026 - Alex

use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub struct TimeUtils;

impl TimeUtils {
    pub fn unix_now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    /// Render unix seconds as `YYYY-MM-DD HH:MM:SS UTC`.
    pub fn format_timestamp(secs: u64) -> String {
        let days = (secs / 86_400) as i64;
        let rem = secs % 86_400;
        let (year, month, day) = Self::civil_from_days(days);
        format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02} UTC",
            year,
            month,
            day,
            rem / 3600,
            (rem % 3600) / 60,
            rem % 60
        )
    }

    pub fn format_duration(duration: Duration) -> String {
        let total = duration.as_secs_f64();
        if total < 60.0 {
            return format!("{:.1}s", total);
        }

        let minutes = (total / 60.0) as u64;
        let seconds = total - (minutes * 60) as f64;
        if minutes < 60 {
            return format!("{}m {:.1}s", minutes, seconds);
        }

        format!("{}h {}m {:.0}s", minutes / 60, minutes % 60, seconds)
    }

    // Gregorian date from days since the epoch, valid for any date the
    // tool will ever stamp.
    fn civil_from_days(days: i64) -> (i64, u32, u32) {
        let z = days + 719_468;
        let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let year = yoe + era * 400;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
        let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;

        if month <= 2 {
            (year + 1, month, day)
        } else {
            (year, month, day)
        }
    }
}

pub fn unix_now() -> u64 {
    TimeUtils::unix_now()
}

pub fn format_timestamp(secs: u64) -> String {
    TimeUtils::format_timestamp(secs)
}

pub fn format_duration(duration: Duration) -> String {
    TimeUtils::format_duration(duration)
}
