use core::fmt;

use crate::Lap;

const MS_PER_SECOND: u64 = 1000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Elapsed time split into display fields. Hours never wrap.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct TimeParts {
    pub hours: u64,
    pub minutes: u8,
    pub seconds: u8,
    pub centiseconds: u8,
}

pub fn decompose(ms: u64) -> TimeParts {
    TimeParts {
        hours: ms / MS_PER_HOUR,
        minutes: ((ms / MS_PER_MINUTE) % 60) as u8,
        seconds: ((ms / MS_PER_SECOND) % 60) as u8,
        centiseconds: ((ms % MS_PER_SECOND) / 10) as u8,
    }
}

impl fmt::Display for TimeParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds, self.centiseconds
        )
    }
}

/// Format milliseconds as "HH:MM:SS:CS"
pub fn format_hms_cs(ms: u64) -> String {
    decompose(ms).to_string()
}

/// Format a lap row as "Lap N  HH:MM:SS:CS  +HH:MM:SS:CS" (cumulative, then split)
pub fn format_lap(lap: &Lap) -> String {
    format!(
        "Lap {}  {}  +{}",
        lap.ordinal,
        decompose(lap.cumulative_ms),
        decompose(lap.split_ms)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose() {
        assert_eq!(decompose(0), TimeParts::default());
        assert_eq!(
            decompose(3_661_010),
            TimeParts { hours: 1, minutes: 1, seconds: 1, centiseconds: 1 }
        );
        assert_eq!(
            decompose(59_999),
            TimeParts { hours: 0, minutes: 0, seconds: 59, centiseconds: 99 }
        );
        // Sub-centisecond remainder is dropped
        assert_eq!(decompose(9).centiseconds, 0);
    }

    #[test]
    fn test_hours_do_not_wrap() {
        let parts = decompose(25 * MS_PER_HOUR + 30 * MS_PER_MINUTE);
        assert_eq!(parts.hours, 25);
        assert_eq!(parts.minutes, 30);
        assert_eq!(format_hms_cs(125 * MS_PER_HOUR), "125:00:00:00");
    }

    #[test]
    fn test_format_hms_cs() {
        assert_eq!(format_hms_cs(0), "00:00:00:00");
        assert_eq!(format_hms_cs(12_340), "00:00:12:34");
        assert_eq!(format_hms_cs(3_661_010), "01:01:01:01");
    }

    #[test]
    fn test_format_lap() {
        let lap = Lap { ordinal: 2, cumulative_ms: 1200, split_ms: 700 };
        assert_eq!(format_lap(&lap), "Lap 2  00:00:01:20  +00:00:00:70");
    }
}
