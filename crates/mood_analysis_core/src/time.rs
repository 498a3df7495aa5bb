//! crates/mood_analysis_core/src/time.rs
//!
//! Parsing and formatting of `HH:MM` wall-clock strings as minute-of-day values.

use chrono::{NaiveTime, Timelike};

/// Number of distinct minute-of-day values; valid minutes lie in `0..MINUTES_PER_DAY`.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

const TIME_FORMAT: &str = "%H:%M";

/// Raised when a string is not a zero-padded 24-hour `HH:MM` time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{input}' is not a valid HH:MM time")]
pub struct MalformedTimeError {
    pub input: String,
}

impl MalformedTimeError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

/// Parses `HH:MM` (HH in 00..=23, MM in 00..=59) into a minute of the day.
///
/// Exactly two digits are required on each side so that formatting the result
/// reproduces the input.
pub fn parse_time(text: &str) -> Result<u32, MalformedTimeError> {
    let bytes = text.as_bytes();
    let well_shaped = bytes.len() == 5
        && bytes[2] == b':'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || b.is_ascii_digit());
    if !well_shaped {
        return Err(MalformedTimeError::new(text));
    }

    let time =
        NaiveTime::parse_from_str(text, TIME_FORMAT).map_err(|_| MalformedTimeError::new(text))?;
    Ok(time.hour() * 60 + time.minute())
}

/// Renders a minute of the day as `HH:MM`. Values past midnight wrap around.
pub fn format_time(minute_of_day: u32) -> String {
    let minute_of_day = minute_of_day % MINUTES_PER_DAY;
    format!("{:02}:{:02}", minute_of_day / 60, minute_of_day % 60)
}
