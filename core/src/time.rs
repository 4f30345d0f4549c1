//! Elapsed swim times.
//!
//! A [`TimeValue`] holds minutes, seconds and centiseconds and always satisfies
//! `seconds < 60` and `centiseconds < 100`. Ordering and arithmetic go through
//! the integer total in centiseconds, so comparisons are exact.
//!
//! # Example
//!
//! ```
//! use swimlog_compute::time::TimeValue;
//!
//! let best: TimeValue = "01:05.00".parse().expect("valid time");
//! let other: TimeValue = "1:10.0".parse().expect("valid time");
//!
//! assert!(best < other);
//! assert_eq!(other.to_string(), "01:10.00");
//! assert_eq!(best.total_centiseconds(), 6500);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use nom::{
    bytes::complete::{take_while1, take_while_m_n},
    character::complete::char,
    combinator::all_consuming,
    sequence::preceded,
    IResult, Parser,
};
use tracing::trace;

use crate::error::{InvalidTimeError, ParseFailure, TimeField};

pub const CENTIS_PER_SECOND: u64 = 100;
pub const CENTIS_PER_MINUTE: u64 = 60 * CENTIS_PER_SECOND;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimeValue {
    minutes: u32,
    seconds: u8,
    centiseconds: u8,
}

impl TimeValue {
    /// Build a time from already-structured fields.
    pub fn new(minutes: u32, seconds: u32, centiseconds: u32) -> Result<Self, InvalidTimeError> {
        Self::from_fields(minutes as i64, seconds as i64, centiseconds as i64)
    }

    /// Build a time from signed fields as they come out of a store row.
    ///
    /// Negative values and values past the field limits are rejected, never
    /// clamped.
    pub fn from_fields(minutes: i64, seconds: i64, centiseconds: i64) -> Result<Self, InvalidTimeError> {
        let check = |field: TimeField, value: i64| {
            if value < 0 || value as u64 > field.max() {
                Err(InvalidTimeError { field, value })
            } else {
                Ok(())
            }
        };
        check(TimeField::Minutes, minutes)?;
        check(TimeField::Seconds, seconds)?;
        check(TimeField::Centiseconds, centiseconds)?;

        Ok(TimeValue {
            minutes: minutes as u32,
            seconds: seconds as u8,
            centiseconds: centiseconds as u8,
        })
    }

    /// Decompose a centisecond total, carrying into seconds and minutes.
    pub fn from_total_centiseconds(total: u64) -> Result<Self, InvalidTimeError> {
        let minutes = total / CENTIS_PER_MINUTE;
        let rest = total % CENTIS_PER_MINUTE;
        let minutes = u32::try_from(minutes).map_err(|_| InvalidTimeError {
            field: TimeField::Minutes,
            value: i64::try_from(minutes).unwrap_or(i64::MAX),
        })?;

        Ok(TimeValue {
            minutes,
            seconds: (rest / CENTIS_PER_SECOND) as u8,
            centiseconds: (rest % CENTIS_PER_SECOND) as u8,
        })
    }

    /// Parse `M:SS.CC` text. Minutes take any number of digits; seconds and
    /// centiseconds take one or two.
    pub fn parse(input: &str) -> Result<Self, ParseFailure> {
        let (_, (minutes, seconds, centiseconds)) = all_consuming(time_fields)
            .parse(input)
            .map_err(|_| {
                trace!(input, "rejected malformed time");
                ParseFailure::Malformed {
                    input: input.to_string(),
                }
            })?;

        let out_of_range = |field: TimeField, digits: &str| ParseFailure::OutOfRange {
            input: input.to_string(),
            field,
            value: digits.to_string(),
        };

        let minutes_value: u32 = minutes
            .parse()
            .map_err(|_| out_of_range(TimeField::Minutes, minutes))?;
        let seconds_value = field_value(seconds);
        let centis_value = field_value(centiseconds);

        if seconds_value as u64 > TimeField::Seconds.max() {
            return Err(out_of_range(TimeField::Seconds, seconds));
        }
        if centis_value as u64 > TimeField::Centiseconds.max() {
            return Err(out_of_range(TimeField::Centiseconds, centiseconds));
        }

        Ok(TimeValue {
            minutes: minutes_value,
            seconds: seconds_value,
            centiseconds: centis_value,
        })
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds as u32
    }

    pub fn centiseconds(&self) -> u32 {
        self.centiseconds as u32
    }

    pub fn total_centiseconds(&self) -> u64 {
        self.minutes as u64 * CENTIS_PER_MINUTE
            + self.seconds as u64 * CENTIS_PER_SECOND
            + self.centiseconds as u64
    }

    /// Total elapsed seconds. For display only; compare with [`Ord`].
    pub fn total_seconds(&self) -> f64 {
        self.total_centiseconds() as f64 / CENTIS_PER_SECOND as f64
    }

    /// Copy with a different field value, revalidated.
    pub fn with_field(&self, field: TimeField, value: u32) -> Result<Self, InvalidTimeError> {
        match field {
            TimeField::Minutes => Self::new(value, self.seconds(), self.centiseconds()),
            TimeField::Seconds => Self::new(self.minutes, value, self.centiseconds()),
            TimeField::Centiseconds => Self::new(self.minutes, self.seconds(), value),
        }
    }
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Value of a one or two digit field already matched by the grammar.
fn field_value(digits: &str) -> u8 {
    digits
        .bytes()
        .fold(0, |acc, b| acc * 10 + (b - b'0'))
}

fn time_fields(input: &str) -> IResult<&str, (&str, &str, &str)> {
    (
        take_while1(is_digit),
        preceded(char(':'), take_while_m_n(1, 2, is_digit)),
        preceded(char('.'), take_while_m_n(1, 2, is_digit)),
    )
        .parse(input)
}

impl Ord for TimeValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_centiseconds().cmp(&other.total_centiseconds())
    }
}

impl PartialOrd for TimeValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for TimeValue {
    type Err = ParseFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeValue::parse(s)
    }
}

/// `MM:SS.CC`, every field at least two digits wide. Minutes are never truncated.
impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}.{:02}",
            self.minutes, self.seconds, self.centiseconds
        )
    }
}
