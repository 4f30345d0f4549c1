//! Per-100 pace normalization.
//!
//! Scales a time over any distance to the equivalent time over 100 distance
//! units so swims of different lengths can be ranked together.

use std::fmt;

use crate::error::{ComputeError, DistanceNonPositiveError};
use crate::time::TimeValue;

/// Distance every pace is expressed against.
pub const PACE_BASIS: u64 = 100;

/// A [`TimeValue`] meaning "per 100 distance units". Only produced by
/// [`normalize_to_per_100`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaceValue(TimeValue);

impl PaceValue {
    pub fn time(&self) -> TimeValue {
        self.0
    }

    /// Short `M:SS min/100m` label; centiseconds are dropped.
    pub fn label(&self) -> String {
        format!(
            "{}:{:02} min/100m",
            self.0.minutes(),
            self.0.seconds()
        )
    }
}

impl fmt::Display for PaceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Normalize `time` swum over `distance` to a per-100 pace.
///
/// The result is rounded half-up to the nearest centisecond, and the rounding
/// carries into seconds and minutes, so the returned time always satisfies the
/// field invariants.
pub fn normalize_to_per_100(time: TimeValue, distance: u32) -> Result<PaceValue, ComputeError> {
    if distance == 0 {
        return Err(DistanceNonPositiveError { distance: 0 }.into());
    }
    let distance = distance as u64;

    let scaled = time.total_centiseconds() * PACE_BASIS;
    let rounded = (scaled * 2 + distance) / (distance * 2);

    Ok(PaceValue(TimeValue::from_total_centiseconds(rounded)?))
}
