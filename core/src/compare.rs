//! Head-to-head best-time comparison between two athletes.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use tracing::debug;

use crate::best::{best_by_distance_style, BestTime, TieBreak};
use crate::error::ComputeError;
use crate::models::{SwimStyle, TimedRecord};
use crate::time::{TimeValue, CENTIS_PER_MINUTE, CENTIS_PER_SECOND};

/// Both athletes' best at one distance and style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub distance: u32,
    pub style: SwimStyle,
    pub self_time: Option<TimeValue>,
    pub self_date: Option<NaiveDate>,
    pub other_time: Option<TimeValue>,
    pub other_date: Option<NaiveDate>,
    /// `other - self` in centiseconds; positive means self is faster. Zero
    /// whenever either side is missing.
    pub difference_centiseconds: i64,
}

impl Comparison {
    pub fn is_complete(&self) -> bool {
        self.self_time.is_some() && self.other_time.is_some()
    }

    pub fn difference_seconds(&self) -> f64 {
        self.difference_centiseconds as f64 / CENTIS_PER_SECOND as f64
    }

    pub fn verdict(&self) -> Verdict {
        if !self.is_complete() {
            return Verdict::Incomplete;
        }
        let gap = TimeGap(self.difference_centiseconds.unsigned_abs());
        match self.difference_centiseconds.signum() {
            1 => Verdict::Faster(gap),
            -1 => Verdict::Slower(gap),
            _ => Verdict::Tied,
        }
    }
}

/// Unsigned difference between two times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeGap(pub u64);

/// `M:SS.CC` when at least a minute, otherwise `S.CC`.
impl fmt::Display for TimeGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.0 / CENTIS_PER_MINUTE;
        let seconds = (self.0 % CENTIS_PER_MINUTE) / CENTIS_PER_SECOND;
        let centis = self.0 % CENTIS_PER_SECOND;
        if minutes > 0 {
            write!(f, "{}:{:02}.{:02}", minutes, seconds, centis)
        } else {
            write!(f, "{}.{:02}", seconds, centis)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// At least one athlete has no time for this event.
    Incomplete,
    Faster(TimeGap),
    Slower(TimeGap),
    Tied,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Incomplete => f.write_str("incomplete"),
            Verdict::Faster(gap) => write!(f, "faster by {gap}"),
            Verdict::Slower(gap) => write!(f, "slower by {gap}"),
            Verdict::Tied => f.write_str("tied"),
        }
    }
}

/// Pair up both athletes' best times for every distance and style either one
/// has swum, ordered by distance then style name.
pub fn build_comparisons(
    self_records: &[TimedRecord],
    other_records: &[TimedRecord],
    tie_break: TieBreak,
) -> Result<Vec<Comparison>, ComputeError> {
    let self_best = best_by_distance_style(self_records, tie_break)?;
    let other_best = best_by_distance_style(other_records, tie_break)?;

    let keys: BTreeSet<(u32, SwimStyle)> = self_best
        .keys()
        .chain(other_best.keys())
        .copied()
        .collect();

    let comparisons: Vec<Comparison> = keys
        .into_iter()
        .map(|key| {
            let mine = self_best.get(&key);
            let theirs = other_best.get(&key);
            comparison(key, mine, theirs)
        })
        .collect();

    debug!(
        events = comparisons.len(),
        complete = comparisons.iter().filter(|c| c.is_complete()).count(),
        "built comparisons"
    );
    Ok(comparisons)
}

fn comparison(
    (distance, style): (u32, SwimStyle),
    mine: Option<&BestTime<'_>>,
    theirs: Option<&BestTime<'_>>,
) -> Comparison {
    let difference_centiseconds = match (mine, theirs) {
        (Some(mine), Some(theirs)) => {
            theirs.time().total_centiseconds() as i64 - mine.time().total_centiseconds() as i64
        }
        _ => 0,
    };

    Comparison {
        distance,
        style,
        self_time: mine.map(BestTime::time),
        self_date: mine.map(|b| b.record.date),
        other_time: theirs.map(BestTime::time),
        other_date: theirs.map(|b| b.record.date),
        difference_centiseconds,
    }
}
