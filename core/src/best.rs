//! Best-time selection.
//!
//! Records are partitioned by a [`Grouping`] and the fastest record in each
//! group is kept. Grouping by style compares per-100 paces so different
//! distances can compete; grouping by distance and style compares raw times.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ComputeError, DistanceNonPositiveError};
use crate::models::{SwimStyle, TimedRecord};
use crate::pace::{normalize_to_per_100, PaceValue};
use crate::time::TimeValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    Style,
    DistanceStyle,
}

/// How two records with the same comparison time are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Earlier session date wins, then earlier input position.
    #[default]
    EarliestDate,
    /// First record in input order wins.
    InputOrder,
}

/// Orders by distance, then by style name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
    Style(SwimStyle),
    DistanceStyle { distance: u32, style: SwimStyle },
}

impl GroupKey {
    pub fn style(&self) -> SwimStyle {
        match self {
            GroupKey::Style(style) | GroupKey::DistanceStyle { style, .. } => *style,
        }
    }
}

/// The time a record competed with inside its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestMark {
    Raw(TimeValue),
    Pace(PaceValue),
}

impl BestMark {
    pub fn time(&self) -> TimeValue {
        match self {
            BestMark::Raw(time) => *time,
            BestMark::Pace(pace) => pace.time(),
        }
    }
}

/// Winning record of a group. The record gives date and distance provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestTime<'a> {
    pub record: &'a TimedRecord,
    pub mark: BestMark,
}

impl BestTime<'_> {
    pub fn time(&self) -> TimeValue {
        self.mark.time()
    }
}

/// Select the fastest record per group.
///
/// A record replaces the current holder only when strictly faster, or when it
/// ties and `tie_break` prefers it. Records with a zero distance are rejected.
pub fn select_best<'a, I>(
    records: I,
    grouping: Grouping,
    tie_break: TieBreak,
) -> Result<BTreeMap<GroupKey, BestTime<'a>>, ComputeError>
where
    I: IntoIterator<Item = &'a TimedRecord>,
{
    let mut best: BTreeMap<GroupKey, BestTime<'a>> = BTreeMap::new();
    let mut seen = 0usize;

    for record in records {
        seen += 1;
        if record.distance == 0 {
            return Err(DistanceNonPositiveError { distance: 0 }.into());
        }

        let (key, mark) = match grouping {
            Grouping::Style => (
                GroupKey::Style(record.style),
                BestMark::Pace(normalize_to_per_100(record.time, record.distance)?),
            ),
            Grouping::DistanceStyle => (
                GroupKey::DistanceStyle {
                    distance: record.distance,
                    style: record.style,
                },
                BestMark::Raw(record.time),
            ),
        };

        let candidate = BestTime { record, mark };
        let keep_current = best
            .get(&key)
            .is_some_and(|current| !replaces(&candidate, current, tie_break));
        if !keep_current {
            best.insert(key, candidate);
        }
    }

    debug!(records = seen, groups = best.len(), ?grouping, "selected best times");
    Ok(best)
}

fn replaces(candidate: &BestTime<'_>, current: &BestTime<'_>, tie_break: TieBreak) -> bool {
    let (new, old) = (candidate.time(), current.time());
    if new != old {
        return new < old;
    }
    match tie_break {
        TieBreak::EarliestDate => candidate.record.date < current.record.date,
        TieBreak::InputOrder => false,
    }
}

/// Fastest raw time per exact distance and style.
pub fn best_by_distance_style(
    records: &[TimedRecord],
    tie_break: TieBreak,
) -> Result<BTreeMap<(u32, SwimStyle), BestTime<'_>>, ComputeError> {
    Ok(select_best(records, Grouping::DistanceStyle, tie_break)?
        .into_iter()
        .filter_map(|(key, best)| match key {
            GroupKey::DistanceStyle { distance, style } => Some(((distance, style), best)),
            GroupKey::Style(_) => None,
        })
        .collect())
}

/// Fastest per-100 pace per style, across all distances.
pub fn best_pace_by_style(
    records: &[TimedRecord],
    tie_break: TieBreak,
) -> Result<BTreeMap<SwimStyle, BestTime<'_>>, ComputeError> {
    Ok(select_best(records, Grouping::Style, tie_break)?
        .into_iter()
        .map(|(key, best)| (key.style(), best))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn record(id: &str, style: SwimStyle, distance: u32, time: &str, day: u32) -> TimedRecord {
        TimedRecord::new(id, "me", style, distance, time.parse().unwrap(), date(day))
    }

    #[test]
    fn test_best_by_distance_style() {
        let records = vec![
            record("a", SwimStyle::Freestyle, 100, "01:10.00", 1),
            record("b", SwimStyle::Freestyle, 100, "01:05.00", 2),
            record("c", SwimStyle::Freestyle, 100, "01:08.00", 3),
        ];

        let best = best_by_distance_style(&records, TieBreak::default()).unwrap();
        assert_eq!(best.len(), 1);
        let winner = &best[&(100, SwimStyle::Freestyle)];
        assert_eq!(winner.time().to_string(), "01:05.00");
        assert_eq!(winner.record.id.0, "b");
        assert_eq!(winner.record.date, date(2));
    }

    #[test]
    fn test_groups_are_separate() {
        let records = vec![
            record("a", SwimStyle::Freestyle, 100, "01:10.00", 1),
            record("b", SwimStyle::Freestyle, 200, "02:30.00", 1),
            record("c", SwimStyle::Butterfly, 100, "01:20.00", 1),
        ];

        let best = select_best(&records, Grouping::DistanceStyle, TieBreak::default()).unwrap();
        let keys: Vec<_> = best.keys().copied().collect();
        assert_eq!(
            keys,
            vec![
                GroupKey::DistanceStyle {
                    distance: 100,
                    style: SwimStyle::Butterfly
                },
                GroupKey::DistanceStyle {
                    distance: 100,
                    style: SwimStyle::Freestyle
                },
                GroupKey::DistanceStyle {
                    distance: 200,
                    style: SwimStyle::Freestyle
                },
            ]
        );
    }

    #[test]
    fn test_best_pace_by_style_across_distances() {
        let records = vec![
            // 1:05.00 per 100
            record("a", SwimStyle::Freestyle, 100, "01:05.00", 1),
            // 1:02.50 per 100
            record("b", SwimStyle::Freestyle, 400, "04:10.00", 5),
            record("c", SwimStyle::Medley, 200, "03:00.00", 6),
        ];

        let best = best_pace_by_style(&records, TieBreak::default()).unwrap();
        let free = &best[&SwimStyle::Freestyle];
        assert_eq!(free.time().to_string(), "01:02.50");
        assert_eq!(free.record.distance, 400);
        assert_eq!(free.record.date, date(5));
        assert!(matches!(free.mark, BestMark::Pace(_)));
        assert_eq!(best[&SwimStyle::Medley].time().to_string(), "01:30.00");
        assert!(!best.contains_key(&SwimStyle::Butterfly));
    }

    #[test]
    fn test_tie_break_earliest_date() {
        let records = vec![
            record("late", SwimStyle::Backstroke, 50, "00:35.00", 20),
            record("early", SwimStyle::Backstroke, 50, "00:35.00", 3),
        ];

        let best = best_by_distance_style(&records, TieBreak::EarliestDate).unwrap();
        assert_eq!(best[&(50, SwimStyle::Backstroke)].record.id.0, "early");
    }

    #[test]
    fn test_tie_break_input_order() {
        let records = vec![
            record("late", SwimStyle::Backstroke, 50, "00:35.00", 20),
            record("early", SwimStyle::Backstroke, 50, "00:35.00", 3),
        ];

        let best = best_by_distance_style(&records, TieBreak::InputOrder).unwrap();
        assert_eq!(best[&(50, SwimStyle::Backstroke)].record.id.0, "late");
    }

    #[test]
    fn test_same_date_tie_keeps_first() {
        let records = vec![
            record("first", SwimStyle::Medley, 200, "02:40.00", 4),
            record("second", SwimStyle::Medley, 200, "02:40.00", 4),
        ];

        let best = best_by_distance_style(&records, TieBreak::EarliestDate).unwrap();
        assert_eq!(best[&(200, SwimStyle::Medley)].record.id.0, "first");
    }

    #[test]
    fn test_style_grouping_tie_break() {
        // Both normalize to 1:00.00 per 100.
        let records = vec![
            record("hundred", SwimStyle::Freestyle, 100, "01:00.00", 10),
            record("two-hundred", SwimStyle::Freestyle, 200, "02:00.00", 3),
        ];

        let best = best_pace_by_style(&records, TieBreak::EarliestDate).unwrap();
        let winner = &best[&SwimStyle::Freestyle];
        assert_eq!(winner.record.id.0, "two-hundred");
        assert_eq!(winner.record.distance, 200);
        assert_eq!(winner.record.date, date(3));
        assert_eq!(winner.time().to_string(), "01:00.00");

        let best = best_pace_by_style(&records, TieBreak::InputOrder).unwrap();
        let winner = &best[&SwimStyle::Freestyle];
        assert_eq!(winner.record.id.0, "hundred");
        assert_eq!(winner.record.distance, 100);
        assert_eq!(winner.time().to_string(), "01:00.00");
    }

    #[test]
    fn test_empty_input() {
        let records: Vec<TimedRecord> = Vec::new();
        let best = select_best(&records, Grouping::Style, TieBreak::default()).unwrap();
        assert!(best.is_empty());
    }

    #[test]
    fn test_zero_distance_rejected() {
        let records = vec![record("z", SwimStyle::Freestyle, 0, "01:00.00", 1)];
        assert_eq!(
            select_best(&records, Grouping::DistanceStyle, TieBreak::default()).unwrap_err(),
            ComputeError::Distance(DistanceNonPositiveError { distance: 0 })
        );
    }
}
