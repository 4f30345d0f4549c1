//! Aggregate statistics for an athlete's swim log.
//!
//! This module provides pure functions over record slices for dashboard and
//! profile views. No storage access happens here.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::best::{best_by_distance_style, best_pace_by_style, BestTime};
use crate::config::ComputeConfig;
use crate::error::ComputeError;
use crate::models::{SwimStyle, TimedRecord};

/// Computed statistics for a set of swim sessions.
#[derive(Debug, Clone)]
pub struct SwimStats<'a> {
    /// Number of sessions
    pub total_sessions: usize,
    /// Sum of session distances in meters
    pub total_distance_m: u64,
    /// Date of the most recent session
    pub last_session_date: Option<NaiveDate>,
    /// Session count for every style, zero counts included
    pub sessions_by_style: BTreeMap<SwimStyle, usize>,
    /// Style with the most sessions
    pub most_popular_style: Option<SwimStyle>,
    /// Fastest per-100 pace per style
    pub best_pace_by_style: BTreeMap<SwimStyle, BestTime<'a>>,
    /// Fastest raw time per distance and style
    pub best_times: BTreeMap<(u32, SwimStyle), BestTime<'a>>,
    /// Distinct distances, ascending
    pub distances: Vec<u32>,
    /// Configured common distances present in the log, in config order
    pub distance_tabs: Vec<u32>,
}

impl<'a> SwimStats<'a> {
    /// Compute statistics from a set of records.
    pub fn compute(records: &'a [TimedRecord], config: &ComputeConfig) -> Result<Self, ComputeError> {
        let total_distance_m = records.iter().map(|r| r.distance as u64).sum();
        let last_session_date = records.iter().map(|r| r.date).max();

        let mut sessions_by_style: BTreeMap<SwimStyle, usize> =
            SwimStyle::ALL.into_iter().map(|style| (style, 0)).collect();
        for record in records {
            *sessions_by_style.entry(record.style).or_default() += 1;
        }

        let mut distances: Vec<u32> = records.iter().map(|r| r.distance).collect();
        distances.sort_unstable();
        distances.dedup();

        let distance_tabs = config
            .common_distances
            .iter()
            .copied()
            .filter(|d| distances.binary_search(d).is_ok())
            .collect();

        Ok(SwimStats {
            total_sessions: records.len(),
            total_distance_m,
            last_session_date,
            most_popular_style: most_popular(&sessions_by_style),
            sessions_by_style,
            best_pace_by_style: best_pace_by_style(records, config.tie_break)?,
            best_times: best_by_distance_style(records, config.tie_break)?,
            distances,
            distance_tabs,
        })
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_m as f64 / 1000.0
    }

    /// Best times at one distance, in style name order.
    pub fn best_times_at(&self, distance: u32) -> impl Iterator<Item = (SwimStyle, &BestTime<'a>)> {
        self.best_times
            .range((distance, SwimStyle::Backstroke)..=(distance, SwimStyle::Medley))
            .map(|((_, style), best)| (*style, best))
    }
}

/// Highest count wins; ties go to the earlier style in dashboard order.
fn most_popular(counts: &BTreeMap<SwimStyle, usize>) -> Option<SwimStyle> {
    let mut winner: Option<(SwimStyle, usize)> = None;
    for style in SwimStyle::ALL {
        let count = counts.get(&style).copied().unwrap_or(0);
        if count > winner.map_or(0, |(_, c)| c) {
            winner = Some((style, count));
        }
    }
    winner.map(|(style, _)| style)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(style: SwimStyle, distance: u32, time: &str, date: &str) -> TimedRecord {
        TimedRecord::new(
            format!("{style}-{distance}-{date}"),
            "me",
            style,
            distance,
            time.parse().unwrap(),
            date.parse().unwrap(),
        )
    }

    fn create_test_records() -> Vec<TimedRecord> {
        vec![
            record(SwimStyle::Freestyle, 100, "01:05.00", "2024-01-10"),
            record(SwimStyle::Freestyle, 400, "04:40.00", "2024-02-01"),
            record(SwimStyle::Freestyle, 100, "01:03.50", "2024-03-05"),
            record(SwimStyle::Breaststroke, 200, "03:20.00", "2024-02-15"),
            record(SwimStyle::Breaststroke, 50, "00:42.00", "2024-01-20"),
            record(SwimStyle::Medley, 75, "01:10.00", "2023-12-30"),
        ]
    }

    #[test]
    fn test_swim_stats_compute() {
        let records = create_test_records();
        let stats = SwimStats::compute(&records, &ComputeConfig::default()).unwrap();

        assert_eq!(stats.total_sessions, 6);
        assert_eq!(stats.total_distance_m, 925);
        assert!((stats.total_distance_km() - 0.925).abs() < f64::EPSILON);
        assert_eq!(stats.last_session_date, Some("2024-03-05".parse().unwrap()));
        assert_eq!(stats.sessions_by_style[&SwimStyle::Freestyle], 3);
        assert_eq!(stats.sessions_by_style[&SwimStyle::Butterfly], 0);
        assert_eq!(stats.sessions_by_style.len(), 5);
        assert_eq!(stats.most_popular_style, Some(SwimStyle::Freestyle));
        assert_eq!(stats.distances, vec![50, 75, 100, 200, 400]);
        assert_eq!(stats.distance_tabs, vec![50, 100, 200, 400]);
    }

    #[test]
    fn test_best_paces_and_times() {
        let records = create_test_records();
        let stats = SwimStats::compute(&records, &ComputeConfig::default()).unwrap();

        let free = &stats.best_pace_by_style[&SwimStyle::Freestyle];
        assert_eq!(free.time().to_string(), "01:03.50");
        assert_eq!(free.record.distance, 100);

        // 42.00 over 50 is 1:24.00 per 100, faster than 1:40.00 over 200.
        let breast = &stats.best_pace_by_style[&SwimStyle::Breaststroke];
        assert_eq!(breast.time().to_string(), "01:24.00");
        assert_eq!(breast.record.distance, 50);

        // 1:10.00 over 75 is 93.33 s per 100.
        assert_eq!(
            stats.best_pace_by_style[&SwimStyle::Medley].time().to_string(),
            "01:33.33"
        );

        let at_100: Vec<_> = stats
            .best_times_at(100)
            .map(|(style, best)| (style, best.time().to_string()))
            .collect();
        assert_eq!(at_100, vec![(SwimStyle::Freestyle, "01:03.50".to_string())]);
    }

    #[test]
    fn test_swim_stats_empty() {
        let stats = SwimStats::compute(&[], &ComputeConfig::default()).unwrap();

        assert_eq!(stats.total_sessions, 0);
        assert_eq!(stats.total_distance_m, 0);
        assert_eq!(stats.last_session_date, None);
        assert_eq!(stats.most_popular_style, None);
        assert!(stats.best_pace_by_style.is_empty());
        assert!(stats.distance_tabs.is_empty());
    }

    #[test]
    fn test_most_popular_tie_uses_dashboard_order() {
        let records = vec![
            record(SwimStyle::Medley, 100, "01:20.00", "2024-01-01"),
            record(SwimStyle::Butterfly, 100, "01:15.00", "2024-01-02"),
        ];
        let stats = SwimStats::compute(&records, &ComputeConfig::default()).unwrap();
        assert_eq!(stats.most_popular_style, Some(SwimStyle::Butterfly));
    }
}
