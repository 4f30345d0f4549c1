//! Foreign-function surface for the mobile app.
//!
//! Everything here is flat data: styles and session enums travel as their
//! stored strings and dates as `YYYY-MM-DD`. Records are validated through the
//! same path as store rows before any computation runs.

use crate::best::{best_by_distance_style, best_pace_by_style, BestTime};
use crate::compare::{build_comparisons, Comparison, Verdict};
use crate::config::ComputeConfig;
use crate::logging::{self, LogLevel};
use crate::models::TimedRecord;
use crate::pace::normalize_to_per_100;
use crate::records::SessionRow;
use crate::stats::SwimStats;
use crate::time::TimeValue;

#[derive(Debug, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum SwimlogError {
    #[error("{0}")]
    InvalidTime(String),

    #[error("{0}")]
    InvalidRecord(String),

    #[error("{0}")]
    Compute(String),

    #[error("{0}")]
    Config(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Record)]
pub struct SwimTime {
    pub minutes: u32,
    pub seconds: u32,
    pub centiseconds: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct SwimRecord {
    pub id: String,
    pub owner_id: String,
    pub style: String,
    pub distance: u32,
    pub time: SwimTime,
    pub date: String,
    pub location: String,
    pub description: String,
    pub pool_length: Option<String>,
    pub chrono_type: Option<String>,
    pub session_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct BestTimeEntry {
    pub style: String,
    /// Distance of the winning session.
    pub distance: u32,
    pub time: SwimTime,
    pub formatted: String,
    pub date: String,
    pub session_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum ComparisonVerdict {
    Incomplete,
    Faster,
    Slower,
    Tied,
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct ComparisonEntry {
    pub distance: u32,
    pub style: String,
    pub self_time: Option<SwimTime>,
    pub self_date: Option<String>,
    pub other_time: Option<SwimTime>,
    pub other_date: Option<String>,
    pub difference_centiseconds: i64,
    pub verdict: ComparisonVerdict,
    pub verdict_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct StyleCount {
    pub style: String,
    pub sessions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct StatsSummary {
    pub total_sessions: u64,
    pub total_distance_m: u64,
    pub last_session_date: Option<String>,
    pub sessions_by_style: Vec<StyleCount>,
    pub most_popular_style: Option<String>,
    pub best_paces: Vec<BestTimeEntry>,
    pub best_times: Vec<BestTimeEntry>,
    pub distances: Vec<u32>,
    pub distance_tabs: Vec<u32>,
}

impl From<TimeValue> for SwimTime {
    fn from(time: TimeValue) -> Self {
        SwimTime {
            minutes: time.minutes(),
            seconds: time.seconds(),
            centiseconds: time.centiseconds(),
        }
    }
}

impl TryFrom<SwimTime> for TimeValue {
    type Error = SwimlogError;

    fn try_from(time: SwimTime) -> Result<Self, Self::Error> {
        TimeValue::new(time.minutes, time.seconds, time.centiseconds)
            .map_err(|e| SwimlogError::InvalidTime(e.to_string()))
    }
}

impl From<SwimRecord> for SessionRow {
    fn from(record: SwimRecord) -> Self {
        SessionRow {
            id: record.id,
            user_id: record.owner_id,
            date: record.date,
            style: record.style,
            distance: record.distance as i64,
            minutes: record.time.minutes as i64,
            seconds: record.time.seconds as i64,
            centiseconds: record.time.centiseconds as i64,
            location: record.location,
            description: Some(record.description),
            pool_length: record.pool_length,
            chrono_type: record.chrono_type,
            session_type: record.session_type,
        }
    }
}

fn decode(records: Vec<SwimRecord>) -> Result<Vec<TimedRecord>, SwimlogError> {
    records
        .into_iter()
        .map(|r| TimedRecord::try_from(SessionRow::from(r)))
        .collect::<Result<_, _>>()
        .map_err(|e| SwimlogError::InvalidRecord(e.to_string()))
}

fn config(json: Option<String>) -> Result<ComputeConfig, SwimlogError> {
    match json {
        Some(json) => ComputeConfig::from_json(&json).map_err(|e| SwimlogError::Config(e.to_string())),
        None => Ok(ComputeConfig::default()),
    }
}

fn compute_error(e: crate::error::ComputeError) -> SwimlogError {
    SwimlogError::Compute(e.to_string())
}

fn iso(date: chrono::NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn entry(best: &BestTime<'_>) -> BestTimeEntry {
    BestTimeEntry {
        style: best.record.style.to_string(),
        distance: best.record.distance,
        time: best.time().into(),
        formatted: best.time().to_string(),
        date: iso(best.record.date),
        session_id: best.record.id.0.clone(),
    }
}

impl From<&Comparison> for ComparisonEntry {
    fn from(c: &Comparison) -> Self {
        let verdict = c.verdict();
        ComparisonEntry {
            distance: c.distance,
            style: c.style.to_string(),
            self_time: c.self_time.map(SwimTime::from),
            self_date: c.self_date.map(iso),
            other_time: c.other_time.map(SwimTime::from),
            other_date: c.other_date.map(iso),
            difference_centiseconds: c.difference_centiseconds,
            verdict: match verdict {
                Verdict::Incomplete => ComparisonVerdict::Incomplete,
                Verdict::Faster(_) => ComparisonVerdict::Faster,
                Verdict::Slower(_) => ComparisonVerdict::Slower,
                Verdict::Tied => ComparisonVerdict::Tied,
            },
            verdict_label: verdict.to_string(),
        }
    }
}

#[uniffi::export]
pub fn parse_time(text: String) -> Result<SwimTime, SwimlogError> {
    TimeValue::parse(&text)
        .map(SwimTime::from)
        .map_err(|e| SwimlogError::InvalidTime(e.to_string()))
}

#[uniffi::export]
pub fn format_time(time: SwimTime) -> Result<String, SwimlogError> {
    Ok(TimeValue::try_from(time)?.to_string())
}

#[uniffi::export]
pub fn normalize_pace(time: SwimTime, distance: u32) -> Result<SwimTime, SwimlogError> {
    let pace = normalize_to_per_100(TimeValue::try_from(time)?, distance).map_err(compute_error)?;
    Ok(pace.time().into())
}

#[uniffi::export]
pub fn best_times(
    records: Vec<SwimRecord>,
    config_json: Option<String>,
) -> Result<Vec<BestTimeEntry>, SwimlogError> {
    let config = config(config_json)?;
    let records = decode(records)?;
    let best = best_by_distance_style(&records, config.tie_break).map_err(compute_error)?;
    Ok(best.values().map(entry).collect())
}

#[uniffi::export]
pub fn best_paces(
    records: Vec<SwimRecord>,
    config_json: Option<String>,
) -> Result<Vec<BestTimeEntry>, SwimlogError> {
    let config = config(config_json)?;
    let records = decode(records)?;
    let best = best_pace_by_style(&records, config.tie_break).map_err(compute_error)?;
    Ok(best.values().map(entry).collect())
}

#[uniffi::export]
pub fn compare_best_times(
    self_records: Vec<SwimRecord>,
    other_records: Vec<SwimRecord>,
    config_json: Option<String>,
) -> Result<Vec<ComparisonEntry>, SwimlogError> {
    let config = config(config_json)?;
    let mine = decode(self_records)?;
    let theirs = decode(other_records)?;
    let comparisons = build_comparisons(&mine, &theirs, config.tie_break).map_err(compute_error)?;
    Ok(comparisons.iter().map(ComparisonEntry::from).collect())
}

#[uniffi::export]
pub fn swim_stats(
    records: Vec<SwimRecord>,
    config_json: Option<String>,
) -> Result<StatsSummary, SwimlogError> {
    let config = config(config_json)?;
    let records = decode(records)?;
    let stats = SwimStats::compute(&records, &config).map_err(compute_error)?;

    Ok(StatsSummary {
        total_sessions: stats.total_sessions as u64,
        total_distance_m: stats.total_distance_m,
        last_session_date: stats.last_session_date.map(iso),
        sessions_by_style: stats
            .sessions_by_style
            .iter()
            .map(|(style, count)| StyleCount {
                style: style.to_string(),
                sessions: *count as u64,
            })
            .collect(),
        most_popular_style: stats.most_popular_style.map(|s| s.to_string()),
        best_paces: stats.best_pace_by_style.values().map(entry).collect(),
        best_times: stats.best_times.values().map(entry).collect(),
        distances: stats.distances.clone(),
        distance_tabs: stats.distance_tabs.clone(),
    })
}

/// Returns `false` for an unknown level or when logging was already set up.
#[uniffi::export]
pub fn init_logging(level: String) -> bool {
    LogLevel::parse(&level).is_some_and(logging::init_logging)
}
