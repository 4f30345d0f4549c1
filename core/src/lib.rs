pub mod best;
pub mod compare;
pub mod config;
pub mod error;
pub mod ffi;
pub mod logging;
pub mod models;
pub mod pace;
pub mod query;
pub mod records;
pub mod stats;
pub mod storage;
pub mod time;

uniffi::setup_scaffolding!();

pub use best::{
    best_by_distance_style, best_pace_by_style, select_best, BestMark, BestTime, GroupKey,
    Grouping, TieBreak,
};
pub use compare::{build_comparisons, Comparison, TimeGap, Verdict};
pub use config::ComputeConfig;
pub use error::{
    ComputeError, ConfigError, DistanceNonPositiveError, InvalidTimeError, ParseFailure,
    RecordError, StoreError, TimeField, UnknownStyle,
};
pub use logging::LogLevel;
pub use models::{
    AthleteId, AthleteProfile, ChronoType, PoolLength, SessionDetails, SessionId, SessionType,
    SwimStyle, TimedRecord,
};
pub use pace::{normalize_to_per_100, PaceValue, PACE_BASIS};
pub use query::{
    group_by_style, group_swimmer_sessions, join_swimmers, SessionQuery, SortDirection, SortField,
    SwimmerGrouping, SwimmerSession, SwimmerSessionQuery, SwimmerSortField,
};
pub use records::{decode_json, decode_rows, DecodeError, SessionRow};
pub use stats::SwimStats;
pub use storage::{AthleteDirectory, InMemoryStore, SessionStore};
pub use time::TimeValue;
