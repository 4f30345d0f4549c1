use std::fmt;

use thiserror::Error;

/// A component of a swim time, used to say which part of an input was wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeField {
    Minutes,
    Seconds,
    Centiseconds,
}

impl TimeField {
    /// Largest value the field may hold.
    pub fn max(self) -> u64 {
        match self {
            TimeField::Minutes => u32::MAX as u64,
            TimeField::Seconds => 59,
            TimeField::Centiseconds => 99,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeField::Minutes => "minutes",
            TimeField::Seconds => "seconds",
            TimeField::Centiseconds => "centiseconds",
        }
    }
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when time text cannot be turned into a [`TimeValue`](crate::time::TimeValue).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("malformed time '{input}': expected MM:SS.CC")]
    Malformed { input: String },

    /// `value` holds the digits exactly as typed.
    #[error("{field} out of range in '{input}': {value} (max {max})", max = .field.max())]
    OutOfRange {
        input: String,
        field: TimeField,
        value: String,
    },
}

impl ParseFailure {
    /// The field that failed validation, if the text was structurally valid.
    pub fn field(&self) -> Option<TimeField> {
        match self {
            ParseFailure::Malformed { .. } => None,
            ParseFailure::OutOfRange { field, .. } => Some(*field),
        }
    }
}

/// Structured time fields that violate the time invariant.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid {field}: {value} (expected 0..={max})", max = .field.max())]
pub struct InvalidTimeError {
    pub field: TimeField,
    pub value: i64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown style '{0}'")]
pub struct UnknownStyle(pub String);

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("distance must be positive, got {distance}")]
pub struct DistanceNonPositiveError {
    pub distance: i64,
}

/// Error type for pace normalization, best-time selection and comparison.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeError {
    #[error(transparent)]
    Distance(#[from] DistanceNonPositiveError),

    #[error("pace out of range: {0}")]
    PaceOverflow(#[from] InvalidTimeError),
}

/// Error raised while decoding a stored session row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("session {id}: {source}")]
    InvalidTime {
        id: String,
        #[source]
        source: InvalidTimeError,
    },

    #[error("session {id}: {source}")]
    Distance {
        id: String,
        #[source]
        source: DistanceNonPositiveError,
    },

    #[error("session {id}: unknown {kind} '{value}'")]
    UnknownValue {
        id: String,
        kind: &'static str,
        value: String,
    },

    #[error("session {id}: invalid date '{value}'")]
    InvalidDate { id: String, value: String },
}

impl RecordError {
    pub fn id(&self) -> &str {
        match self {
            RecordError::InvalidTime { id, .. }
            | RecordError::Distance { id, .. }
            | RecordError::UnknownValue { id, .. }
            | RecordError::InvalidDate { id, .. } => id,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("session not found: {0}")]
    NotFound(String),

    #[error("session {id} belongs to {owner}, not {requested}")]
    OwnerMismatch {
        id: String,
        owner: String,
        requested: String,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("common distances must be positive")]
    ZeroDistance,
}
