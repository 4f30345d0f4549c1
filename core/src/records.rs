//! Decoding of session rows as the hosted store returns them.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{DistanceNonPositiveError, RecordError, UnknownStyle};
use crate::models::{
    AthleteId, ChronoType, PoolLength, SessionDetails, SessionId, SessionType, SwimStyle,
    TimedRecord,
};
use crate::time::TimeValue;

/// One row of the `swim_sessions` table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRow {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub style: String,
    pub distance: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub centiseconds: i64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pool_length: Option<String>,
    #[serde(default)]
    pub chrono_type: Option<String>,
    #[serde(default)]
    pub session_type: Option<String>,
}

impl TryFrom<SessionRow> for TimedRecord {
    type Error = RecordError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        let style: SwimStyle = row.style.parse().map_err(|UnknownStyle(value)| {
            RecordError::UnknownValue {
                id: row.id.clone(),
                kind: "style",
                value,
            }
        })?;

        let distance = u32::try_from(row.distance)
            .ok()
            .filter(|d| *d > 0)
            .ok_or_else(|| RecordError::Distance {
                id: row.id.clone(),
                source: DistanceNonPositiveError {
                    distance: row.distance,
                },
            })?;

        let time = TimeValue::from_fields(row.minutes, row.seconds, row.centiseconds).map_err(
            |source| RecordError::InvalidTime {
                id: row.id.clone(),
                source,
            },
        )?;

        let date = parse_date(&row.date).ok_or_else(|| RecordError::InvalidDate {
            id: row.id.clone(),
            value: row.date.clone(),
        })?;

        let details = SessionDetails {
            pool_length: optional(&row.id, "pool length", row.pool_length.as_deref(), PoolLength::parse)?,
            chrono_type: optional(&row.id, "chrono type", row.chrono_type.as_deref(), ChronoType::parse)?,
            session_type: optional(&row.id, "session type", row.session_type.as_deref(), SessionType::parse)?,
            location: row.location,
            description: row.description.unwrap_or_default(),
        };

        Ok(TimedRecord {
            id: SessionId(row.id),
            owner_id: AthleteId(row.user_id),
            style,
            distance,
            time,
            date,
            details,
        })
    }
}

impl From<&TimedRecord> for SessionRow {
    fn from(record: &TimedRecord) -> Self {
        SessionRow {
            id: record.id.0.clone(),
            user_id: record.owner_id.0.clone(),
            date: record.date.format("%Y-%m-%d").to_string(),
            style: record.style.as_str().to_string(),
            distance: record.distance as i64,
            minutes: record.time.minutes() as i64,
            seconds: record.time.seconds() as i64,
            centiseconds: record.time.centiseconds() as i64,
            location: record.details.location.clone(),
            description: Some(record.details.description.clone()).filter(|d| !d.is_empty()),
            pool_length: record.details.pool_length.map(|p| match p {
                PoolLength::Short => "25m".to_string(),
                PoolLength::Long => "50m".to_string(),
            }),
            chrono_type: record.details.chrono_type.map(|c| match c {
                ChronoType::Manual => "manual".to_string(),
                ChronoType::Electronic => "electronic".to_string(),
            }),
            session_type: record.details.session_type.map(|s| match s {
                SessionType::Pool => "pool".to_string(),
                SessionType::OpenWater => "open water".to_string(),
            }),
        }
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, keeping the date part.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

fn optional<T>(
    id: &str,
    kind: &'static str,
    value: Option<&str>,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, RecordError> {
    match value {
        None | Some("") => Ok(None),
        Some(v) => parse(v).map(Some).ok_or_else(|| RecordError::UnknownValue {
            id: id.to_string(),
            kind,
            value: v.to_string(),
        }),
    }
}

/// Decode a batch of rows, stopping at the first row that fails validation.
pub fn decode_rows(rows: Vec<SessionRow>) -> Result<Vec<TimedRecord>, RecordError> {
    rows.into_iter()
        .map(|row| {
            TimedRecord::try_from(row).inspect_err(|err| {
                warn!(session = err.id(), error = %err, "rejected stored session");
            })
        })
        .collect()
}

/// Decode rows from a JSON array as returned by the store's REST API.
pub fn decode_json(json: &str) -> Result<Vec<TimedRecord>, DecodeError> {
    let rows: Vec<SessionRow> = serde_json::from_str(json)?;
    Ok(decode_rows(rows)?)
}

#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("invalid session json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Record(#[from] RecordError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InvalidTimeError, TimeField};

    fn row() -> SessionRow {
        SessionRow {
            id: "s-1".to_string(),
            user_id: "u-1".to_string(),
            date: "2024-01-10".to_string(),
            style: "freestyle".to_string(),
            distance: 100,
            minutes: 1,
            seconds: 5,
            centiseconds: 0,
            location: "City Pool".to_string(),
            description: None,
            pool_length: Some("25m".to_string()),
            chrono_type: Some("manual".to_string()),
            session_type: Some("pool".to_string()),
        }
    }

    #[test]
    fn test_decode_valid_row() {
        let record = TimedRecord::try_from(row()).unwrap();
        assert_eq!(record.id, SessionId("s-1".to_string()));
        assert_eq!(record.owner_id, AthleteId("u-1".to_string()));
        assert_eq!(record.style, SwimStyle::Freestyle);
        assert_eq!(record.time.to_string(), "01:05.00");
        assert_eq!(record.details.pool_length, Some(PoolLength::Short));
        assert_eq!(record.details.description, "");
    }

    #[test]
    fn test_invalid_time_is_reported() {
        let bad = SessionRow {
            seconds: 60,
            ..row()
        };
        assert_eq!(
            TimedRecord::try_from(bad).unwrap_err(),
            RecordError::InvalidTime {
                id: "s-1".to_string(),
                source: InvalidTimeError {
                    field: TimeField::Seconds,
                    value: 60
                }
            }
        );
    }

    #[test]
    fn test_non_positive_distance() {
        for distance in [0, -50] {
            let bad = SessionRow { distance, ..row() };
            assert!(matches!(
                TimedRecord::try_from(bad),
                Err(RecordError::Distance { source, .. }) if source.distance == distance
            ));
        }
    }

    #[test]
    fn test_unknown_style_and_details() {
        let bad = SessionRow {
            style: "doggy".to_string(),
            ..row()
        };
        assert_eq!(
            TimedRecord::try_from(bad).unwrap_err(),
            RecordError::UnknownValue {
                id: "s-1".to_string(),
                kind: "style",
                value: "doggy".to_string(),
            }
        );

        let bad = SessionRow {
            pool_length: Some("33m".to_string()),
            ..row()
        };
        assert!(matches!(
            TimedRecord::try_from(bad),
            Err(RecordError::UnknownValue { kind: "pool length", .. })
        ));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 10);
        assert_eq!(parse_date("2024-01-10"), expected);
        assert_eq!(parse_date("2024-01-10T08:30:00+00:00"), expected);
        assert_eq!(parse_date("10/01/2024"), None);
    }

    #[test]
    fn test_row_round_trip() {
        let record = TimedRecord::try_from(row()).unwrap();
        let back = SessionRow::from(&record);
        assert_eq!(back, row());
    }

    #[test]
    fn test_decode_json() {
        let json = r#"[
            {"id": "a", "user_id": "u", "date": "2024-01-10", "style": "medley",
             "distance": 200, "minutes": 2, "seconds": 45, "centiseconds": 10,
             "location": "Pool", "description": null, "pool_length": "50m",
             "chrono_type": "electronic", "session_type": "pool"},
            {"id": "b", "user_id": "u", "date": "2024-01-11", "style": "butterfly",
             "distance": 50, "minutes": 0, "seconds": 31, "centiseconds": 2}
        ]"#;

        let records = decode_json(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].time.to_string(), "02:45.10");
        assert_eq!(records[1].details, SessionDetails::default());
    }

    #[test]
    fn test_decode_rows_stops_at_first_error() {
        let rows = vec![
            row(),
            SessionRow {
                id: "s-2".to_string(),
                date: "yesterday".to_string(),
                ..row()
            },
        ];
        let err = decode_rows(rows).unwrap_err();
        assert_eq!(err.id(), "s-2");
    }
}
