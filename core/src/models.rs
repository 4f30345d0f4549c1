use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::UnknownStyle;
use crate::time::TimeValue;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub String);

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AthleteId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for AthleteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Swim stroke. Orders by canonical name, which is the order comparisons are
/// listed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwimStyle {
    Freestyle,
    Breaststroke,
    Butterfly,
    Backstroke,
    Medley,
}

impl SwimStyle {
    /// Display order used by dashboards.
    pub const ALL: [SwimStyle; 5] = [
        SwimStyle::Freestyle,
        SwimStyle::Breaststroke,
        SwimStyle::Butterfly,
        SwimStyle::Backstroke,
        SwimStyle::Medley,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SwimStyle::Freestyle => "freestyle",
            SwimStyle::Breaststroke => "breaststroke",
            SwimStyle::Butterfly => "butterfly",
            SwimStyle::Backstroke => "backstroke",
            SwimStyle::Medley => "medley",
        }
    }
}

impl Ord for SwimStyle {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for SwimStyle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SwimStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwimStyle {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SwimStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| UnknownStyle(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolLength {
    #[serde(rename = "25m")]
    Short,
    #[serde(rename = "50m")]
    Long,
}

impl PoolLength {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "25m" => Some(PoolLength::Short),
            "50m" => Some(PoolLength::Long),
            _ => None,
        }
    }

    pub fn meters(self) -> u32 {
        match self {
            PoolLength::Short => 25,
            PoolLength::Long => 50,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChronoType {
    Manual,
    Electronic,
}

impl ChronoType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "manual" => Some(ChronoType::Manual),
            "electronic" => Some(ChronoType::Electronic),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionType {
    #[serde(rename = "pool")]
    Pool,
    #[serde(rename = "open water")]
    OpenWater,
}

impl SessionType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pool" => Some(SessionType::Pool),
            "open water" => Some(SessionType::OpenWater),
            _ => None,
        }
    }
}

/// Descriptive fields of a session that never take part in timing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionDetails {
    pub location: String,
    pub description: String,
    pub pool_length: Option<PoolLength>,
    pub chrono_type: Option<ChronoType>,
    pub session_type: Option<SessionType>,
}

/// One timed swim by one athlete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimedRecord {
    pub id: SessionId,
    pub owner_id: AthleteId,
    pub style: SwimStyle,
    /// Distance in meters, always positive for decoded records.
    pub distance: u32,
    pub time: TimeValue,
    pub date: NaiveDate,
    pub details: SessionDetails,
}

impl TimedRecord {
    pub fn new(
        id: impl Into<String>,
        owner_id: impl Into<String>,
        style: SwimStyle,
        distance: u32,
        time: TimeValue,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: SessionId(id.into()),
            owner_id: AthleteId(owner_id.into()),
            style,
            distance,
            time,
            date,
            details: SessionDetails::default(),
        }
    }

    pub fn with_details(mut self, details: SessionDetails) -> Self {
        self.details = details;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleteProfile {
    pub id: AthleteId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub year_of_birth: Option<i32>,
    pub club_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_orders_by_name() {
        let mut styles = SwimStyle::ALL.to_vec();
        styles.sort();
        assert_eq!(
            styles,
            vec![
                SwimStyle::Backstroke,
                SwimStyle::Breaststroke,
                SwimStyle::Butterfly,
                SwimStyle::Freestyle,
                SwimStyle::Medley,
            ]
        );
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("medley".parse::<SwimStyle>(), Ok(SwimStyle::Medley));
        assert_eq!(
            "Medley".parse::<SwimStyle>(),
            Err(UnknownStyle("Medley".to_string()))
        );
        let err = "doggy".parse::<SwimStyle>().unwrap_err();
        assert_eq!(err.to_string(), "unknown style 'doggy'");
    }

    #[test]
    fn test_session_enums_parse() {
        assert_eq!(PoolLength::parse("50m").map(PoolLength::meters), Some(50));
        assert_eq!(ChronoType::parse("electronic"), Some(ChronoType::Electronic));
        assert_eq!(SessionType::parse("open water"), Some(SessionType::OpenWater));
        assert_eq!(SessionType::parse("lake"), None);
    }

    #[test]
    fn test_style_serde_lowercase() {
        let json = serde_json::to_string(&SwimStyle::Butterfly).unwrap();
        assert_eq!(json, "\"butterfly\"");
    }
}
