use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{AthleteId, AthleteProfile, SwimStyle, TimedRecord};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Date,
    Distance,
    Time,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Client-side filter and sort over a loaded record list. Defaults to newest
/// first with no filters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionQuery {
    pub style: Option<SwimStyle>,
    pub distance: Option<u32>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Case-insensitive match against location and description.
    pub search: Option<String>,
    #[serde(default)]
    pub sort: SortField,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SessionQuery {
    pub fn apply<'a>(&self, records: &'a [TimedRecord]) -> Vec<&'a TimedRecord> {
        let needle = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut matched: Vec<&TimedRecord> = records
            .iter()
            .filter(|r| self.style.is_none_or(|style| r.style == style))
            .filter(|r| self.distance.is_none_or(|distance| r.distance == distance))
            .filter(|r| self.date_from.is_none_or(|from| r.date >= from))
            .filter(|r| self.date_to.is_none_or(|to| r.date <= to))
            .filter(|r| needle.as_deref().is_none_or(|n| matches_text(r, n)))
            .collect();

        // Stable, so equal keys keep input order.
        matched.sort_by(|a, b| {
            let ordering = compare_by(self.sort, a, b);
            match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        matched
    }
}

fn matches_text(record: &TimedRecord, needle: &str) -> bool {
    record.details.location.to_lowercase().contains(needle)
        || record.details.description.to_lowercase().contains(needle)
}

fn compare_by(field: SortField, a: &TimedRecord, b: &TimedRecord) -> Ordering {
    match field {
        SortField::Date => a.date.cmp(&b.date),
        SortField::Distance => a.distance.cmp(&b.distance),
        SortField::Time => a.time.cmp(&b.time),
    }
}

/// Bucket records by style, keeping their order within each bucket.
pub fn group_by_style<'a>(records: &[&'a TimedRecord]) -> BTreeMap<SwimStyle, Vec<&'a TimedRecord>> {
    let mut groups: BTreeMap<SwimStyle, Vec<&'a TimedRecord>> = BTreeMap::new();
    for &record in records {
        groups.entry(record.style).or_default().push(record);
    }
    groups
}

/// A session paired with the profile of the athlete who swam it, as listed
/// on a coach's club view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwimmerSession<'a> {
    pub swimmer: &'a AthleteProfile,
    pub record: &'a TimedRecord,
}

/// Pair each record with its owner's profile. Records whose owner has no
/// profile are left out.
pub fn join_swimmers<'a>(
    records: &'a [TimedRecord],
    swimmers: &'a [AthleteProfile],
) -> Vec<SwimmerSession<'a>> {
    let by_id: HashMap<&AthleteId, &AthleteProfile> = swimmers.iter().map(|p| (&p.id, p)).collect();
    let joined: Vec<SwimmerSession<'a>> = records
        .iter()
        .filter_map(|record| {
            by_id
                .get(&record.owner_id)
                .map(|&swimmer| SwimmerSession { swimmer, record })
        })
        .collect();
    if joined.len() < records.len() {
        debug!(dropped = records.len() - joined.len(), "sessions without a swimmer profile");
    }
    joined
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwimmerSortField {
    #[default]
    Date,
    Distance,
    Time,
    /// Last name then first name, case-insensitive.
    Name,
    /// Missing years sort as 0.
    YearOfBirth,
    Club,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwimmerGrouping {
    Style,
    Club,
    Year,
}

pub const NO_CLUB: &str = "No Club";
pub const UNKNOWN_YEAR: &str = "Unknown";

/// Filter and sort over a club's sessions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwimmerSessionQuery {
    pub style: Option<SwimStyle>,
    /// Case-insensitive match against first name, last name, location and club.
    pub search: Option<String>,
    #[serde(default)]
    pub sort: SwimmerSortField,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SwimmerSessionQuery {
    pub fn apply<'a>(&self, sessions: &[SwimmerSession<'a>]) -> Vec<SwimmerSession<'a>> {
        let needle = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut matched: Vec<SwimmerSession<'a>> = sessions
            .iter()
            .copied()
            .filter(|s| self.style.is_none_or(|style| s.record.style == style))
            .filter(|s| needle.as_deref().is_none_or(|n| matches_swimmer(s, n)))
            .collect();

        matched.sort_by(|a, b| {
            let ordering = compare_swimmer_by(self.sort, a, b);
            match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        matched
    }
}

fn lowercase(value: &Option<String>) -> String {
    value.as_deref().unwrap_or_default().to_lowercase()
}

fn matches_swimmer(session: &SwimmerSession<'_>, needle: &str) -> bool {
    let swimmer = session.swimmer;
    lowercase(&swimmer.first_name).contains(needle)
        || lowercase(&swimmer.last_name).contains(needle)
        || session.record.details.location.to_lowercase().contains(needle)
        || lowercase(&swimmer.club_name).contains(needle)
}

fn compare_swimmer_by(field: SwimmerSortField, a: &SwimmerSession<'_>, b: &SwimmerSession<'_>) -> Ordering {
    let name = |s: &SwimmerSession<'_>| {
        format!("{}{}", lowercase(&s.swimmer.last_name), lowercase(&s.swimmer.first_name))
    };
    match field {
        SwimmerSortField::Date => compare_by(SortField::Date, a.record, b.record),
        SwimmerSortField::Distance => compare_by(SortField::Distance, a.record, b.record),
        SwimmerSortField::Time => compare_by(SortField::Time, a.record, b.record),
        SwimmerSortField::Name => name(a).cmp(&name(b)),
        SwimmerSortField::YearOfBirth => a
            .swimmer
            .year_of_birth
            .unwrap_or(0)
            .cmp(&b.swimmer.year_of_birth.unwrap_or(0)),
        SwimmerSortField::Club => lowercase(&a.swimmer.club_name).cmp(&lowercase(&b.swimmer.club_name)),
    }
}

/// Bucket sessions by style name, club name or year of birth, keeping their
/// order within each bucket.
pub fn group_swimmer_sessions<'a>(
    sessions: &[SwimmerSession<'a>],
    grouping: SwimmerGrouping,
) -> BTreeMap<String, Vec<SwimmerSession<'a>>> {
    let mut groups: BTreeMap<String, Vec<SwimmerSession<'a>>> = BTreeMap::new();
    for &session in sessions {
        let key = match grouping {
            SwimmerGrouping::Style => session.record.style.as_str().to_string(),
            SwimmerGrouping::Club => session
                .swimmer
                .club_name
                .clone()
                .filter(|club| !club.is_empty())
                .unwrap_or_else(|| NO_CLUB.to_string()),
            SwimmerGrouping::Year => session
                .swimmer
                .year_of_birth
                .map_or_else(|| UNKNOWN_YEAR.to_string(), |year| year.to_string()),
        };
        groups.entry(key).or_default().push(session);
    }
    groups
}
