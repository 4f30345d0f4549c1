use std::collections::HashMap;

use tracing::debug;

use crate::error::StoreError;
use crate::models::{AthleteId, AthleteProfile, SessionId, TimedRecord};

/// Persistence for swim sessions, keyed by owner.
pub trait SessionStore {
    fn load(&self, owner: &AthleteId) -> Result<Vec<TimedRecord>, StoreError>;
    /// Insert or replace a whole record by id.
    fn save(&mut self, record: TimedRecord) -> Result<(), StoreError>;
    fn delete(&mut self, owner: &AthleteId, id: &SessionId) -> Result<TimedRecord, StoreError>;
}

/// Athlete lookup used to pick a head-to-head opponent.
pub trait AthleteDirectory {
    fn profile(&self, id: &AthleteId) -> Option<AthleteProfile>;
    /// Case-insensitive substring match on each non-blank name part.
    fn find_by_name(&self, first_name: &str, last_name: &str) -> Vec<AthleteProfile>;
    /// Swimmers of one club for a coach, without `exclude` (usually the coach).
    fn swimmers_in_club(&self, club: &str, exclude: Option<&AthleteId>) -> Vec<AthleteProfile>;
}

#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    sessions: Vec<TimedRecord>,
    athletes: HashMap<AthleteId, AthleteProfile>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_athlete(&mut self, profile: AthleteProfile) {
        self.athletes.insert(profile.id.clone(), profile);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionStore for InMemoryStore {
    /// Records come back in insertion order.
    fn load(&self, owner: &AthleteId) -> Result<Vec<TimedRecord>, StoreError> {
        Ok(self
            .sessions
            .iter()
            .filter(|r| &r.owner_id == owner)
            .cloned()
            .collect())
    }

    fn save(&mut self, record: TimedRecord) -> Result<(), StoreError> {
        match self.sessions.iter_mut().find(|r| r.id == record.id) {
            Some(existing) if existing.owner_id != record.owner_id => Err(StoreError::OwnerMismatch {
                id: record.id.0,
                owner: existing.owner_id.0.clone(),
                requested: record.owner_id.0,
            }),
            Some(existing) => {
                debug!(session = %record.id, "replacing session");
                *existing = record;
                Ok(())
            }
            None => {
                debug!(session = %record.id, "inserting session");
                self.sessions.push(record);
                Ok(())
            }
        }
    }

    fn delete(&mut self, owner: &AthleteId, id: &SessionId) -> Result<TimedRecord, StoreError> {
        let index = self
            .sessions
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.0.clone()))?;

        let existing = &self.sessions[index];
        if &existing.owner_id != owner {
            return Err(StoreError::OwnerMismatch {
                id: id.0.clone(),
                owner: existing.owner_id.0.clone(),
                requested: owner.0.clone(),
            });
        }
        Ok(self.sessions.remove(index))
    }
}

impl AthleteDirectory for InMemoryStore {
    fn profile(&self, id: &AthleteId) -> Option<AthleteProfile> {
        self.athletes.get(id).cloned()
    }

    fn find_by_name(&self, first_name: &str, last_name: &str) -> Vec<AthleteProfile> {
        let first = first_name.trim().to_lowercase();
        let last = last_name.trim().to_lowercase();
        if first.is_empty() && last.is_empty() {
            return Vec::new();
        }

        let matches = |value: &Option<String>, needle: &str| {
            needle.is_empty()
                || value
                    .as_deref()
                    .is_some_and(|v| v.to_lowercase().contains(needle))
        };

        let mut found: Vec<AthleteProfile> = self
            .athletes
            .values()
            .filter(|p| matches(&p.first_name, first.as_str()) && matches(&p.last_name, last.as_str()))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        found
    }

    fn swimmers_in_club(&self, club: &str, exclude: Option<&AthleteId>) -> Vec<AthleteProfile> {
        let club = club.trim();
        if club.is_empty() {
            return Vec::new();
        }

        let mut found: Vec<AthleteProfile> = self
            .athletes
            .values()
            .filter(|p| {
                p.club_name
                    .as_deref()
                    .is_some_and(|name| name.trim().eq_ignore_ascii_case(club))
            })
            .filter(|p| exclude.is_none_or(|id| &p.id != id))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        debug!(club, swimmers = found.len(), "listed club swimmers");
        found
    }
}
