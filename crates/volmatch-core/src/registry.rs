//! The matching registry.
//!
//! [`Registry`] owns every [`Event`] and [`Volunteer`] and is the only place
//! matches are created or removed. Both collections stay sorted by
//! case-insensitive name, and the match relation stays symmetric: an event
//! lists a volunteer exactly when that volunteer lists the event.
//!
//! Match creation is a greedy, constraint-checked assignment:
//!
//! 1. both names must resolve
//! 2. the volunteer must be available on the event's date
//! 3. the pair must not already be matched
//! 4. the volunteer must not hold another event on the same date
//! 5. the event must be below its limit
//!
//! Every operation validates up front and either applies fully or leaves the
//! registry untouched.

use std::cmp::Ordering;

use tracing::debug;

use crate::error::ErrorCode;
use crate::model::node::NodeMut;
use crate::model::{Date, Event, Node, Volunteer, cmp_ignore_case};
use crate::snapshot::writer;

/// Characters that would corrupt a snapshot line if used in a name.
const RESERVED_NAME_CHARS: [char; 4] = [';', ',', '\n', '\r'];

/// Caller-input errors that are not plain rejections.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A numeric field could not be parsed.
    #[error("{field} '{raw}' is not an integer")]
    InvalidNumber { field: &'static str, raw: String },
}

impl RegistryError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidNumber { .. } => ErrorCode::InvalidNumber,
        }
    }
}

/// Why a match could not be created.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchRejection {
    #[error("event '{0}' not found")]
    EventNotFound(String),

    #[error("volunteer '{0}' not found")]
    VolunteerNotFound(String),

    #[error("volunteer '{volunteer}' is not available on date {date}")]
    Unavailable { volunteer: String, date: Date },

    #[error("volunteer '{volunteer}' is already matched to event '{event}'")]
    AlreadyMatched { event: String, volunteer: String },

    #[error("volunteer '{volunteer}' is already matched to event '{other}' on date {date}")]
    DateConflict {
        volunteer: String,
        other: String,
        date: Date,
    },

    #[error("event '{event}' already has its limit of {limit} volunteer(s)")]
    AtCapacity { event: String, limit: u32 },
}

impl MatchRejection {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::EventNotFound(_) => ErrorCode::EventNotFound,
            Self::VolunteerNotFound(_) => ErrorCode::VolunteerNotFound,
            Self::Unavailable { .. } => ErrorCode::VolunteerUnavailable,
            Self::AlreadyMatched { .. } => ErrorCode::AlreadyMatched,
            Self::DateConflict { .. } => ErrorCode::DateConflict,
            Self::AtCapacity { .. } => ErrorCode::CapacityReached,
        }
    }
}

/// All events, all volunteers, and the matches between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    events: Vec<Event>,
    volunteers: Vec<Volunteer>,
}

impl Registry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            volunteers: Vec::new(),
        }
    }

    /// Events sorted by case-insensitive name.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Volunteers sorted by case-insensitive name.
    #[must_use]
    pub fn volunteers(&self) -> &[Volunteer] {
        &self.volunteers
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.volunteers.is_empty()
    }

    /// Total number of event/volunteer matches.
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.events.iter().map(Event::matched_count).sum()
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn find_event(&self, name: &str) -> Option<&Event> {
        self.event_index(name).map(|i| &self.events[i])
    }

    #[must_use]
    pub fn find_volunteer(&self, name: &str) -> Option<&Volunteer> {
        self.volunteer_index(name).map(|i| &self.volunteers[i])
    }

    /// Volunteers matched to `event`, in the event's adjacency order.
    pub fn volunteers_of<'a>(&'a self, event: &'a Event) -> impl Iterator<Item = &'a Volunteer> {
        event
            .volunteer_names()
            .filter_map(|name| self.find_volunteer(name))
    }

    /// Events matched to `volunteer`, in the volunteer's adjacency order.
    pub fn events_of<'a>(&'a self, volunteer: &'a Volunteer) -> impl Iterator<Item = &'a Event> {
        volunteer
            .event_names()
            .filter_map(|name| self.find_event(name))
    }

    fn event_index(&self, name: &str) -> Option<usize> {
        self.events
            .binary_search_by(|e| cmp_ignore_case(e.name(), name))
            .ok()
    }

    fn volunteer_index(&self, name: &str) -> Option<usize> {
        self.volunteers
            .binary_search_by(|v| cmp_ignore_case(v.name(), name))
            .ok()
    }

    // -----------------------------------------------------------------------
    // Add / remove nodes
    // -----------------------------------------------------------------------

    /// Add an event from its textual date and limit.
    ///
    /// Returns `Ok(false)` without touching the registry when the name is
    /// blank, padded, or already taken, the date is outside `1..=30`, or the limit is
    /// below one.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidNumber`] if `date` or `limit` is not
    /// an integer.
    pub fn add_event(&mut self, name: &str, date: &str, limit: &str) -> Result<bool, RegistryError> {
        let date = parse_number("date", date)?;
        let limit = parse_number("limit", limit)?;

        if !is_valid_name(name) {
            debug!(event = name, reason = "invalid name", "event rejected");
            return Ok(false);
        }
        if self.event_index(name).is_some() {
            debug!(event = name, reason = "duplicate name", "event rejected");
            return Ok(false);
        }
        if limit < 1 {
            debug!(event = name, limit, reason = "limit below one", "event rejected");
            return Ok(false);
        }
        let event = match Event::new(name, date, limit) {
            Ok(event) => event,
            Err(err) => {
                debug!(event = name, reason = %err, "event rejected");
                return Ok(false);
            }
        };

        let pos = self
            .events
            .partition_point(|e| cmp_ignore_case(e.name(), name) == Ordering::Less);
        self.events.insert(pos, event);
        debug!(event = name, date, limit, "event added");
        Ok(true)
    }

    /// Add a volunteer available on the given textual dates.
    ///
    /// An empty slice, or a single blank entry, adds a volunteer with no
    /// availability. Returns `false` without touching the registry when the
    /// name is blank, padded, or taken, or any date is non-numeric, out of range, or
    /// repeated.
    pub fn add_volunteer<S: AsRef<str>>(&mut self, name: &str, dates: &[S]) -> bool {
        if !is_valid_name(name) {
            debug!(volunteer = name, reason = "invalid name", "volunteer rejected");
            return false;
        }
        if self.volunteer_index(name).is_some() {
            debug!(volunteer = name, reason = "duplicate name", "volunteer rejected");
            return false;
        }

        let Some(parsed) = parse_dates(dates) else {
            debug!(volunteer = name, reason = "non-numeric date", "volunteer rejected");
            return false;
        };
        let volunteer = match Volunteer::new(name, &parsed) {
            Ok(volunteer) => volunteer,
            Err(err) => {
                debug!(volunteer = name, reason = %err, "volunteer rejected");
                return false;
            }
        };

        let pos = self
            .volunteers
            .partition_point(|v| cmp_ignore_case(v.name(), name) == Ordering::Less);
        self.volunteers.insert(pos, volunteer);
        debug!(volunteer = name, dates = parsed.len(), "volunteer added");
        true
    }

    /// Remove an event and every match that references it.
    pub fn remove_event(&mut self, name: &str) -> bool {
        let Some(index) = self.event_index(name) else {
            debug!(event = name, reason = "not found", "event not removed");
            return false;
        };
        let event_name = self.events[index].name().to_owned();
        let matched: Vec<String> = self.events[index]
            .volunteer_names()
            .map(str::to_owned)
            .collect();
        for volunteer in &matched {
            self.remove_match(&event_name, volunteer);
        }
        self.events.remove(index);
        debug!(event = %event_name, unmatched = matched.len(), "event removed");
        true
    }

    /// Remove a volunteer and every match that references it.
    pub fn remove_volunteer(&mut self, name: &str) -> bool {
        let Some(index) = self.volunteer_index(name) else {
            debug!(volunteer = name, reason = "not found", "volunteer not removed");
            return false;
        };
        let volunteer_name = self.volunteers[index].name().to_owned();
        let matched: Vec<String> = self.volunteers[index]
            .event_names()
            .map(str::to_owned)
            .collect();
        for event in &matched {
            self.remove_match(event, &volunteer_name);
        }
        self.volunteers.remove(index);
        debug!(volunteer = %volunteer_name, unmatched = matched.len(), "volunteer removed");
        true
    }

    // -----------------------------------------------------------------------
    // Matches
    // -----------------------------------------------------------------------

    /// Match a volunteer to an event, reporting why a match is refused.
    ///
    /// # Errors
    ///
    /// Returns the first [`MatchRejection`] that applies; the registry is
    /// unchanged in that case.
    pub fn try_create_match(
        &mut self,
        event_name: &str,
        volunteer_name: &str,
    ) -> Result<(), MatchRejection> {
        let ei = self
            .event_index(event_name)
            .ok_or_else(|| MatchRejection::EventNotFound(event_name.to_owned()))?;
        let vi = self
            .volunteer_index(volunteer_name)
            .ok_or_else(|| MatchRejection::VolunteerNotFound(volunteer_name.to_owned()))?;

        let event = &self.events[ei];
        let volunteer = &self.volunteers[vi];
        let date = event.date();

        if !volunteer.is_available_on(date) {
            return Err(MatchRejection::Unavailable {
                volunteer: volunteer.name().to_owned(),
                date,
            });
        }
        if event.has_volunteer(volunteer.name()) {
            return Err(MatchRejection::AlreadyMatched {
                event: event.name().to_owned(),
                volunteer: volunteer.name().to_owned(),
            });
        }
        if let Some(other) = self
            .events
            .iter()
            .enumerate()
            .find(|&(i, other)| i != ei && other.date() == date && volunteer.has_event(other.name()))
            .map(|(_, other)| other)
        {
            return Err(MatchRejection::DateConflict {
                volunteer: volunteer.name().to_owned(),
                other: other.name().to_owned(),
                date,
            });
        }
        if !event.is_below_limit() {
            return Err(MatchRejection::AtCapacity {
                event: event.name().to_owned(),
                limit: event.limit(),
            });
        }

        let event_key = event.name().to_owned();
        let volunteer_key = volunteer.name().to_owned();
        self.events[ei].add_adjacent(&volunteer_key);
        self.volunteers[vi].add_adjacent(&event_key);
        debug!(event = %event_key, volunteer = %volunteer_key, %date, "match created");
        Ok(())
    }

    /// Match a volunteer to an event. Returns whether the match was created.
    pub fn create_match(&mut self, event_name: &str, volunteer_name: &str) -> bool {
        match self.try_create_match(event_name, volunteer_name) {
            Ok(()) => true,
            Err(reason) => {
                debug!(
                    event = event_name,
                    volunteer = volunteer_name,
                    code = %reason.code(),
                    %reason,
                    "match rejected"
                );
                false
            }
        }
    }

    /// Remove an existing match. Availability bits are left as they are.
    pub fn remove_match(&mut self, event_name: &str, volunteer_name: &str) -> bool {
        let (Some(ei), Some(vi)) = (
            self.event_index(event_name),
            self.volunteer_index(volunteer_name),
        ) else {
            debug!(
                event = event_name,
                volunteer = volunteer_name,
                reason = "not found",
                "match not removed"
            );
            return false;
        };
        let event_key = self.events[ei].name().to_owned();
        let volunteer_key = self.volunteers[vi].name().to_owned();
        if !self.events[ei].has_volunteer(&volunteer_key) {
            debug!(
                event = %event_key,
                volunteer = %volunteer_key,
                reason = "not matched",
                "match not removed"
            );
            return false;
        }
        self.events[ei].remove_adjacent(&volunteer_key);
        self.volunteers[vi].remove_adjacent(&event_key);
        debug!(event = %event_key, volunteer = %volunteer_key, "match removed");
        true
    }

    // -----------------------------------------------------------------------
    // Serialization views
    // -----------------------------------------------------------------------

    /// Every volunteer as a snapshot line, one per line.
    #[must_use]
    pub fn to_string_all_volunteers(&self) -> String {
        writer::write_volunteers(self)
    }

    /// Every event as a snapshot line, one per line.
    #[must_use]
    pub fn to_string_all_events(&self) -> String {
        writer::write_events(self)
    }
}

/// Snapshot fields are trimmed on load, so a name must already be trimmed
/// and non-blank to survive a save.
fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty() && name.trim() == name && !name.contains(RESERVED_NAME_CHARS)
}

fn parse_number(field: &'static str, raw: &str) -> Result<i32, RegistryError> {
    raw.parse().map_err(|_| RegistryError::InvalidNumber {
        field,
        raw: raw.to_owned(),
    })
}

/// Parse trimmed date strings. `None` if any entry is not an integer.
fn parse_dates<S: AsRef<str>>(raw: &[S]) -> Option<Vec<i32>> {
    if let [only] = raw {
        if only.as_ref().trim().is_empty() {
            return Some(Vec::new());
        }
    }
    raw.iter().map(|s| s.as_ref().trim().parse().ok()).collect()
}
