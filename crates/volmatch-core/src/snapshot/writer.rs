//! Snapshot writer.
//!
//! Output is deterministic: volunteers then events, each in registry order,
//! every line newline-terminated.

use super::{EVENT_TAG, FIELD_SEPARATOR, LIST_SEPARATOR, VOLUNTEER_TAG};
use crate::model::{DAYS_IN_CALENDAR, Date, Event, Node, Volunteer};
use crate::registry::Registry;

/// Serialize one volunteer as `v;<name>;<dates>` (no trailing newline).
///
/// The date list is the volunteer's availability plus the date of every
/// event the volunteer is matched to, so a reload can recreate the matches.
#[must_use]
pub fn volunteer_line(registry: &Registry, volunteer: &Volunteer) -> String {
    let mut days = [false; DAYS_IN_CALENDAR];
    for date in volunteer.available_dates() {
        days[date.index()] = true;
    }
    for event in registry.events_of(volunteer) {
        days[event.date().index()] = true;
    }
    let dates: Vec<String> = days
        .iter()
        .enumerate()
        .filter(|(_, set)| **set)
        .filter_map(|(index, _)| Date::from_index(index))
        .map(|date| date.to_string())
        .collect();

    format!(
        "{VOLUNTEER_TAG}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
        volunteer.name(),
        dates.join(&LIST_SEPARATOR.to_string()),
    )
}

/// Serialize one event as `e;<name>;<date>;<limit>;<volunteers>` (no
/// trailing newline). An event without matches ends in `;`.
#[must_use]
pub fn event_line(event: &Event) -> String {
    let volunteers: Vec<&str> = event.volunteer_names().collect();
    format!(
        "{EVENT_TAG}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
        event.name(),
        event.date(),
        event.limit(),
        volunteers.join(&LIST_SEPARATOR.to_string()),
    )
}

/// All volunteer lines, each newline-terminated.
#[must_use]
pub fn write_volunteers(registry: &Registry) -> String {
    let mut out = String::new();
    for volunteer in registry.volunteers() {
        out.push_str(&volunteer_line(registry, volunteer));
        out.push('\n');
    }
    out
}

/// All event lines, each newline-terminated.
#[must_use]
pub fn write_events(registry: &Registry) -> String {
    let mut out = String::new();
    for event in registry.events() {
        out.push_str(&event_line(event));
        out.push('\n');
    }
    out
}

/// The full snapshot: volunteers first, then events.
#[must_use]
pub fn write_registry(registry: &Registry) -> String {
    let mut out = write_volunteers(registry);
    out.push_str(&write_events(registry));
    out
}
