//! `vm events` and `vm volunteers`: list the registry with its matches.
//!
//! Pretty output reproduces the interactive menu's display verbatim so the
//! two surfaces stay interchangeable.

use crate::output::{OutputMode, Renderable, render, write_list};
use crate::store::Store;
use serde::Serialize;
use std::io::{self, Write};
use volmatch_core::{Event, Node, Registry, Volunteer};

const SECTION_RULE: &str = "------------------------";

/// One event with its matched volunteers.
#[derive(Debug, Serialize)]
pub struct EventView {
    pub name: String,
    pub date: u8,
    pub limit: u32,
    pub volunteers: Vec<String>,
}

impl EventView {
    fn from_event(event: &Event) -> Self {
        Self {
            name: event.name().to_owned(),
            date: event.date().get(),
            limit: event.limit(),
            volunteers: event.volunteer_names().map(str::to_owned).collect(),
        }
    }
}

impl Renderable for EventView {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        write!(
            w,
            "-Name: {}\n Date: {}\n Maximum number of volunteers: {}\n Matched Volunteer(s):\n",
            self.name, self.date, self.limit
        )?;
        if self.volunteers.is_empty() {
            writeln!(w, " No match yet.")?;
        }
        for (i, volunteer) in self.volunteers.iter().enumerate() {
            writeln!(w, " {}. {volunteer}", i + 1)?;
        }
        Ok(())
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}\t{}\t{}\t{}",
            self.name,
            self.date,
            self.limit,
            self.volunteers.join(",")
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["name", "date", "limit", "volunteers"]
    }
}

/// An event as seen from a matched volunteer.
#[derive(Debug, Serialize)]
pub struct MatchedEvent {
    pub name: String,
    pub date: u8,
}

/// One volunteer with availability and matched events.
#[derive(Debug, Serialize)]
pub struct VolunteerView {
    pub name: String,
    pub available: Vec<u8>,
    pub events: Vec<MatchedEvent>,
}

impl VolunteerView {
    fn from_volunteer(registry: &Registry, volunteer: &Volunteer) -> Self {
        Self {
            name: volunteer.name().to_owned(),
            available: volunteer.available_dates().map(|d| d.get()).collect(),
            events: registry
                .events_of(volunteer)
                .map(|e| MatchedEvent {
                    name: e.name().to_owned(),
                    date: e.date().get(),
                })
                .collect(),
        }
    }

    fn available_list(&self) -> String {
        self.available
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Renderable for VolunteerView {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        write!(
            w,
            "-Name: {}\n Available: {}\n Matched Event(s):\n",
            self.name,
            self.available_list()
        )?;
        if self.events.is_empty() {
            writeln!(w, " No match yet.")?;
        }
        for event in &self.events {
            writeln!(w, " Event: {}\t Date: {}", event.name, event.date)?;
        }
        Ok(())
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        let events: Vec<&str> = self.events.iter().map(|e| e.name.as_str()).collect();
        writeln!(
            w,
            "{}\t{}\t{}",
            self.name,
            self.available_list(),
            events.join(",")
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["name", "available", "events"]
    }
}

#[derive(Debug, Serialize)]
pub struct EventList {
    pub count: usize,
    pub events: Vec<EventView>,
}

#[derive(Debug, Serialize)]
pub struct VolunteerList {
    pub count: usize,
    pub volunteers: Vec<VolunteerView>,
}

pub fn event_list(registry: &Registry) -> EventList {
    let events: Vec<EventView> = registry.events().iter().map(EventView::from_event).collect();
    EventList {
        count: events.len(),
        events,
    }
}

pub fn volunteer_list(registry: &Registry) -> VolunteerList {
    let volunteers: Vec<VolunteerView> = registry
        .volunteers()
        .iter()
        .map(|v| VolunteerView::from_volunteer(registry, v))
        .collect();
    VolunteerList {
        count: volunteers.len(),
        volunteers,
    }
}

/// Write the events listing in pretty or text mode.
pub fn write_events(w: &mut dyn Write, list: &EventList, mode: OutputMode) -> io::Result<()> {
    if mode == OutputMode::Pretty {
        if list.events.is_empty() {
            write!(w, "There is no event yet.\n\n")?;
        }
        write!(w, "Display All Events [{} events]\n{SECTION_RULE}\n", list.count)?;
    }
    write_list(w, &list.events, mode)
}

/// Write the volunteers listing in pretty or text mode.
pub fn write_volunteers(
    w: &mut dyn Write,
    list: &VolunteerList,
    mode: OutputMode,
) -> io::Result<()> {
    if mode == OutputMode::Pretty {
        if list.volunteers.is_empty() {
            write!(w, "There is no volunteer yet.\n\n")?;
        }
        write!(
            w,
            "Display All Volunteers [{} volunteers]\n{SECTION_RULE}\n",
            list.count
        )?;
    }
    write_list(w, &list.volunteers, mode)
}

pub fn run_events(store: &Store, output: OutputMode) -> anyhow::Result<()> {
    let registry = store.load_existing()?;
    let list = event_list(&registry);
    render(output, &list, |list, w| write_events(w, list, output))
}

pub fn run_volunteers(store: &Store, output: OutputMode) -> anyhow::Result<()> {
    let registry = store.load_existing()?;
    let list = volunteer_list(&registry);
    render(output, &list, |list, w| write_volunteers(w, list, output))
}
