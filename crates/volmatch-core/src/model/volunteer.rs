use super::date::DAYS_IN_CALENDAR;
use super::node::{Adjacency, Node, NodeKind, NodeMut};
use super::{Date, ModelError};

/// A volunteer with a 30-day availability calendar.
///
/// Adjacency members are event names. Matching does not clear availability
/// bits; date conflicts are recomputed from the adjacency list instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volunteer {
    name: String,
    availability: [bool; DAYS_IN_CALENDAR],
    events: Adjacency,
}

impl Volunteer {
    /// Construct a volunteer available on exactly `dates`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if `name` is empty, any date is outside
    /// `1..=30`, or any date appears twice.
    pub fn new(name: impl Into<String>, dates: &[i32]) -> Result<Self, ModelError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ModelError::EmptyName);
        }
        let mut volunteer = Self {
            name,
            availability: [false; DAYS_IN_CALENDAR],
            events: Adjacency::new(),
        };
        for &date in dates {
            if !volunteer.set_available(date)? {
                return Err(ModelError::DuplicateDate(date));
            }
        }
        Ok(volunteer)
    }

    /// Calendar bit for `date`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DateOutOfRange`] if `date` is outside `1..=30`.
    pub fn is_available(&self, date: i32) -> Result<bool, ModelError> {
        Ok(self.is_available_on(Date::new(date)?))
    }

    /// Calendar bit for an already-validated date.
    #[must_use]
    pub fn is_available_on(&self, date: Date) -> bool {
        self.availability[date.index()]
    }

    /// Mark `date` available. Returns `false` if it already was.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DateOutOfRange`] if `date` is outside `1..=30`.
    pub fn set_available(&mut self, date: i32) -> Result<bool, ModelError> {
        let slot = &mut self.availability[Date::new(date)?.index()];
        if *slot {
            return Ok(false);
        }
        *slot = true;
        Ok(true)
    }

    /// Mark `date` unavailable. Returns `false` if it already was.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DateOutOfRange`] if `date` is outside `1..=30`.
    pub fn set_unavailable(&mut self, date: i32) -> Result<bool, ModelError> {
        let slot = &mut self.availability[Date::new(date)?.index()];
        if !*slot {
            return Ok(false);
        }
        *slot = false;
        Ok(true)
    }

    /// Dates whose availability bit is set, ascending.
    pub fn available_dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.availability
            .iter()
            .enumerate()
            .filter(|(_, available)| **available)
            .filter_map(|(index, _)| Date::from_index(index))
    }

    #[must_use]
    pub fn has_event(&self, name: &str) -> bool {
        self.is_adjacent(name)
    }

    /// Matched event names in sorted order.
    pub fn event_names(&self) -> impl Iterator<Item = &str> {
        self.events.iter()
    }
}

impl Node for Volunteer {
    const KIND: NodeKind = NodeKind::Volunteer;

    fn name(&self) -> &str {
        &self.name
    }

    fn adjacency(&self) -> &Adjacency {
        &self.events
    }
}

impl NodeMut for Volunteer {
    fn adjacency_mut(&mut self) -> &mut Adjacency {
        &mut self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(v: &Volunteer) -> Vec<u8> {
        v.available_dates().map(Date::get).collect()
    }

    #[test]
    fn constructor_sets_requested_dates() {
        let v = Volunteer::new("Mingi", &[23, 5, 30]).expect("valid volunteer");
        assert_eq!(days(&v), [5, 23, 30]);
        assert_eq!(v.is_available(5), Ok(true));
        assert_eq!(v.is_available(6), Ok(false));
    }

    #[test]
    fn empty_calendar_is_valid() {
        let v = Volunteer::new("Sonu", &[]).expect("no dates is fine");
        assert!(days(&v).is_empty());
    }

    #[test]
    fn constructor_rejects_bad_input() {
        assert_eq!(Volunteer::new("", &[1]), Err(ModelError::EmptyName));
        assert_eq!(
            Volunteer::new("Ann", &[0]),
            Err(ModelError::DateOutOfRange(0))
        );
        assert_eq!(
            Volunteer::new("Ann", &[31]),
            Err(ModelError::DateOutOfRange(31))
        );
        assert_eq!(
            Volunteer::new("Ann", &[4, 9, 4]),
            Err(ModelError::DuplicateDate(4))
        );
    }

    #[test]
    fn availability_queries_validate_range() {
        let v = Volunteer::new("Ann", &[1, 30]).expect("valid");
        assert_eq!(v.is_available(0), Err(ModelError::DateOutOfRange(0)));
        assert_eq!(v.is_available(31), Err(ModelError::DateOutOfRange(31)));
        assert_eq!(v.is_available(1), Ok(true));
        assert_eq!(v.is_available(30), Ok(true));
    }

    #[test]
    fn set_available_reports_changes() {
        let mut v = Volunteer::new("Ann", &[]).expect("valid");
        assert_eq!(v.set_available(12), Ok(true));
        assert_eq!(v.set_available(12), Ok(false));
        assert_eq!(v.set_unavailable(12), Ok(true));
        assert_eq!(v.set_unavailable(12), Ok(false));
        assert_eq!(v.set_available(40), Err(ModelError::DateOutOfRange(40)));
    }

    #[test]
    fn adjacency_tracks_events() {
        let mut v = Volunteer::new("Cy", &[5]).expect("valid");
        v.add_adjacent("Fair");
        assert!(v.has_event("FAIR"));
        assert_eq!(v.event_names().collect::<Vec<_>>(), ["Fair"]);
        assert_eq!(v.is_available(5), Ok(true), "matching never clears availability");
    }
}
