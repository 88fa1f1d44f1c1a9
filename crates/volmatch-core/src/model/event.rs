use super::node::{Adjacency, Node, NodeKind, NodeMut};
use super::{Date, ModelError};

/// A dated event that needs up to `limit` volunteers.
///
/// Adjacency members are volunteer names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    name: String,
    date: Date,
    limit: u32,
    volunteers: Adjacency,
}

impl Event {
    /// Construct an event with no matched volunteers.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if `name` is empty, `date` is outside `1..=30`,
    /// or `limit` is negative. A limit of zero is accepted here; the
    /// registry refuses it separately.
    pub fn new(name: impl Into<String>, date: i32, limit: i32) -> Result<Self, ModelError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ModelError::EmptyName);
        }
        let date = Date::new(date)?;
        let limit = u32::try_from(limit).map_err(|_| ModelError::NegativeLimit(limit))?;
        Ok(Self {
            name,
            date,
            limit,
            volunteers: Adjacency::new(),
        })
    }

    #[must_use]
    pub const fn date(&self) -> Date {
        self.date
    }

    /// Maximum number of matched volunteers.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// True while another volunteer can still be matched.
    #[must_use]
    pub fn is_below_limit(&self) -> bool {
        u32::try_from(self.volunteers.len()).is_ok_and(|matched| matched < self.limit)
    }

    #[must_use]
    pub fn has_volunteer(&self, name: &str) -> bool {
        self.is_adjacent(name)
    }

    /// Matched volunteer names in sorted order.
    pub fn volunteer_names(&self) -> impl Iterator<Item = &str> {
        self.volunteers.iter()
    }

    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.volunteers.len()
    }
}

impl Node for Event {
    const KIND: NodeKind = NodeKind::Event;

    fn name(&self) -> &str {
        &self.name
    }

    fn adjacency(&self) -> &Adjacency {
        &self.volunteers
    }
}

impl NodeMut for Event {
    fn adjacency_mut(&mut self) -> &mut Adjacency {
        &mut self.volunteers
    }
}
