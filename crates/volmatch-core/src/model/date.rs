use std::fmt;

use super::ModelError;

/// First schedulable day of the month.
pub const FIRST_DATE: i32 = 1;

/// Last schedulable day of the month.
pub const LAST_DATE: i32 = 30;

/// Number of slots in a volunteer's availability calendar.
pub const DAYS_IN_CALENDAR: usize = 30;

/// A validated day of the month in `1..=30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(u8);

impl Date {
    /// Validate a raw day number.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DateOutOfRange`] unless `raw` is in `1..=30`.
    pub fn new(raw: i32) -> Result<Self, ModelError> {
        if !(FIRST_DATE..=LAST_DATE).contains(&raw) {
            return Err(ModelError::DateOutOfRange(raw));
        }
        u8::try_from(raw)
            .map(Self)
            .map_err(|_| ModelError::DateOutOfRange(raw))
    }

    /// Build a date from a zero-based calendar slot.
    pub(crate) fn from_index(index: usize) -> Option<Self> {
        if index >= DAYS_IN_CALENDAR {
            return None;
        }
        u8::try_from(index + 1).ok().map(Self)
    }

    /// The day number, `1..=30`.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based calendar slot for this date.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for Date {
    type Error = ModelError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}
