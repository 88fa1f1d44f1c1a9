//! Snapshot line parser.
//!
//! Splits a line into a typed record without validating it against the
//! registry. Field values are trimmed, the record tag is case-insensitive,
//! and trailing empty fields are dropped, so `e;Gala;5;2;` and `e;Gala;5;2`
//! parse the same way.

use super::{EVENT_TAG, FIELD_SEPARATOR, LIST_SEPARATOR, VOLUNTEER_TAG};
use crate::error::ErrorCode;

/// A `v;` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolunteerRecord {
    pub name: String,
    /// Raw date strings, trimmed but not parsed.
    pub dates: Vec<String>,
}

/// An `e;` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub name: String,
    pub date: String,
    pub limit: String,
    /// Names of matched volunteers.
    pub volunteers: Vec<String>,
}

/// The result of parsing one snapshot line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// Empty or whitespace-only.
    Blank,
    Volunteer(VolunteerRecord),
    Event(EventRecord),
}

/// Why a line is not a well-formed record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("'{tag}' record expects {min} to {max} fields, found {found}")]
    FieldCount {
        tag: &'static str,
        min: usize,
        max: usize,
        found: usize,
    },

    #[error("unknown record type '{0}'")]
    UnknownRecordType(String),
}

impl ParseError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        ErrorCode::SnapshotLineInvalid
    }
}

/// Parse a single snapshot line.
///
/// # Errors
///
/// Returns [`ParseError::UnknownRecordType`] if the first field is neither
/// `v` nor `e`, and [`ParseError::FieldCount`] if the record has too few or
/// too many fields.
pub fn parse_line(line: &str) -> Result<ParsedLine, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(ParsedLine::Blank);
    }

    let mut fields: Vec<&str> = trimmed.split(FIELD_SEPARATOR).map(str::trim).collect();
    while fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }

    let tag = fields[0];
    if tag.eq_ignore_ascii_case(VOLUNTEER_TAG) {
        check_field_count(VOLUNTEER_TAG, &fields, 2, 3)?;
        Ok(ParsedLine::Volunteer(VolunteerRecord {
            name: fields[1].to_owned(),
            dates: fields.get(2).map(|raw| split_list(raw)).unwrap_or_default(),
        }))
    } else if tag.eq_ignore_ascii_case(EVENT_TAG) {
        check_field_count(EVENT_TAG, &fields, 4, 5)?;
        Ok(ParsedLine::Event(EventRecord {
            name: fields[1].to_owned(),
            date: fields[2].to_owned(),
            limit: fields[3].to_owned(),
            volunteers: fields.get(4).map(|raw| split_list(raw)).unwrap_or_default(),
        }))
    } else {
        Err(ParseError::UnknownRecordType(tag.to_owned()))
    }
}

fn check_field_count(
    tag: &'static str,
    fields: &[&str],
    min: usize,
    max: usize,
) -> Result<(), ParseError> {
    if (min..=max).contains(&fields.len()) {
        Ok(())
    } else {
        Err(ParseError::FieldCount {
            tag,
            min,
            max,
            found: fields.len(),
        })
    }
}

/// Split a list field into trimmed items. Empty input yields no items.
fn split_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(LIST_SEPARATOR)
        .map(|item| item.trim().to_owned())
        .collect()
}
