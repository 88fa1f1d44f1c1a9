//! Flat-file snapshots of a [`Registry`](crate::registry::Registry).
//!
//! One record per line, fields separated by `;`, list items by `,`:
//!
//! ```text
//! v;<volunteer>;<date>,<date>,...
//! e;<event>;<date>;<limit>;<volunteer>,<volunteer>,...
//! ```
//!
//! The [`writer`] emits volunteers first, then events. The [`loader`] is
//! lenient: malformed or rejected lines are skipped and reported, never
//! fatal, and volunteers are applied before events regardless of file order.

pub mod loader;
pub mod parser;
pub mod writer;

pub use loader::{LoadReport, SkippedLine, SnapshotError, load_file, load_str, save_file};
pub use parser::{EventRecord, ParseError, ParsedLine, VolunteerRecord, parse_line};
pub use writer::{event_line, volunteer_line, write_registry};

/// Separates the fields of a record.
pub const FIELD_SEPARATOR: char = ';';

/// Separates the items of a list field (dates, volunteer names).
pub const LIST_SEPARATOR: char = ',';

/// Record tag for volunteer lines.
pub const VOLUNTEER_TAG: &str = "v";

/// Record tag for event lines.
pub const EVENT_TAG: &str = "e";
