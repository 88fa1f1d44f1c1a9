//! Load and save snapshot files.
//!
//! Loading merges into an existing [`Registry`]. It runs in two passes so
//! that an event line can name volunteers declared further down the file:
//! every volunteer line is applied first, then every event line together
//! with its matches.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ErrorCode;
use crate::registry::Registry;

use super::parser::{EventRecord, ParsedLine, VolunteerRecord, parse_line};
use super::writer::write_registry;

/// Failure to read or write a snapshot file.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("snapshot I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SnapshotError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::SnapshotNotFound,
            Self::Io { .. } => ErrorCode::SnapshotIoFailed,
        }
    }

    fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// A line the loader did not apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line_no: usize,
    pub reason: String,
}

/// What a load applied and what it skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub volunteers_added: usize,
    pub events_added: usize,
    pub matches_created: usize,
    /// Volunteer names on event lines that could not be matched.
    pub matches_skipped: usize,
    /// Event lines with at least one unmatched volunteer, ascending.
    pub match_lines: Vec<usize>,
    /// Lines skipped entirely, in line order.
    pub skipped: Vec<SkippedLine>,
}

impl LoadReport {
    /// True when every record and match in the input was applied, so saving
    /// the registry reproduces the file's content.
    #[must_use]
    pub fn is_lossless(&self) -> bool {
        self.skipped.is_empty() && self.matches_skipped == 0
    }

    /// Line numbers that were skipped or only partly applied, ascending.
    #[must_use]
    pub fn lossy_lines(&self) -> Vec<usize> {
        let mut lines: Vec<usize> = self
            .skipped
            .iter()
            .map(|s| s.line_no)
            .chain(self.match_lines.iter().copied())
            .collect();
        lines.sort_unstable();
        lines.dedup();
        lines
    }
}

/// Merge snapshot text into `registry`.
///
/// Never fails: unparseable lines, rejected records, and rejected matches
/// are skipped and recorded in the returned report.
pub fn load_str(registry: &mut Registry, input: &str) -> LoadReport {
    let mut report = LoadReport::default();
    let mut volunteers: Vec<(usize, VolunteerRecord)> = Vec::new();
    let mut events: Vec<(usize, EventRecord)> = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        match parse_line(line) {
            Ok(ParsedLine::Blank) => {}
            Ok(ParsedLine::Volunteer(record)) => volunteers.push((line_no, record)),
            Ok(ParsedLine::Event(record)) => events.push((line_no, record)),
            Err(err) => {
                tracing::warn!(line_no, error = %err, "skipping malformed snapshot line");
                report.skipped.push(SkippedLine {
                    line_no,
                    reason: err.to_string(),
                });
            }
        }
    }

    for (line_no, record) in volunteers {
        if registry.add_volunteer(&record.name, &record.dates) {
            report.volunteers_added += 1;
        } else {
            skip(&mut report, line_no, format!("volunteer '{}' rejected", record.name));
        }
    }

    for (line_no, record) in events {
        match registry.add_event(&record.name, &record.date, &record.limit) {
            Ok(true) => report.events_added += 1,
            Ok(false) => {
                skip(&mut report, line_no, format!("event '{}' rejected", record.name));
                continue;
            }
            Err(err) => {
                skip(&mut report, line_no, err.to_string());
                continue;
            }
        }
        for volunteer in record.volunteers.iter().filter(|name| !name.is_empty()) {
            match registry.try_create_match(&record.name, volunteer) {
                Ok(()) => report.matches_created += 1,
                Err(reason) => {
                    tracing::warn!(
                        line_no,
                        event = %record.name,
                        volunteer = %volunteer,
                        code = %reason.code(),
                        %reason,
                        "skipping snapshot match"
                    );
                    report.matches_skipped += 1;
                    if report.match_lines.last() != Some(&line_no) {
                        report.match_lines.push(line_no);
                    }
                }
            }
        }
    }

    report.skipped.sort_by_key(|s| s.line_no);
    report.match_lines.sort_unstable();
    tracing::info!(
        volunteers = report.volunteers_added,
        events = report.events_added,
        matches = report.matches_created,
        matches_skipped = report.matches_skipped,
        lines_skipped = report.skipped.len(),
        "snapshot loaded"
    );
    report
}

fn skip(report: &mut LoadReport, line_no: usize, reason: String) {
    tracing::warn!(line_no, %reason, "skipping snapshot line");
    report.skipped.push(SkippedLine { line_no, reason });
}

/// Read the file at `path` and merge it into `registry`.
///
/// # Errors
///
/// Returns [`SnapshotError::NotFound`] if the file does not exist and
/// [`SnapshotError::Io`] for any other read failure.
pub fn load_file(registry: &mut Registry, path: &Path) -> Result<LoadReport, SnapshotError> {
    let content = fs::read_to_string(path).map_err(|e| SnapshotError::from_io(path, e))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "read snapshot file");
    Ok(load_str(registry, &content))
}

/// Write the full snapshot of `registry` to `path`, replacing its contents.
///
/// # Errors
///
/// Returns [`SnapshotError`] if the file cannot be written.
pub fn save_file(registry: &Registry, path: &Path) -> Result<(), SnapshotError> {
    let content = write_registry(registry);
    fs::write(path, &content).map_err(|e| SnapshotError::from_io(path, e))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote snapshot file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;

    #[test]
    fn loads_volunteers_declared_after_events() {
        let mut reg = Registry::new();
        let report = load_str(
            &mut reg,
            "e;Birth Day;23;1;Mingi\n\
             v;Mingi;1,2,23\n",
        );
        assert_eq!(report.volunteers_added, 1);
        assert_eq!(report.events_added, 1);
        assert_eq!(report.matches_created, 1);
        assert!(report.skipped.is_empty());
        assert!(reg.find_event("birth day").expect("loaded").has_volunteer("Mingi"));
    }

    #[test]
    fn skips_malformed_and_rejected_lines() {
        let mut reg = Registry::new();
        let report = load_str(
            &mut reg,
            "v;Ann;5\n\
             garbage\n\
             \n\
             v;Ann;6\n\
             e;Gala;five;2;\n\
             e;Fair;40;2;\n\
             e;Picnic;5;1;\n",
        );
        assert_eq!(report.volunteers_added, 1);
        assert_eq!(report.events_added, 1);
        let lines: Vec<usize> = report.skipped.iter().map(|s| s.line_no).collect();
        assert_eq!(lines, [2, 4, 5, 6]);
        assert_eq!(reg.events().iter().map(Node::name).collect::<Vec<_>>(), ["Picnic"]);
    }

    #[test]
    fn counts_rejected_matches_without_skipping_the_event() {
        let mut reg = Registry::new();
        let report = load_str(
            &mut reg,
            "v;Ann;5\n\
             v;Bo;5\n\
             v;Cy;6\n\
             e;Solo;5;1;Ann,Bo,Cy,Ghost,\n",
        );
        assert_eq!(report.events_added, 1);
        assert_eq!(report.matches_created, 1);
        assert_eq!(report.matches_skipped, 3);
        assert_eq!(report.match_lines, [4]);
        assert!(report.skipped.is_empty());
        assert!(!report.is_lossless());
    }

    #[test]
    fn lossy_lines_merge_skips_and_partial_matches() {
        let mut reg = Registry::new();
        let report = load_str(
            &mut reg,
            "v;Ann;5\n\
             v;Cy;5,5\n\
             e;Gala;5;1;Ann\n\
             e;Fair;5;2;Cy\n",
        );
        assert_eq!(report.lossy_lines(), [2, 4]);
        assert!(!report.is_lossless());

        let clean = load_str(&mut Registry::new(), "v;Ann;5\ne;Gala;5;1;Ann\n");
        assert!(clean.is_lossless());
        assert!(clean.lossy_lines().is_empty());
    }

    #[test]
    fn merges_into_existing_registry() {
        let mut reg = Registry::new();
        assert!(reg.add_volunteer("Ann", &["5"]));
        let report = load_str(&mut reg, "v;ann;7\nv;Bo;7\n");
        assert_eq!(report.volunteers_added, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(reg.volunteers().len(), 2);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut reg = Registry::new();
        let err = load_file(&mut reg, &dir.path().join("absent.txt")).expect_err("missing");
        assert!(matches!(err, SnapshotError::NotFound { .. }));
        assert_eq!(err.code(), ErrorCode::SnapshotNotFound);
    }

    #[test]
    fn save_then_load_restores_matches() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("evm.txt");

        let mut reg = Registry::new();
        assert!(reg.add_volunteer("Ann", &["5", "9"]));
        assert_eq!(reg.add_event("Fair", "9", "3"), Ok(true));
        assert!(reg.create_match("Fair", "Ann"));
        save_file(&reg, &path).expect("save");

        let mut restored = Registry::new();
        let report = load_file(&mut restored, &path).expect("load");
        assert_eq!(report.matches_created, 1);
        assert_eq!(restored, reg);
    }
}
