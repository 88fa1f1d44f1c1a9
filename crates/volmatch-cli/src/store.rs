//! Snapshot file access for one-shot commands.
//!
//! Each command loads the snapshot, applies one registry operation, and
//! saves only when the registry changed. A snapshot the loader could not
//! apply in full is never rewritten, since saving would drop those lines.

use crate::output::CliError;
use std::path::{Path, PathBuf};
use volmatch_core::snapshot::{self, LoadReport, SnapshotError};
use volmatch_core::{ErrorCode, Registry};

/// Where the snapshot lives and what to do when it is missing.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    create_if_missing: bool,
}

impl Store {
    pub const fn new(path: PathBuf, create_if_missing: bool) -> Self {
        Self {
            path,
            create_if_missing,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load for a read-only command. A missing file is an error.
    pub fn load_existing(&self) -> Result<Registry, CliError> {
        let mut registry = Registry::new();
        snapshot::load_file(&mut registry, &self.path).map_err(|e| snapshot_error(&e))?;
        Ok(registry)
    }

    /// Load for a mutating command. A missing file yields an empty registry
    /// when `create_if_missing` is set; a file with skipped lines or matches
    /// is refused.
    pub fn load_for_update(&self) -> Result<Registry, CliError> {
        let mut registry = Registry::new();
        match snapshot::load_file(&mut registry, &self.path) {
            Ok(report) if report.is_lossless() => Ok(registry),
            Ok(report) => Err(self.lossy_error(&report)),
            Err(SnapshotError::NotFound { .. }) if self.create_if_missing => {
                tracing::info!(path = %self.path.display(), "snapshot missing; starting empty");
                Ok(Registry::new())
            }
            Err(e) => Err(snapshot_error(&e)),
        }
    }

    pub fn save(&self, registry: &Registry) -> Result<(), CliError> {
        snapshot::save_file(registry, &self.path).map_err(|e| snapshot_error(&e))
    }

    fn lossy_error(&self, report: &LoadReport) -> CliError {
        let lines = report
            .lossy_lines()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        tracing::warn!(
            path = %self.path.display(),
            lines = %lines,
            "refusing to rewrite snapshot with unapplied lines"
        );
        CliError::with_details(
            format!(
                "Snapshot {} has lines that could not be applied (lines {lines})",
                self.path.display()
            ),
            "Fix or remove those lines by hand; saving now would drop them.",
            ErrorCode::SnapshotLineInvalid,
        )
    }
}

pub fn snapshot_error(err: &SnapshotError) -> CliError {
    CliError::from_code(err.to_string(), err.code())
}
