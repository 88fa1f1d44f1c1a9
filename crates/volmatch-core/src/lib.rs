//! volmatch-core library.
//!
//! Matches volunteers to events over a 30-day calendar. The [`Registry`] holds
//! both sides of the bipartite graph and enforces every matching constraint;
//! [`snapshot`] persists it as a line-oriented text file.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums per layer, each exposing an
//!   [`ErrorCode`]; `anyhow::Result` only at config boundaries.
//! - **Logging**: `tracing` macros (`debug!` for rejections, `info!` for
//!   load summaries, `warn!` for skipped snapshot lines).

pub mod config;
pub mod error;
pub mod model;
pub mod registry;
pub mod snapshot;

pub use error::ErrorCode;
pub use model::{Date, Event, ModelError, Node, NodeKind, Volunteer};
pub use registry::{MatchRejection, Registry, RegistryError};
