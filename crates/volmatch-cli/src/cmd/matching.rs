//! `vm match` and `vm unmatch`.

use crate::output::{CliError, OutputMode, render_success};
use crate::store::Store;
use clap::Args;
use volmatch_core::{ErrorCode, Registry};

#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Event name.
    pub event: String,

    /// Volunteer name.
    pub volunteer: String,
}

/// Create a match. The rejection reason becomes the suggestion.
pub fn create_match(registry: &mut Registry, args: &MatchArgs) -> Result<(), CliError> {
    registry
        .try_create_match(&args.event, &args.volunteer)
        .map_err(|reason| {
            CliError::with_details(
                format!(
                    "Failed to create the match (Event:{},Volunteer:{})",
                    args.event, args.volunteer
                ),
                reason.to_string(),
                reason.code(),
            )
        })
}

pub fn remove_match(registry: &mut Registry, args: &MatchArgs) -> Result<(), CliError> {
    if registry.remove_match(&args.event, &args.volunteer) {
        return Ok(());
    }
    let code = if registry.find_event(&args.event).is_none() {
        ErrorCode::EventNotFound
    } else if registry.find_volunteer(&args.volunteer).is_none() {
        ErrorCode::VolunteerNotFound
    } else {
        ErrorCode::MatchNotFound
    };
    Err(CliError::from_code(
        format!(
            "Failed to remove the match (Event:{},Volunteer:{})",
            args.event, args.volunteer
        ),
        code,
    ))
}

pub fn run_match(args: &MatchArgs, store: &Store, output: OutputMode) -> anyhow::Result<()> {
    let mut registry = store.load_for_update()?;
    create_match(&mut registry, args)?;
    store.save(&registry)?;
    render_success(
        output,
        &format!("Matched {} to {}", args.volunteer, args.event),
    )
}

pub fn run_unmatch(args: &MatchArgs, store: &Store, output: OutputMode) -> anyhow::Result<()> {
    let mut registry = store.load_for_update()?;
    remove_match(&mut registry, args)?;
    store.save(&registry)?;
    render_success(
        output,
        &format!("Unmatched {} from {}", args.volunteer, args.event),
    )
}
