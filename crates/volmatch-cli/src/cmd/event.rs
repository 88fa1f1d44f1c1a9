//! `vm add-event` and `vm remove-event`.

use crate::output::{CliError, OutputMode, render_success};
use crate::store::Store;
use clap::Args;
use volmatch_core::{ErrorCode, Registry};

#[derive(Args, Debug)]
pub struct AddEventArgs {
    /// Event name (unique, case-insensitive).
    pub name: String,

    /// Event date, 1 to 30.
    #[arg(allow_hyphen_values = true)]
    pub date: String,

    /// Maximum number of volunteers, at least 1.
    #[arg(allow_hyphen_values = true)]
    pub limit: String,
}

#[derive(Args, Debug)]
pub struct RemoveEventArgs {
    /// Event name.
    pub name: String,
}

/// Apply `add-event` to `registry`, describing the failure if it is refused.
pub fn add_event(registry: &mut Registry, args: &AddEventArgs) -> Result<(), CliError> {
    let message = || format!("Failed to create the event ({})", args.name);
    match registry.add_event(&args.name, &args.date, &args.limit) {
        Ok(true) => Ok(()),
        Ok(false) if registry.find_event(&args.name).is_some() => {
            Err(CliError::from_code(message(), ErrorCode::DuplicateName))
        }
        Ok(false) => Err(CliError::with_details(
            message(),
            "Names must be non-blank, without leading or trailing spaces, ';' or ','; dates 1~30; limits at least 1.",
            ErrorCode::InvalidArgument,
        )),
        Err(err) => Err(CliError::with_details(message(), err.to_string(), err.code())),
    }
}

pub fn remove_event(registry: &mut Registry, args: &RemoveEventArgs) -> Result<(), CliError> {
    if registry.remove_event(&args.name) {
        Ok(())
    } else {
        Err(CliError::from_code(
            format!("Failed to remove the event ({})", args.name),
            ErrorCode::EventNotFound,
        ))
    }
}

pub fn run_add_event(args: &AddEventArgs, store: &Store, output: OutputMode) -> anyhow::Result<()> {
    let mut registry = store.load_for_update()?;
    add_event(&mut registry, args)?;
    store.save(&registry)?;
    render_success(
        output,
        &format!(
            "Added event {} (date {}, limit {})",
            args.name,
            args.date.trim(),
            args.limit.trim()
        ),
    )
}

pub fn run_remove_event(
    args: &RemoveEventArgs,
    store: &Store,
    output: OutputMode,
) -> anyhow::Result<()> {
    let mut registry = store.load_for_update()?;
    remove_event(&mut registry, args)?;
    store.save(&registry)?;
    render_success(output, &format!("Removed event {}", args.name))
}
