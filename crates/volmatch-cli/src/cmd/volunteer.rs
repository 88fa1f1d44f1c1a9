//! `vm add-volunteer` and `vm remove-volunteer`.

use crate::output::{CliError, OutputMode, render_success};
use crate::store::Store;
use clap::Args;
use volmatch_core::{ErrorCode, Registry};

#[derive(Args, Debug)]
pub struct AddVolunteerArgs {
    /// Volunteer name (unique, case-insensitive).
    pub name: String,

    /// Available dates, comma separated (e.g. "1,5,23"). Omit for none.
    #[arg(default_value = "", allow_hyphen_values = true)]
    pub dates: String,
}

#[derive(Args, Debug)]
pub struct RemoveVolunteerArgs {
    /// Volunteer name.
    pub name: String,
}

/// Split a comma-separated date list the way the menu prompt does.
pub fn split_dates(raw: &str) -> Vec<&str> {
    raw.trim().split(',').collect()
}

pub fn add_volunteer(registry: &mut Registry, args: &AddVolunteerArgs) -> Result<(), CliError> {
    if registry.add_volunteer(&args.name, &split_dates(&args.dates)) {
        return Ok(());
    }
    let message = format!("Failed to create the volunteer ({})", args.name);
    if registry.find_volunteer(&args.name).is_some() {
        Err(CliError::from_code(message, ErrorCode::DuplicateName))
    } else {
        Err(CliError::with_details(
            message,
            "Dates must be distinct integers in 1~30; names must be non-blank, without leading or trailing spaces, ';' or ','.",
            ErrorCode::InvalidArgument,
        ))
    }
}

pub fn remove_volunteer(
    registry: &mut Registry,
    args: &RemoveVolunteerArgs,
) -> Result<(), CliError> {
    if registry.remove_volunteer(&args.name) {
        Ok(())
    } else {
        Err(CliError::from_code(
            format!("Failed to remove the volunteer ({})", args.name),
            ErrorCode::VolunteerNotFound,
        ))
    }
}

pub fn run_add_volunteer(
    args: &AddVolunteerArgs,
    store: &Store,
    output: OutputMode,
) -> anyhow::Result<()> {
    let mut registry = store.load_for_update()?;
    add_volunteer(&mut registry, args)?;
    store.save(&registry)?;
    render_success(output, &format!("Added volunteer {}", args.name))
}

pub fn run_remove_volunteer(
    args: &RemoveVolunteerArgs,
    store: &Store,
    output: OutputMode,
) -> anyhow::Result<()> {
    let mut registry = store.load_for_update()?;
    remove_volunteer(&mut registry, args)?;
    store.save(&registry)?;
    render_success(output, &format!("Removed volunteer {}", args.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use volmatch_core::Node;

    fn args(name: &str, dates: &str) -> AddVolunteerArgs {
        AddVolunteerArgs {
            name: name.into(),
            dates: dates.into(),
        }
    }

    #[test]
    fn split_dates_keeps_empty_entries() {
        assert_eq!(split_dates("1, 5,23"), ["1", " 5", "23"]);
        assert_eq!(split_dates(""), [""]);
        assert_eq!(split_dates("4,,5"), ["4", "", "5"]);
    }

    #[test]
    fn add_volunteer_with_and_without_dates() {
        let mut reg = Registry::new();
        add_volunteer(&mut reg, &args("Ann", "5, 10")).expect("added");
        add_volunteer(&mut reg, &args("Bo", "")).expect("no dates is fine");
        let names: Vec<&str> = reg.volunteers().iter().map(Node::name).collect();
        assert_eq!(names, ["Ann", "Bo"]);
    }

    #[test]
    fn add_volunteer_classifies_failures() {
        let mut reg = Registry::new();
        add_volunteer(&mut reg, &args("Ann", "5")).expect("added");

        let dup = add_volunteer(&mut reg, &args("ANN", "6")).expect_err("duplicate");
        assert_eq!(dup.message, "Failed to create the volunteer (ANN)");
        assert_eq!(dup.error_code.as_deref(), Some("E3003"));

        let bad = add_volunteer(&mut reg, &args("Cy", "4,,5")).expect_err("empty entry");
        assert_eq!(bad.error_code.as_deref(), Some("E2001"));
    }

    #[test]
    fn padded_names_are_invalid_arguments() {
        let mut reg = Registry::new();
        add_volunteer(&mut reg, &args("Ann", "5")).expect("added");

        for name in ["   ", " Ann ", "Bo "] {
            let err = add_volunteer(&mut reg, &args(name, "6")).expect_err("padded name");
            assert_eq!(err.error_code.as_deref(), Some("E2001"), "{name:?}");
            assert!(
                err.suggestion
                    .as_deref()
                    .is_some_and(|s| s.contains("leading or trailing spaces"))
            );
        }
        assert_eq!(reg.volunteers().len(), 1);
    }

    #[test]
    fn remove_volunteer_reports_missing_name() {
        let mut reg = Registry::new();
        let err = remove_volunteer(&mut reg, &RemoveVolunteerArgs { name: "Cy".into() })
            .expect_err("missing");
        assert_eq!(err.message, "Failed to remove the volunteer (Cy)");
    }
}
