//! `vm shell`: the nine-option interactive menu.
//!
//! The loop reads from any [`BufRead`] and writes to any [`Write`], so it
//! runs the same against a terminal or a scripted buffer. End of input is
//! treated as Quit.

use crate::cmd::display::{event_list, volunteer_list, write_events, write_volunteers};
use crate::cmd::volunteer::split_dates;
use crate::output::OutputMode;
use std::io::{self, BufRead, Write};
use std::path::Path;
use volmatch_core::Registry;
use volmatch_core::snapshot;

const MAIN_MENU: &str = "=============================\n\
[ Main Menu ]\n\
=============================\n\
1. Load EVM from a file\n\
2. Save EVM to a file\n\
3. Display all events and corresponding matches\n\
4. Display all volunteers and corresponding matches\n\
5. Create a match\n\
6. Remove a match\n\
7. Add a volunteer\n\
8. Remove a volunteer\n\
9. Quit\n\
>";

const ENTER_FILEPATH: &str = "Enter filepath : ";
const WHICH_EVENT: &str = "Which event : ";
const WHICH_VOLUNTEER: &str = "Which volunteer : ";
const VOLUNTEER_NAME: &str = "Volunteer name : ";
const VOLUNTEER_DATES: &str = "Volunteer's available date (1~30,1~30,...) : ";
const BAD_CHOICE: &str = "ERROR: Input should be 1~9\n";

enum Flow {
    Continue,
    Quit,
}

/// Print `text`, then read one trimmed line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> io::Result<Option<String>> {
    write!(out, "{text}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

/// Run the menu loop until Quit or end of input.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails; every
/// registry or file failure is reported inline and the loop continues.
pub fn run_menu<R: BufRead, W: Write>(
    registry: &mut Registry,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    while let Some(choice) = prompt(input, out, MAIN_MENU)? {
        tracing::debug!(choice = %choice, "menu selection");
        match dispatch(registry, &choice, input, out)? {
            Flow::Continue => {}
            Flow::Quit => break,
        }
    }
    out.flush()
}

fn dispatch<R: BufRead, W: Write>(
    registry: &mut Registry,
    choice: &str,
    input: &mut R,
    out: &mut W,
) -> io::Result<Flow> {
    match choice {
        "1" => {
            let Some(path) = prompt(input, out, ENTER_FILEPATH)? else {
                return Ok(Flow::Quit);
            };
            if let Err(err) = snapshot::load_file(registry, Path::new(&path)) {
                tracing::debug!(error = %err, "menu load failed");
                writeln!(out, "ERROR: Cannot read file - {path}")?;
            }
        }
        "2" => {
            let Some(path) = prompt(input, out, ENTER_FILEPATH)? else {
                return Ok(Flow::Quit);
            };
            if let Err(err) = snapshot::save_file(registry, Path::new(&path)) {
                tracing::debug!(error = %err, "menu save failed");
                writeln!(out, "ERROR: Cannot write file - {path}")?;
            }
        }
        "3" => write_events(out, &event_list(registry), OutputMode::Pretty)?,
        "4" => write_volunteers(out, &volunteer_list(registry), OutputMode::Pretty)?,
        "5" | "6" => {
            let Some(event) = prompt(input, out, WHICH_EVENT)? else {
                return Ok(Flow::Quit);
            };
            let Some(volunteer) = prompt(input, out, WHICH_VOLUNTEER)? else {
                return Ok(Flow::Quit);
            };
            if choice == "5" {
                if !registry.create_match(&event, &volunteer) {
                    writeln!(
                        out,
                        "ERROR: Failed to create the match (Event:{event},Volunteer:{volunteer})"
                    )?;
                }
            } else if !registry.remove_match(&event, &volunteer) {
                writeln!(
                    out,
                    "ERROR: Failed to remove the match (Event:{event},Volunteer:{volunteer})"
                )?;
            }
        }
        "7" => {
            let Some(name) = prompt(input, out, VOLUNTEER_NAME)? else {
                return Ok(Flow::Quit);
            };
            let Some(dates) = prompt(input, out, VOLUNTEER_DATES)? else {
                return Ok(Flow::Quit);
            };
            if !registry.add_volunteer(&name, &split_dates(&dates)) {
                writeln!(out, "ERROR: Failed to create the volunteer ({name})")?;
            }
        }
        "8" => {
            let Some(name) = prompt(input, out, VOLUNTEER_NAME)? else {
                return Ok(Flow::Quit);
            };
            if !registry.remove_volunteer(&name) {
                writeln!(out, "ERROR: Failed to remove the volunteer ({name})")?;
            }
        }
        "9" => return Ok(Flow::Quit),
        _ => write!(out, "{BAD_CHOICE}")?,
    }
    Ok(Flow::Continue)
}

/// Run the menu on stdin/stdout, starting from an empty registry.
pub fn run_shell() -> anyhow::Result<()> {
    let mut registry = Registry::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_menu(&mut registry, &mut stdin.lock(), &mut stdout.lock())?;
    tracing::info!(
        events = registry.events().len(),
        volunteers = registry.volunteers().len(),
        "shell closed"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use volmatch_core::Node;

    fn run(registry: &mut Registry, script: &str) -> String {
        let mut input = script.as_bytes();
        let mut out = Vec::new();
        run_menu(registry, &mut input, &mut out).expect("menu io");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn quit_prints_menu_once() {
        let mut reg = Registry::new();
        assert_eq!(run(&mut reg, "9\n"), MAIN_MENU);
    }

    #[test]
    fn end_of_input_quits() {
        let mut reg = Registry::new();
        assert_eq!(run(&mut reg, ""), MAIN_MENU);
        let out = run(&mut reg, "7\nAnn\n");
        assert!(out.ends_with(VOLUNTEER_DATES));
        assert!(reg.is_empty());
    }

    #[test]
    fn invalid_choice_reports_range() {
        let mut reg = Registry::new();
        let out = run(&mut reg, "0\n10\n9\n");
        assert_eq!(out.matches(BAD_CHOICE).count(), 2);
    }

    #[test]
    fn add_volunteer_and_display() {
        let mut reg = Registry::new();
        let out = run(&mut reg, "7\n Ann \n5, 10\n4\n9\n");
        assert!(out.contains("Volunteer name : Volunteer's available date (1~30,1~30,...) : "));
        assert!(out.contains(
            "Display All Volunteers [1 volunteers]\n------------------------\n\
             -Name: Ann\n Available: 5,10\n Matched Event(s):\n No match yet.\n"
        ));
        assert_eq!(reg.volunteers()[0].name(), "Ann");
    }

    #[test]
    fn failures_use_resource_messages() {
        let mut reg = Registry::new();
        assert_eq!(reg.add_event("Gala", "15", "1"), Ok(true));
        let out = run(
            &mut reg,
            "7\nAnn\n31\n5\nGala\nBo\n6\nGala\nBo\n8\nBo\n9\n",
        );
        assert!(out.contains("ERROR: Failed to create the volunteer (Ann)\n"));
        assert!(out.contains("ERROR: Failed to create the match (Event:Gala,Volunteer:Bo)\n"));
        assert!(out.contains("ERROR: Failed to remove the match (Event:Gala,Volunteer:Bo)\n"));
        assert!(out.contains("ERROR: Failed to remove the volunteer (Bo)\n"));
    }

    #[test]
    fn match_then_display_events() {
        let mut reg = Registry::new();
        assert_eq!(reg.add_event("Gala", "15", "2"), Ok(true));
        let out = run(&mut reg, "7\nAnn\n15\n5\ngala\nann\n3\n9\n");
        assert!(out.contains(" Matched Volunteer(s):\n 1. Ann\n"));
        assert_eq!(reg.match_count(), 1);
    }

    #[test]
    fn empty_displays_print_notice() {
        let mut reg = Registry::new();
        let out = run(&mut reg, "3\n4\n9\n");
        assert!(out.contains("There is no event yet.\n\nDisplay All Events [0 events]\n"));
        assert!(out.contains("There is no volunteer yet.\n\nDisplay All Volunteers [0 volunteers]\n"));
    }

    #[test]
    fn save_and_load_through_menu() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("evm.txt");
        let path = path.to_str().expect("utf8 path");

        let mut reg = Registry::new();
        assert!(reg.add_volunteer("Ann", &["3"]));
        run(&mut reg, &format!("2\n{path}\n9\n"));

        let mut restored = Registry::new();
        let out = run(&mut restored, &format!("1\n{path}\n9\n"));
        assert!(!out.contains("ERROR"));
        assert_eq!(restored, reg);
    }

    #[test]
    fn missing_file_reports_read_error() {
        let mut reg = Registry::new();
        let out = run(&mut reg, "1\n/no/such/evm.txt\n9\n");
        assert!(out.contains("ERROR: Cannot read file - /no/such/evm.txt\n"));
    }

    #[test]
    fn unwritable_path_reports_write_error() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let target = dir.path().to_str().expect("utf8 path").to_owned();
        let mut reg = Registry::new();
        let out = run(&mut reg, &format!("2\n{target}\n9\n"));
        assert!(out.contains(&format!("ERROR: Cannot write file - {target}\n")));
    }
}
