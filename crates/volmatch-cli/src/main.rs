#![forbid(unsafe_code)]

mod cmd;
mod output;
mod store;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use store::Store;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use volmatch_core::ErrorCode;
use volmatch_core::config::resolve_config;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "vm: match volunteers to events",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Snapshot file to read and update (overrides `.volmatch/config.toml`).
    #[arg(short, long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format; takes precedence over --json.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Read",
        about = "Display all events and their matches",
        after_help = "EXAMPLES:\n    # Show events in the default snapshot\n    vm events\n\n    # Emit machine-readable output\n    vm events --json"
    )]
    Events,

    #[command(
        next_help_heading = "Read",
        about = "Display all volunteers and their matches",
        after_help = "EXAMPLES:\n    # Show volunteers from a specific file\n    vm volunteers --file evm.txt"
    )]
    Volunteers,

    #[command(
        next_help_heading = "Events",
        about = "Add an event",
        long_about = "Add an event on a date from 1 to 30 with a maximum number of volunteers.",
        after_help = "EXAMPLES:\n    # Add an event on day 15 for up to 2 volunteers\n    vm add-event Gala 15 2"
    )]
    AddEvent(cmd::event::AddEventArgs),

    #[command(
        next_help_heading = "Events",
        about = "Remove an event and its matches",
        after_help = "EXAMPLES:\n    vm remove-event Gala"
    )]
    RemoveEvent(cmd::event::RemoveEventArgs),

    #[command(
        next_help_heading = "Volunteers",
        about = "Add a volunteer",
        long_about = "Add a volunteer available on a comma-separated list of dates.",
        after_help = "EXAMPLES:\n    # Available on days 5 and 10\n    vm add-volunteer Ann 5,10\n\n    # No availability yet\n    vm add-volunteer Bo"
    )]
    AddVolunteer(cmd::volunteer::AddVolunteerArgs),

    #[command(
        next_help_heading = "Volunteers",
        about = "Remove a volunteer and its matches",
        after_help = "EXAMPLES:\n    vm remove-volunteer Ann"
    )]
    RemoveVolunteer(cmd::volunteer::RemoveVolunteerArgs),

    #[command(
        name = "match",
        next_help_heading = "Matching",
        about = "Match a volunteer to an event",
        long_about = "Match a volunteer to an event. The volunteer must be available on the \
                      event's date, free of other events that day, and the event must have room.",
        after_help = "EXAMPLES:\n    vm match Gala Ann\n\n    # See why a match is refused\n    vm match Gala Bo --json"
    )]
    Match(cmd::matching::MatchArgs),

    #[command(
        next_help_heading = "Matching",
        about = "Remove a match",
        after_help = "EXAMPLES:\n    vm unmatch Gala Ann"
    )]
    Unmatch(cmd::matching::MatchArgs),

    #[command(
        next_help_heading = "Interactive",
        about = "Run the interactive menu",
        long_about = "Run the nine-option interactive menu on stdin/stdout."
    )]
    Shell,

    #[command(
        next_help_heading = "Project Maintenance",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    vm completions bash\n\n    # Generate zsh completions\n    vm completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Events => "events",
            Self::Volunteers => "volunteers",
            Self::AddEvent(_) => "add-event",
            Self::RemoveEvent(_) => "remove-event",
            Self::AddVolunteer(_) => "add-volunteer",
            Self::RemoveVolunteer(_) => "remove-volunteer",
            Self::Match(_) => "match",
            Self::Unmatch(_) => "unmatch",
            Self::Shell => "shell",
            Self::Completions(_) => "completions",
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("volmatch=debug,vm=debug,info")
    } else {
        EnvFilter::try_from_env("VOLMATCH_LOG").unwrap_or_else(|_| {
            EnvFilter::new(if env::var("DEBUG").is_ok() {
                "volmatch=debug,vm=debug,info"
            } else {
                "volmatch=info,vm=info,warn"
            })
        })
    };

    let format = env::var("VOLMATCH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Resolve config and run the selected command. `output` is updated as soon
/// as the mode is known so failures render in the right format.
fn run(cli: &Cli, output: &mut OutputMode) -> anyhow::Result<()> {
    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    let project_root = env::current_dir()?;
    let config = resolve_config(&project_root, cli.json).map_err(|e| {
        CliError::from_code(format!("{e:#}"), ErrorCode::ConfigParseError)
    })?;
    *output = resolve_output_mode(cli.format, cli.json, &config.resolved_output);

    let path = cli
        .file
        .clone()
        .unwrap_or_else(|| config.snapshot_path(&project_root));
    let store = Store::new(path, config.project.snapshot.create_if_missing);
    debug!(
        command = cli.command.name(),
        snapshot = %store.path().display(),
        output = ?*output,
        "dispatching"
    );

    let output = *output;
    match &cli.command {
        Commands::Events => cmd::display::run_events(&store, output),
        Commands::Volunteers => cmd::display::run_volunteers(&store, output),
        Commands::AddEvent(args) => cmd::event::run_add_event(args, &store, output),
        Commands::RemoveEvent(args) => cmd::event::run_remove_event(args, &store, output),
        Commands::AddVolunteer(args) => cmd::volunteer::run_add_volunteer(args, &store, output),
        Commands::RemoveVolunteer(args) => {
            cmd::volunteer::run_remove_volunteer(args, &store, output)
        }
        Commands::Match(args) => cmd::matching::run_match(args, &store, output),
        Commands::Unmatch(args) => cmd::matching::run_unmatch(args, &store, output),
        Commands::Shell => cmd::shell::run_shell(),
        Commands::Completions(_) => Ok(()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut output = resolve_output_mode(cli.format, cli.json, "text");
    let Err(err) = run(&cli, &mut output) else {
        return ExitCode::SUCCESS;
    };

    debug!(command = cli.command.name(), error = %err, "command failed");
    let rendered = match err.downcast_ref::<CliError>() {
        Some(cli_error) => render_error(output, cli_error),
        None => render_error(
            output,
            &CliError::from_code(format!("{err:#}"), ErrorCode::InternalUnexpected),
        ),
    };
    if let Err(render_failure) = rendered {
        eprintln!("ERROR: {err:#} ({render_failure})");
    }
    ExitCode::FAILURE
}
