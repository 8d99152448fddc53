use std::env;
use std::process::ExitCode;

use clap::ArgMatches;
use log::debug;

use quickpick_cli::prompt;
use quickpick_cli::registry::{Command, Registry};
use quickpick_core::command::ArgSpec;
use quickpick_core::error::{Error, Result};

const DEFAULT_TITLE: &str = "Select an option:";

fn build_registry() -> Result<Registry> {
    let mut registry = Registry::new("qp", "Interactive menus and prompts for shell scripts.");

    registry.register(
        Command::new(
            "pick",
            "Choose one entry from a list with an arrow-key menu",
            run_pick,
        )
        .arg(
            ArgSpec::value("title")
                .short('t')
                .help("Title shown above the menu")
                .default(DEFAULT_TITLE),
        )
        .arg(
            ArgSpec::positional("entries")
                .multiple()
                .help("Entries to choose between"),
        ),
    )?;

    registry.register(
        Command::new(
            "choose",
            "Choose any number of entries with a space-to-toggle menu",
            run_choose,
        )
        .arg(
            ArgSpec::value("title")
                .short('t')
                .help("Title shown above the menu")
                .default(DEFAULT_TITLE),
        )
        .arg(
            ArgSpec::positional("entries")
                .multiple()
                .help("Entries to choose between"),
        ),
    )?;

    registry.register(
        Command::new(
            "confirm",
            "Ask a yes/no question; the answer becomes the exit status",
            run_confirm,
        )
        .arg(ArgSpec::positional("message").help("Question to ask"))
        .arg(ArgSpec::flag("default-no").help("Treat an empty answer as no instead of yes")),
    )?;

    registry.register(
        Command::new("ask", "Prompt for a line of input and print it", run_ask)
            .arg(ArgSpec::positional("message").help("Prompt to display"))
            .arg(
                ArgSpec::value("default")
                    .short('d')
                    .help("Value used when the answer is empty"),
            ),
    )?;

    registry.register(
        Command::new(
            "password",
            "Prompt for a secret without echoing and print it",
            run_password,
        )
        .arg(ArgSpec::positional("message").help("Prompt to display")),
    )?;

    Ok(registry)
}

fn title_and_entries(matches: &ArgMatches) -> (String, Vec<String>) {
    let title = matches
        .get_one::<String>("title")
        .cloned()
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let entries: Vec<String> = matches
        .get_many::<String>("entries")
        .into_iter()
        .flatten()
        .cloned()
        .collect();
    (title, entries)
}

/// Shows the menu and prints the chosen entry to stdout. Quitting with `q`
/// exits non-zero without printing.
fn run_pick(matches: &ArgMatches) -> Result<()> {
    let (title, entries) = title_and_entries(matches);

    match prompt::select(&title, &entries)? {
        Some(index) => {
            if let Some(choice) = entries.get(index) {
                println!("{choice}");
            }
            Ok(())
        }
        None => Err(Error::Cancelled),
    }
}

/// Shows the multi-select menu and prints each chosen entry on its own
/// line. Quitting with `q` exits non-zero without printing.
fn run_choose(matches: &ArgMatches) -> Result<()> {
    let (title, entries) = title_and_entries(matches);

    match prompt::checkbox(&title, &entries)? {
        Some(indices) => {
            for index in indices {
                if let Some(choice) = entries.get(index) {
                    println!("{choice}");
                }
            }
            Ok(())
        }
        None => Err(Error::Cancelled),
    }
}

fn run_password(matches: &ArgMatches) -> Result<()> {
    let message = matches
        .get_one::<String>("message")
        .cloned()
        .unwrap_or_default();

    let secret = prompt::password(&message)?;
    println!("{secret}");
    Ok(())
}

fn run_confirm(matches: &ArgMatches) -> Result<()> {
    let message = matches
        .get_one::<String>("message")
        .cloned()
        .unwrap_or_default();
    let default_yes = !matches.get_flag("default-no");

    if prompt::confirm(&message, default_yes)? {
        Ok(())
    } else {
        Err(Error::Cancelled)
    }
}

fn run_ask(matches: &ArgMatches) -> Result<()> {
    let message = matches
        .get_one::<String>("message")
        .cloned()
        .unwrap_or_default();
    let default = matches.get_one::<String>("default").map(String::as_str);

    let answer = prompt::input(&message, default)?;
    println!("{answer}");
    Ok(())
}

fn execute() -> Result<()> {
    let argv: Vec<String> = env::args().skip(1).collect();
    debug!("Arguments: {argv:?}");

    build_registry()?.run(&argv)
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        // Quit/decline exits non-zero without noise on stderr.
        Err(Error::Cancelled) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
