//! Blocking prompts.
//!
//! Line prompts (`input`, `confirm`) read whole lines in cooked mode;
//! `select`, `checkbox`, and `password` borrow the menu subsystem's
//! raw-mode handling for keystroke input.

use std::io::{stdin, stdout, Write};
use std::process;

use quickpick_core::error::{Error, Result};
use quickpick_core::key::{KeyPress, BACKSPACE, CTRL_C};
use quickpick_core::menu::Menu;

use crate::menu::{self, EventKeyReader, KeyReader};

/// Prompts for a line of input, falling back to `default` when the answer
/// is empty.
pub fn input(message: &str, default: Option<&str>) -> Result<String> {
    if let Some(default) = default {
        print!("{message} [{default}]: ");
    } else {
        print!("{message}: ");
    }
    stdout().flush()?;

    let mut line = String::new();
    stdin().read_line(&mut line)?;
    let answer = line.trim().to_string();

    if answer.is_empty() {
        if let Some(default) = default {
            return Ok(default.to_string());
        }
    }

    Ok(answer)
}

/// Asks a yes/no question. With `default` true an empty answer counts as
/// yes and only an explicit no declines; with `default` false only an
/// explicit yes accepts.
pub fn confirm(message: &str, default: bool) -> Result<bool> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    print!("{message} {hint}: ");
    stdout().flush()?;

    let mut line = String::new();
    stdin().read_line(&mut line)?;
    let answer = line.trim().to_lowercase();

    if default {
        Ok(!matches!(answer.as_str(), "n" | "no"))
    } else {
        Ok(matches!(answer.as_str(), "y" | "yes"))
    }
}

fn index_menu<S: AsRef<str>>(title: &str, labels: &[S]) -> Menu<usize> {
    let mut menu = Menu::new(title);
    for (index, label) in labels.iter().enumerate() {
        menu.add_option(label.as_ref(), index);
    }
    menu
}

/// Runs a menu built from plain labels and returns the index of the chosen
/// one, or `None` when the user quits.
///
/// # Errors
///
/// Fails when `labels` is empty or on terminal errors, as
/// [`menu::run`] does.
pub fn select<S: AsRef<str>>(title: &str, labels: &[S]) -> Result<Option<usize>> {
    menu::run(index_menu(title, labels))
}

/// Runs a multi-select menu built from plain labels and returns the chosen
/// indices in ascending order, or `None` when the user quits.
///
/// # Errors
///
/// Fails when `labels` is empty or on terminal errors, as
/// [`menu::run_multi`] does.
pub fn checkbox<S: AsRef<str>>(title: &str, labels: &[S]) -> Result<Option<Vec<usize>>> {
    menu::run_multi(title, labels)
}

/// Prompts for a secret without echoing it; each typed character shows as
/// `*` and backspace edits the entry.
///
/// The terminal is in raw mode for the duration of the read and restored
/// on every exit path; an interrupt restores it and terminates the process,
/// as the menu does.
pub fn password(message: &str) -> Result<String> {
    print!("{message}: ");
    stdout().flush()?;

    menu::install_interrupt_hook();

    let guard = menu::RawModeGuard::acquire()?;
    let mut reader = EventKeyReader;
    let outcome = read_hidden_line(&mut reader, &mut stdout());
    drop(guard);

    if matches!(outcome, Err(Error::Interrupted)) {
        process::exit(130);
    }

    println!();
    outcome
}

/// The masked read itself, generic over key source and output sink.
///
/// Printable characters are accumulated and echoed as `*`, backspace
/// removes the last one, Enter finishes. Ctrl+C surfaces as
/// [`Error::Interrupted`] so the caller can restore the terminal first.
pub fn read_hidden_line<R: KeyReader, W: Write>(reader: &mut R, out: &mut W) -> Result<String> {
    let mut value = String::new();

    loop {
        match reader.read_key()? {
            KeyPress::Normal(CTRL_C) => return Err(Error::Interrupted),
            KeyPress::Normal('\r' | '\n') => return Ok(value),
            KeyPress::Normal(BACKSPACE) => {
                if value.pop().is_some() {
                    out.write_all(b"\x08 \x08")?;
                    out.flush()?;
                }
            }
            KeyPress::Normal(c) if !c.is_control() => {
                value.push(c);
                out.write_all(b"*")?;
                out.flush()?;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{run_with, ScriptedKeyReader};
    use quickpick_core::menu::MenuOption;

    fn keys(text: &str) -> ScriptedKeyReader {
        ScriptedKeyReader::new(text.chars().map(KeyPress::Normal))
    }

    #[test]
    fn test_index_menu_payloads_match_positions() {
        let menu = index_menu("Pick", &["A", "B", "C"]);
        let labels: Vec<&str> = menu.options().iter().map(MenuOption::label).collect();
        assert_eq!(labels, vec!["A", "B", "C"]);

        let payloads: Vec<usize> = menu
            .into_options()
            .into_iter()
            .map(MenuOption::resolve)
            .collect();
        assert_eq!(payloads, vec![0, 1, 2]);
    }

    #[test]
    fn test_index_menu_selection_returns_chosen_index() {
        let menu = index_menu("Pick", &["A", "B", "C"]);
        let mut reader = ScriptedKeyReader::new([
            KeyPress::Special(quickpick_core::key::DOWN),
            KeyPress::Normal('\r'),
        ]);

        let result = run_with(menu, &mut reader, &mut Vec::new()).unwrap();
        assert_eq!(result, Some(1));
    }

    #[test]
    fn test_hidden_line_masks_every_character() {
        let mut out = Vec::new();
        let value = read_hidden_line(&mut keys("secret\r"), &mut out).unwrap();

        assert_eq!(value, "secret");
        let echoed = String::from_utf8_lossy(&out);
        assert_eq!(echoed, "******");
    }

    #[test]
    fn test_hidden_line_backspace_edits_entry() {
        let mut reader = ScriptedKeyReader::new(
            "sec"
                .chars()
                .map(KeyPress::Normal)
                .chain([KeyPress::Normal(BACKSPACE), KeyPress::Normal('t')])
                .chain([KeyPress::Normal('\r')]),
        );

        let mut out = Vec::new();
        let value = read_hidden_line(&mut reader, &mut out).unwrap();
        assert_eq!(value, "set");
    }

    #[test]
    fn test_hidden_line_backspace_on_empty_entry_is_ignored() {
        let mut reader =
            ScriptedKeyReader::new([KeyPress::Normal(BACKSPACE), KeyPress::Normal('\r')]);
        let mut out = Vec::new();
        let value = read_hidden_line(&mut reader, &mut out).unwrap();

        assert_eq!(value, "");
        assert!(out.is_empty());
    }

    #[test]
    fn test_hidden_line_ignores_arrow_keys() {
        let mut reader = ScriptedKeyReader::new([
            KeyPress::Special(quickpick_core::key::UP),
            KeyPress::Normal('a'),
            KeyPress::Normal('\r'),
        ]);
        let value = read_hidden_line(&mut reader, &mut Vec::new()).unwrap();
        assert_eq!(value, "a");
    }

    #[test]
    fn test_hidden_line_ctrl_c_surfaces_as_interrupted() {
        let mut reader = ScriptedKeyReader::new([KeyPress::Normal(CTRL_C)]);
        let result = read_hidden_line(&mut reader, &mut Vec::new());
        assert!(matches!(result, Err(Error::Interrupted)));
    }
}
