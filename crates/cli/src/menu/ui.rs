use std::io::{stdout, Write};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

use crossterm::cursor::{Hide, MoveTo, MoveToNextLine, Show};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use crossterm::{execute, queue, ExecutableCommand};
use log::{debug, warn};

use quickpick_core::error::{Error, Result};
use quickpick_core::key::{KeyPress, CTRL_C};
use quickpick_core::menu::{Menu, MultiSelectState, MultiStep, SelectionState, Step};

use super::reader::{EventKeyReader, KeyReader};

/// Whether a raw-mode scope currently owns the terminal. The interrupt
/// handler consults this instead of holding a reference to any menu.
static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);

static INTERRUPT_HOOK: Once = Once::new();

pub(crate) struct RawModeGuard;

impl RawModeGuard {
    pub(crate) fn acquire() -> Result<Self> {
        // Nested acquisition is not supported.
        if RAW_MODE_ACTIVE
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::TerminalBusy);
        }

        if let Err(error) = enable_raw_mode() {
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);
            return Err(error.into());
        }

        let _ = stdout().execute(Hide);
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Restore the terminal on every exit path
        let _ = disable_raw_mode();
        let _ = stdout().execute(Show);
        RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);
    }
}

pub(crate) fn install_interrupt_hook() {
    INTERRUPT_HOOK.call_once(|| {
        if let Err(error) = ctrlc::set_handler(restore_and_exit) {
            warn!("Could not install interrupt handler: {error}");
        }
    });
}

fn restore_and_exit() {
    if RAW_MODE_ACTIVE.load(Ordering::SeqCst) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(Show);
    }
    process::exit(130);
}

/// Runs the menu against the real terminal.
///
/// Enters raw mode for the duration of the loop and restores the prior mode
/// on every exit path. Returns the resolved payload of the selected option,
/// or `None` when the user quits with `q`.
///
/// An interrupt (Ctrl+C or a delivered signal) restores the terminal and
/// terminates the process with exit code 130.
///
/// # Errors
///
/// Fails with [`Error::EmptyMenu`] before touching the terminal when the
/// menu has no options, with [`Error::TerminalBusy`] when another menu is
/// already running, and with an I/O error when the terminal itself fails.
pub fn run<T>(menu: Menu<T>) -> Result<Option<T>> {
    if menu.is_empty() {
        return Err(Error::EmptyMenu);
    }

    install_interrupt_hook();

    let guard = RawModeGuard::acquire()?;
    let mut reader = EventKeyReader;
    let outcome = run_with(menu, &mut reader, &mut stdout());
    drop(guard);

    if matches!(outcome, Err(Error::Interrupted)) {
        process::exit(130);
    }

    execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
    outcome
}

/// The menu loop itself, generic over key source and output sink.
///
/// Performs no terminal mode changes; `run` wraps it in the raw-mode scope.
/// Ctrl+C surfaces as [`Error::Interrupted`] so the caller can restore the
/// terminal before ending the process.
pub fn run_with<T, R, W>(menu: Menu<T>, reader: &mut R, out: &mut W) -> Result<Option<T>>
where
    R: KeyReader,
    W: Write,
{
    if menu.is_empty() {
        return Err(Error::EmptyMenu);
    }

    let title = menu.title().to_string();
    let labels: Vec<String> = menu
        .options()
        .iter()
        .map(|option| option.label().to_string())
        .collect();
    let mut options = menu.into_options();
    let mut state = SelectionState::new(options.len());

    debug!("Menu `{title}` running with {} options", options.len());

    loop {
        draw_menu(out, &title, &labels, state.selected())?;

        let key = reader.read_key()?;
        if key == KeyPress::Normal(CTRL_C) {
            return Err(Error::Interrupted);
        }

        match state.apply(key) {
            Step::Continue => {}
            Step::Select(index) => {
                debug!("Menu `{title}` selected option {index}");
                return Ok(Some(options.swap_remove(index).resolve()));
            }
            Step::Quit => {
                debug!("Menu `{title}` quit without a selection");
                return Ok(None);
            }
        }
    }
}

/// Runs a multi-select menu against the real terminal.
///
/// Space toggles the option under the cursor, Enter accepts the chosen set.
/// Returns the chosen indices in ascending order, or `None` when the user
/// quits with `q`. Terminal handling matches [`run`].
///
/// # Errors
///
/// Fails with [`Error::EmptyMenu`] when `labels` is empty, before touching
/// the terminal.
pub fn run_multi<S: AsRef<str>>(title: &str, labels: &[S]) -> Result<Option<Vec<usize>>> {
    if labels.is_empty() {
        return Err(Error::EmptyMenu);
    }

    install_interrupt_hook();

    let guard = RawModeGuard::acquire()?;
    let mut reader = EventKeyReader;
    let outcome = run_multi_with(title, labels, &mut reader, &mut stdout());
    drop(guard);

    if matches!(outcome, Err(Error::Interrupted)) {
        process::exit(130);
    }

    execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
    outcome
}

/// The multi-select loop itself, generic over key source and output sink.
pub fn run_multi_with<S, R, W>(
    title: &str,
    labels: &[S],
    reader: &mut R,
    out: &mut W,
) -> Result<Option<Vec<usize>>>
where
    S: AsRef<str>,
    R: KeyReader,
    W: Write,
{
    if labels.is_empty() {
        return Err(Error::EmptyMenu);
    }

    let mut state = MultiSelectState::new(labels.len());

    debug!("Multi-select menu `{title}` running with {} options", labels.len());

    loop {
        draw_multi_menu(out, title, labels, &state)?;

        let key = reader.read_key()?;
        if key == KeyPress::Normal(CTRL_C) {
            return Err(Error::Interrupted);
        }

        match state.apply(key) {
            MultiStep::Continue => {}
            MultiStep::Confirm => {
                let chosen = state.chosen_indices();
                debug!("Multi-select menu `{title}` confirmed {chosen:?}");
                return Ok(Some(chosen));
            }
            MultiStep::Quit => {
                debug!("Multi-select menu `{title}` quit without a selection");
                return Ok(None);
            }
        }
    }
}

/// Draws one multi-select frame: each row carries the cursor marker plus a
/// `[x]`/`[ ]` box for its chosen state.
pub fn draw_multi_menu<S: AsRef<str>, W: Write>(
    out: &mut W,
    title: &str,
    labels: &[S],
    state: &MultiSelectState,
) -> Result<()> {
    queue!(
        out,
        Clear(ClearType::All),
        MoveTo(0, 0),
        Print(title),
        MoveToNextLine(2)
    )?;

    for (index, label) in labels.iter().enumerate() {
        let cursor = if index == state.selected() { '>' } else { ' ' };
        let choice = if state.is_chosen(index) { "[x]" } else { "[ ]" };
        let row = format!("{cursor}{choice} {}", label.as_ref());

        if index == state.selected() {
            queue!(
                out,
                SetAttribute(Attribute::Bold),
                Print(row),
                SetAttribute(Attribute::Reset)
            )?;
        } else {
            queue!(out, Print(row))?;
        }
        queue!(out, MoveToNextLine(1))?;
    }

    out.flush()?;
    Ok(())
}

/// Draws one frame: clear, title, blank line, one row per option with a
/// `>` marker on the selected row. Never mutates menu state.
pub fn draw_menu<W: Write>(
    out: &mut W,
    title: &str,
    labels: &[String],
    selected: usize,
) -> Result<()> {
    queue!(
        out,
        Clear(ClearType::All),
        MoveTo(0, 0),
        Print(title),
        MoveToNextLine(2)
    )?;

    for (index, label) in labels.iter().enumerate() {
        if index == selected {
            queue!(
                out,
                SetAttribute(Attribute::Bold),
                Print(format!(">{label}")),
                SetAttribute(Attribute::Reset)
            )?;
        } else {
            queue!(out, Print(format!(" {label}")))?;
        }
        queue!(out, MoveToNextLine(1))?;
    }

    out.flush()?;
    Ok(())
}
