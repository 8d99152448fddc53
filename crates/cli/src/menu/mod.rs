//! Interactive raw-terminal menu.
//!
//! The menu loop reads one keypress at a time, updates the selection state,
//! and redraws. The terminal is put into raw mode for the duration of one
//! run and restored on every exit path: Enter, quit key, read errors, and
//! interrupt signals.
//!
//! Key acquisition sits behind the [`KeyReader`] trait. The production
//! variant consumes the platform event stream; a byte-stream variant runs
//! the ANSI escape-sequence decoder over any `io::Read`, and a scripted
//! variant drives the loop in tests.

mod reader;
mod ui;

pub use reader::{AnsiKeyReader, EventKeyReader, KeyReader, ScriptedKeyReader};
pub use ui::{draw_menu, draw_multi_menu, run, run_multi, run_multi_with, run_with};

pub(crate) use ui::{install_interrupt_hook, RawModeGuard};
