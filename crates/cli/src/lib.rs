//! Quickpick CLI Library
//!
//! This crate provides the terminal-facing half of quickpick: the raw-mode
//! interactive menu, blocking line prompts, and the command registry that
//! dispatches named commands to handlers.
//!
//! # Key Features
//!
//! - **Interactive Menus**: Arrow-key navigation with Enter to select and `q` to quit
//! - **Terminal Safety**: Raw mode is scoped and restored on every exit path,
//!   including interrupt signals
//! - **Pluggable Key Input**: Key readers are a trait, so the menu loop runs
//!   against the real terminal, a raw byte stream, or a scripted test double
//! - **Multi-Select**: Space toggles `[x]` boxes, Enter returns the chosen indices
//! - **Line Prompts**: Simple blocking `input`/`confirm` prompts plus a
//!   masked `password` read
//! - **Command Registry**: Declarative command/option registration with
//!   parsing delegated to `clap`
//!
//! # Examples
//!
//! The `qp` binary exercises all of it:
//!
//! ```bash
//! # Arrow-key menu; prints the chosen entry
//! qp pick -t "Deploy to:" staging production
//!
//! # Multi-select menu; prints each chosen entry on its own line
//! qp choose -t "Enable features:" logging metrics tracing
//!
//! # Hidden input, echoed as asterisks
//! qp password "API token"
//!
//! # Yes/no question; the answer becomes the exit status
//! qp confirm "Continue?"
//!
//! # Line prompt with a default
//! qp ask "Your name" -d anonymous
//! ```

pub mod menu;
pub mod prompt;
pub mod registry;

pub use quickpick_core::error::{Error, Result};
pub use quickpick_core::menu::Menu;
