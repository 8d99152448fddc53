//! Quickpick Core Library
//!
//! This crate provides the terminal-free core of quickpick, a toolkit for
//! building interactive command-line menus and declarative command
//! registries.
//!
//! # Key Features
//!
//! - **Menu Model**: Titled menus with insertion-ordered, payload-carrying options
//! - **Selection State Machine**: Pure, clamped cursor movement driven by key events
//! - **Key Decoding**: ANSI escape-sequence decoding for arrow keys over any byte stream
//! - **Argument Schema**: Declarative option/positional specifications for commands
//! - **Error Handling**: One error type for all failure modes across the workspace
//!
//! Everything that touches a real terminal (raw mode, rendering, signal
//! handling) lives in the `quickpick-cli` crate; this crate stays pure so
//! its logic can be tested without a tty.

pub mod command;
pub mod error;
pub mod key;
pub mod menu;
