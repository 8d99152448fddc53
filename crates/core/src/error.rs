use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("The menu has no options. Add at least one option before running it.")]
    EmptyMenu,

    #[error("Another interactive session already owns the terminal.")]
    TerminalBusy,

    #[error("Interrupted.")]
    Interrupted,

    #[error("Cancelled.")]
    Cancelled,

    #[error("Unrecognized command: `{}`", .0)]
    UnknownCommand(String),

    #[error("A command named `{}` is already registered.", .0)]
    DuplicateCommand(String),

    #[error("{}", .0)]
    InvalidArguments(String),

    #[error("Terminal I/O error: {}", .0)]
    Io(#[from] std::io::Error),
}
