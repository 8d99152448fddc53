//! Command registration and dispatch.
//!
//! A [`Registry`] maps command names to [`Command`]s in insertion order.
//! Each command declares its arguments as `ArgSpec`s; parsing is lowered
//! onto `clap`'s builder API, so `-h`/`--help` behave as usual inside every
//! command.

use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, ArgMatches};
use indexmap::IndexMap;
use itertools::Itertools;
use log::debug;

use quickpick_core::command::{ArgKind, ArgSpec};
use quickpick_core::error::{Error, Result};

/// Handler invoked with the parsed matches of its command.
pub type Handler = Box<dyn Fn(&ArgMatches) -> Result<()>>;

/// A named command: its declared arguments plus the handler to run.
pub struct Command {
    name: String,
    about: String,
    args: Vec<ArgSpec>,
    handler: Handler,
}

impl Command {
    pub fn new(
        name: impl Into<String>,
        about: impl Into<String>,
        handler: impl Fn(&ArgMatches) -> Result<()> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            about: about.into(),
            args: Vec::new(),
            handler: Box::new(handler),
        }
    }

    /// Declares an argument; returns self for chaining.
    #[must_use]
    pub fn arg(mut self, spec: ArgSpec) -> Self {
        self.args.push(spec);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn about(&self) -> &str {
        &self.about
    }

    fn parser(&self, globals: &[ArgSpec]) -> clap::Command {
        let mut command = clap::Command::new(self.name.clone()).about(self.about.clone());
        for spec in globals.iter().chain(&self.args) {
            command = command.arg(build_arg(spec));
        }
        command
    }

    /// Parses `argv` and invokes the handler.
    ///
    /// `-h`/`--help` prints this command's help and performs no other
    /// action. Parse failures are reported as [`Error::InvalidArguments`].
    pub fn execute(&self, argv: &[String]) -> Result<()> {
        self.execute_with(&[], argv)
    }

    /// As [`Command::execute`], with the registry's global arguments folded
    /// into the parser ahead of the command's own.
    fn execute_with(&self, globals: &[ArgSpec], argv: &[String]) -> Result<()> {
        let invocation = std::iter::once(self.name.clone()).chain(argv.iter().cloned());

        match self.parser(globals).try_get_matches_from(invocation) {
            Ok(matches) => (self.handler)(&matches),
            Err(error)
                if matches!(
                    error.kind(),
                    clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
                ) =>
            {
                error.print()?;
                Ok(())
            }
            Err(error) => Err(Error::InvalidArguments(error.to_string())),
        }
    }
}

fn build_arg(spec: &ArgSpec) -> Arg {
    let mut arg = Arg::new(spec.name().to_string()).help(help_text(spec));

    match spec.kind() {
        ArgKind::Positional { required, multiple } => {
            arg = arg.required(*required);
            if *multiple {
                arg = arg.num_args(1..);
            }
        }
        ArgKind::Flag { default: false } => {
            arg = arg.long(spec.name().to_string()).action(ArgAction::SetTrue);
            if let Some(short) = spec.short_name() {
                arg = arg.short(short);
            }
        }
        ArgKind::Flag { default: true } => {
            // An enabled-by-default flag is exposed as its negation.
            arg = arg
                .long(format!("no-{}", spec.name()))
                .action(ArgAction::SetFalse);
        }
        ArgKind::Value {
            default,
            required,
            choices,
        } => {
            arg = arg
                .long(spec.name().to_string())
                .action(ArgAction::Set)
                .required(*required);
            if let Some(short) = spec.short_name() {
                arg = arg.short(short);
            }
            if let Some(default) = default {
                arg = arg.default_value(default.clone());
            }
            if !choices.is_empty() {
                arg = arg.value_parser(PossibleValuesParser::new(choices.clone()));
            }
        }
    }

    arg
}

fn help_text(spec: &ArgSpec) -> String {
    match spec.kind() {
        ArgKind::Value { choices, .. } if !choices.is_empty() => {
            format!("{} (one of: {})", spec.help_text(), choices.iter().join(", "))
        }
        _ => spec.help_text().to_string(),
    }
}

/// Top-level command registry and dispatcher.
pub struct Registry {
    name: String,
    about: String,
    commands: IndexMap<String, Command>,
    global_args: Vec<ArgSpec>,
    default_command: Option<String>,
}

impl Registry {
    #[must_use]
    pub fn new(name: impl Into<String>, about: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            about: about.into(),
            commands: IndexMap::new(),
            global_args: Vec::new(),
            default_command: None,
        }
    }

    /// Declares an argument available to every registered command, parsed
    /// ahead of each command's own arguments.
    pub fn global_arg(&mut self, spec: ArgSpec) {
        self.global_args.push(spec);
    }

    /// Registers a command under its name.
    ///
    /// # Errors
    ///
    /// Fails when a command with the same name is already registered.
    pub fn register(&mut self, command: Command) -> Result<()> {
        if self.commands.contains_key(command.name()) {
            return Err(Error::DuplicateCommand(command.name().to_string()));
        }

        self.commands.insert(command.name().to_string(), command);
        Ok(())
    }

    /// Registers a command and makes it the one run when no command name is
    /// given.
    pub fn register_default(&mut self, command: Command) -> Result<()> {
        let name = command.name().to_string();
        self.register(command)?;
        self.default_command = Some(name);
        Ok(())
    }

    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Dispatches an argument vector (without the binary name).
    ///
    /// No arguments runs the default command when one is registered,
    /// otherwise prints the top-level help. `-h`/`--help` in first position
    /// prints the top-level help. An unrecognized command name prints the
    /// help and reports [`Error::UnknownCommand`].
    pub fn run(&self, argv: &[String]) -> Result<()> {
        let Some(first) = argv.first() else {
            return match &self.default_command {
                Some(name) => self.execute(name, &[]),
                None => {
                    print!("{}", self.render_help());
                    Ok(())
                }
            };
        };

        if first == "-h" || first == "--help" {
            print!("{}", self.render_help());
            return Ok(());
        }

        self.execute(first, &argv[1..])
    }

    /// Runs the named command with the remaining arguments.
    pub fn execute(&self, name: &str, argv: &[String]) -> Result<()> {
        let Some(command) = self.commands.get(name) else {
            print!("{}", self.render_help());
            return Err(Error::UnknownCommand(name.to_string()));
        };

        debug!("Dispatching to command `{name}`");
        command.execute_with(&self.global_args, argv)
    }

    /// Renders the top-level help: usage plus the command list in
    /// registration order.
    #[must_use]
    pub fn render_help(&self) -> String {
        let mut help = String::new();

        help.push_str(&self.name);
        if !self.about.is_empty() {
            help.push_str(" - ");
            help.push_str(&self.about);
        }
        help.push('\n');

        help.push_str(&format!("\nUsage: {} <command> [args]\n", self.name));

        if !self.commands.is_empty() {
            help.push_str("\nCommands:\n");
            let width = self.commands.keys().map(String::len).max().unwrap_or(0);
            for (name, command) in &self.commands {
                help.push_str(&format!("  {name:width$}  {}\n", command.about()));
            }
        }

        help.push_str(&format!(
            "\nRun `{} <command> --help` for command details.\n",
            self.name
        ));

        help
    }
}
