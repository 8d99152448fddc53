//! Declarative argument schema for registered commands.
//!
//! Commands declare their arguments up front as [`ArgSpec`] values instead
//! of having them inferred from handler signatures. The schema stays free
//! of any particular parser; the cli crate lowers it onto `clap`.

/// How an argument is supplied and parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgKind {
    /// A bare value matched by position.
    Positional { required: bool, multiple: bool },
    /// A boolean toggle. A `true` default inverts the switch: it is exposed
    /// as `--no-<name>` and turns the value off.
    Flag { default: bool },
    /// A named option taking one value.
    Value {
        default: Option<String>,
        required: bool,
        choices: Vec<String>,
    },
}

/// One declared argument of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSpec {
    name: String,
    short: Option<char>,
    help: String,
    kind: ArgKind,
}

impl ArgSpec {
    /// A required positional argument.
    #[must_use]
    pub fn positional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short: None,
            help: String::new(),
            kind: ArgKind::Positional {
                required: true,
                multiple: false,
            },
        }
    }

    /// A boolean flag, off by default.
    #[must_use]
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short: None,
            help: String::new(),
            kind: ArgKind::Flag { default: false },
        }
    }

    /// A named option taking one value.
    #[must_use]
    pub fn value(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short: None,
            help: String::new(),
            kind: ArgKind::Value {
                default: None,
                required: false,
                choices: Vec::new(),
            },
        }
    }

    #[must_use]
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Marks a positional as optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        if let ArgKind::Positional { required, .. } = &mut self.kind {
            *required = false;
        }
        self
    }

    /// Allows a positional to be given more than once.
    #[must_use]
    pub fn multiple(mut self) -> Self {
        if let ArgKind::Positional { multiple, .. } = &mut self.kind {
            *multiple = true;
        }
        self
    }

    /// Default value for a `Value` argument.
    #[must_use]
    pub fn default(mut self, value: impl Into<String>) -> Self {
        if let ArgKind::Value { default, .. } = &mut self.kind {
            *default = Some(value.into());
        }
        self
    }

    /// Marks a `Flag` as on by default, inverting it into a `--no-<name>`
    /// switch.
    #[must_use]
    pub fn enabled_by_default(mut self) -> Self {
        if let ArgKind::Flag { default } = &mut self.kind {
            *default = true;
        }
        self
    }

    /// Requires a `Value` argument to be present.
    #[must_use]
    pub fn required(mut self) -> Self {
        if let ArgKind::Value { required, .. } = &mut self.kind {
            *required = true;
        }
        self
    }

    /// Restricts a `Value` argument to the given choices.
    #[must_use]
    pub fn choices<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let ArgKind::Value { choices, .. } = &mut self.kind {
            *choices = values.into_iter().map(Into::into).collect();
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> Option<char> {
        self.short
    }

    pub fn help_text(&self) -> &str {
        &self.help
    }

    pub fn kind(&self) -> &ArgKind {
        &self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_defaults() {
        let spec = ArgSpec::positional("entries");
        assert_eq!(spec.name(), "entries");
        assert_eq!(
            *spec.kind(),
            ArgKind::Positional {
                required: true,
                multiple: false
            }
        );
    }

    #[test]
    fn test_positional_modifiers() {
        let spec = ArgSpec::positional("entries").optional().multiple();
        assert_eq!(
            *spec.kind(),
            ArgKind::Positional {
                required: false,
                multiple: true
            }
        );
    }

    #[test]
    fn test_flag_enabled_by_default() {
        let spec = ArgSpec::flag("color").enabled_by_default();
        assert_eq!(*spec.kind(), ArgKind::Flag { default: true });
    }

    #[test]
    fn test_value_builder_chain() {
        let spec = ArgSpec::value("level")
            .short('l')
            .help("Verbosity level")
            .default("info")
            .choices(["debug", "info", "warn"]);

        assert_eq!(spec.short_name(), Some('l'));
        assert_eq!(spec.help_text(), "Verbosity level");
        match spec.kind() {
            ArgKind::Value {
                default,
                required,
                choices,
            } => {
                assert_eq!(default.as_deref(), Some("info"));
                assert!(!required);
                assert_eq!(choices, &["debug", "info", "warn"]);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }
}
