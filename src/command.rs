use crate::argument::Argument;
use crate::error::{DeclarationError, Error, UsageError};
use crate::value::ValueKind;
use indexmap::IndexMap;
use std::collections::VecDeque;

pub mod help;

/// A named group of arguments.
///
/// The parser keeps one of these as the default (top level) command, and any number of
/// named subcommands selected by a bare word on the command line.
#[derive(Debug, Clone)]
pub struct Command {
    name: String,
    help: String,
    active: bool,

    positionals: IndexMap<String, Argument>,
    options: IndexMap<String, Argument>,
    // Index of the next positional to fill
    cursor: usize,
}

impl Command {
    /// Creates a new command
    pub fn new(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            active: false,
            positionals: IndexMap::new(),
            options: IndexMap::new(),
            cursor: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// Marks this command as the one selected on the command line
    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Validates and registers `argument`.
    ///
    /// An argument with the same canonical name is overwritten when `replace` is true, and
    /// rejected otherwise. Overwriting a positional keeps its original position.
    pub fn add_argument(
        &mut self,
        argument: Argument,
        replace: bool,
    ) -> Result<(), DeclarationError> {
        argument.validate()?;

        let table = if argument.is_positional() {
            &mut self.positionals
        } else {
            &mut self.options
        };

        if !replace && table.contains_key(argument.name()) {
            return Err(DeclarationError::AlreadyExists(argument.name().to_string()));
        }

        tracing::debug!(
            command = %self.name,
            argument = argument.name(),
            positional = argument.is_positional(),
            "argument registered"
        );
        table.insert(argument.name().to_string(), argument);
        Ok(())
    }

    /// Builder variant of [`Command::add_argument`] that replaces existing arguments
    pub fn with_argument(mut self, argument: Argument) -> Result<Self, DeclarationError> {
        self.add_argument(argument, true)?;
        Ok(self)
    }

    /// Returns the argument with the given canonical name, looking at positionals first
    pub fn get_argument(&self, name: &str) -> Option<&Argument> {
        self.positionals
            .get(name)
            .or_else(|| self.options.get(name))
    }

    /// Positional arguments in declaration order
    pub fn positionals(&self) -> impl Iterator<Item = &Argument> {
        self.positionals.values()
    }

    /// Optional arguments in declaration order
    pub fn options(&self) -> impl Iterator<Item = &Argument> {
        self.options.values()
    }

    /// Assigns the option selected by `token`.
    ///
    /// Boolean options are flags and consume nothing. Any other option takes its value from
    /// the front of `pending`, which must not look like an option itself. The value is only
    /// removed from `pending` once it converted successfully.
    pub fn set_optional_argument_value(
        &mut self,
        token: &str,
        pending: &mut VecDeque<String>,
    ) -> Result<(), Error> {
        let Some(argument) = self.options.values_mut().find(|a| a.matches(token)) else {
            return Err(UsageError::UnknownOption(token.to_string()).into());
        };

        if argument.kind() == ValueKind::Bool {
            return argument
                .set_value("true")
                .map_err(|source| invalid_value(token, source));
        }

        let Some(value) = pending.front().filter(|v| !v.starts_with('-')) else {
            return Err(UsageError::ExpectedValue(token.to_string()).into());
        };

        argument
            .set_value(value)
            .map_err(|source| invalid_value(token, source))?;
        pending.pop_front();
        Ok(())
    }

    /// Assigns `token` to the next unfilled positional
    pub fn set_positional_argument_value(&mut self, token: &str) -> Result<(), Error> {
        let Some((_, argument)) = self.positionals.get_index_mut(self.cursor) else {
            return Err(UsageError::UnexpectedPositional(token.to_string()).into());
        };

        argument
            .set_value(token)
            .map_err(|source| invalid_value(token, source))?;
        self.cursor += 1;
        Ok(())
    }
}

fn invalid_value(token: &str, source: crate::error::ConversionError) -> Error {
    Error::InvalidValue {
        token: token.to_string(),
        source,
    }
}
