use crate::argument::Argument;
use crate::command::{help, Command};
use crate::error::{DeclarationError, Error};
use crate::value::FromValue;
use indexmap::IndexMap;
use std::collections::VecDeque;
use std::io::{self, Write};

const DEFAULT_COMMAND: &str = "default";

/// What the caller wants done when [`Parser::parse_or_exit`] fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Report the error on stderr and exit with status 1
    pub raise_error: bool,
    /// Also print the usage text when reporting an error
    pub print_usage: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            raise_error: true,
            print_usage: true,
        }
    }
}

impl ParserConfig {
    pub fn raise_error(mut self, raise_error: bool) -> Self {
        self.raise_error = raise_error;
        self
    }

    pub fn print_usage(mut self, print_usage: bool) -> Self {
        self.print_usage = print_usage;
        self
    }
}

/// How a single command line token is handled
#[derive(Debug, PartialEq)]
enum Token<'t> {
    Option(&'t str),
    Bare(&'t str),
}

impl<'t> Token<'t> {
    fn classify(token: &'t str) -> Self {
        if token.starts_with('-') {
            Token::Option(token)
        } else {
            Token::Bare(token)
        }
    }
}

/// Parses a command line against declared arguments and subcommands.
///
/// Arguments added directly to the parser belong to the default command. The first bare word
/// that names a registered command selects it; every token after that is resolved against the
/// selected command.
#[derive(Debug, Clone)]
pub struct Parser {
    config: ParserConfig,
    application_name: String,
    pending: VecDeque<String>,
    default_command: Command,
    commands: IndexMap<String, Command>,
    active: Option<String>,
}

impl Default for Parser {
    fn default() -> Self {
        Parser::with_config(ParserConfig::default())
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Parser {
            config,
            application_name: String::new(),
            pending: VecDeque::new(),
            default_command: Command::new(DEFAULT_COMMAND, ""),
            commands: IndexMap::new(),
            active: None,
        }
    }

    pub fn config(&self) -> ParserConfig {
        self.config
    }

    /// Registers an argument on the default command, replacing one with the same name
    pub fn add_argument(&mut self, argument: Argument) -> Result<(), DeclarationError> {
        self.default_command.add_argument(argument, true)
    }

    /// Registers a subcommand, replacing one with the same name
    pub fn add_command(&mut self, command: Command) {
        tracing::debug!(command = command.name(), "command registered");
        self.commands.insert(command.name().to_string(), command);
    }

    /// Parses `args` as command line arguments. The input is expected to be in the same format
    /// that [args()](std::env::args) returns (i.e. the name of the executable is first).
    ///
    /// Stops at the first error. Values assigned before the error are kept.
    pub fn parse<I, T>(&mut self, args: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut iter = args.into_iter().map(|s| s.into());
        self.application_name = iter.next().unwrap_or_default();
        self.pending = iter.collect();

        while let Some(arg) = self.pending.pop_front() {
            match Token::classify(&arg) {
                Token::Option(option) => {
                    tracing::trace!(token = option, "option");
                    let command = active_command_mut(
                        &mut self.default_command,
                        &mut self.commands,
                        self.active.as_deref(),
                    );
                    command.set_optional_argument_value(option, &mut self.pending)?;
                }
                Token::Bare(word) if self.active.is_some() => {
                    tracing::trace!(token = word, "positional");
                    let command = active_command_mut(
                        &mut self.default_command,
                        &mut self.commands,
                        self.active.as_deref(),
                    );
                    command.set_positional_argument_value(word)?;
                }
                Token::Bare(word) => {
                    if let Some(command) = self.commands.get_mut(word) {
                        tracing::debug!(command = word, "command activated");
                        command.activate();
                        self.active = Some(word.to_string());
                        continue;
                    }
                    tracing::trace!(token = word, "positional");
                    self.default_command.set_positional_argument_value(word)?;
                }
            }
        }

        Ok(())
    }

    /// Parses the arguments of the current process
    pub fn parse_from_env(&mut self) -> Result<(), Error> {
        self.parse(std::env::args())
    }

    /// Parses `args`, reporting errors according to the parser's [`ParserConfig`].
    ///
    /// When `raise_error` is set, an error is printed to stderr and the process exits with
    /// status 1. Otherwise the error is returned.
    pub fn parse_or_exit<I, T>(&mut self, args: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let Err(error) = self.parse(args) else {
            return Ok(());
        };

        if !self.config.raise_error {
            return Err(error);
        }

        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "error: {error}");
        if self.config.print_usage {
            let _ = writeln!(stderr);
            let _ = self.write_usage(&mut stderr);
        }
        std::process::exit(1);
    }

    /// Returns argv[0] of the last parse
    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    /// Returns the selected subcommand, if any
    pub fn active_command(&self) -> Option<&Command> {
        self.active.as_deref().and_then(|name| self.commands.get(name))
    }

    /// Returns the name of the selected subcommand, or an empty string
    pub fn active_command_name(&self) -> &str {
        self.active.as_deref().unwrap_or_default()
    }

    pub fn default_command(&self) -> &Command {
        &self.default_command
    }

    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Returns the value of an argument of the default command
    pub fn get<T: FromValue>(&self, argument: &str) -> Option<T> {
        self.default_command.get_argument(argument)?.value()
    }

    /// Returns the value of an argument of the named subcommand
    pub fn get_from<T: FromValue>(&self, command: &str, argument: &str) -> Option<T> {
        self.commands.get(command)?.get_argument(argument)?.value()
    }

    /// Writes help for the selected subcommand, or for the default command and the list of
    /// subcommands when none is selected
    pub fn write_usage(&self, w: impl Write) -> io::Result<()> {
        let program = if self.application_name.is_empty() {
            "<program>"
        } else {
            self.application_name.as_str()
        };

        match self.active_command() {
            Some(command) => {
                let invocation = format!("{program} {}", command.name());
                help::write_help(w, &invocation, command, &[])
            }
            None => {
                let subcommands = self.commands.values().collect::<Vec<_>>();
                help::write_help(w, program, &self.default_command, &subcommands)
            }
        }
    }

    /// Returns the text written by [`Parser::write_usage`]
    pub fn usage(&self) -> String {
        let mut buf = vec![];
        // Writing to a Vec cannot fail
        let _ = self.write_usage(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

fn active_command_mut<'c>(
    default_command: &'c mut Command,
    commands: &'c mut IndexMap<String, Command>,
    active: Option<&str>,
) -> &'c mut Command {
    match active.and_then(|name| commands.get_mut(name)) {
        Some(command) => command,
        None => default_command,
    }
}
