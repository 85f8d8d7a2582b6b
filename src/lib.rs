//! A command line parser with typed values
//!
//! Arguments are declared up front with a type, and the parser converts every token it assigns:
//! ```text
//! app --verbose build app -j 8
//! ```
//!
//! Declared as | Selected by | Value
//! -|-|-
//! `--name` | `--name` or its short alias (`-n`) | the next token (flags of type `bool` take none)
//! `name` | position, in declaration order | the token itself
//! [`Command`] | a bare word, before any other command was selected | n/a
//!
//! # Syntax
//!
//! - An argument starting with `-` selects an option of the active command.
//! - A bare word selects a [`Command`] if none was selected yet and one with that name exists.
//! - Every other bare word fills the next positional of the active command.
//!
//! Options and positionals given before a command is selected belong to the default command;
//! everything after belongs to the selected one. Only one level of commands exists.
//!
//! ```
//! use typed_argparser::{Argument, Command, Parser, ValueKind};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut parser = Parser::new();
//! parser.add_argument(Argument::new(ValueKind::Bool, "--verbose").short("-v"))?;
//! parser.add_command(
//!     Command::new("build", "Builds a target")
//!         .with_argument(Argument::new(ValueKind::String, "target"))?
//!         .with_argument(Argument::new(ValueKind::Int, "--jobs").short("-j").default_value(1))?,
//! );
//!
//! parser.parse(["app", "-v", "build", "app", "-j", "8"])?;
//!
//! assert_eq!(parser.get::<bool>("verbose"), Some(true));
//! assert_eq!(parser.get_from::<String>("build", "target").as_deref(), Some("app"));
//! assert_eq!(parser.get_from::<i32>("build", "jobs"), Some(8));
//! # Ok(())
//! # }
//! ```

mod argument;
mod command;
mod error;
mod parser;
mod value;

pub use argument::Argument;
pub use command::{help, Command};
pub use error::{ConversionError, ConversionFailure, DeclarationError, Error, Result, UsageError};
pub use parser::{Parser, ParserConfig};
pub use value::{FromValue, Value, ValueKind};
