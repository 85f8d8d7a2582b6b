use crate::error::{ConversionError, DeclarationError};
use crate::value::{FromValue, Value, ValueKind};

/// A blueprint for a single command line argument.
///
/// The declared name decides what kind of argument this is:
/// - `--name` declares an option, selected by its long name or its short alias (`-n`)
/// - `name` declares a positional, filled by position in declaration order
///
/// A name with a single leading dash is rejected by [`Argument::validate`].
#[derive(Debug, Clone)]
pub struct Argument {
    kind: ValueKind,
    declared: String,
    short: Option<String>,
    description: String,
    default_value: Option<Value>,
    value: Option<Value>,
}

impl Argument {
    /// Declares a new argument of the given type
    pub fn new(kind: ValueKind, name: impl Into<String>) -> Self {
        Argument {
            kind,
            declared: name.into(),
            short: None,
            description: String::new(),
            default_value: None,
            value: None,
        }
    }

    /// Attaches a short alias (e.g. `-c`) to this argument
    pub fn short(mut self, alias: impl Into<String>) -> Self {
        self.short = Some(alias.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the value returned when the argument is absent from the command line
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Checks that the declaration is well formed.
    ///
    /// Checks run in order (long name, short alias, default type) and the first failure is
    /// returned.
    pub fn validate(&self) -> Result<(), DeclarationError> {
        if self.declared.starts_with("---")
            || (self.declared.starts_with('-') && !self.declared.starts_with("--"))
        {
            return Err(DeclarationError::LongName(self.declared.clone()));
        }

        if let Some(short) = self.short.as_deref().filter(|s| !s.is_empty()) {
            if !short.starts_with('-') || short.starts_with("--") {
                return Err(DeclarationError::ShortName(short.to_string()));
            }
        }

        if let Some(default) = &self.default_value {
            if default.kind() != self.kind {
                return Err(DeclarationError::DefaultType {
                    name: self.name().to_string(),
                    expected: self.kind,
                    found: default.kind(),
                });
            }
        }

        Ok(())
    }

    /// Returns the canonical name, without the `--` prefix of options
    pub fn name(&self) -> &str {
        self.declared.strip_prefix("--").unwrap_or(&self.declared)
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_positional(&self) -> bool {
        !self.declared.starts_with('-')
    }

    pub fn help(&self) -> &str {
        &self.description
    }

    /// Returns the short alias, if one was attached
    pub fn short_alias(&self) -> Option<&str> {
        self.short.as_deref().filter(|s| !s.is_empty())
    }

    /// Returns the token spellings that select this option. Empty for positionals.
    pub fn aliases(&self) -> Vec<&str> {
        if self.is_positional() {
            return vec![];
        }
        std::iter::once(self.declared.as_str())
            .chain(self.short_alias())
            .collect()
    }

    /// Returns true if `token` is one of this option's spellings
    pub fn matches(&self, token: &str) -> bool {
        !self.is_positional() && (token == self.declared || self.short_alias() == Some(token))
    }

    pub fn default(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    /// Returns true once a value was assigned from the command line
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Converts `token` and stores it as the current value.
    ///
    /// A second call overwrites the first.
    pub fn set_value(&mut self, token: &str) -> Result<(), ConversionError> {
        let value = self.kind.convert(token)?;
        tracing::trace!(argument = self.name(), %value, "argument value set");
        self.value = Some(value);
        Ok(())
    }

    /// Returns the assigned value, falling back to the default.
    ///
    /// Returns `None` when neither exists or when `T` does not match the argument's type.
    pub fn value<T: FromValue>(&self) -> Option<T> {
        self.value
            .as_ref()
            .or(self.default_value.as_ref())
            .and_then(T::from_value)
    }
}
