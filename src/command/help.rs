use super::Command;
use crate::argument::Argument;
use crate::value::ValueKind;
use std::io::{self, Write};

/// Writes the help of `command`.
///
/// `invocation` is what the user types to reach the command (e.g. `git remote`).
/// `subcommands` are listed under a `Commands:` section.
pub fn write_help(
    mut w: impl Write,
    invocation: &str,
    command: &Command,
    subcommands: &[&Command],
) -> io::Result<()> {
    if !command.help.is_empty() {
        write!(&mut w, "{}\n\n", command.help)?;
    }
    write_usage(&mut w, invocation, command, !subcommands.is_empty())?;
    write!(&mut w, "\n\n")?;

    if !command.positionals.is_empty() {
        writeln!(&mut w, "Arguments:")?;

        let labels = command
            .positionals()
            .map(positional_label)
            .collect::<Vec<_>>();

        let col_width = calculate_col_width(&labels);

        for (arg, label) in command.positionals().zip(labels) {
            writeln!(&mut w, "    {label:col_width$}{}", describe(arg))?;
        }

        writeln!(&mut w)?;
    }

    if !command.options.is_empty() {
        writeln!(&mut w, "Options:")?;

        let labels = command.options().map(option_label).collect::<Vec<_>>();

        let col_width = calculate_col_width(&labels);

        for (arg, label) in command.options().zip(labels) {
            writeln!(&mut w, "    {label:col_width$}{}", describe(arg))?;
        }

        writeln!(&mut w)?;
    }

    if !subcommands.is_empty() {
        writeln!(&mut w, "Commands:")?;
        let labels = subcommands
            .iter()
            .map(|c| c.name().to_string())
            .collect::<Vec<_>>();

        let col_width = calculate_col_width(&labels);

        for (cmd, label) in subcommands.iter().zip(labels) {
            writeln!(&mut w, "    {label:col_width$}{}", cmd.help)?;
        }

        writeln!(&mut w)?;
    }
    w.flush()
}

fn write_usage(
    mut w: impl Write,
    invocation: &str,
    command: &Command,
    has_subcommands: bool,
) -> io::Result<()> {
    write!(&mut w, "Usage: {invocation}")?;

    if !command.options.is_empty() {
        write!(&mut w, " [OPTIONS]")?;
    }

    for arg in command.positionals() {
        write!(&mut w, " {}", positional_label(arg))?;
    }

    if has_subcommands {
        write!(&mut w, " [COMMAND] [COMMAND ARGUMENTS]")?;
    }

    Ok(())
}

fn positional_label(arg: &Argument) -> String {
    match arg.default() {
        Some(_) => format!("[{}]", arg.name()),
        None => format!("<{}>", arg.name()),
    }
}

fn option_label(arg: &Argument) -> String {
    let names = arg.aliases().join("/");
    if arg.kind() == ValueKind::Bool {
        names
    } else {
        format!("{names} <{}>", arg.kind())
    }
}

fn describe(arg: &Argument) -> String {
    match arg.default() {
        Some(default) if arg.help().is_empty() => format!("[default: {default}]"),
        Some(default) => format!("{} [default: {default}]", arg.help()),
        None => arg.help().to_string(),
    }
}

fn calculate_col_width(list: &[String]) -> usize {
    list.iter().map(|s| s.len()).max().unwrap_or(0) + 5
}
