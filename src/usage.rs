//! Help text: the top-level command listing and per-command option help.

use crate::command::Command;
use crate::option::CliOption;
use std::io::Write;

/// Print the top-level usage: usage forms, main description, named
/// commands, and a pointer to `--help`.
pub fn write_help<W: Write>(
    out: &mut W,
    program_name: &str,
    main_command: Option<&Command>,
    commands: &[Command],
    field_width: usize,
) {
    let mut forms: Vec<String> = Vec::new();
    if main_command.is_some() {
        forms.push(format!("{} [options]", program_name));
    }
    if !commands.is_empty() || main_command.is_none() {
        forms.push(format!("{} <command> [options]", program_name));
    }

    for (i, form) in forms.iter().enumerate() {
        let lead = if i == 0 { "Usage:" } else { "" };
        let _ = writeln!(out, "{:<6} {}", lead, form);
    }

    if let Some(main) = main_command {
        if !main.description().is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", main.description());
        }
    }

    if !commands.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Commands:");
        for cmd in commands {
            let _ = writeln!(
                out,
                "  {:width$} {}",
                cmd.name().unwrap_or(""),
                cmd.description(),
                width = field_width
            );
        }
    }

    let _ = writeln!(out);
    match (main_command.is_some(), commands.is_empty()) {
        (true, false) => {
            let _ = writeln!(
                out,
                "Use '{} --help' or '{} <command> --help' for more information.",
                program_name, program_name
            );
        }
        (true, true) => {
            let _ = writeln!(out, "Use '{} --help' for more information.", program_name);
        }
        (false, _) => {
            let _ = writeln!(out, "Use '{} <command> --help' for more information.", program_name);
        }
    }
}

/// Print one command's usage line, description, and options in
/// declaration order.
pub fn write_command_help<W: Write>(out: &mut W, program_name: &str, command: &Command) {
    match command.name() {
        Some(name) => {
            let _ = writeln!(out, "Usage: {} {} [options]", program_name, name);
        }
        None => {
            let _ = writeln!(out, "Usage: {} [options]", program_name);
        }
    }

    if !command.description().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", command.description());
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Options:");
    for option in command.options() {
        let _ = writeln!(out, "  {}", format_option(option));
        if !option.description().is_empty() {
            let _ = writeln!(out, "      {}", option.description());
        }
    }

    // -h/--help is always intercepted, so list it unless declared already.
    if command.get_option("help").is_none() && command.get_option("h").is_none() {
        let _ = writeln!(out, "  -h, --help");
        let _ = writeln!(out, "      Show this help message");
    }
}

/// `-b, --book <value>`: short first, long second, value marker for
/// anything but a flag.
pub fn format_option(option: &CliOption) -> String {
    let mut names: Vec<String> = Vec::new();
    if let Some(short) = option.short_name() {
        names.push(format!("-{}", short));
    }
    if let Some(long) = option.long_name() {
        names.push(format!("--{}", long));
    }

    let mut out = names.join(", ");
    if option.has_value() {
        out.push_str(" <value>");
    }
    out
}
