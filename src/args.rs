//! The parser: picks the target command, scans option tokens into it, and
//! dispatches its callback.
//!
//! Invocation grammar:
//!
//! ```text
//! program [options...]                 main command
//! program <command-name> [options...]  named command
//! ```
//!
//! Options are `-<short>` or `--<long>`, followed by one value token unless
//! the option is a flag. A token starting with `-` is never taken as a value,
//! negative numbers included; it is always read as the next option.

use crate::bounded::BoundedVec;
use crate::command::Command;
use crate::error::{ParseError, EXIT_SUCCESS};
use crate::settings::Settings;
use crate::usage;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selected {
    Main,
    Named(usize),
}

#[derive(Debug)]
pub struct Parser {
    program_name: String,
    settings: Settings,
    main_command: Option<Command>,
    commands: BoundedVec<Command>,
    current: Option<Selected>,
}

fn is_option(arg: &str) -> bool {
    arg.starts_with('-')
}

fn is_help(arg: &str) -> bool {
    arg == "--help" || arg == "-h"
}

impl Parser {
    pub fn new(program_name: &str) -> Self {
        Self::with_settings(program_name, Settings::default())
    }

    pub fn with_settings(program_name: &str, settings: Settings) -> Self {
        Self {
            program_name: program_name.to_string(),
            settings,
            main_command: None,
            commands: BoundedVec::with_capacity(settings.max_commands),
            current: None,
        }
    }

    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Register a named command. Names should be unique; lookup takes the
    /// first registered match.
    pub fn add_command(&mut self, command: Command) -> Result<(), ParseError> {
        self.commands
            .try_push(command)
            .map_err(|_| ParseError::CapacityExceeded {
                what: "commands",
                capacity: self.commands.capacity(),
            })
    }

    /// Register the command used when no command name is given. Replaces any
    /// earlier main command.
    pub fn set_main_command(&mut self, command: Command) {
        self.main_command = Some(command);
    }

    pub fn main_command(&self) -> Option<&Command> {
        self.main_command.as_ref()
    }

    pub fn commands(&self) -> &[Command] {
        self.commands.as_slice()
    }

    /// The command selected by the last parse. Its options hold the parsed
    /// values.
    pub fn current_command(&self) -> Option<&Command> {
        match self.current? {
            Selected::Main => self.main_command.as_ref(),
            Selected::Named(index) => self.commands.get(index),
        }
    }

    pub fn current_command_mut(&mut self) -> Option<&mut Command> {
        match self.current? {
            Selected::Main => self.main_command.as_mut(),
            Selected::Named(index) => self.commands.get_mut(index),
        }
    }

    /// Index of the first command whose name equals `name` exactly.
    fn find_command(&self, name: &str) -> Option<usize> {
        self.commands.iter().position(|cmd| cmd.name() == Some(name))
    }

    /// Parse `args` (with the program name at index 0), writing help and
    /// diagnostics to stdout.
    pub fn parse<S: AsRef<str>>(&mut self, args: &[S]) -> Result<(), ParseError> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.parse_with_output(args, &mut out)
    }

    /// Parse `args`, writing help and diagnostics to `out`.
    ///
    /// Fails fast: the first error stops the scan. `--help`/`-h` renders the
    /// target command's help and returns [`ParseError::HelpRequested`].
    pub fn parse_with_output<S, W>(&mut self, args: &[S], out: &mut W) -> Result<(), ParseError>
    where
        S: AsRef<str>,
        W: Write,
    {
        let result = self.resolve(args).and_then(|start| self.scan(args, start, out));

        if let Err(err) = &result {
            tracing::debug!(error = %err, "parse failed");
            if err.is_reported() {
                let _ = writeln!(out, "{}", err);
            }
            if matches!(err, ParseError::UnknownCommand(_) | ParseError::NoCommandSelectable) {
                self.write_help(out);
            }
        }
        result
    }

    /// Parse, then run the selected command's callback. Returns the process
    /// exit code: 0 when both succeed, 1 otherwise.
    pub fn parse_and_execute<S: AsRef<str>>(&mut self, args: &[S]) -> i32 {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.parse_and_execute_with_output(args, &mut out)
    }

    pub fn parse_and_execute_with_output<S, W>(&mut self, args: &[S], out: &mut W) -> i32
    where
        S: AsRef<str>,
        W: Write,
    {
        let result = self.parse_with_output(args, out).and_then(|()| self.execute());
        match result {
            Ok(()) => EXIT_SUCCESS,
            Err(err) => err.exit_code(),
        }
    }

    /// Run the callback of the command selected by the last parse.
    pub fn execute(&mut self) -> Result<(), ParseError> {
        let ok = self.current_command_mut().map_or(true, Command::execute);
        if ok {
            Ok(())
        } else {
            tracing::debug!("callback reported failure");
            Err(ParseError::CallbackFailed)
        }
    }

    /// Select the target command and return the index scanning starts at.
    fn resolve<S: AsRef<str>>(&mut self, args: &[S]) -> Result<usize, ParseError> {
        self.current = None;

        match args.get(1).map(AsRef::as_ref) {
            None => self.select_main(),
            Some(first) if is_option(first) => self.select_main(),
            Some(first) => {
                let index = self
                    .find_command(first)
                    .ok_or_else(|| ParseError::UnknownCommand(first.to_string()))?;
                tracing::debug!(command = first, "resolved named command");
                self.current = Some(Selected::Named(index));
                Ok(2)
            }
        }
    }

    fn select_main(&mut self) -> Result<usize, ParseError> {
        if self.main_command.is_none() {
            return Err(ParseError::NoCommandSelectable);
        }
        tracing::debug!("resolved main command");
        self.current = Some(Selected::Main);
        Ok(1)
    }

    /// Walk the tokens from `start`, appending values to the target's options.
    ///
    /// Tokens that are neither options nor consumed values are skipped.
    fn scan<S, W>(&mut self, args: &[S], start: usize, out: &mut W) -> Result<(), ParseError>
    where
        S: AsRef<str>,
        W: Write,
    {
        let mut i = start;
        while i < args.len() {
            let arg = args[i].as_ref();
            tracing::trace!(index = i, arg, "token");

            if is_help(arg) {
                if let Some(command) = self.current_command() {
                    usage::write_command_help(out, &self.program_name, command);
                }
                return Err(ParseError::HelpRequested);
            }

            if !is_option(arg) {
                i += 1;
                continue;
            }

            let next = args
                .get(i + 1)
                .map(AsRef::as_ref)
                .filter(|next| !is_option(next));

            let command = self
                .current_command_mut()
                .ok_or(ParseError::NoCommandSelectable)?;
            let option = command
                .get_option_mut(arg)
                .ok_or_else(|| ParseError::UnknownOption(arg.to_string()))?;

            match next {
                Some(value) if option.has_value() => {
                    option.add_value(value)?;
                    i += 2;
                }
                _ => {
                    // Flags record presence; a value option with no usable
                    // value token stays empty.
                    option.set_bool_value(true);
                    i += 1;
                }
            }
        }
        Ok(())
    }

    pub fn print_help(&self) {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_help(&mut out);
    }

    pub fn write_help<W: Write>(&self, out: &mut W) {
        usage::write_help(
            out,
            &self.program_name,
            self.main_command.as_ref(),
            self.commands.as_slice(),
            self.settings.field_width,
        );
    }

    pub fn print_command_help(&self, command: &Command) {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_command_help(&mut out, command);
    }

    pub fn write_command_help<W: Write>(&self, out: &mut W, command: &Command) {
        usage::write_command_help(out, &self.program_name, command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::CliOption;
    use crate::value::OptionType;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn reader_main() -> Command {
        let mut main = Command::main("Look up a passage");
        main.add_option(CliOption::new(Some("b"), Some("book"), "Book name", OptionType::String))
            .unwrap();
        main.add_option(CliOption::new(Some("c"), Some("chapter"), "Chapter", OptionType::Int32))
            .unwrap();
        main.add_option(CliOption::new(Some("r"), Some("red"), "Red letters", OptionType::Bool))
            .unwrap();
        main
    }

    fn run(parser: &mut Parser, args: &[&str]) -> (Result<(), ParseError>, String) {
        let mut buf = Vec::new();
        let result = parser.parse_with_output(args, &mut buf);
        (result, String::from_utf8(buf).unwrap())
    }

    fn exec(parser: &mut Parser, args: &[&str]) -> (i32, String) {
        let mut buf = Vec::new();
        let code = parser.parse_and_execute_with_output(args, &mut buf);
        (code, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn main_command_collects_typed_values() {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::new(RefCell::new(None));
        let (c, s) = (calls.clone(), seen.clone());

        let mut parser = Parser::new("reader");
        parser.set_main_command(reader_main().with_callback(move |cmd| {
            c.set(c.get() + 1);
            let book = cmd.get_option("book").and_then(|o| o.get_first_string()).map(String::from);
            let chapter = cmd.get_option("chapter").and_then(|o| o.get_first_i32());
            *s.borrow_mut() = Some((book, chapter));
            true
        }));

        let (code, out) = exec(&mut parser, &["reader", "-b", "John", "-c", "3"]);
        assert_eq!(code, 0);
        assert!(out.is_empty());
        assert_eq!(calls.get(), 1);
        assert_eq!(*seen.borrow(), Some((Some("John".to_string()), Some(3))));
    }

    #[test]
    fn results_are_read_through_the_parser() {
        let mut parser = Parser::new("reader");
        parser.set_main_command(reader_main());
        let (result, _) = run(&mut parser, &["reader", "--book", "Ruth", "--red"]);
        assert!(result.is_ok());

        let cmd = parser.current_command().unwrap();
        assert!(cmd.name().is_none());
        assert_eq!(cmd.get_option("b").unwrap().get_first_string(), Some("Ruth"));
        assert_eq!(cmd.get_option("r").unwrap().get_first_bool(), Some(true));
        assert_eq!(cmd.get_option("c").unwrap().get_first_i32(), None);
    }

    #[test]
    fn no_arguments_selects_main() {
        let mut parser = Parser::new("reader");
        parser.set_main_command(reader_main());
        let (code, out) = exec(&mut parser, &["reader"]);
        assert_eq!(code, 0);
        assert!(out.is_empty());
        assert!(parser.current_command().is_some());
    }

    #[test]
    fn option_without_main_prints_top_level_help() {
        let mut parser = Parser::new("reader");
        parser.add_command(Command::new("list", "List books")).unwrap();
        let (result, out) = run(&mut parser, &["reader", "-b", "John"]);
        assert_eq!(result, Err(ParseError::NoCommandSelectable));
        assert!(out.starts_with("Usage: reader <command> [options]"));
        assert!(out.contains("list"));
        assert!(parser.current_command().is_none());
    }

    #[test]
    fn empty_parser_with_no_args_prints_help() {
        let mut parser = Parser::new("reader");
        let (code, out) = exec(&mut parser, &["reader"]);
        assert_eq!(code, 1);
        assert!(out.starts_with("Usage:"));
    }

    #[test]
    fn unknown_command_does_not_fall_back_to_main() {
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let mut parser = Parser::new("reader");
        parser.set_main_command(reader_main().with_callback(move |_| {
            c.set(c.get() + 1);
            true
        }));

        let (code, out) = exec(&mut parser, &["reader", "unknown-cmd"]);
        assert_eq!(code, 1);
        assert!(out.starts_with("Unknown command: unknown-cmd\n"));
        assert!(out.contains("Usage: reader [options]"));
        assert_eq!(calls.get(), 0);
        assert!(parser.current_command().is_none());
    }

    #[test]
    fn named_command_matches_exactly() {
        let mut parser = Parser::new("reader");
        let mut search = Command::new("search", "Search text");
        search
            .add_option(CliOption::new(Some("q"), Some("query"), "Query", OptionType::String))
            .unwrap();
        parser.add_command(Command::new("list", "List books")).unwrap();
        parser.add_command(search).unwrap();

        let (result, _) = run(&mut parser, &["reader", "search", "-q", "love"]);
        assert!(result.is_ok());
        let cmd = parser.current_command().unwrap();
        assert_eq!(cmd.name(), Some("search"));
        assert_eq!(cmd.get_option("query").unwrap().get_first_string(), Some("love"));

        let (result, _) = run(&mut parser, &["reader", "sea"]);
        assert_eq!(result, Err(ParseError::UnknownCommand("sea".into())));
    }

    #[test]
    fn duplicate_command_names_resolve_to_first() {
        let mut parser = Parser::new("reader");
        parser.add_command(Command::new("go", "first")).unwrap();
        parser.add_command(Command::new("go", "second")).unwrap();
        run(&mut parser, &["reader", "go"]).0.unwrap();
        assert_eq!(parser.current_command().unwrap().description(), "first");
    }

    #[test]
    fn unknown_option_fails_fast() {
        let mut parser = Parser::new("reader");
        parser.set_main_command(reader_main());
        let (result, out) = run(&mut parser, &["reader", "--verse", "16", "-b", "John"]);
        assert_eq!(result, Err(ParseError::UnknownOption("--verse".into())));
        assert_eq!(out, "Unknown option: --verse\n");
        let cmd = parser.current_command().unwrap();
        assert!(cmd.get_option("book").unwrap().get_all_values().is_empty());
    }

    #[test]
    fn dash_token_is_never_a_value() {
        let mut parser = Parser::new("reader");
        parser.set_main_command(reader_main());
        let (result, _) = run(&mut parser, &["reader", "-c", "-5"]);
        assert_eq!(result, Err(ParseError::UnknownOption("-5".into())));
        let cmd = parser.current_command().unwrap();
        assert!(cmd.get_option("chapter").unwrap().get_all_values().is_empty());
    }

    #[test]
    fn valueless_option_leaves_next_option_to_be_parsed() {
        let mut parser = Parser::new("reader");
        parser.set_main_command(reader_main());
        let (result, _) = run(&mut parser, &["reader", "-b", "-c", "3"]);
        assert!(result.is_ok());
        let cmd = parser.current_command().unwrap();
        assert!(cmd.get_option("b").unwrap().get_all_values().is_empty());
        assert_eq!(cmd.get_option("c").unwrap().get_first_i32(), Some(3));
    }

    #[test]
    fn trailing_value_option_stays_empty() {
        let mut parser = Parser::new("reader");
        parser.set_main_command(reader_main());
        assert!(run(&mut parser, &["reader", "-b"]).0.is_ok());
        let cmd = parser.current_command().unwrap();
        assert!(cmd.get_option("b").unwrap().get_all_values().is_empty());
    }

    #[test]
    fn flag_does_not_consume_next_token() {
        let mut parser = Parser::new("reader");
        parser.set_main_command(reader_main());
        let (result, _) = run(&mut parser, &["reader", "-r", "John", "-c", "1"]);
        assert!(result.is_ok());
        let cmd = parser.current_command().unwrap();
        assert_eq!(cmd.get_option("r").unwrap().get_first_bool(), Some(true));
        assert!(cmd.get_option("b").unwrap().get_all_values().is_empty());
        assert_eq!(cmd.get_option("c").unwrap().get_first_i32(), Some(1));
    }

    #[test]
    fn stray_positionals_are_ignored() {
        let mut parser = Parser::new("reader");
        parser.set_main_command(reader_main());
        let (result, out) = run(&mut parser, &["reader", "-c", "3", "extra", "words"]);
        assert!(result.is_ok());
        assert!(out.is_empty());
    }

    #[test]
    fn out_of_range_value_names_the_option() {
        let mut main = Command::main("");
        main.add_option(CliOption::new(Some("n"), Some("count"), "", OptionType::Int8))
            .unwrap();
        let mut parser = Parser::new("reader");
        parser.set_main_command(main);

        let (code, out) = exec(&mut parser, &["reader", "-n", "200"]);
        assert_eq!(code, 1);
        assert_eq!(out, "Failed to parse value: 200 for option: count\n");
    }

    #[test]
    fn repeated_single_value_option_fails_silently() {
        let mut parser = Parser::new("reader");
        parser.set_main_command(reader_main());
        let (result, out) = run(&mut parser, &["reader", "-b", "John", "-b", "Mark"]);
        assert_eq!(result, Err(ParseError::DuplicateValueRejected { option: "book".into() }));
        assert!(out.is_empty());
    }

    #[test]
    fn multi_value_option_collects_in_order() {
        let mut main = Command::main("");
        main.add_option(
            CliOption::new(Some("v"), Some("verse"), "", OptionType::UInt16).multiple_with_capacity(3),
        )
        .unwrap();
        let mut parser = Parser::new("reader");
        parser.set_main_command(main);

        assert!(run(&mut parser, &["reader", "-v", "1", "--verse", "2", "-v", "3"]).0.is_ok());
        let values = parser.current_command().unwrap().get_option("v").unwrap().get_all_values();
        let nums: Vec<_> = values.iter().map(|v| v.to_string()).collect();
        assert_eq!(nums, vec!["1", "2", "3"]);

        let (result, out) = run(&mut parser, &["reader", "-v", "4"]);
        assert_eq!(result, Err(ParseError::CapacityExceeded { what: "values", capacity: 3 }));
        assert_eq!(out, "Too many values (capacity 3)\n");
    }

    #[test]
    fn help_renders_command_help_and_fails() {
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let mut parser = Parser::new("reader");
        parser.set_main_command(reader_main().with_callback(move |_| {
            c.set(c.get() + 1);
            true
        }));

        let (code, out) = exec(&mut parser, &["reader", "--help"]);
        assert_eq!(code, 1);
        assert!(out.starts_with("Usage: reader [options]\n"));
        assert!(out.contains("  -b, --book <value>\n      Book name\n"));
        assert!(out.contains("  -r, --red\n"));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn short_help_on_named_command() {
        let mut parser = Parser::new("reader");
        parser.add_command(Command::new("list", "List books")).unwrap();
        let (result, out) = run(&mut parser, &["reader", "list", "-h"]);
        assert_eq!(result, Err(ParseError::HelpRequested));
        assert!(out.starts_with("Usage: reader list [options]\n\nList books\n"));
    }

    #[test]
    fn help_after_an_unknown_option_is_not_reached() {
        let mut parser = Parser::new("reader");
        parser.set_main_command(reader_main());
        let (result, out) = run(&mut parser, &["reader", "-x", "--help"]);
        assert_eq!(result, Err(ParseError::UnknownOption("-x".into())));
        assert!(!out.contains("Usage"));
    }

    #[test]
    fn failing_callback_exits_one() {
        let mut parser = Parser::new("reader");
        parser.set_main_command(reader_main().with_callback(|cmd| {
            cmd.get_option("book").and_then(|o| o.get_first_string()).is_some()
        }));
        assert_eq!(exec(&mut parser, &["reader", "-c", "3"]).0, 1);
        assert_eq!(exec(&mut parser, &["reader", "-b", "Jude"]).0, 0);
    }

    #[test]
    fn add_command_fails_past_capacity() {
        let settings = Settings { max_commands: 1, ..Settings::default() };
        let mut parser = Parser::with_settings("reader", settings);
        parser.add_command(Command::new("a", "")).unwrap();
        assert_eq!(
            parser.add_command(Command::new("b", "")),
            Err(ParseError::CapacityExceeded { what: "commands", capacity: 1 })
        );
        assert_eq!(parser.commands().len(), 1);
    }

    #[test]
    fn accepts_owned_argument_vectors() {
        let mut parser = Parser::new("reader");
        parser.set_main_command(reader_main());
        let args: Vec<String> = vec!["reader".into(), "-c".into(), "7".into()];
        let mut sink = Vec::new();
        assert!(parser.parse_with_output(&args, &mut sink).is_ok());
        assert_eq!(
            parser.current_command().unwrap().get_option("c").unwrap().get_first_i32(),
            Some(7)
        );
    }
}
