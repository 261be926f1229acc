#![forbid(unsafe_code)]

//! argline: subcommand and typed option parsing.
//!
//! A host registers named commands (or one unnamed main command), each with
//! typed options, then hands the process arguments to a [`Parser`]. The
//! parser picks the command, fills its options with parsed values, and runs
//! its callback.
//!
//! ```no_run
//! use argline::{CliOption, Command, OptionType, Parser};
//!
//! let mut main = Command::main("Look up a passage");
//! main.add_option(CliOption::new(Some("b"), Some("book"), "Book name", OptionType::String))
//!     .unwrap();
//! let main = main.with_callback(|cmd| {
//!     let book = cmd.get_option("book").and_then(|o| o.get_first_string());
//!     println!("{:?}", book);
//!     true
//! });
//!
//! let mut parser = Parser::new("reader");
//! parser.set_main_command(main);
//! let args: Vec<String> = std::env::args().collect();
//! std::process::exit(parser.parse_and_execute(&args));
//! ```

pub mod args;
pub mod bounded;
pub mod command;
pub mod error;
pub mod option;
pub mod settings;
pub mod to;
pub mod usage;
pub mod value;

pub use args::Parser;
pub use bounded::BoundedVec;
pub use command::{Callback, Command};
pub use error::{ParseError, EXIT_FAILURE, EXIT_SUCCESS};
pub use option::{strip_name, CliOption};
pub use settings::Settings;
pub use value::{Integer, OptionType, OptionValue, Scalar};
