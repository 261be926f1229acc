//! Commands: a named (or main) group of options plus an optional callback.

use crate::bounded::BoundedVec;
use crate::error::ParseError;
use crate::option::CliOption;
use crate::settings::DEFAULT_MAX_OPTIONS;
use std::fmt;

/// Invoked with the parsed command. Any state the host needs is captured by
/// the closure. Returning `false` fails the run.
pub type Callback = Box<dyn FnMut(&Command) -> bool>;

pub struct Command {
    name: Option<String>,
    description: String,
    options: BoundedVec<CliOption>,
    callback: Option<Callback>,
}

impl Command {
    /// A named command, selected by its name as the first argument.
    pub fn new(name: &str, description: &str) -> Self {
        Self::with_capacity(Some(name), description, DEFAULT_MAX_OPTIONS)
    }

    /// The unnamed default command, selected when no command name is given.
    pub fn main(description: &str) -> Self {
        Self::with_capacity(None, description, DEFAULT_MAX_OPTIONS)
    }

    pub fn with_capacity(name: Option<&str>, description: &str, max_options: usize) -> Self {
        Self {
            name: name.map(str::to_string),
            description: description.to_string(),
            options: BoundedVec::with_capacity(max_options),
            callback: None,
        }
    }

    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&Command) -> bool + 'static,
    {
        self.set_callback(callback);
        self
    }

    pub fn set_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&Command) -> bool + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    /// `None` for the main command.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn options(&self) -> &[CliOption] {
        self.options.as_slice()
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Append an option, keeping declaration order.
    pub fn add_option(&mut self, option: CliOption) -> Result<(), ParseError> {
        self.options
            .try_push(option)
            .map_err(|_| ParseError::CapacityExceeded {
                what: "options",
                capacity: self.options.capacity(),
            })
    }

    /// First option whose short or long name matches `name` (dashes ignored).
    pub fn get_option(&self, name: &str) -> Option<&CliOption> {
        self.options.iter().find(|opt| opt.equals(name))
    }

    pub fn get_option_mut(&mut self, name: &str) -> Option<&mut CliOption> {
        self.options.iter_mut().find(|opt| opt.equals(name))
    }

    /// Run the callback, if any. A command without one succeeds.
    pub fn execute(&mut self) -> bool {
        let Some(mut callback) = self.callback.take() else {
            return true;
        };
        tracing::debug!(command = self.name().unwrap_or("(main)"), "executing callback");
        let ok = callback(&*self);
        self.callback = Some(callback);
        ok
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("options", &self.options)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}
