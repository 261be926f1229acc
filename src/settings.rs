//! Construction-time limits and help layout.

pub const DEFAULT_MAX_COMMANDS: usize = 20;
pub const DEFAULT_MAX_OPTIONS: usize = 10;
pub const DEFAULT_MAX_VALUES: usize = 10;
pub const DEFAULT_FIELD_WIDTH: usize = 15;

/// Parser-level knobs. Capacities are fixed when the parser is built and
/// never grow afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Named commands the parser can hold.
    pub max_commands: usize,
    /// Width of the name column in the top-level help listing.
    pub field_width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_commands: DEFAULT_MAX_COMMANDS,
            field_width: DEFAULT_FIELD_WIDTH,
        }
    }
}
