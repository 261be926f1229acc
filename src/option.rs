//! Option definitions and their collected values.

use crate::bounded::BoundedVec;
use crate::error::ParseError;
use crate::settings::DEFAULT_MAX_VALUES;
use crate::value::{OptionType, OptionValue, Scalar};

/// Strip one leading `--` or `-` from an argument.
/// `--book` → `book`, `-b` → `b`, `book` → `book`.
pub fn strip_name(arg: &str) -> &str {
    arg.strip_prefix("--")
        .or_else(|| arg.strip_prefix('-'))
        .unwrap_or(arg)
}

/// A named, typed option and the values supplied for it during a parse.
#[derive(Debug)]
pub struct CliOption {
    short_name: Option<String>,
    long_name: Option<String>,
    description: String,
    declared_type: OptionType,
    allow_multiple: bool,
    values: BoundedVec<OptionValue>,
}

impl CliOption {
    /// A single-valued option. At least one of `short_name` / `long_name`
    /// must be set for lookup to find it.
    pub fn new(
        short_name: Option<&str>,
        long_name: Option<&str>,
        description: &str,
        declared_type: OptionType,
    ) -> Self {
        Self {
            short_name: short_name.map(str::to_string),
            long_name: long_name.map(str::to_string),
            description: description.to_string(),
            declared_type,
            allow_multiple: false,
            values: BoundedVec::with_capacity(1),
        }
    }

    /// Accept repeated values, up to the default value capacity.
    pub fn multiple(self) -> Self {
        self.multiple_with_capacity(DEFAULT_MAX_VALUES)
    }

    /// Accept repeated values, up to `max_values` (at least one).
    pub fn multiple_with_capacity(mut self, max_values: usize) -> Self {
        self.allow_multiple = true;
        self.values = BoundedVec::with_capacity(max_values.max(1));
        self
    }

    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref().map(strip_name)
    }

    pub fn long_name(&self) -> Option<&str> {
        self.long_name.as_deref().map(strip_name)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn declared_type(&self) -> OptionType {
        self.declared_type
    }

    pub fn allow_multiple(&self) -> bool {
        self.allow_multiple
    }

    /// Whether the option consumes a value token (everything but Bool).
    pub fn has_value(&self) -> bool {
        self.declared_type != OptionType::Bool
    }

    /// Name used in diagnostics: the long name, else the short one.
    pub fn display_name(&self) -> &str {
        self.long_name().or(self.short_name()).unwrap_or("")
    }

    /// Whether `name`, with its dash prefix stripped, is this option's short
    /// or long name. Unset names never match.
    pub fn equals(&self, name: &str) -> bool {
        let name = strip_name(name);
        self.short_name() == Some(name) || self.long_name() == Some(name)
    }

    /// Parse `raw` as the declared type and append it.
    ///
    /// Bool options always end up holding a single `true`. A single-valued
    /// option that already holds a value rejects the new one without
    /// parsing it.
    pub fn add_value(&mut self, raw: &str) -> Result<(), ParseError> {
        if self.declared_type == OptionType::Bool {
            self.set_bool_value(true);
            return Ok(());
        }

        if !self.allow_multiple && !self.values.is_empty() {
            tracing::debug!(option = self.display_name(), raw, "rejected second value");
            return Err(ParseError::DuplicateValueRejected {
                option: self.display_name().to_string(),
            });
        }

        let Some(value) = OptionValue::parse(self.declared_type, raw) else {
            tracing::warn!(
                option = self.display_name(),
                raw,
                ty = %self.declared_type,
                "malformed value"
            );
            return Err(ParseError::MalformedValue {
                value: raw.to_string(),
                option: self.display_name().to_string(),
            });
        };

        self.values.try_push(value).map_err(|_| {
            tracing::warn!(option = self.display_name(), "value capacity exceeded");
            ParseError::CapacityExceeded {
                what: "values",
                capacity: self.values.capacity(),
            }
        })
    }

    /// Force a Bool option to hold exactly `value`. No-op for other types.
    pub fn set_bool_value(&mut self, value: bool) {
        if self.declared_type != OptionType::Bool {
            return;
        }
        self.values.clear();
        // Capacity is never below one, so the push after a clear succeeds.
        let _ = self.values.try_push(OptionValue::create_bool(value));
    }

    pub fn get_first_value(&self) -> Option<&OptionValue> {
        self.values.first()
    }

    pub fn get_all_values(&self) -> &[OptionValue] {
        self.values.as_slice()
    }

    /// Every String-typed value, in the order given.
    pub fn get_all_strings(&self) -> impl Iterator<Item = &str> {
        self.values.iter().filter_map(OptionValue::as_str)
    }

    /// First value read as `T`, or `None` if absent or of another type.
    pub fn first<T: Scalar>(&self) -> Option<T> {
        self.get_first_value().and_then(T::from_value)
    }

    pub fn get_first_bool(&self) -> Option<bool> {
        self.first()
    }

    pub fn get_first_string(&self) -> Option<&str> {
        self.get_first_value().and_then(OptionValue::as_str)
    }

    pub fn get_first_i8(&self) -> Option<i8> {
        self.first()
    }

    pub fn get_first_i16(&self) -> Option<i16> {
        self.first()
    }

    pub fn get_first_i32(&self) -> Option<i32> {
        self.first()
    }

    pub fn get_first_i64(&self) -> Option<i64> {
        self.first()
    }

    pub fn get_first_u8(&self) -> Option<u8> {
        self.first()
    }

    pub fn get_first_u16(&self) -> Option<u16> {
        self.first()
    }

    pub fn get_first_u32(&self) -> Option<u32> {
        self.first()
    }

    pub fn get_first_u64(&self) -> Option<u64> {
        self.first()
    }

    pub fn get_first_f32(&self) -> Option<f32> {
        self.first()
    }

    pub fn get_first_f64(&self) -> Option<f64> {
        self.first()
    }
}
