//! Typed option values.
//!
//! An [`OptionValue`] is one of twelve scalar shapes. The variant is the type
//! tag, so a value can never disagree with its declared width.

use crate::to::{float_from_str, int_from_str};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    Bool,
    String,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
}

impl OptionType {
    pub fn name(self) -> &'static str {
        match self {
            OptionType::Bool => "bool",
            OptionType::String => "string",
            OptionType::Int8 => "i8",
            OptionType::Int16 => "i16",
            OptionType::Int32 => "i32",
            OptionType::Int64 => "i64",
            OptionType::UInt8 => "u8",
            OptionType::UInt16 => "u16",
            OptionType::UInt32 => "u32",
            OptionType::UInt64 => "u64",
            OptionType::Float32 => "f32",
            OptionType::Float64 => "f64",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    String(String),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
}

impl OptionValue {
    pub fn create_bool(value: bool) -> Self {
        OptionValue::Bool(value)
    }

    pub fn create_string(value: impl Into<String>) -> Self {
        OptionValue::String(value.into())
    }

    /// Build a value tagged with exactly the width of `W`.
    pub fn create_integer<W: Integer>(value: W) -> Self {
        value.into_value()
    }

    pub fn create_float32(value: f32) -> Self {
        OptionValue::Float32(value)
    }

    pub fn create_float64(value: f64) -> Self {
        OptionValue::Float64(value)
    }

    pub fn type_tag(&self) -> OptionType {
        match self {
            OptionValue::Bool(_) => OptionType::Bool,
            OptionValue::String(_) => OptionType::String,
            OptionValue::Int8(_) => OptionType::Int8,
            OptionValue::Int16(_) => OptionType::Int16,
            OptionValue::Int32(_) => OptionType::Int32,
            OptionValue::Int64(_) => OptionType::Int64,
            OptionValue::UInt8(_) => OptionType::UInt8,
            OptionValue::UInt16(_) => OptionType::UInt16,
            OptionValue::UInt32(_) => OptionType::UInt32,
            OptionValue::UInt64(_) => OptionType::UInt64,
            OptionValue::Float32(_) => OptionType::Float32,
            OptionValue::Float64(_) => OptionType::Float64,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Convert raw argument text into a value of type `ty`.
    ///
    /// Bool always yields `true`: a flag's presence is its value. String keeps
    /// the text verbatim. Numeric types go through the range-checked helpers
    /// in [`crate::to`].
    pub fn parse(ty: OptionType, raw: &str) -> Option<Self> {
        let value = match ty {
            OptionType::Bool => OptionValue::Bool(true),
            OptionType::String => OptionValue::String(raw.to_string()),
            OptionType::Int8 => OptionValue::Int8(int_from_str(raw)?),
            OptionType::Int16 => OptionValue::Int16(int_from_str(raw)?),
            OptionType::Int32 => OptionValue::Int32(int_from_str(raw)?),
            OptionType::Int64 => OptionValue::Int64(int_from_str(raw)?),
            OptionType::UInt8 => OptionValue::UInt8(int_from_str(raw)?),
            OptionType::UInt16 => OptionValue::UInt16(int_from_str(raw)?),
            OptionType::UInt32 => OptionValue::UInt32(int_from_str(raw)?),
            OptionType::UInt64 => OptionValue::UInt64(int_from_str(raw)?),
            OptionType::Float32 => OptionValue::Float32(float_from_str(raw)?),
            OptionType::Float64 => OptionValue::Float64(float_from_str(raw)?),
        };
        Some(value)
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(v) => write!(f, "{}", v),
            OptionValue::String(v) => f.write_str(v),
            OptionValue::Int8(v) => write!(f, "{}", v),
            OptionValue::Int16(v) => write!(f, "{}", v),
            OptionValue::Int32(v) => write!(f, "{}", v),
            OptionValue::Int64(v) => write!(f, "{}", v),
            OptionValue::UInt8(v) => write!(f, "{}", v),
            OptionValue::UInt16(v) => write!(f, "{}", v),
            OptionValue::UInt32(v) => write!(f, "{}", v),
            OptionValue::UInt64(v) => write!(f, "{}", v),
            OptionValue::Float32(v) => write!(f, "{}", v),
            OptionValue::Float64(v) => write!(f, "{}", v),
        }
    }
}

/// A copyable scalar that maps to exactly one [`OptionValue`] variant.
pub trait Scalar: Copy + Sized {
    const TYPE: OptionType;

    fn into_value(self) -> OptionValue;

    /// Read the payload back if `value` carries this type's tag.
    fn from_value(value: &OptionValue) -> Option<Self>;
}

/// Fixed-width integers accepted by [`OptionValue::create_integer`].
pub trait Integer: Scalar + FromStr<Err = ParseIntError> {}

macro_rules! scalar {
    ($ty:ty, $variant:ident) => {
        impl Scalar for $ty {
            const TYPE: OptionType = OptionType::$variant;

            fn into_value(self) -> OptionValue {
                OptionValue::$variant(self)
            }

            fn from_value(value: &OptionValue) -> Option<Self> {
                match value {
                    OptionValue::$variant(v) => Some(*v),
                    _ => None,
                }
            }
        }
    };
    ($ty:ty, $variant:ident, integer) => {
        scalar!($ty, $variant);
        impl Integer for $ty {}
    };
}

scalar!(bool, Bool);
scalar!(i8, Int8, integer);
scalar!(i16, Int16, integer);
scalar!(i32, Int32, integer);
scalar!(i64, Int64, integer);
scalar!(u8, UInt8, integer);
scalar!(u16, UInt16, integer);
scalar!(u32, UInt32, integer);
scalar!(u64, UInt64, integer);
scalar!(f32, Float32);
scalar!(f64, Float64);
