//! Values as delivered by a database driver.
//!
//! Drivers hand back very different representations of a column value: plain scalars, nullable
//! wrappers that pair a payload with a validity flag, raw bytes, and maps carrying base64 encoded
//! bytes. Each of these is a distinct variant of [`Value`] so that formatting is an exhaustive
//! match rather than a guess.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

/// A single column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absence of a value.
    Null,
    /// A plain boolean, number, or string.
    Scalar(Scalar),
    /// A typed payload paired with a validity flag.
    Nullable(Nullable),
    /// Raw binary data.
    Bytes(Vec<u8>),
    /// A key/value association. Only maps with a string `base64` entry can be formatted.
    Map(BTreeMap<String, Value>),
    /// A shape the driver produced that has no rendering. The string names the driver's type.
    Unsupported(String),
}

/// A plain value of a primitive type.
#[allow(missing_docs, clippy::missing_docs_in_private_items)]
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Text(String),
}

/// A payload that is only meaningful when `valid` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Nullable {
    /// Whether the payload holds a value. When `false`, the payload is ignored entirely.
    pub valid: bool,
    /// The payload, tagged by its declared kind.
    pub payload: NullablePayload,
}

/// The declared kind and content of a [`Nullable`] payload.
#[allow(missing_docs, clippy::missing_docs_in_private_items)]
#[derive(Debug, Clone, PartialEq)]
pub enum NullablePayload {
    Bool(bool),
    Float64(f64),
    Byte(u8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    String(String),
    /// A timestamp. Any timezone has already been discarded by the driver.
    Time(NaiveDateTime),
    /// A wrapper kind with no rendering. The string names the wrapper's type.
    Unsupported(String),
}

impl Nullable {
    /// A wrapper holding `payload`.
    #[inline]
    pub const fn valid(payload: NullablePayload) -> Self {
        Self {
            valid: true,
            payload,
        }
    }

    /// A wrapper marked as null. The payload is kept only to record the declared kind.
    #[inline]
    pub const fn null(payload: NullablePayload) -> Self {
        Self {
            valid: false,
            payload,
        }
    }
}

impl Value {
    /// A map carrying `encoded` under the `base64` key, as remote drivers send binary data.
    pub fn encoded_blob(encoded: impl Into<String>) -> Self {
        Self::Map(BTreeMap::from([(
            "base64".to_owned(),
            Self::Scalar(Scalar::Text(encoded.into())),
        )]))
    }

    /// The name of this value's shape, used when reporting values that cannot be formatted.
    pub fn kind(&self) -> &str {
        match self {
            Self::Null => "null",
            Self::Scalar(scalar) => scalar.kind(),
            Self::Nullable(nullable) => nullable.payload.kind(),
            Self::Bytes(_) => "bytes",
            Self::Map(_) => "map",
            Self::Unsupported(name) => name,
        }
    }
}

impl Scalar {
    /// The name of the primitive type.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::I8(_) => "int8",
            Self::I16(_) => "int16",
            Self::I32(_) => "int32",
            Self::I64(_) => "int64",
            Self::U8(_) => "uint8",
            Self::U16(_) => "uint16",
            Self::U32(_) => "uint32",
            Self::U64(_) => "uint64",
            Self::F32(_) => "float32",
            Self::F64(_) => "float64",
            Self::Text(_) => "string",
        }
    }
}

impl NullablePayload {
    /// The name of the wrapper type.
    pub fn kind(&self) -> &str {
        match self {
            Self::Bool(_) => "NullBool",
            Self::Float64(_) => "NullFloat64",
            Self::Byte(_) => "NullByte",
            Self::Int16(_) => "NullInt16",
            Self::Int32(_) => "NullInt32",
            Self::Int64(_) => "NullInt64",
            Self::String(_) => "NullString",
            Self::Time(_) => "NullTime",
            Self::Unsupported(name) => name,
        }
    }
}

/// Conversions from primitives into [`Value::Scalar`].
macro_rules! scalar_from {
    ($($t:ty => $variant:ident),* $(,)?) => {$(
        impl From<$t> for Value {
            #[inline]
            fn from(value: $t) -> Self {
                Self::Scalar(Scalar::$variant(value))
            }
        }
    )*};
}

scalar_from! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => Text,
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Scalar(Scalar::Text(value.to_owned()))
    }
}

impl From<Vec<u8>> for Value {
    #[inline]
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

/// Conversions from `Option<T>` into [`Value::Nullable`]. `None` keeps the declared kind with a
/// default payload.
macro_rules! nullable_from {
    ($($t:ty => $variant:ident),* $(,)?) => {$(
        impl From<Option<$t>> for Value {
            fn from(value: Option<$t>) -> Self {
                Self::Nullable(match value {
                    Some(value) => Nullable::valid(NullablePayload::$variant(value)),
                    None => Nullable::null(NullablePayload::$variant(Default::default())),
                })
            }
        }
    )*};
}

nullable_from! {
    bool => Bool,
    f64 => Float64,
    u8 => Byte,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    String => String,
    NaiveDateTime => Time,
}
