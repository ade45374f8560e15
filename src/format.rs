//! Rendering of [`Value`]s as text.
//!
//! The same rules serve two grammars: cells of a table shown to a person, and literals inside
//! generated SQL. Strings are emitted verbatim in both; any quoting a SQL context needs is up to the
//! caller.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

use crate::value::{Nullable, NullablePayload, Scalar, Value};

/// The text used for absent values.
const NULL: &str = "NULL";

/// The layout timestamps are rendered in. Sub-second precision is dropped.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Unpadded standard base64 that tolerates non-zero trailing bits, as drivers are not consistent
/// about clearing them.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

/// The grammar a value is being rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// A cell in a table shown to a person.
    Display,
    /// A literal in a generated SQL statement.
    SqlLiteral,
}

/// A value that could not be rendered.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The value's shape has no rendering.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),
    /// A nullable wrapper of a kind that has no rendering.
    #[error("unsupported struct type: {0}")]
    UnsupportedNullable(String),
    /// A map with no `base64` entry.
    #[error("unsupported map: no \"base64\" field")]
    MissingBase64Field,
    /// A map whose `base64` entry is not a string.
    #[error("unsupported map: unsupported \"base64\" field kind {0}")]
    UnsupportedBase64Field(String),
    /// The `base64` entry of a map is not valid unpadded base64.
    #[error("unable to decode base64 value: {0}")]
    Base64Decode(#[source] base64::DecodeError),
}

impl Mode {
    /// The spelling of an absent value. Both grammars use the bare `NULL` keyword; a SQL caller
    /// must not quote it.
    const fn null(self) -> &'static str {
        match self {
            Self::Display | Self::SqlLiteral => NULL,
        }
    }
}

/// Render every value of a row, stopping at the first value that cannot be rendered.
pub fn format_row(row: &[Value], mode: Mode) -> Result<Vec<String>, FormatError> {
    row.iter().map(|value| format_value(value, mode)).collect()
}

/// Render a single value.
pub fn format_value(value: &Value, mode: Mode) -> Result<String, FormatError> {
    match value {
        Value::Null => Ok(mode.null().to_owned()),
        Value::Nullable(nullable) => format_nullable(nullable, mode),
        Value::Bytes(bytes) => Ok(format_bytes(bytes)),
        Value::Map(map) => match map.get("base64") {
            None => Err(FormatError::MissingBase64Field),
            Some(Value::Scalar(Scalar::Text(encoded))) => decode_base64_to_hex(encoded),
            Some(other) => Err(FormatError::UnsupportedBase64Field(other.kind().to_owned())),
        },
        Value::Scalar(scalar) => Ok(format_scalar(scalar)),
        Value::Unsupported(name) => Err(FormatError::UnsupportedType(name.clone())),
    }
}

/// Render the payload of a wrapper, or `NULL` if the wrapper is not valid. An invalid wrapper is
/// never inspected further, even if its kind has no rendering.
fn format_nullable(nullable: &Nullable, mode: Mode) -> Result<String, FormatError> {
    if !nullable.valid {
        return Ok(mode.null().to_owned());
    }

    Ok(match &nullable.payload {
        NullablePayload::Bool(val) => val.to_string(),
        NullablePayload::Float64(val) => format_float(*val),
        NullablePayload::Byte(val) => val.to_string(),
        NullablePayload::Int16(val) => val.to_string(),
        NullablePayload::Int32(val) => val.to_string(),
        NullablePayload::Int64(val) => val.to_string(),
        NullablePayload::String(val) => val.clone(),
        NullablePayload::Time(val) => val.format(TIMESTAMP_FORMAT).to_string(),
        NullablePayload::Unsupported(name) => {
            return Err(FormatError::UnsupportedNullable(name.clone()))
        }
    })
}

/// Render a primitive. Narrow floats are widened first, so they show their exact binary value.
fn format_scalar(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Bool(val) => val.to_string(),
        Scalar::I8(val) => val.to_string(),
        Scalar::I16(val) => val.to_string(),
        Scalar::I32(val) => val.to_string(),
        Scalar::I64(val) => val.to_string(),
        Scalar::U8(val) => val.to_string(),
        Scalar::U16(val) => val.to_string(),
        Scalar::U32(val) => val.to_string(),
        Scalar::U64(val) => val.to_string(),
        Scalar::F32(val) => format_float(f64::from(*val)),
        Scalar::F64(val) => format_float(*val),
        Scalar::Text(val) => val.clone(),
    }
}

/// The shortest decimal text that parses back to `val`. `Display` for floats never switches to
/// scientific notation, so large and tiny magnitudes are written out in full. Infinities are
/// signed: `+Inf` and `-Inf`.
fn format_float(val: f64) -> String {
    if val.is_infinite() {
        let sign = if val.is_sign_positive() { '+' } else { '-' };
        format!("{sign}Inf")
    } else {
        val.to_string()
    }
}

/// `0x` followed by two uppercase hex digits per byte.
fn format_bytes(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode_upper(bytes))
}

/// Decode unpadded base64 and render the bytes as [`format_bytes`] does. Line breaks anywhere in
/// the input are ignored.
fn decode_base64_to_hex(encoded: &str) -> Result<String, FormatError> {
    let compact: String = encoded
        .chars()
        .filter(|c| !matches!(c, '\r' | '\n'))
        .collect();
    let bytes = BASE64.decode(compact).map_err(FormatError::Base64Decode)?;
    Ok(format_bytes(&bytes))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use super::*;

    fn display(value: impl Into<Value>) -> String {
        format_value(&value.into(), Mode::Display).expect("value should be formattable")
    }

    #[test]
    fn null_is_the_same_in_both_modes() {
        assert_eq!(format_value(&Value::Null, Mode::Display).unwrap(), "NULL");
        assert_eq!(
            format_value(&Value::Null, Mode::SqlLiteral).unwrap(),
            "NULL"
        );
    }

    #[test]
    fn scalars() {
        assert_eq!(display(true), "true");
        assert_eq!(display(false), "false");
        assert_eq!(display(-42_i8), "-42");
        assert_eq!(display(i64::MIN), "-9223372036854775808");
        assert_eq!(display(u64::MAX), "18446744073709551615");
        assert_eq!(display("o'clock"), "o'clock");
        assert_eq!(display(String::new()), "");
    }

    #[test]
    fn floats_are_shortest_round_trip() {
        assert_eq!(display(1.0_f64), "1");
        assert_eq!(display(0.1_f64), "0.1");
        assert_eq!(display(-2.5_f64), "-2.5");
        assert_eq!(display(1e21_f64), "1000000000000000000000");
        assert_eq!(display(1e-7_f64), "0.0000001");
        // Narrow floats are widened before rendering.
        assert_eq!(display(0.1_f32), "0.10000000149011612");

        assert_eq!(display(f64::INFINITY), "+Inf");
        assert_eq!(display(f64::NEG_INFINITY), "-Inf");
        assert_eq!(display(f32::NEG_INFINITY), "-Inf");
        assert_eq!(display(f64::NAN), "NaN");

        for val in [0.1, 1.0 / 3.0, 123_456.789, f64::MAX, f64::MIN_POSITIVE] {
            let text = display(val);
            assert!(!text.contains('e'));
            assert_eq!(text.parse::<f64>().unwrap(), val);
        }
    }

    #[test]
    fn bytes_are_uppercase_hex() {
        assert_eq!(display(Vec::<u8>::new()), "0x");
        assert_eq!(display(vec![0x00_u8, 0x0f, 0xab, 0xff]), "0x000FABFF");
        assert_eq!(
            format_value(&Value::Bytes(vec![1, 2]), Mode::SqlLiteral).unwrap(),
            "0x0102"
        );
    }

    #[test]
    fn base64_map_matches_bytes() {
        let cases: [(&str, &[u8]); 4] = [
            ("", &[]),
            ("AQ", &[0x01]),
            ("AQI", &[0x01, 0x02]),
            ("3q2+7w", &[0xde, 0xad, 0xbe, 0xef]),
        ];
        for (encoded, bytes) in cases {
            assert_eq!(
                display(Value::encoded_blob(encoded)),
                display(bytes.to_vec())
            );
        }
    }

    #[test]
    fn base64_decoding_is_lenient() {
        // Non-zero trailing bits are dropped.
        assert_eq!(display(Value::encoded_blob("AR")), "0x01");
        assert_eq!(display(Value::encoded_blob("AQJ")), "0x0102");
        // Line breaks are skipped.
        assert_eq!(display(Value::encoded_blob("3q2+\r\n7w\n")), "0xDEADBEEF");
    }

    #[test]
    fn invalid_base64_is_an_error() {
        for encoded in ["!!!!", "AQ==", "A"] {
            let err = format_value(&Value::encoded_blob(encoded), Mode::Display).unwrap_err();
            assert!(matches!(err, FormatError::Base64Decode(_)), "{encoded}");
            assert!(err.to_string().starts_with("unable to decode base64 value"));
        }
    }

    #[test]
    fn map_without_string_base64_entry() {
        let missing = Value::Map(BTreeMap::from([("hex".to_owned(), Value::from("00"))]));
        assert!(matches!(
            format_value(&missing, Mode::Display),
            Err(FormatError::MissingBase64Field)
        ));

        let wrong_kind = Value::Map(BTreeMap::from([("base64".to_owned(), Value::from(1_i64))]));
        assert!(matches!(
            format_value(&wrong_kind, Mode::Display),
            Err(FormatError::UnsupportedBase64Field(kind)) if kind == "int64"
        ));
    }

    #[test]
    fn invalid_nullable_is_null_regardless_of_payload() {
        let payloads = [
            NullablePayload::Int64(7),
            NullablePayload::String("text".to_owned()),
            NullablePayload::Unsupported("NullUUID".to_owned()),
        ];
        for payload in payloads {
            let value = Value::Nullable(Nullable::null(payload));
            assert_eq!(display(value.clone()), "NULL");
            assert_eq!(format_value(&value, Mode::SqlLiteral).unwrap(), "NULL");
        }
    }

    #[test]
    fn valid_nullable_renders_payload() {
        assert_eq!(display(Some(true)), "true");
        assert_eq!(display(Some(2.5_f64)), "2.5");
        assert_eq!(display(Some(255_u8)), "255");
        assert_eq!(display(Some(-3_i16)), "-3");
        assert_eq!(display(Some(40_000_i32)), "40000");
        assert_eq!(display(Some(-1_i64)), "-1");
        assert_eq!(display(Some("x".to_owned())), "x");
        assert_eq!(display(None::<String>), "NULL");

        let time = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_milli_opt(7, 5, 3, 999)
            .unwrap();
        assert_eq!(display(Some(time)), "2024-03-09 07:05:03");

        let unsupported = Value::Nullable(Nullable::valid(NullablePayload::Unsupported(
            "NullUUID".to_owned(),
        )));
        let err = format_value(&unsupported, Mode::Display).unwrap_err();
        assert_eq!(err.to_string(), "unsupported struct type: NullUUID");
    }

    #[test]
    fn unsupported_shapes_are_named() {
        let err = format_value(&Value::Unsupported("array".to_owned()), Mode::Display)
            .unwrap_err();
        assert_eq!(err.to_string(), "unsupported type: array");
    }

    #[test]
    fn row_stops_at_first_error() {
        let row = [
            Value::from(1_i64),
            Value::Unsupported("array".to_owned()),
            Value::Null,
        ];
        assert!(format_row(&row, Mode::SqlLiteral).is_err());

        let row = [Value::from(1_i64), Value::Null, Value::from("a")];
        assert_eq!(
            format_row(&row, Mode::SqlLiteral).unwrap(),
            ["1", "NULL", "a"]
        );
    }
}
