use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use std::str::FromStr;

use crate::error::{ConversionError, ConversionFailure, DeclarationError};

const TRUE_LITERALS: [&str; 4] = ["true", "yes", "on", "1"];
const FALSE_LITERALS: [&str; 4] = ["false", "no", "off", "0"];

/// The closed set of types an argument can be declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Int,
    Long,
    ULong,
    LongLong,
    ULongLong,
    Float,
    Double,
    LongDouble,
    Bool,
}

impl ValueKind {
    pub const ALL: [ValueKind; 10] = [
        ValueKind::String,
        ValueKind::Int,
        ValueKind::Long,
        ValueKind::ULong,
        ValueKind::LongLong,
        ValueKind::ULongLong,
        ValueKind::Float,
        ValueKind::Double,
        ValueKind::LongDouble,
        ValueKind::Bool,
    ];

    /// The textual tag used when declaring arguments by type name
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Int => "int",
            ValueKind::Long => "long",
            ValueKind::ULong => "unsigned long",
            ValueKind::LongLong => "long long",
            ValueKind::ULongLong => "unsigned long long",
            ValueKind::Float => "float",
            ValueKind::Double => "double",
            ValueKind::LongDouble => "long double",
            ValueKind::Bool => "bool",
        }
    }

    /// Converts `text` into a value of this kind.
    ///
    /// Leading whitespace is skipped for numerals. Anything after the numeral, including
    /// trailing whitespace, is rejected.
    pub fn convert(&self, text: &str) -> Result<Value, ConversionError> {
        let fail = |reason: ConversionFailure| ConversionError::new(text, *self, reason);
        let numeral = text.trim_start();

        let value = match self {
            ValueKind::String => Value::String(text.to_string()),
            ValueKind::Int => Value::Int(parse_int(numeral).map_err(fail)?),
            ValueKind::Long => Value::Long(parse_int(numeral).map_err(fail)?),
            ValueKind::ULong => Value::ULong(parse_int(numeral).map_err(fail)?),
            ValueKind::LongLong => Value::LongLong(parse_int(numeral).map_err(fail)?),
            ValueKind::ULongLong => Value::ULongLong(parse_int(numeral).map_err(fail)?),
            ValueKind::Float => Value::Float(parse_float(numeral).map_err(fail)?),
            ValueKind::Double => Value::Double(parse_float(numeral).map_err(fail)?),
            ValueKind::LongDouble => Value::LongDouble(parse_float(numeral).map_err(fail)?),
            ValueKind::Bool => Value::Bool(parse_bool(text).map_err(fail)?),
        };

        Ok(value)
    }
}

fn parse_int<T>(text: &str) -> Result<T, ConversionFailure>
where
    T: FromStr<Err = ParseIntError>,
{
    Ok(text.parse::<T>()?)
}

/// Parses a float, rejecting numerals that overflow to infinity or underflow to zero
fn parse_float<T>(text: &str) -> Result<T, ConversionFailure>
where
    T: FromStr<Err = ParseFloatError> + Into<f64> + Copy,
{
    let value = text.parse::<T>()?;
    let widened: f64 = value.into();

    if widened.is_infinite() && !spells_infinity(text) {
        return Err(ConversionFailure::OutOfRange);
    }
    if widened == 0.0 && has_nonzero_digit(text) {
        return Err(ConversionFailure::OutOfRange);
    }
    Ok(value)
}

fn spells_infinity(text: &str) -> bool {
    let unsigned = text.trim().trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

// Only the mantissa counts: `0e5` is zero, `1e-50` is not
fn has_nonzero_digit(text: &str) -> bool {
    text.split(['e', 'E'])
        .next()
        .is_some_and(|mantissa| mantissa.bytes().any(|b| matches!(b, b'1'..=b'9')))
}

fn parse_bool(text: &str) -> Result<bool, ConversionFailure> {
    if TRUE_LITERALS.contains(&text) {
        return Ok(true);
    }
    if FALSE_LITERALS.contains(&text) {
        return Ok(false);
    }
    Err(ConversionFailure::Bool)
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueKind {
    type Err = DeclarationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValueKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DeclarationError::UnsupportedType(s.to_string()))
    }
}

/// A converted argument value. The variant always matches the [`ValueKind`] it was produced for.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i32),
    Long(i64),
    ULong(u64),
    LongLong(i64),
    ULongLong(u64),
    Float(f32),
    Double(f64),
    LongDouble(f64),
    Bool(bool),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) => ValueKind::String,
            Value::Int(_) => ValueKind::Int,
            Value::Long(_) => ValueKind::Long,
            Value::ULong(_) => ValueKind::ULong,
            Value::LongLong(_) => ValueKind::LongLong,
            Value::ULongLong(_) => ValueKind::ULongLong,
            Value::Float(_) => ValueKind::Float,
            Value::Double(_) => ValueKind::Double,
            Value::LongDouble(_) => ValueKind::LongDouble,
            Value::Bool(_) => ValueKind::Bool,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Long(v) | Value::LongLong(v) => write!(f, "{v}"),
            Value::ULong(v) | Value::ULongLong(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) | Value::LongDouble(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::ULong(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

/// Typed access to a [`Value`].
///
/// Returns `None` when the stored variant does not hold this Rust type. Kinds that share a
/// representation (`long` and `long long`, `double` and `long double`, ...) read as the same type.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Long(v) | Value::LongLong(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for u64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::ULong(v) | Value::ULongLong(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Double(v) | Value::LongDouble(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_round_trip() {
        for kind in ValueKind::ALL {
            assert_eq!(kind.as_str().parse::<ValueKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_name_is_unsupported() {
        let err = "decimal".parse::<ValueKind>().unwrap_err();
        assert!(matches!(err, DeclarationError::UnsupportedType(ref name) if name == "decimal"));
        assert_eq!(err.to_string(), "unsupported type 'decimal'");
    }

    #[test]
    fn canonical_literals_convert_to_their_kind() {
        let cases = [
            (ValueKind::String, "hello", Value::String("hello".into())),
            (ValueKind::Int, "42", Value::Int(42)),
            (ValueKind::Long, "-9000000000", Value::Long(-9_000_000_000)),
            (ValueKind::ULong, "18446744073709551615", Value::ULong(u64::MAX)),
            (ValueKind::LongLong, "-1", Value::LongLong(-1)),
            (ValueKind::ULongLong, "7", Value::ULongLong(7)),
            (ValueKind::Float, "1.5", Value::Float(1.5)),
            (ValueKind::Double, "-0.25", Value::Double(-0.25)),
            (ValueKind::LongDouble, "3.5e2", Value::LongDouble(350.0)),
            (ValueKind::Bool, "true", Value::Bool(true)),
        ];

        for (kind, text, expected) in cases {
            let value = kind.convert(text).unwrap();
            assert_eq!(value, expected);
            assert_eq!(value.kind(), kind);
        }
    }

    #[test]
    fn boolean_literals() {
        for text in ["true", "yes", "on", "1"] {
            assert_eq!(ValueKind::Bool.convert(text).unwrap(), Value::Bool(true));
        }
        for text in ["false", "no", "off", "0"] {
            assert_eq!(ValueKind::Bool.convert(text).unwrap(), Value::Bool(false));
        }
        for text in ["maybe", "TRUE", "Yes", ""] {
            let err = ValueKind::Bool.convert(text).unwrap_err();
            assert_eq!(err.text(), text);
            assert_eq!(err.kind(), ValueKind::Bool);
        }
    }

    #[test]
    fn numerals_tolerate_leading_whitespace_only() {
        assert_eq!(ValueKind::Int.convert("  12").unwrap(), Value::Int(12));
        assert!(ValueKind::Int.convert("12 ").is_err());
        assert!(ValueKind::Int.convert("12abc").is_err());
        assert!(ValueKind::Double.convert("1.0x").is_err());
    }

    #[test]
    fn out_of_range_numerals_are_rejected() {
        assert!(ValueKind::Int.convert("2147483648").is_err());
        assert!(ValueKind::ULong.convert("-1").is_err());
        assert!(ValueKind::ULongLong.convert("18446744073709551616").is_err());

        for (kind, text) in [
            (ValueKind::Float, "1e39"),
            (ValueKind::Double, "1e400"),
            (ValueKind::LongDouble, "-1e400"),
            (ValueKind::Float, "1e-50"),
            (ValueKind::Double, "-1e-400"),
        ] {
            let err = kind.convert(text).unwrap_err();
            assert!(matches!(err.reason(), ConversionFailure::OutOfRange));
            assert_eq!(err.text(), text);
        }
    }

    #[test]
    fn spelled_out_infinity_and_zero_are_accepted() {
        assert_eq!(ValueKind::Double.convert("inf").unwrap(), Value::Double(f64::INFINITY));
        assert_eq!(
            ValueKind::Float.convert("-Infinity").unwrap(),
            Value::Float(f32::NEG_INFINITY)
        );
        assert_eq!(ValueKind::Double.convert("0.000").unwrap(), Value::Double(0.0));
        assert_eq!(ValueKind::Float.convert("0e-50").unwrap(), Value::Float(0.0));
        assert_eq!(ValueKind::Float.convert("3.4e38").unwrap(), Value::Float(3.4e38));
    }

    #[test]
    fn conversion_error_keeps_its_cause() {
        use std::error::Error as _;

        let err = ValueKind::Int.convert("forty").unwrap_err();
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("invalid int value 'forty'"));
    }

    #[test]
    fn text_conversion_is_identity() {
        assert_eq!(
            ValueKind::String.convert(" -x ").unwrap(),
            Value::String(" -x ".into())
        );
    }

    #[test]
    fn typed_access_rejects_other_variants() {
        assert_eq!(i32::from_value(&Value::Int(3)), Some(3));
        assert_eq!(i64::from_value(&Value::Int(3)), None);
        assert_eq!(i64::from_value(&Value::LongLong(3)), Some(3));
        assert_eq!(f64::from_value(&Value::LongDouble(2.0)), Some(2.0));
        assert_eq!(String::from_value(&Value::Bool(true)), None);
        assert_eq!(bool::from_value(&Value::String("true".into())), None);
    }
}
