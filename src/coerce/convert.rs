//! Culture-invariant conversion between a [`Value`] and a primitive.
//!
//! Rules: strings are trimmed before numeric and boolean parsing, booleans
//! parse `true`/`false` in any letter case, floats become integers by
//! rounding half to even, integers become booleans by "non-zero", booleans
//! become numbers as 1 and 0, and numbers print in their shortest
//! round-trip form.

use crate::error::CoerceError;

use super::Value;

/// Generic conversion used once the shape-specific branches are exhausted
pub trait Convert: Sized {
    fn convert(value: &Value) -> Result<Self, CoerceError>;
}

pub(crate) fn incompatible<T>(value: &Value) -> CoerceError {
    CoerceError::Incompatible {
        found: value.kind_name(),
        target: std::any::type_name::<T>(),
    }
}

impl Convert for bool {
    fn convert(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::Boolean(b) => Ok(*b),
            Value::Integer(i) => Ok(*i != 0),
            Value::Number(n) => Ok(*n != 0.0),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.eq_ignore_ascii_case("true") {
                    Ok(true)
                } else if trimmed.eq_ignore_ascii_case("false") {
                    Ok(false)
                } else {
                    Err(CoerceError::InvalidBoolean(s.clone()))
                }
            }
            other => Err(incompatible::<Self>(other)),
        }
    }
}

fn to_integer(value: &Value) -> Result<i128, CoerceError> {
    match value {
        Value::Boolean(b) => Ok(i128::from(*b)),
        Value::Integer(i) => Ok(i128::from(*i)),
        Value::Number(n) => float_to_integer(*n),
        Value::String(s) => s
            .trim()
            .parse::<i128>()
            .map_err(|_| CoerceError::InvalidNumber(s.clone())),
        other => Err(CoerceError::Incompatible {
            found: other.kind_name(),
            target: "integer",
        }),
    }
}

#[allow(clippy::as_conversions)]
fn float_to_integer(n: f64) -> Result<i128, CoerceError> {
    let rounded = n.round_ties_even();
    if !rounded.is_finite() || rounded < i128::MIN as f64 || rounded >= i128::MAX as f64 {
        return Err(CoerceError::OutOfRange(n.to_string()));
    }
    Ok(rounded as i128)
}

#[allow(clippy::as_conversions)]
fn integer_to_float(i: i64) -> f64 {
    i as f64
}

macro_rules! convert_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Convert for $ty {
                fn convert(value: &Value) -> Result<Self, CoerceError> {
                    let wide = to_integer(value)?;
                    <$ty>::try_from(wide).map_err(|_| CoerceError::OutOfRange(value.to_string()))
                }
            }
        )*
    };
}

convert_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Convert for f64 {
    fn convert(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Integer(i) => Ok(integer_to_float(*i)),
            Value::Number(n) => Ok(*n),
            Value::String(s) => s
                .trim()
                .parse::<Self>()
                .map_err(|_| CoerceError::InvalidNumber(s.clone())),
            other => Err(incompatible::<Self>(other)),
        }
    }
}

impl Convert for f32 {
    #[allow(clippy::as_conversions)]
    fn convert(value: &Value) -> Result<Self, CoerceError> {
        let wide = f64::convert(value)?;
        if wide.is_finite() && wide.abs() > f64::from(Self::MAX) {
            return Err(CoerceError::OutOfRange(value.to_string()));
        }
        Ok(wide as Self)
    }
}

impl Convert for char {
    fn convert(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::String(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(CoerceError::InvalidCharacter(s.clone())),
                }
            }
            Value::Integer(i) => u32::try_from(*i)
                .ok()
                .and_then(Self::from_u32)
                .ok_or_else(|| CoerceError::OutOfRange(i.to_string())),
            other => Err(incompatible::<Self>(other)),
        }
    }
}

impl Convert for String {
    fn convert(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::Null | Value::Array(_) => Err(incompatible::<Self>(value)),
            other => Ok(other.to_string()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_parsing_trims() {
        assert_eq!(i32::convert(&Value::from(" 42 ")).unwrap(), 42);
        assert_eq!(i64::convert(&Value::from("-7")).unwrap(), -7);
        assert!(matches!(
            i32::convert(&Value::from("4.5")),
            Err(CoerceError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_integer_range_checked() {
        assert!(matches!(
            u8::convert(&Value::from("256")),
            Err(CoerceError::OutOfRange(_))
        ));
        assert!(matches!(
            u32::convert(&Value::from(-1)),
            Err(CoerceError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_float_to_integer_rounds_half_even() {
        assert_eq!(i32::convert(&Value::from(2.5)).unwrap(), 2);
        assert_eq!(i32::convert(&Value::from(3.5)).unwrap(), 4);
        assert_eq!(i32::convert(&Value::from(-2.5)).unwrap(), -2);
        assert!(i64::convert(&Value::from(f64::NAN)).is_err());
    }

    #[test]
    fn test_boolean_rules() {
        assert!(bool::convert(&Value::from("TRUE")).unwrap());
        assert!(!bool::convert(&Value::from(" false ")).unwrap());
        assert!(bool::convert(&Value::from(3)).unwrap());
        assert!(bool::convert(&Value::from("1")).is_err());
        assert_eq!(f64::convert(&Value::from(true)).unwrap(), 1.0);
        assert_eq!(u8::convert(&Value::from(false)).unwrap(), 0);
    }

    #[test]
    fn test_char_requires_single_character() {
        assert_eq!(char::convert(&Value::from("é")).unwrap(), 'é');
        assert!(char::convert(&Value::from("ab")).is_err());
        assert!(char::convert(&Value::from("")).is_err());
        assert_eq!(char::convert(&Value::from(65)).unwrap(), 'A');
    }

    #[test]
    fn test_numbers_to_string_round_trip() {
        assert_eq!(String::convert(&Value::from(0.1)).unwrap(), "0.1");
        assert_eq!(String::convert(&Value::from(12)).unwrap(), "12");
        assert!(String::convert(&Value::Null).is_err());
    }

    #[test]
    fn test_f32_overflow() {
        assert!(f32::convert(&Value::from("1e300")).is_err());
        assert_eq!(f32::convert(&Value::from("1.5")).unwrap(), 1.5);
    }
}
