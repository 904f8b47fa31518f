use crate::{error::CoerceError, tag::same_name};

use super::{convert::incompatible, Value};

/// A fieldless enum whose members can be named in attribute text.
///
/// Implement it with [`enumeration!`](crate::enumeration), which also
/// provides the [`Coerce`](super::Coerce) impl.
pub trait Enumeration: Copy + PartialEq + Default + 'static {
    /// Every member with its name, in declaration order
    const MEMBERS: &'static [(&'static str, Self)];

    /// Discriminant of this member
    fn number(self) -> i64;

    /// Declared name of this member
    fn member_name(self) -> &'static str {
        Self::MEMBERS
            .iter()
            .find(|(_, member)| *member == self)
            .map_or("", |(name, _)| *name)
    }

    /// Member whose discriminant is `number`
    fn from_number(number: i64) -> Option<Self> {
        Self::MEMBERS
            .iter()
            .map(|(_, member)| *member)
            .find(|member| member.number() == number)
    }
}

fn unknown<E: Enumeration>(value: impl Into<String>) -> CoerceError {
    CoerceError::UnknownMember {
        value: value.into(),
        target: std::any::type_name::<E>(),
    }
}

/// A member name, or the decimal discriminant of a member
fn parse<E: Enumeration>(text: &str, ignore_case: bool) -> Result<E, CoerceError> {
    let wanted = text.trim();
    E::MEMBERS
        .iter()
        .find(|(name, _)| {
            if ignore_case {
                same_name(name, wanted)
            } else {
                *name == wanted
            }
        })
        .map(|(_, member)| *member)
        .or_else(|| wanted.parse().ok().and_then(E::from_number))
        .ok_or_else(|| unknown::<E>(text))
}

fn from_integer<E: Enumeration>(number: i64) -> Result<E, CoerceError> {
    E::from_number(number).ok_or_else(|| unknown::<E>(number.to_string()))
}

/// Value-represented enum branch: null is the default member, a string must
/// name a member exactly or carry its discriminant. An empty string names
/// nothing and fails.
pub fn enumeration<E: Enumeration>(value: &Value) -> Result<E, CoerceError> {
    match value {
        Value::Null => Ok(E::default()),
        Value::String(s) => parse(s, false),
        Value::Integer(i) => from_integer(*i),
        other => Err(incompatible::<E>(other)),
    }
}

/// Nullable enum branch: member names match regardless of letter case.
pub fn enumeration_ignore_case<E: Enumeration>(value: &Value) -> Result<E, CoerceError> {
    match value {
        Value::String(s) => parse(s, true),
        Value::Integer(i) => from_integer(*i),
        other => Err(incompatible::<E>(other)),
    }
}

/// Implements [`Enumeration`] and [`Coerce`](crate::coerce::Coerce) for a
/// fieldless enum.
///
/// ```
/// use tagbind::{coerce::{coerce, Value}, enumeration};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Default)]
/// enum Speed {
///     #[default]
///     Slow,
///     Fast,
/// }
///
/// enumeration!(Speed { Slow, Fast });
///
/// assert_eq!(coerce::<Speed>(&Value::from("Fast")), Some(Speed::Fast));
/// assert_eq!(coerce::<Speed>(&Value::from("fast")), None);
/// assert_eq!(coerce::<Speed>(&Value::from("1")), Some(Speed::Fast));
/// assert_eq!(coerce::<Option<Speed>>(&Value::from("fast")), Some(Some(Speed::Fast)));
/// ```
#[macro_export]
macro_rules! enumeration {
    ($ty:ident { $($member:ident),+ $(,)? }) => {
        impl $crate::coerce::Enumeration for $ty {
            const MEMBERS: &'static [(&'static str, Self)] =
                &[$((stringify!($member), $ty::$member)),+];

            #[allow(clippy::as_conversions)]
            fn number(self) -> i64 {
                self as i64
            }
        }

        impl $crate::coerce::Coerce for $ty {
            const SHAPE: $crate::coerce::Shape = $crate::coerce::Shape::Enumeration;

            fn try_coerce(
                value: &$crate::coerce::Value,
            ) -> ::std::result::Result<Self, $crate::error::CoerceError> {
                $crate::coerce::enumeration(value)
            }

            fn try_coerce_nullable(
                value: &$crate::coerce::Value,
            ) -> ::std::result::Result<Self, $crate::error::CoerceError> {
                $crate::coerce::enumeration_ignore_case(value)
            }
        }
    };
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    enum Light {
        #[default]
        Red,
        Green,
    }

    crate::enumeration!(Light { Red, Green });

    #[test]
    fn test_exact_match() {
        assert_eq!(enumeration::<Light>(&Value::from("Green")).unwrap(), Light::Green);
        assert_eq!(enumeration::<Light>(&Value::from(" Green ")).unwrap(), Light::Green);
        assert!(matches!(
            enumeration::<Light>(&Value::from("green")),
            Err(CoerceError::UnknownMember { .. })
        ));
    }

    #[test]
    fn test_empty_string_fails() {
        assert!(enumeration::<Light>(&Value::from("")).is_err());
        assert_eq!(enumeration::<Light>(&Value::Null).unwrap(), Light::Red);
    }

    #[test]
    fn test_ignore_case() {
        assert_eq!(
            enumeration_ignore_case::<Light>(&Value::from("GREEN")).unwrap(),
            Light::Green
        );
        assert!(enumeration_ignore_case::<Light>(&Value::Null).is_err());
        assert!(enumeration_ignore_case::<Light>(&Value::from(true)).is_err());
    }

    #[test]
    fn test_member_name() {
        assert_eq!(Light::Green.member_name(), "Green");
    }

    #[test]
    fn test_discriminant_selects_member() {
        assert_eq!(enumeration::<Light>(&Value::from(" 1 ")).unwrap(), Light::Green);
        assert_eq!(enumeration::<Light>(&Value::from(0)).unwrap(), Light::Red);
        assert_eq!(
            enumeration_ignore_case::<Light>(&Value::from("1")).unwrap(),
            Light::Green
        );
        assert!(matches!(
            enumeration::<Light>(&Value::from("7")),
            Err(CoerceError::UnknownMember { .. })
        ));
        assert!(enumeration::<Light>(&Value::from(-1)).is_err());
        assert_eq!(Light::Green.number(), 1);
    }
}
