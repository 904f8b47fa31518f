//! Best-effort value coercion.
//!
//! Projects a [`Value`] (usually attribute text) onto a target type. Every
//! target implements [`Coerce`], and the impl picks one branch:
//!
//! - primitives: null and the empty string give the default, anything else
//!   goes through the invariant [`Convert`] rules;
//! - [`Indexed`] composites: comma-separated entries fill slots by position;
//! - enumerations: the member name must match exactly;
//! - nullable targets (`Option<T>`): null is `None`, everything else takes
//!   the generic conversion, where enumeration names match regardless of
//!   letter case.
//!
//! [`try_coerce`] reports why a conversion failed. [`coerce`] never fails:
//! it logs the offending value and target type and returns `None`.

pub mod composite;
pub mod convert;
pub mod enumeration;
pub mod value;

pub use composite::{indexed, Indexed, Vector2, Vector3};
pub use convert::Convert;
pub use enumeration::{enumeration, enumeration_ignore_case, Enumeration};
pub use value::Value;

use tracing::warn;

use crate::error::CoerceError;

/// How a target type is represented, which decides the branch it takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Primitive,
    Indexed,
    /// Value-represented enumeration, names match exactly
    Enumeration,
    /// Nullable target
    Reference,
}

/// A type the coercion engine can produce
pub trait Coerce: Default + Sized {
    const SHAPE: Shape;

    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Converts through the branch matching [`Self::SHAPE`]
    fn try_coerce(value: &Value) -> Result<Self, CoerceError>;

    /// Converts a non-null value for a nullable slot of this type
    fn try_coerce_nullable(value: &Value) -> Result<Self, CoerceError> {
        Self::try_coerce(value)
    }
}

/// Primitive branch shared by every [`Convert`] type
pub fn primitive<T: Convert + Default>(value: &Value) -> Result<T, CoerceError> {
    match value {
        Value::Null => Ok(T::default()),
        Value::String(s) if s.is_empty() => Ok(T::default()),
        other => T::convert(other),
    }
}

/// Converts `value` into `T`, reporting the reason on failure
pub fn try_coerce<T: Coerce>(value: &Value) -> Result<T, CoerceError> {
    T::try_coerce(value)
}

/// Converts `value` into `T`; failures are logged and yield `None`
pub fn coerce<T: Coerce>(value: &Value) -> Option<T> {
    match T::try_coerce(value) {
        Ok(converted) => Some(converted),
        Err(err) => {
            warn!(
                value = %value,
                target = T::type_name(),
                shape = ?T::SHAPE,
                "Not possible to convert value: {}",
                err
            );
            None
        }
    }
}

pub fn coerce_or_default<T: Coerce>(value: &Value) -> T {
    coerce(value).unwrap_or_default()
}

/// Overwrites `slot` when `value` converts; otherwise leaves it alone.
/// Returns whether the slot was written.
pub fn assign<T: Coerce>(slot: &mut T, value: &Value) -> bool {
    match coerce(value) {
        Some(converted) => {
            *slot = converted;
            true
        }
        None => false,
    }
}

/// Splits `text` on commas and coerces every non-empty entry. Entries that
/// fail to convert become `T::default()`.
///
/// # Examples
/// ```
/// use tagbind::coerce::split_to_array;
///
/// assert_eq!(split_to_array::<i32>("1,,2,x"), vec![1, 2, 0]);
/// assert_eq!(split_to_array::<String>("a,b"), vec!["a", "b"]);
/// ```
pub fn split_to_array<T: Coerce>(text: &str) -> Vec<T> {
    split_entries(text)
        .map(|entry| coerce_or_default(&Value::from(entry)))
        .collect()
}

pub(crate) fn split_entries(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.split(',').filter(|entry| !entry.is_empty())
}

macro_rules! coerce_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Coerce for $ty {
                const SHAPE: Shape = Shape::Primitive;

                fn try_coerce(value: &Value) -> Result<Self, CoerceError> {
                    primitive(value)
                }

                fn try_coerce_nullable(value: &Value) -> Result<Self, CoerceError> {
                    <$ty as Convert>::convert(value)
                }
            }
        )*
    };
}

coerce_primitive!(bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl Coerce for String {
    const SHAPE: Shape = Shape::Reference;

    fn try_coerce(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::Null => Ok(Self::new()),
            other => Self::convert(other),
        }
    }
}

impl<T: Coerce> Coerce for Option<T> {
    const SHAPE: Shape = Shape::Reference;

    fn try_coerce(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::Null => Ok(None),
            other => T::try_coerce_nullable(other).map(Some),
        }
    }
}

impl<T: Coerce> Coerce for Vec<T> {
    const SHAPE: Shape = Shape::Reference;

    fn try_coerce(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::String(s) => Ok(split_to_array(s)),
            Value::Array(items) => Ok(items.iter().map(coerce_or_default).collect()),
            other => T::try_coerce(other).map(|element| vec![element]),
        }
    }
}
