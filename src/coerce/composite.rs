use crate::error::CoerceError;

use super::{coerce, convert::incompatible, split_entries, Coerce, Shape, Value};

/// Fixed-arity value addressable by slot index
pub trait Indexed: Default {
    type Element: Coerce;

    /// Number of slots
    const SLOTS: usize;

    fn get(&self, index: usize) -> Option<&Self::Element>;

    /// Stores `element` at `index`; false when the index has no slot
    fn set(&mut self, index: usize, element: Self::Element) -> bool;
}

/// Two-component vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector2<T> {
    pub x: T,
    pub y: T,
}

/// Three-component vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T> Vector2<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T> Vector3<T> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl<T: Coerce> Indexed for Vector2<T> {
    type Element = T;
    const SLOTS: usize = 2;

    fn get(&self, index: usize) -> Option<&T> {
        match index {
            0 => Some(&self.x),
            1 => Some(&self.y),
            _ => None,
        }
    }

    fn set(&mut self, index: usize, element: T) -> bool {
        let slot = match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => return false,
        };
        *slot = element;
        true
    }
}

impl<T: Coerce> Indexed for Vector3<T> {
    type Element = T;
    const SLOTS: usize = 3;

    fn get(&self, index: usize) -> Option<&T> {
        match index {
            0 => Some(&self.x),
            1 => Some(&self.y),
            2 => Some(&self.z),
            _ => None,
        }
    }

    fn set(&mut self, index: usize, element: T) -> bool {
        let slot = match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => return false,
        };
        *slot = element;
        true
    }
}

impl<T: Coerce, const N: usize> Indexed for [T; N]
where
    [T; N]: Default,
{
    type Element = T;
    const SLOTS: usize = N;

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    fn set(&mut self, index: usize, element: T) -> bool {
        match self.as_mut_slice().get_mut(index) {
            Some(slot) => {
                *slot = element;
                true
            }
            None => false,
        }
    }
}

/// Indexed branch: the string is split on commas, empty entries dropped,
/// and each entry coerced onto its slot. Missing trailing entries and
/// entries that fail to coerce leave their slot at the default.
///
/// # Errors
///
/// More entries than slots, or a source that is neither null, a string nor
/// an array.
pub fn indexed<T: Indexed>(value: &Value) -> Result<T, CoerceError> {
    let entries: Vec<Value> = match value {
        Value::Null => return Ok(T::default()),
        Value::String(s) => split_entries(s).map(Value::from).collect(),
        Value::Array(items) => items.clone(),
        other => return Err(incompatible::<T>(other)),
    };

    if entries.len() > T::SLOTS {
        return Err(CoerceError::TooManyElements {
            supplied: entries.len(),
            slots: T::SLOTS,
        });
    }

    let mut instance = T::default();
    for (index, entry) in entries.iter().enumerate() {
        if let Some(element) = coerce::<T::Element>(entry) {
            instance.set(index, element);
        }
    }
    Ok(instance)
}

impl<T: Coerce> Coerce for Vector2<T> {
    const SHAPE: Shape = Shape::Indexed;

    fn try_coerce(value: &Value) -> Result<Self, CoerceError> {
        indexed(value)
    }
}

impl<T: Coerce> Coerce for Vector3<T> {
    const SHAPE: Shape = Shape::Indexed;

    fn try_coerce(value: &Value) -> Result<Self, CoerceError> {
        indexed(value)
    }
}

impl<T: Coerce, const N: usize> Coerce for [T; N]
where
    [T; N]: Default,
{
    const SHAPE: Shape = Shape::Indexed;

    fn try_coerce(value: &Value) -> Result<Self, CoerceError> {
        indexed(value)
    }
}
