use indexmap::IndexMap;

use crate::error::{ParseError, Result, StructureError};

/// A `name="value"` pair on a tag. Names compare case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Attribute set of a single tag, keyed case-insensitively, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: IndexMap<String, Attribute>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute. An empty name is ignored.
    ///
    /// # Errors
    ///
    /// Fails with [`StructureError::DuplicateAttribute`] when an attribute
    /// with the same case-insensitive name is already present; the existing
    /// value is kept.
    pub fn insert(&mut self, attribute: Attribute) -> Result<()> {
        if attribute.name.is_empty() {
            return Ok(());
        }

        let key = fold(&attribute.name);
        if self.entries.contains_key(&key) {
            return Err(ParseError::new(StructureError::DuplicateAttribute(
                attribute.name,
            )));
        }
        self.entries.insert(key, attribute);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.entries.get(&fold(name))
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.entries.shift_remove(&fold(name)).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> + '_ {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = indexmap::map::Values<'a, String, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

/// Case-insensitive name comparison used by every tag and attribute lookup.
pub(crate) fn same_name(left: &str, right: &str) -> bool {
    if left.is_ascii() && right.is_ascii() {
        left.eq_ignore_ascii_case(right)
    } else {
        left.to_lowercase() == right.to_lowercase()
    }
}

fn fold(name: &str) -> String {
    if name.is_ascii() {
        name.to_ascii_lowercase()
    } else {
        name.to_lowercase()
    }
}
