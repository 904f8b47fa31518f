use std::collections::HashMap;

use tracing::{debug, warn};

use super::{NodeKind, Variant, VariantOf};

/// Maps tag names onto node variants. Tag names match exactly.
#[derive(Debug)]
pub struct TypeRegistry<K> {
    entries: HashMap<String, Variant<K>>,
}

impl<K> Default for TypeRegistry<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: NodeKind> TypeRegistry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `tag` onto `T`, replacing any earlier mapping for that tag
    pub fn register<T: VariantOf<K>>(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        debug!(tag = %tag, node = T::NAME, "Registering node type");
        self.entries.insert(tag, Variant::of::<T>());
    }

    /// Maps `tag` onto the variant called `type_name`.
    ///
    /// A name that is not one of `K`'s variants is logged and ignored;
    /// returns whether the registry changed.
    pub fn register_named(&mut self, type_name: &str, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        match K::variants().iter().find(|variant| variant.name == type_name) {
            Some(variant) => {
                debug!(tag = %tag, node = type_name, "Registering node type");
                self.entries.insert(tag, *variant);
                true
            }
            None => {
                warn!(
                    tag = %tag,
                    "Not possible to register type '{}' because it is not a node variant",
                    type_name
                );
                false
            }
        }
    }

    pub fn lookup(&self, tag: &str) -> Option<&Variant<K>> {
        self.entries.get(tag)
    }

    /// Registered tag names, sorted
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::fixtures::{Item, Root, TestKind};

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mut registry = TypeRegistry::<TestKind>::new();
        registry.register::<Item>("Item");

        assert_eq!(registry.lookup("Item").map(|v| v.name), Some("Item"));
        assert!(registry.lookup("item").is_none());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = TypeRegistry::<TestKind>::new();
        registry.register::<Item>("Entry");
        registry.register::<Root>("Entry");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("Entry").map(|v| v.name), Some("Root"));
    }

    #[test]
    fn test_register_named_rejects_unknown_types() {
        let mut registry = TypeRegistry::<TestKind>::new();
        assert!(!registry.register_named("String", "Text"));
        assert!(registry.is_empty());

        assert!(registry.register_named("Item", "Thing"));
        assert_eq!(registry.tags(), vec!["Thing"]);
    }
}
