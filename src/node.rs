//! Typed node trees.
//!
//! A tag tree is projected onto a user-declared sum type `K` whose variants
//! wrap payload structs. Each payload implements [`NodeType`], naming itself
//! and listing a [`Field`] table that binds attribute text onto its fields.
//! The [`node_kind!`](crate::node_kind) macro declares the sum type and the
//! glue between it and its payloads.
//!
//! ```
//! use tagbind::{coerce::assign, node::{Deserializer, Field, NodeType}, node_kind};
//!
//! #[derive(Debug, Clone, Default)]
//! struct Shelf {
//!     label: String,
//! }
//!
//! impl NodeType for Shelf {
//!     const NAME: &'static str = "Shelf";
//!     const FIELDS: &'static [Field<Self>] = &[Field {
//!         name: "Label",
//!         bind: |shelf, value| assign(&mut shelf.label, value),
//!     }];
//! }
//!
//! node_kind! {
//!     enum Library {
//!         Shelf(Shelf),
//!     }
//! }
//!
//! let deserializer = Deserializer::<Library>::new();
//! deserializer.register::<Shelf>("Shelf");
//!
//! let tree = deserializer.deserialize(r#"<Shelf label="A"><Shelf Label="B"/></Shelf>"#)?
//!     .expect("root is registered");
//! let labels: Vec<_> = tree
//!     .find::<Shelf>(tree.root())
//!     .into_iter()
//!     .filter_map(|id| tree.payload::<Shelf>(id))
//!     .map(|shelf| shelf.label.as_str())
//!     .collect();
//! assert_eq!(labels, ["B"]);
//! # Ok::<(), tagbind::ParseError>(())
//! ```

pub mod deserializer;
mod macros;
pub mod registry;
pub mod tree;

pub use deserializer::Deserializer;
pub use registry::TypeRegistry;
pub use tree::{Node, NodeId, NodeTree};

use crate::{coerce::Value, tag::Attributes};

/// Binds one attribute onto a field of `T`
pub struct Field<T> {
    /// Attribute name, matched ignoring letter case
    pub name: &'static str,
    /// Coerces the attribute value into the field; returns whether it was written
    pub bind: fn(&mut T, &Value) -> bool,
}

/// Payload of one node variant
pub trait NodeType: Default + 'static {
    /// Type name, also accepted by [`TypeRegistry::register_named`]
    const NAME: &'static str;

    const FIELDS: &'static [Field<Self>];

    /// Identity used by keyed search
    fn key(&self) -> String {
        String::new()
    }
}

/// Links a payload type to the sum type `K` that wraps it
pub trait VariantOf<K>: NodeType {
    fn into_kind(self) -> K;

    fn from_kind(kind: &K) -> Option<&Self>;

    fn from_kind_mut(kind: &mut K) -> Option<&mut Self>;
}

/// A sum type over node payloads
pub trait NodeKind: Sized + 'static {
    /// Every variant, in declaration order
    fn variants() -> &'static [Variant<Self>];

    fn type_name(&self) -> &'static str;

    fn key(&self) -> String;

    /// Binds matching attributes onto the payload; returns how many fields
    /// were written
    fn bind(&mut self, attributes: &Attributes) -> usize;

    fn is<T: VariantOf<Self>>(&self) -> bool {
        T::from_kind(self).is_some()
    }
}

/// Constructor of one variant with a default payload
pub struct Variant<K> {
    pub name: &'static str,
    pub construct: fn() -> K,
}

impl<K> Clone for Variant<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Variant<K> {}

impl<K> std::fmt::Debug for Variant<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Variant").field("name", &self.name).finish()
    }
}

impl<K: 'static> Variant<K> {
    pub const fn of<T: VariantOf<K>>() -> Self {
        Self {
            name: T::NAME,
            construct: construct::<K, T>,
        }
    }
}

fn construct<K, T: VariantOf<K>>() -> K {
    T::default().into_kind()
}

/// Runs every field binder of `T` whose name appears among `attributes`.
/// Fields without a matching attribute keep their value; attributes without
/// a matching field are ignored.
pub fn bind_fields<T: NodeType>(payload: &mut T, attributes: &Attributes) -> usize {
    T::FIELDS
        .iter()
        .filter_map(|field| {
            attributes
                .get(field.name)
                .map(|attribute| (field.bind)(payload, &Value::from(attribute.value())))
        })
        .filter(|written| *written)
        .count()
}
