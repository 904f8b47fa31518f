//! Tag tree to node tree projection.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use tracing::{debug, instrument, warn};

use crate::{
    builder::{BuilderConfig, TreeBuilder},
    error::Result,
    tag::{Document, TagRef},
};

use super::{NodeId, NodeKind, NodeTree, TypeRegistry, VariantOf};

/// Builds typed node trees from XML text.
///
/// Types are registered up front. The first deserialization seals the
/// registry; later registrations are logged and ignored.
#[derive(Debug)]
pub struct Deserializer<K> {
    registry: RwLock<TypeRegistry<K>>,
    sealed: AtomicBool,
    builder: TreeBuilder,
}

impl<K: NodeKind> Default for Deserializer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: NodeKind> Deserializer<K> {
    pub fn new() -> Self {
        Self::with_config(BuilderConfig::default())
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            registry: RwLock::new(TypeRegistry::new()),
            sealed: AtomicBool::new(false),
            builder: TreeBuilder::with_config(config),
        }
    }

    pub fn register<T: VariantOf<K>>(&self, tag: &str) -> &Self {
        if self.is_sealed() {
            warn!(tag, node = T::NAME, "Registry is sealed, registration ignored");
        } else {
            self.registry.write().register::<T>(tag);
        }
        self
    }

    pub fn register_named(&self, type_name: &str, tag: &str) -> &Self {
        if self.is_sealed() {
            warn!(tag, node = type_name, "Registry is sealed, registration ignored");
        } else {
            self.registry.write().register_named(type_name, tag);
        }
        self
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }

    /// Registered tag names, sorted
    pub fn tags(&self) -> Vec<String> {
        self.registry
            .read()
            .tags()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Parses `text` and projects it onto a node tree.
    ///
    /// Returns `Ok(None)` when the root tag has no registered type.
    ///
    /// # Errors
    ///
    /// Only failures of the tag tree builder, such as a duplicate attribute.
    pub fn deserialize(&self, text: &str) -> Result<Option<NodeTree<K>>> {
        let doc = self.builder.build_str(text)?;
        Ok(self.deserialize_document(&doc))
    }

    /// Like [`Deserializer::deserialize`], but also `None` when the root is
    /// not a `T`
    pub fn deserialize_as<T: VariantOf<K>>(&self, text: &str) -> Result<Option<NodeTree<K>>> {
        Ok(self
            .deserialize(text)?
            .filter(|tree| tree.payload::<T>(tree.root()).is_some()))
    }

    #[instrument(skip(self, doc), fields(root = doc.root().name()))]
    pub fn deserialize_document(&self, doc: &Document) -> Option<NodeTree<K>> {
        self.sealed.store(true, Ordering::Release);
        let registry = self.registry.read();

        let root = doc.root();
        let Some(kind) = instantiate(&registry, root) else {
            debug!("Root tag has no registered type");
            return None;
        };

        let mut tree = NodeTree::new(kind);
        let id = tree.root();
        populate(&registry, &mut tree, id, root);
        debug!(nodes = tree.count(), "Node tree built");
        Some(tree)
    }
}

fn instantiate<K: NodeKind>(registry: &TypeRegistry<K>, tag: TagRef<'_>) -> Option<K> {
    let variant = registry.lookup(tag.name())?;
    let mut kind = (variant.construct)();
    kind.bind(tag.attributes());
    Some(kind)
}

/// Fills `id` and everything below it from `tag`, one level at a time.
/// Tags without a registered type are skipped together with everything
/// below them.
fn populate<K: NodeKind>(
    registry: &TypeRegistry<K>,
    tree: &mut NodeTree<K>,
    id: NodeId,
    tag: TagRef<'_>,
) {
    let mut pending = vec![(id, tag)];
    while let Some((id, tag)) = pending.pop() {
        let mut children = Vec::new();
        for child in tag.children() {
            match instantiate(registry, child) {
                Some(kind) => {
                    let child_id = tree.create(kind);
                    children.push(child_id);
                    pending.push((child_id, child));
                }
                None => debug!(tag = child.name(), "Skipping unregistered tag"),
            }
        }
        tree.set_children(id, children);
        tree.set_value(id, tag.value());
    }
}
