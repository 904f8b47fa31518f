use tracing::info;

use super::{NodeKind, VariantOf};

/// Index of a node inside its [`NodeTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One typed node: its payload, text value and links
#[derive(Debug, Clone)]
pub struct Node<K> {
    kind: K,
    value: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl<K> Node<K> {
    pub fn kind(&self) -> &K {
        &self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena of typed nodes.
///
/// A node's parent is always either unset or the node whose child list
/// holds it. Nodes taken out of the tree stay in the arena, detached.
#[derive(Debug, Clone)]
pub struct NodeTree<K> {
    nodes: Vec<Node<K>>,
}

impl<K: NodeKind> NodeTree<K> {
    /// Creates a tree holding only `root`
    pub fn new(root: K) -> Self {
        Self {
            nodes: vec![Node {
                kind: root,
                value: String::new(),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<K>> {
        self.nodes.get(id.0)
    }

    pub fn kind(&self, id: NodeId) -> Option<&K> {
        self.get(id).map(Node::kind)
    }

    pub fn kind_mut(&mut self, id: NodeId) -> Option<&mut K> {
        self.nodes.get_mut(id.0).map(|node| &mut node.kind)
    }

    pub fn value(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(Node::value)
    }

    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) -> bool {
        match self.nodes.get_mut(id.0) {
            Some(node) => {
                node.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.get(id) {
            Some(node) => node.children(),
            None => &[],
        }
    }

    /// Payload of `id` when it is a `T`
    pub fn payload<T: VariantOf<K>>(&self, id: NodeId) -> Option<&T> {
        self.kind(id).and_then(T::from_kind)
    }

    pub fn payload_mut<T: VariantOf<K>>(&mut self, id: NodeId) -> Option<&mut T> {
        self.kind_mut(id).and_then(T::from_kind_mut)
    }

    /// Allocates a detached node
    pub fn create(&mut self, kind: K) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            value: String::new(),
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Creates a node and appends it to `parent`'s children.
    /// Returns `None`, creating nothing, when `parent` is unknown.
    pub fn add(&mut self, parent: NodeId, kind: K) -> Option<NodeId> {
        self.get(parent)?;
        let id = self.create(kind);
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children.push(id);
        }
        Some(id)
    }

    /// Replaces the children of `parent`.
    ///
    /// Previous children are detached. Every new child is moved out of its
    /// old parent and reparented to `parent`. Unknown ids, repeated ids and
    /// ids that would make a node its own ancestor are left out.
    pub fn set_children(&mut self, parent: NodeId, children: Vec<NodeId>) -> bool {
        let Some(previous) = self
            .nodes
            .get_mut(parent.0)
            .map(|node| std::mem::take(&mut node.children))
        else {
            return false;
        };
        for child in previous {
            if let Some(node) = self.nodes.get_mut(child.0) {
                node.parent = None;
            }
        }

        let mut accepted = Vec::with_capacity(children.len());
        for child in children {
            if self.get(child).is_none()
                || accepted.contains(&child)
                || self.is_ancestor_or_self(child, parent)
            {
                continue;
            }
            self.detach(child);
            if let Some(node) = self.nodes.get_mut(child.0) {
                node.parent = Some(parent);
            }
            accepted.push(child);
        }

        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children = accepted;
        }
        true
    }

    /// Detaches `child` from `parent`
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.parent(child) != Some(parent) {
            return false;
        }
        self.detach(child);
        true
    }

    /// Detaches every direct child of `parent` that is a `T`; returns how
    /// many were removed
    pub fn remove_type<T: VariantOf<K>>(&mut self, parent: NodeId) -> usize {
        let matching: Vec<NodeId> = self
            .children(parent)
            .iter()
            .copied()
            .filter(|id| self.payload::<T>(*id).is_some())
            .collect();
        for id in &matching {
            self.detach(*id);
        }
        matching.len()
    }

    /// Every `T` below `from`. At each level the direct children that are a
    /// `T` come first, followed by the matches inside each child in order.
    /// `from` itself is never included.
    pub fn find<T: VariantOf<K>>(&self, from: NodeId) -> Vec<NodeId> {
        self.find_where(from, &|kind: &K| T::from_kind(kind).is_some())
    }

    /// Like [`NodeTree::find`], keeping only nodes whose key equals `key`
    pub fn find_by_key<T: VariantOf<K>>(&self, from: NodeId, key: &str) -> Vec<NodeId> {
        self.find_where(from, &|kind: &K| T::from_kind(kind).is_some() && kind.key() == key)
    }

    /// First `T` found by [`NodeTree::find`]
    pub fn find_first<T: VariantOf<K>>(&self, from: NodeId) -> Option<&T> {
        self.find::<T>(from)
            .first()
            .and_then(|id| self.payload::<T>(*id))
    }

    fn find_where(&self, from: NodeId, matches: &dyn Fn(&K) -> bool) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut pending = vec![from];
        while let Some(id) = pending.pop() {
            let children = self.children(id);
            found.extend(
                children
                    .iter()
                    .copied()
                    .filter(|child| self.kind(*child).is_some_and(matches)),
            );
            pending.extend(children.iter().rev().copied());
        }
        found
    }

    /// Number of nodes reachable from the root, the root included
    pub fn count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self.root()];
        while let Some(id) = pending.pop() {
            count += 1;
            pending.extend_from_slice(self.children(id));
        }
        count
    }

    /// Writes the reachable tree to the log, one line per node
    pub fn log_tree(&self) {
        let mut pending = vec![(self.root(), 0usize)];
        while let Some((id, level)) = pending.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            info!(
                level,
                node = node.kind.type_name(),
                key = %node.kind.key(),
                value = node.value(),
                "node"
            );
            pending.extend(node.children.iter().rev().map(|child| (*child, level + 1)));
        }
    }

    fn detach(&mut self, child: NodeId) {
        let Some(old_parent) = self.parent(child) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(old_parent.0) {
            node.children.retain(|id| *id != child);
        }
        if let Some(node) = self.nodes.get_mut(child.0) {
            node.parent = None;
        }
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == candidate {
                return true;
            }
            match self.parent(id) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::node::fixtures::{Item, Root, TestKind};

    fn item(id: &str) -> TestKind {
        TestKind::Item(Item {
            id: id.to_string(),
            ..Item::default()
        })
    }

    fn sample() -> (NodeTree<TestKind>, NodeId, NodeId, NodeId) {
        let mut tree = NodeTree::new(TestKind::Root(Root::default()));
        let root = tree.root();
        let a = tree.add(root, item("a")).unwrap();
        let b = tree.add(root, item("b")).unwrap();
        let nested = tree.add(a, item("c")).unwrap();
        (tree, a, b, nested)
    }

    #[test]
    fn test_find_orders_direct_matches_first() {
        let (tree, a, b, nested) = sample();
        assert_eq!(tree.find::<Item>(tree.root()), vec![a, b, nested]);
        assert!(tree.find::<Root>(tree.root()).is_empty());
    }

    #[test]
    fn test_find_reaches_grandchildren() {
        let mut tree = NodeTree::new(TestKind::Root(Root::default()));
        let middle = tree.add(tree.root(), TestKind::Root(Root::default())).unwrap();
        let deep = tree.add(middle, item("x")).unwrap();
        assert_eq!(tree.find::<Item>(tree.root()), vec![deep]);
    }

    #[test]
    fn test_find_by_key() {
        let (tree, _, b, _) = sample();
        assert_eq!(tree.find_by_key::<Item>(tree.root(), "b"), vec![b]);
        assert!(tree.find_by_key::<Item>(tree.root(), "z").is_empty());
    }

    #[test]
    fn test_set_children_reparents() {
        let (mut tree, a, b, nested) = sample();
        assert!(tree.set_children(b, vec![nested, nested]));

        assert_eq!(tree.children(b), &[nested]);
        assert_eq!(tree.parent(nested), Some(b));
        assert!(tree.children(a).is_empty());
    }

    #[test]
    fn test_set_children_detaches_previous() {
        let (mut tree, a, b, _) = sample();
        let root = tree.root();
        assert!(tree.set_children(root, vec![b]));
        assert_eq!(tree.parent(a), None);
        assert_eq!(tree.count(), 2);
    }

    #[test]
    fn test_set_children_rejects_cycles() {
        let (mut tree, a, _, nested) = sample();
        let root = tree.root();
        assert!(tree.set_children(nested, vec![a, root]));
        assert!(tree.children(nested).is_empty());
        assert_eq!(tree.parent(a), Some(root));
    }

    #[test]
    fn test_remove_and_remove_type() {
        let (mut tree, a, b, _) = sample();
        let root = tree.root();
        assert!(!tree.remove(a, b));
        assert!(tree.remove(root, b));
        assert_eq!(tree.parent(b), None);

        assert_eq!(tree.remove_type::<Item>(root), 1);
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.parent(a), None);
    }

    #[test]
    fn test_payload_access() {
        let (mut tree, a, _, _) = sample();
        tree.payload_mut::<Item>(a).unwrap().count = 4;
        assert_eq!(tree.payload::<Item>(a).unwrap().count, 4);
        assert!(tree.payload::<Root>(a).is_none());
        assert_eq!(tree.find_first::<Item>(tree.root()).unwrap().id, "a");
    }
}
