//! Untyped tag tree.
//!
//! Every tag of a document lives in one arena owned by [`Document`] and is
//! addressed by a [`TagId`]. Parent and child links are plain ids, so a child
//! pointing back at its parent never forms an ownership cycle. Index 0 is
//! always the root; a fresh document's root is the empty sentinel tag.
//!
//! Lookups by name ignore letter case and are shallow: [`TagRef::find_tag`]
//! inspects the tag itself and its direct children only.

mod attribute;

pub use attribute::{Attribute, Attributes};
pub(crate) use attribute::same_name;

use std::sync::LazyLock;

use tracing::info;

use crate::error::{ParseError, Result, StructureError};

static EMPTY: LazyLock<Tag> = LazyLock::new(Tag::default);

/// Index of a tag inside its [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(usize);

impl TagId {
    pub const ROOT: Self = Self(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// Storage for a single tag in the document arena
#[derive(Debug, Clone, Default)]
pub struct Tag {
    name: String,
    value: String,
    parent: Option<TagId>,
    attributes: Attributes,
    children: Vec<TagId>,
}

impl Tag {
    fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Copies name, value and attributes but no links
    fn detached_copy(&self) -> Self {
        Self {
            name: self.name.clone(),
            value: self.value.clone(),
            parent: None,
            attributes: self.attributes.clone(),
            children: Vec::new(),
        }
    }
}

/// An in-memory tag tree
#[derive(Debug, Clone)]
pub struct Document {
    tags: Vec<Tag>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document whose root is the empty sentinel tag
    pub fn new() -> Self {
        Self {
            tags: vec![Tag::default()],
        }
    }

    /// Creates a document whose root carries `name`
    pub fn with_root(name: impl Into<String>) -> Self {
        Self {
            tags: vec![Tag::named(name)],
        }
    }

    pub fn root(&self) -> TagRef<'_> {
        self.tag(TagId::ROOT).unwrap_or(TagRef {
            doc: self,
            id: TagId::ROOT,
            tag: &*EMPTY,
        })
    }

    /// True while the root is still the empty sentinel
    pub fn is_empty(&self) -> bool {
        self.root().name().is_empty()
    }

    pub fn tag(&self, id: TagId) -> Option<TagRef<'_>> {
        self.tags.get(id.0).map(|tag| TagRef { doc: self, id, tag })
    }

    pub fn find_tag(&self, name: &str) -> Option<TagRef<'_>> {
        self.root().find_tag(name)
    }

    pub fn find_tags(&self, name: &str) -> Vec<TagRef<'_>> {
        self.root().find_tags(name)
    }

    /// Allocates a detached tag; attach it with [`Document::add_tag`]
    pub fn create_tag(&mut self, name: impl Into<String>) -> TagId {
        let id = TagId(self.tags.len());
        self.tags.push(Tag::named(name));
        id
    }

    pub(crate) fn set_name(&mut self, id: TagId, name: impl Into<String>) -> bool {
        match self.tags.get_mut(id.0) {
            Some(tag) => {
                tag.name = name.into();
                true
            }
            None => false,
        }
    }

    pub fn set_value(&mut self, id: TagId, value: impl Into<String>) -> bool {
        match self.tags.get_mut(id.0) {
            Some(tag) => {
                tag.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Attaches `child` as the last child of `parent`.
    ///
    /// Returns false without touching the tree when the child has an empty
    /// name, either id is unknown, the child is the root, or attaching would
    /// make a tag its own ancestor. A child that already has a parent is moved.
    pub fn add_tag(&mut self, parent: TagId, child: TagId) -> bool {
        let Some(child_tag) = self.tags.get(child.0) else {
            return false;
        };
        if child_tag.name.is_empty()
            || child == TagId::ROOT
            || self.tags.get(parent.0).is_none()
            || self.is_ancestor_or_self(child, parent)
        {
            return false;
        }

        self.detach(child);
        if let Some(tag) = self.tags.get_mut(child.0) {
            tag.parent = Some(parent);
        }
        if let Some(tag) = self.tags.get_mut(parent.0) {
            tag.children.push(child);
        }
        true
    }

    /// Adds an attribute to a tag.
    ///
    /// # Errors
    ///
    /// [`StructureError::DuplicateAttribute`] when the tag already has an
    /// attribute of the same case-insensitive name,
    /// [`StructureError::UnknownTag`] when `id` is not part of this document.
    pub fn add_attribute(&mut self, id: TagId, attribute: Attribute) -> Result<()> {
        match self.tags.get_mut(id.0) {
            Some(tag) => tag.attributes.insert(attribute),
            None => Err(ParseError::new(StructureError::UnknownTag)),
        }
    }

    pub fn remove_attribute(&mut self, id: TagId, name: &str) -> bool {
        self.tags
            .get_mut(id.0)
            .is_some_and(|tag| tag.attributes.remove(name))
    }

    /// Detaches every direct child of `parent` whose name equals `name`
    /// exactly. Returns whether anything was removed.
    pub fn remove_tags(&mut self, parent: TagId, name: &str) -> bool {
        let Some(children) = self.tags.get(parent.0).map(|tag| tag.children.clone()) else {
            return false;
        };

        let (removed, kept): (Vec<TagId>, Vec<TagId>) = children
            .into_iter()
            .partition(|child| self.tags.get(child.0).is_some_and(|tag| tag.name == name));

        for child in &removed {
            if let Some(tag) = self.tags.get_mut(child.0) {
                tag.parent = None;
            }
        }
        if let Some(tag) = self.tags.get_mut(parent.0) {
            tag.children = kept;
        }
        !removed.is_empty()
    }

    /// Deep copy of the subtree at `id` into a fresh document
    pub fn clone_tag(&self, id: TagId) -> Option<Self> {
        self.tag(id).map(|tag| tag.deep_clone())
    }

    /// Deep copies the subtree at `source` of another document and attaches
    /// the copy under `parent`.
    pub fn import(&mut self, parent: TagId, other: &Self, source: TagId) -> Option<TagId> {
        let source = other.tag(source)?;
        if source.name().is_empty() || self.tags.get(parent.0).is_none() {
            return None;
        }

        let top = TagId(self.tags.len());
        self.tags.push(source.tag.detached_copy());
        self.copy_children(source, top);
        self.add_tag(parent, top).then_some(top)
    }

    /// Writes the tree to the log, one line per tag
    pub fn log_tree(&self) {
        self.root().log_tree();
    }

    fn detach(&mut self, child: TagId) {
        let Some(old_parent) = self.tags.get(child.0).and_then(|tag| tag.parent) else {
            return;
        };
        if let Some(tag) = self.tags.get_mut(old_parent.0) {
            tag.children.retain(|id| *id != child);
        }
        if let Some(tag) = self.tags.get_mut(child.0) {
            tag.parent = None;
        }
    }

    fn is_ancestor_or_self(&self, candidate: TagId, mut id: TagId) -> bool {
        loop {
            if id == candidate {
                return true;
            }
            match self.tags.get(id.0).and_then(|tag| tag.parent) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    /// Copies the children of `source` (from any document) below `target`
    fn copy_children(&mut self, source: TagRef<'_>, target: TagId) {
        let mut pending = vec![(source, target)];
        while let Some((from, to)) = pending.pop() {
            for child in from.children() {
                let copy = TagId(self.tags.len());
                let mut tag = child.tag.detached_copy();
                tag.parent = Some(to);
                self.tags.push(tag);
                if let Some(parent) = self.tags.get_mut(to.0) {
                    parent.children.push(copy);
                }
                pending.push((child, copy));
            }
        }
    }
}

/// Read view of one tag inside a [`Document`]
#[derive(Debug, Clone, Copy)]
pub struct TagRef<'a> {
    doc: &'a Document,
    id: TagId,
    tag: &'a Tag,
}

impl<'a> TagRef<'a> {
    pub fn id(&self) -> TagId {
        self.id
    }

    pub fn name(&self) -> &'a str {
        &self.tag.name
    }

    pub fn value(&self) -> &'a str {
        &self.tag.value
    }

    pub fn parent(&self) -> Option<TagRef<'a>> {
        self.tag.parent.and_then(|id| self.doc.tag(id))
    }

    pub fn attributes(&self) -> &'a Attributes {
        &self.tag.attributes
    }

    pub fn children(&self) -> impl Iterator<Item = TagRef<'a>> + 'a {
        let doc = self.doc;
        self.tag.children.iter().filter_map(move |id| doc.tag(*id))
    }

    pub fn find_attribute(&self, name: &str) -> Option<&'a Attribute> {
        self.tag.attributes.get(name)
    }

    /// This tag if it is called `name`, otherwise the first direct child
    /// called `name`. Grandchildren are never inspected.
    pub fn find_tag(&self, name: &str) -> Option<TagRef<'a>> {
        if same_name(self.name(), name) {
            return Some(*self);
        }
        self.children().find(|child| same_name(child.name(), name))
    }

    /// `[self]` if this tag is called `name`, otherwise every direct child
    /// called `name`
    pub fn find_tags(&self, name: &str) -> Vec<TagRef<'a>> {
        if same_name(self.name(), name) {
            return vec![*self];
        }
        self.children()
            .filter(|child| same_name(child.name(), name))
            .collect()
    }

    /// Number of tags in this subtree, including this one
    pub fn count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![*self];
        while let Some(tag) = pending.pop() {
            count += 1;
            pending.extend(tag.children());
        }
        count
    }

    /// Number of levels in this subtree; a leaf has depth 1
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(*self, 1)];
        while let Some((tag, level)) = pending.pop() {
            deepest = deepest.max(level);
            pending.extend(tag.children().map(|child| (child, level + 1)));
        }
        deepest
    }

    /// Deep copy of this subtree; shares nothing with the source document
    pub fn deep_clone(&self) -> Document {
        let mut copy = Document {
            tags: vec![self.tag.detached_copy()],
        };
        copy.copy_children(*self, TagId::ROOT);
        copy
    }

    pub fn log_tree(&self) {
        let mut pending = vec![(*self, 0usize)];
        while let Some((tag, level)) = pending.pop() {
            if tag.value().is_empty() {
                info!(
                    level,
                    name = tag.name(),
                    attributes = tag.attributes().len(),
                    "tag"
                );
            } else {
                info!(
                    level,
                    name = tag.name(),
                    value = tag.value(),
                    attributes = tag.attributes().len(),
                    "tag"
                );
            }
            let children: Vec<_> = tag.children().collect();
            pending.extend(children.into_iter().rev().map(|child| (child, level + 1)));
        }
    }
}

/// Deep structural equality: name, value, attributes and children in order
impl PartialEq for TagRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(*self, *other)];
        while let Some((left, right)) = pending.pop() {
            if left.name() != right.name()
                || left.value() != right.value()
                || left.attributes() != right.attributes()
                || left.tag.children.len() != right.tag.children.len()
            {
                return false;
            }
            pending.extend(left.children().zip(right.children()));
        }
        true
    }
}
