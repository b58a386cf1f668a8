// SXML - Simple XML processing engine
//
// Copyright (c) 2025 SXML contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The document tree.
//!
//! A [`Document`] owns every element node in a single arena; elements are
//! addressed by [`ElementId`] handles. The parent link is a plain
//! non-owning arena index, so walking up the tree (mutability cascade,
//! absolute paths, `..` navigation) never creates an ownership cycle.
//!
//! Mutability is cascading: an element is effectively mutable only when
//! its own flag is set and every ancestor is mutable. Every mutating
//! operation checks this first and fails with a `MutabilityError`.

use indexmap::IndexMap;

use crate::error::{XmlError, XmlResult};
use crate::name::{check_name, is_valid_comment, is_valid_encoding};
use crate::value::{Scalar, Value};

/// Handle to an element node inside a [`Document`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) name: String,
    pub(crate) value: Value,
    pub(crate) parent: Option<ElementId>,
    pub(crate) attached: bool,
    pub(crate) children: Vec<ElementId>,
    pub(crate) attributes: IndexMap<String, Value>,
    pub(crate) comment: Option<String>,
}

impl Node {
    fn new(name: String) -> Self {
        Self {
            name,
            value: Value::empty(),
            parent: None,
            attached: false,
            children: Vec::new(),
            attributes: IndexMap::new(),
            comment: None,
        }
    }
}

/// An XML document: the element arena plus document-level state
/// accumulated during parsing (encoding, DOCTYPE identifiers and the
/// document comment).
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: ElementId,
    encoding: Option<String>,
    dtd_public_id: Option<String>,
    dtd_system_id: Option<String>,
    comment: Option<String>,
}

impl Document {
    /// Create a document with a single empty root element.
    pub fn new(root_name: impl Into<String>) -> XmlResult<Self> {
        let name = root_name.into();
        check_name(&name)?;
        let mut root = Node::new(name);
        root.attached = true;
        Ok(Self {
            nodes: vec![root],
            root: ElementId(0),
            encoding: None,
            dtd_public_id: None,
            dtd_system_id: None,
            comment: None,
        })
    }

    /// The root element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    pub(crate) fn node(&self, id: ElementId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: ElementId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    // ---- document-level state ----

    /// The declared encoding, if any.
    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    /// Set the declared encoding.
    pub fn set_encoding(&mut self, encoding: impl Into<String>) -> XmlResult<()> {
        let encoding = encoding.into();
        if !is_valid_encoding(&encoding) {
            return Err(XmlError::name(format!("illegal encoding: {:?}", encoding)));
        }
        self.encoding = Some(encoding);
        Ok(())
    }

    /// The DOCTYPE public identifier, if any.
    pub fn dtd_public_id(&self) -> Option<&str> {
        self.dtd_public_id.as_deref()
    }

    /// The DOCTYPE system identifier, if any.
    pub fn dtd_system_id(&self) -> Option<&str> {
        self.dtd_system_id.as_deref()
    }

    pub fn set_dtd_public_id(&mut self, id: impl Into<String>) {
        self.dtd_public_id = Some(id.into());
    }

    pub fn set_dtd_system_id(&mut self, id: impl Into<String>) {
        self.dtd_system_id = Some(id.into());
    }

    /// The document-level comment, if any.
    pub fn document_comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Set the document-level comment.
    pub fn set_document_comment(&mut self, comment: impl Into<String>) -> XmlResult<()> {
        let comment = comment.into();
        if !is_valid_comment(&comment) {
            return Err(XmlError::name("comment contains '--'"));
        }
        self.comment = Some(comment);
        Ok(())
    }

    // ---- element accessors ----

    /// The element's (qualified) name.
    pub fn name(&self, id: ElementId) -> &str {
        &self.node(id).name
    }

    /// Rename an element.
    pub fn set_name(&mut self, id: ElementId, name: impl Into<String>) -> XmlResult<()> {
        let name = name.into();
        check_name(&name)?;
        self.ensure_mutable(id)?;
        self.node_mut(id).name = name;
        Ok(())
    }

    /// The element's parent, if it has one.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.node(id).parent
    }

    /// Whether the element is present in its parent's child list.
    ///
    /// Safe-navigation placeholders have a parent link but are detached.
    pub fn is_attached(&self, id: ElementId) -> bool {
        self.node(id).attached
    }

    /// The element's children, in document order.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        &self.node(id).children
    }

    /// The element's content value.
    pub fn value(&self, id: ElementId) -> &Value {
        &self.node(id).value
    }

    /// The element's comment, if any.
    pub fn comment(&self, id: ElementId) -> Option<&str> {
        self.node(id).comment.as_deref()
    }

    /// Set the element's comment.
    pub fn set_comment(&mut self, id: ElementId, comment: impl Into<String>) -> XmlResult<()> {
        let comment = comment.into();
        if !is_valid_comment(&comment) {
            return Err(XmlError::name("comment contains '--'"));
        }
        self.ensure_mutable(id)?;
        self.node_mut(id).comment = Some(comment);
        Ok(())
    }

    // ---- mutability ----

    /// Effective mutability: the element's own flag plus every ancestor's.
    pub fn is_mutable(&self, id: ElementId) -> bool {
        let mut cursor = Some(id);
        while let Some(id) = cursor {
            let node = self.node(id);
            if !node.value.is_mutable() {
                return false;
            }
            cursor = node.parent;
        }
        true
    }

    /// Set the element's own mutability flag. Always permitted.
    pub fn set_mutable(&mut self, id: ElementId, mutable: bool) {
        self.node_mut(id).value.set_mutable(mutable);
    }

    pub(crate) fn ensure_mutable(&self, id: ElementId) -> XmlResult<()> {
        if self.is_mutable(id) {
            Ok(())
        } else {
            Err(XmlError::mutability(format!(
                "element <{}> is read-only",
                self.node(id).name
            )))
        }
    }

    // ---- value editing ----

    /// Set the element's content value.
    pub fn set_value(&mut self, id: ElementId, scalar: impl Into<Scalar>) -> XmlResult<()> {
        self.ensure_mutable(id)?;
        self.node_mut(id).value.set_scalar(scalar)
    }

    /// Remove the element's content value.
    pub fn clear_value(&mut self, id: ElementId) -> XmlResult<()> {
        self.ensure_mutable(id)?;
        self.node_mut(id).value.clear_scalar()
    }

    // ---- children ----

    /// Append a new empty child element and return its handle.
    pub fn add_element(&mut self, parent: ElementId, name: impl Into<String>) -> XmlResult<ElementId> {
        let name = name.into();
        check_name(&name)?;
        self.ensure_mutable(parent)?;
        let id = ElementId(self.nodes.len());
        let mut node = Node::new(name);
        node.parent = Some(parent);
        node.attached = true;
        self.nodes.push(node);
        self.node_mut(parent).children.push(id);
        Ok(id)
    }

    /// Append a new child holding the given content value.
    pub fn add_element_with(
        &mut self,
        parent: ElementId,
        name: impl Into<String>,
        scalar: impl Into<Scalar>,
    ) -> XmlResult<ElementId> {
        let id = self.add_element(parent, name)?;
        self.set_value(id, scalar)?;
        Ok(id)
    }

    /// First child with the given name, in document order.
    pub fn get_element(&self, parent: ElementId, name: &str) -> Option<ElementId> {
        self.node(parent)
            .children
            .iter()
            .copied()
            .find(|&child| self.node(child).name == name)
    }

    /// All children with the given name, in document order.
    pub fn get_elements(&self, parent: ElementId, name: &str) -> Vec<ElementId> {
        self.node(parent)
            .children
            .iter()
            .copied()
            .filter(|&child| self.node(child).name == name)
            .collect()
    }

    /// True iff the element has a child with the given name.
    pub fn has_element(&self, parent: ElementId, name: &str) -> bool {
        self.get_element(parent, name).is_some()
    }

    /// Detach one child. The removed subtree does not survive removal;
    /// its handles must not be used afterwards.
    pub fn remove_child(&mut self, parent: ElementId, child: ElementId) -> XmlResult<()> {
        self.ensure_mutable(parent)?;
        let children = &mut self.node_mut(parent).children;
        match children.iter().position(|&c| c == child) {
            Some(pos) => {
                children.remove(pos);
                let node = self.node_mut(child);
                node.parent = None;
                node.attached = false;
                Ok(())
            }
            None => Err(XmlError::mutability(
                "element is not a child of the given parent",
            )),
        }
    }

    /// Remove all immediate children with the given name; returns the count.
    pub fn remove_elements(&mut self, parent: ElementId, name: &str) -> XmlResult<usize> {
        self.ensure_mutable(parent)?;
        let matches: Vec<ElementId> = self.get_elements(parent, name);
        for &child in &matches {
            self.remove_child(parent, child)?;
        }
        Ok(matches.len())
    }

    // ---- attributes ----

    /// The named attribute's value.
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&Value> {
        self.node(id).attributes.get(name)
    }

    /// Attribute entries in insertion order.
    pub fn attributes(&self, id: ElementId) -> impl Iterator<Item = (&str, &Value)> {
        self.node(id)
            .attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Number of attributes.
    pub fn attribute_count(&self, id: ElementId) -> usize {
        self.node(id).attributes.len()
    }

    /// Set an attribute, replacing any existing value under the same name.
    /// A replaced attribute keeps its position; a new one appends.
    pub fn set_attribute(
        &mut self,
        id: ElementId,
        name: impl Into<String>,
        scalar: impl Into<Scalar>,
    ) -> XmlResult<()> {
        let name = name.into();
        check_name(&name)?;
        self.ensure_mutable(id)?;
        self.node_mut(id)
            .attributes
            .insert(name, Value::attribute(scalar));
        Ok(())
    }

    /// Install a complete attribute [`Value`], flags included. Used by
    /// codecs that restore per-value mutability; [`set_attribute`] is the
    /// ordinary entry point.
    ///
    /// [`set_attribute`]: Document::set_attribute
    pub fn set_attribute_value(
        &mut self,
        id: ElementId,
        name: impl Into<String>,
        mut value: Value,
    ) -> XmlResult<()> {
        let name = name.into();
        check_name(&name)?;
        self.ensure_mutable(id)?;
        value.mark_attribute();
        self.node_mut(id).attributes.insert(name, value);
        Ok(())
    }

    /// Remove an attribute; returns true if it was present.
    pub fn remove_attribute(&mut self, id: ElementId, name: &str) -> XmlResult<bool> {
        self.ensure_mutable(id)?;
        Ok(self.node_mut(id).attributes.shift_remove(name).is_some())
    }

    // ---- tree-wide operations ----

    /// Walk up to the topmost reachable element.
    pub fn root_of(&self, id: ElementId) -> ElementId {
        let mut cursor = id;
        while let Some(parent) = self.node(cursor).parent {
            cursor = parent;
        }
        cursor
    }

    /// The `/`-delimited absolute path of the element from its root.
    pub fn absolute_path(&self, id: ElementId) -> String {
        let mut names = Vec::new();
        let mut cursor = Some(id);
        while let Some(id) = cursor {
            let node = self.node(id);
            names.push(node.name.as_str());
            cursor = node.parent;
        }
        let mut path = String::new();
        for name in names.iter().rev() {
            path.push('/');
            path.push_str(name);
        }
        path
    }

    /// Deep-copy a subtree from `src` (which may be this document or
    /// another) and append it under `dest_parent`.
    ///
    /// The copy is fully detached from its source and mutable throughout,
    /// regardless of the source's mutability flags. This is the one way
    /// to replicate an element that already has a parent; elements are
    /// never re-parented in place.
    pub fn copy_subtree(
        &mut self,
        dest_parent: ElementId,
        src: &Document,
        src_id: ElementId,
    ) -> XmlResult<ElementId> {
        self.ensure_mutable(dest_parent)?;
        Ok(self.copy_node(dest_parent, src, src_id))
    }

    fn copy_node(&mut self, dest_parent: ElementId, src: &Document, src_id: ElementId) -> ElementId {
        let src_node = src.node(src_id);
        let id = ElementId(self.nodes.len());
        let mut node = Node::new(src_node.name.clone());
        node.parent = Some(dest_parent);
        node.attached = true;
        let mut value = src_node.value.clone();
        value.set_mutable(true);
        node.value = value;
        node.comment = src_node.comment.clone();
        for (name, attr) in &src_node.attributes {
            let mut attr = attr.clone();
            attr.set_mutable(true);
            node.attributes.insert(name.clone(), attr);
        }
        self.nodes.push(node);
        self.node_mut(dest_parent).children.push(id);
        for &child in &src.node(src_id).children {
            self.copy_node(id, src, child);
        }
        id
    }

    /// Deep-copy a subtree into a fresh standalone document.
    pub fn subtree_document(&self, id: ElementId) -> Document {
        let node = self.node(id);
        let mut doc = Document {
            nodes: vec![Node::new(node.name.clone())],
            root: ElementId(0),
            encoding: None,
            dtd_public_id: None,
            dtd_system_id: None,
            comment: None,
        };
        let root = doc.root;
        {
            let root_node = doc.node_mut(root);
            root_node.attached = true;
            let mut value = node.value.clone();
            value.set_mutable(true);
            root_node.value = value;
            root_node.comment = node.comment.clone();
            for (name, attr) in &node.attributes {
                let mut attr = attr.clone();
                attr.set_mutable(true);
                root_node.attributes.insert(name.clone(), attr);
            }
        }
        for &child in &node.children {
            doc.copy_node(root, self, child);
        }
        doc
    }

    /// Allocate a detached read-only placeholder with a parent link but
    /// no presence in the parent's child list. Used by safe navigation.
    pub(crate) fn new_placeholder(&mut self, parent: ElementId, name: &str) -> ElementId {
        let id = ElementId(self.nodes.len());
        let mut node = Node::new(name.to_string());
        node.parent = Some(parent);
        node.attached = false;
        node.value.set_mutable(false);
        self.nodes.push(node);
        id
    }

    /// Total number of element nodes ever allocated in the arena,
    /// including detached ones.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document::new("root").unwrap()
    }

    // ==================== Construction tests ====================

    #[test]
    fn test_new_document() {
        let d = doc();
        assert_eq!(d.name(d.root()), "root");
        assert!(d.children(d.root()).is_empty());
        assert!(d.value(d.root()).is_empty());
        assert!(d.is_attached(d.root()));
    }

    #[test]
    fn test_new_document_invalid_name() {
        assert!(Document::new("1bad").is_err());
        assert!(Document::new("").is_err());
    }

    #[test]
    fn test_document_metadata() {
        let mut d = doc();
        d.set_encoding("UTF-8").unwrap();
        d.set_dtd_public_id("-//X//EN");
        d.set_dtd_system_id("http://example.com/x.dtd");
        d.set_document_comment("top").unwrap();
        assert_eq!(d.encoding(), Some("UTF-8"));
        assert_eq!(d.dtd_public_id(), Some("-//X//EN"));
        assert_eq!(d.dtd_system_id(), Some("http://example.com/x.dtd"));
        assert_eq!(d.document_comment(), Some("top"));
    }

    #[test]
    fn test_invalid_encoding_rejected() {
        let mut d = doc();
        assert!(d.set_encoding("8bit").is_err());
    }

    // ==================== Child element tests ====================

    #[test]
    fn test_add_and_get_element() {
        let mut d = doc();
        let root = d.root();
        let a = d.add_element(root, "a").unwrap();
        assert_eq!(d.get_element(root, "a"), Some(a));
        assert_eq!(d.parent(a), Some(root));
        assert_eq!(d.children(root), &[a]);
    }

    #[test]
    fn test_add_element_invalid_name() {
        let mut d = doc();
        let root = d.root();
        assert!(d.add_element(root, "9lives").is_err());
    }

    #[test]
    fn test_get_elements_preserves_order() {
        let mut d = doc();
        let root = d.root();
        let a1 = d.add_element(root, "a").unwrap();
        let _b = d.add_element(root, "b").unwrap();
        let a2 = d.add_element(root, "a").unwrap();
        assert_eq!(d.get_elements(root, "a"), vec![a1, a2]);
        assert_eq!(d.get_element(root, "a"), Some(a1));
    }

    #[test]
    fn test_remove_child() {
        let mut d = doc();
        let root = d.root();
        let a = d.add_element(root, "a").unwrap();
        let b = d.add_element(root, "b").unwrap();
        d.remove_child(root, a).unwrap();
        assert_eq!(d.children(root), &[b]);
        assert!(!d.is_attached(a));
    }

    #[test]
    fn test_remove_elements_by_name() {
        let mut d = doc();
        let root = d.root();
        d.add_element(root, "a").unwrap();
        d.add_element(root, "b").unwrap();
        d.add_element(root, "a").unwrap();
        assert_eq!(d.remove_elements(root, "a").unwrap(), 2);
        assert_eq!(d.children(root).len(), 1);
    }

    // ==================== Value tests ====================

    #[test]
    fn test_set_and_clear_value() {
        let mut d = doc();
        let root = d.root();
        let a = d.add_element_with(root, "a", 42).unwrap();
        assert_eq!(d.value(a).as_int(), Some(42));
        d.clear_value(a).unwrap();
        assert!(d.value(a).is_empty());
    }

    // ==================== Attribute tests ====================

    #[test]
    fn test_set_and_get_attribute() {
        let mut d = doc();
        let root = d.root();
        d.set_attribute(root, "x", "1").unwrap();
        assert_eq!(d.attribute(root, "x").unwrap().text(), "1");
        assert!(d.attribute(root, "x").unwrap().is_attribute());
        assert!(d.attribute(root, "y").is_none());
    }

    #[test]
    fn test_attribute_replace_keeps_position() {
        let mut d = doc();
        let root = d.root();
        d.set_attribute(root, "a", "1").unwrap();
        d.set_attribute(root, "b", "2").unwrap();
        d.set_attribute(root, "a", "9").unwrap();
        let names: Vec<&str> = d.attributes(root).map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(d.attribute(root, "a").unwrap().text(), "9");
    }

    #[test]
    fn test_remove_attribute() {
        let mut d = doc();
        let root = d.root();
        d.set_attribute(root, "x", "1").unwrap();
        assert!(d.remove_attribute(root, "x").unwrap());
        assert!(!d.remove_attribute(root, "x").unwrap());
        assert_eq!(d.attribute_count(root), 0);
    }

    #[test]
    fn test_attribute_invalid_name() {
        let mut d = doc();
        let root = d.root();
        assert!(d.set_attribute(root, "bad name", "v").is_err());
    }

    // ==================== Mutability tests ====================

    #[test]
    fn test_readonly_element_rejects_mutation() {
        let mut d = doc();
        let root = d.root();
        let a = d.add_element(root, "a").unwrap();
        d.set_mutable(a, false);
        assert!(d.set_value(a, "x").is_err());
        assert!(d.add_element(a, "b").is_err());
        assert!(d.set_attribute(a, "k", "v").is_err());
    }

    #[test]
    fn test_mutability_cascades_to_descendants() {
        let mut d = doc();
        let root = d.root();
        let a = d.add_element(root, "a").unwrap();
        let b = d.add_element(a, "b").unwrap();
        d.set_mutable(root, false);
        assert!(!d.is_mutable(b));
        assert!(d.set_value(b, "x").is_err());
        d.set_mutable(root, true);
        assert!(d.is_mutable(b));
        assert!(d.set_value(b, "x").is_ok());
    }

    #[test]
    fn test_set_mutable_always_permitted() {
        let mut d = doc();
        let root = d.root();
        d.set_mutable(root, false);
        d.set_mutable(root, true);
        assert!(d.is_mutable(root));
    }

    // ==================== Copy tests ====================

    #[test]
    fn test_copy_subtree_between_documents() {
        let mut src = doc();
        let sroot = src.root();
        let a = src.add_element_with(sroot, "a", "hello").unwrap();
        src.set_attribute(a, "k", "v").unwrap();
        src.add_element(a, "kid").unwrap();

        let mut dst = Document::new("other").unwrap();
        let droot = dst.root();
        let copied = dst.copy_subtree(droot, &src, a).unwrap();
        assert_eq!(dst.name(copied), "a");
        assert_eq!(dst.value(copied).text(), "hello");
        assert_eq!(dst.attribute(copied, "k").unwrap().text(), "v");
        assert_eq!(dst.children(copied).len(), 1);
    }

    #[test]
    fn test_copy_of_readonly_subtree_is_mutable() {
        let mut src = doc();
        let sroot = src.root();
        let a = src.add_element(sroot, "a").unwrap();
        src.set_mutable(a, false);

        let mut dst = Document::new("other").unwrap();
        let droot = dst.root();
        let copied = dst.copy_subtree(droot, &src, a).unwrap();
        assert!(dst.is_mutable(copied));
        assert!(dst.set_value(copied, "now writable").is_ok());
    }

    #[test]
    fn test_subtree_document() {
        let mut d = doc();
        let root = d.root();
        let a = d.add_element(root, "a").unwrap();
        d.add_element_with(a, "b", 1).unwrap();
        let sub = d.subtree_document(a);
        assert_eq!(sub.name(sub.root()), "a");
        let b = sub.get_element(sub.root(), "b").unwrap();
        assert_eq!(sub.value(b).as_int(), Some(1));
        assert!(sub.parent(sub.root()).is_none());
    }

    // ==================== Path tests ====================

    #[test]
    fn test_absolute_path() {
        let mut d = doc();
        let root = d.root();
        let a = d.add_element(root, "a").unwrap();
        let b = d.add_element(a, "b").unwrap();
        assert_eq!(d.absolute_path(b), "/root/a/b");
        assert_eq!(d.absolute_path(root), "/root");
    }

    #[test]
    fn test_root_of() {
        let mut d = doc();
        let root = d.root();
        let a = d.add_element(root, "a").unwrap();
        let b = d.add_element(a, "b").unwrap();
        assert_eq!(d.root_of(b), root);
        assert_eq!(d.root_of(root), root);
    }
}
