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

//! Structural comparison of element trees.
//!
//! Equality covers name, value, attributes (order-insensitive) and
//! children (order-sensitive, recursive). Comments and mutability flags
//! carry no information content and are ignored. The hash XORs the
//! value, attribute-entry and child hashes, so it is consistent with
//! equality including the attribute-order insensitivity.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::document::{Document, ElementId};

/// Structural equality of two subtrees, possibly in different documents.
pub fn elements_equal(a_doc: &Document, a: ElementId, b_doc: &Document, b: ElementId) -> bool {
    if a_doc.name(a) != b_doc.name(b) {
        return false;
    }
    if a_doc.value(a) != b_doc.value(b) {
        return false;
    }
    if a_doc.attribute_count(a) != b_doc.attribute_count(b) {
        return false;
    }
    for (name, value) in a_doc.attributes(a) {
        match b_doc.attribute(b, name) {
            Some(other) if other == value => {}
            _ => return false,
        }
    }
    let a_children = a_doc.children(a);
    let b_children = b_doc.children(b);
    if a_children.len() != b_children.len() {
        return false;
    }
    a_children
        .iter()
        .zip(b_children)
        .all(|(&ac, &bc)| elements_equal(a_doc, ac, b_doc, bc))
}

/// Structural hash of a subtree, consistent with [`elements_equal`].
pub fn element_hash(doc: &Document, id: ElementId) -> u64 {
    let mut hash = doc.value(id).content_hash();
    for (name, value) in doc.attributes(id) {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        hash ^= hasher.finish() ^ value.content_hash();
    }
    for &child in doc.children(id) {
        hash ^= element_hash(doc, child);
    }
    hash
}

impl PartialEq for Document {
    /// Structural equality of the root subtrees; document-level state
    /// (encoding, DOCTYPE ids, comments) is not compared.
    fn eq(&self, other: &Self) -> bool {
        elements_equal(self, self.root(), other, other.root())
    }
}
