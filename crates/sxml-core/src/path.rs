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

//! Path navigation over the tree.
//!
//! Paths are `/`-delimited element names. A leading `/` starts at the
//! root element; `..` steps to the parent and is an error above the
//! root. A plain name selects the first child with that name in
//! document order, so lookups are deterministic even when siblings
//! share a name.

use crate::document::{Document, ElementId};
use crate::error::{XmlError, XmlResult};
use crate::name::check_name;
use crate::value::{Scalar, Value};

fn start_of<'p>(doc: &Document, from: ElementId, path: &'p str) -> (ElementId, Vec<&'p str>) {
    let start = if path.starts_with('/') {
        doc.root_of(from)
    } else {
        from
    };
    let segments = path.split('/').filter(|s| !s.is_empty()).collect();
    (start, segments)
}

fn above_root(path: &str) -> XmlError {
    XmlError::name(format!("path {:?} steps above the root", path))
}

/// Navigate a path, returning `None` when any segment is missing.
pub fn find_element(
    doc: &Document,
    from: ElementId,
    path: &str,
) -> XmlResult<Option<ElementId>> {
    let (mut cursor, segments) = start_of(doc, from, path);
    for segment in segments {
        if segment == ".." {
            cursor = doc.parent(cursor).ok_or_else(|| above_root(path))?;
        } else {
            match doc.get_element(cursor, segment) {
                Some(child) => cursor = child,
                None => return Ok(None),
            }
        }
    }
    Ok(Some(cursor))
}

/// Navigate a path to an element holding the given content value,
/// backtracking across same-named siblings at every level.
pub fn find_element_with_value(
    doc: &Document,
    from: ElementId,
    path: &str,
    value: &Scalar,
) -> XmlResult<Option<ElementId>> {
    let (cursor, segments) = start_of(doc, from, path);
    find_with_value(doc, cursor, &segments, value, path)
}

fn find_with_value(
    doc: &Document,
    cursor: ElementId,
    segments: &[&str],
    value: &Scalar,
    path: &str,
) -> XmlResult<Option<ElementId>> {
    let (head, rest) = match segments.split_first() {
        None => {
            let matched = doc.value(cursor).scalar() == Some(value);
            return Ok(matched.then_some(cursor));
        }
        Some(split) => split,
    };
    if *head == ".." {
        let parent = doc.parent(cursor).ok_or_else(|| above_root(path))?;
        return find_with_value(doc, parent, rest, value, path);
    }
    for &child in doc.children(cursor) {
        if doc.name(child) != *head {
            continue;
        }
        if let Some(hit) = find_with_value(doc, child, rest, value, path)? {
            return Ok(Some(hit));
        }
    }
    Ok(None)
}

/// Navigate a path, creating any missing segments as new empty elements.
pub fn ensure_element(
    doc: &mut Document,
    from: ElementId,
    path: &str,
) -> XmlResult<ElementId> {
    let (mut cursor, segments) = start_of(doc, from, path);
    for segment in segments {
        if segment == ".." {
            cursor = doc.parent(cursor).ok_or_else(|| above_root(path))?;
        } else {
            cursor = match doc.get_element(cursor, segment) {
                Some(child) => child,
                None => doc.add_element(cursor, segment)?,
            };
        }
    }
    Ok(cursor)
}

/// Navigate a path, substituting detached read-only placeholders for
/// missing segments. The result always exists and can be read (its
/// parent chain is intact, so namespace resolution still works), but a
/// placeholder is never in its parent's child list and rejects mutation.
pub fn safe_element(
    doc: &mut Document,
    from: ElementId,
    path: &str,
) -> XmlResult<ElementId> {
    let (mut cursor, segments) = start_of(doc, from, path);
    for segment in segments {
        if segment == ".." {
            cursor = doc.parent(cursor).ok_or_else(|| above_root(path))?;
        } else {
            check_name(segment)?;
            cursor = match doc.get_element(cursor, segment) {
                Some(child) => child,
                None => doc.new_placeholder(cursor, segment),
            };
        }
    }
    Ok(cursor)
}

/// The named attribute's value, or a read-only empty value when absent.
pub fn safe_attribute(doc: &Document, id: ElementId, name: &str) -> Value {
    match doc.attribute(id, name) {
        Some(value) => value.clone(),
        None => {
            let mut value = Value::empty();
            value.set_mutable(false);
            value
        }
    }
}

/// True when the element carries no information: empty value, no
/// attributes, and every child (if any) empty in the same sense.
pub fn is_empty(doc: &Document, id: ElementId) -> bool {
    doc.value(id).is_empty()
        && doc.attribute_count(id) == 0
        && doc.children(id).iter().all(|&child| is_empty(doc, child))
}

/// Recursively remove empty child elements; returns how many were
/// removed. The element itself is never removed.
pub fn remove_empty_elements(doc: &mut Document, id: ElementId) -> XmlResult<usize> {
    let mut removed = 0;
    for child in doc.children(id).to_vec() {
        removed += remove_empty_elements(doc, child)?;
        if is_empty(doc, child) {
            doc.remove_child(id, child)?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// Replace the first child sharing the replacement's name with a deep
/// copy of the replacement, keeping its position; append the copy when
/// no child matches. Returns the copy's handle.
pub fn replace_element(
    doc: &mut Document,
    parent: ElementId,
    src: &Document,
    src_id: ElementId,
) -> XmlResult<ElementId> {
    let name = src.name(src_id);
    let position = doc
        .children(parent)
        .iter()
        .position(|&child| doc.name(child) == name);
    match position {
        Some(index) => {
            let old = doc.children(parent)[index];
            doc.remove_child(parent, old)?;
            let new_id = doc.copy_subtree(parent, src, src_id)?;
            let children = &mut doc.node_mut(parent).children;
            if let Some(appended) = children.pop() {
                children.insert(index, appended);
            }
            Ok(new_id)
        }
        None => doc.copy_subtree(parent, src, src_id),
    }
}
