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

//! Namespace prefix resolution.
//!
//! Bindings are plain `xmlns:<prefix>` (and default `xmlns`) attributes;
//! resolution walks the parent chain from the element outward, nearest
//! binding wins. Nothing here interns URIs: matching is textual.

use crate::document::{Document, ElementId};
use crate::error::{XmlError, XmlResult};
use crate::name::split_qname;

fn xmlns_attr(prefix: Option<&str>) -> String {
    match prefix {
        Some(p) => format!("xmlns:{}", p),
        None => "xmlns".to_string(),
    }
}

/// Resolve a prefix (or the default namespace, for `None`) to its URI,
/// walking the parent chain from `id` outward.
pub fn namespace_uri(doc: &Document, id: ElementId, prefix: Option<&str>) -> Option<String> {
    let attr = xmlns_attr(prefix);
    let mut cursor = Some(id);
    while let Some(id) = cursor {
        if let Some(value) = doc.attribute(id, &attr) {
            return Some(value.text());
        }
        cursor = doc.parent(id);
    }
    None
}

/// Find a prefix bound to the given URI in scope at `id`, nearest
/// declaration first.
pub fn namespace_prefix(doc: &Document, id: ElementId, uri: &str) -> Option<String> {
    let mut cursor = Some(id);
    while let Some(id) = cursor {
        for (name, value) in doc.attributes(id) {
            if let Some(prefix) = name.strip_prefix("xmlns:") {
                if value.text() == uri {
                    return Some(prefix.to_string());
                }
            }
        }
        cursor = doc.parent(id);
    }
    None
}

/// Declare `prefix` → `uri` on `id`. A no-op when the prefix already
/// resolves to the same URI in scope; an error when it resolves to a
/// different one.
pub fn ensure_namespace(
    doc: &mut Document,
    id: ElementId,
    prefix: &str,
    uri: &str,
) -> XmlResult<()> {
    match namespace_uri(doc, id, Some(prefix)) {
        Some(existing) if existing == uri => Ok(()),
        Some(existing) => Err(XmlError::name(format!(
            "prefix '{}' is already bound to '{}'",
            prefix, existing
        ))),
        None => doc.set_attribute(id, xmlns_attr(Some(prefix)), uri),
    }
}

/// True when the element's qualified name resolves to `local` in the
/// namespace `uri` (or is the plain name `local`, for `None`).
pub fn element_matches(
    doc: &Document,
    id: ElementId,
    local: &str,
    uri: Option<&str>,
) -> bool {
    let (prefix, name_local) = split_qname(doc.name(id));
    match uri {
        None => doc.name(id) == local,
        Some(uri) => {
            name_local == local && namespace_uri(doc, id, prefix).as_deref() == Some(uri)
        }
    }
}

/// First child whose name resolves to `local` in namespace `uri`.
pub fn get_element_ns(
    doc: &Document,
    parent: ElementId,
    local: &str,
    uri: Option<&str>,
) -> Option<ElementId> {
    doc.children(parent)
        .iter()
        .copied()
        .find(|&child| element_matches(doc, child, local, uri))
}

/// Look up an attribute by local name and namespace. Per the namespace
/// rules an unprefixed attribute is in no namespace, so a `uri` match
/// requires an explicit prefix on the attribute.
pub fn attribute_ns<'d>(
    doc: &'d Document,
    id: ElementId,
    local: &str,
    uri: Option<&str>,
) -> Option<&'d crate::value::Value> {
    match uri {
        None => doc.attribute(id, local),
        Some(uri) => doc.attributes(id).find_map(|(name, value)| {
            match split_qname(name) {
                (Some(prefix), name_local)
                    if name_local == local
                        && namespace_uri(doc, id, Some(prefix)).as_deref() == Some(uri) =>
                {
                    Some(value)
                }
                _ => None,
            }
        }),
    }
}

/// Remove `xmlns:` declarations in the subtree that repeat an identical
/// binding already in scope from an ancestor.
pub fn purge_namespaces(doc: &mut Document, id: ElementId) -> XmlResult<usize> {
    let mut purged = 0;
    let mut redundant: Vec<String> = Vec::new();
    for (name, value) in doc.attributes(id) {
        if let Some(prefix) = name.strip_prefix("xmlns:") {
            if let Some(parent) = doc.parent(id) {
                let bound = value.text();
                if namespace_uri(doc, parent, Some(prefix)).as_deref() == Some(bound.as_str()) {
                    redundant.push(name.to_string());
                }
            }
        }
    }
    for name in redundant {
        doc.remove_attribute(id, &name)?;
        purged += 1;
    }
    for child in doc.children(id).to_vec() {
        purged += purge_namespaces(doc, child)?;
    }
    Ok(purged)
}
