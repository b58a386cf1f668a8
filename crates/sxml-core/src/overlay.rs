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

//! Document overlay: apply an override tree on top of a base tree.
//!
//! Children are matched by name plus identity. Identity is the full
//! attribute set, or the value of a single designated identity
//! attribute when one is given. For each override child:
//!
//! - an empty child (no value, attributes or non-empty descendants) is
//!   skipped entirely;
//! - with no base match, a deep copy is appended;
//! - with exactly one base match, a terminal override replaces the
//!   match's value, a homogeneous sequence of plain values replaces the
//!   match's same-named children wholesale, and anything else merges
//!   recursively;
//! - more than one base match is an ambiguity error, as is a duplicate
//!   identity among the override's own siblings.

use std::collections::BTreeMap;

use crate::document::{Document, ElementId};
use crate::error::{XmlError, XmlResult};
use crate::path::is_empty;

#[derive(Debug, PartialEq, Eq)]
enum Identity {
    /// All attributes, order-insensitive, in canonical string form.
    Full(BTreeMap<String, String>),
    /// The designated identity attribute's value (absent on elements
    /// that do not carry it).
    Id(Option<String>),
}

fn identity_of(doc: &Document, id: ElementId, id_attr: Option<&str>) -> Identity {
    match id_attr {
        None => Identity::Full(
            doc.attributes(id)
                .map(|(name, value)| (name.to_string(), value.text()))
                .collect(),
        ),
        Some(attr) => Identity::Id(doc.attribute(id, attr).map(|v| v.text())),
    }
}

/// True for a non-empty run of same-named elements carrying no
/// attributes and no children (a plain value list).
pub fn is_simple_sequence(doc: &Document, ids: &[ElementId]) -> bool {
    let first = match ids.first() {
        Some(&first) => first,
        None => return false,
    };
    let name = doc.name(first);
    ids.iter().all(|&id| {
        doc.name(id) == name && doc.attribute_count(id) == 0 && doc.children(id).is_empty()
    })
}

/// Apply `over` (in `over_doc`) on top of `base`.
pub fn override_element(
    doc: &mut Document,
    base: ElementId,
    over_doc: &Document,
    over: ElementId,
    id_attr: Option<&str>,
) -> XmlResult<()> {
    let over_children = over_doc.children(over).to_vec();
    for &child in &over_children {
        if is_empty(over_doc, child) {
            continue;
        }
        let name = over_doc.name(child).to_string();
        let identity = identity_of(over_doc, child, id_attr);

        // The override's own siblings must identify distinct targets.
        let duplicated = over_children.iter().any(|&sibling| {
            sibling != child
                && !is_empty(over_doc, sibling)
                && over_doc.name(sibling) == name
                && identity_of(over_doc, sibling, id_attr) == identity
        });
        if duplicated {
            return Err(XmlError::ambiguity(format!(
                "override element <{}> does not have a unique identity",
                name
            )));
        }

        let matches: Vec<ElementId> = doc
            .children(base)
            .iter()
            .copied()
            .filter(|&candidate| {
                doc.name(candidate) == name
                    && identity_of(doc, candidate, id_attr) == identity
            })
            .collect();
        match matches.as_slice() {
            [] => {
                doc.copy_subtree(base, over_doc, child)?;
            }
            [target] => {
                apply_to_match(doc, *target, over_doc, child, id_attr)?;
            }
            _ => {
                return Err(XmlError::ambiguity(format!(
                    "override element <{}> matches more than one base element",
                    name
                )));
            }
        }
    }
    Ok(())
}

fn apply_to_match(
    doc: &mut Document,
    target: ElementId,
    over_doc: &Document,
    child: ElementId,
    id_attr: Option<&str>,
) -> XmlResult<()> {
    let kids = over_doc.children(child).to_vec();
    if kids.is_empty() {
        // Terminal override: the value replaces whatever the base had.
        if let Some(scalar) = over_doc.value(child).scalar() {
            for old in doc.children(target).to_vec() {
                doc.remove_child(target, old)?;
            }
            doc.set_value(target, scalar.clone())?;
        }
        return Ok(());
    }
    if !doc.value(target).is_empty() {
        doc.clear_value(target)?;
    }
    if is_simple_sequence(over_doc, &kids) {
        // A plain value list replaces the base's same-named children
        // wholesale rather than merging pairwise.
        let seq_name = over_doc.name(kids[0]).to_string();
        doc.remove_elements(target, &seq_name)?;
        for &kid in &kids {
            doc.copy_subtree(target, over_doc, kid)?;
        }
        Ok(())
    } else {
        override_element(doc, target, over_doc, child, id_attr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::XmlErrorKind;
    use crate::parser::parse;

    fn apply(base: &str, over: &str, id_attr: Option<&str>) -> XmlResult<Document> {
        let mut doc = parse(base)?;
        let over_doc = parse(over)?;
        let base_root = doc.root();
        let over_root = over_doc.root();
        override_element(&mut doc, base_root, &over_doc, over_root, id_attr)?;
        Ok(doc)
    }

    // ==================== Terminal override tests ====================

    #[test]
    fn test_value_overridden() {
        let doc = apply("<c><level>5</level></c>", "<c><level>9</level></c>", None).unwrap();
        let level = doc.get_element(doc.root(), "level").unwrap();
        assert_eq!(doc.value(level).text(), "9");
    }

    #[test]
    fn test_terminal_override_clears_children() {
        let doc = apply(
            "<c><item><sub>x</sub></item></c>",
            "<c><item>flat</item></c>",
            None,
        )
        .unwrap();
        let item = doc.get_element(doc.root(), "item").unwrap();
        assert_eq!(doc.value(item).text(), "flat");
        assert!(doc.children(item).is_empty());
    }

    // ==================== Append tests ====================

    #[test]
    fn test_unmatched_child_appended() {
        let doc = apply("<c><a>1</a></c>", "<c><b>2</b></c>", None).unwrap();
        let root = doc.root();
        assert_eq!(doc.children(root).len(), 2);
        let b = doc.get_element(root, "b").unwrap();
        assert_eq!(doc.value(b).text(), "2");
    }

    #[test]
    fn test_different_identity_appended() {
        let doc = apply(
            r#"<c><e k="1">a</e></c>"#,
            r#"<c><e k="2">b</e></c>"#,
            None,
        )
        .unwrap();
        assert_eq!(doc.children(doc.root()).len(), 2);
    }

    // ==================== Empty-override tests ====================

    #[test]
    fn test_empty_override_child_is_noop() {
        let doc = apply("<c><a>1</a></c>", "<c><a/></c>", None).unwrap();
        let a = doc.get_element(doc.root(), "a").unwrap();
        assert_eq!(doc.value(a).text(), "1");
        assert_eq!(doc.children(doc.root()).len(), 1);
    }

    #[test]
    fn test_empty_override_tree_is_noop() {
        let base = "<c><a>1</a><b x='y'/></c>";
        let doc = apply(base, "<c/>", None).unwrap();
        assert_eq!(doc.children(doc.root()).len(), 2);
    }

    // ==================== Recursive merge tests ====================

    #[test]
    fn test_deep_merge() {
        let doc = apply(
            "<c><s><a>1</a><b>2</b></s></c>",
            "<c><s><b>9</b><d>4</d></s></c>",
            None,
        )
        .unwrap();
        let s = doc.get_element(doc.root(), "s").unwrap();
        let get = |n: &str| {
            let id = doc.get_element(s, n).unwrap();
            doc.value(id).text()
        };
        assert_eq!(get("a"), "1");
        assert_eq!(get("b"), "9");
        assert_eq!(get("d"), "4");
    }

    #[test]
    fn test_merge_clears_base_value_for_container() {
        let doc = apply("<c><s>old</s></c>", "<c><s><a>1</a></s></c>", None).unwrap();
        let s = doc.get_element(doc.root(), "s").unwrap();
        assert!(doc.value(s).is_empty());
        assert_eq!(doc.children(s).len(), 1);
    }

    // ==================== Simple sequence tests ====================

    #[test]
    fn test_simple_sequence_replaced_wholesale() {
        let doc = apply(
            "<c><hosts><host>a</host><host>b</host><host>c</host></hosts></c>",
            "<c><hosts><host>x</host><host>y</host></hosts></c>",
            None,
        )
        .unwrap();
        let hosts = doc.get_element(doc.root(), "hosts").unwrap();
        let values: Vec<String> = doc
            .children(hosts)
            .iter()
            .map(|&h| doc.value(h).text())
            .collect();
        assert_eq!(values, vec!["x", "y"]);
    }

    #[test]
    fn test_sequence_with_attributes_merges_instead() {
        // Attributes give the children distinct identities, so this is
        // not a simple sequence and the lists merge.
        let doc = apply(
            r#"<c><l><i n="1">a</i></l></c>"#,
            r#"<c><l><i n="2">b</i></l></c>"#,
            None,
        )
        .unwrap();
        let l = doc.get_element(doc.root(), "l").unwrap();
        assert_eq!(doc.children(l).len(), 2);
    }

    // ==================== Identity attribute tests ====================

    #[test]
    fn test_id_attribute_matching() {
        let doc = apply(
            r#"<c><e id="1" extra="x"><v>a</v></e><e id="2"><v>b</v></e></c>"#,
            r#"<c><e id="2"><v>B</v></e></c>"#,
            Some("id"),
        )
        .unwrap();
        let root = doc.root();
        let elems = doc.get_elements(root, "e");
        assert_eq!(elems.len(), 2);
        let v2 = doc.get_element(elems[1], "v").unwrap();
        assert_eq!(doc.value(v2).text(), "B");
    }

    #[test]
    fn test_id_attribute_new_identity_appended() {
        let doc = apply(
            r#"<c><e id="1"><v>a</v></e></c>"#,
            r#"<c><e id="3"><v>c</v></e></c>"#,
            Some("id"),
        )
        .unwrap();
        assert_eq!(doc.get_elements(doc.root(), "e").len(), 2);
    }

    // ==================== Ambiguity tests ====================

    #[test]
    fn test_duplicate_override_identity_is_error() {
        let err = apply(
            "<c><a>1</a></c>",
            "<c><a>x</a><a>y</a></c>",
            None,
        )
        .unwrap_err();
        assert_eq!(err.kind, XmlErrorKind::Ambiguity);
    }

    #[test]
    fn test_ambiguous_base_match_is_error() {
        let err = apply(
            "<c><a><v>1</v></a><a><v>2</v></a></c>",
            "<c><a><v>9</v></a></c>",
            None,
        )
        .unwrap_err();
        assert_eq!(err.kind, XmlErrorKind::Ambiguity);
    }

    // ==================== is_simple_sequence tests ====================

    #[test]
    fn test_is_simple_sequence() {
        let doc = parse("<l><i>1</i><i>2</i></l>").unwrap();
        let kids = doc.children(doc.root()).to_vec();
        assert!(is_simple_sequence(&doc, &kids));
    }

    #[test]
    fn test_mixed_names_not_simple() {
        let doc = parse("<l><i>1</i><j>2</j></l>").unwrap();
        let kids = doc.children(doc.root()).to_vec();
        assert!(!is_simple_sequence(&doc, &kids));
        assert!(!is_simple_sequence(&doc, &[]));
    }
}
