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

//! Binary encoder.
//!
//! Layout per element, depth-first: the content value (type tag,
//! payload, attribute flag, mutable flag), then presence-flagged
//! sections for name, children, attributes and comment. Multi-byte
//! integers are big-endian; strings are u32-length-prefixed UTF-8;
//! decimal and date/time kinds travel as their canonical strings.

use sxml_core::{Document, ElementId, Scalar, Value};

use crate::tags::WireTag;

/// Encode a whole document (its root element subtree).
pub fn encode_document(doc: &Document) -> Vec<u8> {
    encode_element(doc, doc.root())
}

/// Encode one element subtree.
pub fn encode_element(doc: &Document, id: ElementId) -> Vec<u8> {
    let mut out = Vec::new();
    write_element(&mut out, doc, id);
    out
}

fn write_element(out: &mut Vec<u8>, doc: &Document, id: ElementId) {
    write_value(out, doc.value(id));

    // Name.
    write_flag(out, true);
    write_string(out, doc.name(id));

    // Children.
    let children = doc.children(id);
    write_flag(out, !children.is_empty());
    if !children.is_empty() {
        write_u32(out, children.len() as u32);
        for &child in children {
            write_element(out, doc, child);
        }
    }

    // Attributes.
    let attr_count = doc.attribute_count(id);
    write_flag(out, attr_count > 0);
    if attr_count > 0 {
        write_u32(out, attr_count as u32);
        for (name, value) in doc.attributes(id) {
            write_string(out, name);
            write_value(out, value);
        }
    }

    // Comment.
    match doc.comment(id) {
        Some(comment) => {
            write_flag(out, true);
            write_string(out, comment);
        }
        None => write_flag(out, false),
    }
}

fn write_value(out: &mut Vec<u8>, value: &Value) {
    match value.scalar() {
        None => out.push(WireTag::Absent as u8),
        Some(scalar) => {
            match scalar {
                Scalar::Bool(b) => {
                    out.push(WireTag::Bool as u8);
                    out.push(u8::from(*b));
                }
                Scalar::Int(n) => {
                    out.push(WireTag::Int as u8);
                    out.extend_from_slice(&n.to_be_bytes());
                }
                Scalar::Long(n) => {
                    out.push(WireTag::Long as u8);
                    out.extend_from_slice(&n.to_be_bytes());
                }
                Scalar::Double(d) => {
                    out.push(WireTag::Double as u8);
                    out.extend_from_slice(&d.to_be_bytes());
                }
                Scalar::Text(s) => {
                    out.push(WireTag::Text as u8);
                    write_string(out, s);
                }
                Scalar::Bytes(b) => {
                    out.push(WireTag::Bytes as u8);
                    write_u32(out, b.len() as u32);
                    out.extend_from_slice(b);
                }
                Scalar::Decimal(_) => {
                    out.push(WireTag::Decimal as u8);
                    write_string(out, &scalar.to_canonical_string());
                }
                Scalar::Date(_) => {
                    out.push(WireTag::Date as u8);
                    write_string(out, &scalar.to_canonical_string());
                }
                Scalar::Time(_) => {
                    out.push(WireTag::Time as u8);
                    write_string(out, &scalar.to_canonical_string());
                }
                Scalar::DateTime(_) => {
                    out.push(WireTag::DateTime as u8);
                    write_string(out, &scalar.to_canonical_string());
                }
            };
        }
    }
    write_flag(out, value.is_attribute());
    write_flag(out, value.is_mutable());
}

fn write_flag(out: &mut Vec<u8>, flag: bool) {
    out.push(u8::from(flag));
}

fn write_u32(out: &mut Vec<u8>, n: u32) {
    out.extend_from_slice(&n.to_be_bytes());
}

fn write_string(out: &mut Vec<u8>, s: &str) {
    write_u32(out, s.len() as u32);
    out.extend_from_slice(s.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Layout tests ====================

    #[test]
    fn test_minimal_element_layout() {
        let doc = Document::new("a").unwrap();
        let bytes = encode_document(&doc);
        assert_eq!(
            bytes,
            vec![
                0, // value absent
                0, 1, // value flags: not attribute, mutable
                1, // name present
                0, 0, 0, 1, b'a', // name
                0, // no children
                0, // no attributes
                0, // no comment
            ]
        );
    }

    #[test]
    fn test_int_value_big_endian() {
        let mut doc = Document::new("a").unwrap();
        let root = doc.root();
        doc.set_value(root, 0x0102_0304).unwrap();
        let bytes = encode_document(&doc);
        assert_eq!(&bytes[..5], &[2, 1, 2, 3, 4]);
    }

    #[test]
    fn test_attribute_flag_set() {
        let mut doc = Document::new("a").unwrap();
        let root = doc.root();
        doc.set_attribute(root, "k", "v").unwrap();
        let bytes = encode_document(&doc);
        // attribute section through to the trailing comment flag
        let tail = &bytes[bytes.len() - 19..];
        assert_eq!(
            tail,
            &[
                1, // attributes present
                0, 0, 0, 1, // count
                0, 0, 0, 1, b'k', // name
                6, 0, 0, 0, 1, b'v', // text value
                1, 1, // value flags: attribute, mutable
                0, // no comment
            ][..]
        );
    }

    #[test]
    fn test_immutable_flag_written() {
        let mut doc = Document::new("a").unwrap();
        doc.set_mutable(doc.root(), false);
        let bytes = encode_document(&doc);
        assert_eq!(bytes[2], 0); // mutable flag cleared
    }
}
