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

//! # SXML - Simple XML processing engine
//!
//! SXML turns raw XML text into a mutable, navigable document tree and
//! turns that tree back into pretty-printed text or a compact binary
//! form. It targets configuration-style XML: a pragmatic grammar subset
//! with paths, namespaces and a structural override/merge algorithm,
//! not full XML 1.0 conformance.
//!
//! ## Quick Start
//!
//! ```rust
//! use sxml::{parse, path, to_pretty_text};
//!
//! let doc = parse("<config><cache><size>100</size></cache></config>").unwrap();
//!
//! let size = path::find_element(&doc, doc.root(), "cache/size")
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(doc.value(size).as_int(), Some(100));
//!
//! let pretty = to_pretty_text(&doc);
//! assert!(pretty.contains("  <cache>"));
//! ```
//!
//! ## Crates
//!
//! - `sxml-core`: lexer, parser, document model, tree algorithms
//! - `sxml-text`: text serialization (compact and pretty layouts)
//! - `sxml-wire`: compact binary serialization

mod error_ext;

pub use error_ext::XmlErrorExt;

// Core model and parsing
pub use sxml_core::{
    parse, parse_with_options, Document, ElementId, Limits, ParseOptions, ParseOptionsBuilder,
    Scalar, ScalarKind, SchemaValidator, Value, XmlError, XmlErrorKind, XmlResult,
};

// Tree algorithm modules
pub use sxml_core::{compare, convert, lex, name, namespace, overlay, path, uri, validate};

// Serialization
pub use sxml_text::{write_document, write_document_with_config, write_element, WriteConfig};
pub use sxml_wire::{decode_document, decode_element, encode_document, encode_element};

/// Serialize a document in the compact single-line text layout.
pub fn to_text(doc: &Document) -> String {
    sxml_text::write_document_with_config(doc, &WriteConfig::new())
}

/// Serialize a document in the pretty indented text layout.
pub fn to_pretty_text(doc: &Document) -> String {
    sxml_text::write_document_with_config(doc, &WriteConfig::pretty())
}

/// Serialize a document in the compact binary form.
pub fn to_binary(doc: &Document) -> Vec<u8> {
    sxml_wire::encode_document(doc)
}

/// Deserialize a document from its compact binary form.
pub fn from_binary(bytes: &[u8]) -> XmlResult<Document> {
    sxml_wire::decode_document(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Facade helper tests ====================

    #[test]
    fn test_text_round_trip() {
        let doc = parse("<a x='1'><b>hi</b></a>").unwrap();
        let reparsed = parse(&to_text(&doc)).unwrap();
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn test_pretty_text_is_indented() {
        let doc = parse("<a><b>hi</b></a>").unwrap();
        let pretty = to_pretty_text(&doc);
        assert!(pretty.contains("\n  <b>"));
    }

    #[test]
    fn test_binary_round_trip() {
        let doc = parse("<a x='1'><b>hi</b></a>").unwrap();
        let decoded = from_binary(&to_binary(&doc)).unwrap();
        assert_eq!(doc, decoded);
    }

    #[test]
    fn test_override_through_facade() {
        let mut base = parse("<c><host>a</host></c>").unwrap();
        let over = parse("<c><host>b</host></c>").unwrap();
        let (base_root, over_root) = (base.root(), over.root());
        overlay::override_element(&mut base, base_root, &over, over_root, None).unwrap();
        let host = base.get_element(base.root(), "host").unwrap();
        assert_eq!(base.value(host).text(), "b");
    }
}
