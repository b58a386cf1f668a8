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

//! Schema validation seam.
//!
//! Validation itself is external; the parser only offers the hook and
//! this module the plumbing to find which schemas a document claims to
//! follow.

use crate::document::Document;
use crate::error::XmlResult;
use crate::name::is_xml_whitespace;
use crate::namespace::attribute_ns;

/// The XML Schema instance namespace.
pub const XSI_URI: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Hook invoked by the parser on a freshly built document when set in
/// the parse options. Failure fails the parse.
pub trait SchemaValidator {
    fn validate(&self, source: &str, doc: &Document) -> XmlResult<()>;
}

/// Schema locations declared on the root element via
/// `xsi:schemaLocation` (namespace/location pairs; the locations are
/// returned) and `xsi:noNamespaceSchemaLocation`.
pub fn schema_locations(doc: &Document) -> Vec<String> {
    let root = doc.root();
    let mut out = Vec::new();
    if let Some(value) = attribute_ns(doc, root, "noNamespaceSchemaLocation", Some(XSI_URI)) {
        out.push(value.text());
    }
    if let Some(value) = attribute_ns(doc, root, "schemaLocation", Some(XSI_URI)) {
        let text = value.text();
        let mut parts = text.split(is_xml_whitespace).filter(|s| !s.is_empty());
        while let (Some(_namespace), Some(location)) = (parts.next(), parts.next()) {
            out.push(location.to_string());
        }
    }
    out
}
