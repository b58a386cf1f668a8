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

//! Document and element writer.
//!
//! Output layout per element: an element with no comment, no value and
//! no children self-closes; one with no children stays on a single line
//! (comment, then value, then end tag); one with children puts each
//! child on its own indented line. Scalar values are never broken
//! across lines, whatever their content.

use sxml_core::uri::encode_uri;
use sxml_core::{Document, ElementId};

use crate::config::WriteConfig;
use crate::escape::{encode_content, quote};

/// Write a whole document in the compact form.
pub fn write_document(doc: &Document) -> String {
    write_document_with_config(doc, &WriteConfig::default())
}

/// Write a whole document.
pub fn write_document_with_config(doc: &Document, config: &WriteConfig) -> String {
    let mut w = Writer::new(config);
    w.document(doc);
    w.out
}

/// Write a single element subtree (no declaration or DOCTYPE).
pub fn write_element(doc: &Document, id: ElementId, config: &WriteConfig) -> String {
    let mut w = Writer::new(config);
    w.element(doc, id);
    if config.pretty {
        w.out.push('\n');
    }
    w.out
}

struct Writer<'c> {
    out: String,
    config: &'c WriteConfig,
    depth: usize,
}

impl<'c> Writer<'c> {
    fn new(config: &'c WriteConfig) -> Self {
        Self {
            out: String::new(),
            config,
            depth: 0,
        }
    }

    fn break_line(&mut self) {
        if self.config.pretty {
            self.out.push('\n');
            for _ in 0..self.depth * self.config.indent_width {
                self.out.push(' ');
            }
        }
    }

    fn document(&mut self, doc: &Document) {
        if self.config.declaration {
            self.out.push_str("<?xml version='1.0'");
            if let Some(encoding) = doc.encoding() {
                self.out.push_str(" encoding=");
                self.out.push_str(&quote(encoding));
            }
            self.out.push_str("?>");
            self.break_line();
        }
        if doc.dtd_system_id().is_some() || doc.dtd_public_id().is_some() {
            self.doctype(doc);
            self.break_line();
        }
        if let Some(comment) = doc.document_comment() {
            self.comment(comment);
            self.break_line();
        }
        self.element(doc, doc.root());
        if self.config.pretty {
            self.out.push('\n');
        }
    }

    fn doctype(&mut self, doc: &Document) {
        self.out.push_str("<!DOCTYPE ");
        self.out.push_str(doc.name(doc.root()));
        if let Some(public_id) = doc.dtd_public_id() {
            self.out.push_str(" PUBLIC ");
            self.out.push_str(&quote(public_id));
        } else {
            self.out.push_str(" SYSTEM");
        }
        if let Some(system_id) = doc.dtd_system_id() {
            self.out.push(' ');
            self.out.push_str(&quote(&encode_uri(system_id)));
        }
        self.out.push('>');
    }

    fn element(&mut self, doc: &Document, id: ElementId) {
        self.out.push('<');
        self.out.push_str(doc.name(id));
        for (name, value) in doc.attributes(id) {
            self.out.push(' ');
            self.out.push_str(name);
            self.out.push('=');
            self.out.push_str(&quote(&value.text()));
        }

        let comment = doc.comment(id);
        let value = doc.value(id);
        let children = doc.children(id);
        if comment.is_none() && value.is_empty() && children.is_empty() {
            self.out.push_str("/>");
            return;
        }
        self.out.push('>');

        if children.is_empty() {
            if let Some(comment) = comment {
                self.inline_comment(comment);
            }
            if !value.is_empty() {
                let prefer_block = self.config.pretty && self.config.cdata;
                self.out.push_str(&encode_content(&value.text(), prefer_block));
            }
        } else {
            self.depth += 1;
            if let Some(comment) = comment {
                self.break_line();
                self.comment(comment);
            }
            for &child in children {
                self.break_line();
                self.element(doc, child);
            }
            self.depth -= 1;
            self.break_line();
        }
        self.out.push_str("</");
        self.out.push_str(doc.name(id));
        self.out.push('>');
    }

    /// A comment on a childless element, kept on the element's line.
    fn inline_comment(&mut self, body: &str) {
        self.out.push_str("<!--");
        self.out.push_str(body);
        self.out.push_str("-->");
    }

    /// A free-standing comment; pretty mode breaks multi-line bodies.
    fn comment(&mut self, body: &str) {
        if !self.config.pretty {
            self.inline_comment(body);
            return;
        }
        if body.contains('\n') {
            self.out.push_str("<!--");
            for line in body.lines() {
                self.break_line();
                self.out.push_str(line);
            }
            self.break_line();
            self.out.push_str("-->");
        } else {
            self.out.push_str("<!-- ");
            self.out.push_str(body);
            self.out.push_str(" -->");
        }
    }
}
