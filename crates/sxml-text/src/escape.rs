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

//! Escaping for attribute and content text.
//!
//! Escaping is minimal: only what the reader would otherwise misparse
//! is encoded. In content, leading and trailing whitespace is written
//! as numeric character references so whitespace-trimming parsers
//! cannot eat it, and `>` is only escaped where a preceding `]]` would
//! otherwise form a CDATA terminator.

use sxml_core::name::is_xml_whitespace;

/// True when content needs escaping (or a CDATA section): whitespace at
/// either edge, any `<` or `&`, or a `]]>` sequence (which would read
/// back as a CDATA terminator).
pub fn content_requires_escape(value: &str) -> bool {
    let mut chars = value.chars();
    let first = match chars.next() {
        Some(first) => first,
        None => return false,
    };
    let last = value.chars().next_back().unwrap_or(first);
    is_xml_whitespace(first)
        || is_xml_whitespace(last)
        || value.contains('<')
        || value.contains('&')
        || value.contains("]]>")
}

/// Escape an attribute value for writing between `quote` characters.
///
/// Only the active quote, control characters, and `<`, `>`, `&` are
/// escaped; the other quote character passes through.
pub fn encode_attribute(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch == quote {
            out.push_str(if quote == '\'' { "&apos;" } else { "&quot;" });
        } else if ch <= '\u{1F}' {
            out.push_str(&format!("&#x{:X};", ch as u32));
        } else {
            match ch {
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '&' => out.push_str("&amp;"),
                other => out.push(other),
            }
        }
    }
    out
}

/// Single-quote a string as an attribute literal.
pub fn quote(value: &str) -> String {
    format!("'{}'", encode_attribute(value, '\''))
}

/// Escape element content.
///
/// Content needing no escape is returned as-is. Otherwise, when
/// `prefer_block` is set and the value does not contain `]]>`, the
/// whole value is wrapped in a CDATA section; failing that, edge
/// whitespace becomes numeric references and the middle is minimally
/// escaped.
pub fn encode_content(value: &str, prefer_block: bool) -> String {
    if !content_requires_escape(value) {
        return value.to_string();
    }
    if prefer_block && !value.contains("]]>") {
        return format!("<![CDATA[{}]]>", value);
    }
    let middle_start = value.len() - value.trim_start_matches(is_xml_whitespace).len();
    let middle_end = value.trim_end_matches(is_xml_whitespace).len().max(middle_start);

    let mut out = String::with_capacity(value.len() + 16);
    encode_whitespace(&mut out, &value[..middle_start]);
    escape_middle(&mut out, &value[middle_start..middle_end]);
    encode_whitespace(&mut out, &value[middle_end..]);
    out
}

fn encode_whitespace(out: &mut String, ws: &str) {
    for ch in ws.chars() {
        out.push_str(match ch {
            '\u{09}' => "&#x09;",
            '\u{0A}' => "&#x0A;",
            '\u{0D}' => "&#x0D;",
            _ => "&#x20;",
        });
    }
}

fn escape_middle(out: &mut String, s: &str) {
    // Count of consecutive ']' immediately behind the cursor; two or
    // more means a following '>' must not be written raw.
    let mut brackets = 0usize;
    for ch in s.chars() {
        match ch {
            '<' => {
                out.push_str("&lt;");
                brackets = 0;
            }
            '&' => {
                out.push_str("&amp;");
                brackets = 0;
            }
            '>' if brackets >= 2 => {
                out.push_str("&gt;");
                brackets = 0;
            }
            ']' => {
                out.push(']');
                brackets += 1;
            }
            other => {
                out.push(other);
                brackets = 0;
            }
        }
    }
}
