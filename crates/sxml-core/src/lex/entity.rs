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

//! Entity reference decoding.
//!
//! The five predefined entities and numeric character references (decimal
//! `&#NN;` and hex `&#xHH;`, code points up to U+FFFF) are decoded; an
//! unrecognized named reference passes through unchanged. A `&` with no
//! terminating `;` is an error.

use std::borrow::Cow;

use crate::error::{XmlError, XmlResult};

/// Decode entity references in attribute literal text.
pub fn decode_attribute(s: &str, line: usize) -> XmlResult<Cow<'_, str>> {
    decode(s, line)
}

/// Decode entity references in element character data.
pub fn decode_content(s: &str, line: usize) -> XmlResult<Cow<'_, str>> {
    decode(s, line)
}

fn decode(s: &str, line: usize) -> XmlResult<Cow<'_, str>> {
    if !s.contains('&') {
        return Ok(Cow::Borrowed(s));
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        let semi = tail.find(';').ok_or_else(|| {
            XmlError::lex("entity reference is missing the terminating ';'", line)
        })?;
        let entity = &tail[..semi];
        match entity {
            "amp" => out.push('&'),
            "apos" => out.push('\''),
            "gt" => out.push('>'),
            "lt" => out.push('<'),
            "quot" => out.push('"'),
            _ if entity.starts_with('#') => {
                out.push(decode_char_ref(&entity[1..], line)?);
            }
            _ => {
                // Unknown named reference passes through as-is.
                out.push('&');
                out.push_str(entity);
                out.push(';');
            }
        }
        rest = &tail[semi + 1..];
    }
    out.push_str(rest);
    Ok(Cow::Owned(out))
}

fn decode_char_ref(digits: &str, line: usize) -> XmlResult<char> {
    let code = if digits.starts_with('x') || digits.starts_with('X') {
        u32::from_str_radix(&digits[1..], 16)
    } else {
        digits.parse::<u32>()
    }
    .map_err(|_| XmlError::lex(format!("illegal character reference: &#{};", digits), line))?;
    if code > 0xFFFF {
        return Err(XmlError::lex(
            format!("character reference out of range: &#{};", digits),
            line,
        ));
    }
    char::from_u32(code).ok_or_else(|| {
        XmlError::lex(format!("illegal character reference: &#{};", digits), line)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Named entity tests ====================

    #[test]
    fn test_decode_named_entities() {
        assert_eq!(
            decode_content("&lt;a&gt; &amp; &quot;b&quot; &apos;c&apos;", 1).unwrap(),
            "<a> & \"b\" 'c'"
        );
    }

    #[test]
    fn test_decode_no_entities_borrows() {
        let decoded = decode_content("plain text", 1).unwrap();
        assert!(matches!(decoded, Cow::Borrowed(_)));
    }

    #[test]
    fn test_unknown_entity_passes_through() {
        assert_eq!(decode_content("a &nbsp; b", 1).unwrap(), "a &nbsp; b");
    }

    // ==================== Numeric reference tests ====================

    #[test]
    fn test_decode_decimal_reference() {
        assert_eq!(decode_content("&#65;&#66;", 1).unwrap(), "AB");
    }

    #[test]
    fn test_decode_hex_reference() {
        assert_eq!(decode_content("&#x41;&#X42;", 1).unwrap(), "AB");
        assert_eq!(decode_content("&#x20AC;", 1).unwrap(), "\u{20AC}");
    }

    #[test]
    fn test_reference_out_of_range() {
        assert!(decode_content("&#x10000;", 1).is_err());
        assert!(decode_content("&#70000;", 1).is_err());
    }

    #[test]
    fn test_reference_surrogate_rejected() {
        assert!(decode_content("&#xD800;", 1).is_err());
    }

    #[test]
    fn test_reference_not_a_number() {
        assert!(decode_content("&#zz;", 1).is_err());
    }

    // ==================== Malformed reference tests ====================

    #[test]
    fn test_missing_semicolon_is_error() {
        let err = decode_attribute("a & b", 7).unwrap_err();
        assert_eq!(err.line, 7);
    }

    #[test]
    fn test_attribute_and_content_agree() {
        let s = "&lt;x&gt;";
        assert_eq!(
            decode_attribute(s, 1).unwrap(),
            decode_content(s, 1).unwrap()
        );
    }
}
