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

//! XML name grammar and qualified-name handling.
//!
//! Names follow XML 1.0 section 2.3 [4] without the CombiningChar and
//! Extender classes: the first character must be a letter, `_` or `:`;
//! subsequent characters may additionally be digits, `.` or `-`.

use crate::error::{XmlError, XmlResult};

/// Check whether a character can start an XML name.
pub fn is_name_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == ':'
}

/// Check whether a character can appear in an XML name after the first.
pub fn is_name_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '.' | '-' | '_' | ':')
}

/// Validate an XML element or attribute name.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(ch) if is_name_start(ch) => {}
        _ => return false,
    }
    chars.all(is_name_char)
}

/// Validate a name, producing a `NameError` on failure.
pub fn check_name(name: &str) -> XmlResult<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(XmlError::name(format!("illegal XML name: {:?}", name)))
    }
}

/// Check whether a character is XML whitespace (XML 1.0 section 2.3).
pub fn is_xml_whitespace(ch: char) -> bool {
    matches!(ch, '\u{09}' | '\u{0A}' | '\u{0D}' | '\u{20}')
}

/// Trim leading and trailing XML whitespace.
pub fn trim_xml(s: &str) -> &str {
    s.trim_matches(is_xml_whitespace)
}

/// Validate an encoding declaration: `[A-Za-z] ([A-Za-z0-9._] | '-')*`.
pub fn is_valid_encoding(encoding: &str) -> bool {
    let mut chars = encoding.chars();
    match chars.next() {
        Some(ch) if ch.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-'))
}

/// Validate a DOCTYPE public identifier (XML 1.0 PubidChar set).
pub fn is_valid_public_id(id: &str) -> bool {
    id.chars().all(|ch| {
        ch.is_ascii_alphanumeric()
            || matches!(
                ch,
                '\u{20}'
                    | '\u{0D}'
                    | '\u{0A}'
                    | '-'
                    | '\''
                    | '('
                    | ')'
                    | '+'
                    | ','
                    | '.'
                    | '/'
                    | ':'
                    | '='
                    | '?'
                    | ';'
                    | '!'
                    | '*'
                    | '#'
                    | '@'
                    | '$'
                    | '_'
                    | '%'
            )
    })
}

/// Validate a comment: comments may not contain `--` (XML 1.0 section 2.5).
pub fn is_valid_comment(comment: &str) -> bool {
    !comment.contains("--")
}

/// Split a qualified name into its optional prefix and local part.
pub fn split_qname(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) if !prefix.is_empty() && !local.is_empty() => {
            (Some(prefix), local)
        }
        _ => (None, name),
    }
}

/// Build a universal (prefix-qualified) name from a local name and prefix.
pub fn universal_name(local: &str, prefix: Option<&str>) -> String {
    match prefix {
        Some(p) if !local.is_empty() => format!("{}:{}", p, local),
        _ => local.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Name validation tests ====================

    #[test]
    fn test_valid_simple_name() {
        assert!(is_valid_name("element"));
        assert!(is_valid_name("a"));
        assert!(is_valid_name("_private"));
        assert!(is_valid_name(":odd"));
    }

    #[test]
    fn test_valid_name_with_punctuation() {
        assert!(is_valid_name("cache-config"));
        assert!(is_valid_name("a.b.c"));
        assert!(is_valid_name("ns:local"));
        assert!(is_valid_name("name2"));
    }

    #[test]
    fn test_invalid_name_empty() {
        assert!(!is_valid_name(""));
    }

    #[test]
    fn test_invalid_name_leading_digit() {
        assert!(!is_valid_name("2fast"));
    }

    #[test]
    fn test_invalid_name_leading_dash() {
        assert!(!is_valid_name("-x"));
        assert!(!is_valid_name(".x"));
    }

    #[test]
    fn test_invalid_name_space() {
        assert!(!is_valid_name("a b"));
        assert!(!is_valid_name("a<b"));
    }

    #[test]
    fn test_valid_name_unicode_letter() {
        assert!(is_valid_name("élément"));
        assert!(is_valid_name("日本語"));
    }

    #[test]
    fn test_check_name_error_kind() {
        let err = check_name("1bad").unwrap_err();
        assert_eq!(err.kind, crate::error::XmlErrorKind::Name);
    }

    // ==================== Whitespace tests ====================

    #[test]
    fn test_xml_whitespace() {
        assert!(is_xml_whitespace(' '));
        assert!(is_xml_whitespace('\t'));
        assert!(is_xml_whitespace('\n'));
        assert!(is_xml_whitespace('\r'));
        assert!(!is_xml_whitespace('\u{0B}'));
        assert!(!is_xml_whitespace('a'));
    }

    #[test]
    fn test_trim_xml() {
        assert_eq!(trim_xml("  hi\t\n"), "hi");
        assert_eq!(trim_xml("hi"), "hi");
        assert_eq!(trim_xml(" \t\r\n"), "");
    }

    // ==================== Encoding tests ====================

    #[test]
    fn test_valid_encoding() {
        assert!(is_valid_encoding("UTF-8"));
        assert!(is_valid_encoding("ISO-8859-1"));
        assert!(is_valid_encoding("utf8"));
    }

    #[test]
    fn test_invalid_encoding() {
        assert!(!is_valid_encoding(""));
        assert!(!is_valid_encoding("8bit"));
        assert!(!is_valid_encoding("UTF 8"));
    }

    // ==================== Public id and comment tests ====================

    #[test]
    fn test_valid_public_id() {
        assert!(is_valid_public_id("-//W3C//DTD XHTML 1.0//EN"));
        assert!(!is_valid_public_id("bad\"id"));
    }

    #[test]
    fn test_comment_validity() {
        assert!(is_valid_comment("a comment"));
        assert!(is_valid_comment("-"));
        assert!(!is_valid_comment("a -- b"));
    }

    // ==================== QName tests ====================

    #[test]
    fn test_split_qname_with_prefix() {
        assert_eq!(split_qname("ns:local"), (Some("ns"), "local"));
    }

    #[test]
    fn test_split_qname_without_prefix() {
        assert_eq!(split_qname("local"), (None, "local"));
    }

    #[test]
    fn test_split_qname_degenerate() {
        assert_eq!(split_qname(":x"), (None, ":x"));
        assert_eq!(split_qname("x:"), (None, "x:"));
    }

    #[test]
    fn test_universal_name() {
        assert_eq!(universal_name("local", Some("ns")), "ns:local");
        assert_eq!(universal_name("local", None), "local");
        assert_eq!(universal_name("", Some("ns")), "");
    }
}
