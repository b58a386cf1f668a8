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

//! URI escaping.
//!
//! Two schemes live here. [`encode_uri`]/[`decode_uri`] is standard
//! percent-escaping of unsafe bytes, used for DOCTYPE system
//! identifiers. The compact scalar codec ([`encode_string`],
//! [`decode_string`], [`scalar_to_uri`], [`scalar_from_uri`]) packs
//! scalar values into URI-safe tokens: characters above U+00FF as `u`
//! plus four hex digits, reserved and control characters as `%` plus
//! two hex digits, and negative numbers parenthesized so `-` stays free
//! for delimiting.

use crate::convert;
use crate::error::{XmlError, XmlResult};
use crate::value::{Scalar, ScalarKind};

/// Percent-escape the unsafe bytes of a URI.
///
/// Escapes control bytes, non-ASCII bytes and the characters
/// `space < > " { } | \ ^ `` ` `` %`.
pub fn encode_uri(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        if byte <= 0x1F
            || byte >= 0x7F
            || matches!(byte, b' ' | b'<' | b'>' | b'"' | b'{' | b'}' | b'|' | b'\\' | b'^' | b'`' | b'%')
        {
            out.push('%');
            out.push_str(&format!("{:02X}", byte));
        } else {
            out.push(byte as char);
        }
    }
    out
}

/// Reverse [`encode_uri`]: decode `%HH` escapes, then the UTF-8 bytes.
pub fn decode_uri(s: &str) -> XmlResult<String> {
    let mut bytes = Vec::with_capacity(s.len());
    let mut iter = s.bytes();
    while let Some(byte) = iter.next() {
        if byte == b'%' {
            let hi = iter.next();
            let lo = iter.next();
            match (hi.and_then(hex_digit), lo.and_then(hex_digit)) {
                (Some(hi), Some(lo)) => bytes.push(hi << 4 | lo),
                _ => {
                    return Err(XmlError::conversion(format!(
                        "illegal %-escape in URI: {:?}",
                        s
                    )))
                }
            }
        } else {
            bytes.push(byte);
        }
    }
    String::from_utf8(bytes)
        .map_err(|_| XmlError::conversion(format!("URI does not decode to UTF-8: {:?}", s)))
}

fn hex_digit(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|d| d as u8)
}

fn is_reserved(ch: char) -> bool {
    matches!(
        ch,
        ' ' | ';'
            | '/'
            | '?'
            | ':'
            | '@'
            | '&'
            | '='
            | '+'
            | '$'
            | ','
            | '-'
            | '.'
            | '!'
            | '<'
            | '>'
            | '#'
            | '%'
            | '"'
            | '{'
            | '}'
            | '|'
            | '\\'
            | '^'
            | '['
            | ']'
            | '`'
            | '('
            | ')'
            | 'u'
    )
}

/// Encode a string into a URI-safe token.
pub fn encode_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if ch > '\u{FF}' {
            out.push('u');
            out.push_str(&format!("{:04X}", ch as u32));
        } else if ch <= '\u{1F}' || is_reserved(ch) {
            out.push('%');
            out.push_str(&format!("{:02X}", ch as u32));
        } else {
            out.push(ch);
        }
    }
    out
}

/// Reverse [`encode_string`].
pub fn decode_string(s: &str) -> XmlResult<String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        match ch {
            'u' => out.push(take_hex_char(&mut chars, 4, s)?),
            '%' => out.push(take_hex_char(&mut chars, 2, s)?),
            other => out.push(other),
        }
    }
    Ok(out)
}

fn take_hex_char(chars: &mut std::str::Chars<'_>, digits: usize, whole: &str) -> XmlResult<char> {
    let mut code: u32 = 0;
    for _ in 0..digits {
        let digit = chars
            .next()
            .and_then(|ch| ch.to_digit(16))
            .ok_or_else(|| {
                XmlError::conversion(format!("illegal escape in URI token: {:?}", whole))
            })?;
        code = code << 4 | digit;
    }
    char::from_u32(code)
        .ok_or_else(|| XmlError::conversion(format!("illegal escape in URI token: {:?}", whole)))
}

/// Encode a number's canonical form, parenthesizing the sign.
pub fn encode_number(canonical: &str) -> String {
    match canonical.strip_prefix('-') {
        Some(rest) => format!("({})", rest),
        None => canonical.to_string(),
    }
}

/// Reverse [`encode_number`], yielding the canonical form.
pub fn parse_number(token: &str) -> String {
    match token.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        Some(inner) => format!("-{}", inner),
        None => token.to_string(),
    }
}

/// Encode a scalar into a URI-safe token.
pub fn scalar_to_uri(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Int(_) | Scalar::Long(_) | Scalar::Double(_) | Scalar::Decimal(_) => {
            encode_number(&scalar.to_canonical_string())
        }
        other => encode_string(&other.to_canonical_string()),
    }
}

/// Decode a URI token into a scalar of the given kind.
pub fn scalar_from_uri(token: &str, kind: ScalarKind) -> XmlResult<Scalar> {
    let bad = || XmlError::conversion(format!("URI token is not a {:?}: {:?}", kind, token));
    match kind {
        ScalarKind::Bool => {
            let s = decode_string(token)?;
            convert::parse_bool(&s).map(Scalar::Bool).ok_or_else(bad)
        }
        ScalarKind::Int => convert::parse_int(&parse_number(token))
            .map(Scalar::Int)
            .ok_or_else(bad),
        ScalarKind::Long => convert::parse_long(&parse_number(token))
            .map(Scalar::Long)
            .ok_or_else(bad),
        ScalarKind::Double => convert::parse_double(&parse_number(token))
            .map(Scalar::Double)
            .ok_or_else(bad),
        ScalarKind::Decimal => convert::parse_decimal(&parse_number(token))
            .map(Scalar::Decimal)
            .ok_or_else(bad),
        ScalarKind::Text => Ok(Scalar::Text(decode_string(token)?)),
        ScalarKind::Bytes => {
            let s = decode_string(token)?;
            convert::parse_bytes(&s).map(Scalar::Bytes).ok_or_else(bad)
        }
        ScalarKind::Date => {
            let s = decode_string(token)?;
            convert::parse_date(&s).map(Scalar::Date).ok_or_else(bad)
        }
        ScalarKind::Time => {
            let s = decode_string(token)?;
            convert::parse_time(&s).map(Scalar::Time).ok_or_else(bad)
        }
        ScalarKind::DateTime => {
            let s = decode_string(token)?;
            convert::parse_datetime(&s)
                .map(Scalar::DateTime)
                .ok_or_else(bad)
        }
    }
}
