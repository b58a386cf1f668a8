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

//! Token definitions.

use std::fmt;

/// The kind of a lexed token.
///
/// Comments, processing instructions and CDATA sections are scanned
/// atomically into a single token; their bodies are carried raw and
/// interpreted by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// `<?xml` opening an XML declaration.
    XmlDeclStart,
    /// `?>` closing an XML declaration.
    PiStop,
    /// A processing instruction other than the XML declaration; carries
    /// the target name. The body is discarded.
    Pi(String),
    /// `<!DOCTYPE`.
    DoctypeStart,
    /// `<` opening a start tag.
    ElementStart,
    /// `</` opening an end tag.
    EndTagStart,
    /// `>` closing a tag.
    ElementStop,
    /// `/>` closing an empty-element tag.
    EmptyStop,
    /// `=` between an attribute name and its value.
    Equals,
    /// An element or attribute name.
    Name(String),
    /// A quoted literal, raw (entity references not yet decoded),
    /// without the surrounding quotes.
    Literal(String),
    /// Raw character data between tags.
    CharData(String),
    /// A comment body, raw, without the `<!--` and `-->` delimiters.
    Comment(String),
    /// A CDATA section body, without the delimiters.
    CData(String),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::XmlDeclStart => write!(f, "'<?xml'"),
            Self::PiStop => write!(f, "'?>'"),
            Self::Pi(target) => write!(f, "processing instruction <?{}?>", target),
            Self::DoctypeStart => write!(f, "'<!DOCTYPE'"),
            Self::ElementStart => write!(f, "'<'"),
            Self::EndTagStart => write!(f, "'</'"),
            Self::ElementStop => write!(f, "'>'"),
            Self::EmptyStop => write!(f, "'/>'"),
            Self::Equals => write!(f, "'='"),
            Self::Name(name) => write!(f, "name '{}'", name),
            Self::Literal(_) => write!(f, "quoted literal"),
            Self::CharData(_) => write!(f, "character data"),
            Self::Comment(_) => write!(f, "comment"),
            Self::CData(_) => write!(f, "CDATA section"),
        }
    }
}

/// A token with its source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// 1-based line of the token's first character.
    pub line: usize,
    /// 1-based column of the token's first character.
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize, column: usize) -> Self {
        Self { kind, line, column }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Token display tests ====================

    #[test]
    fn test_display_punctuation() {
        assert_eq!(format!("{}", TokenKind::ElementStart), "'<'");
        assert_eq!(format!("{}", TokenKind::EmptyStop), "'/>'");
        assert_eq!(format!("{}", TokenKind::EndTagStart), "'</'");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(format!("{}", TokenKind::Name("a".into())), "name 'a'");
    }

    #[test]
    fn test_token_position() {
        let t = Token::new(TokenKind::Equals, 3, 9);
        assert_eq!((t.line, t.column), (3, 9));
    }
}
