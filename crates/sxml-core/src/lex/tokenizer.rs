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

//! Context-sensitive tokenizer.
//!
//! XML lexing depends on position: between tags the input is character
//! data broken only by `<`, while inside a tag it is names, `=` and
//! quoted literals with insignificant whitespace. The tokenizer tracks
//! which context it is in and switches on the tag delimiters it emits.
//!
//! Comments, processing instructions and CDATA sections are scanned
//! atomically so their bodies can never be misread as markup.

use crate::error::{XmlError, XmlResult};
use crate::lex::source::Source;
use crate::lex::tokens::{Token, TokenKind};
use crate::name::{is_name_char, is_name_start, is_xml_whitespace};

pub struct Tokenizer<'a> {
    source: Source<'a>,
    in_tag: bool,
    putback: Vec<Token>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            source: Source::new(text),
            in_tag: false,
            putback: Vec::new(),
        }
    }

    /// Current line, for error reporting.
    pub fn line(&self) -> usize {
        self.source.line()
    }

    /// Push a token back; it is returned by the next call to [`next`].
    ///
    /// [`next`]: Tokenizer::next
    pub fn put_back(&mut self, token: Token) {
        self.putback.push(token);
    }

    /// Produce the next token, or `None` at end of input.
    pub fn next(&mut self) -> XmlResult<Option<Token>> {
        if let Some(token) = self.putback.pop() {
            return Ok(Some(token));
        }
        if self.in_tag {
            self.next_in_tag().map(Some)
        } else {
            self.next_in_content()
        }
    }

    fn next_in_content(&mut self) -> XmlResult<Option<Token>> {
        if self.source.is_eof() {
            return Ok(None);
        }
        let (line, column) = (self.source.line(), self.source.column());
        if !self.source.starts_with("<") {
            let text = self.source.take_until_byte(b'<').to_string();
            return Ok(Some(Token::new(TokenKind::CharData(text), line, column)));
        }
        if self.source.eat("<!--") {
            let body = self
                .source
                .take_until("-->")
                .ok_or_else(|| XmlError::lex("unterminated comment", line))?;
            if body.contains("--") {
                return Err(XmlError::lex("'--' inside comment", line));
            }
            return Ok(Some(Token::new(
                TokenKind::Comment(body.to_string()),
                line,
                column,
            )));
        }
        if self.source.eat("<![CDATA[") {
            let body = self
                .source
                .take_until("]]>")
                .ok_or_else(|| XmlError::lex("unterminated CDATA section", line))?;
            return Ok(Some(Token::new(
                TokenKind::CData(body.to_string()),
                line,
                column,
            )));
        }
        if self.source.eat("<!DOCTYPE") {
            self.in_tag = true;
            return Ok(Some(Token::new(TokenKind::DoctypeStart, line, column)));
        }
        if self.source.starts_with("<!") {
            return Err(XmlError::lex("unexpected markup declaration", line));
        }
        if self.source.eat("<?") {
            let target = self.scan_name(line)?;
            if target.eq_ignore_ascii_case("xml") {
                self.in_tag = true;
                return Ok(Some(Token::new(TokenKind::XmlDeclStart, line, column)));
            }
            self.source
                .take_until("?>")
                .ok_or_else(|| XmlError::lex("unterminated processing instruction", line))?;
            return Ok(Some(Token::new(TokenKind::Pi(target), line, column)));
        }
        if self.source.eat("</") {
            self.in_tag = true;
            return Ok(Some(Token::new(TokenKind::EndTagStart, line, column)));
        }
        self.source.bump();
        self.in_tag = true;
        Ok(Some(Token::new(TokenKind::ElementStart, line, column)))
    }

    fn next_in_tag(&mut self) -> XmlResult<Token> {
        self.source.take_while(is_xml_whitespace);
        let (line, column) = (self.source.line(), self.source.column());
        if self.source.is_eof() {
            return Err(XmlError::lex("unexpected end of input inside tag", line));
        }
        if self.source.eat("/>") {
            self.in_tag = false;
            return Ok(Token::new(TokenKind::EmptyStop, line, column));
        }
        if self.source.eat("?>") {
            self.in_tag = false;
            return Ok(Token::new(TokenKind::PiStop, line, column));
        }
        if self.source.eat(">") {
            self.in_tag = false;
            return Ok(Token::new(TokenKind::ElementStop, line, column));
        }
        if self.source.eat("=") {
            return Ok(Token::new(TokenKind::Equals, line, column));
        }
        match self.source.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.source.bump();
                let mut delim = [0u8; 4];
                let body = self
                    .source
                    .take_until(quote.encode_utf8(&mut delim))
                    .ok_or_else(|| XmlError::lex("unterminated quoted literal", line))?;
                Ok(Token::new(
                    TokenKind::Literal(body.to_string()),
                    line,
                    column,
                ))
            }
            Some(ch) if is_name_start(ch) => {
                let name = self.scan_name(line)?;
                Ok(Token::new(TokenKind::Name(name), line, column))
            }
            Some(ch) => Err(XmlError::lex(
                format!("unexpected character {:?} inside tag", ch),
                line,
            )
            .with_column(column)),
            None => unreachable!(),
        }
    }

    fn scan_name(&mut self, line: usize) -> XmlResult<String> {
        match self.source.peek() {
            Some(ch) if is_name_start(ch) => {}
            _ => return Err(XmlError::lex("expected a name", line)),
        }
        Ok(self.source.take_while(is_name_char).to_string())
    }

    /// Skip a DOCTYPE internal subset (`[ ... ]`) if one is present.
    /// Quoted strings inside the subset may contain `]` freely.
    pub fn skip_internal_subset(&mut self) -> XmlResult<bool> {
        self.source.take_while(is_xml_whitespace);
        if !self.source.eat("[") {
            return Ok(false);
        }
        let line = self.source.line();
        let mut quote: Option<char> = None;
        loop {
            match self.source.bump() {
                None => return Err(XmlError::lex("unterminated DOCTYPE internal subset", line)),
                Some(ch) => match quote {
                    Some(q) if ch == q => quote = None,
                    Some(_) => {}
                    None if ch == ']' => return Ok(true),
                    None if ch == '"' || ch == '\'' => quote = Some(ch),
                    None => {}
                },
            }
        }
    }
}
