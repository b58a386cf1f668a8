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

//! Position-tracking character source over a borrowed string.

use memchr::memchr;

/// A forward-only cursor over the input with 1-based line and column
/// tracking. A leading UTF-8 byte-order mark is skipped on construction.
#[derive(Debug, Clone)]
pub(crate) struct Source<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Source<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let pos = if let Some(stripped) = text.strip_prefix('\u{FEFF}') {
            text.len() - stripped.len()
        } else {
            0
        };
        Self {
            text,
            pos,
            line: 1,
            column: 1,
        }
    }

    /// The unconsumed remainder of the input.
    pub(crate) fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    pub(crate) fn line(&self) -> usize {
        self.line
    }

    pub(crate) fn column(&self) -> usize {
        self.column
    }

    /// Look at the next character without consuming it.
    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume and return the next character.
    pub(crate) fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Consume `literal` if the input starts with it.
    pub(crate) fn eat(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal) {
            self.advance(literal.len());
            true
        } else {
            false
        }
    }

    pub(crate) fn starts_with(&self, literal: &str) -> bool {
        self.rest().starts_with(literal)
    }

    /// Consume up to (and including) `delim`, returning the text before
    /// it, or `None` when the delimiter never appears.
    pub(crate) fn take_until(&mut self, delim: &str) -> Option<&'a str> {
        let rest = self.rest();
        let at = rest.find(delim)?;
        let taken = &rest[..at];
        self.advance(at + delim.len());
        Some(taken)
    }

    /// Consume up to (not including) the next occurrence of `byte`, or to
    /// the end of input. The byte must be ASCII so the cut is always on a
    /// character boundary.
    pub(crate) fn take_until_byte(&mut self, byte: u8) -> &'a str {
        debug_assert!(byte.is_ascii());
        let rest = self.rest();
        let end = memchr(byte, rest.as_bytes()).unwrap_or(rest.len());
        let taken = &rest[..end];
        self.advance(end);
        taken
    }

    /// Consume characters while `pred` holds.
    pub(crate) fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let end = rest
            .char_indices()
            .find(|&(_, ch)| !pred(ch))
            .map(|(at, _)| at)
            .unwrap_or(rest.len());
        let taken = &rest[..end];
        self.advance(end);
        taken
    }

    fn advance(&mut self, bytes: usize) {
        let consumed = &self.text[self.pos..self.pos + bytes];
        for ch in consumed.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos += bytes;
    }
}
