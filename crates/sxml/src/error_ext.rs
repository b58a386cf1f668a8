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

//! Source-snippet rendering for parse errors.

use std::fmt::Write;

use sxml_core::XmlError;

/// Extension methods for presenting an [`XmlError`] to humans.
pub trait XmlErrorExt {
    /// Render the error with the offending source line and a caret
    /// under the failing column.
    ///
    /// Falls back to the plain message when the error carries no
    /// source position (line 0) or the line is out of range.
    fn display_with_source(&self, source: &str) -> String;
}

impl XmlErrorExt for XmlError {
    fn display_with_source(&self, source: &str) -> String {
        let mut out = self.to_string();
        if let Some(context) = &self.context {
            let _ = write!(out, " ({context})");
        }
        if self.line == 0 {
            return out;
        }
        let Some(snippet) = source.lines().nth(self.line - 1) else {
            return out;
        };
        let gutter = format!("{:>5} | ", self.line);
        let _ = write!(out, "\n{gutter}{snippet}");
        if let Some(column) = self.column {
            let pad = gutter.len() + column.saturating_sub(1);
            let _ = write!(out, "\n{:pad$}^", "");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sxml_core::parse;

    // ==================== Rendering tests ====================

    #[test]
    fn test_snippet_includes_offending_line() {
        let source = "<a>\n  <b>\n</a>";
        let err = XmlError::syntax("mismatched end tag", 2);
        let rendered = err.display_with_source(source);
        assert!(rendered.contains("  <b>"), "{rendered}");
        assert!(rendered.contains("    2 | "));
    }

    #[test]
    fn test_parse_error_gets_a_snippet() {
        let source = "<a>\n  <b>oops</a>\n</a>";
        let err = parse(source).unwrap_err();
        let rendered = err.display_with_source(source);
        assert!(rendered.lines().count() >= 2, "{rendered}");
    }

    #[test]
    fn test_caret_under_column() {
        let err = XmlError::syntax("boom", 1).with_column(3);
        let rendered = err.display_with_source("abcdef");
        let caret_line = rendered.lines().last().unwrap();
        assert!(caret_line.ends_with('^'));
        // gutter "    1 | " is 8 wide, column 3 adds 2
        assert_eq!(caret_line.len(), 11);
    }

    #[test]
    fn test_positionless_error_unchanged() {
        let err = XmlError::name("bad name");
        assert_eq!(err.display_with_source("<a/>"), err.to_string());
    }

    #[test]
    fn test_out_of_range_line_falls_back() {
        let err = XmlError::syntax("gone", 99);
        assert_eq!(err.display_with_source("<a/>"), err.to_string());
    }

    #[test]
    fn test_context_appended() {
        let err = XmlError::syntax("boom", 0).with_context("while reading prolog");
        let rendered = err.display_with_source("");
        assert!(rendered.contains("(while reading prolog)"));
    }
}
