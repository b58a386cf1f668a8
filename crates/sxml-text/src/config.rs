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

//! Text output configuration.

/// Configuration for text output.
///
/// The default is the compact single-line form; [`WriteConfig::pretty`]
/// is the two-space-indented form meant for humans.
///
/// # Examples
///
/// ```
/// use sxml_text::WriteConfig;
///
/// let compact = WriteConfig::default();
/// assert!(!compact.pretty);
///
/// let pretty = WriteConfig::pretty().with_indent_width(4);
/// assert_eq!(pretty.indent_width, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteConfig {
    /// Emit indentation and newlines.
    ///
    /// Default: `false`
    pub pretty: bool,

    /// Spaces per indentation level (pretty mode only).
    ///
    /// Default: `2`
    pub indent_width: usize,

    /// Allow CDATA sections for values that would otherwise need heavy
    /// escaping (pretty mode only; the compact form always escapes).
    ///
    /// Default: `true`
    pub cdata: bool,

    /// Emit the `<?xml ...?>` declaration.
    ///
    /// Default: `true`
    pub declaration: bool,
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            indent_width: 2,
            cdata: true,
            declaration: true,
        }
    }
}

impl WriteConfig {
    /// Compact configuration (same as `Default`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretty configuration: two-space indentation, newlines, CDATA.
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }

    /// Set pretty mode.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Set the indentation width.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Allow or forbid CDATA sections.
    pub fn with_cdata(mut self, cdata: bool) -> Self {
        self.cdata = cdata;
        self
    }

    /// Emit or suppress the XML declaration.
    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }
}
