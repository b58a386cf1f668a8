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

//! Error types for XML parsing and tree manipulation.

use std::fmt;
use thiserror::Error;

/// The kind of error that occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlErrorKind {
    /// Malformed token, unterminated construct, or bad character data.
    Lex,
    /// Expected token or name not found by the parser.
    Syntax,
    /// Invalid element or attribute name.
    Name,
    /// Mutation attempted on a read-only node or under a read-only ancestor.
    Mutability,
    /// Override identity matched more than one candidate.
    Ambiguity,
    /// Schema validation failure.
    Validation,
    /// Error during value or wire-format conversion.
    Conversion,
    /// I/O error (file operations, stream reads, etc.).
    IO,
}

impl fmt::Display for XmlErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex => write!(f, "LexError"),
            Self::Syntax => write!(f, "SyntaxError"),
            Self::Name => write!(f, "NameError"),
            Self::Mutability => write!(f, "MutabilityError"),
            Self::Ambiguity => write!(f, "AmbiguityError"),
            Self::Validation => write!(f, "ValidationError"),
            Self::Conversion => write!(f, "ConversionError"),
            Self::IO => write!(f, "IOError"),
        }
    }
}

/// An error raised while lexing, parsing or editing an XML tree.
#[derive(Debug, Clone, Error)]
#[error("{kind} at line {line}: {message}")]
pub struct XmlError {
    /// The kind of error.
    pub kind: XmlErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Line number (1-based; 0 when no source position applies).
    pub line: usize,
    /// Column number (1-based, optional).
    pub column: Option<usize>,
    /// Additional context (e.g., "in element <cache-config> started at line 5").
    pub context: Option<String>,
}

impl XmlError {
    /// Create a new error.
    pub fn new(kind: XmlErrorKind, message: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
            column: None,
            context: None,
        }
    }

    /// Add column information.
    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    /// Add context information.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    // Convenience constructors for each error kind
    pub fn lex(message: impl Into<String>, line: usize) -> Self {
        Self::new(XmlErrorKind::Lex, message, line)
    }

    pub fn syntax(message: impl Into<String>, line: usize) -> Self {
        Self::new(XmlErrorKind::Syntax, message, line)
    }

    pub fn name(message: impl Into<String>) -> Self {
        Self::new(XmlErrorKind::Name, message, 0)
    }

    pub fn mutability(message: impl Into<String>) -> Self {
        Self::new(XmlErrorKind::Mutability, message, 0)
    }

    pub fn ambiguity(message: impl Into<String>) -> Self {
        Self::new(XmlErrorKind::Ambiguity, message, 0)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(XmlErrorKind::Validation, message, 0)
    }

    pub fn conversion(message: impl Into<String>) -> Self {
        Self::new(XmlErrorKind::Conversion, message, 0)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(XmlErrorKind::IO, message, 0)
    }
}

/// Result type for XML operations.
pub type XmlResult<T> = Result<T, XmlError>;
