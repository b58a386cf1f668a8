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

//! Resource limits for parsing untrusted input.

use crate::error::{XmlError, XmlResult};

/// Resource limits applied while parsing.
///
/// The defaults are generous enough for any reasonable configuration
/// document while still bounding memory on hostile input. Use
/// [`Limits::unlimited`] to disable all checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum input size in bytes.
    pub max_input_size: usize,
    /// Maximum element nesting depth.
    pub max_depth: usize,
    /// Maximum number of elements in the document.
    pub max_elements: usize,
    /// Maximum number of attributes on a single element.
    pub max_attributes: usize,
    /// Maximum length of an element or attribute name, in bytes.
    pub max_name_length: usize,
    /// Maximum length of a single text or CDATA run, in bytes.
    pub max_text_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_size: 64 * 1024 * 1024,
            max_depth: 128,
            max_elements: 1_000_000,
            max_attributes: 256,
            max_name_length: 1024,
            max_text_length: 16 * 1024 * 1024,
        }
    }
}

impl Limits {
    /// Limits with every check disabled.
    pub fn unlimited() -> Self {
        Self {
            max_input_size: usize::MAX,
            max_depth: usize::MAX,
            max_elements: usize::MAX,
            max_attributes: usize::MAX,
            max_name_length: usize::MAX,
            max_text_length: usize::MAX,
        }
    }

    /// Check the input size before parsing begins.
    pub fn check_input_size(&self, size: usize) -> XmlResult<()> {
        if size > self.max_input_size {
            return Err(XmlError::lex(
                format!(
                    "input size {} exceeds limit {}",
                    size, self.max_input_size
                ),
                0,
            ));
        }
        Ok(())
    }

    /// Check element nesting depth.
    pub fn check_depth(&self, depth: usize, line: usize) -> XmlResult<()> {
        if depth > self.max_depth {
            return Err(XmlError::syntax(
                format!("nesting depth {} exceeds limit {}", depth, self.max_depth),
                line,
            ));
        }
        Ok(())
    }

    /// Check the running element count.
    pub fn check_elements(&self, count: usize, line: usize) -> XmlResult<()> {
        if count > self.max_elements {
            return Err(XmlError::syntax(
                format!("element count {} exceeds limit {}", count, self.max_elements),
                line,
            ));
        }
        Ok(())
    }

    /// Check the attribute count of one element.
    pub fn check_attributes(&self, count: usize, line: usize) -> XmlResult<()> {
        if count > self.max_attributes {
            return Err(XmlError::syntax(
                format!(
                    "attribute count {} exceeds limit {}",
                    count, self.max_attributes
                ),
                line,
            ));
        }
        Ok(())
    }

    /// Check a name length.
    pub fn check_name_length(&self, len: usize, line: usize) -> XmlResult<()> {
        if len > self.max_name_length {
            return Err(XmlError::lex(
                format!("name length {} exceeds limit {}", len, self.max_name_length),
                line,
            ));
        }
        Ok(())
    }

    /// Check a text run length.
    pub fn check_text_length(&self, len: usize, line: usize) -> XmlResult<()> {
        if len > self.max_text_length {
            return Err(XmlError::lex(
                format!("text length {} exceeds limit {}", len, self.max_text_length),
                line,
            ));
        }
        Ok(())
    }
}
