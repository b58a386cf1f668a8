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

//! Text serialization for SXML documents.
//!
//! Two layouts over one writer: the compact single-line form and the
//! pretty two-space-indented form. Writing then re-parsing yields a
//! structurally equal document (comments are re-normalized; declared
//! scalar kinds come back as text, which equality treats as the same).

mod config;
pub mod escape;
mod writer;

pub use config::WriteConfig;
pub use writer::{write_document, write_document_with_config, write_element};

// Decoding counterparts live with the lexer.
pub use sxml_core::lex::{decode_attribute, decode_content};
