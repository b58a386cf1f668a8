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

//! Core lexer, parser and document model for SXML.
//!
//! This crate provides the XML data model (an arena-backed [`Document`]
//! of elements addressed by [`ElementId`]) and everything needed to
//! build and manipulate one:
//!
//! - Context-sensitive lexing and recursive-descent parsing ([`lex`],
//!   [`parse`]) with configurable resource limits
//! - Typed scalar values with conversion-on-read ([`Value`], [`Scalar`])
//! - Path navigation, safe navigation and ensure-style creation
//!   ([`path`])
//! - Namespace resolution over `xmlns` attributes ([`namespace`])
//! - Overlay/override composition of documents ([`overlay`])
//! - Structural equality and hashing ([`compare`])
//!
//! Serialization lives in the companion crates: `sxml-text` for the
//! pretty text form, `sxml-wire` for the compact binary form.

pub mod compare;
pub mod convert;
mod document;
mod error;
pub mod lex;
mod limits;
pub mod name;
pub mod namespace;
pub mod overlay;
mod parser;
pub mod path;
pub mod uri;
pub mod validate;
mod value;

pub use document::{Document, ElementId};
pub use error::{XmlError, XmlErrorKind, XmlResult};
pub use limits::Limits;
pub use parser::{parse, parse_with_options, ParseOptions, ParseOptionsBuilder};
pub use validate::SchemaValidator;
pub use value::{Scalar, ScalarKind, Value};
