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

//! Compact binary serialization for SXML documents.
//!
//! A depth-first, presence-flag-prefixed encoding of the element tree.
//! Unlike the text form there is no formatting and no escaping, and
//! scalar kinds survive exactly (a `Long` decodes back as a `Long`,
//! not as text). The format carries the root element subtree only;
//! document metadata such as the encoding declaration and DOCTYPE
//! identifiers is not represented.

mod reader;
mod tags;
mod writer;

pub use reader::{decode_document, decode_element};
pub use tags::WireTag;
pub use writer::{encode_document, encode_element};
