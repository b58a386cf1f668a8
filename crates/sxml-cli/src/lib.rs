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

//! SXML CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **check**: parse a file and report the first error with position
//! - **fmt**: pretty-print a file to stdout or an output path
//! - **pack**: convert text XML to the compact binary form
//! - **unpack**: convert the compact binary form back to text
//!
//! All commands accept `-` as the input path to read from stdin.

pub mod commands;
