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

//! CLI command implementations.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Subcommand;
use colored::Colorize;
use sxml::{parse, to_binary, to_pretty_text, Document, XmlErrorExt};

/// Subcommands of the `sxml` binary.
#[derive(Subcommand)]
pub enum Commands {
    /// Check a file for well-formedness
    Check {
        /// Input file, or `-` for stdin
        file: String,
    },
    /// Pretty-print a file
    Fmt {
        /// Input file, or `-` for stdin
        file: String,
        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Convert text XML to the compact binary form
    Pack {
        /// Input file, or `-` for stdin
        file: String,
        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Convert the compact binary form back to pretty text
    Unpack {
        /// Input file, or `-` for stdin
        file: String,
        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Commands {
    /// Run the command.
    pub fn execute(&self) -> Result<(), String> {
        match self {
            Self::Check { file } => check(file),
            Self::Fmt { file, output } => fmt(file, output.clone()),
            Self::Pack { file, output } => pack(file, output.clone()),
            Self::Unpack { file, output } => unpack(file, output.clone()),
        }
    }
}

fn check(file: &str) -> Result<(), String> {
    let (doc, _) = parse_input(file)?;
    println!("{} {}", "✓".green().bold(), display_name(file));
    println!("  Root: <{}>", doc.name(doc.root()));
    println!("  Elements: {}", count_elements(&doc));
    Ok(())
}

fn fmt(file: &str, output: Option<PathBuf>) -> Result<(), String> {
    let (doc, _) = parse_input(file)?;
    write_output(output, to_pretty_text(&doc).as_bytes())
}

fn pack(file: &str, output: Option<PathBuf>) -> Result<(), String> {
    let (doc, _) = parse_input(file)?;
    write_output(output, &to_binary(&doc))
}

fn unpack(file: &str, output: Option<PathBuf>) -> Result<(), String> {
    let bytes = read_bytes(file)?;
    let doc = sxml::from_binary(&bytes).map_err(|e| e.to_string())?;
    write_output(output, to_pretty_text(&doc).as_bytes())
}

/// Read and parse text input, keeping the source for error rendering.
fn parse_input(file: &str) -> Result<(Document, String), String> {
    let bytes = read_bytes(file)?;
    let source = String::from_utf8(bytes)
        .map_err(|_| format!("{}: input is not valid UTF-8", display_name(file)))?;
    match parse(&source) {
        Ok(doc) => Ok((doc, source)),
        Err(e) => {
            println!("{} {}", "✗".red().bold(), display_name(file));
            Err(e.display_with_source(&source))
        }
    }
}

fn read_bytes(file: &str) -> Result<Vec<u8>, String> {
    if file == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .map_err(|e| format!("failed to read stdin: {}", e))?;
        Ok(buf)
    } else {
        fs::read(file).map_err(|e| format!("failed to read '{}': {}", file, e))
    }
}

fn write_output(output: Option<PathBuf>, bytes: &[u8]) -> Result<(), String> {
    match output {
        Some(path) => fs::write(&path, bytes)
            .map_err(|e| format!("failed to write '{}': {}", path.display(), e)),
        None => io::stdout()
            .write_all(bytes)
            .map_err(|e| format!("failed to write stdout: {}", e)),
    }
}

fn display_name(file: &str) -> &str {
    if file == "-" {
        "<stdin>"
    } else {
        file
    }
}

fn count_elements(doc: &Document) -> usize {
    fn walk(doc: &Document, id: sxml::ElementId) -> usize {
        1 + doc.children(id).iter().map(|&c| walk(doc, c)).sum::<usize>()
    }
    walk(doc, doc.root())
}
