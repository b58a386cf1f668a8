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

//! SXML command-line interface.

use std::process::ExitCode;

use clap::Parser;
use sxml_cli::commands::Commands;

/// SXML - Simple XML processing toolkit
///
/// # Examples
///
/// ```bash
/// # Check a file for well-formedness
/// sxml check config.xml
///
/// # Pretty-print to stdout, or format in place via -o
/// sxml fmt config.xml
/// sxml fmt config.xml -o config.xml
///
/// # Convert between text and the compact binary form
/// sxml pack config.xml -o config.sxb
/// sxml unpack config.sxb
///
/// # Read from stdin
/// cat config.xml | sxml check -
/// ```
#[derive(Parser)]
#[command(name = "sxml")]
#[command(author, version, about = "SXML - Simple XML processing toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
