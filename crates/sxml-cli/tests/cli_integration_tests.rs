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

//! CLI integration tests.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::NamedTempFile;

fn sxml_cmd() -> Command {
    Command::cargo_bin("sxml").expect("Failed to find sxml binary")
}

fn create_temp_file(content: &[u8], suffix: &str) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    fs::write(file.path(), content).expect("Failed to write temp file");
    file
}

// ===== Help and version =====

#[test]
fn test_help_output() {
    sxml_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("SXML - Simple XML processing toolkit"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_no_subcommand_fails() {
    sxml_cmd().assert().failure();
}

// ===== check =====

#[test]
fn test_check_valid_file() {
    let file = create_temp_file(b"<config><cache><size>100</size></cache></config>", ".xml");
    sxml_cmd()
        .arg("check")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Root: <config>"))
        .stdout(predicate::str::contains("Elements: 3"));
}

#[test]
fn test_check_invalid_file_reports_position() {
    let file = create_temp_file(b"<a>\n  <b>oops\n</a>", ".xml");
    sxml_cmd()
        .arg("check")
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("line"));
}

#[test]
fn test_check_stdin() {
    sxml_cmd()
        .arg("check")
        .arg("-")
        .write_stdin("<a/>")
        .assert()
        .success()
        .stdout(predicate::str::contains("<stdin>"));
}

#[test]
fn test_check_missing_file() {
    sxml_cmd()
        .arg("check")
        .arg("no-such-file.xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

// ===== fmt =====

#[test]
fn test_fmt_to_stdout() {
    let file = create_temp_file(b"<a><b>hi</b></a>", ".xml");
    sxml_cmd()
        .arg("fmt")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("  <b>"));
}

#[test]
fn test_fmt_to_output_file() {
    let input = create_temp_file(b"<a><b>hi</b></a>", ".xml");
    let output = NamedTempFile::new().unwrap();
    sxml_cmd()
        .arg("fmt")
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .assert()
        .success();
    let formatted = fs::read_to_string(output.path()).unwrap();
    assert!(formatted.contains("  <b>"));
}

// ===== pack / unpack =====

#[test]
fn test_pack_then_unpack() {
    let input = create_temp_file(b"<a x='1'><b>hi</b></a>", ".xml");
    let packed = NamedTempFile::new().unwrap();
    sxml_cmd()
        .arg("pack")
        .arg(input.path())
        .arg("-o")
        .arg(packed.path())
        .assert()
        .success();

    sxml_cmd()
        .arg("unpack")
        .arg(packed.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("<b>hi</b>"));
}

#[test]
fn test_unpack_garbage_fails() {
    let file = create_temp_file(&[0xFF, 0x00, 0x01], ".sxb");
    sxml_cmd()
        .arg("unpack")
        .arg(file.path())
        .assert()
        .failure()
        .code(1);
}
