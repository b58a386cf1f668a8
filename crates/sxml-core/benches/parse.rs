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

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sxml_core::parse;

fn config_document(entries: usize) -> String {
    let mut xml = String::from("<?xml version=\"1.0\"?>\n<cache-config>\n");
    for i in 0..entries {
        xml.push_str(&format!(
            "  <cache id=\"{i}\">\n    <name>cache-{i}</name>\n    \
             <scheme>distributed</scheme>\n    <size>{}</size>\n  </cache>\n",
            i * 1024
        ));
    }
    xml.push_str("</cache-config>\n");
    xml
}

fn bench_parse(c: &mut Criterion) {
    let small = config_document(10);
    let large = config_document(1000);

    c.bench_function("parse_small", |b| {
        b.iter(|| parse(black_box(&small)).unwrap())
    });
    c.bench_function("parse_large", |b| {
        b.iter(|| parse(black_box(&large)).unwrap())
    });
}

fn bench_chardata_heavy(c: &mut Criterion) {
    let mut xml = String::from("<doc>");
    for _ in 0..200 {
        xml.push_str("<p>some character data with an &amp; entity and more text</p>");
    }
    xml.push_str("</doc>");
    c.bench_function("parse_chardata", |b| {
        b.iter(|| parse(black_box(&xml)).unwrap())
    });
}

criterion_group!(benches, bench_parse, bench_chardata_heavy);
criterion_main!(benches);
