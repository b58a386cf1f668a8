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

//! Cross-kind scalar conversion.
//!
//! Every scalar kind has a canonical string form; conversion between kinds
//! goes through that form. Conversions are total: a value that cannot be
//! read as the requested kind yields `None` rather than an error.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::name::trim_xml;

/// Parse a boolean from its leading character.
///
/// `T`, `t`, `Y`, `y` and `1` read as true; `F`, `f`, `N`, `n` and `0`
/// read as false; anything else is not a boolean.
pub fn parse_bool(s: &str) -> Option<bool> {
    match trim_xml(s).chars().next()? {
        'T' | 't' | 'Y' | 'y' | '1' => Some(true),
        'F' | 'f' | 'N' | 'n' | '0' => Some(false),
        _ => None,
    }
}

/// Parse a 32-bit integer.
pub fn parse_int(s: &str) -> Option<i32> {
    trim_xml(s).parse().ok()
}

/// Parse a 64-bit integer.
pub fn parse_long(s: &str) -> Option<i64> {
    trim_xml(s).parse().ok()
}

/// Parse a double.
pub fn parse_double(s: &str) -> Option<f64> {
    trim_xml(s).parse().ok()
}

/// Parse an arbitrary-precision decimal.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    trim_xml(s).parse().ok()
}

/// Parse a date in `YYYY-MM-DD` form.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(trim_xml(s), "%Y-%m-%d").ok()
}

/// Parse a time in `HH:MM:SS` form, with an optional fractional part.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(trim_xml(s), "%H:%M:%S%.f").ok()
}

/// Parse a date-time, accepting either `'T'` or a space as the separator.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = trim_xml(s).replacen('T', " ", 1);
    NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S%.f").ok()
}

/// Decode opaque bytes from their printable Base64 form.
pub fn parse_bytes(s: &str) -> Option<Vec<u8>> {
    BASE64.decode(trim_xml(s)).ok()
}

/// Encode opaque bytes into their printable Base64 form.
pub fn format_bytes(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Format a date into its canonical `YYYY-MM-DD` form.
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format a time into its canonical `HH:MM:SS` form.
pub fn format_time(time: &NaiveTime) -> String {
    time.format("%H:%M:%S%.f").to_string()
}

/// Format a date-time into its canonical space-separated form.
pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S%.f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Boolean conversion tests ====================

    #[test]
    fn test_parse_bool_true_forms() {
        for s in ["true", "TRUE", "T", "yes", "Y", "1"] {
            assert_eq!(parse_bool(s), Some(true), "{}", s);
        }
    }

    #[test]
    fn test_parse_bool_false_forms() {
        for s in ["false", "FALSE", "f", "no", "N", "0"] {
            assert_eq!(parse_bool(s), Some(false), "{}", s);
        }
    }

    #[test]
    fn test_parse_bool_invalid() {
        assert_eq!(parse_bool(""), None);
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool("2"), None);
    }

    #[test]
    fn test_parse_bool_trims_whitespace() {
        assert_eq!(parse_bool("  true  "), Some(true));
    }

    // ==================== Numeric conversion tests ====================

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("-7"), Some(-7));
        assert_eq!(parse_int(" 13 "), Some(13));
        assert_eq!(parse_int("abc"), None);
    }

    #[test]
    fn test_parse_long() {
        assert_eq!(parse_long("9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse_long("x"), None);
    }

    #[test]
    fn test_parse_double() {
        assert_eq!(parse_double("1.5"), Some(1.5));
        assert_eq!(parse_double("-0.25"), Some(-0.25));
        assert_eq!(parse_double("nope"), None);
    }

    #[test]
    fn test_parse_decimal() {
        let d = parse_decimal("123.456").unwrap();
        assert_eq!(d.to_string(), "123.456");
    }

    // ==================== Date/time conversion tests ====================

    #[test]
    fn test_parse_date() {
        let d = parse_date("2024-02-29").unwrap();
        assert_eq!(format_date(&d), "2024-02-29");
        assert_eq!(parse_date("2024-13-01"), None);
    }

    #[test]
    fn test_parse_time() {
        let t = parse_time("13:45:09").unwrap();
        assert_eq!(format_time(&t), "13:45:09");
    }

    #[test]
    fn test_parse_datetime_space_separator() {
        let dt = parse_datetime("2024-01-02 03:04:05").unwrap();
        assert_eq!(format_datetime(&dt), "2024-01-02 03:04:05");
    }

    #[test]
    fn test_parse_datetime_t_separator() {
        let dt = parse_datetime("2024-01-02T03:04:05").unwrap();
        assert_eq!(format_datetime(&dt), "2024-01-02 03:04:05");
    }

    #[test]
    fn test_datetime_fractional_seconds() {
        let dt = parse_datetime("2024-01-02 03:04:05.250").unwrap();
        assert_eq!(format_datetime(&dt), "2024-01-02 03:04:05.250");
    }

    // ==================== Bytes conversion tests ====================

    #[test]
    fn test_bytes_round_trip() {
        let data = b"\x00\x01\xFFhello";
        let text = format_bytes(data);
        assert_eq!(parse_bytes(&text).unwrap(), data);
    }

    #[test]
    fn test_parse_bytes_invalid() {
        assert_eq!(parse_bytes("!!not base64!!"), None);
    }
}
