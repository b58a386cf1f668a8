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

//! Scalar values held by elements and attributes.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::convert;
use crate::error::{XmlError, XmlResult};

/// The closed set of scalar kinds a value can hold.
///
/// Equality is by canonical string form when the kinds differ, so
/// `Scalar::Int(1)` equals `Scalar::Text("1".into())`.
#[derive(Debug, Clone)]
pub enum Scalar {
    /// Boolean.
    Bool(bool),
    /// 32-bit signed integer.
    Int(i32),
    /// 64-bit signed integer.
    Long(i64),
    /// Double-precision float.
    Double(f64),
    /// Arbitrary-precision decimal.
    Decimal(Decimal),
    /// UTF text.
    Text(String),
    /// Opaque byte sequence.
    Bytes(Vec<u8>),
    /// Calendar date.
    Date(NaiveDate),
    /// Time of day.
    Time(NaiveTime),
    /// Combined date and time.
    DateTime(NaiveDateTime),
}

/// Discriminant of [`Scalar`], used where a kind must be named without a
/// value (wire-format tags, kind-directed decoding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int,
    Long,
    Double,
    Decimal,
    Text,
    Bytes,
    Date,
    Time,
    DateTime,
}

impl Scalar {
    /// The kind of this scalar.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::Bool(_) => ScalarKind::Bool,
            Self::Int(_) => ScalarKind::Int,
            Self::Long(_) => ScalarKind::Long,
            Self::Double(_) => ScalarKind::Double,
            Self::Decimal(_) => ScalarKind::Decimal,
            Self::Text(_) => ScalarKind::Text,
            Self::Bytes(_) => ScalarKind::Bytes,
            Self::Date(_) => ScalarKind::Date,
            Self::Time(_) => ScalarKind::Time,
            Self::DateTime(_) => ScalarKind::DateTime,
        }
    }

    /// The canonical string form of this scalar.
    pub fn to_canonical_string(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Long(n) => n.to_string(),
            Self::Double(d) => d.to_string(),
            Self::Decimal(d) => d.to_string(),
            Self::Text(s) => s.clone(),
            Self::Bytes(b) => convert::format_bytes(b),
            Self::Date(d) => convert::format_date(d),
            Self::Time(t) => convert::format_time(t),
            Self::DateTime(dt) => convert::format_datetime(dt),
        }
    }

    /// True for an empty text or empty byte sequence.
    pub fn is_vacant(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Bytes(b) => b.is_empty(),
            _ => false,
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Double(a), Self::Double(b)) => a == b,
            (Self::Decimal(a), Self::Decimal(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Time(a), Self::Time(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            // mixed kinds compare through the canonical string form
            (a, b) => a.to_canonical_string() == b.to_canonical_string(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Self::Long(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// A scalar slot attached to an element (as content) or held as an attribute.
///
/// An attribute-flavored value is never absent; removing the attribute is
/// how "no value" is expressed. A content-flavored value may be absent.
#[derive(Debug, Clone)]
pub struct Value {
    scalar: Option<Scalar>,
    attribute: bool,
    mutable: bool,
}

impl Value {
    /// Create an absent content value.
    pub fn empty() -> Self {
        Self {
            scalar: None,
            attribute: false,
            mutable: true,
        }
    }

    /// Create a content value holding the given scalar.
    pub fn new(scalar: impl Into<Scalar>) -> Self {
        Self {
            scalar: Some(scalar.into()),
            attribute: false,
            mutable: true,
        }
    }

    /// Create an attribute value holding the given scalar.
    pub fn attribute(scalar: impl Into<Scalar>) -> Self {
        Self {
            scalar: Some(scalar.into()),
            attribute: true,
            mutable: true,
        }
    }

    /// The scalar held, if any.
    pub fn scalar(&self) -> Option<&Scalar> {
        self.scalar.as_ref()
    }

    /// Whether this value is attribute-flavored.
    pub fn is_attribute(&self) -> bool {
        self.attribute
    }

    /// The local mutability flag. Effective mutability additionally
    /// requires every ancestor of the owning element to be mutable.
    pub fn is_mutable(&self) -> bool {
        self.mutable
    }

    /// Set the local mutability flag. Always permitted.
    pub fn set_mutable(&mut self, mutable: bool) {
        self.mutable = mutable;
    }

    /// True when no scalar is held, or the held text/bytes are empty.
    pub fn is_empty(&self) -> bool {
        match &self.scalar {
            None => true,
            Some(s) => s.is_vacant(),
        }
    }

    /// Replace the held scalar, honoring the local mutability flag.
    pub fn set_scalar(&mut self, scalar: impl Into<Scalar>) -> XmlResult<()> {
        if !self.mutable {
            return Err(XmlError::mutability("value is read-only"));
        }
        self.scalar = Some(scalar.into());
        Ok(())
    }

    /// Remove the held scalar, honoring the local mutability flag.
    ///
    /// Not permitted on attribute values: a "null" attribute means
    /// removing the attribute, not an attribute holding null.
    pub fn clear_scalar(&mut self) -> XmlResult<()> {
        if !self.mutable {
            return Err(XmlError::mutability("value is read-only"));
        }
        if self.attribute {
            return Err(XmlError::mutability(
                "an attribute value cannot be absent; remove the attribute instead",
            ));
        }
        self.scalar = None;
        Ok(())
    }

    pub(crate) fn mark_attribute(&mut self) {
        self.attribute = true;
    }

    // ---- conversion-on-read accessors ----

    /// Read as a boolean, converting across kinds where possible.
    pub fn as_bool(&self) -> Option<bool> {
        match self.scalar() {
            Some(Scalar::Bool(b)) => Some(*b),
            Some(s) => convert::parse_bool(&s.to_canonical_string()),
            None => None,
        }
    }

    /// Read as a 32-bit integer.
    pub fn as_int(&self) -> Option<i32> {
        match self.scalar() {
            Some(Scalar::Int(n)) => Some(*n),
            Some(s) => convert::parse_int(&s.to_canonical_string()),
            None => None,
        }
    }

    /// Read as a 64-bit integer.
    pub fn as_long(&self) -> Option<i64> {
        match self.scalar() {
            Some(Scalar::Long(n)) => Some(*n),
            Some(Scalar::Int(n)) => Some(i64::from(*n)),
            Some(s) => convert::parse_long(&s.to_canonical_string()),
            None => None,
        }
    }

    /// Read as a double.
    pub fn as_double(&self) -> Option<f64> {
        match self.scalar() {
            Some(Scalar::Double(d)) => Some(*d),
            Some(s) => convert::parse_double(&s.to_canonical_string()),
            None => None,
        }
    }

    /// Read as an arbitrary-precision decimal.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self.scalar() {
            Some(Scalar::Decimal(d)) => Some(*d),
            Some(s) => convert::parse_decimal(&s.to_canonical_string()),
            None => None,
        }
    }

    /// Read as text (the canonical string form for non-text kinds).
    pub fn as_text(&self) -> Option<String> {
        self.scalar().map(Scalar::to_canonical_string)
    }

    /// Read as text, with an empty string for an absent value.
    pub fn text(&self) -> String {
        self.as_text().unwrap_or_default()
    }

    /// Read as opaque bytes (decoding Base64 for text values).
    pub fn as_bytes(&self) -> Option<Vec<u8>> {
        match self.scalar() {
            Some(Scalar::Bytes(b)) => Some(b.clone()),
            Some(s) => convert::parse_bytes(&s.to_canonical_string()),
            None => None,
        }
    }

    /// Read as a date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self.scalar() {
            Some(Scalar::Date(d)) => Some(*d),
            Some(Scalar::DateTime(dt)) => Some(dt.date()),
            Some(s) => convert::parse_date(&s.to_canonical_string()),
            None => None,
        }
    }

    /// Read as a time of day.
    pub fn as_time(&self) -> Option<NaiveTime> {
        match self.scalar() {
            Some(Scalar::Time(t)) => Some(*t),
            Some(Scalar::DateTime(dt)) => Some(dt.time()),
            Some(s) => convert::parse_time(&s.to_canonical_string()),
            None => None,
        }
    }

    /// Read as a date-time.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self.scalar() {
            Some(Scalar::DateTime(dt)) => Some(*dt),
            Some(s) => convert::parse_datetime(&s.to_canonical_string()),
            None => None,
        }
    }

    /// Hash of the canonical string form; zero for an absent value.
    ///
    /// Consistent with cross-kind equality, which also goes through the
    /// canonical string form.
    pub fn content_hash(&self) -> u64 {
        match &self.scalar {
            None => 0,
            Some(s) if s.is_vacant() => 0,
            Some(s) => {
                let mut hasher = DefaultHasher::new();
                s.to_canonical_string().hash(&mut hasher);
                hasher.finish()
            }
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Value {
    /// Content equality only; the attribute and mutability flags carry
    /// no information. An absent value equals a vacant one (empty text
    /// or empty bytes), matching `is_empty`.
    fn eq(&self, other: &Self) -> bool {
        match (&self.scalar, &other.scalar) {
            (None, None) => true,
            (Some(a), Some(b)) => a == b,
            (None, Some(s)) | (Some(s), None) => s.is_vacant(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scalar {
            Some(s) => s.fmt(f),
            None => Ok(()),
        }
    }
}
