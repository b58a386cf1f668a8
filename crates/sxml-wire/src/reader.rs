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

//! Binary decoder.
//!
//! Reading mirrors the writer exactly. The decode target must be
//! virgin: a node that already carries a value, children, attributes,
//! a comment or a cleared mutable flag is rejected. Local mutable
//! flags are applied only after a subtree is fully built, so an
//! immutable subtree can still be reconstructed.

use sxml_core::{convert, Document, ElementId, Scalar, Value, XmlError, XmlResult};

use crate::tags::WireTag;

/// Decode a document from its binary form.
pub fn decode_document(bytes: &[u8]) -> XmlResult<Document> {
    // Placeholder root name; the real name is the first one decoded.
    let mut doc = Document::new("x")?;
    let root = doc.root();
    let mut reader = ByteReader::new(bytes);
    read_element_into(&mut reader, &mut doc, root)?;
    reader.finish()?;
    Ok(doc)
}

/// Decode an element subtree into an existing node.
///
/// The target node must be virgin. Its name is replaced by the decoded
/// one; value, children, attributes and comment are filled in.
pub fn decode_element(doc: &mut Document, target: ElementId, bytes: &[u8]) -> XmlResult<()> {
    ensure_virgin(doc, target)?;
    let mut reader = ByteReader::new(bytes);
    read_element_into(&mut reader, doc, target)?;
    reader.finish()
}

fn ensure_virgin(doc: &Document, id: ElementId) -> XmlResult<()> {
    let value = doc.value(id);
    let clean = value.scalar().is_none()
        && !value.is_attribute()
        && value.is_mutable()
        && doc.children(id).is_empty()
        && doc.attribute_count(id) == 0
        && doc.comment(id).is_none();
    if !clean {
        return Err(XmlError::conversion(
            "decode target already carries state",
        ));
    }
    Ok(())
}

fn read_element_into(reader: &mut ByteReader<'_>, doc: &mut Document, id: ElementId) -> XmlResult<()> {
    let (scalar, attribute, mutable) = read_value(reader)?;
    if attribute {
        return Err(XmlError::conversion(
            "element content value flagged as attribute",
        ));
    }

    if !reader.read_flag()? {
        return Err(XmlError::conversion("element name missing"));
    }
    doc.set_name(id, reader.read_string()?)?;

    if let Some(scalar) = scalar {
        doc.set_value(id, scalar)?;
    }

    if reader.read_flag()? {
        let count = reader.read_u32()?;
        for _ in 0..count {
            let child = doc.add_element(id, "x")?;
            read_element_into(reader, doc, child)?;
        }
    }

    if reader.read_flag()? {
        let count = reader.read_u32()?;
        for _ in 0..count {
            let name = reader.read_string()?;
            let (scalar, attribute, attr_mutable) = read_value(reader)?;
            if !attribute {
                return Err(XmlError::conversion(
                    "attribute value not flagged as attribute",
                ));
            }
            let scalar = scalar.ok_or_else(|| {
                XmlError::conversion("attribute value cannot be absent")
            })?;
            let mut value = Value::attribute(scalar);
            value.set_mutable(attr_mutable);
            doc.set_attribute_value(id, name, value)?;
        }
    }

    if reader.read_flag()? {
        doc.set_comment(id, reader.read_string()?)?;
    }

    // Applied last so an immutable element can still be filled in.
    doc.set_mutable(id, mutable);
    Ok(())
}

fn read_value(reader: &mut ByteReader<'_>) -> XmlResult<(Option<Scalar>, bool, bool)> {
    let tag = WireTag::from_byte(reader.read_u8()?)?;
    let scalar = match tag {
        WireTag::Absent => None,
        WireTag::Bool => Some(Scalar::Bool(reader.read_u8()? != 0)),
        WireTag::Int => {
            let mut buf = [0u8; 4];
            buf.copy_from_slice(reader.read_exact(4)?);
            Some(Scalar::Int(i32::from_be_bytes(buf)))
        }
        WireTag::Long => {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(reader.read_exact(8)?);
            Some(Scalar::Long(i64::from_be_bytes(buf)))
        }
        WireTag::Double => {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(reader.read_exact(8)?);
            Some(Scalar::Double(f64::from_be_bytes(buf)))
        }
        WireTag::Text => Some(Scalar::Text(reader.read_string()?)),
        WireTag::Bytes => {
            let len = reader.read_u32()? as usize;
            Some(Scalar::Bytes(reader.read_exact(len)?.to_vec()))
        }
        WireTag::Decimal => {
            let text = reader.read_string()?;
            Some(Scalar::Decimal(convert::parse_decimal(&text).ok_or_else(
                || XmlError::conversion(format!("invalid decimal payload: {text:?}")),
            )?))
        }
        WireTag::Date => {
            let text = reader.read_string()?;
            Some(Scalar::Date(convert::parse_date(&text).ok_or_else(
                || XmlError::conversion(format!("invalid date payload: {text:?}")),
            )?))
        }
        WireTag::Time => {
            let text = reader.read_string()?;
            Some(Scalar::Time(convert::parse_time(&text).ok_or_else(
                || XmlError::conversion(format!("invalid time payload: {text:?}")),
            )?))
        }
        WireTag::DateTime => {
            let text = reader.read_string()?;
            Some(Scalar::DateTime(convert::parse_datetime(&text).ok_or_else(
                || XmlError::conversion(format!("invalid date-time payload: {text:?}")),
            )?))
        }
    };
    let attribute = reader.read_flag()?;
    let mutable = reader.read_flag()?;
    Ok((scalar, attribute, mutable))
}

/// Bounds-checked cursor over the input bytes.
struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn read_u8(&mut self) -> XmlResult<u8> {
        let byte = *self
            .buf
            .get(self.pos)
            .ok_or_else(|| XmlError::conversion("unexpected end of binary input"))?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_flag(&mut self) -> XmlResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    fn read_exact(&mut self, len: usize) -> XmlResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.buf.len())
            .ok_or_else(|| XmlError::conversion("unexpected end of binary input"))?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u32(&mut self) -> XmlResult<u32> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.read_exact(4)?);
        Ok(u32::from_be_bytes(buf))
    }

    fn read_string(&mut self) -> XmlResult<String> {
        let len = self.read_u32()? as usize;
        let bytes = self.read_exact(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|_| XmlError::conversion("invalid UTF-8 in binary input"))
    }

    fn finish(&self) -> XmlResult<()> {
        if self.pos != self.buf.len() {
            return Err(XmlError::conversion(format!(
                "{} trailing bytes after binary document",
                self.buf.len() - self.pos
            )));
        }
        Ok(())
    }
}
