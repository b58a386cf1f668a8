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

//! One-byte type tags of the binary format.

use sxml_core::{XmlError, XmlResult};

/// Type tag written ahead of every value payload. The tag values are
/// part of the wire format and must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WireTag {
    /// No value follows.
    Absent = 0,
    Bool = 1,
    Int = 2,
    Long = 3,
    Double = 4,
    Decimal = 5,
    Text = 6,
    Bytes = 7,
    Date = 8,
    Time = 9,
    DateTime = 10,
}

impl WireTag {
    /// Decode a tag byte.
    pub fn from_byte(byte: u8) -> XmlResult<Self> {
        Ok(match byte {
            0 => Self::Absent,
            1 => Self::Bool,
            2 => Self::Int,
            3 => Self::Long,
            4 => Self::Double,
            5 => Self::Decimal,
            6 => Self::Text,
            7 => Self::Bytes,
            8 => Self::Date,
            9 => Self::Time,
            10 => Self::DateTime,
            other => {
                return Err(XmlError::conversion(format!(
                    "unknown wire type tag: {:#04x}",
                    other
                )))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Tag tests ====================

    #[test]
    fn test_tag_round_trip() {
        for byte in 0..=10u8 {
            assert_eq!(WireTag::from_byte(byte).unwrap() as u8, byte);
        }
    }

    #[test]
    fn test_unknown_tag_rejected() {
        assert!(WireTag::from_byte(11).is_err());
        assert!(WireTag::from_byte(0xFF).is_err());
    }
}
