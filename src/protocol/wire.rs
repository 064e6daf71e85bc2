//! Patch wire format definitions

use serde::{Deserialize, Serialize};

/// Size in bytes of one patch record: tag, 4-byte location, payload
pub const RECORD_SIZE: usize = 6;

/// Size in bytes of the location field
pub const LOCATION_SIZE: usize = 4;

/// Edit operation tags
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
    /// Insert a byte before the original byte at the location
    Insert = 0x00,
    /// Drop the original byte at the location
    Delete = 0x01,
    /// Overwrite the original byte at the location
    Replace = 0x02,
}

impl OpCode {
    /// Convert from byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::Insert),
            0x01 => Some(Self::Delete),
            0x02 => Some(Self::Replace),
            _ => None,
        }
    }

    /// Convert to byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Check if the payload byte carries data for this operation
    pub fn uses_payload(self) -> bool {
        matches!(self, Self::Insert | Self::Replace)
    }
}

/// Byte order of the location field.
///
/// Little-endian is the default wire contract. Producer and consumer must agree,
/// nothing in the stream records which one was used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ByteOrder {
    /// Least significant byte first
    #[default]
    Little,
    /// Most significant byte first
    Big,
}

impl ByteOrder {
    /// Encode a location in this byte order
    pub fn encode(self, location: u32) -> [u8; LOCATION_SIZE] {
        match self {
            Self::Little => location.to_le_bytes(),
            Self::Big => location.to_be_bytes(),
        }
    }

    /// Decode a location in this byte order
    pub fn decode(self, bytes: [u8; LOCATION_SIZE]) -> u32 {
        match self {
            Self::Little => u32::from_le_bytes(bytes),
            Self::Big => u32::from_be_bytes(bytes),
        }
    }
}
