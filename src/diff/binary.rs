//! Binary patch format
//!
//! Wire Format:
//! ```text
//! +--------+----------------+------------+
//! | Op(1B) | Location(4B)   | Payload(1B)|
//! +--------+----------------+------------+
//! ```
//!
//! A patch is a headerless run of these 6-byte records, one per edit, in the
//! order the edits apply. The location is little-endian unless the codec is
//! configured otherwise.
//!
//! Operations:
//! - 0x00: INSERT(location, byte) - emit `byte` before original byte `location`
//! - 0x01: DELETE(location) - skip original byte `location`, payload ignored
//! - 0x02: REPLACE(location, byte) - emit `byte` in place of original byte `location`
//!
//! # Example
//! ```
//! use bpatch::diff::{EditOperation, PatchCodec};
//!
//! let operations = vec![
//!     EditOperation::Replace { at: 1, value: b'x' },
//!     EditOperation::Insert { at: 3, value: b'!' },
//! ];
//!
//! let codec = PatchCodec::default();
//! let encoded = codec.encode(&operations).unwrap();
//! assert_eq!(encoded.len(), 12);
//!
//! let result = codec.apply_patch(b"abc", &encoded).unwrap();
//! assert_eq!(result.as_ref(), b"axc!");
//! ```

use super::DiffError;
use super::cost::{Cost, CostModel};
use crate::protocol::wire::{ByteOrder, LOCATION_SIZE, OpCode, RECORD_SIZE};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::fmt;

/// Single-byte edit against a position of the original sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOperation {
    /// Insert `value` before original byte `at` (or at the end when `at` is the length)
    Insert {
        /// Position in the original sequence
        at: usize,
        /// Byte to emit
        value: u8,
    },
    /// Drop original byte `at`
    Delete {
        /// Position in the original sequence
        at: usize,
    },
    /// Emit `value` instead of original byte `at`
    Replace {
        /// Position in the original sequence
        at: usize,
        /// Byte to emit
        value: u8,
    },
}

impl EditOperation {
    /// Position in the original sequence this edit refers to
    pub fn at(&self) -> usize {
        match *self {
            Self::Insert { at, .. } | Self::Delete { at } | Self::Replace { at, .. } => at,
        }
    }

    /// Wire tag of this edit
    pub fn op_code(&self) -> OpCode {
        match self {
            Self::Insert { .. } => OpCode::Insert,
            Self::Delete { .. } => OpCode::Delete,
            Self::Replace { .. } => OpCode::Replace,
        }
    }

    /// Payload byte as written on the wire; deletes carry 0
    pub fn payload(&self) -> u8 {
        match *self {
            Self::Insert { value, .. } | Self::Replace { value, .. } => value,
            Self::Delete { .. } => 0,
        }
    }

    /// Price of this edit under `costs`
    pub fn cost(&self, costs: &CostModel) -> Cost {
        match self {
            Self::Insert { .. } => costs.insert,
            Self::Delete { .. } => costs.delete,
            Self::Replace { .. } => costs.replace,
        }
    }
}

impl fmt::Display for EditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert { at, value } => write!(f, "insert 0x{value:02x} at {at}"),
            Self::Delete { at } => write!(f, "delete at {at}"),
            Self::Replace { at, value } => write!(f, "replace 0x{value:02x} at {at}"),
        }
    }
}

/// Total price of a sequence of edits
pub fn path_cost(operations: &[EditOperation], costs: &CostModel) -> Cost {
    operations
        .iter()
        .fold(0, |total: Cost, op| total.saturating_add(op.cost(costs)))
}

/// Binary patch encoder/decoder and applier
#[derive(Debug, Clone, Copy, Default)]
pub struct PatchCodec {
    byte_order: ByteOrder,
}

impl PatchCodec {
    /// Create a codec writing locations in `byte_order`
    pub fn new(byte_order: ByteOrder) -> Self {
        Self { byte_order }
    }

    /// Byte order of the location field
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Encode edit operations to binary format
    ///
    /// # Errors
    /// Returns [`DiffError::LocationOverflow`] if a location does not fit in 32 bits
    pub fn encode(&self, operations: &[EditOperation]) -> Result<Bytes, DiffError> {
        let mut buf = BytesMut::with_capacity(operations.len() * RECORD_SIZE);

        for op in operations {
            let location = u32::try_from(op.at())
                .map_err(|_| DiffError::LocationOverflow { location: op.at() })?;

            buf.put_u8(op.op_code().as_u8());
            buf.put_slice(&self.byte_order.encode(location));
            buf.put_u8(op.payload());
        }

        Ok(buf.freeze())
    }

    /// Decode binary patch data to operations
    ///
    /// An empty stream decodes to no operations.
    ///
    /// # Errors
    /// Returns [`DiffError::MalformedPatch`] on a truncated record or an unknown tag
    pub fn decode(&self, patch: &[u8]) -> Result<Vec<EditOperation>, DiffError> {
        if patch.len() % RECORD_SIZE != 0 {
            return Err(DiffError::MalformedPatch(format!(
                "Patch length {} is not a multiple of {RECORD_SIZE}",
                patch.len()
            )));
        }

        let mut operations = Vec::with_capacity(patch.len() / RECORD_SIZE);
        let mut cursor = patch;

        while cursor.has_remaining() {
            let offset = patch.len() - cursor.remaining();
            let op_byte = cursor.get_u8();
            let op = OpCode::from_u8(op_byte).ok_or_else(|| {
                DiffError::MalformedPatch(format!(
                    "Unknown operation: 0x{op_byte:02x} at byte {offset}"
                ))
            })?;

            let mut location = [0u8; LOCATION_SIZE];
            cursor.copy_to_slice(&mut location);
            let at = self.byte_order.decode(location) as usize;
            let value = cursor.get_u8();
            if !op.uses_payload() && value != 0 {
                tracing::warn!(offset, value, "ignoring payload byte on delete record");
            }

            let operation = match op {
                OpCode::Insert => EditOperation::Insert { at, value },
                OpCode::Delete => EditOperation::Delete { at },
                OpCode::Replace => EditOperation::Replace { at, value },
            };
            tracing::debug!(%operation, "decoded edit");
            operations.push(operation);
        }

        Ok(operations)
    }

    /// Replay edit operations against the original content
    ///
    /// Edits must be ordered by location. Several inserts may share a location;
    /// they are emitted in order before the original byte there.
    ///
    /// # Errors
    /// Returns [`DiffError::MalformedPatch`] if an edit is out of order or points
    /// past the end of `base`
    pub fn apply_operations(base: &[u8], operations: &[EditOperation]) -> Result<Bytes, DiffError> {
        let inserts = operations
            .iter()
            .filter(|op| matches!(op, EditOperation::Insert { .. }))
            .count();
        let mut result = BytesMut::with_capacity(base.len() + inserts);
        let mut data_i = 0;
        let mut edit_i = 0;

        while data_i < base.len() || edit_i < operations.len() {
            match operations.get(edit_i) {
                Some(op) if op.at() == data_i => {
                    match *op {
                        EditOperation::Insert { value, .. } => {
                            result.put_u8(value);
                            // data_i stays - the original byte is still pending
                        }
                        EditOperation::Replace { at, value } => {
                            if at >= base.len() {
                                return Err(past_end(op, base.len()));
                            }
                            result.put_u8(value);
                            data_i += 1;
                        }
                        EditOperation::Delete { at } => {
                            if at >= base.len() {
                                return Err(past_end(op, base.len()));
                            }
                            data_i += 1;
                        }
                    }
                    edit_i += 1;
                }
                Some(op) if op.at() < data_i => {
                    return Err(DiffError::MalformedPatch(format!(
                        "Edit #{edit_i} ({op}) is out of order, replay is already at {data_i}"
                    )));
                }
                Some(op) if data_i >= base.len() => {
                    return Err(past_end(op, base.len()));
                }
                _ => {
                    result.put_u8(base[data_i]);
                    data_i += 1;
                }
            }
        }

        Ok(result.freeze())
    }

    /// Decode a patch and apply it to the original content
    pub fn apply_patch(&self, base: &[u8], patch: &[u8]) -> Result<Bytes, DiffError> {
        let operations = self.decode(patch)?;
        Self::apply_operations(base, &operations)
    }
}

fn past_end(op: &EditOperation, len: usize) -> DiffError {
    DiffError::MalformedPatch(format!(
        "Edit ({op}) is unreachable, original is {len} bytes"
    ))
}
