//! Patch stream format definitions

pub mod wire;

pub use wire::{ByteOrder, OpCode, RECORD_SIZE};
