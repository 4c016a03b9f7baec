//! Core module: Fixed-Capacity Comparable Keys
//!
//! Prinsip desain:
//! - No-Allocation: key adalah array `[u64; N]` di stack
//! - Zero-Decode Compare: ordering langsung memcmp atas raw bytes
//! - Trust-the-caller: offset tidak dicek di release build

mod key_buffer;
mod raw_dump;

pub use key_buffer::KeyBuffer;
pub use raw_dump::RawDump;
