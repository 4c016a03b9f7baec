//! Codec Layer: Order-Preserving Integer Encoding
//!
//! Prinsip desain:
//! - Big-endian: byte paling signifikan dibandingkan lebih dulu
//! - Sign flip: signed integer diurutkan benar sebagai unsigned bytes
//! - Closed set: hanya `{i,u}{8,16,32,64}`, dicek saat compile

mod int_codec;
mod layout;

pub use int_codec::{KeyInt, SignedKeyInt, UnsignedKeyInt};
pub use layout::{Field, FieldSpec, KeyLayout, KeyLayoutBuilder};
