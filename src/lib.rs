//! intskey - Order-Preserving Fixed-Width Integer Keys
//!
//! Pack beberapa integer (signed/unsigned, 8-64 bit) ke satu key berukuran
//! tetap sehingga memcmp atas raw bytes menghasilkan urutan yang sama dengan
//! perbandingan tuple aslinya. Dipakai sebagai key di radix tree / index.
//!
//! Arsitektur:
//! - `core`: `KeyBuffer<N>`, storage `N * 8` bytes + ordering + hex dump
//! - `codec`: sign flip + big-endian transform, field descriptors, layout
//! - `error`: `LayoutError` untuk API yang di-check
//!
//! ```
//! use intskey::KeyBuffer;
//!
//! let mut k1: KeyBuffer<2> = KeyBuffer::new();
//! k1.add_integer(-1i32, 0);
//! k1.add_unsigned_integer(123u8, 4);
//! k1.add_integer(-85412i64, 5);
//!
//! let mut k2: KeyBuffer<2> = KeyBuffer::new();
//! k2.add_integer(-1i32, 0);
//! k2.add_unsigned_integer(254u8, 4);
//! k2.add_integer(1i64, 5);
//!
//! assert_eq!(k1.get_integer::<i64>(5), -85412);
//! assert!(KeyBuffer::less_than(&k1, &k2));
//! ```

pub mod codec;
pub mod core;
pub mod error;

pub use crate::codec::{Field, FieldSpec, KeyInt, KeyLayout, SignedKeyInt, UnsignedKeyInt};
pub use crate::core::KeyBuffer;
pub use crate::error::{LayoutError, Result};
