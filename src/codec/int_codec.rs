//! Integer Transform: sign flip + big-endian
//!
//! Setiap integer yang masuk ke key melewati dua transformasi:
//! 1. Sign flip (signed saja): XOR dengan mask yang hanya punya bit
//!    `BITS - 1`. Negatif (MSB = 1) pindah ke setengah bawah range unsigned,
//!    positif ke setengah atas, sehingga urutan numerik tetap terjaga.
//! 2. Host order -> big-endian, supaya byte paling signifikan dibandingkan
//!    lebih dulu oleh memcmp.
//!
//! Flip bersifat logis (pada nilai), bukan pada posisi memori, jadi harus
//! dilakukan sebelum konversi byte order.

use std::fmt;
use std::hash::Hash;

mod sealed {
    pub trait Sealed {}
}

/// Integer yang bisa di-pack ke dalam key.
///
/// Trait ini sealed: hanya delapan tipe `{i,u}{8,16,32,64}` yang valid.
pub trait KeyInt: sealed::Sealed + Copy + Ord + Hash + fmt::Debug + Send + Sync + 'static {
    /// Lebar field dalam bytes (`size_of::<Self>()`)
    const WIDTH: usize;

    /// `true` untuk tipe signed; menentukan apakah sign flip dipakai
    const SIGNED: bool;

    /// Mask dengan satu bit di posisi MSB logis
    const SIGN_MASK: Self;

    /// Representasi byte dengan panjang tetap `WIDTH`
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default + Copy;

    /// XOR dengan `SIGN_MASK`. Merupakan inverse dari dirinya sendiri.
    fn sign_flip(self) -> Self;

    /// Host order -> big-endian bytes
    fn to_big_endian(self) -> Self::Bytes;

    /// Big-endian bytes -> host order
    fn from_big_endian(bytes: Self::Bytes) -> Self;

    /// Encoding lengkap sesuai signedness tipe
    #[inline(always)]
    fn to_key_bytes(self) -> Self::Bytes {
        if Self::SIGNED {
            self.sign_flip().to_big_endian()
        } else {
            self.to_big_endian()
        }
    }

    /// Inverse dari [`KeyInt::to_key_bytes`]
    #[inline(always)]
    fn from_key_bytes(bytes: Self::Bytes) -> Self {
        let host = Self::from_big_endian(bytes);
        if Self::SIGNED {
            host.sign_flip()
        } else {
            host
        }
    }
}

/// Marker untuk `i8`, `i16`, `i32`, `i64`
pub trait SignedKeyInt: KeyInt {}

/// Marker untuk `u8`, `u16`, `u32`, `u64`
pub trait UnsignedKeyInt: KeyInt {}

macro_rules! impl_key_int {
    ($marker:ident, $signed:expr, $($t:ty),+) => {
        $(
            impl sealed::Sealed for $t {}

            impl KeyInt for $t {
                const WIDTH: usize = std::mem::size_of::<$t>();
                const SIGNED: bool = $signed;
                // Cast ke tipe yang benar sebelum shift, tanpa sign extension
                const SIGN_MASK: Self = (1 as $t) << (<$t>::BITS - 1);

                type Bytes = [u8; std::mem::size_of::<$t>()];

                #[inline(always)]
                fn sign_flip(self) -> Self {
                    self ^ Self::SIGN_MASK
                }

                #[inline(always)]
                fn to_big_endian(self) -> Self::Bytes {
                    self.to_be_bytes()
                }

                #[inline(always)]
                fn from_big_endian(bytes: Self::Bytes) -> Self {
                    <$t>::from_be_bytes(bytes)
                }
            }

            impl $marker for $t {}
        )+
    };
}

impl_key_int!(SignedKeyInt, true, i8, i16, i32, i64);
impl_key_int!(UnsignedKeyInt, false, u8, u16, u32, u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_mask_single_msb() {
        assert_eq!(i8::SIGN_MASK, i8::MIN);
        assert_eq!(i16::SIGN_MASK, i16::MIN);
        assert_eq!(i32::SIGN_MASK, i32::MIN);
        assert_eq!(i64::SIGN_MASK, i64::MIN);
        assert_eq!(u8::SIGN_MASK, 0x80);
        assert_eq!(u16::SIGN_MASK, 0x8000);
        assert_eq!(u32::SIGN_MASK, 0x8000_0000);
        assert_eq!(u64::SIGN_MASK, 0x8000_0000_0000_0000);
    }

    #[test]
    fn test_width_matches_size_of() {
        assert_eq!(i8::WIDTH, 1);
        assert_eq!(u16::WIDTH, 2);
        assert_eq!(i32::WIDTH, 4);
        assert_eq!(u64::WIDTH, 8);
    }

    #[test]
    fn test_signed_key_bytes() {
        assert_eq!((-1i32).to_key_bytes(), [0x7F, 0xFF, 0xFF, 0xFF]);
        assert_eq!(0i32.to_key_bytes(), [0x80, 0x00, 0x00, 0x00]);
        assert_eq!(i16::MIN.to_key_bytes(), [0x00, 0x00]);
        assert_eq!(i16::MAX.to_key_bytes(), [0xFF, 0xFF]);
        assert_eq!((-128i8).to_key_bytes(), [0x00]);
    }

    #[test]
    fn test_unsigned_key_bytes_are_plain_big_endian() {
        assert_eq!(0x0102_0304u32.to_key_bytes(), [0x01, 0x02, 0x03, 0x04]);
        assert_eq!(0xABu8.to_key_bytes(), [0xAB]);
    }

    #[test]
    fn test_sign_flip_is_involution() {
        for v in [i64::MIN, -85412, -1, 0, 1, i64::MAX] {
            assert_eq!(v.sign_flip().sign_flip(), v);
            assert_eq!(i64::from_key_bytes(v.to_key_bytes()), v);
        }
    }

    #[test]
    fn test_key_bytes_order_every_i8() {
        // Semua pasangan berurutan di range i8 harus tetap berurutan
        for v in i8::MIN..i8::MAX {
            assert!(v.to_key_bytes() < (v + 1).to_key_bytes(), "v = {}", v);
        }
    }
}
