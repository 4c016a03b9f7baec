//! Fixed-Capacity Key Buffer
//!
//! `KeyBuffer<N>` menyimpan `N` words (N * 8 bytes). Storage berupa `[u64; N]`
//! sehingga key selalu word-aligned; akses byte lewat `bytemuck`, tanpa
//! pointer cast.
//!
//! Layout field sepenuhnya tanggung jawab caller. Perbandingan dua key
//! hanya bermakna jika keduanya di-encode dengan layout yang sama.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

use crate::codec::{Field, KeyInt, SignedKeyInt, UnsignedKeyInt};
use crate::error::{LayoutError, Result};

/// Key dengan kapasitas tetap `N * 8` bytes.
///
/// Value type: `Copy` menduplikasi seluruh isi. Ordering = memcmp atas bytes.
#[derive(Clone, Copy)]
#[repr(C)]
pub struct KeyBuffer<const N: usize> {
    words: [u64; N],
}

impl<const N: usize> Default for KeyBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> KeyBuffer<N> {
    /// Jumlah 64-bit words
    pub const WORDS: usize = N;

    /// Kapasitas dalam bytes
    pub const CAPACITY: usize = N * 8;

    /// Key baru, semua byte 0x00
    #[inline(always)]
    pub const fn new() -> Self {
        Self { words: [0u64; N] }
    }

    /// Bangun key dari raw bytes (mis. dibaca dari index page).
    ///
    /// Panjang `bytes` harus tepat `CAPACITY`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::CAPACITY {
            return Err(LayoutError::SourceLength {
                expected: Self::CAPACITY,
                actual: bytes.len(),
            });
        }

        let mut key = Self::new();
        key.as_bytes_mut().copy_from_slice(bytes);
        Ok(key)
    }

    /// Reset semua byte ke 0x00. Semua field yang sudah di-pack hilang.
    #[inline(always)]
    pub fn zero_out(&mut self) {
        self.words = [0u64; N];
    }

    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        Self::CAPACITY
    }

    /// Raw bytes key (urutan memcmp)
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.words[..])
    }

    #[inline(always)]
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        bytemuck::cast_slice_mut(&mut self.words[..])
    }

    /// Range byte untuk field; bounds dicek hanya di debug build
    #[inline(always)]
    fn field_range(offset: usize, width: usize) -> Range<usize> {
        debug_assert!(
            offset
                .checked_add(width)
                .is_some_and(|end| end <= Self::CAPACITY),
            "field at offset {} ({} bytes) exceeds key capacity of {} bytes",
            offset,
            width,
            Self::CAPACITY
        );
        offset..offset + width
    }

    #[inline(always)]
    fn check_range(offset: usize, width: usize) -> Result<Range<usize>> {
        match offset.checked_add(width) {
            Some(end) if end <= Self::CAPACITY => Ok(offset..end),
            _ => Err(LayoutError::OutOfBounds {
                offset,
                width,
                capacity: Self::CAPACITY,
            }),
        }
    }

    #[inline(always)]
    fn write_bytes<T: KeyInt>(&mut self, range: Range<usize>, bytes: T::Bytes) {
        self.as_bytes_mut()[range].copy_from_slice(bytes.as_ref());
    }

    #[inline(always)]
    fn read_bytes<T: KeyInt>(&self, range: Range<usize>) -> T::Bytes {
        let mut bytes = T::Bytes::default();
        bytes.as_mut().copy_from_slice(&self.as_bytes()[range]);
        bytes
    }

    // ---------------------------------------------------------------------
    // Encode / decode (trust-the-caller)
    // ---------------------------------------------------------------------

    /// Pack signed integer di `offset`: sign flip lalu big-endian.
    ///
    /// Precondition: `offset + size_of::<T>() <= CAPACITY` dan region tidak
    /// overlap dengan field lain. Di debug build dicek dengan `debug_assert!`;
    /// di release, offset di luar kapasitas berakhir panic dari slice index.
    #[inline(always)]
    pub fn add_integer<T: SignedKeyInt>(&mut self, value: T, offset: usize) {
        let range = Self::field_range(offset, T::WIDTH);
        self.write_bytes::<T>(range, value.sign_flip().to_big_endian());
    }

    /// Pack unsigned integer di `offset` (big-endian saja).
    ///
    /// Precondition sama dengan [`KeyBuffer::add_integer`].
    #[inline(always)]
    pub fn add_unsigned_integer<T: UnsignedKeyInt>(&mut self, value: T, offset: usize) {
        let range = Self::field_range(offset, T::WIDTH);
        self.write_bytes::<T>(range, value.to_big_endian());
    }

    /// Baca signed integer yang di-pack oleh `add_integer` di `offset`
    #[inline(always)]
    pub fn get_integer<T: SignedKeyInt>(&self, offset: usize) -> T {
        let range = Self::field_range(offset, T::WIDTH);
        T::from_big_endian(self.read_bytes::<T>(range)).sign_flip()
    }

    /// Baca unsigned integer yang di-pack oleh `add_unsigned_integer` di `offset`
    #[inline(always)]
    pub fn get_unsigned_integer<T: UnsignedKeyInt>(&self, offset: usize) -> T {
        let range = Self::field_range(offset, T::WIDTH);
        T::from_big_endian(self.read_bytes::<T>(range))
    }

    // ---------------------------------------------------------------------
    // Checked variants
    // ---------------------------------------------------------------------

    pub fn try_add_integer<T: SignedKeyInt>(&mut self, value: T, offset: usize) -> Result<()> {
        let range = Self::check_range(offset, T::WIDTH)?;
        self.write_bytes::<T>(range, value.sign_flip().to_big_endian());
        Ok(())
    }

    pub fn try_add_unsigned_integer<T: UnsignedKeyInt>(
        &mut self,
        value: T,
        offset: usize,
    ) -> Result<()> {
        let range = Self::check_range(offset, T::WIDTH)?;
        self.write_bytes::<T>(range, value.to_big_endian());
        Ok(())
    }

    pub fn try_get_integer<T: SignedKeyInt>(&self, offset: usize) -> Result<T> {
        let range = Self::check_range(offset, T::WIDTH)?;
        Ok(T::from_big_endian(self.read_bytes::<T>(range)).sign_flip())
    }

    pub fn try_get_unsigned_integer<T: UnsignedKeyInt>(&self, offset: usize) -> Result<T> {
        let range = Self::check_range(offset, T::WIDTH)?;
        Ok(T::from_big_endian(self.read_bytes::<T>(range)))
    }

    // ---------------------------------------------------------------------
    // Typed field access
    // ---------------------------------------------------------------------

    /// Pack `value` ke `field`; sign flip dipilih dari signedness `T`
    #[inline(always)]
    pub fn put<T: KeyInt>(&mut self, field: Field<T>, value: T) {
        let range = Self::field_range(field.offset(), T::WIDTH);
        self.write_bytes::<T>(range, value.to_key_bytes());
    }

    #[inline(always)]
    pub fn get<T: KeyInt>(&self, field: Field<T>) -> T {
        let range = Self::field_range(field.offset(), T::WIDTH);
        T::from_key_bytes(self.read_bytes::<T>(range))
    }

    // ---------------------------------------------------------------------
    // Ordering
    // ---------------------------------------------------------------------

    /// memcmp atas seluruh key, byte 0 lebih dulu
    #[inline(always)]
    pub fn compare(a: &Self, b: &Self) -> Ordering {
        a.as_bytes().cmp(b.as_bytes())
    }

    #[inline(always)]
    pub fn less_than(a: &Self, b: &Self) -> bool {
        Self::compare(a, b) == Ordering::Less
    }

    #[inline(always)]
    pub fn equals(a: &Self, b: &Self) -> bool {
        Self::compare(a, b) == Ordering::Equal
    }
}

impl<const N: usize> PartialEq for KeyBuffer<N> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        Self::equals(self, other)
    }
}

impl<const N: usize> Eq for KeyBuffer<N> {}

impl<const N: usize> PartialOrd for KeyBuffer<N> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Ord for KeyBuffer<N> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        Self::compare(self, other)
    }
}

impl<const N: usize> Hash for KeyBuffer<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl<const N: usize> AsRef<[u8]> for KeyBuffer<N> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<const N: usize> fmt::Debug for KeyBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyBuffer<{}>(", N)?;
        for b in self.as_bytes() {
            write!(f, "{:02x}", b)?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let key: KeyBuffer<4> = KeyBuffer::new();
        assert_eq!(key.capacity(), 32);
        assert!(key.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_zero_out() {
        let mut key: KeyBuffer<2> = KeyBuffer::new();
        key.add_unsigned_integer(u64::MAX, 0);
        key.add_integer(-5i64, 8);

        key.zero_out();
        assert_eq!(key, KeyBuffer::new());
    }

    #[test]
    fn test_set_and_get() {
        let mut key: KeyBuffer<4> = KeyBuffer::new();

        key.add_integer(-1i32, 0);
        key.add_unsigned_integer(123u8, 4);
        key.add_integer(-85412i64, 5);

        assert_eq!(key.get_integer::<i32>(0), -1);
        assert_eq!(key.get_unsigned_integer::<u8>(4), 123);
        assert_eq!(key.get_integer::<i64>(5), -85412);
    }

    #[test]
    fn test_byte_layout() {
        let mut key: KeyBuffer<1> = KeyBuffer::new();
        key.add_integer(-1i16, 0);
        key.add_unsigned_integer(0x0102u16, 2);
        key.add_integer(1i32, 4);

        assert_eq!(
            key.as_bytes(),
            &[0x7F, 0xFF, 0x01, 0x02, 0x80, 0x00, 0x00, 0x01]
        );
    }

    #[test]
    fn test_copy_is_independent() {
        let mut a: KeyBuffer<1> = KeyBuffer::new();
        a.add_unsigned_integer(7u32, 0);

        let mut b = a;
        b.add_unsigned_integer(9u32, 0);

        assert_eq!(a.get_unsigned_integer::<u32>(0), 7);
        assert_eq!(b.get_unsigned_integer::<u32>(0), 9);
    }

    #[test]
    fn test_checked_out_of_bounds() {
        let mut key: KeyBuffer<1> = KeyBuffer::new();

        assert_eq!(
            key.try_add_integer(1i64, 1),
            Err(LayoutError::OutOfBounds {
                offset: 1,
                width: 8,
                capacity: 8,
            })
        );
        assert!(key.try_get_unsigned_integer::<u16>(usize::MAX).is_err());

        // Gagal tidak boleh mengubah isi
        assert_eq!(key, KeyBuffer::new());

        key.try_add_unsigned_integer(42u32, 4).unwrap();
        assert_eq!(key.try_get_unsigned_integer::<u32>(4), Ok(42));
        key.try_add_integer(-42i32, 0).unwrap();
        assert_eq!(key.try_get_integer::<i32>(0), Ok(-42));
    }

    #[test]
    #[should_panic]
    fn test_unchecked_out_of_bounds_panics() {
        let mut key: KeyBuffer<1> = KeyBuffer::new();
        key.add_unsigned_integer(1u64, 4);
    }

    #[test]
    fn test_from_bytes() {
        let mut key: KeyBuffer<2> = KeyBuffer::new();
        key.add_integer(i64::MIN, 0);
        key.add_unsigned_integer(99u64, 8);

        let copy = KeyBuffer::<2>::from_bytes(key.as_bytes()).unwrap();
        assert_eq!(copy, key);
        assert_eq!(copy.get_integer::<i64>(0), i64::MIN);

        assert_eq!(
            KeyBuffer::<2>::from_bytes(&[0u8; 8]),
            Err(LayoutError::SourceLength {
                expected: 16,
                actual: 8,
            })
        );
    }

    #[test]
    fn test_typed_fields() {
        let a = Field::<i16>::at(0);
        let b = Field::<u32>::at(2);

        let mut key: KeyBuffer<1> = KeyBuffer::new();
        key.put(a, -300);
        key.put(b, 0xDEAD_BEEF);

        assert_eq!(key.get(a), -300);
        assert_eq!(key.get(b), 0xDEAD_BEEF);
        // put/get dan add_*/get_* menghasilkan bytes yang sama
        assert_eq!(key.get_integer::<i16>(0), -300);
        assert_eq!(key.get_unsigned_integer::<u32>(2), 0xDEAD_BEEF);
    }

    #[test]
    fn test_compare_is_memcmp() {
        let mut a: KeyBuffer<1> = KeyBuffer::new();
        let mut b: KeyBuffer<1> = KeyBuffer::new();

        // Di little-endian host, perbandingan per-word akan salah di sini
        a.add_unsigned_integer(0x01u8, 0);
        b.add_unsigned_integer(0x00u8, 0);
        b.add_unsigned_integer(0xFFu8, 7);

        assert_eq!(KeyBuffer::compare(&a, &b), Ordering::Greater);
        assert!(KeyBuffer::less_than(&b, &a));
        assert!(!KeyBuffer::equals(&a, &b));
        assert!(b < a);
    }

    #[test]
    fn test_debug_format() {
        let mut key: KeyBuffer<1> = KeyBuffer::new();
        key.add_unsigned_integer(0xABu8, 0);
        assert_eq!(format!("{:?}", key), "KeyBuffer<1>(ab00000000000000)");
    }
}
