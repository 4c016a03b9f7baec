//! Field descriptors dan schema layout
//!
//! Key sendiri tidak menyimpan schema. `Field<T>` membawa offset + tipe
//! sehingga encode dan decode memakai descriptor yang sama, dan
//! `KeyLayout` memvalidasi bounds/overlap sekali saat build, bukan di hot path.

use std::marker::PhantomData;

use crate::codec::KeyInt;
use crate::error::{LayoutError, Result};

/// Typed field descriptor: offset dalam bytes + tipe integer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<T: KeyInt> {
    offset: usize,
    _ty: PhantomData<T>,
}

impl<T: KeyInt> Field<T> {
    /// Descriptor untuk field bertipe `T` di `offset`.
    ///
    /// Tidak ada validasi di sini; gunakan `KeyLayout` untuk itu.
    #[inline(always)]
    pub const fn at(offset: usize) -> Self {
        Self {
            offset,
            _ty: PhantomData,
        }
    }

    #[inline(always)]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[inline(always)]
    pub const fn width(&self) -> usize {
        T::WIDTH
    }

    /// Offset pertama setelah field ini
    #[inline(always)]
    pub const fn end(&self) -> usize {
        self.offset + T::WIDTH
    }

    /// Descriptor untyped
    pub const fn spec(&self) -> FieldSpec {
        FieldSpec {
            offset: self.offset,
            width: T::WIDTH,
            signed: T::SIGNED,
        }
    }
}

/// Descriptor tanpa tipe: (offset, width, signedness)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    pub offset: usize,
    pub width: usize,
    pub signed: bool,
}

impl FieldSpec {
    #[inline(always)]
    pub const fn end(&self) -> usize {
        self.offset + self.width
    }
}

/// Schema tervalidasi untuk key dengan `N` words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLayout<const N: usize> {
    // Terurut berdasarkan offset
    fields: Vec<FieldSpec>,
}

impl<const N: usize> KeyLayout<N> {
    /// Kapasitas key dalam bytes
    pub const CAPACITY: usize = N * 8;

    pub fn builder() -> KeyLayoutBuilder<N> {
        KeyLayoutBuilder::new()
    }

    /// Field dalam urutan offset
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Byte terakhir yang dipakai + 1
    pub fn used_bytes(&self) -> usize {
        self.fields.iter().map(FieldSpec::end).max().unwrap_or(0)
    }

    /// Cek apakah `field` termasuk dalam schema ini (offset, width, signedness sama)
    pub fn contains<T: KeyInt>(&self, field: Field<T>) -> bool {
        self.fields.contains(&field.spec())
    }
}

/// Builder untuk `KeyLayout`.
///
/// `field::<T>()` menaruh field tepat setelah field sebelumnya, sama seperti
/// menghitung `offset + size_of::<T>()` manual. `field_at::<T>(offset)`
/// untuk penempatan eksplisit.
#[derive(Debug, Default)]
pub struct KeyLayoutBuilder<const N: usize> {
    fields: Vec<FieldSpec>,
    cursor: usize,
}

impl<const N: usize> KeyLayoutBuilder<N> {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            cursor: 0,
        }
    }

    /// Tambah field di posisi cursor
    pub fn field<T: KeyInt>(&mut self) -> Field<T> {
        self.field_at(self.cursor)
    }

    /// Tambah field di offset tertentu
    pub fn field_at<T: KeyInt>(&mut self, offset: usize) -> Field<T> {
        let field = Field::<T>::at(offset);
        self.fields.push(field.spec());
        self.cursor = self.cursor.max(field.end());
        field
    }

    /// Validasi bounds dan overlap, lalu bekukan schema
    pub fn build(self) -> Result<KeyLayout<N>> {
        let capacity = KeyLayout::<N>::CAPACITY;
        let mut fields = self.fields;

        for f in &fields {
            match f.offset.checked_add(f.width) {
                Some(end) if end <= capacity => {}
                _ => {
                    return Err(LayoutError::OutOfBounds {
                        offset: f.offset,
                        width: f.width,
                        capacity,
                    })
                }
            }
        }

        fields.sort_by_key(|f| f.offset);
        for pair in fields.windows(2) {
            if pair[1].offset < pair[0].end() {
                return Err(LayoutError::Overlap {
                    first: pair[0].offset,
                    first_end: pair[0].end(),
                    second: pair[1].offset,
                });
            }
        }

        tracing::trace!(
            words = N,
            fields = fields.len(),
            "key layout built"
        );

        Ok(KeyLayout { fields })
    }
}
