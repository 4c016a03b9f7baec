//! Layout violation errors
//!
//! Hanya API yang di-check (`try_*`, `KeyLayout::build`, `KeyBuffer::from_bytes`)
//! yang mengembalikan error ini. Hot path `add_*` / `get_*` tidak pernah
//! mengembalikan `Result`.

use thiserror::Error;

/// Pelanggaran layout key: offset/width di luar kapasitas atau field overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Field `[offset, offset + width)` tidak muat di dalam key
    #[error("field at offset {offset} ({width} bytes) exceeds key capacity of {capacity} bytes")]
    OutOfBounds {
        offset: usize,
        width: usize,
        capacity: usize,
    },

    /// Dua field dalam satu layout saling tumpang tindih
    #[error("field at offset {second} overlaps field [{first}, {first_end})")]
    Overlap {
        first: usize,
        first_end: usize,
        second: usize,
    },

    /// Panjang raw bytes tidak sama dengan kapasitas key
    #[error("expected {expected} key bytes, got {actual}")]
    SourceLength { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
