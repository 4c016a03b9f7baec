//! Hex dump untuk debugging key
//!
//! Format (bukan bagian dari binary contract):
//! ```text
//! KeyBuffer<2> - 16 bytes
//! 0x00000000    7F FF FF FF 7B 7F FF FF    FF FF FE B2 5C 00 00 00
//! ```
//! 16 bytes per baris, separator setelah byte ke-8, kolom offset di depan.

use std::fmt;
use std::io;

use super::KeyBuffer;

const BYTES_PER_LINE: usize = 16;
const SEPARATOR_AFTER: usize = 8;

/// `Display` adaptor untuk hex dump sebuah key
pub struct RawDump<'a, const N: usize> {
    key: &'a KeyBuffer<N>,
}

impl<const N: usize> fmt::Display for RawDump<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.key.as_bytes();
        writeln!(f, "KeyBuffer<{}> - {} bytes", N, bytes.len())?;

        for (line, chunk) in bytes.chunks(BYTES_PER_LINE).enumerate() {
            write!(f, "0x{:08X}    ", line * BYTES_PER_LINE)?;
            for (i, b) in chunk.iter().enumerate() {
                write!(f, "{:02X} ", b)?;
                if i + 1 == SEPARATOR_AFTER {
                    f.write_str("   ")?;
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl<const N: usize> KeyBuffer<N> {
    /// Hex dump yang bisa di-`format!` / `println!`
    pub fn raw_dump(&self) -> RawDump<'_, N> {
        RawDump { key: self }
    }

    /// Tulis hex dump ke sink
    pub fn write_raw_data<W: io::Write>(&self, sink: &mut W) -> io::Result<()> {
        write!(sink, "{}", self.raw_dump())
    }

    /// Emit hex dump lewat `tracing` (level DEBUG)
    pub fn log_raw_data(&self) {
        tracing::debug!(target: "intskey::raw", "\n{}", self.raw_dump());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_single_word() {
        let mut key: KeyBuffer<1> = KeyBuffer::new();
        key.add_unsigned_integer(0x0102_0304_0506_0708u64, 0);

        let dump = key.raw_dump().to_string();
        assert_eq!(
            dump,
            "KeyBuffer<1> - 8 bytes\n0x00000000    01 02 03 04 05 06 07 08    \n"
        );
    }

    #[test]
    fn test_dump_multiple_lines() {
        let key: KeyBuffer<3> = KeyBuffer::new();
        let dump = key.raw_dump().to_string();
        let lines: Vec<&str> = dump.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "KeyBuffer<3> - 24 bytes");
        assert_eq!(
            lines[1],
            "0x00000000    00 00 00 00 00 00 00 00    00 00 00 00 00 00 00 00 "
        );
        assert_eq!(lines[2], "0x00000010    00 00 00 00 00 00 00 00    ");
    }

    #[test]
    fn test_write_to_sink() {
        let mut key: KeyBuffer<1> = KeyBuffer::new();
        key.add_integer(-1i32, 0);

        let mut sink = Vec::new();
        key.write_raw_data(&mut sink).unwrap();

        let text = String::from_utf8(sink).unwrap();
        assert!(text.contains("7F FF FF FF 00 00 00 00"));
    }
}
