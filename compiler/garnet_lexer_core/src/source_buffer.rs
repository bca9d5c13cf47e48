//! Sentinel-terminated source buffer for zero-bounds-check scanning.
//!
//! The buffer guarantees a `0x00` sentinel byte after the source content,
//! allowing the lexer to detect end-of-input without explicit bounds
//! checking on the hot path. The total allocation is rounded up to a
//! 64-byte boundary with one extra cache line appended, so `peek()` and
//! `peek2()` stay in bounds at any cursor position.
//!
//! Input is raw bytes, not `&str`: Garnet source is lexed at the byte
//! level, and a NUL byte in the content is one of the language's
//! end-of-script sentinels rather than an encoding error.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Sentinel-terminated source buffer.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to a 64-byte boundary, plus one
///              source_len (sentinel)          extra full cache line
/// ```
///
/// The sentinel byte at `source_len` is always `0x00`, and every byte after
/// it is `0x00` as well, so lookahead reads near the end of the source are
/// always valid and always see "end of input".
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Owned buffer: `[source_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the actual source content (excludes sentinel and padding).
    source_len: u32,
}

impl SourceBuffer {
    /// Create a new sentinel-terminated buffer from source bytes.
    ///
    /// Copies the source into a cache-line-padded allocation with a `0x00`
    /// sentinel appended.
    ///
    /// # File Size
    ///
    /// Sources larger than `u32::MAX` bytes (~4 GiB) are accepted but
    /// `source_len` saturates at `u32::MAX`; hosts are expected to reject
    /// oversized files before lexing.
    pub fn new(source: &[u8]) -> Self {
        let source_len = source.len();

        // Round up to the next 64-byte boundary, then add one more full
        // cache line so lookahead past the sentinel never leaves the
        // allocation.
        let padded_len = (source_len + 1).next_multiple_of(CACHE_LINE) + CACHE_LINE;

        // Allocate zero-filled, then copy the source bytes over the front.
        // The sentinel (buf[source_len]) and padding are already 0x00.
        let mut buf = vec![0u8; padded_len];
        buf[..source_len].copy_from_slice(source);

        let source_len = u32::try_from(source_len).unwrap_or(u32::MAX);

        Self { buf, source_len }
    }

    /// Returns the source bytes (without sentinel or padding).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Returns the full buffer including sentinel and cache-line padding.
    ///
    /// The byte at index [`len()`](Self::len) is the sentinel (`0x00`).
    pub fn as_sentinel_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    /// Length of the source content in bytes (excludes sentinel and padding).
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the source content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }
}

/// Size assertion: `SourceBuffer` is a Vec plus a length, 32 bytes or less.
const _: () = assert!(std::mem::size_of::<SourceBuffer>() <= 32);

#[cfg(test)]
mod tests {
    use super::*;

    // === Construction ===

    #[test]
    fn empty_source() {
        let buf = SourceBuffer::new(b"");
        assert_eq!(buf.len(), 0);
        assert!(buf.is_empty());
        assert!(buf.as_bytes().is_empty());
        // Sentinel present at index 0
        assert_eq!(buf.as_sentinel_bytes()[0], 0);
    }

    #[test]
    fn ascii_source() {
        let buf = SourceBuffer::new(b"hello");
        assert_eq!(buf.len(), 5);
        assert!(!buf.is_empty());
        assert_eq!(buf.as_bytes(), b"hello");
        // Sentinel after source bytes
        assert_eq!(buf.as_sentinel_bytes()[5], 0);
    }

    #[test]
    fn arbitrary_bytes_are_preserved() {
        let source = [0xFFu8, 0x00, b'a', 0x80, b'\n'];
        let buf = SourceBuffer::new(&source);
        assert_eq!(buf.as_bytes(), &source);
    }

    // === Padding ===

    #[test]
    fn buffer_padded_to_cache_line_with_lookahead_slack() {
        for len in [0, 1, 10, 62, 63, 64, 65, 127, 128, 1000] {
            let source = vec![b'x'; len];
            let buf = SourceBuffer::new(&source);
            let total = buf.as_sentinel_bytes().len();
            assert_eq!(
                total % CACHE_LINE,
                0,
                "buffer length {total} is not cache-line aligned for source length {len}",
            );
            assert!(
                total >= len + 1 + CACHE_LINE,
                "buffer length {total} leaves no lookahead slack for source length {len}",
            );
        }
    }

    #[test]
    fn sentinel_and_padding_are_zero() {
        let buf = SourceBuffer::new(b"abc");
        for &b in &buf.as_sentinel_bytes()[3..] {
            assert_eq!(b, 0, "non-zero byte in sentinel/padding region");
        }
    }

    // === Large source ===

    #[test]
    fn large_source() {
        let source = vec![b'x'; 100_000];
        let buf = SourceBuffer::new(&source);
        assert_eq!(buf.len(), 100_000);
        assert_eq!(buf.as_bytes().len(), 100_000);
        assert_eq!(buf.as_sentinel_bytes()[100_000], 0);
    }

    // === Cursor creation ===

    #[test]
    fn cursor_starts_at_zero() {
        let buf = SourceBuffer::new(b"hello");
        let cursor = buf.cursor();
        assert_eq!(cursor.pos(), 0);
        assert_eq!(cursor.current(), b'h');
    }

    #[test]
    fn cursor_on_empty_source_is_at_end() {
        let buf = SourceBuffer::new(b"");
        let cursor = buf.cursor();
        assert!(cursor.at_end());
        assert_eq!(cursor.current(), 0);
    }
}
