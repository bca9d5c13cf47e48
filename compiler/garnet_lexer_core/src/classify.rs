//! Pure byte classification predicates.
//!
//! Every predicate takes a single byte and consults no state, no locale,
//! and no encoding tables. Garnet source is lexed byte-at-a-time: bytes
//! outside the ASCII identifier range are simply not identifier material,
//! which is how non-ASCII input ends up as `Invalid` tokens rather than
//! being decoded.
//!
//! All predicates return `false` for the sentinel byte (`0x00`), so
//! `eat_while` loops terminate naturally at the end of the buffer.

/// Returns `true` for `0` and `1`.
#[inline]
pub(crate) fn is_binary_digit(b: u8) -> bool {
    matches!(b, b'0' | b'1')
}

/// Returns `true` for `0`–`7`.
#[inline]
pub(crate) fn is_octal_digit(b: u8) -> bool {
    matches!(b, b'0'..=b'7')
}

/// Returns `true` for `0`–`9`.
#[inline]
pub(crate) fn is_decimal_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// Returns `true` for `0`–`9`, `a`–`f`, and `A`–`F`.
#[inline]
pub(crate) fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

/// Returns `true` if `b` can begin an identifier: `a`–`z`, `A`–`Z`, or `_`.
#[inline]
pub(crate) fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// 256-byte lookup table for identifier continuation bytes.
/// `true` for a-z, A-Z, 0-9, and underscore.
/// Table lookup replaces the multi-range `matches!` with a single indexed read.
/// The sentinel byte (0x00) maps to `false`, naturally terminating loops.
static IS_IDENT_CONTINUE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0u16;
    while i < 256 {
        table[i as usize] = matches!(
            i as u8,
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_'
        );
        i += 1;
    }
    table
};

/// Returns `true` if `b` can continue an identifier.
#[inline]
pub(crate) fn is_ident_continue(b: u8) -> bool {
    IS_IDENT_CONTINUE_TABLE[b as usize]
}

/// Returns `true` for horizontal whitespace: space, tab, form feed,
/// carriage return, and vertical tab. Newlines are significant (they
/// produce `Newline` tokens) and are excluded.
#[inline]
pub(crate) fn is_inline_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\x0C' | b'\r' | b'\x0B')
}

/// Returns `true` for any whitespace byte, newline included.
///
/// Word-list bodies treat newlines as separators rather than tokens,
/// which is the one place this broader class is needed.
#[inline]
pub(crate) fn is_whitespace(b: u8) -> bool {
    is_inline_whitespace(b) || b == b'\n'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_classes() {
        assert!(is_binary_digit(b'0'));
        assert!(is_binary_digit(b'1'));
        assert!(!is_binary_digit(b'2'));

        assert!(is_octal_digit(b'7'));
        assert!(!is_octal_digit(b'8'));

        assert!(is_decimal_digit(b'9'));
        assert!(!is_decimal_digit(b'a'));

        assert!(is_hex_digit(b'a'));
        assert!(is_hex_digit(b'F'));
        assert!(!is_hex_digit(b'g'));
    }

    #[test]
    fn identifier_start_excludes_digits() {
        assert!(is_ident_start(b'a'));
        assert!(is_ident_start(b'Z'));
        assert!(is_ident_start(b'_'));
        assert!(!is_ident_start(b'0'));
        assert!(!is_ident_start(b'$'));
    }

    #[test]
    fn identifier_continue_includes_digits() {
        assert!(is_ident_continue(b'a'));
        assert!(is_ident_continue(b'Z'));
        assert!(is_ident_continue(b'_'));
        assert!(is_ident_continue(b'0'));
        assert!(!is_ident_continue(b'!'));
        assert!(!is_ident_continue(b'?'));
    }

    #[test]
    fn table_matches_reference_predicate() {
        for b in 0u16..=255 {
            let b = b as u8;
            let reference = b.is_ascii_alphanumeric() || b == b'_';
            assert_eq!(
                is_ident_continue(b),
                reference,
                "table disagrees with reference for byte {b:#04x}",
            );
        }
    }

    #[test]
    fn whitespace_classes() {
        for b in [b' ', b'\t', b'\x0C', b'\r', b'\x0B'] {
            assert!(is_inline_whitespace(b));
            assert!(is_whitespace(b));
        }
        assert!(!is_inline_whitespace(b'\n'));
        assert!(is_whitespace(b'\n'));
        assert!(!is_whitespace(b'a'));
    }

    #[test]
    fn sentinel_byte_matches_nothing() {
        assert!(!is_ident_start(0));
        assert!(!is_ident_continue(0));
        assert!(!is_decimal_digit(0));
        assert!(!is_inline_whitespace(0));
        assert!(!is_whitespace(0));
    }
}
