//! Streaming lexer core for the Garnet scripting language.
//!
//! This crate provides a standalone, pure lexer with no compiler
//! dependencies. It is designed to be reusable by external tools (parsers,
//! token-stream remappers, syntax highlighters) without pulling in a whole
//! compiler.
//!
//! # Architecture
//!
//! The lexer is a mode-stacked state machine over an immutable byte buffer:
//!
//! - [`SourceBuffer`]: owns the source bytes plus a `0x00` sentinel and
//!   cache-line padding, so scanning needs no bounds checks.
//! - [`Cursor`]: a `Copy` byte cursor with peek/advance/match primitives
//!   and `memchr`-accelerated content skips.
//! - [`Lexer`]: the emission loop and dispatchers. Token meaning is
//!   context dependent (`}` closes either a brace expression or an
//!   interpolation, `#` starts a comment in code but an interpolation
//!   trigger in a string), so each open literal pushes a [`LexMode`] whose
//!   terminator and interpolation flag govern the scan until it pops.
//! - [`Token`] / [`TokenKind`]: the flat output stream. Tokens are
//!   `(kind, start, end)` triples; lexeme interpretation belongs to the
//!   consumer.
//! - [`RecoveryHooks`]: per-class callbacks for unterminated literals. The
//!   defaults end the stream cleanly at `Eof`.
//!
//! # Usage
//!
//! ```
//! use garnet_lexer_core::{tokenize, TokenKind};
//!
//! let source = b"def greet(name); \"hi #{name}\"; end";
//! let tokens = tokenize(source);
//! assert_eq!(tokens[0].kind, TokenKind::KeywordDef);
//! assert_eq!(tokens[1].lexeme(source), b"greet");
//! ```
//!
//! # Stability
//!
//! - `TokenKind`: the enumeration is closed; consumers may match
//!   exhaustively.
//! - `Token`, `SourceBuffer`, `Cursor`, `Lexer`: API is stable.
//! - Heredocs are not lexed: their openers end the stream. Bytes outside
//!   ASCII never form identifiers and surface as `Invalid` tokens.

mod classify;
mod cursor;
mod lex_mode;
mod lexer;
mod recovery;
mod source_buffer;
mod token;

pub use cursor::Cursor;
pub use lex_mode::{LexMode, ModeKind, ModeStack};
pub use lexer::Lexer;
pub use recovery::{RecoveryHook, RecoveryHooks};
pub use source_buffer::SourceBuffer;
pub use token::{Token, TokenKind};

/// Convenience function: lex a source and collect all tokens.
///
/// Returns a `Vec<Token>` containing every token except the final `Eof`.
/// For streaming access, or to customize recovery, construct a
/// [`SourceBuffer`] + [`Lexer`] directly.
pub fn tokenize(source: &[u8]) -> Vec<Token> {
    let buf = SourceBuffer::new(source);
    let mut lexer = Lexer::new(&buf);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.lex();
        if token.kind == TokenKind::Eof {
            break;
        }
        tokens.push(token);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_excludes_eof() {
        let tokens = tokenize(b"1 + 2");
        assert_eq!(tokens.len(), 3);
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![TokenKind::Integer, TokenKind::Plus, TokenKind::Integer]
        );
    }

    #[test]
    fn tokenize_empty_source() {
        assert!(tokenize(b"").is_empty());
    }
}
