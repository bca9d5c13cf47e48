//! Error-recovery hooks for unterminated literals.
//!
//! When a literal mode reaches the end of the buffer without finding its
//! terminator, the lexer delegates to the matching hook. A hook may mutate
//! the lexer (reposition the cursor, adjust the mode stack) to resume
//! lexing, and returns the kind to use for the token being emitted. The
//! default hooks return [`TokenKind::Eof`], which ends the stream cleanly.
//!
//! Hooks are plain function pointers, so the table is `Copy` and carries no
//! lifetime of its own.

use crate::lexer::Lexer;
use crate::token::TokenKind;

/// One recovery callback. Receives the lexer mid-token and returns the
/// kind to emit. Must not call [`Lexer::lex`] re-entrantly.
pub type RecoveryHook = for<'src> fn(&mut Lexer<'src>) -> TokenKind;

/// Recovery table: one hook per unterminated-literal class.
#[derive(Clone, Copy, Debug)]
pub struct RecoveryHooks {
    /// A `=begin` block with no `=end` line.
    pub unterminated_embdoc: RecoveryHook,
    /// A `%w`/`%i` list with no closing delimiter.
    pub unterminated_list: RecoveryHook,
    /// A regexp with no closing delimiter.
    pub unterminated_regexp: RecoveryHook,
    /// A string with no closing delimiter.
    pub unterminated_string: RecoveryHook,
}

/// Default hook: no recovery, end the stream.
fn halt(_lexer: &mut Lexer<'_>) -> TokenKind {
    TokenKind::Eof
}

impl Default for RecoveryHooks {
    fn default() -> Self {
        RecoveryHooks {
            unterminated_embdoc: halt,
            unterminated_list: halt,
            unterminated_regexp: halt,
            unterminated_string: halt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SourceBuffer;

    #[test]
    fn default_hooks_halt_the_stream() {
        let buf = SourceBuffer::new(b"\"unterminated");
        let mut lexer = Lexer::new(&buf);
        let hooks = RecoveryHooks::default();
        assert_eq!((hooks.unterminated_string)(&mut lexer), TokenKind::Eof);
        assert_eq!((hooks.unterminated_embdoc)(&mut lexer), TokenKind::Eof);
        assert_eq!((hooks.unterminated_list)(&mut lexer), TokenKind::Eof);
        assert_eq!((hooks.unterminated_regexp)(&mut lexer), TokenKind::Eof);
    }

    #[test]
    fn table_is_copy() {
        let hooks = RecoveryHooks::default();
        let copied = hooks;
        let _ = (hooks, copied);
    }
}
