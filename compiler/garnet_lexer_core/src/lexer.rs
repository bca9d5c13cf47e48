//! The streaming lexer: emission loop, default-mode dispatcher, and the
//! per-mode literal scanners.
//!
//! # Design
//!
//! [`Lexer::lex`] rotates `previous <- current`, dispatches on the mode at
//! the top of the mode stack, and writes the new current token as a
//! `(kind, start, end)` triple. The default-mode dispatcher is a single
//! match over the first byte of the token; each arm calls a focused method
//! that advances the cursor and returns a [`TokenKind`]. Literal modes
//! (string, regexp, list, embdoc, symbol) have their own scanners that
//! consume bytes until the saved terminator or an interpolation trigger.
//!
//! Several decisions depend on the previously emitted token: `!@`, `+@`,
//! `-@`, `~@` are operator method names only after `def` or `.`, `[]` only
//! after `.`, keywords are suppressed after `.`, and `{` after `->` opens a
//! lambda body. A single-slot history maintained by the emission loop
//! covers all of them; no lookahead buffer is needed.
//!
//! Errors never stop the stream: malformed input becomes an [`Invalid`]
//! token with the cursor advanced past at least one byte, and unterminated
//! literals route through the [`RecoveryHooks`] table.
//!
//! [`Invalid`]: TokenKind::Invalid

use crate::classify::{
    is_binary_digit, is_decimal_digit, is_hex_digit, is_ident_continue, is_ident_start,
    is_inline_whitespace, is_octal_digit, is_whitespace,
};
use crate::cursor::Cursor;
use crate::lex_mode::{LexMode, ModeKind, ModeStack};
use crate::recovery::RecoveryHooks;
use crate::source_buffer::SourceBuffer;
use crate::token::{keyword_kind, Token, TokenKind};

/// Returns the byte that closes a percent literal opened with `open`.
///
/// The four bracketing delimiters pair with their counterparts; any other
/// byte terminates itself.
fn matching_terminator(open: u8) -> u8 {
    match open {
        b'(' => b')',
        b'[' => b']',
        b'{' => b'}',
        b'<' => b'>',
        _ => open,
    }
}

/// The streaming lexer over a borrowed source buffer.
///
/// Construct one per source with [`Lexer::new`] (or
/// [`Lexer::with_recovery`] to customize unterminated-literal handling),
/// then drain it:
///
/// ```
/// use garnet_lexer_core::{Lexer, SourceBuffer, TokenKind};
///
/// let buf = SourceBuffer::new(b"x + 1");
/// let mut lexer = Lexer::new(&buf);
/// loop {
///     let token = lexer.lex();
///     if token.kind == TokenKind::Eof {
///         break;
///     }
/// }
/// ```
///
/// A lexer is single-threaded and fully synchronous; distinct lexers over
/// the same buffer may run in parallel because the buffer is read-only.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    /// Where the token being lexed begins. Written by the dispatchers,
    /// never by the cursor primitives.
    token_start: u32,
    previous: Token,
    current: Token,
    /// 1-based line counter.
    line: u32,
    modes: ModeStack,
    recovery: RecoveryHooks,
    /// Latched once an `Eof` token is emitted; afterwards `lex()` keeps
    /// returning it without re-entering the dispatcher.
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// Create a lexer with the default recovery hooks (halt on
    /// unterminated literals).
    pub fn new(buffer: &'src SourceBuffer) -> Self {
        Self::with_recovery(buffer, RecoveryHooks::default())
    }

    /// Create a lexer with a custom recovery table.
    pub fn with_recovery(buffer: &'src SourceBuffer, recovery: RecoveryHooks) -> Self {
        Lexer {
            cursor: buffer.cursor(),
            token_start: 0,
            previous: Token::new(TokenKind::Eof, 0, 0),
            current: Token::new(TokenKind::Eof, 0, 0),
            line: 1,
            modes: ModeStack::new(),
            recovery,
            finished: false,
        }
    }

    // ─── Emission loop ──────────────────────────────────────────────────

    /// Advance to the next token.
    ///
    /// Rotates the previous token, runs the dispatcher for the current
    /// mode, and writes the new current token. Idempotent after `Eof`:
    /// once the stream has ended, further calls keep returning the same
    /// `Eof` token.
    pub fn lex(&mut self) -> Token {
        if self.finished {
            self.previous = self.current;
            return self.current;
        }

        self.previous = self.current;
        let kind = match self.modes.kind() {
            ModeKind::Default | ModeKind::EmbExpr => self.lex_default(),
            ModeKind::EmbDoc => self.lex_embdoc(),
            ModeKind::List => self.lex_list(),
            ModeKind::Regexp => self.lex_regexp(),
            ModeKind::String => self.lex_string(),
            ModeKind::Symbol => self.lex_symbol(),
        };
        if kind == TokenKind::Eof {
            self.finished = true;
        }
        self.current = Token::new(kind, self.token_start, self.cursor.pos());
        self.current
    }

    /// The most recently emitted token.
    pub fn current(&self) -> Token {
        self.current
    }

    /// The token emitted before the current one.
    pub fn previous(&self) -> Token {
        self.previous
    }

    /// The 1-based line number at the cursor.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Nesting depth of the mode stack, the permanent base included.
    pub fn mode_depth(&self) -> usize {
        self.modes.depth()
    }

    /// Leave the current literal context without consuming anything.
    ///
    /// Intended for recovery hooks: a hook that wants lexing to resume in
    /// code mode after an unterminated literal pops the literal's mode
    /// here and returns a non-`Eof` kind.
    pub fn abandon_literal(&mut self) {
        self.modes.pop();
    }

    // ─── Default mode ───────────────────────────────────────────────────

    /// Lex one token of plain code. Shared by the `Default` and `EmbExpr`
    /// modes; the only difference is that `}` pops an embedded expression.
    fn lex_default(&mut self) -> TokenKind {
        self.cursor.eat_while(is_inline_whitespace);
        self.token_start = self.cursor.pos();

        if self.cursor.at_end() {
            return TokenKind::Eof;
        }

        match self.cursor.bump() {
            // NUL, ^D, and ^Z are end-of-script sentinels wherever they
            // appear. (The buffer-end sentinel was handled above without
            // consuming anything.)
            0 | 0x04 | 0x1A => TokenKind::Eof,

            b'#' => self.comment(),

            b'\n' => {
                self.line += 1;
                TokenKind::Newline
            }

            b',' => TokenKind::Comma,
            b'(' => TokenKind::ParenthesisLeft,
            b')' => TokenKind::ParenthesisRight,
            b';' => TokenKind::Semicolon,
            b']' => TokenKind::BracketRight,

            b'[' => {
                if self.previous.kind == TokenKind::Dot && self.cursor.eat(b']') {
                    TokenKind::BracketLeftRight
                } else {
                    TokenKind::BracketLeft
                }
            }

            b'{' => {
                if self.previous.kind == TokenKind::MinusGreater {
                    TokenKind::LambdaBegin
                } else {
                    TokenKind::BraceLeft
                }
            }

            b'}' => {
                if self.modes.kind() == ModeKind::EmbExpr {
                    self.modes.pop();
                    TokenKind::EmbExprEnd
                } else {
                    TokenKind::BraceRight
                }
            }

            // * ** **= *=
            b'*' => {
                if self.cursor.eat(b'*') {
                    if self.cursor.eat(b'=') {
                        TokenKind::StarStarEqual
                    } else {
                        TokenKind::StarStar
                    }
                } else if self.cursor.eat(b'=') {
                    TokenKind::StarEqual
                } else {
                    TokenKind::Star
                }
            }

            // ! != !~ !@
            b'!' => {
                if self.cursor.eat(b'=') {
                    TokenKind::BangEqual
                } else if self.cursor.eat(b'~') {
                    TokenKind::BangTilde
                } else if self.after_def_or_dot() && self.cursor.eat(b'@') {
                    TokenKind::BangAt
                } else {
                    TokenKind::Bang
                }
            }

            b'=' => self.equal(),
            b'<' => self.less(),

            // > >> >>= >=
            b'>' => {
                if self.cursor.eat(b'>') {
                    if self.cursor.eat(b'=') {
                        TokenKind::GreaterGreaterEqual
                    } else {
                        TokenKind::GreaterGreater
                    }
                } else if self.cursor.eat(b'=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                }
            }

            b'"' => {
                self.modes.push(LexMode::string(b'"', true));
                TokenKind::StringBegin
            }

            b'`' => {
                self.modes.push(LexMode::string(b'`', true));
                TokenKind::Backtick
            }

            b'\'' => {
                self.modes.push(LexMode::string(b'\'', false));
                TokenKind::StringBegin
            }

            // ?a character literal, otherwise the ternary operator
            b'?' => {
                if is_ident_continue(self.cursor.current()) {
                    self.cursor.advance();
                    TokenKind::CharacterLiteral
                } else {
                    TokenKind::QuestionMark
                }
            }

            // & && &&= &=
            b'&' => {
                if self.cursor.eat(b'&') {
                    if self.cursor.eat(b'=') {
                        TokenKind::AmpersandAmpersandEqual
                    } else {
                        TokenKind::AmpersandAmpersand
                    }
                } else if self.cursor.eat(b'=') {
                    TokenKind::AmpersandEqual
                } else {
                    TokenKind::Ampersand
                }
            }

            // | || ||= |=
            b'|' => {
                if self.cursor.eat(b'|') {
                    if self.cursor.eat(b'=') {
                        TokenKind::PipePipeEqual
                    } else {
                        TokenKind::PipePipe
                    }
                } else if self.cursor.eat(b'=') {
                    TokenKind::PipeEqual
                } else {
                    TokenKind::Pipe
                }
            }

            // + += +@
            b'+' => {
                if self.cursor.eat(b'=') {
                    TokenKind::PlusEqual
                } else if self.after_def_or_dot() && self.cursor.eat(b'@') {
                    TokenKind::PlusAt
                } else {
                    TokenKind::Plus
                }
            }

            // - -> -= -@
            b'-' => {
                if self.cursor.eat(b'>') {
                    TokenKind::MinusGreater
                } else if self.cursor.eat(b'=') {
                    TokenKind::MinusEqual
                } else if self.after_def_or_dot() && self.cursor.eat(b'@') {
                    TokenKind::MinusAt
                } else {
                    TokenKind::Minus
                }
            }

            // . .. ...
            b'.' => {
                if !self.cursor.eat(b'.') {
                    TokenKind::Dot
                } else if self.cursor.eat(b'.') {
                    TokenKind::DotDotDot
                } else {
                    TokenKind::DotDot
                }
            }

            first @ b'0'..=b'9' => self.numeric(first),

            // :: or a symbol opener
            b':' => {
                if self.cursor.eat(b':') {
                    TokenKind::ColonColon
                } else if is_ident_continue(self.cursor.current()) {
                    self.modes.push(LexMode::symbol());
                    TokenKind::SymbolBegin
                } else {
                    TokenKind::Colon
                }
            }

            // /= or division before a space, otherwise a regexp opener
            b'/' => {
                if self.cursor.eat(b'=') {
                    TokenKind::SlashEqual
                } else if self.cursor.current() == b' ' {
                    TokenKind::Slash
                } else {
                    self.modes.push(LexMode::regexp(b'/', false));
                    TokenKind::RegexpBegin
                }
            }

            // ^ ^=
            b'^' => {
                if self.cursor.eat(b'=') {
                    TokenKind::CaretEqual
                } else {
                    TokenKind::Caret
                }
            }

            // ~ ~@
            b'~' => {
                if self.after_def_or_dot() && self.cursor.eat(b'@') {
                    TokenKind::TildeAt
                } else {
                    TokenKind::Tilde
                }
            }

            // TODO: line continuations
            b'\\' => TokenKind::Invalid,

            b'%' => self.percent(),
            b'$' => self.global_variable(),
            b'@' => self.at_variable(),

            first => {
                if !is_ident_start(first) {
                    return TokenKind::Invalid;
                }

                let kind = self.identifier();

                // Label detection: an identifier followed by a single `:`
                // (but not `::`) is a label, keywords included.
                if self.cursor.current() == b':' && self.cursor.peek() != b':' {
                    self.cursor.advance();
                    return TokenKind::Label;
                }

                kind
            }
        }
    }

    /// `true` when the previous token puts the lexer after `def` or `.`,
    /// where `!@`, `+@`, `-@`, and `~@` name unary operator methods.
    fn after_def_or_dot(&self) -> bool {
        matches!(
            self.previous.kind,
            TokenKind::KeywordDef | TokenKind::Dot
        )
    }

    /// Consume a `#` comment through the end of the line (not past an
    /// end-of-script sentinel), including the trailing newline if present.
    fn comment(&mut self) -> TokenKind {
        let _ = self.cursor.skip_to_any2(b'\n', 0);
        let _ = self.cursor.eat(b'\n');
        TokenKind::Comment
    }

    /// Dispatch for `=`: embedded documentation at line start, otherwise
    /// the `=`-family operators.
    fn equal(&mut self) -> TokenKind {
        // `=begin` opens embedded documentation only at the start of a
        // line. The start of the buffer counts as a line start.
        let at_line_start =
            self.token_start == 0 || self.cursor.byte_at(self.token_start - 1) == b'\n';
        if at_line_start && self.cursor.rest().starts_with(b"begin\n") {
            self.cursor.advance_n(6);
            self.modes.push(LexMode::embdoc());
            return TokenKind::EmbDocBegin;
        }

        if self.cursor.eat(b'>') {
            TokenKind::EqualGreater
        } else if self.cursor.eat(b'~') {
            TokenKind::EqualTilde
        } else if self.cursor.eat(b'=') {
            if self.cursor.eat(b'=') {
                TokenKind::EqualEqualEqual
            } else {
                TokenKind::EqualEqual
            }
        } else {
            TokenKind::Equal
        }
    }

    /// Dispatch for `<`: shifts, comparisons, and the heredoc stub.
    fn less(&mut self) -> TokenKind {
        if self.cursor.eat(b'<') {
            if self.cursor.eat(b'=') {
                return TokenKind::LessLessEqual;
            }
            // Heredocs are not implemented yet; their openers end the
            // stream rather than mislex the body.
            if self.cursor.eat(b'-') || self.cursor.eat(b'~') {
                return TokenKind::Eof;
            }
            return TokenKind::LessLess;
        }
        if self.cursor.eat(b'=') {
            if self.cursor.eat(b'>') {
                TokenKind::LessEqualGreater
            } else {
                TokenKind::LessEqual
            }
        } else {
            TokenKind::Less
        }
    }

    /// Dispatch for `%`: `%=`, the percent literal family, or bare `%`.
    fn percent(&mut self) -> TokenKind {
        match self.cursor.current() {
            b'=' => {
                self.cursor.advance();
                TokenKind::PercentEqual
            }
            b'i' => {
                self.cursor.advance();
                let term = self.delimiter();
                self.modes.push(LexMode::list(term, false));
                TokenKind::PercentLowerI
            }
            b'I' => {
                self.cursor.advance();
                let term = self.delimiter();
                self.modes.push(LexMode::list(term, true));
                TokenKind::PercentUpperI
            }
            b'r' => {
                self.cursor.advance();
                let term = self.delimiter();
                self.modes.push(LexMode::regexp(term, true));
                TokenKind::RegexpBegin
            }
            b'q' => {
                self.cursor.advance();
                let term = self.delimiter();
                self.modes.push(LexMode::string(term, false));
                TokenKind::StringBegin
            }
            b'Q' => {
                self.cursor.advance();
                let term = self.delimiter();
                self.modes.push(LexMode::string(term, true));
                TokenKind::StringBegin
            }
            b'w' => {
                self.cursor.advance();
                let term = self.delimiter();
                self.modes.push(LexMode::list(term, false));
                TokenKind::PercentLowerW
            }
            b'W' => {
                self.cursor.advance();
                let term = self.delimiter();
                self.modes.push(LexMode::list(term, true));
                TokenKind::PercentUpperW
            }
            b'x' => {
                self.cursor.advance();
                let term = self.delimiter();
                self.modes.push(LexMode::string(term, true));
                TokenKind::PercentLowerX
            }
            _ => TokenKind::Percent,
        }
    }

    /// Consume the raw delimiter byte of a percent literal and compute its
    /// terminator. At the end of the buffer there is no delimiter to
    /// consume; the terminator defaults to the sentinel and the literal
    /// mode falls straight through to its recovery hook.
    fn delimiter(&mut self) -> u8 {
        if self.cursor.at_end() {
            return 0;
        }
        matching_terminator(self.cursor.bump())
    }

    /// Scan a `$`-prefixed global: punctuation specials, back-references,
    /// nth-references, and identifier-form globals.
    fn global_variable(&mut self) -> TokenKind {
        match self.cursor.current() {
            // $~ match-data, $* argv, $$ pid, $? last status, $! error,
            // $@ error position, $/ input separator, $\ output separator,
            // $; field separator, $, output field separator, $. last line
            // number, $= ignorecase, $: load path, $< reading filename,
            // $> default output, $" loaded files
            b'~' | b'*' | b'$' | b'?' | b'!' | b'@' | b'/' | b'\\' | b';' | b',' | b'.'
            | b'=' | b':' | b'<' | b'>' | b'"' => {
                self.cursor.advance();
                TokenKind::GlobalVariable
            }

            // $& last match, $` before match, $' after match, $+ last group
            b'&' | b'`' | b'\'' | b'+' => {
                self.cursor.advance();
                TokenKind::BackReference
            }

            // $1 through $9 (and beyond) refer to match groups. $0 is the
            // program name and takes the identifier path below.
            b'1'..=b'9' => {
                self.cursor.advance();
                self.cursor.eat_while(is_decimal_digit);
                TokenKind::NthReference
            }

            other => {
                if is_ident_continue(other) {
                    self.cursor.eat_while(is_ident_continue);
                    TokenKind::GlobalVariable
                } else {
                    TokenKind::Invalid
                }
            }
        }
    }

    /// Scan `@foo` / `@@foo`. A marker with no identifier after it is
    /// invalid.
    fn at_variable(&mut self) -> TokenKind {
        let kind = if self.cursor.eat(b'@') {
            TokenKind::ClassVariable
        } else {
            TokenKind::InstanceVariable
        };

        if is_ident_start(self.cursor.current()) {
            self.cursor.eat_while(is_ident_continue);
            kind
        } else {
            TokenKind::Invalid
        }
    }

    // ─── Numeric literals ───────────────────────────────────────────────

    /// Scan a numeric literal; the first digit has been consumed. After a
    /// valid prefix, `r` upgrades to a rational and `i` to an imaginary
    /// (in that order, so `2ri` is one imaginary token).
    fn numeric(&mut self, first: u8) -> TokenKind {
        let mut kind = self.numeric_prefix(first);

        if kind != TokenKind::Invalid {
            if self.cursor.eat(b'r') {
                kind = TokenKind::RationalNumber;
            }
            if self.cursor.eat(b'i') {
                kind = TokenKind::ImaginaryNumber;
            }
        }

        kind
    }

    /// Scan the base prefix and digit run of a numeric literal.
    fn numeric_prefix(&mut self, first: u8) -> TokenKind {
        let mut kind = TokenKind::Integer;

        if first == b'0' {
            match self.cursor.current() {
                // 0d1111 is a decimal number
                b'd' | b'D' => {
                    self.cursor.advance();
                    if !is_decimal_digit(self.cursor.current()) {
                        return TokenKind::Invalid;
                    }
                    self.digit_run(is_decimal_digit);
                }

                // 0b1111 is a binary number
                b'b' | b'B' => {
                    self.cursor.advance();
                    if !is_binary_digit(self.cursor.current()) {
                        return TokenKind::Invalid;
                    }
                    self.digit_run(is_binary_digit);
                }

                // 0o1111 and 01111 are octal numbers
                b'o' | b'O' => {
                    self.cursor.advance();
                    if !is_octal_digit(self.cursor.current()) {
                        return TokenKind::Invalid;
                    }
                    self.digit_run(is_octal_digit);
                }
                b'0'..=b'7' => {
                    self.digit_run(is_octal_digit);
                }

                // 0x1111 is a hexadecimal number
                b'x' | b'X' => {
                    self.cursor.advance();
                    if !is_hex_digit(self.cursor.current()) {
                        return TokenKind::Invalid;
                    }
                    self.digit_run(is_hex_digit);
                }

                // 0.xxx and 0exxx are floats
                b'.' | b'e' | b'E' => {
                    kind = self.float_suffix();
                }

                // A bare zero; `08`/`09` end the token here.
                _ => {}
            }
        } else {
            self.digit_run(is_decimal_digit);
            kind = self.float_suffix();
        }

        // A digit run may not end on an underscore.
        if self.cursor.byte_at(self.cursor.pos() - 1) == b'_' {
            return TokenKind::Invalid;
        }

        kind
    }

    /// Consume a run of digits where a single underscore may trail any
    /// digit, including a leading digit the caller has already consumed
    /// (the dispatcher and the fraction/exponent scanners bump the first
    /// digit of their runs before calling this). A trailing underscore is
    /// caught by the caller's last-byte check.
    fn digit_run(&mut self, pred: impl Fn(u8) -> bool) {
        let _ = self.cursor.eat(b'_');
        while pred(self.cursor.current()) {
            self.cursor.advance();
            let _ = self.cursor.eat(b'_');
        }
    }

    /// Scan the optional fractional and exponent suffixes of a decimal
    /// literal. A `.` not followed by a digit is left alone; it is a
    /// method call, not a fraction.
    fn float_suffix(&mut self) -> TokenKind {
        let mut kind = TokenKind::Integer;

        if self.cursor.current() == b'.' {
            if is_decimal_digit(self.cursor.peek()) {
                self.cursor.advance_n(2);
                self.digit_run(is_decimal_digit);
                kind = TokenKind::Float;
            } else {
                return kind;
            }
        }

        if self.cursor.eat(b'e') || self.cursor.eat(b'E') {
            let _ = self.cursor.eat(b'+') || self.cursor.eat(b'-');

            if !is_decimal_digit(self.cursor.current()) {
                return TokenKind::Invalid;
            }
            self.cursor.advance();
            self.digit_run(is_decimal_digit);
            kind = TokenKind::Float;
        }

        kind
    }

    // ─── Identifiers and keywords ───────────────────────────────────────

    /// Scan an identifier whose first byte has been consumed: the
    /// continuation run, the optional `!`/`?` predicate suffix, and
    /// keyword resolution.
    fn identifier(&mut self) -> TokenKind {
        self.cursor.eat_while(is_ident_continue);

        // A `!`/`?` suffix attaches only when it would not steal the first
        // byte of a `!=`/`?=` operator, and always yields an identifier.
        // The one exception is `defined?`, a keyword unless it follows `.`.
        if self.cursor.pos() + 1 < self.cursor.source_len()
            && self.cursor.peek() != b'='
            && (self.cursor.eat(b'!') || self.cursor.eat(b'?'))
        {
            if self.previous.kind != TokenKind::Dot && self.lexeme() == b"defined?" {
                return TokenKind::KeywordDefined;
            }
            return TokenKind::Identifier;
        }

        // `foo.class` is a method call on `foo`, so keywords are only
        // recognized when the identifier does not follow a dot.
        if self.previous.kind != TokenKind::Dot {
            if let Some(keyword) = keyword_kind(self.lexeme()) {
                return keyword;
            }
        }

        if self.cursor.byte_at(self.token_start).is_ascii_uppercase() {
            TokenKind::Constant
        } else {
            TokenKind::Identifier
        }
    }

    /// The bytes of the token currently being lexed.
    fn lexeme(&self) -> &'src [u8] {
        self.cursor.slice(self.token_start, self.cursor.pos())
    }

    // ─── Literal modes ──────────────────────────────────────────────────

    /// One line of an embedded documentation block.
    fn lex_embdoc(&mut self) -> TokenKind {
        self.token_start = self.cursor.pos();

        if self.cursor.rest().starts_with(b"=end\n") {
            self.cursor.advance_n(5);
            self.modes.pop();
            return TokenKind::EmbDocEnd;
        }

        // Consume through the next newline. A line that exhausts the
        // buffer (even one ending in the final newline) means the closing
        // `=end` is missing.
        let _ = self.cursor.skip_past_newline();
        if !self.cursor.at_end() {
            self.line += 1;
            return TokenKind::EmbDocLine;
        }

        let hook = self.recovery.unterminated_embdoc;
        hook(self)
    }

    /// One element, separator, or terminator of a word/symbol list.
    fn lex_list(&mut self) -> TokenKind {
        self.token_start = self.cursor.pos();

        // Whitespace between entries becomes its own separator token.
        if is_whitespace(self.cursor.current()) {
            while is_whitespace(self.cursor.current()) {
                if self.cursor.current() == b'\n' {
                    self.line += 1;
                }
                self.cursor.advance();
            }
            return TokenKind::WordsSep;
        }

        let term = self.modes.current().term;

        while !self.cursor.at_end() {
            let b = self.cursor.current();

            if is_whitespace(b) {
                return TokenKind::StringContent;
            }

            if b == term {
                // Content gathered before the terminator is returned
                // first; the terminator is handled on the next call.
                if self.cursor.pos() > self.token_start {
                    return TokenKind::StringContent;
                }
                self.cursor.advance();
                self.modes.pop();
                return TokenKind::StringEnd;
            }

            self.cursor.advance();
        }

        let hook = self.recovery.unterminated_list;
        hook(self)
    }

    /// Content, interpolation trigger, or terminator of a regexp body.
    ///
    /// Interpolation is always live inside a regexp, whichever way the
    /// literal was opened.
    fn lex_regexp(&mut self) -> TokenKind {
        self.token_start = self.cursor.pos();
        let term = self.modes.current().term;

        if !self.cursor.at_end() && self.cursor.eat(term) {
            // The terminator carries the trailing option letters.
            while matches!(
                self.cursor.current(),
                b'e' | b'i' | b'm' | b'n' | b's' | b'u' | b'x'
            ) {
                self.cursor.advance();
            }
            self.modes.pop();
            return TokenKind::RegexpEnd;
        }

        loop {
            let b = self.cursor.skip_to_any3(term, b'\n', b'#');
            if self.cursor.at_end() {
                break;
            }

            if b == term {
                return TokenKind::StringContent;
            }

            if b == b'\n' {
                self.line += 1;
                self.cursor.advance();
                continue;
            }

            // b == b'#'
            if self.cursor.peek() == b'{' {
                if self.cursor.pos() > self.token_start {
                    return TokenKind::StringContent;
                }
                self.cursor.advance_n(2);
                self.modes.push(LexMode::embexpr());
                return TokenKind::EmbExprBegin;
            }
            self.cursor.advance();
        }

        let hook = self.recovery.unterminated_regexp;
        hook(self)
    }

    /// Content, interpolation trigger, or terminator of a string body.
    fn lex_string(&mut self) -> TokenKind {
        self.token_start = self.cursor.pos();
        let mode = *self.modes.current();

        if !self.cursor.at_end() && self.cursor.eat(mode.term) {
            self.modes.pop();
            return TokenKind::StringEnd;
        }

        loop {
            let b = if mode.interp {
                self.cursor.skip_to_any3(mode.term, b'\n', b'#')
            } else {
                self.cursor.skip_to_any2(mode.term, b'\n')
            };
            if self.cursor.at_end() {
                break;
            }

            if b == mode.term {
                return TokenKind::StringContent;
            }

            if b == b'\n' {
                self.line += 1;
                self.cursor.advance();
                continue;
            }

            // b == b'#', and interpolation is on. Only `#{` opens an
            // embedded expression; `#@ivar` and `#$global` are not
            // supported, so a lone `#` is ordinary content.
            if self.cursor.peek() == b'{' {
                if self.cursor.pos() > self.token_start {
                    return TokenKind::StringContent;
                }
                self.cursor.advance_n(2);
                self.modes.push(LexMode::embexpr());
                return TokenKind::EmbExprBegin;
            }
            self.cursor.advance();
        }

        let hook = self.recovery.unterminated_string;
        hook(self)
    }

    /// The identifier after a symbol-opening `:`. The mode covers exactly
    /// one token and is popped on entry.
    fn lex_symbol(&mut self) -> TokenKind {
        self.token_start = self.cursor.pos();
        self.modes.pop();

        if !self.cursor.at_end() && is_ident_start(self.cursor.current()) {
            self.cursor.advance();
            let kind = self.identifier();
            // A trailing `=` makes this a setter name, which is a plain
            // identifier no matter what the scanner classified.
            if self.cursor.eat(b'=') {
                return TokenKind::Identifier;
            }
            return kind;
        }

        // A symbol opener whose next byte cannot start an identifier
        // (a digit, say). Consume it so the stream keeps moving.
        if !self.cursor.at_end() {
            self.cursor.advance();
        }
        TokenKind::Invalid
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.lex();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}
