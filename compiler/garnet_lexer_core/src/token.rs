//! Token kind and token type for the streaming lexer.
//!
//! `TokenKind` is the closed vocabulary of the lexer. Every token carries a
//! kind plus a byte range into the source buffer; the byte slice is the
//! lexeme, and any interpretation of it (numeric value, unescaping) belongs
//! to the consumer.
//!
//! # Discriminant Layout
//!
//! Variants are organized into semantic ranges with gaps for future
//! expansion:
//!
//! | Range   | Category                 |
//! |---------|--------------------------|
//! | 0-1     | Control (EOF, invalid)   |
//! | 8-70    | Punctuators & operators  |
//! | 80-105  | Literals & identifiers   |
//! | 112-116 | Percent literal openers  |
//! | 128-168 | Keywords                 |

/// Token kind produced by the lexer.
///
/// The enumeration is closed and stable: downstream consumers (parsers,
/// token-stream remappers) may match on it exhaustively.
///
/// # Representation
///
/// `#[repr(u8)]` ensures each variant is a single byte, enabling compact
/// token storage and cheap tag-based dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    // === Control (0-1) ===
    /// Final token in the stream. Also used for the deliberately
    /// unimplemented heredoc openers.
    Eof = 0,
    /// A byte sequence that matches no rule. The cursor always advances
    /// past at least one byte, so the stream keeps making progress.
    Invalid = 1,

    // === Punctuators & operators (8-70) ===
    /// `&`
    Ampersand = 8,
    /// `&&`
    AmpersandAmpersand,
    /// `&&=`
    AmpersandAmpersandEqual,
    /// `&=`
    AmpersandEqual,
    /// `` ` `` (opens a command string)
    Backtick,
    /// `!`
    Bang,
    /// `!@` (unary-operator method name, only after `def` or `.`)
    BangAt,
    /// `!=`
    BangEqual,
    /// `!~`
    BangTilde,
    /// `{`
    BraceLeft,
    /// `}`
    BraceRight,
    /// `[`
    BracketLeft,
    /// `[]` (element-reference method name, only after `.`)
    BracketLeftRight,
    /// `]`
    BracketRight,
    /// `^`
    Caret,
    /// `^=`
    CaretEqual,
    /// `:`
    Colon,
    /// `::`
    ColonColon,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `..`
    DotDot,
    /// `...`
    DotDotDot,
    /// `=`
    Equal,
    /// `==`
    EqualEqual,
    /// `===`
    EqualEqualEqual,
    /// `=>`
    EqualGreater,
    /// `=~`
    EqualTilde,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `>>`
    GreaterGreater,
    /// `>>=`
    GreaterGreaterEqual,
    /// `{` immediately after `->`
    LambdaBegin,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `<=>`
    LessEqualGreater,
    /// `<<`
    LessLess,
    /// `<<=`
    LessLessEqual,
    /// `-`
    Minus,
    /// `-@` (unary-operator method name, only after `def` or `.`)
    MinusAt,
    /// `-=`
    MinusEqual,
    /// `->`
    MinusGreater,
    /// A newline outside of any other token.
    Newline,
    /// `(`
    ParenthesisLeft,
    /// `)`
    ParenthesisRight,
    /// `%`
    Percent,
    /// `%=`
    PercentEqual,
    /// `|`
    Pipe,
    /// `|=`
    PipeEqual,
    /// `||`
    PipePipe,
    /// `||=`
    PipePipeEqual,
    /// `+`
    Plus,
    /// `+@` (unary-operator method name, only after `def` or `.`)
    PlusAt,
    /// `+=`
    PlusEqual,
    /// `?`
    QuestionMark,
    /// `;`
    Semicolon,
    /// `/` followed by a space (division rather than a regexp opener)
    Slash,
    /// `/=`
    SlashEqual,
    /// `*`
    Star,
    /// `*=`
    StarEqual,
    /// `**`
    StarStar,
    /// `**=`
    StarStarEqual,
    /// `~`
    Tilde,
    /// `~@` (unary-operator method name, only after `def` or `.`)
    TildeAt,

    // === Literals & identifiers (80-105) ===
    /// A regexp back-reference global: `$&`, `` $` ``, `$'`, `$+`.
    BackReference = 80,
    /// `?a`, a single-character literal.
    CharacterLiteral,
    /// `@@foo`
    ClassVariable,
    /// `# ...` through end of line.
    Comment,
    /// An identifier whose first byte is an ASCII uppercase letter.
    Constant,
    /// `=begin` at the start of a line, including its newline.
    EmbDocBegin,
    /// `=end` at the start of a line, including its newline.
    EmbDocEnd,
    /// One line of an embedded documentation block.
    EmbDocLine,
    /// `#{` inside an interpolating literal.
    EmbExprBegin,
    /// `}` closing an embedded expression.
    EmbExprEnd,
    /// A floating point literal.
    Float,
    /// `$foo` and the punctuation specials (`$~`, `$!`, ...).
    GlobalVariable,
    /// A plain identifier, including predicate (`foo?`/`foo!`) and setter
    /// (`foo=` in symbols) forms.
    Identifier,
    /// A numeric literal with an `i` suffix.
    ImaginaryNumber,
    /// `@foo`
    InstanceVariable,
    /// An integer literal in any base.
    Integer,
    /// `foo:`, an identifier plus a single trailing colon.
    Label,
    /// `$1`–`$9` (and longer digit runs).
    NthReference,
    /// A numeric literal with an `r` suffix.
    RationalNumber,
    /// `/` or `%r<delim>` opening a regexp.
    RegexpBegin,
    /// Regexp terminator plus trailing option letters.
    RegexpEnd,
    /// `"`, `'`, `%q`/`%Q` opener of a string literal.
    StringBegin,
    /// A run of literal body bytes (strings, regexps, word lists).
    StringContent,
    /// The terminator of a string or word list.
    StringEnd,
    /// `:` opening a symbol.
    SymbolBegin,
    /// Whitespace separating entries of a word list.
    WordsSep,

    // === Percent literal openers (112-116) ===
    /// `%i<delim>`: symbol list, no interpolation.
    PercentLowerI = 112,
    /// `%w<delim>`: word list, no interpolation.
    PercentLowerW,
    /// `%x<delim>`: command string, interpolating.
    PercentLowerX,
    /// `%I<delim>`: symbol list, interpolating.
    PercentUpperI,
    /// `%W<delim>`: word list, interpolating.
    PercentUpperW,

    // === Keywords (128-168) ===
    /// `__ENCODING__`
    KeywordEncoding = 128,
    /// `__LINE__`
    KeywordLine,
    /// `__FILE__`
    KeywordFile,
    /// `alias`
    KeywordAlias,
    /// `and`
    KeywordAnd,
    /// `begin`
    KeywordBegin,
    /// `BEGIN`
    KeywordBeginUpcase,
    /// `break`
    KeywordBreak,
    /// `case`
    KeywordCase,
    /// `class`
    KeywordClass,
    /// `def`
    KeywordDef,
    /// `defined?`
    KeywordDefined,
    /// `do`
    KeywordDo,
    /// `else`
    KeywordElse,
    /// `elsif`
    KeywordElsif,
    /// `end`
    KeywordEnd,
    /// `END`
    KeywordEndUpcase,
    /// `ensure`
    KeywordEnsure,
    /// `false`
    KeywordFalse,
    /// `for`
    KeywordFor,
    /// `if`
    KeywordIf,
    /// `in`
    KeywordIn,
    /// `module`
    KeywordModule,
    /// `next`
    KeywordNext,
    /// `nil`
    KeywordNil,
    /// `not`
    KeywordNot,
    /// `or`
    KeywordOr,
    /// `redo`
    KeywordRedo,
    /// `rescue`
    KeywordRescue,
    /// `retry`
    KeywordRetry,
    /// `return`
    KeywordReturn,
    /// `self`
    KeywordSelf,
    /// `super`
    KeywordSuper,
    /// `then`
    KeywordThen,
    /// `true`
    KeywordTrue,
    /// `undef`
    KeywordUndef,
    /// `unless`
    KeywordUnless,
    /// `until`
    KeywordUntil,
    /// `when`
    KeywordWhen,
    /// `while`
    KeywordWhile,
    /// `yield`
    KeywordYield,
}

impl TokenKind {
    /// Returns the fixed lexeme for this kind, if it has one.
    ///
    /// Operators, delimiters, and keywords have fixed spellings. Literal
    /// openers that carry a delimiter (`%w[`, `"`), content runs, and
    /// identifiers return `None` because their text varies.
    #[must_use]
    pub fn lexeme(self) -> Option<&'static str> {
        match self {
            Self::Ampersand => Some("&"),
            Self::AmpersandAmpersand => Some("&&"),
            Self::AmpersandAmpersandEqual => Some("&&="),
            Self::AmpersandEqual => Some("&="),
            Self::Backtick => Some("`"),
            Self::Bang => Some("!"),
            Self::BangAt => Some("!@"),
            Self::BangEqual => Some("!="),
            Self::BangTilde => Some("!~"),
            Self::BraceLeft | Self::LambdaBegin => Some("{"),
            Self::BraceRight | Self::EmbExprEnd => Some("}"),
            Self::BracketLeft => Some("["),
            Self::BracketLeftRight => Some("[]"),
            Self::BracketRight => Some("]"),
            Self::Caret => Some("^"),
            Self::CaretEqual => Some("^="),
            Self::Colon => Some(":"),
            Self::ColonColon => Some("::"),
            Self::Comma => Some(","),
            Self::Dot => Some("."),
            Self::DotDot => Some(".."),
            Self::DotDotDot => Some("..."),
            Self::EmbExprBegin => Some("#{"),
            Self::Equal => Some("="),
            Self::EqualEqual => Some("=="),
            Self::EqualEqualEqual => Some("==="),
            Self::EqualGreater => Some("=>"),
            Self::EqualTilde => Some("=~"),
            Self::Greater => Some(">"),
            Self::GreaterEqual => Some(">="),
            Self::GreaterGreater => Some(">>"),
            Self::GreaterGreaterEqual => Some(">>="),
            Self::Less => Some("<"),
            Self::LessEqual => Some("<="),
            Self::LessEqualGreater => Some("<=>"),
            Self::LessLess => Some("<<"),
            Self::LessLessEqual => Some("<<="),
            Self::Minus => Some("-"),
            Self::MinusAt => Some("-@"),
            Self::MinusEqual => Some("-="),
            Self::MinusGreater => Some("->"),
            Self::Newline => Some("\n"),
            Self::ParenthesisLeft => Some("("),
            Self::ParenthesisRight => Some(")"),
            Self::Percent => Some("%"),
            Self::PercentEqual => Some("%="),
            Self::Pipe => Some("|"),
            Self::PipeEqual => Some("|="),
            Self::PipePipe => Some("||"),
            Self::PipePipeEqual => Some("||="),
            Self::Plus => Some("+"),
            Self::PlusAt => Some("+@"),
            Self::PlusEqual => Some("+="),
            Self::QuestionMark => Some("?"),
            Self::Semicolon => Some(";"),
            Self::Slash => Some("/"),
            Self::SlashEqual => Some("/="),
            Self::Star => Some("*"),
            Self::StarEqual => Some("*="),
            Self::StarStar => Some("**"),
            Self::StarStarEqual => Some("**="),
            Self::Tilde => Some("~"),
            Self::TildeAt => Some("~@"),
            Self::KeywordEncoding => Some("__ENCODING__"),
            Self::KeywordLine => Some("__LINE__"),
            Self::KeywordFile => Some("__FILE__"),
            Self::KeywordAlias => Some("alias"),
            Self::KeywordAnd => Some("and"),
            Self::KeywordBegin => Some("begin"),
            Self::KeywordBeginUpcase => Some("BEGIN"),
            Self::KeywordBreak => Some("break"),
            Self::KeywordCase => Some("case"),
            Self::KeywordClass => Some("class"),
            Self::KeywordDef => Some("def"),
            Self::KeywordDefined => Some("defined?"),
            Self::KeywordDo => Some("do"),
            Self::KeywordElse => Some("else"),
            Self::KeywordElsif => Some("elsif"),
            Self::KeywordEnd => Some("end"),
            Self::KeywordEndUpcase => Some("END"),
            Self::KeywordEnsure => Some("ensure"),
            Self::KeywordFalse => Some("false"),
            Self::KeywordFor => Some("for"),
            Self::KeywordIf => Some("if"),
            Self::KeywordIn => Some("in"),
            Self::KeywordModule => Some("module"),
            Self::KeywordNext => Some("next"),
            Self::KeywordNil => Some("nil"),
            Self::KeywordNot => Some("not"),
            Self::KeywordOr => Some("or"),
            Self::KeywordRedo => Some("redo"),
            Self::KeywordRescue => Some("rescue"),
            Self::KeywordRetry => Some("retry"),
            Self::KeywordReturn => Some("return"),
            Self::KeywordSelf => Some("self"),
            Self::KeywordSuper => Some("super"),
            Self::KeywordThen => Some("then"),
            Self::KeywordTrue => Some("true"),
            Self::KeywordUndef => Some("undef"),
            Self::KeywordUnless => Some("unless"),
            Self::KeywordUntil => Some("until"),
            Self::KeywordWhen => Some("when"),
            Self::KeywordWhile => Some("while"),
            Self::KeywordYield => Some("yield"),
            _ => None,
        }
    }

    /// Returns a human-readable name for this kind.
    ///
    /// Used in diagnostic messages and debugging output.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Eof => "end of file",
            Self::Invalid => "invalid token",
            Self::BackReference => "back reference",
            Self::CharacterLiteral => "character literal",
            Self::ClassVariable => "class variable",
            Self::Comment => "comment",
            Self::Constant => "constant",
            Self::EmbDocBegin => "embedded documentation start",
            Self::EmbDocEnd => "embedded documentation end",
            Self::EmbDocLine => "embedded documentation line",
            Self::EmbExprBegin => "embedded expression start",
            Self::EmbExprEnd => "embedded expression end",
            Self::Float => "float literal",
            Self::GlobalVariable => "global variable",
            Self::Identifier => "identifier",
            Self::ImaginaryNumber => "imaginary literal",
            Self::InstanceVariable => "instance variable",
            Self::Integer => "integer literal",
            Self::Label => "label",
            Self::NthReference => "nth reference",
            Self::RationalNumber => "rational literal",
            Self::RegexpBegin => "regexp start",
            Self::RegexpEnd => "regexp end",
            Self::StringBegin => "string start",
            Self::StringContent => "string content",
            Self::StringEnd => "string end",
            Self::SymbolBegin => "symbol start",
            Self::WordsSep => "word separator",
            Self::PercentLowerI => "symbol list start",
            Self::PercentLowerW => "word list start",
            Self::PercentLowerX => "command string start",
            Self::PercentUpperI => "interpolating symbol list start",
            Self::PercentUpperW => "interpolating word list start",
            Self::Newline => "newline",
            other => match other.lexeme() {
                Some(spelling) => spelling,
                None => "token",
            },
        }
    }

    /// Returns `true` for the keyword kinds (`def`, `end`, `__FILE__`, ...).
    #[must_use]
    pub fn is_keyword(self) -> bool {
        self as u8 >= Self::KeywordEncoding as u8
    }
}

/// Resolve an identifier lexeme against the keyword table.
///
/// The caller is responsible for the context gates: keywords are not
/// recognized after `.`, and `defined?` is resolved on the predicate-suffix
/// path instead (a bare identifier run can never contain `?`).
pub(crate) fn keyword_kind(lexeme: &[u8]) -> Option<TokenKind> {
    let kind = match lexeme {
        b"__ENCODING__" => TokenKind::KeywordEncoding,
        b"__LINE__" => TokenKind::KeywordLine,
        b"__FILE__" => TokenKind::KeywordFile,
        b"alias" => TokenKind::KeywordAlias,
        b"and" => TokenKind::KeywordAnd,
        b"begin" => TokenKind::KeywordBegin,
        b"BEGIN" => TokenKind::KeywordBeginUpcase,
        b"break" => TokenKind::KeywordBreak,
        b"case" => TokenKind::KeywordCase,
        b"class" => TokenKind::KeywordClass,
        b"def" => TokenKind::KeywordDef,
        b"do" => TokenKind::KeywordDo,
        b"else" => TokenKind::KeywordElse,
        b"elsif" => TokenKind::KeywordElsif,
        b"end" => TokenKind::KeywordEnd,
        b"END" => TokenKind::KeywordEndUpcase,
        b"ensure" => TokenKind::KeywordEnsure,
        b"false" => TokenKind::KeywordFalse,
        b"for" => TokenKind::KeywordFor,
        b"if" => TokenKind::KeywordIf,
        b"in" => TokenKind::KeywordIn,
        b"module" => TokenKind::KeywordModule,
        b"next" => TokenKind::KeywordNext,
        b"nil" => TokenKind::KeywordNil,
        b"not" => TokenKind::KeywordNot,
        b"or" => TokenKind::KeywordOr,
        b"redo" => TokenKind::KeywordRedo,
        b"rescue" => TokenKind::KeywordRescue,
        b"retry" => TokenKind::KeywordRetry,
        b"return" => TokenKind::KeywordReturn,
        b"self" => TokenKind::KeywordSelf,
        b"super" => TokenKind::KeywordSuper,
        b"then" => TokenKind::KeywordThen,
        b"true" => TokenKind::KeywordTrue,
        b"undef" => TokenKind::KeywordUndef,
        b"unless" => TokenKind::KeywordUnless,
        b"until" => TokenKind::KeywordUntil,
        b"when" => TokenKind::KeywordWhen,
        b"while" => TokenKind::KeywordWhile,
        b"yield" => TokenKind::KeywordYield,
        _ => return None,
    };
    Some(kind)
}

/// A token: a kind plus the byte range of its lexeme.
///
/// `start` and `end` are offsets into the source buffer the token was lexed
/// from; `buf[start..end]` is the lexeme. The lexer guarantees
/// `start <= end <= source length` and that `start` never decreases across
/// the stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Byte offset where the lexeme begins.
    pub start: u32,
    /// Byte offset one past the last lexeme byte.
    pub end: u32,
}

impl Token {
    /// Create a token from a kind and byte range.
    #[must_use]
    pub fn new(kind: TokenKind, start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "token range {start}..{end} is inverted");
        Self { kind, start, end }
    }

    /// Length of the lexeme in bytes.
    #[must_use]
    pub fn len(self) -> u32 {
        self.end - self.start
    }

    /// Returns `true` for zero-width tokens (only `Eof` qualifies).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Extract the lexeme from the source this token was produced from.
    #[must_use]
    pub fn lexeme(self, source: &[u8]) -> &[u8] {
        &source[self.start as usize..self.end as usize]
    }
}

/// Size assertions: `TokenKind` is 1 byte, `Token` is 12 bytes.
const _: () = assert!(std::mem::size_of::<TokenKind>() == 1);
const _: () = assert!(std::mem::size_of::<Token>() == 12);
