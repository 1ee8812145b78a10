//! Token types for the SQL lexer.

/// A byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the span running from the start of `self` to the end of `other`.
    #[must_use]
    pub const fn to(self, other: Self) -> Self {
        Self::new(self.start, other.end)
    }

    /// Returns the covered text.
    #[must_use]
    pub fn slice(self, source: &str) -> &str {
        &source[self.start..self.end]
    }
}

/// Keywords the clause splitter cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    // Clause starters
    Select,
    From,
    Partition,
    Where,
    Group,
    Having,
    Order,
    By,
    Limit,
    Procedure,
    Into,
    For,
    Lock,

    // Select modifiers
    All,
    Distinct,
    DistinctRow,
    HighPriority,
    StraightJoin,
    SqlSmallResult,
    SqlBigResult,
    SqlBufferResult,
    SqlNoCache,
    SqlCalcFoundRows,

    // Row locking
    Update,
    Share,
    In,

    // Compound statements
    Union,
    Intersect,
    Except,

    // Logical operators
    And,
    Or,
    Not,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SELECT" => Some(Self::Select),
            "FROM" => Some(Self::From),
            "PARTITION" => Some(Self::Partition),
            "WHERE" => Some(Self::Where),
            "GROUP" => Some(Self::Group),
            "HAVING" => Some(Self::Having),
            "ORDER" => Some(Self::Order),
            "BY" => Some(Self::By),
            "LIMIT" => Some(Self::Limit),
            "PROCEDURE" => Some(Self::Procedure),
            "INTO" => Some(Self::Into),
            "FOR" => Some(Self::For),
            "LOCK" => Some(Self::Lock),
            "ALL" => Some(Self::All),
            "DISTINCT" => Some(Self::Distinct),
            "DISTINCTROW" => Some(Self::DistinctRow),
            "HIGH_PRIORITY" => Some(Self::HighPriority),
            "STRAIGHT_JOIN" => Some(Self::StraightJoin),
            "SQL_SMALL_RESULT" => Some(Self::SqlSmallResult),
            "SQL_BIG_RESULT" => Some(Self::SqlBigResult),
            "SQL_BUFFER_RESULT" => Some(Self::SqlBufferResult),
            "SQL_NO_CACHE" => Some(Self::SqlNoCache),
            "SQL_CALC_FOUND_ROWS" => Some(Self::SqlCalcFoundRows),
            "UPDATE" => Some(Self::Update),
            "SHARE" => Some(Self::Share),
            "IN" => Some(Self::In),
            "UNION" => Some(Self::Union),
            "INTERSECT" => Some(Self::Intersect),
            "EXCEPT" => Some(Self::Except),
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "NOT" => Some(Self::Not),
            _ => None,
        }
    }

    /// Returns the keyword as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::From => "FROM",
            Self::Partition => "PARTITION",
            Self::Where => "WHERE",
            Self::Group => "GROUP",
            Self::Having => "HAVING",
            Self::Order => "ORDER",
            Self::By => "BY",
            Self::Limit => "LIMIT",
            Self::Procedure => "PROCEDURE",
            Self::Into => "INTO",
            Self::For => "FOR",
            Self::Lock => "LOCK",
            Self::All => "ALL",
            Self::Distinct => "DISTINCT",
            Self::DistinctRow => "DISTINCTROW",
            Self::HighPriority => "HIGH_PRIORITY",
            Self::StraightJoin => "STRAIGHT_JOIN",
            Self::SqlSmallResult => "SQL_SMALL_RESULT",
            Self::SqlBigResult => "SQL_BIG_RESULT",
            Self::SqlBufferResult => "SQL_BUFFER_RESULT",
            Self::SqlNoCache => "SQL_NO_CACHE",
            Self::SqlCalcFoundRows => "SQL_CALC_FOUND_ROWS",
            Self::Update => "UPDATE",
            Self::Share => "SHARE",
            Self::In => "IN",
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
        }
    }

    /// Returns true for keywords allowed right after `SELECT`.
    #[must_use]
    pub const fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::All
                | Self::Distinct
                | Self::DistinctRow
                | Self::HighPriority
                | Self::StraightJoin
                | Self::SqlSmallResult
                | Self::SqlBigResult
                | Self::SqlBufferResult
                | Self::SqlNoCache
                | Self::SqlCalcFoundRows
        )
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// SQL keyword
    Keyword(Keyword),
    /// Identifier, plain or quoted
    Word,
    /// Numeric literal
    Number,
    /// String or blob literal
    String,
    /// User or system variable (`@name`, `@@name`)
    Variable,
    /// Operator such as `+`, `<=` or `||`
    Operator,
    /// `*`, either a wildcard or a multiplication
    Star,
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// .
    Dot,
    /// ;
    Semicolon,
    /// ?
    Question,
    /// End of input
    Eof,
    /// Invalid input
    Error(String),
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns true if the token cannot end an expression or a list.
    #[must_use]
    pub const fn is_dangling(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Operator
                | TokenKind::Comma
                | TokenKind::Dot
                | TokenKind::Keyword(Keyword::And | Keyword::Or | Keyword::Not)
        )
    }
}
