//! Lexer driven clause splitter for SELECT statements.

use std::ops::Range;

use tracing::debug;

use super::Parser;
use crate::clause::ClauseSlot;
use crate::clause_map::ClauseMap;
use crate::error::{Result, SpliceError};
use crate::fragment::{Marker, StaticFragment};
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};
use crate::value::Param;

/// Why a statement was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    /// The input cannot be a statement at all.
    InvalidArgument,
    /// The input is not a SELECT statement the splitter understands.
    InvalidSyntax,
}

impl ParseStatus {
    /// Returns the numeric status code.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::InvalidArgument => 32001,
            Self::InvalidSyntax => 32002,
        }
    }

    /// Returns the textual status code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArgument => "PARSE_ERROR_INVALID_ARGUMENT",
            Self::InvalidSyntax => "PARSE_INVALID_SYNTAX",
        }
    }
}

impl From<ParseStatus> for SpliceError {
    fn from(status: ParseStatus) -> Self {
        Self::parse(status.code(), status.as_str())
    }
}

/// Splits SELECT statements into clause fragments.
///
/// Clause bodies are taken verbatim from the source, from the first to the
/// last token of the body. Only keywords outside of parentheses start a new
/// clause, so sub-queries and function arguments stay inside the clause they
/// appear in.
///
/// ```rust
/// use sqlsplice_core::{params, ClauseParser, ClauseSlot, Parser, Section};
///
/// let map = ClauseParser::new()
///     .parse("SELECT id FROM users WHERE age > ?", params![18])
///     .unwrap();
///
/// assert_eq!(map.section_for(ClauseSlot::Where).unwrap().chunk(), "age > ?");
/// assert_eq!(map.section_for(ClauseSlot::Where).unwrap().markers()[0].offset, 6);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ClauseParser;

impl ClauseParser {
    /// Creates a new clause parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Parser for ClauseParser {
    fn parse(&self, sql: &str, parameters: Vec<Param>) -> Result<ClauseMap> {
        let clauses = split(sql).map_err(|rejection| {
            debug!(
                sql = %sql,
                status = rejection.status.as_str(),
                reason = %rejection.reason,
                "Statement rejected"
            );
            SpliceError::from(rejection.status)
        })?;

        bind(sql, clauses, parameters)
    }
}

/// A rejected statement and the reason, kept for logging.
struct Rejection {
    status: ParseStatus,
    reason: String,
}

impl Rejection {
    fn syntax(reason: impl Into<String>) -> Self {
        Self {
            status: ParseStatus::InvalidSyntax,
            reason: reason.into(),
        }
    }
}

/// A clause body located in the source.
struct Clause {
    slot: ClauseSlot,
    span: Span,
    /// Placeholder offsets relative to the start of `span`.
    placeholders: Vec<usize>,
}

fn split(sql: &str) -> std::result::Result<Vec<Clause>, Rejection> {
    if sql.trim().is_empty() {
        return Err(Rejection {
            status: ParseStatus::InvalidArgument,
            reason: String::from("empty statement"),
        });
    }

    let tokens = Lexer::new(sql).tokenize();
    if let Some(message) = tokens.iter().find_map(|token| match &token.kind {
        TokenKind::Error(message) => Some(message.clone()),
        _ => None,
    }) {
        return Err(Rejection::syntax(message));
    }

    Splitter::new(&tokens).run()
}

/// Walks the token stream and cuts it at top level clause keywords.
struct Splitter<'t> {
    tokens: &'t [Token],
    pos: usize,
    clauses: Vec<Clause>,
}

impl<'t> Splitter<'t> {
    const fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            clauses: Vec::new(),
        }
    }

    /// Returns the current token. The stream always ends with EOF, which is
    /// never stepped over.
    fn current(&self) -> &'t Token {
        &self.tokens[self.pos]
    }

    /// Returns the keyword `offset` tokens ahead, if that token is one.
    fn keyword_at(&self, offset: usize) -> Option<Keyword> {
        self.tokens
            .get(self.pos + offset)
            .and_then(Token::as_keyword)
    }

    fn run(mut self) -> std::result::Result<Vec<Clause>, Rejection> {
        if self.keyword_at(0) != Some(Keyword::Select) {
            return Err(Rejection::syntax("statement must start with SELECT"));
        }
        self.pos += 1;

        let modifiers_start = self.pos;
        while self.keyword_at(0).is_some_and(Keyword::is_modifier) {
            self.pos += 1;
        }
        if self.pos > modifiers_start {
            self.close(ClauseSlot::Modifiers, modifiers_start..self.pos)?;
        }

        let mut slot = ClauseSlot::Columns;
        let mut body_start = self.pos;
        let mut depth = 0_usize;

        loop {
            match self.current().kind {
                TokenKind::Eof => break,
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| Rejection::syntax("unbalanced parentheses"))?;
                }
                TokenKind::Semicolon if depth == 0 => {
                    if !self.tokens[self.pos + 1].is_eof() {
                        return Err(Rejection::syntax("unexpected input after ';'"));
                    }
                    break;
                }
                _ if depth == 0 => {
                    if let Some((next, width)) = self.clause_start(slot)? {
                        if next <= slot {
                            return Err(Rejection::syntax(format!(
                                "{next} clause is out of place"
                            )));
                        }
                        self.close(slot, body_start..self.pos)?;
                        slot = next;
                        body_start = self.pos + width;
                        self.pos += width.max(1);
                        continue;
                    }
                }
                _ => {}
            }
            self.pos += 1;
        }

        if depth != 0 {
            return Err(Rejection::syntax("unbalanced parentheses"));
        }
        self.close(slot, body_start..self.pos)?;

        Ok(self.clauses)
    }

    /// Checks whether the current token opens a new clause while `current`
    /// is being read. Returns the new slot and the number of keyword tokens
    /// that are not part of the clause body. Slots without a rendered
    /// keyword keep their introducing keywords in the body.
    fn clause_start(
        &self,
        current: ClauseSlot,
    ) -> std::result::Result<Option<(ClauseSlot, usize)>, Rejection> {
        // Flags run to the end of the statement.
        if current == ClauseSlot::Flags {
            return Ok(None);
        }
        // A word qualified by `.` is always an identifier.
        if self.pos > 0 && self.tokens[self.pos - 1].kind == TokenKind::Dot {
            return Ok(None);
        }
        let Some(keyword) = self.keyword_at(0) else {
            return Ok(None);
        };
        let next = self.keyword_at(1);

        let start = match keyword {
            Keyword::From => (ClauseSlot::Tables, 1),
            Keyword::Partition => (ClauseSlot::Partition, 1),
            Keyword::Where => (ClauseSlot::Where, 1),
            Keyword::Group if next == Some(Keyword::By) => (ClauseSlot::GroupBy, 2),
            Keyword::Having => (ClauseSlot::Having, 1),
            Keyword::Order if next == Some(Keyword::By) => (ClauseSlot::OrderBy, 2),
            Keyword::Limit => (ClauseSlot::Limit, 1),
            Keyword::Procedure => (ClauseSlot::Procedure, 1),
            Keyword::Into if current < ClauseSlot::Tables => (ClauseSlot::FirstInto, 0),
            Keyword::Into => (ClauseSlot::SecondInto, 0),
            Keyword::For if matches!(next, Some(Keyword::Update | Keyword::Share)) => {
                (ClauseSlot::Flags, 0)
            }
            Keyword::Lock if next == Some(Keyword::In) => (ClauseSlot::Flags, 0),
            Keyword::Group | Keyword::Order => {
                return Err(Rejection::syntax(format!(
                    "{} must be followed by BY",
                    keyword.as_str()
                )));
            }
            Keyword::Select => return Err(Rejection::syntax("unexpected SELECT")),
            Keyword::Union | Keyword::Intersect | Keyword::Except => {
                return Err(Rejection::syntax("compound statements are not supported"));
            }
            _ => return Ok(None),
        };

        Ok(Some(start))
    }

    /// Records the clause made of the tokens in `body`.
    fn close(
        &mut self,
        slot: ClauseSlot,
        body: Range<usize>,
    ) -> std::result::Result<(), Rejection> {
        let body = &self.tokens[body];
        let (Some(first), Some(last)) = (body.first(), body.last()) else {
            return Err(Rejection::syntax(format!("{slot} clause is empty")));
        };
        if last.is_dangling() {
            return Err(Rejection::syntax(format!("{slot} clause ends unexpectedly")));
        }

        let placeholders = body
            .iter()
            .filter(|token| token.kind == TokenKind::Question)
            .map(|token| token.span.start - first.span.start)
            .collect();

        self.clauses.push(Clause {
            slot,
            span: first.span.to(last.span),
            placeholders,
        });
        Ok(())
    }
}

/// Binds `parameters` to the placeholders of `clauses`, which are in textual
/// order.
fn bind(sql: &str, clauses: Vec<Clause>, parameters: Vec<Param>) -> Result<ClauseMap> {
    let expected: usize = clauses.iter().map(|clause| clause.placeholders.len()).sum();
    let provided = parameters.len();
    if expected > provided {
        return Err(SpliceError::TooFewParameters { expected, provided });
    }
    if expected < provided {
        return Err(SpliceError::TooManyParameters { expected, provided });
    }

    let mut values = parameters.into_iter();
    let mut map = ClauseMap::new();
    for clause in clauses {
        let markers = clause
            .placeholders
            .iter()
            .zip(values.by_ref())
            .map(|(&offset, value)| Marker::new(value, offset))
            .collect();
        map.set_section_for(
            clause.slot,
            StaticFragment::with_markers(clause.span.slice(sql), markers),
        );
    }

    Ok(map)
}
