//! SQL Lexer
//!
//! A hand-written lexer producing just enough structure to split a SELECT
//! statement into clauses: keywords, parentheses, placeholders and the byte
//! span of every token. Literal values are not decoded, the splitter only
//! ever slices the source text.

mod token;
mod tokenizer;

pub use token::{Keyword, Span, Token, TokenKind};
pub use tokenizer::Lexer;
