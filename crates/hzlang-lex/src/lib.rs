//! hzlang-lex - Lexical analysis for the Hangzhou-dialect language.
//!
//! The lexer turns UTF-8 source text into a flat token stream. The language's
//! identity lives in its vocabulary, so most of the interesting work here is
//! word classification: a run of characters like 一息息 must come out as the
//! while-keyword, 三十五 as the number 35, and 张三 as an identifier, even
//! though all three look like "identifier-ish" CJK runs.
//!
//! # Example
//!
//! ```
//! use hzlang_lex::{tokenize, TokenKind};
//!
//! let tokens = tokenize("老倌 甲 装 10").unwrap();
//! assert_eq!(tokens[0].kind, TokenKind::Var);
//! assert_eq!(tokens[1].lexeme, "甲");
//! assert_eq!(tokens[2].kind, TokenKind::Assign);
//! assert_eq!(tokens[3].kind, TokenKind::Int(10));
//! ```

pub mod cursor;
pub mod keywords;
pub mod lexer;
pub mod numeral;
pub mod token;
pub mod unicode;

pub use keywords::keyword_kind;
pub use lexer::{LexError, Lexer};
pub use token::{Token, TokenKind};

/// Tokenizes a complete source text.
///
/// The returned stream always ends with an [`TokenKind::Eof`] token. Lexing
/// stops at the first error.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}
