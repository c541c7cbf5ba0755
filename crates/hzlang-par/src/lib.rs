//! hzlang-par - Parser for the Hangzhou-dialect language.
//!
//! Recursive descent over the token stream from `hzlang-lex`. Statements are
//! dispatched on their leading keyword; expressions use a Pratt loop with the
//! ladder or < and < equality < comparison < additive < multiplicative <
//! unary, all binary levels left-associative.
//!
//! Statement bodies are introduced by a colon and run until the explicit
//! terminator 完了, until a dangling 不然 (for then-bodies), or until end of
//! input. The terminator belongs to the innermost open construct, which is
//! what lets control structures nest.
//!
//! Parsing halts at the first error; there is no recovery.
//!
//! # Example
//!
//! ```
//! use hzlang_lex::tokenize;
//! use hzlang_par::{parse, ast::Stmt};
//!
//! let tokens = tokenize("老倌 甲 装 10").unwrap();
//! let program = parse(tokens).unwrap();
//! assert!(matches!(program.statements[0], Stmt::VarDecl(_)));
//! ```

pub mod ast;
mod expr;
mod stmt;

use hzlang_lex::{Token, TokenKind};
use hzlang_util::{Span, Symbol};
use thiserror::Error;

pub use ast::Program;

/// A syntax error. Parsing halts at the first one.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("第{line}行第{column}列: 期望{expected}，但得到 {found}")]
    Expected {
        expected: String,
        found: String,
        line: u32,
        column: u32,
    },

    #[error("第{line}行第{column}列: 期望表达式")]
    ExpectedExpression { line: u32, column: u32 },

    #[error("第{line}行第{column}列: 看不懂这句话，想不到出现 {found}")]
    UnexpectedToken {
        found: String,
        line: u32,
        column: u32,
    },

    #[error("第{line}行第{column}列: {word} 暂时做不了")]
    Unsupported {
        word: String,
        line: u32,
        column: u32,
    },
}

/// Parses a token stream into a program.
pub fn parse(tokens: Vec<Token>) -> Result<Program, ParseError> {
    Parser::new(tokens).parse_program()
}

/// The parser. Most callers want [`parse`].
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    /// Creates a parser over a token stream ending in `Eof`.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.is_empty() {
            tokens.push(Token::new(TokenKind::Eof, "", Span::DUMMY));
        }
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parses the whole program.
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let mut statements = Vec::new();
        self.skip_trivia();
        while !self.at_end() {
            if let Some(stmt) = self.parse_statement()? {
                statements.push(stmt);
            }
            self.skip_trivia();
        }
        Ok(Program { statements })
    }

    // -- token stream helpers ------------------------------------------------

    pub(crate) fn current(&self) -> &Token {
        // The stream always ends with Eof, which is never consumed.
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    pub(crate) fn kind(&self) -> TokenKind {
        self.current().kind
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        let at = (self.position + 1).min(self.tokens.len() - 1);
        self.tokens[at].kind
    }

    pub(crate) fn advance(&mut self) {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
    }

    pub(crate) fn at_end(&self) -> bool {
        self.kind() == TokenKind::Eof
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    pub(crate) fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<(), ParseError> {
        if self.match_kind(kind) {
            Ok(())
        } else {
            Err(self.error_expected(expected))
        }
    }

    /// Consumes an identifier token, returning its name.
    pub(crate) fn expect_ident(&mut self, expected: &str) -> Result<Symbol, ParseError> {
        match self.kind() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name)
            }
            _ => Err(self.error_expected(expected)),
        }
    }

    /// Skips newline and comment tokens between statements.
    pub(crate) fn skip_trivia(&mut self) {
        while matches!(self.kind(), TokenKind::Newline | TokenKind::Comment) {
            self.advance();
        }
    }

    pub(crate) fn error_expected(&self, expected: &str) -> ParseError {
        let token = self.current();
        ParseError::Expected {
            expected: expected.to_string(),
            found: self.describe_current(),
            line: token.line(),
            column: token.column(),
        }
    }

    pub(crate) fn error_unexpected(&self) -> ParseError {
        let token = self.current();
        ParseError::UnexpectedToken {
            found: self.describe_current(),
            line: token.line(),
            column: token.column(),
        }
    }

    fn describe_current(&self) -> String {
        let token = self.current();
        match token.kind {
            TokenKind::Eof | TokenKind::Newline => token.kind.describe().to_string(),
            _ => token.lexeme.clone(),
        }
    }
}
