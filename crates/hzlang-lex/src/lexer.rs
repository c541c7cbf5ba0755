//! The scanner.
//!
//! Single pass, one character of lookahead except for the two-character
//! operators `== != >= <=`. Newlines and `#` comments are emitted as tokens
//! (the parser skips them); everything else is whitespace-insensitive.
//!
//! Word classification runs keyword-first: at an identifier-start character
//! the whole run is scanned and checked against the keyword table, and only
//! if it is not a keyword does the lexer consider a numeral. This is what
//! keeps 一息息 a while-keyword even though 一 is a digit word.

use hzlang_util::{Span, Symbol};
use thiserror::Error;

use crate::cursor::Cursor;
use crate::keywords::keyword_kind;
use crate::numeral::{is_numeral_char, parse_numeral};
use crate::token::{Token, TokenKind};
use crate::unicode::{is_ident_continue, is_ident_start};

/// A lexical error. Lexing halts at the first one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("第{line}行第{column}列: 字符串未正确结束")]
    UnterminatedString { line: u32, column: u32 },

    #[error("第{line}行第{column}列: 未知字符: '{ch}'")]
    UnknownChar { ch: char, line: u32, column: u32 },

    #[error("第{line}行第{column}列: 看不懂的数字: {text}")]
    InvalidNumber {
        text: String,
        line: u32,
        column: u32,
    },
}

impl LexError {
    /// Line the error was found on.
    pub fn line(&self) -> u32 {
        match self {
            LexError::UnterminatedString { line, .. }
            | LexError::UnknownChar { line, .. }
            | LexError::InvalidNumber { line, .. } => *line,
        }
    }

    /// Column the error was found at.
    pub fn column(&self) -> u32 {
        match self {
            LexError::UnterminatedString { column, .. }
            | LexError::UnknownChar { column, .. }
            | LexError::InvalidNumber { column, .. } => *column,
        }
    }
}

/// The lexer. See [`crate::tokenize`] for the usual entry point.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,

    /// Start of the token being scanned.
    token_start: usize,
    token_line: u32,
    token_column: u32,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `source`. A leading UTF-8 BOM is skipped.
    pub fn new(source: &'a str) -> Self {
        let mut cursor = Cursor::new(source);
        cursor.match_char('\u{feff}');
        Self {
            cursor,
            token_start: 0,
            token_line: 1,
            token_column: 1,
        }
    }

    /// Scans the whole input into a token vector ending with `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Scans and returns the next token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        self.token_start = self.cursor.position();
        self.token_line = self.cursor.line();
        self.token_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return Ok(self.make_token(TokenKind::Eof));
        }

        match self.cursor.current_char() {
            '\n' => {
                self.cursor.advance();
                Ok(self.make_token(TokenKind::Newline))
            }
            '#' => self.lex_comment(),
            '"' | '\'' => self.lex_string(),

            // Two-character operators before their single-character prefixes.
            '=' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    Ok(self.make_token(TokenKind::EqEq))
                } else {
                    Ok(self.make_token(TokenKind::Assign))
                }
            }
            '!' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    Ok(self.make_token(TokenKind::NotEq))
                } else {
                    Err(self.unknown_char('!'))
                }
            }
            '>' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    Ok(self.make_token(TokenKind::Ge))
                } else {
                    Ok(self.make_token(TokenKind::Gt))
                }
            }
            '<' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    Ok(self.make_token(TokenKind::Le))
                } else {
                    Ok(self.make_token(TokenKind::Lt))
                }
            }

            '+' => self.single(TokenKind::Plus),
            '-' => self.single(TokenKind::Minus),
            '*' => self.single(TokenKind::Star),
            '/' => self.single(TokenKind::Slash),

            '(' | '（' => self.single(TokenKind::LParen),
            ')' | '）' => self.single(TokenKind::RParen),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            ',' | '，' => self.single(TokenKind::Comma),
            ':' | '：' => self.single(TokenKind::Colon),
            ';' | '；' => self.single(TokenKind::Semicolon),

            c if c.is_ascii_digit() => self.lex_number(),
            c if is_ident_start(c) => self.lex_word(),

            c => Err(self.unknown_char(c)),
        }
    }

    /// `#` comment running to end of line. The newline itself is left for the
    /// next token.
    fn lex_comment(&mut self) -> Result<Token, LexError> {
        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }
        Ok(self.make_token(TokenKind::Comment))
    }

    /// String literal opened by `"` or `'`, with escape processing.
    fn lex_string(&mut self) -> Result<Token, LexError> {
        let quote = self.cursor.current_char();
        self.cursor.advance();

        let mut value = String::new();
        loop {
            if self.cursor.is_at_end() {
                return Err(LexError::UnterminatedString {
                    line: self.token_line,
                    column: self.token_column,
                });
            }
            let c = self.cursor.current_char();
            if c == quote {
                self.cursor.advance();
                break;
            }
            if c == '\\' {
                self.cursor.advance();
                if self.cursor.is_at_end() {
                    return Err(LexError::UnterminatedString {
                        line: self.token_line,
                        column: self.token_column,
                    });
                }
                let escaped = self.cursor.current_char();
                value.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    // Unknown escapes keep the escaped character itself.
                    other => other,
                });
                self.cursor.advance();
            } else {
                value.push(c);
                self.cursor.advance();
            }
        }

        Ok(self.make_token(TokenKind::Str(Symbol::intern(&value))))
    }

    /// ASCII number literal. A fraction requires at least one digit after the
    /// dot; a second dot stops the scan.
    fn lex_number(&mut self) -> Result<Token, LexError> {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let is_float =
            self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit();
        if is_float {
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
            let text = self.cursor.slice_from(self.token_start);
            match text.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(self.make_token(TokenKind::Float(value))),
                _ => Err(self.invalid_number(text)),
            }
        } else {
            let text = self.cursor.slice_from(self.token_start);
            match text.parse::<i64>() {
                Ok(value) => Ok(self.make_token(TokenKind::Int(value))),
                Err(_) => Err(self.invalid_number(text)),
            }
        }
    }

    /// Identifier, keyword, or Chinese-numeral literal.
    ///
    /// The full identifier run is checked against the keyword table first, so
    /// keywords beginning with a digit word (一息息) win over numbers. A
    /// non-keyword run starting with a digit word is rewound and re-scanned as
    /// the maximal numeral prefix.
    fn lex_word(&mut self) -> Result<Token, LexError> {
        let start = self.cursor.snapshot();
        let first = self.cursor.current_char();

        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(self.token_start);

        if let Some(kind) = keyword_kind(text) {
            return Ok(self.make_token(kind));
        }

        if is_numeral_char(first) {
            self.cursor.restore(start);
            while is_numeral_char(self.cursor.current_char()) {
                self.cursor.advance();
            }
            let digits = self.cursor.slice_from(self.token_start);
            return match parse_numeral(digits) {
                Some(value) => Ok(self.make_token(TokenKind::Int(value))),
                None => Err(self.invalid_number(digits)),
            };
        }

        Ok(self.make_token(TokenKind::Ident(Symbol::intern(text))))
    }

    fn single(&mut self, kind: TokenKind) -> Result<Token, LexError> {
        self.cursor.advance();
        Ok(self.make_token(kind))
    }

    /// Skips spaces, tabs, and carriage returns. Newlines are significant.
    fn skip_whitespace(&mut self) {
        while matches!(self.cursor.current_char(), ' ' | '\t' | '\r') {
            self.cursor.advance();
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        let span = Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_line,
            self.token_column,
        );
        Token::new(kind, self.cursor.slice_from(self.token_start), span)
    }

    fn unknown_char(&self, ch: char) -> LexError {
        LexError::UnknownChar {
            ch,
            line: self.token_line,
            column: self.token_column,
        }
    }

    fn invalid_number(&self, text: &str) -> LexError {
        LexError::InvalidNumber {
            text: text.to_string(),
            line: self.token_line,
            column: self.token_column,
        }
    }
}
