//! Character cursor for traversing source text.
//!
//! The cursor walks the source one character at a time, tracking the byte
//! position plus 1-based line and column numbers. Columns advance per
//! character so they stay correct for CJK text.

/// A cursor over source text.
///
/// # Example
///
/// ```
/// use hzlang_lex::cursor::Cursor;
///
/// let mut cursor = Cursor::new("话说 1");
/// assert_eq!(cursor.current_char(), '话');
/// cursor.advance();
/// assert_eq!(cursor.current_char(), '说');
/// assert_eq!(cursor.column(), 2);
/// ```
pub struct Cursor<'a> {
    /// The source text being traversed.
    source: &'a str,

    /// Current byte position.
    position: usize,

    /// Current line (1-based).
    line: u32,

    /// Current column (1-based, in characters).
    column: u32,
}

/// A saved cursor position, for rewinding.
#[derive(Clone, Copy, Debug)]
pub struct CursorSnapshot {
    position: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the character at the cursor, or `'\0'` at end of input.
    pub fn current_char(&self) -> char {
        self.source[self.position..].chars().next().unwrap_or('\0')
    }

    /// Returns the character `offset` characters ahead of the cursor, or
    /// `'\0'` past the end. `peek_char(0)` is the current character.
    pub fn peek_char(&self, offset: usize) -> char {
        self.source[self.position..]
            .chars()
            .nth(offset)
            .unwrap_or('\0')
    }

    /// Moves past the current character, updating line/column.
    pub fn advance(&mut self) {
        if let Some(c) = self.source[self.position..].chars().next() {
            self.position += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Consumes the current character if it equals `expected`.
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.current_char() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// True once the whole source has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Current line (1-based).
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Current column (1-based).
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Current byte position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Source slice from `start` up to the cursor.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.position]
    }

    /// Saves the current position for a later [`Cursor::restore`].
    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            position: self.position,
            line: self.line,
            column: self.column,
        }
    }

    /// Rewinds to a previously saved position.
    pub fn restore(&mut self, snapshot: CursorSnapshot) {
        self.position = snapshot.position;
        self.line = snapshot.line;
        self.column = snapshot.column;
    }
}
