//! Cursor-based scanner over command input.
//!
//! A `Scanner` is a cursor into shared, immutable text. Cloning a scanner is
//! cheap and yields an independent cursor over the same text, which is what
//! the dispatcher relies on for lookahead and backtracking.

use std::sync::Arc;

use argot_foundation::{Error, ErrorContext, Result};

/// The character separating grammar tokens.
pub const SEPARATOR: char = ' ';

const ESCAPE: char = '\\';
const DOUBLE_QUOTE: char = '"';
const SINGLE_QUOTE: char = '\'';

/// Cursor over command input.
///
/// The cursor is a byte offset and always sits on a character boundary.
#[derive(Clone, Debug)]
pub struct Scanner {
    /// Shared input text.
    text: Arc<str>,
    /// Current byte offset.
    cursor: usize,
}

impl Scanner {
    /// Creates a scanner positioned at the start of `text`.
    #[must_use]
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self {
            text: text.into(),
            cursor: 0,
        }
    }

    /// Returns the full input text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the current byte offset.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor to `cursor`.
    ///
    /// # Panics
    ///
    /// Panics if `cursor` is past the end of input or not on a character boundary.
    pub fn set_cursor(&mut self, cursor: usize) {
        assert!(
            self.text.is_char_boundary(cursor),
            "scanner cursor {cursor} is not a character boundary"
        );
        self.cursor = cursor;
    }

    /// Returns the number of unread bytes.
    #[must_use]
    pub fn remaining_len(&self) -> usize {
        self.text.len() - self.cursor
    }

    /// Returns the total input length in bytes.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.text.len()
    }

    /// Returns the text already consumed.
    #[must_use]
    pub fn read_so_far(&self) -> &str {
        &self.text[..self.cursor]
    }

    /// Returns the unread text.
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.text[self.cursor..]
    }

    /// Returns true if at least one more byte can be read.
    #[must_use]
    pub fn can_read(&self) -> bool {
        self.can_read_n(1)
    }

    /// Returns true if at least `length` more bytes can be read.
    #[must_use]
    pub fn can_read_n(&self, length: usize) -> bool {
        self.cursor + length <= self.text.len()
    }

    /// Peeks at the next character without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Peeks at the character `offset` characters past the cursor.
    #[must_use]
    pub fn peek_at(&self, offset: usize) -> Option<char> {
        self.remaining().chars().nth(offset)
    }

    /// Returns true if the next character is `c`.
    #[must_use]
    pub fn next_is(&self, c: char) -> bool {
        self.peek() == Some(c)
    }

    /// Consumes and returns the next character.
    pub fn read(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.cursor += c.len_utf8();
        Some(c)
    }

    /// Skips the next character, if any.
    pub fn skip(&mut self) {
        let _ = self.read();
    }

    /// Skips any whitespace at the cursor.
    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.skip();
        }
    }

    /// Builds an error context at the current cursor.
    #[must_use]
    pub fn context(&self) -> ErrorContext {
        ErrorContext::new(self.text.as_ref(), self.cursor)
    }

    /// Attaches the current cursor position to `error`.
    #[must_use]
    pub fn error(&self, error: Error) -> Error {
        error.with_context(self.context())
    }

    /// Returns true for characters that may appear in a number token.
    #[must_use]
    pub const fn is_allowed_number(c: char) -> bool {
        c.is_ascii_digit() || c == '.' || c == '-'
    }

    /// Returns true for characters that may appear in an unquoted string.
    #[must_use]
    pub const fn is_allowed_in_unquoted_string(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+' | ':')
    }

    /// Returns true for characters that open a quoted string.
    #[must_use]
    pub const fn is_quoted_string_start(c: char) -> bool {
        c == DOUBLE_QUOTE || c == SINGLE_QUOTE
    }

    /// Reads the longest run of numeric characters at the cursor.
    fn read_number_token(&mut self) -> (usize, String) {
        let start = self.cursor;
        while self.peek().is_some_and(Self::is_allowed_number) {
            self.skip();
        }
        (start, self.text[start..self.cursor].to_string())
    }

    /// Reads a 32-bit integer.
    ///
    /// # Errors
    ///
    /// Returns an error if no numeric characters are present or they do not
    /// form a valid `i32`. The cursor is restored on invalid input.
    pub fn read_int(&mut self) -> Result<i32> {
        let (start, token) = self.read_number_token();
        if token.is_empty() {
            return Err(self.error(Error::expected_int()));
        }
        match token.parse() {
            Ok(value) => Ok(value),
            Err(_) => {
                self.cursor = start;
                Err(self.error(Error::invalid_int(token)))
            }
        }
    }

    /// Reads a 64-bit integer.
    ///
    /// # Errors
    ///
    /// Returns an error if no numeric characters are present or they do not
    /// form a valid `i64`. The cursor is restored on invalid input.
    pub fn read_long(&mut self) -> Result<i64> {
        let (start, token) = self.read_number_token();
        if token.is_empty() {
            return Err(self.error(Error::expected_long()));
        }
        match token.parse() {
            Ok(value) => Ok(value),
            Err(_) => {
                self.cursor = start;
                Err(self.error(Error::invalid_long(token)))
            }
        }
    }

    /// Reads a 64-bit float.
    ///
    /// # Errors
    ///
    /// Returns an error if no numeric characters are present or they do not
    /// form a valid `f64`. The cursor is restored on invalid input.
    pub fn read_double(&mut self) -> Result<f64> {
        let (start, token) = self.read_number_token();
        if token.is_empty() {
            return Err(self.error(Error::expected_double()));
        }
        match token.parse() {
            Ok(value) => Ok(value),
            Err(_) => {
                self.cursor = start;
                Err(self.error(Error::invalid_double(token)))
            }
        }
    }

    /// Reads a 32-bit float.
    ///
    /// # Errors
    ///
    /// Returns an error if no numeric characters are present or they do not
    /// form a valid `f32`. The cursor is restored on invalid input.
    pub fn read_float(&mut self) -> Result<f32> {
        let (start, token) = self.read_number_token();
        if token.is_empty() {
            return Err(self.error(Error::expected_float()));
        }
        match token.parse() {
            Ok(value) => Ok(value),
            Err(_) => {
                self.cursor = start;
                Err(self.error(Error::invalid_float(token)))
            }
        }
    }

    /// Reads an unquoted string made of `[0-9A-Za-z_\-.+:]`.
    ///
    /// Returns an empty string if the cursor is not on an allowed character.
    pub fn read_unquoted_string(&mut self) -> String {
        let start = self.cursor;
        while self
            .peek()
            .is_some_and(Self::is_allowed_in_unquoted_string)
        {
            self.skip();
        }
        self.text[start..self.cursor].to_string()
    }

    /// Reads a string wrapped in `"` or `'`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor is not on a quote, the string is never
    /// closed, or it contains an invalid escape.
    pub fn read_quoted_string(&mut self) -> Result<String> {
        let Some(next) = self.peek() else {
            return Ok(String::new());
        };
        if !Self::is_quoted_string_start(next) {
            return Err(self.error(Error::expected_start_of_quote()));
        }
        self.skip();
        self.read_string_until(next)
    }

    /// Reads until an unescaped `terminator`, consuming the terminator.
    ///
    /// Inside the string a backslash may escape only the terminator or
    /// another backslash.
    ///
    /// # Errors
    ///
    /// Returns an error on an invalid escape (leaving the cursor on the
    /// escaped character) or if input ends before the terminator.
    pub fn read_string_until(&mut self, terminator: char) -> Result<String> {
        let mut result = String::new();
        let mut escaped = false;

        while let Some(c) = self.read() {
            if escaped {
                if c == terminator || c == ESCAPE {
                    result.push(c);
                    escaped = false;
                } else {
                    self.cursor -= c.len_utf8();
                    return Err(self.error(Error::invalid_escape(c)));
                }
            } else if c == ESCAPE {
                escaped = true;
            } else if c == terminator {
                return Ok(result);
            } else {
                result.push(c);
            }
        }

        Err(self.error(Error::expected_end_of_quote()))
    }

    /// Reads a quoted string if the cursor is on a quote, else an unquoted one.
    ///
    /// # Errors
    ///
    /// Returns an error if a quoted string is malformed.
    pub fn read_string(&mut self) -> Result<String> {
        match self.peek() {
            None => Ok(String::new()),
            Some(next) if Self::is_quoted_string_start(next) => {
                self.skip();
                self.read_string_until(next)
            }
            Some(_) => Ok(self.read_unquoted_string()),
        }
    }

    /// Reads `true` or `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is present or the word is not a boolean.
    /// The cursor is restored on invalid input.
    pub fn read_boolean(&mut self) -> Result<bool> {
        let start = self.cursor;
        let value = self.read_string()?;
        match value.as_str() {
            "" => Err(self.error(Error::expected_bool())),
            "true" => Ok(true),
            "false" => Ok(false),
            _ => {
                self.cursor = start;
                Err(self.error(Error::invalid_bool(value)))
            }
        }
    }

    /// Consumes `c` or fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the next character is not `c`.
    pub fn expect(&mut self, c: char) -> Result<()> {
        if !self.next_is(c) {
            return Err(self.error(Error::expected_symbol(c)));
        }
        self.skip();
        Ok(())
    }
}
