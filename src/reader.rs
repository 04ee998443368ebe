//! Positional access to a decoded input.

use std::{fmt, sync::Arc};

use crate::Error;

/// A position in the input.
///
/// Cursors are plain values. One taken before an attempt is the place to
/// [`Reader::jump`] back to if that attempt fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    /// Code point under the cursor, or `None` once the input is exhausted.
    character: Option<char>,
    position: usize,
    line: usize,
    column: usize,
    /// Offset just after the most recent line separator.
    last_newline: usize,
}

impl Cursor {
    pub fn character(&self) -> Option<char> {
        self.character
    }

    /// Absolute offset, in code points.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Zero-based line and column.
    pub fn line(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    pub fn last_newline(&self) -> usize {
        self.last_newline
    }

    pub fn is_done(&self) -> bool {
        self.character.is_none()
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)?;
        match self.character {
            Some(c) => write!(f, " {:?}", c),
            None => write!(f, " EOF"),
        }
    }
}

/// The input and a cursor into it.
#[derive(Debug, Clone)]
pub struct Reader {
    input: Arc<[char]>,
    cursor: Cursor,
}

impl Reader {
    pub fn new(input: impl Into<Arc<[char]>>) -> Result<Self, Error> {
        let input = input.into();
        let first = match input.first() {
            Some(&c) => c,
            None => return Err(Error::EmptyInput),
        };
        Ok(Self {
            input,
            cursor: Cursor {
                character: Some(first),
                position: 0,
                line: 0,
                column: 0,
                last_newline: 0,
            },
        })
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn done(&self) -> bool {
        self.cursor.is_done()
    }

    /// The current code point, `None` at the end.
    pub fn rune(&self) -> Option<char> {
        self.cursor.character
    }

    /// Move back (or forward) to a cursor previously handed out by this reader.
    pub fn jump(&mut self, marker: Cursor) {
        debug_assert!(
            marker.position <= self.input.len(),
            "jumped to {} which is past the end of the input ({})",
            marker.position,
            self.input.len()
        );
        self.cursor = marker;
    }

    /// Go back to the very first code point.
    pub fn reset(&mut self) {
        self.cursor = Cursor {
            character: self.input.first().copied(),
            position: 0,
            line: 0,
            column: 0,
            last_newline: 0,
        };
    }

    /// Advance one code point. Does nothing once the input is exhausted.
    ///
    /// `\n`, `\r\n` and a lone `\r` each count as exactly one line break.
    /// That includes a break that ends the input: `"ab\n"` finishes at line 1,
    /// column 0, and [`Reader::line`] there is the empty last line, not `ab`.
    pub fn next(&mut self) -> &mut Self {
        let previous = match self.cursor.character {
            Some(c) => c,
            None => return self,
        };

        let cursor = &mut self.cursor;
        cursor.position += 1;
        cursor.column += 1;
        let next = self.input.get(cursor.position).copied();

        // A '\r' directly followed by '\n' waits for the '\n' to break the line.
        if previous == '\n' || (previous == '\r' && next != Some('\n')) {
            cursor.line += 1;
            cursor.column = 0;
            cursor.last_newline = cursor.position;
        }
        cursor.character = next;

        self
    }

    /// The code points from `start` (inclusive) to `end` (exclusive).
    pub fn input_range(&self, start: Cursor, end: Cursor) -> &[char] {
        &self.input[start.position..end.position]
    }

    /// Same as [`Reader::input_range`], collected into a string.
    pub fn text(&self, start: Cursor, end: Cursor) -> String {
        self.input_range(start, end).iter().collect()
    }

    /// The whole line `end` sits on, without its line separator.
    pub fn line(&self, end: Cursor) -> &[char] {
        line_of(&self.input, end)
    }

    pub fn input(&self) -> &Arc<[char]> {
        &self.input
    }
}

/// Scan forward from the start of `end`'s line up to the next separator.
pub(crate) fn line_of(input: &[char], end: Cursor) -> &[char] {
    let start = end.last_newline.min(input.len());
    let stop = input[end.position.min(input.len())..]
        .iter()
        .position(|&c| c == '\n' || c == '\r')
        .map_or(input.len(), |idx| end.position + idx);
    &input[start..stop]
}
