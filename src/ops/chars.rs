//! Literals and single code point classes.

use crate::{Cursor, Error, Parser, Rule};

impl Parser {
    pub(crate) fn match_char(&mut self, rule: &Rule, expected: char) -> Result<Cursor, Error> {
        let start = self.reader().cursor();
        if start.character() != Some(expected) {
            return Err(self.no_match(rule, start, start));
        }
        Ok(self.reader_mut().next().cursor())
    }

    /// Compare one code point at a time.
    pub(crate) fn match_literal(&mut self, rule: &Rule, expected: &str) -> Result<Cursor, Error> {
        let start = self.reader().cursor();
        for c in expected.chars() {
            let here = self.reader().cursor();
            if here.character() != Some(c) {
                self.reader_mut().jump(start);
                return Err(self.no_match(rule, start, here));
            }
            self.reader_mut().next();
        }
        Ok(self.reader().cursor())
    }

    pub(crate) fn match_any(&mut self, rule: &Rule) -> Result<Cursor, Error> {
        let start = self.reader().cursor();
        if self.reader().done() {
            return Err(self.no_match(rule, start, start));
        }
        Ok(self.reader_mut().next().cursor())
    }

    pub(crate) fn match_any_but(&mut self, rule: &Rule, except: &Rule) -> Result<Cursor, Error> {
        let start = self.reader().cursor();
        match self.match_(except) {
            Ok(_) => {
                self.reader_mut().jump(start);
                Err(self.no_match(rule, start, start))
            }
            Err(err) if err.is_no_match() => self.match_any(rule),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn match_range(&mut self, rule: &Rule, min: char, max: char) -> Result<Cursor, Error> {
        rule.check_bounds()?;
        let start = self.reader().cursor();
        match start.character() {
            Some(c) if (min..=max).contains(&c) => Ok(self.reader_mut().next().cursor()),
            _ => Err(self.no_match(rule, start, start)),
        }
    }

    pub(crate) fn match_end(&mut self, rule: &Rule) -> Result<Cursor, Error> {
        let here = self.reader().cursor();
        if here.is_done() {
            Ok(here)
        } else {
            Err(self.no_match(rule, here, here))
        }
    }

    /// `\n`, `\r\n` or a lone `\r`.
    pub(crate) fn match_end_of_line(&mut self, rule: &Rule) -> Result<Cursor, Error> {
        let start = self.reader().cursor();
        match start.character() {
            Some('\n') => Ok(self.reader_mut().next().cursor()),
            Some('\r') => {
                let reader = self.reader_mut().next();
                if reader.rune() == Some('\n') {
                    reader.next();
                }
                Ok(reader.cursor())
            }
            _ => Err(self.no_match(rule, start, start)),
        }
    }

    pub(crate) fn match_space(&mut self, rule: &Rule) -> Result<Cursor, Error> {
        let start = self.reader().cursor();
        match start.character() {
            Some(' ') | Some('\t') => Ok(self.reader_mut().next().cursor()),
            _ => self.match_end_of_line(rule),
        }
    }
}
