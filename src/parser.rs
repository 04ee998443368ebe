//! The engine driving a grammar over one input.

use std::{collections::HashMap, sync::Arc};

use crate::{Cursor, Error, Grammar, Node, NoMatchError, Reader, Rule};

/// One parse session: an input, the rules it may refer to, and what to skip between tokens.
///
/// A parser mutates its reader and ignore toggle in place, so it is not meant to be
/// shared. Give every concurrent parse its own.
#[derive(Debug, Clone)]
pub struct Parser {
    reader: Reader,
    /// Targets of [`Rule::Reference`].
    rules: HashMap<String, Rule>,
    /// Patterns skipped before every match, typically whitespace and comments.
    ignore: Vec<Rule>,
    ignore_disabled: bool,
}

impl Parser {
    pub fn new(input: impl Into<Arc<[char]>>) -> Result<Self, Error> {
        Ok(Self {
            reader: Reader::new(input)?,
            rules: HashMap::new(),
            ignore: Vec::new(),
            ignore_disabled: false,
        })
    }

    /// Decode the string into code points and start a session on it.
    pub fn from_text(input: &str) -> Result<Self, Error> {
        Self::new(input.chars().collect::<Vec<_>>())
    }

    /// Start a session with the grammar's rules and ignore list.
    pub fn with_grammar(input: impl Into<Arc<[char]>>, grammar: &Grammar) -> Result<Self, Error> {
        let mut parser = Self::new(input)?;
        parser.rules = grammar.rules().clone();
        parser.ignore = grammar.ignore_list().to_vec();
        Ok(parser)
    }

    pub fn reader(&self) -> &Reader {
        &self.reader
    }

    pub fn reader_mut(&mut self) -> &mut Reader {
        &mut self.reader
    }

    pub fn cursor(&self) -> Cursor {
        self.reader.cursor()
    }

    /// Register a rule that [`Rule::Reference`]s can name. Replaces any earlier definition.
    pub fn define(&mut self, name: impl Into<String>, rule: impl Into<Rule>) -> &mut Self {
        self.rules.insert(name.into(), rule.into());
        self
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    pub fn set_ignore_list<I>(&mut self, ignore: I)
    where
        I: IntoIterator,
        I::Item: Into<Rule>,
    {
        self.ignore = ignore.into_iter().map(Into::into).collect();
    }

    pub fn ignore_disabled(&self) -> bool {
        self.ignore_disabled
    }

    pub fn toggle_ignore(&mut self, disable: bool) {
        self.ignore_disabled = disable;
    }

    /// Go back to the start of the input. Rules and the ignore list are kept.
    pub fn reset(&mut self) -> &mut Self {
        self.reader.reset();
        self
    }

    /// Match the rule at the current position.
    ///
    /// On success the reader is left at the returned end cursor. On failure it is
    /// left where it was before the call.
    pub fn match_(&mut self, rule: &Rule) -> Result<Cursor, Error> {
        let before = self.reader.cursor();
        self.skip_ignored()
            .and_then(|()| self.match_rule(rule))
            .map_err(|err| {
                self.reader.jump(before);
                err
            })
    }

    /// Like [`Parser::match_`], but everything after the match must be ignorable.
    pub fn match_eof(&mut self, rule: &Rule) -> Result<Cursor, Error> {
        let before = self.reader.cursor();
        let end = self.match_(rule)?;
        self.expect_eof().map_err(|err| {
            self.reader.jump(before);
            err
        })?;
        Ok(end)
    }

    /// Match the rule and build a parse tree from its captures.
    ///
    /// Rules that cannot capture are only matched, and give `None`. So do
    /// capturing rules whose captures all came up empty.
    pub fn parse(&mut self, rule: &Rule) -> Result<Option<Node>, Error> {
        let before = self.reader.cursor();
        self.skip_ignored()
            .and_then(|()| self.parse_rule(rule))
            .map_err(|err| {
                self.reader.jump(before);
                err
            })
    }

    /// Like [`Parser::parse`], but everything after the match must be ignorable.
    pub fn parse_eof(&mut self, rule: &Rule) -> Result<Option<Node>, Error> {
        let before = self.reader.cursor();
        let node = self.parse(rule)?;
        self.expect_eof().map_err(|err| {
            self.reader.jump(before);
            err
        })?;
        Ok(node)
    }

    /// Build a no-match for `pattern` over this input.
    pub fn no_match(&self, pattern: &Rule, start: Cursor, end: Cursor) -> Error {
        NoMatchError::new(pattern.clone(), start, end, self.reader.input().clone()).into()
    }

    /// Add the context of `pattern` to a failure coming out of one of its sub-rules.
    pub(crate) fn context(&self, err: Error, pattern: &Rule, start: Cursor, end: Cursor) -> Error {
        if !err.is_no_match() {
            return err;
        }
        err.wrap(NoMatchError::new(
            pattern.clone(),
            start,
            end,
            self.reader.input().clone(),
        ))
    }

    fn expect_eof(&mut self) -> Result<(), Error> {
        self.skip_ignored()?;
        if self.reader.done() {
            Ok(())
        } else {
            let here = self.reader.cursor();
            Err(self.no_match(&Rule::Eof, here, here))
        }
    }

    /// Skip ignorable patterns until none of them match.
    ///
    /// The ignore list itself is matched with skipping disabled. The toggle is put
    /// back to what it was, not switched on, so this nests inside `Ignore`.
    fn skip_ignored(&mut self) -> Result<(), Error> {
        if self.ignore_disabled || self.ignore.is_empty() {
            return Ok(());
        }

        let previous = self.ignore_disabled;
        self.ignore_disabled = true;
        let ignore = std::mem::take(&mut self.ignore);

        let result = self.skip_each(&ignore);

        self.ignore = ignore;
        self.ignore_disabled = previous;
        result
    }

    fn skip_each(&mut self, ignore: &[Rule]) -> Result<(), Error> {
        'outer: loop {
            for rule in ignore {
                let start = self.reader.cursor();
                match self.match_(rule) {
                    // An empty match would spin forever.
                    Ok(end) if end.position() > start.position() => {
                        log::trace!("skipped {} at {}", rule, start);
                        continue 'outer;
                    }
                    Ok(_) => {}
                    Err(err) if err.is_no_match() => {}
                    Err(err) => return Err(err),
                }
            }
            return Ok(());
        }
    }

    /// Dispatch to the matcher for this kind of rule.
    fn match_rule(&mut self, rule: &Rule) -> Result<Cursor, Error> {
        match rule {
            Rule::Char(c) => self.match_char(rule, *c),
            Rule::Literal(s) => self.match_literal(rule, s),
            Rule::And(rules) => self.match_and(rule, rules),
            Rule::Or(rules) => self.match_or(rule, rules),
            Rule::Optional(inner) => self.match_optional(inner),
            Rule::Repeat { min, max, rule: inner } => self.match_repeat(rule, *min, *max, inner),
            Rule::Not(inner) => self.match_not(rule, inner),
            Rule::Peek(inner) => self.match_peek(rule, inner),
            Rule::Capture { rule: inner, .. } => self.match_(inner),
            Rule::Any => self.match_any(rule),
            Rule::AnyBut(inner) => self.match_any_but(rule, inner),
            Rule::RuneRange(min, max) => self.match_range(rule, *min, *max),
            Rule::Eof => self.match_end(rule),
            Rule::EndOfLine => self.match_end_of_line(rule),
            Rule::Space => self.match_space(rule),
            Rule::Reference(name) => self.match_reference(name),
            Rule::Ignore(inner) => self.match_ignoring(inner),
        }
    }

    /// Dispatch to the tree builder for this kind of rule.
    fn parse_rule(&mut self, rule: &Rule) -> Result<Option<Node>, Error> {
        match rule {
            Rule::And(rules) => self.parse_and(rule, rules),
            Rule::Or(rules) => self.parse_or(rule, rules),
            Rule::Optional(inner) => self.parse_optional(inner),
            Rule::Repeat { min, max, rule: inner } => self.parse_repeat(rule, *min, *max, inner),
            Rule::Capture { name, rule: inner } => self.parse_capture(name, inner).map(Some),
            Rule::Reference(name) => self.parse_reference(name),
            Rule::Ignore(inner) => self.parse_ignoring(inner),
            // Nothing to capture: just match.
            _ => self.match_rule(rule).map(|_| None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{and, or};

    #[test]
    fn literal_consumes_exactly() {
        for (input, rule, consumed) in [
            ("abc", Rule::from("abc"), "abc"),
            ("abcdef", Rule::from("abc"), "abc"),
            ("a", Rule::from('a'), "a"),
            ("ünï", Rule::from("ün"), "ün"),
        ] {
            let mut p = Parser::from_text(input).unwrap();
            let start = p.cursor();
            let end = p.match_(&rule).unwrap();
            assert_eq!(p.reader().text(start, end), consumed);
            assert_eq!(p.cursor(), end);
        }
    }

    #[test]
    fn literal_mismatch_rolls_back() {
        let mut p = Parser::from_text("abd").unwrap();
        let start = p.cursor();
        let err = p.match_(&Rule::from("abc")).unwrap_err();
        assert_eq!(p.cursor(), start);
        let err = err.no_match().unwrap();
        assert_eq!(err.start, start);
        assert_eq!(err.end.character(), Some('d'));
    }

    #[test]
    fn eof_anchoring() {
        let rule = Rule::from("ab");

        let mut p = Parser::from_text("abc").unwrap();
        assert!(p.match_(&rule).is_ok());

        let mut p = Parser::from_text("abc").unwrap();
        let err = p.match_eof(&rule).unwrap_err();
        assert_eq!(err.no_match().unwrap().pattern, Rule::Eof);
        assert_eq!(p.cursor().position(), 0);

        let mut p = Parser::from_text("abc").unwrap();
        assert!(p.parse(&Rule::capture("x", rule.clone())).is_ok());
        let mut p = Parser::from_text("abc").unwrap();
        assert!(p.parse_eof(&Rule::capture("x", rule)).is_err());
    }

    #[test]
    fn ignore_list_is_skipped() {
        let mut p = Parser::from_text("  a \t b  ").unwrap();
        p.set_ignore_list([' ', '\t']);
        let end = p.match_eof(&and!['a', 'b']).unwrap();
        assert_eq!(end.position(), 7);
        assert!(p.reader().done());
    }

    #[test]
    fn ignore_toggle_restored() {
        let mut p = Parser::from_text(" a").unwrap();
        p.set_ignore_list([' ']);
        p.toggle_ignore(true);
        assert!(p.match_(&Rule::from('a')).is_err());
        assert!(p.ignore_disabled());

        p.toggle_ignore(false);
        assert!(p.match_(&Rule::from('a')).is_ok());
        assert!(!p.ignore_disabled());
    }

    #[test]
    fn empty_ignore_match_terminates() {
        let mut p = Parser::from_text("a").unwrap();
        p.set_ignore_list([Rule::zero_or_more(' ')]);
        assert!(p.match_eof(&Rule::from('a')).is_ok());
    }

    #[test]
    fn non_capturing_parse_gives_nothing() {
        let mut p = Parser::from_text("abc").unwrap();
        assert_eq!(p.parse(&Rule::from("abc")).unwrap(), None);
        assert!(p.reader().done());

        // Structural rules with nothing named inside come up empty too.
        let mut p = Parser::from_text("abc").unwrap();
        assert_eq!(p.parse(&and!['a', or!['x', 'b'], 'c']).unwrap(), None);
        assert!(p.reader().done());

        // A failed plain match leaves skipped ignorables in place.
        let mut p = Parser::from_text("  abd").unwrap();
        p.set_ignore_list([' ']);
        assert!(p.parse(&Rule::from("abc")).unwrap_err().is_no_match());
        assert_eq!(p.cursor().position(), 0);
        assert_eq!(p.parse(&Rule::from("ab")).unwrap(), None);
        assert_eq!(p.cursor().position(), 4);
    }

    #[test]
    fn reset_rewinds() {
        let mut p = Parser::from_text("ab").unwrap();
        p.match_eof(&Rule::from("ab")).unwrap();
        p.reset();
        assert_eq!(p.cursor().position(), 0);
        assert!(p.match_eof(&Rule::from("ab")).is_ok());
    }

    #[test]
    fn empty_input() {
        assert!(matches!(Parser::from_text(""), Err(Error::EmptyInput)));
    }
}
