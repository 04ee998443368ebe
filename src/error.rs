//! Match failures and grammar misuse.

use std::{fmt, ops::Range, sync::Arc};

use ariadne::{CharSet, Label, Report, ReportKind};
use itertools::Itertools;
use thiserror::Error;

use crate::{reader::line_of, Cursor, Rule};

#[derive(Error, Debug, Clone)]
pub enum Error {
    /// A pattern did not match. The normal way for an alternative to fail.
    #[error("{0}")]
    NoMatch(Box<NoMatchError>),
    /// A no-match with the context of every enclosing rule that gave up because of it.
    #[error("{0}")]
    Stack(ErrorStack),
    /// A rule was built with values no input can satisfy.
    #[error("invalid rule {rule}: {reason}")]
    InvalidRule { rule: Rule, reason: &'static str },
    /// A reference to a rule that was never defined.
    #[error("no rule named {0:?} has been defined")]
    UnknownRule(String),
    #[error("input is empty")]
    EmptyInput,
}

impl Error {
    /// Is this an ordinary failed match, as opposed to a broken grammar?
    ///
    /// Only these are recovered from by `Or`, `Optional`, `Not` and friends.
    pub fn is_no_match(&self) -> bool {
        matches!(self, Error::NoMatch(_) | Error::Stack(_))
    }

    /// The outermost no-match.
    pub fn no_match(&self) -> Option<&NoMatchError> {
        match self {
            Error::NoMatch(err) => Some(err),
            Error::Stack(stack) => stack.errors.last(),
            _ => None,
        }
    }

    /// How far the failed attempt got.
    pub fn end(&self) -> Option<Cursor> {
        self.no_match().map(|err| err.end)
    }

    /// Add the context of an enclosing rule.
    ///
    /// A stack is appended to rather than wrapped again. Errors that are not
    /// no-matches are passed through untouched.
    pub fn wrap(self, context: NoMatchError) -> Error {
        match self {
            Error::NoMatch(inner) => Error::Stack(ErrorStack {
                errors: vec![*inner, context],
            }),
            Error::Stack(mut stack) => {
                stack.errors.push(context);
                Error::Stack(stack)
            }
            other => other,
        }
    }
}

impl From<NoMatchError> for Error {
    fn from(err: NoMatchError) -> Self {
        Error::NoMatch(Box::new(err))
    }
}

/// A pattern that did not match.
///
/// Creating one is cheap; the offending line is only rendered when the error is displayed.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct NoMatchError {
    pub pattern: Rule,
    /// Where the attempt started.
    pub start: Cursor,
    /// Where the attempt stopped.
    pub end: Cursor,
    #[derivative(Debug = "ignore")]
    input: Arc<[char]>,
}

impl NoMatchError {
    pub fn new(pattern: Rule, start: Cursor, end: Cursor, input: Arc<[char]>) -> Self {
        Self {
            pattern,
            start,
            end,
            input,
        }
    }

    /// The source line containing `end`.
    pub fn line(&self) -> String {
        line_of(&self.input, self.end).iter().collect()
    }

    /// Build a diagnostic for this failure.
    ///
    /// Spans are in code points, which is what `ariadne` counts in.
    pub fn report(&self, source: impl Into<String>) -> Report<(String, Range<usize>)> {
        let source = source.into();
        let at = self.end.position();
        let failed = at..(at + 1).min(self.input.len()).max(at);

        let mut report = Report::build(ReportKind::Error, source.clone(), at)
            .with_config(ariadne::Config::default().with_char_set(CharSet::Ascii))
            .with_message(format!("no match: {}", self.pattern))
            .with_label(
                Label::new((source.clone(), failed))
                    .with_message(format!("expected {} here", self.pattern)),
            );
        if self.start.position() < at {
            report = report.with_label(
                Label::new((source, self.start.position()..at))
                    .with_message("matched this far"),
            );
        }
        report.finish()
    }
}

/// `[line:col/line:col] 'char' | no match: <pattern>`, then the line and a caret under `end`.
impl fmt::Display for NoMatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start_line, start_col) = self.start.line();
        let (end_line, end_col) = self.end.line();
        write!(
            f,
            "[{}:{}/{}:{}] ",
            start_line + 1,
            start_col + 1,
            end_line + 1,
            end_col + 1
        )?;
        match self.end.character() {
            Some(c) => write!(f, "{:?}", c)?,
            None => write!(f, "EOF")?,
        }
        writeln!(f, " | no match: {}", self.pattern)?;
        writeln!(f, "{}", self.line())?;
        write!(f, "{:width$}^", "", width = end_col)
    }
}

impl std::error::Error for NoMatchError {}

/// Nested failure context, innermost first.
#[derive(Debug, Clone)]
pub struct ErrorStack {
    pub errors: Vec<NoMatchError>,
}

/// Most specific failure first, numbered.
impl fmt::Display for ErrorStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.errors
                .iter()
                .enumerate()
                .format_with("\n", |(idx, err), f| f(&format_args!("{}. {}", idx + 1, err)))
        )
    }
}

impl std::error::Error for ErrorStack {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reader;

    fn input(s: &str) -> Arc<[char]> {
        s.chars().collect::<Vec<_>>().into()
    }

    fn cursor_at(input: &Arc<[char]>, n: usize) -> Cursor {
        let mut r = Reader::new(input.clone()).unwrap();
        for _ in 0..n {
            r.next();
        }
        r.cursor()
    }

    #[test]
    fn renders_line_and_caret() {
        let input = input("first\nsecond line\n");
        let start = cursor_at(&input, 6);
        let end = cursor_at(&input, 9);
        let err = NoMatchError::new(Rule::from("cox"), start, end, input);
        assert_eq!(
            err.to_string(),
            "[2:1/2:4] 'o' | no match: \"cox\"\nsecond line\n   ^"
        );
    }

    #[test]
    fn renders_eof() {
        let input = input("ab");
        let end = cursor_at(&input, 2);
        let err = NoMatchError::new(Rule::Char('c'), end, end, input);
        assert_eq!(err.to_string(), "[1:3/1:3] EOF | no match: 'c'\nab\n  ^");
    }

    #[test]
    fn wrap_appends() {
        let input = input("abc");
        let at = cursor_at(&input, 1);
        let inner = NoMatchError::new(Rule::Char('x'), at, at, input.clone());
        let outer = NoMatchError::new(Rule::and(['a', 'x']), cursor_at(&input, 0), at, input.clone());
        let outermost = NoMatchError::new(Rule::Any, cursor_at(&input, 0), at, input);

        let err = Error::from(inner).wrap(outer).wrap(outermost);
        match &err {
            Error::Stack(stack) => {
                assert_eq!(stack.errors.len(), 3);
                assert_eq!(stack.errors[0].pattern, Rule::Char('x'));
                assert_eq!(stack.errors[2].pattern, Rule::Any);
            }
            other => panic!("expected a stack, got {:?}", other),
        }
        assert_eq!(err.end(), Some(at));
        assert!(err.to_string().starts_with("1. [1:2/1:2] 'b' | no match: 'x'"));
        assert!(err.to_string().contains("\n3. [1:1/1:2] 'b' | no match: ."));
    }

    #[test]
    fn hard_errors_are_not_wrapped() {
        let input = input("abc");
        let at = cursor_at(&input, 0);
        let err = Error::UnknownRule("nope".to_owned())
            .wrap(NoMatchError::new(Rule::Any, at, at, input));
        assert!(matches!(err, Error::UnknownRule(_)));
        assert!(!err.is_no_match());
        assert_eq!(err.end(), None);
    }

    #[test]
    fn report_writes() {
        let text = "abc\nabd";
        let input = input(text);
        let err = NoMatchError::new(
            Rule::from("abc"),
            cursor_at(&input, 4),
            cursor_at(&input, 6),
            input,
        );
        let mut out = Vec::new();
        err.report("test.did")
            .write(
                ariadne::sources(std::iter::once(("test.did".to_owned(), text))),
                &mut out,
            )
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("no match"));
    }
}
