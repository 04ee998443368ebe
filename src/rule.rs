//! Grammar values.
//!
//! A grammar is a tree of [`Rule`]s. Recursion goes through [`Rule::Reference`],
//! which names a rule registered on the [`Parser`](crate::Parser) and is only
//! looked up when it is matched, so rules never own themselves.

use std::{fmt, sync::Arc};

use itertools::Itertools;

use crate::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    // === Literals ===
    /// One exact code point.
    Char(char),
    /// An exact run of code points.
    Literal(Arc<str>),

    // === Sequences ===
    /// Every rule, in order.
    And(Arc<[Rule]>),
    /// The first rule that matches.
    Or(Arc<[Rule]>),

    // === Counting ===
    /// The rule, or nothing.
    Optional(Arc<Rule>),
    /// At least `min` and at most `max` repetitions. A `max` of 0 means no upper bound.
    Repeat { min: usize, max: usize, rule: Arc<Rule> },

    // === Lookahead ===
    /// Succeeds when the rule does *not* match. Never consumes.
    Not(Arc<Rule>),
    /// Succeeds when the rule matches. Never consumes.
    Peek(Arc<Rule>),

    // === Captures ===
    /// Produce a node named `name`. The empty name makes an anonymous node.
    Capture { name: Arc<str>, rule: Arc<Rule> },

    // === Classes ===
    /// Any one code point.
    Any,
    /// Any one code point, unless the rule matches here.
    AnyBut(Arc<Rule>),
    /// One code point in the inclusive range.
    RuneRange(char, char),
    /// The end of the input.
    Eof,
    /// `\n`, `\r\n` or `\r`.
    EndOfLine,
    /// A space, a tab or an [`Rule::EndOfLine`].
    Space,

    // === Indirection ===
    /// A rule registered under this name, resolved when matched.
    Reference(Arc<str>),
    /// Match the rule without skipping the ignore list.
    Ignore(Arc<Rule>),
}

impl Rule {
    pub fn and<I>(rules: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Rule>,
    {
        Rule::And(rules.into_iter().map(Into::into).collect())
    }

    pub fn or<I>(rules: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Rule>,
    {
        Rule::Or(rules.into_iter().map(Into::into).collect())
    }

    pub fn not(rule: impl Into<Rule>) -> Self {
        Rule::Not(Arc::new(rule.into()))
    }

    pub fn peek(rule: impl Into<Rule>) -> Self {
        Rule::Peek(Arc::new(rule.into()))
    }

    pub fn optional(rule: impl Into<Rule>) -> Self {
        Rule::Optional(Arc::new(rule.into()))
    }

    pub fn repeat(min: usize, max: usize, rule: impl Into<Rule>) -> Self {
        Rule::Repeat {
            min,
            max,
            rule: Arc::new(rule.into()),
        }
    }

    pub fn zero_or_more(rule: impl Into<Rule>) -> Self {
        Self::repeat(0, 0, rule)
    }

    pub fn one_or_more(rule: impl Into<Rule>) -> Self {
        Self::repeat(1, 0, rule)
    }

    pub fn capture(name: impl AsRef<str>, rule: impl Into<Rule>) -> Self {
        Rule::Capture {
            name: Arc::from(name.as_ref()),
            rule: Arc::new(rule.into()),
        }
    }

    /// A capture with the empty name.
    pub fn anonymous(rule: impl Into<Rule>) -> Self {
        Self::capture("", rule)
    }

    pub fn any() -> Self {
        Rule::Any
    }

    pub fn any_but(rule: impl Into<Rule>) -> Self {
        Rule::AnyBut(Arc::new(rule.into()))
    }

    pub fn range(min: char, max: char) -> Self {
        Rule::RuneRange(min, max)
    }

    pub fn eof() -> Self {
        Rule::Eof
    }

    pub fn end_of_line() -> Self {
        Rule::EndOfLine
    }

    pub fn space() -> Self {
        Rule::Space
    }

    pub fn reference(name: impl AsRef<str>) -> Self {
        Rule::Reference(Arc::from(name.as_ref()))
    }

    pub fn ignore(rule: impl Into<Rule>) -> Self {
        Rule::Ignore(Arc::new(rule.into()))
    }

    /// Can parsing this rule produce a [`Node`](crate::Node)?
    ///
    /// References are assumed to, since the target is unknown until match time.
    pub fn is_capturing(&self) -> bool {
        matches!(
            self,
            Rule::And(_)
                | Rule::Or(_)
                | Rule::Optional(_)
                | Rule::Repeat { .. }
                | Rule::Capture { .. }
                | Rule::Reference(_)
                | Rule::Ignore(_)
        )
    }

    /// Reject values no input could ever satisfy.
    pub fn check_bounds(&self) -> Result<(), Error> {
        let reason = match *self {
            Rule::RuneRange(min, max) if min > max => "the range is empty",
            Rule::Repeat { min, max, .. } if max > 0 && max < min => {
                "the maximum is smaller than the minimum"
            }
            _ => return Ok(()),
        };
        Err(Error::InvalidRule {
            rule: self.clone(),
            reason,
        })
    }

    /// Visit this rule and everything it owns, depth first.
    ///
    /// References are visited but not followed.
    pub fn walk<F>(&self, visit: &mut F) -> Result<(), Error>
    where
        F: FnMut(&Rule) -> Result<(), Error>,
    {
        visit(self)?;
        match self {
            Rule::And(rules) | Rule::Or(rules) => {
                for rule in rules.iter() {
                    rule.walk(visit)?;
                }
                Ok(())
            }
            Rule::Optional(rule)
            | Rule::Repeat { rule, .. }
            | Rule::Not(rule)
            | Rule::Peek(rule)
            | Rule::Capture { rule, .. }
            | Rule::AnyBut(rule)
            | Rule::Ignore(rule) => rule.walk(visit),
            Rule::Char(_)
            | Rule::Literal(_)
            | Rule::Any
            | Rule::RuneRange(..)
            | Rule::Eof
            | Rule::EndOfLine
            | Rule::Space
            | Rule::Reference(_) => Ok(()),
        }
    }
}

impl From<char> for Rule {
    fn from(c: char) -> Self {
        Rule::Char(c)
    }
}

impl From<&str> for Rule {
    fn from(s: &str) -> Self {
        Rule::Literal(Arc::from(s))
    }
}

impl From<String> for Rule {
    fn from(s: String) -> Self {
        Rule::Literal(Arc::from(s))
    }
}

/// PEG-ish notation, used in error messages.
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Char(c) => write!(f, "{:?}", c),
            Rule::Literal(s) => write!(f, "{:?}", s),
            Rule::And(rules) => write!(f, "({})", rules.iter().format(" ")),
            Rule::Or(rules) => write!(f, "({})", rules.iter().format(" / ")),
            Rule::Optional(rule) => write!(f, "{}?", rule),
            Rule::Repeat { min: 0, max: 0, rule } => write!(f, "{}*", rule),
            Rule::Repeat { min: 1, max: 0, rule } => write!(f, "{}+", rule),
            Rule::Repeat { min, max: 0, rule } => write!(f, "{}{{{},}}", rule, min),
            Rule::Repeat { min, max, rule } => write!(f, "{}{{{},{}}}", rule, min, max),
            Rule::Not(rule) => write!(f, "!{}", rule),
            Rule::Peek(rule) => write!(f, "&{}", rule),
            Rule::Capture { name, rule } if name.is_empty() => write!(f, "<{}>", rule),
            Rule::Capture { name, rule } => write!(f, "<{}: {}>", name, rule),
            Rule::Any => write!(f, "."),
            Rule::AnyBut(rule) => write!(f, "(!{} .)", rule),
            Rule::RuneRange(min, max) => write!(f, "[{:?}-{:?}]", min, max),
            Rule::Eof => write!(f, "EOF"),
            Rule::EndOfLine => write!(f, "EOL"),
            Rule::Space => write!(f, "SPACE"),
            Rule::Reference(name) => write!(f, "{}", name),
            Rule::Ignore(rule) => write!(f, "ignore({})", rule),
        }
    }
}
