//! # didpeg
//!
//! A scannerless parsing expression grammar engine, used to read interface
//! descriptions.
//!
//! Grammars are trees of [`Rule`]s. A [`Parser`] drives one over a decoded input:
//! [`Parser::match_`] checks that the input matches and reports how far it got,
//! [`Parser::parse`] also builds a [`Node`] tree out of the [`Rule::Capture`]s.
//!
//! ```
//! use didpeg::{and, Parser, Rule};
//!
//! let digit = Rule::range('0', '9');
//! let pair = and![
//!     Rule::capture("key", Rule::one_or_more(Rule::range('a', 'z'))),
//!     ':',
//!     Rule::capture("value", Rule::one_or_more(digit)),
//! ];
//!
//! let mut parser = Parser::from_text("id : 42").unwrap();
//! parser.set_ignore_list([' ']);
//! let node = parser.parse_eof(&pair).unwrap().unwrap();
//! assert_eq!(node.child("value").unwrap().value(), "42");
//! ```
//!
//! ## Backtracking
//!
//! Choices are ordered and every failed attempt puts the reader back where the
//! attempt started. Nothing is memoized, so a grammar that keeps re-trying the
//! same long alternatives can take exponential time, and deep nesting recurses
//! deeply. Left-recursive rules never terminate. Put a wall-clock limit around
//! parses of untrusted input if that matters.

#[macro_use]
extern crate derivative;

mod error;
mod grammar;
mod node;
mod ops;
mod parser;
mod reader;
mod rule;

pub use error::{Error, ErrorStack, NoMatchError};
pub use grammar::Grammar;
pub use node::Node;
pub use parser::Parser;
pub use reader::{Cursor, Reader};
pub use rule::Rule;

/// A [`Rule::And`] of anything that converts into a rule.
///
/// ```
/// # use didpeg::{and, Rule};
/// assert_eq!(and!['a', "bc"], Rule::and([Rule::from('a'), Rule::from("bc")]));
/// ```
#[macro_export]
macro_rules! and {
    ($($rule:expr),* $(,)?) => {
        {
            let rules: ::std::vec::Vec<$crate::Rule> = ::std::vec![$($crate::Rule::from($rule)),*];
            $crate::Rule::and(rules)
        }
    };
}

/// A [`Rule::Or`] of anything that converts into a rule.
#[macro_export]
macro_rules! or {
    ($($rule:expr),* $(,)?) => {
        {
            let rules: ::std::vec::Vec<$crate::Rule> = ::std::vec![$($crate::Rule::from($rule)),*];
            $crate::Rule::or(rules)
        }
    };
}
