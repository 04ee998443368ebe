//! How each kind of [`Rule`](crate::Rule) matches and captures.
//!
//! Every matcher starts at the reader's current cursor and, when it fails, leaves
//! the reader exactly there. Sub-rules always go back through
//! [`Parser::match_`](crate::Parser::match_) or [`Parser::parse`](crate::Parser::parse),
//! so the ignore list is skipped between them.

mod capture;
mod chars;
mod indirect;
mod lookahead;
mod repeat;
mod sequence;
