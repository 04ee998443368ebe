//! `Not` and `Peek`. Neither consumes anything.

use crate::{Cursor, Error, Parser, Rule};

impl Parser {
    pub(crate) fn match_not(&mut self, rule: &Rule, sub: &Rule) -> Result<Cursor, Error> {
        let start = self.reader().cursor();
        let result = self.match_(sub);
        self.reader_mut().jump(start);
        match result {
            Ok(end) => Err(self.no_match(rule, start, end)),
            Err(err) if err.is_no_match() => Ok(start),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn match_peek(&mut self, rule: &Rule, sub: &Rule) -> Result<Cursor, Error> {
        let start = self.reader().cursor();
        let result = self.match_(sub);
        self.reader_mut().jump(start);
        match result {
            Ok(_) => Ok(start),
            Err(err) => Err(self.context(err, rule, start, start)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{and, Parser, Rule};

    #[test]
    fn not_never_consumes() {
        for (input, succeeds) in [("ab", false), ("xb", true), ("a", true)] {
            let mut p = Parser::from_text(input).unwrap();
            let start = p.cursor();
            let result = p.match_(&Rule::not("ab"));
            assert_eq!(result.is_ok(), succeeds, "{}", input);
            if let Ok(end) = result {
                assert_eq!(end, start);
            }
            assert_eq!(p.cursor(), start, "{}", input);
        }
    }

    #[test]
    fn peek_never_consumes() {
        for (input, succeeds) in [("ab", true), ("xb", false)] {
            let mut p = Parser::from_text(input).unwrap();
            let start = p.cursor();
            let result = p.match_(&Rule::peek("ab"));
            assert_eq!(result.is_ok(), succeeds, "{}", input);
            assert_eq!(p.cursor(), start, "{}", input);
        }
    }

    #[test]
    fn lookahead_guards_a_sequence() {
        // A keyword, but not a prefix of a longer identifier.
        let ident_char = Rule::range('a', 'z');
        let keyword = and!["type", Rule::not(ident_char)];

        let mut p = Parser::from_text("type x").unwrap();
        assert_eq!(p.match_(&keyword).unwrap().position(), 4);

        let mut p = Parser::from_text("types").unwrap();
        assert!(p.match_(&keyword).is_err());
        assert_eq!(p.cursor().position(), 0);
    }

    #[test]
    fn lookahead_captures_nothing() {
        let mut p = Parser::from_text("a").unwrap();
        let rule = and![Rule::peek(Rule::capture("x", 'a')), Rule::capture("y", 'a')];
        let node = p.parse(&rule).unwrap().unwrap();
        assert_eq!(node.name(), "y");
    }
}
