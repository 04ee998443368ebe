//! `Repeat` and `Optional`.

use crate::{Cursor, Error, Node, Parser, Rule};

impl Parser {
    /// At least `min` matches, then greedily up to `max` (no limit when `max` is 0).
    pub(crate) fn match_repeat(
        &mut self,
        rule: &Rule,
        min: usize,
        max: usize,
        sub: &Rule,
    ) -> Result<Cursor, Error> {
        self.repeat(rule, min, max, sub, |parser, sub| {
            parser.match_(sub).map(|_| None)
        })
        .map(|_| self.reader().cursor())
    }

    pub(crate) fn parse_repeat(
        &mut self,
        rule: &Rule,
        min: usize,
        max: usize,
        sub: &Rule,
    ) -> Result<Option<Node>, Error> {
        self.repeat(rule, min, max, sub, Parser::parse)
            .map(Node::from_children)
    }

    fn repeat<F>(
        &mut self,
        rule: &Rule,
        min: usize,
        max: usize,
        sub: &Rule,
        mut step: F,
    ) -> Result<Vec<Node>, Error>
    where
        F: FnMut(&mut Parser, &Rule) -> Result<Option<Node>, Error>,
    {
        rule.check_bounds()?;

        let start = self.reader().cursor();
        let mut nodes = Vec::new();
        let mut count = 0;
        while max == 0 || count < max {
            let here = self.reader().cursor();
            match step(self, sub) {
                Ok(node) => {
                    count += 1;
                    Node::collect(&mut nodes, node);
                    // Matching nothing would match nothing forever, which meets any minimum.
                    if self.reader().cursor().position() == here.position() {
                        break;
                    }
                }
                Err(err) if err.is_no_match() && count >= min => break,
                Err(err) => {
                    self.reader_mut().jump(start);
                    return Err(self.context(err, rule, start, here));
                }
            }
        }
        Ok(nodes)
    }

    /// Never fails on a no-match; matches nothing instead.
    pub(crate) fn match_optional(&mut self, sub: &Rule) -> Result<Cursor, Error> {
        match self.match_(sub) {
            Ok(end) => Ok(end),
            Err(err) if err.is_no_match() => Ok(self.reader().cursor()),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn parse_optional(&mut self, sub: &Rule) -> Result<Option<Node>, Error> {
        match self.parse(sub) {
            Ok(node) => Ok(node),
            Err(err) if err.is_no_match() => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::{and, Parser, Rule};

    #[rstest]
    #[case("aaa", Rule::zero_or_more('a'), Some(3))]
    #[case("bbb", Rule::zero_or_more('a'), Some(0))]
    #[case("aab", Rule::one_or_more('a'), Some(2))]
    #[case("baa", Rule::one_or_more('a'), None)]
    #[case("aaa", Rule::repeat(2, 2, 'a'), Some(2))]
    #[case("aba", Rule::repeat(2, 2, 'a'), None)]
    #[case("aaaa", Rule::repeat(1, 3, 'a'), Some(3))]
    #[case("ababa", Rule::repeat(2, 0, "ab"), Some(4))]
    #[case("abac", Rule::repeat(2, 0, "ab"), None)]
    fn repeat_bounds(#[case] input: &str, #[case] rule: Rule, #[case] expected: Option<usize>) {
        let mut p = Parser::from_text(input).unwrap();
        let got = p.match_(&rule).ok().map(|end| end.position());
        assert_eq!(got, expected);
        if expected.is_none() {
            assert_eq!(p.cursor().position(), 0);
        }
    }

    #[test]
    fn zero_or_more_reaches_the_end() {
        let mut p = Parser::from_text("aaa").unwrap();
        let end = p.match_(&Rule::zero_or_more('a')).unwrap();
        assert_eq!(end.position(), 3);
        assert!(p.reader().done());
    }

    #[test]
    fn too_few_keeps_the_cause() {
        let mut p = Parser::from_text("ab").unwrap();
        let err = p.match_(&Rule::repeat(2, 2, 'a')).unwrap_err();
        let no_match = err.no_match().unwrap();
        assert_eq!(no_match.start.position(), 0);
        assert_eq!(no_match.end.position(), 1);
    }

    #[test]
    fn empty_matches_terminate() {
        let mut p = Parser::from_text("b").unwrap();
        let rule = Rule::zero_or_more(Rule::optional('a'));
        assert_eq!(p.match_(&rule).unwrap().position(), 0);

        let rule = Rule::repeat(3, 0, Rule::optional('a'));
        assert_eq!(p.match_(&rule).unwrap().position(), 0);
    }

    #[test]
    fn bad_bounds_are_rejected() {
        let mut p = Parser::from_text("aaa").unwrap();
        let err = p.match_(&Rule::repeat(3, 2, 'a')).unwrap_err();
        assert!(!err.is_no_match());
    }

    #[test]
    fn repeat_flattens() {
        let mut p = Parser::from_text("a,b,c").unwrap();
        let item = Rule::capture("item", Rule::range('a', 'z'));
        let list = and![item.clone(), Rule::zero_or_more(and![',', item])];
        let node = p.parse_eof(&Rule::capture("list", list)).unwrap().unwrap();
        assert_eq!(node.name(), "list");
        let values: Vec<_> = node.children().iter().map(|n| n.value()).collect();
        assert_eq!(values, ["a", "b", "c"]);
    }

    #[test]
    fn optional_never_fails() {
        for input in ["a", "b"] {
            let mut p = Parser::from_text(input).unwrap();
            let start = p.cursor();
            let end = p.match_(&Rule::optional("ab")).unwrap();
            assert_eq!(end, start);
            assert_eq!(p.cursor(), start);
        }

        let mut p = Parser::from_text("ab").unwrap();
        assert_eq!(p.match_(&Rule::optional("ab")).unwrap().position(), 2);
    }

    #[test]
    fn optional_passes_nodes_through() {
        let rule = Rule::optional(Rule::capture("x", 'x'));

        let mut p = Parser::from_text("x").unwrap();
        assert_eq!(p.parse(&rule).unwrap().unwrap().name(), "x");

        let mut p = Parser::from_text("y").unwrap();
        assert_eq!(p.parse(&rule).unwrap(), None);
    }

    #[test]
    fn optional_does_not_hide_broken_grammars() {
        let mut p = Parser::from_text("x").unwrap();
        assert!(p.match_(&Rule::optional(Rule::reference("missing"))).is_err());
    }
}
