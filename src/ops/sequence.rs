//! `And` and `Or`.

use crate::{Cursor, Error, Node, Parser, Rule};

impl Parser {
    /// Every rule in order, or nothing at all.
    pub(crate) fn match_and(&mut self, rule: &Rule, rules: &[Rule]) -> Result<Cursor, Error> {
        let start = self.reader().cursor();
        for sub in rules {
            let here = self.reader().cursor();
            if let Err(err) = self.match_(sub) {
                self.reader_mut().jump(start);
                return Err(self.context(err, rule, start, here));
            }
        }
        Ok(self.reader().cursor())
    }

    pub(crate) fn parse_and(&mut self, rule: &Rule, rules: &[Rule]) -> Result<Option<Node>, Error> {
        let start = self.reader().cursor();
        let mut nodes = Vec::new();
        for sub in rules {
            let here = self.reader().cursor();
            match self.parse(sub) {
                Ok(node) => Node::collect(&mut nodes, node),
                Err(err) => {
                    self.reader_mut().jump(start);
                    return Err(self.context(err, rule, start, here));
                }
            }
        }
        Ok(Node::from_children(nodes))
    }

    /// The first alternative that matches wins. On failure only the last
    /// alternative's error is kept.
    pub(crate) fn match_or(&mut self, rule: &Rule, rules: &[Rule]) -> Result<Cursor, Error> {
        let start = self.reader().cursor();
        let mut last = None;
        for sub in rules {
            match self.match_(sub) {
                Ok(end) => return Ok(end),
                Err(err) if err.is_no_match() => last = Some(err),
                Err(err) => return Err(err),
            }
        }
        Err(self.no_alternative(rule, start, last))
    }

    pub(crate) fn parse_or(&mut self, rule: &Rule, rules: &[Rule]) -> Result<Option<Node>, Error> {
        let start = self.reader().cursor();
        let mut last = None;
        for sub in rules {
            match self.parse(sub) {
                Ok(node) => return Ok(node),
                Err(err) if err.is_no_match() => last = Some(err),
                Err(err) => return Err(err),
            }
        }
        Err(self.no_alternative(rule, start, last))
    }

    fn no_alternative(&mut self, rule: &Rule, start: Cursor, last: Option<Error>) -> Error {
        self.reader_mut().jump(start);
        match last {
            Some(err) => self.context(err, rule, start, start),
            None => self.no_match(rule, start, start),
        }
    }
}
