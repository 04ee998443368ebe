//! `Reference` and `Ignore`.

use crate::{Cursor, Error, Node, Parser, Rule};

impl Parser {
    /// Look the rule up now, not when the grammar was built, so rules can refer to
    /// themselves and to rules defined later.
    fn resolve(&self, name: &str) -> Result<Rule, Error> {
        match self.rule(name) {
            Some(rule) => {
                log::trace!("resolved {} at {}", name, self.reader().cursor());
                Ok(rule.clone())
            }
            None => {
                log::debug!("reference to undefined rule {:?}", name);
                Err(Error::UnknownRule(name.to_owned()))
            }
        }
    }

    pub(crate) fn match_reference(&mut self, name: &str) -> Result<Cursor, Error> {
        let rule = self.resolve(name)?;
        self.match_(&rule)
    }

    pub(crate) fn parse_reference(&mut self, name: &str) -> Result<Option<Node>, Error> {
        let rule = self.resolve(name)?;
        self.parse(&rule)
    }

    pub(crate) fn match_ignoring(&mut self, sub: &Rule) -> Result<Cursor, Error> {
        let previous = self.ignore_disabled();
        self.toggle_ignore(true);
        let result = self.match_(sub);
        self.toggle_ignore(previous);
        result
    }

    pub(crate) fn parse_ignoring(&mut self, sub: &Rule) -> Result<Option<Node>, Error> {
        let previous = self.ignore_disabled();
        self.toggle_ignore(true);
        let result = self.parse(sub);
        self.toggle_ignore(previous);
        result
    }
}
