//! Naming parts of the input.

use crate::{Error, Node, Parser, Rule};

impl Parser {
    /// Name whatever `sub` produces.
    ///
    /// With no inner node the matched text becomes a leaf. An anonymous inner node
    /// is renamed, and a named one is nested a level deeper.
    pub(crate) fn parse_capture(&mut self, name: &str, sub: &Rule) -> Result<Node, Error> {
        let start = self.reader().cursor();
        let inner = self.parse(sub)?;
        Ok(match inner {
            None => {
                let end = self.reader().cursor();
                Node::leaf(name, self.reader().text(start, end))
            }
            Some(node) if node.is_anonymous() => node.renamed(name),
            Some(node) => Node::branch(name, vec![node]),
        })
    }
}
