//! Reusable grammar definitions.

use std::{collections::HashMap, sync::Arc};

use crate::{Error, Parser, Rule};

/// Named rules and an ignore list, built once and used to start any number of
/// [`Parser`] sessions.
///
/// Grammars are immutable once built and can be shared between threads; the
/// sessions started from them cannot.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    rules: HashMap<String, Rule>,
    ignore: Vec<Rule>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a rule that [`Rule::Reference`]s can name.
    pub fn rule(mut self, name: impl Into<String>, rule: impl Into<Rule>) -> Self {
        self.rules.insert(name.into(), rule.into());
        self
    }

    /// Skip this pattern before every token.
    pub fn ignore(mut self, rule: impl Into<Rule>) -> Self {
        self.ignore.push(rule.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    pub fn rules(&self) -> &HashMap<String, Rule> {
        &self.rules
    }

    pub fn ignore_list(&self) -> &[Rule] {
        &self.ignore
    }

    /// Make sure every reference resolves and every rule has satisfiable bounds,
    /// without reading any input.
    pub fn check(&self) -> Result<(), Error> {
        let mut names: Vec<_> = self.rules.keys().collect();
        names.sort_unstable();

        let rules = names
            .into_iter()
            .filter_map(|name| self.rules.get(name))
            .chain(self.ignore.iter());
        for rule in rules {
            rule.walk(&mut |rule| {
                rule.check_bounds()?;
                match rule {
                    Rule::Reference(name) if !self.rules.contains_key(&**name) => {
                        Err(Error::UnknownRule(name.to_string()))
                    }
                    _ => Ok(()),
                }
            })?;
        }
        Ok(())
    }

    /// Start a session over `input`.
    pub fn parser(&self, input: impl Into<Arc<[char]>>) -> Result<Parser, Error> {
        Parser::with_grammar(input, self)
    }

    /// Start a session over the code points of `input`.
    pub fn parser_for(&self, input: &str) -> Result<Parser, Error> {
        self.parser(input.chars().collect::<Vec<_>>())
    }
}
