//! Parse trees.

use std::fmt;

/// An element of a parse tree.
///
/// Nodes are built by [`Parser::parse`](crate::Parser::parse) and hold no reference
/// back to the input they came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Node {
    name: String,
    /// The captured text. Only leaves have one.
    value: String,
    children: Vec<Node>,
}

impl Node {
    pub fn leaf(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            children: Vec::new(),
        }
    }

    pub fn branch(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            children,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn into_children(self) -> Vec<Node> {
        self.children
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }

    /// Direct children with the given name.
    pub fn children_named<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a Node> + 'n
    where
        'a: 'n,
    {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// The first direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    pub(crate) fn renamed(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }

    /// Add the result of a sub-parse to `nodes`.
    ///
    /// Anonymous nodes give up their children instead of being added themselves,
    /// so they never show up in a finished tree.
    pub(crate) fn collect(nodes: &mut Vec<Node>, node: Option<Node>) {
        match node {
            None => {}
            Some(node) if node.is_anonymous() => nodes.extend(node.children),
            Some(node) => nodes.push(node),
        }
    }

    /// Nothing for no nodes, the node itself for one, an anonymous parent otherwise.
    pub(crate) fn from_children(mut nodes: Vec<Node>) -> Option<Node> {
        match nodes.len() {
            0 => None,
            1 => nodes.pop(),
            _ => Some(Node::branch("", nodes)),
        }
    }
}

/// One node per line, children indented below their parent.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn recur(node: &Node, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
            let name = if node.is_anonymous() { "_" } else { &node.name };
            write!(f, "{:indent$}{}", "", name, indent = depth * 2)?;
            if node.children.is_empty() {
                write!(f, " {:?}", node.value)?;
            }
            for child in &node.children {
                writeln!(f)?;
                recur(child, f, depth + 1)?;
            }
            Ok(())
        }
        recur(self, f, 0)
    }
}
