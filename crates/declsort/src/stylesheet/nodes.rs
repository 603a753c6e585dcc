/// 1-based line and column, columns count characters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
  pub line: u32,
  pub column: u32,
}

impl Position {
  pub fn new(line: u32, column: u32) -> Self {
    Self { line, column }
  }
}

/// Where a node starts and ends in the stylesheet text. Both ends point at a
/// character, `end` is the node's final character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Source {
  pub start: Position,
  pub end: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
  Rule(Rule),
  AtRule(AtRule),
  Declaration(Declaration),
  Comment(Comment),
}

/// The synthetic top level rule, it has no selector
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Root {
  pub nodes: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
  pub selector: String,
  pub nodes: Vec<Node>,
  pub source: Source,
}

/// `@media`, `@supports` and friends. Parsed so they do not break the tree,
/// never validated or reordered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtRule {
  pub name: String,
  pub params: String,
  pub nodes: Option<Vec<Node>>,
  pub source: Source,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
  pub prop: String,
  pub value: String,
  pub important: bool,
  pub source: Source,
}

impl Declaration {
  /// Declarations are identified by where they start, two declarations with
  /// identical text at different places are different declarations.
  pub fn same_source(&self, other: &Declaration) -> bool {
    self.source.start == other.source.start
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
  pub text: String,
  pub source: Source,
}

/// A node holding children: the root or a rule
pub trait Container {
  fn nodes(&self) -> &[Node];

  fn declarations(&self) -> Vec<&Declaration> {
    self
      .nodes()
      .iter()
      .filter_map(|node| match node {
        Node::Declaration(declaration) => Some(declaration),
        _ => None,
      })
      .collect()
  }

  fn rules(&self) -> Vec<&Rule> {
    self
      .nodes()
      .iter()
      .filter_map(|node| match node {
        Node::Rule(rule) => Some(rule),
        _ => None,
      })
      .collect()
  }
}

impl Container for Root {
  fn nodes(&self) -> &[Node] {
    &self.nodes
  }
}

impl Container for Rule {
  fn nodes(&self) -> &[Node] {
    &self.nodes
  }
}
