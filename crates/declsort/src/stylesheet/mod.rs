//! PostCSS compatible parser for the stylesheet text found in style blocks.
//!
//! Only the structure the ordering checks need is kept: rules, at-rules,
//! declarations and comments with their source positions. Positions follow
//! PostCSS, a declaration ends on its `;` when it has one.

mod nodes;
mod tokenizer;

pub use nodes::*;
pub use tokenizer::{Token, TokenKind, Tokenizer};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{reason} at {line}:{column}")]
pub struct CssSyntaxError {
  pub reason: String,
  pub line: u32,
  pub column: u32,
}

/// Stylesheet text plus a line start table for offset to position lookups
pub struct Input<'a> {
  css: &'a str,
  line_starts: Vec<usize>,
}

impl<'a> Input<'a> {
  pub fn new(css: &'a str) -> Self {
    let line_starts = std::iter::once(0)
      .chain(css.match_indices('\n').map(|(index, _)| index + 1))
      .collect();
    Self { css, line_starts }
  }

  pub fn css(&self) -> &'a str {
    self.css
  }

  /// Position of the character containing byte `offset`
  pub fn position(&self, offset: usize) -> Position {
    let mut offset = offset.min(self.css.len());
    while !self.css.is_char_boundary(offset) {
      offset -= 1;
    }

    let line = self.line_starts.partition_point(|start| *start <= offset);
    let line_start = self.line_starts[line - 1];
    let column = self.css[line_start..offset].chars().count() + 1;

    Position::new(line as u32, column as u32)
  }

  pub fn error(&self, reason: impl Into<String>, offset: usize) -> CssSyntaxError {
    let position = self.position(offset);
    CssSyntaxError {
      reason: reason.into(),
      line: position.line,
      column: position.column,
    }
  }
}

enum BlockKind {
  Rule { selector: String },
  AtRule { name: String, params: String },
}

/// A rule or at-rule whose closing `}` has not been seen yet
struct OpenBlock {
  kind: BlockKind,
  start: Position,
  nodes: Vec<Node>,
}

struct Parser<'a> {
  input: &'a Input<'a>,
  tokenizer: Tokenizer<'a>,
  root: Root,
  open: Vec<OpenBlock>,
}

fn join(tokens: &[Token<'_>]) -> String {
  tokens.iter().map(|token| token.value).collect()
}

fn is_space_or_comment(token: &Token<'_>) -> bool {
  matches!(token.kind, TokenKind::Space | TokenKind::Comment)
}

fn trim_end(tokens: &mut Vec<Token<'_>>) {
  while tokens.last().is_some_and(is_space_or_comment) {
    tokens.pop();
  }
}

impl<'a> Parser<'a> {
  fn new(input: &'a Input<'a>) -> Self {
    Self {
      input,
      tokenizer: Tokenizer::new(input),
      root: Root::default(),
      open: Vec::new(),
    }
  }

  fn parse(mut self) -> Result<Root, CssSyntaxError> {
    while let Some(token) = self.tokenizer.next_token()? {
      match token.kind {
        TokenKind::Space | TokenKind::Semicolon => {}
        TokenKind::CloseCurly => self.end(token)?,
        TokenKind::Comment => self.comment(token),
        TokenKind::AtWord => self.at_rule(token)?,
        TokenKind::OpenCurly => self.open_rule(String::new(), token.start),
        _ => self.other(token)?,
      }
    }

    if let Some(block) = self.open.last() {
      return Err(CssSyntaxError {
        reason: "Unclosed block".into(),
        line: block.start.line,
        column: block.start.column,
      });
    }

    Ok(self.root)
  }

  fn current(&mut self) -> &mut Vec<Node> {
    match self.open.last_mut() {
      Some(block) => &mut block.nodes,
      None => &mut self.root.nodes,
    }
  }

  fn source(&self, start: usize, end: usize) -> Source {
    Source {
      start: self.input.position(start),
      end: self.input.position(end),
    }
  }

  fn comment(&mut self, token: Token<'a>) {
    let inner = token
      .value
      .strip_prefix("/*")
      .and_then(|value| value.strip_suffix("*/"))
      .unwrap_or_default();

    let node = Node::Comment(Comment {
      text: inner.trim().to_string(),
      source: self.source(token.start, token.end),
    });
    self.current().push(node);
  }

  fn open_rule(&mut self, selector: String, start: usize) {
    self.open.push(OpenBlock {
      kind: BlockKind::Rule { selector },
      start: self.input.position(start),
      nodes: Vec::new(),
    });
  }

  fn end(&mut self, token: Token<'a>) -> Result<(), CssSyntaxError> {
    let Some(block) = self.open.pop() else {
      return Err(self.input.error("Unexpected }", token.start));
    };

    let source = Source {
      start: block.start,
      end: self.input.position(token.start),
    };
    let node = match block.kind {
      BlockKind::Rule { selector } => Node::Rule(Rule {
        selector,
        nodes: block.nodes,
        source,
      }),
      BlockKind::AtRule { name, params } => Node::AtRule(AtRule {
        name,
        params,
        nodes: Some(block.nodes),
        source,
      }),
    };
    self.current().push(node);
    Ok(())
  }

  fn at_rule(&mut self, token: Token<'a>) -> Result<(), CssSyntaxError> {
    let name = token.value.trim_start_matches('@').to_string();
    if name.is_empty() {
      return Err(self.input.error("At-rule without name", token.start));
    }

    let mut params: Vec<Token<'a>> = Vec::new();
    let mut brackets: Vec<TokenKind> = Vec::new();

    while let Some(next) = self.tokenizer.next_token()? {
      match next.kind {
        TokenKind::OpenParenthesis => brackets.push(TokenKind::CloseParenthesis),
        TokenKind::OpenSquare => brackets.push(TokenKind::CloseSquare),
        _ => {}
      }

      if let Some(expected) = brackets.last() {
        if next.kind == *expected {
          brackets.pop();
        }
        params.push(next);
        continue;
      }

      match next.kind {
        TokenKind::Semicolon => {
          return self.push_at_rule(name, &mut params, token.start, next.start);
        }
        TokenKind::OpenCurly => {
          trim_end(&mut params);
          self.open.push(OpenBlock {
            kind: BlockKind::AtRule {
              name,
              params: join(&params).trim().to_string(),
            },
            start: self.input.position(token.start),
            nodes: Vec::new(),
          });
          return Ok(());
        }
        TokenKind::CloseCurly => {
          self.tokenizer.back(next);
          break;
        }
        _ => params.push(next),
      }
    }

    trim_end(&mut params);
    let end = params.last().map_or(token.end, |last| last.end);
    self.push_at_rule(name, &mut params, token.start, end)
  }

  fn push_at_rule(
    &mut self,
    name: String,
    params: &mut Vec<Token<'a>>,
    start: usize,
    end: usize,
  ) -> Result<(), CssSyntaxError> {
    trim_end(params);
    let node = Node::AtRule(AtRule {
      name,
      params: join(params).trim().to_string(),
      nodes: None,
      source: self.source(start, end),
    });
    self.current().push(node);
    Ok(())
  }

  /// Everything that is not obviously a comment, at-rule or block boundary:
  /// collect tokens until the statement shows whether it is a rule or a
  /// declaration.
  fn other(&mut self, start: Token<'a>) -> Result<(), CssSyntaxError> {
    let custom_property = start.value.starts_with("--");
    let mut tokens = vec![start];
    let mut colon = false;
    let mut bracket: Option<Token<'a>> = None;
    let mut brackets: Vec<TokenKind> = Vec::new();

    while let Some(token) = self.tokenizer.next_token()? {
      tokens.push(token);

      match token.kind {
        TokenKind::OpenParenthesis => {
          bracket.get_or_insert(token);
          brackets.push(TokenKind::CloseParenthesis);
        }
        TokenKind::OpenSquare => {
          bracket.get_or_insert(token);
          brackets.push(TokenKind::CloseSquare);
        }
        TokenKind::OpenCurly if custom_property && colon => {
          bracket.get_or_insert(token);
          brackets.push(TokenKind::CloseCurly);
        }
        _ => {}
      }

      if let Some(expected) = brackets.last() {
        if token.kind == *expected {
          brackets.pop();
          if brackets.is_empty() {
            bracket = None;
          }
        }
        continue;
      }

      match token.kind {
        TokenKind::Semicolon => return self.declaration(tokens),
        TokenKind::OpenCurly => {
          tokens.pop();
          trim_end(&mut tokens);
          self.open_rule(join(&tokens), start.start);
          return Ok(());
        }
        TokenKind::CloseCurly => {
          tokens.pop();
          self.tokenizer.back(token);
          break;
        }
        TokenKind::Colon => colon = true,
        _ => {}
      }
    }

    if let Some(bracket) = bracket {
      return Err(self.input.error("Unclosed bracket", bracket.start));
    }

    if !colon {
      return Err(self.input.error("Unknown word", start.start));
    }

    // Trailing whitespace and comments belong to whatever follows
    while let Some(token) = tokens.pop() {
      if is_space_or_comment(&token) {
        self.tokenizer.back(token);
      } else {
        tokens.push(token);
        break;
      }
    }

    self.declaration(tokens)
  }

  fn declaration(&mut self, mut tokens: Vec<Token<'a>>) -> Result<(), CssSyntaxError> {
    let (Some(first), Some(last)) = (tokens.first().copied(), tokens.last().copied()) else {
      return Ok(());
    };

    if first.kind != TokenKind::Word {
      return Err(self.input.error("Unknown word", first.start));
    }

    // The final `;` is part of the declaration's range but not of its value
    let end = last.end;
    if last.kind == TokenKind::Semicolon {
      tokens.pop();
    }

    let mut rest = tokens.into_iter().peekable();

    let mut prop = String::new();
    while let Some(token) = rest.next_if(|token| {
      !matches!(
        token.kind,
        TokenKind::Colon | TokenKind::Space | TokenKind::Comment
      )
    }) {
      prop.push_str(token.value);
    }

    let mut found_colon = false;
    for token in rest.by_ref() {
      match token.kind {
        TokenKind::Colon => {
          found_colon = true;
          break;
        }
        TokenKind::Word if token.value.chars().any(char::is_alphanumeric) => {
          return Err(self.input.error("Unknown word", token.start));
        }
        _ => {}
      }
    }
    if !found_colon {
      return Err(self.input.error("Unknown word", first.start));
    }

    let mut value_tokens: Vec<Token<'a>> = rest.skip_while(is_space_or_comment).collect();
    while value_tokens
      .last()
      .is_some_and(|token| token.kind == TokenKind::Space)
    {
      value_tokens.pop();
    }

    if !prop.starts_with("--") {
      self.check_missed_semicolon(&value_tokens)?;
    }

    let mut value = join(&value_tokens);
    let mut important = false;
    if let Some(index) = value.to_ascii_lowercase().rfind("!important") {
      if value[index + "!important".len()..].trim().is_empty() {
        important = true;
        value.truncate(index);
        value.truncate(value.trim_end().len());
      }
    }

    let node = Node::Declaration(Declaration {
      prop,
      value,
      important,
      source: self.source(first.start, end),
    });
    self.current().push(node);
    Ok(())
  }
}

impl Parser<'_> {
  /// A colon at the top level of a value means two declarations ran together
  fn check_missed_semicolon(&self, tokens: &[Token<'_>]) -> Result<(), CssSyntaxError> {
    let mut depth = 0usize;
    let mut colon = None;
    for (index, token) in tokens.iter().enumerate() {
      match token.kind {
        TokenKind::OpenParenthesis => depth += 1,
        TokenKind::CloseParenthesis => depth = depth.saturating_sub(1),
        TokenKind::Colon if depth == 0 => {
          let after_progid = index > 0 && tokens[index - 1].value.eq_ignore_ascii_case("progid");
          if !after_progid {
            colon = Some(index);
            break;
          }
        }
        _ => {}
      }
    }

    let Some(colon) = colon else {
      return Ok(());
    };

    let mut before = tokens[..colon]
      .iter()
      .rev()
      .filter(|token| token.kind != TokenKind::Space);
    let Some(property) = before.next() else {
      return Err(self.input.error("Double colon", tokens[colon].start));
    };

    let target = before.next().unwrap_or(property);
    let offset = match target.kind {
      TokenKind::Word => target.end + 1,
      _ => target.start,
    };
    Err(self.input.error("Missed semicolon", offset))
  }
}

/// Parse stylesheet text into a tree of rules, declarations and comments.
pub fn parse(css: &str) -> Result<Root, CssSyntaxError> {
  let input = Input::new(css);
  Parser::new(&input).parse()
}

#[cfg(test)]
mod tests {
  use indoc::indoc;
  use pretty_assertions::assert_eq;

  use super::*;

  fn declaration(node: &Node) -> &Declaration {
    match node {
      Node::Declaration(declaration) => declaration,
      other => panic!("Expected a declaration, got {other:?}"),
    }
  }

  #[test]
  fn test_parse_root_declarations() {
    let root = parse("display: flex;\nwidth: 100% !important;\ncolor: red").unwrap();

    assert_eq!(root.nodes.len(), 3);

    let display = declaration(&root.nodes[0]);
    assert_eq!(display.prop, "display");
    assert_eq!(display.value, "flex");
    assert_eq!(display.source.start, Position::new(1, 1));
    assert_eq!(display.source.end, Position::new(1, 14));

    let width = declaration(&root.nodes[1]);
    assert_eq!(width.value, "100%");
    assert!(width.important);

    let color = declaration(&root.nodes[2]);
    assert_eq!(color.value, "red");
    assert_eq!(color.source.end, Position::new(3, 10));
  }

  #[test]
  fn test_parse_nested_rules_and_comments() {
    let css = indoc! {"
      /* heading */
      opacity: 1;
      &.inactive,
      &:focus {
        opacity: 0;
        .icon { fill: #fff; }
      }
    "};
    let root = parse(css).unwrap();

    assert!(matches!(&root.nodes[0], Node::Comment(comment) if comment.text == "heading"));
    assert_eq!(declaration(&root.nodes[1]).prop, "opacity");

    let Node::Rule(rule) = &root.nodes[2] else {
      panic!("Expected a rule");
    };
    assert_eq!(rule.selector, "&.inactive,\n&:focus");
    assert_eq!(rule.source.start, Position::new(3, 1));
    assert_eq!(rule.source.end, Position::new(7, 1));
    assert_eq!(rule.declarations().len(), 1);
    assert_eq!(rule.rules().len(), 1);
    assert_eq!(rule.rules()[0].declarations()[0].prop, "fill");
  }

  #[test]
  fn test_parse_at_rules() {
    let root = parse("@import 'a.css';\n@media (min-width: 10px) { top: 0; }").unwrap();

    let Node::AtRule(import) = &root.nodes[0] else {
      panic!("Expected an at-rule");
    };
    assert_eq!(import.name, "import");
    assert_eq!(import.params, "'a.css'");
    assert!(import.nodes.is_none());

    let Node::AtRule(media) = &root.nodes[1] else {
      panic!("Expected an at-rule");
    };
    assert_eq!(media.params, "(min-width: 10px)");
    assert_eq!(media.nodes.as_ref().map(Vec::len), Some(1));
  }

  #[test]
  fn test_parse_blank_value() {
    // Interpolated values are blanked out before parsing
    let root = parse("background-color:        ;").unwrap();

    let background = declaration(&root.nodes[0]);
    assert_eq!(background.prop, "background-color");
    assert_eq!(background.value, "");
  }

  #[test]
  fn test_positions_count_characters() {
    let root = parse("content: \"é\"; top: 0;").unwrap();

    let top = declaration(&root.nodes[1]);
    assert_eq!(top.source.start, Position::new(1, 15));
  }

  #[test]
  fn test_parse_errors() {
    assert_eq!(
      parse("a { color: red;").unwrap_err().reason,
      "Unclosed block"
    );
    assert_eq!(parse("color: red; }").unwrap_err().reason, "Unexpected }");
    assert_eq!(parse("color red;").unwrap_err().reason, "Unknown word");
    assert_eq!(parse("width: calc(1px;").unwrap_err().reason, "Unclosed bracket");

    let error = parse("height: 1px\n  width: 1px;").unwrap_err();
    assert_eq!(error.reason, "Missed semicolon");
    assert_eq!((error.line, error.column), (1, 12));
    assert_eq!(parse("color: : red;").unwrap_err().reason, "Double colon");
    assert!(parse("--grid: a:b; filter: progid:DXImage;").is_ok());

    let error = parse("top: 0;\n  : red;").unwrap_err();
    assert_eq!(error.reason, "Unknown word");
    assert_eq!((error.line, error.column), (2, 3));
  }
}
