use super::{CssSyntaxError, Input};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
  Space,
  OpenSquare,
  CloseSquare,
  OpenCurly,
  CloseCurly,
  Colon,
  Semicolon,
  OpenParenthesis,
  CloseParenthesis,
  Word,
  AtWord,
  String,
  Comment,
  Brackets,
}

/// A token borrowed from the stylesheet text. `start` and `end` are byte
/// offsets, `end` is inclusive of the token's last byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
  pub kind: TokenKind,
  pub value: &'a str,
  pub start: usize,
  pub end: usize,
}

const SINGLE_QUOTE: u8 = b'\'';
const DOUBLE_QUOTE: u8 = b'"';
const BACKSLASH: u8 = b'\\';
const SLASH: u8 = b'/';
const ASTERISK: u8 = b'*';

fn is_space(code: u8) -> bool {
  matches!(code, b' ' | b'\n' | b'\t' | b'\r' | 0x0c)
}

fn is_at_end_stop(code: u8) -> bool {
  matches!(
    code,
    b'\t'
      | b'\n'
      | b'\r'
      | b' '
      | b'"'
      | b'#'
      | b'\''
      | b'('
      | b')'
      | b'/'
      | b';'
      | 0x0c
      | b'['
      | b'\\'
      | b']'
      | b'{'
      | b'}'
  )
}

fn is_word_end_stop(code: u8) -> bool {
  matches!(
    code,
    b'\t'
      | b'\n'
      | b'\r'
      | b' '
      | b'!'
      | b'"'
      | b'#'
      | b'\''
      | b'('
      | b')'
      | b':'
      | b';'
      | 0x0c
      | b'@'
      | b'['
      | b'\\'
      | b']'
      | b'{'
      | b'}'
  )
}

fn is_bad_bracket_char(code: u8) -> bool {
  matches!(code, b'\r' | b'\n' | b'"' | b'\'' | b'(' | b'/' | b'\\')
}

pub struct Tokenizer<'a> {
  input: &'a Input<'a>,
  css: &'a str,
  bytes: &'a [u8],
  pos: usize,
  returned: Vec<Token<'a>>,
  last_word: Option<&'a str>,
}

impl<'a> Tokenizer<'a> {
  pub fn new(input: &'a Input<'a>) -> Self {
    Self {
      input,
      css: input.css(),
      bytes: input.css().as_bytes(),
      pos: 0,
      returned: Vec::new(),
      last_word: None,
    }
  }

  pub fn back(&mut self, token: Token<'a>) {
    self.returned.push(token);
  }

  fn token(&self, kind: TokenKind, start: usize, end: usize) -> Token<'a> {
    Token {
      kind,
      value: &self.css[start..=end],
      start,
      end,
    }
  }

  /// Offset of the first unescaped `needle` after `from`
  fn find_unescaped(&self, from: usize, needle: u8) -> Option<usize> {
    let mut next = from;
    loop {
      let index = self.bytes[next + 1..].iter().position(|&b| b == needle)?;
      next += index + 1;

      let mut escaped = false;
      let mut escape_pos = next;
      while escape_pos > 0 && self.bytes[escape_pos - 1] == BACKSLASH {
        escape_pos -= 1;
        escaped = !escaped;
      }
      if !escaped {
        return Some(next);
      }
    }
  }

  pub fn next_token(&mut self) -> Result<Option<Token<'a>>, CssSyntaxError> {
    if let Some(token) = self.returned.pop() {
      return Ok(Some(token));
    }
    if self.pos >= self.bytes.len() {
      return Ok(None);
    }

    let start = self.pos;
    let code = self.bytes[start];

    let token = match code {
      b' ' | b'\n' | b'\t' | b'\r' | 0x0c => {
        let mut next = start;
        while next + 1 < self.bytes.len() && is_space(self.bytes[next + 1]) {
          next += 1;
        }
        self.token(TokenKind::Space, start, next)
      }
      b'[' => self.token(TokenKind::OpenSquare, start, start),
      b']' => self.token(TokenKind::CloseSquare, start, start),
      b'{' => self.token(TokenKind::OpenCurly, start, start),
      b'}' => self.token(TokenKind::CloseCurly, start, start),
      b':' => self.token(TokenKind::Colon, start, start),
      b';' => self.token(TokenKind::Semicolon, start, start),
      b')' => self.token(TokenKind::CloseParenthesis, start, start),
      b'(' => self.parenthesis(start)?,
      SINGLE_QUOTE | DOUBLE_QUOTE => {
        let Some(end) = self.find_unescaped(start, code) else {
          return Err(self.input.error("Unclosed string", start));
        };
        self.token(TokenKind::String, start, end)
      }
      b'@' => {
        let mut next = start + 1;
        while next < self.bytes.len() && !is_at_end_stop(self.bytes[next]) {
          next += 1;
        }
        self.token(TokenKind::AtWord, start, next - 1)
      }
      BACKSLASH => self.escape(start),
      SLASH if self.bytes.get(start + 1) == Some(&ASTERISK) => {
        let Some(index) = self.css[start + 2..].find("*/") else {
          return Err(self.input.error("Unclosed comment", start));
        };
        self.token(TokenKind::Comment, start, start + 2 + index + 1)
      }
      _ => {
        let mut next = start + 1;
        while next < self.bytes.len() {
          let code = self.bytes[next];
          if is_word_end_stop(code)
            || (code == SLASH && self.bytes.get(next + 1) == Some(&ASTERISK))
          {
            break;
          }
          next += 1;
        }
        let token = self.token(TokenKind::Word, start, next - 1);
        self.last_word = Some(token.value);
        token
      }
    };

    self.pos = token.end + 1;
    Ok(Some(token))
  }

  fn parenthesis(&self, start: usize) -> Result<Token<'a>, CssSyntaxError> {
    let next_code = self.bytes.get(start + 1).copied().unwrap_or(0);

    if self.last_word == Some("url")
      && next_code != SINGLE_QUOTE
      && next_code != DOUBLE_QUOTE
      && !is_space(next_code)
    {
      let Some(end) = self.find_unescaped(start, b')') else {
        return Err(self.input.error("Unclosed bracket", start));
      };
      return Ok(self.token(TokenKind::Brackets, start, end));
    }

    match self.css[start + 1..].find(')') {
      Some(index)
        if !self.bytes[start + 1..start + 1 + index]
          .iter()
          .any(|&b| is_bad_bracket_char(b)) =>
      {
        Ok(self.token(TokenKind::Brackets, start, start + 1 + index))
      }
      _ => Ok(self.token(TokenKind::OpenParenthesis, start, start)),
    }
  }

  fn escape(&self, start: usize) -> Token<'a> {
    let mut next = start;
    let mut escape = true;
    while next + 1 < self.bytes.len() && self.bytes[next + 1] == BACKSLASH {
      next += 1;
      escape = !escape;
    }

    if let Some(&code) = self.bytes.get(next + 1) {
      if escape && !is_space(code) && code != SLASH {
        next += 1;
        if let Some(ch) = self.css[next..].chars().next() {
          next += ch.len_utf8() - 1;
          if ch.is_ascii_hexdigit() {
            while self
              .bytes
              .get(next + 1)
              .is_some_and(|b| b.is_ascii_hexdigit())
            {
              next += 1;
            }
            if self.bytes.get(next + 1) == Some(&b' ') {
              next += 1;
            }
          }
        }
      }
    }

    self.token(TokenKind::Word, start, next)
  }
}
