use std::ops::Range;

/// Maps line/column locations of the analysed file to byte offsets.
///
/// Lines are 1-based, columns are 0-based and count characters.
pub trait SourceIndex {
  fn offset_of(&self, line: u32, column: u32) -> Option<usize>;

  fn text(&self, range: Range<usize>) -> Option<&str>;
}

/// [`SourceIndex`] over an in-memory source string
pub struct SourceText<'a> {
  text: &'a str,
  line_starts: Vec<usize>,
}

impl<'a> SourceText<'a> {
  pub fn new(text: &'a str) -> Self {
    let line_starts = std::iter::once(0)
      .chain(text.match_indices('\n').map(|(index, _)| index + 1))
      .collect();
    Self { text, line_starts }
  }

  pub fn as_str(&self) -> &'a str {
    self.text
  }
}

impl SourceIndex for SourceText<'_> {
  fn offset_of(&self, line: u32, column: u32) -> Option<usize> {
    let line_index = (line as usize).checked_sub(1)?;
    let line_start = *self.line_starts.get(line_index)?;
    let line_end = self
      .line_starts
      .get(line_index + 1)
      .copied()
      .unwrap_or(self.text.len());
    let line_text = &self.text[line_start..line_end];

    let column = column as usize;
    match line_text.char_indices().nth(column) {
      Some((index, _)) => Some(line_start + index),
      // One past the last character of the final line
      None if column == line_text.chars().count() => Some(line_end),
      None => None,
    }
  }

  fn text(&self, range: Range<usize>) -> Option<&str> {
    self.text.get(range)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_offset_of() {
    let source = SourceText::new("ab\ncdé\nf");

    assert_eq!(source.offset_of(1, 0), Some(0));
    assert_eq!(source.offset_of(1, 2), Some(2));
    assert_eq!(source.offset_of(2, 0), Some(3));
    assert_eq!(source.offset_of(2, 2), Some(5));
    assert_eq!(source.offset_of(3, 0), Some(8));
    assert_eq!(source.offset_of(3, 1), Some(9));
  }

  #[test]
  fn test_offset_out_of_range() {
    let source = SourceText::new("ab\ncd");

    assert_eq!(source.offset_of(0, 0), None);
    assert_eq!(source.offset_of(3, 0), None);
    assert_eq!(source.offset_of(1, 7), None);
  }

  #[test]
  fn test_text() {
    let source = SourceText::new("width: 1px;");

    assert_eq!(source.text(0..5), Some("width"));
    assert_eq!(source.text(5..20), None);
  }
}
