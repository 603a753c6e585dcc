//! Text edits against the analysed source, merged and applied the way a lint
//! host applies multi-part fixes.

use std::ops::Range;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Edit {
  /// Remove the text in `[start, end)`
  Remove { range: Range<usize> },
  /// Insert `text` immediately before `offset`
  Insert { offset: usize, text: String },
}

impl Edit {
  pub fn range(&self) -> Range<usize> {
    match self {
      Edit::Remove { range } => range.clone(),
      Edit::Insert { offset, .. } => *offset..*offset,
    }
  }

  fn text(&self) -> &str {
    match self {
      Edit::Remove { .. } => "",
      Edit::Insert { text, .. } => text,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
  #[error("Edits overlap at {start}..{end}")]
  Overlap { start: usize, end: usize },
  #[error("Edit {start}..{end} is outside the source")]
  OutOfBounds { start: usize, end: usize },
}

/// A single contiguous replacement: the merged form of one report's edits
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replacement {
  pub range: Range<usize>,
  pub text: String,
}

fn slice(source: &str, range: Range<usize>) -> Result<&str, EditError> {
  source.get(range.clone()).ok_or(EditError::OutOfBounds {
    start: range.start,
    end: range.end,
  })
}

/// Merges `edits` into one replacement spanning all of them. Edits are
/// ordered by position, an insert sorts before a removal starting at the same
/// offset. Overlapping edits are rejected.
pub fn merge_edits(source: &str, edits: &[Edit]) -> Result<Option<Replacement>, EditError> {
  let mut sorted: Vec<&Edit> = edits.iter().collect();
  sorted.sort_by_key(|edit| {
    let range = edit.range();
    (range.start, range.end)
  });

  let Some(first) = sorted.first() else {
    return Ok(None);
  };

  let start = first.range().start;
  let mut last = start;
  let mut text = String::new();

  for edit in sorted {
    let range = edit.range();
    if range.start < last || range.end < range.start {
      return Err(EditError::Overlap {
        start: range.start,
        end: range.end,
      });
    }

    text.push_str(slice(source, last..range.start)?);
    text.push_str(edit.text());
    last = range.end;
  }

  slice(source, start..last)?;
  Ok(Some(Replacement {
    range: start..last,
    text,
  }))
}

/// Applies the edits of one report
pub fn apply_edits(source: &str, edits: &[Edit]) -> Result<String, EditError> {
  let Some(replacement) = merge_edits(source, edits)? else {
    return Ok(source.to_string());
  };

  let mut output = String::with_capacity(source.len() + replacement.text.len());
  output.push_str(&source[..replacement.range.start]);
  output.push_str(&replacement.text);
  output.push_str(&source[replacement.range.end..]);
  Ok(output)
}

/// Result of applying the replacements of several reports at once
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Applied {
  pub output: String,
  /// Indexes into the input of the replacements that were applied
  pub applied: Vec<usize>,
}

/// Applies replacements left to right. A replacement touching or overlapping
/// one already applied is skipped and left for a later pass.
pub fn apply_replacements(source: &str, replacements: &[Replacement]) -> Applied {
  let mut order: Vec<usize> = (0..replacements.len()).collect();
  order.sort_by_key(|&index| replacements[index].range.start);

  let mut output = String::with_capacity(source.len());
  let mut applied = vec![];
  let mut last: Option<usize> = None;

  for index in order {
    let Replacement { range, text } = &replacements[index];
    if last.is_some_and(|last| last >= range.start) || source.get(range.clone()).is_none() {
      continue;
    }

    output.push_str(&source[last.unwrap_or(0)..range.start]);
    output.push_str(text);
    last = Some(range.end);
    applied.push(index);
  }

  output.push_str(&source[last.unwrap_or(0)..]);
  applied.sort_unstable();
  Applied { output, applied }
}
