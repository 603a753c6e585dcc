use std::ops::Range;

use crate::source_index::SourceIndex;
use crate::stylesheet::{Declaration, Position, Source};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
  #[error("Declaration `{prop}` points at {line}:{column}, which is outside the source")]
  OutOfSource {
    prop: String,
    line: u32,
    column: u32,
  },
  #[error("Declaration `{prop}` ends before it starts")]
  Inverted { prop: String },
}

fn offset(
  declaration: &Declaration,
  index: &dyn SourceIndex,
  position: Position,
  column: u32,
) -> Result<usize, LocationError> {
  index
    .offset_of(position.line, column)
    .ok_or_else(|| LocationError::OutOfSource {
      prop: declaration.prop.clone(),
      line: position.line,
      column: position.column,
    })
}

/// Byte range of `declaration` in the analysed source.
///
/// Stylesheet columns are 1-based and the end points at the final character,
/// so the start moves back one column and the exclusive end is the offset of
/// the character after the final one.
pub fn resolve_declaration_range(
  declaration: &Declaration,
  index: &dyn SourceIndex,
) -> Result<Range<usize>, LocationError> {
  let Source { start, end } = declaration.source;

  let start_offset = offset(
    declaration,
    index,
    start,
    start.column.saturating_sub(1),
  )?;
  let end_offset = offset(declaration, index, end, end.column)?;

  if end_offset <= start_offset {
    return Err(LocationError::Inverted {
      prop: declaration.prop.clone(),
    });
  }

  Ok(start_offset..end_offset)
}

/// The verbatim source text of `declaration`
pub fn declaration_text<'a>(
  declaration: &Declaration,
  index: &'a dyn SourceIndex,
) -> Result<&'a str, LocationError> {
  let range = resolve_declaration_range(declaration, index)?;
  let start = declaration.source.start;

  index
    .text(range)
    .ok_or_else(|| LocationError::OutOfSource {
      prop: declaration.prop.clone(),
      line: start.line,
      column: start.column,
    })
}
