//! Rebuilds the stylesheet text of a template literal so that every character
//! of the literal sits at the same line and column it has in the analysed
//! file. Interpolations are blanked out with whitespace.

use swc_core::common::{BytePos, SourceMap, Span};
use swc_core::ecma::ast::Tpl;

/// 1-based line, 0-based character column
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineColumn {
  pub line: u32,
  pub column: u32,
}

impl LineColumn {
  pub fn new(line: u32, column: u32) -> Self {
    Self { line, column }
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SourceLocation {
  pub start: LineColumn,
  pub end: LineColumn,
}

/// One literal chunk of a template.
///
/// `loc` includes the delimiters around the raw text: `start` is the opening
/// backtick or the `}` closing the previous interpolation, `end` is just past
/// the `${` or the closing backtick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateSegment {
  pub raw: String,
  pub loc: SourceLocation,
}

/// A template literal recognised as a style block
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleNode {
  pub loc: SourceLocation,
  pub segments: Vec<TemplateSegment>,
}

/// Width of `${` between a segment and the following interpolation
const INTERPOLATION_OPEN_WIDTH: u32 = 2;

/// swc's `Loc::col` counts UTF-16 units, columns here count chars like the
/// stylesheet parser does, so the column is recounted from the line start.
fn line_column(source_map: &SourceMap, pos: BytePos) -> LineColumn {
  let line = source_map.lookup_char_pos(pos).line as u32;

  let file = source_map.lookup_byte_offset(pos);
  let src: &str = &file.sf.src;
  let before = src.get(..file.pos.0 as usize).unwrap_or(src);
  let line_start = before.rfind('\n').map_or(0, |index| index + 1);
  let column = before[line_start..].chars().count() as u32;

  LineColumn::new(line, column)
}

fn location(source_map: &SourceMap, span: Span) -> SourceLocation {
  SourceLocation {
    start: line_column(source_map, span.lo),
    end: line_column(source_map, span.hi),
  }
}

impl StyleNode {
  /// Build from a parsed template literal. swc spans quasis over the raw
  /// text only, so each span is widened by its delimiters.
  pub fn from_tpl(tpl: &Tpl, source_map: &SourceMap) -> Self {
    let segments = tpl
      .quasis
      .iter()
      .map(|quasi| {
        let raw = location(source_map, quasi.span);
        let closing = if quasi.tail {
          1
        } else {
          INTERPOLATION_OPEN_WIDTH
        };

        TemplateSegment {
          raw: quasi.raw.to_string(),
          loc: SourceLocation {
            start: LineColumn::new(raw.start.line, raw.start.column.saturating_sub(1)),
            end: LineColumn::new(raw.end.line, raw.end.column + closing),
          },
        }
      })
      .collect();

    StyleNode {
      loc: location(source_map, tpl.span),
      segments,
    }
  }
}

/// The stylesheet text of `node`, padded so positions reported by the
/// stylesheet parser match positions in the analysed file.
pub fn extract_styles(node: &StyleNode) -> String {
  let Some((first, rest)) = node.segments.split_first() else {
    return String::new();
  };

  let mut styles = String::new();
  push_repeated(
    &mut styles,
    '\n',
    first.loc.start.line.saturating_sub(1),
  );
  push_repeated(&mut styles, ' ', first.loc.start.column + 1);
  styles.push_str(&first.raw);

  let mut previous = first;
  for segment in rest {
    let previous_end = previous.loc.end;
    let start = segment.loc.start;

    let line_breaks = start.line.saturating_sub(previous_end.line);
    let spaces = if line_breaks == 0 {
      (start.column + INTERPOLATION_OPEN_WIDTH).saturating_sub(previous_end.column)
    } else {
      start.column + 1
    };

    styles.push(' ');
    push_repeated(&mut styles, '\n', line_breaks);
    push_repeated(&mut styles, ' ', spaces);
    styles.push_str(&segment.raw);

    previous = segment;
  }

  styles
}

fn push_repeated(target: &mut String, ch: char, count: u32) {
  target.extend(std::iter::repeat(ch).take(count as usize));
}
