use crate::edit::Edit;
use crate::groups::GroupTable;
use crate::range::{declaration_text, resolve_declaration_range, LocationError};
use crate::sort::sort_declarations;
use crate::source_index::SourceIndex;
use crate::stylesheet::Container;

/// Edits that put the declarations of `container` and all nested rules into
/// canonical order.
///
/// Every slot holding the wrong declaration gets its text removed and the
/// text of the declaration that belongs there inserted at the same offset.
/// Comments, nested rules and whitespace between declarations stay where
/// they are.
pub fn fix_rule(
  container: &impl Container,
  table: &GroupTable,
  index: &dyn SourceIndex,
) -> Result<Vec<Edit>, LocationError> {
  let declarations = container.declarations();
  let sorted = sort_declarations(&declarations, table);

  let mut edits = Vec::new();
  for (original, target) in declarations.iter().zip(&sorted) {
    if original.same_source(target) {
      continue;
    }

    let range = resolve_declaration_range(original, index)?;
    let text = declaration_text(target, index)?;

    edits.push(Edit::Remove {
      range: range.clone(),
    });
    edits.push(Edit::Insert {
      offset: range.start,
      text: text.to_string(),
    });
  }

  for rule in container.rules() {
    edits.extend(fix_rule(rule, table, index)?);
  }

  Ok(edits)
}
