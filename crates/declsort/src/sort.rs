use crate::groups::GroupTable;
use crate::stylesheet::Declaration;

/// Orders the declarations of one rule by group, then by their place in the
/// group. The sort is stable: repeated properties and properties missing from
/// the table keep their relative order.
pub fn sort_declarations<'a>(
  declarations: &[&'a Declaration],
  table: &GroupTable,
) -> Vec<&'a Declaration> {
  let mut sorted = declarations.to_vec();
  sorted.sort_by_key(|declaration| table.priority(&declaration.prop));
  sorted
}

/// Whether `declarations` already sit in canonical order. Slots are compared
/// by source position, not by text.
pub fn is_sorted(declarations: &[&Declaration], table: &GroupTable) -> bool {
  sort_declarations(declarations, table)
    .iter()
    .zip(declarations)
    .all(|(sorted, original)| sorted.same_source(original))
}
