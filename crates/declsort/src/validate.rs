use crate::groups::GroupTable;
use crate::sort::is_sorted;
use crate::stylesheet::Container;

/// Whether `container` and every rule nested in it hold their declarations
/// in canonical order.
///
/// A rule without declarations has nothing to compare. Comments and at-rules
/// are ignored.
pub fn is_valid_rule(container: &impl Container, table: &GroupTable) -> bool {
  let declarations = container.declarations();
  if !declarations.is_empty() && !is_sorted(&declarations, table) {
    return false;
  }

  container
    .rules()
    .into_iter()
    .all(|rule| is_valid_rule(rule, table))
}
