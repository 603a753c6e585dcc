use crate::edit::Edit;
use crate::extract::{extract_styles, SourceLocation, StyleNode};
use crate::fix::fix_rule;
use crate::groups::GroupTable;
use crate::range::LocationError;
use crate::source_index::SourceIndex;
use crate::stylesheet::{parse, Root};
use crate::validate::is_valid_rule;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleMeta {
  pub name: &'static str,
  pub description: &'static str,
  pub category: &'static str,
  pub recommended: bool,
  pub fixable: bool,
  pub rule_type: &'static str,
  pub message: &'static str,
}

pub const RULE_NAME: &str = "sort-declarations-in-groups";

pub static META: RuleMeta = RuleMeta {
  name: RULE_NAME,
  description: "Styles are sorted in groups",
  category: "Sorting",
  recommended: false,
  fixable: true,
  rule_type: "problem",
  message: "Declarations should be sorted in groups",
};

/// A style block with at least one rule out of canonical order
#[derive(Debug)]
pub struct Violation<'a> {
  /// Location of the template literal
  pub loc: SourceLocation,
  root: Root,
  table: &'a GroupTable,
}

impl Violation<'_> {
  pub fn message_id(&self) -> &'static str {
    META.name
  }

  pub fn message(&self) -> &'static str {
    META.message
  }

  /// Edits reordering every out of order rule in the block
  pub fn fix(&self, index: &dyn SourceIndex) -> Result<Vec<Edit>, LocationError> {
    fix_rule(&self.root, self.table, index)
  }
}

/// Checks one style block.
///
/// A stylesheet that fails to parse is logged and skipped, it never reports.
pub fn check_style_node<'a>(node: &StyleNode, table: &'a GroupTable) -> Option<Violation<'a>> {
  let styles = extract_styles(node);

  let root = match parse(&styles) {
    Ok(root) => root,
    Err(error) => {
      tracing::warn!(
        "Skipping style block at {}:{}, {}",
        node.loc.start.line,
        node.loc.start.column,
        error
      );
      return None;
    }
  };

  let valid = is_valid_rule(&root, table);
  tracing::debug!(
    "Checked style block at {}:{}, valid: {}",
    node.loc.start.line,
    node.loc.start.column,
    valid
  );

  if valid {
    return None;
  }

  Some(Violation {
    loc: node.loc,
    root,
    table,
  })
}
