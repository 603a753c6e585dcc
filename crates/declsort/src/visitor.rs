use swc_core::common::sync::Lrc;
use swc_core::common::SourceMap;
use swc_core::ecma::ast::TaggedTpl;
use swc_core::ecma::visit::{Visit, VisitWith};

use crate::classify::{is_style_block, StyleTags};
use crate::extract::StyleNode;

/// Collects every tagged template recognised as a style block, in source
/// order. Style blocks nested in interpolations of other blocks are
/// collected too.
pub struct StyleNodeCollector<'a> {
  source_map: Lrc<SourceMap>,
  tags: &'a StyleTags,
  pub nodes: Vec<StyleNode>,
}

impl<'a> StyleNodeCollector<'a> {
  pub fn new(source_map: Lrc<SourceMap>, tags: &'a StyleTags) -> Self {
    Self {
      source_map,
      tags,
      nodes: Vec::new(),
    }
  }
}

impl Visit for StyleNodeCollector<'_> {
  fn visit_tagged_tpl(&mut self, node: &TaggedTpl) {
    if is_style_block(node, self.tags) {
      self
        .nodes
        .push(StyleNode::from_tpl(&node.tpl, &self.source_map));
    }

    node.visit_children_with(self);
  }
}

#[cfg(test)]
mod tests {
  use declsort_swc_runner::test_utils::run_test_visit_const;
  use indoc::indoc;
  use pretty_assertions::assert_eq;

  use super::*;

  fn collect(code: &str) -> Vec<StyleNode> {
    let tags = StyleTags::default();
    run_test_visit_const(code, |context| {
      StyleNodeCollector::new(context.source_map, &tags)
    })
    .visitor
    .nodes
  }

  #[test]
  fn test_collects_style_blocks_only() {
    let nodes = collect(indoc! {"
      const a = css`color: red;`;
      const b = html`<p></p>`;
      const c = styled.div`
        width: 1px;
      `;
    "});

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].segments[0].raw, "color: red;");
    assert_eq!(nodes[1].loc.start.line, 3);
  }

  #[test]
  fn test_collects_nested_blocks() {
    let nodes = collect(indoc! {"
      const a = styled.div`
        ${(props) => props.active && css`opacity: 1;`}
      `;
    "});

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[1].segments[0].raw, "opacity: 1;");
  }

  #[test]
  fn test_collects_inside_functions() {
    let nodes = collect(indoc! {"
      export function makeStyles() {
        return [css`top: 0;`, styled(Button)`left: 0;`];
      }
    "});

    assert_eq!(nodes.len(), 2);
  }
}
