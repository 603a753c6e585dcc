use serde::{Deserialize, Serialize};
use swc_core::ecma::ast::{Callee, Expr, Ident, MemberExpr, TaggedTpl};

/// Identifiers that mark a tagged template as a style block
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleTags {
  /// Plain tags, as in css`...`
  pub css: Vec<String>,
  /// Namespaces used as `styled.div`, `styled(Component)` and their
  /// chained forms
  pub styled: Vec<String>,
}

impl Default for StyleTags {
  fn default() -> Self {
    Self {
      css: vec!["css".into()],
      styled: vec!["styled".into()],
    }
  }
}

fn name_matches(list: &[String], name: &str) -> bool {
  list.iter().any(|item| item == name)
}

fn is_identifier_expr(expr: &Expr) -> Option<&Ident> {
  match expr {
    Expr::Ident(ident) => Some(ident),
    _ => None,
  }
}

fn is_identifier_callee(callee: &Callee) -> Option<&Ident> {
  match callee {
    Callee::Expr(expr) => is_identifier_expr(expr),
    Callee::Super(_) | Callee::Import(_) => None,
  }
}

fn is_member_callee(callee: &Callee) -> Option<&MemberExpr> {
  match callee {
    Callee::Expr(expr) => match &**expr {
      Expr::Member(member) => Some(member),
      _ => None,
    },
    Callee::Super(_) | Callee::Import(_) => None,
  }
}

fn is_styled_identifier(expr: &Expr, tags: &StyleTags) -> bool {
  is_identifier_expr(expr).is_some_and(|ident| name_matches(&tags.styled, ident.sym.as_ref()))
}

/// `styled(...)`
fn is_styled_call(expr: &Expr, tags: &StyleTags) -> bool {
  let Expr::Call(call) = expr else {
    return false;
  };

  is_identifier_callee(&call.callee)
    .is_some_and(|ident| name_matches(&tags.styled, ident.sym.as_ref()))
}

/// `styled.div`
fn is_styled_member(expr: &Expr, tags: &StyleTags) -> bool {
  let Expr::Member(member) = expr else {
    return false;
  };

  is_styled_identifier(&member.obj, tags)
}

/// `styled(...).attrs(...)` or `styled.div.attrs(...)`
fn is_styled_chained_call(expr: &Expr, tags: &StyleTags) -> bool {
  let Expr::Call(call) = expr else {
    return false;
  };

  let Some(member) = is_member_callee(&call.callee) else {
    return false;
  };

  is_styled_call(&member.obj, tags) || is_styled_member(&member.obj, tags)
}

/// Returns `true` when the tag of `node` marks its template as a style block.
///
/// Type arguments (`styled.div<Props>`) live on the tagged template itself,
/// so they do not change the shape of the tag.
pub fn is_style_block(node: &TaggedTpl, tags: &StyleTags) -> bool {
  let tag = node.tag.as_ref();

  if let Some(ident) = is_identifier_expr(tag) {
    return name_matches(&tags.css, ident.sym.as_ref());
  }

  is_styled_member(tag, tags) || is_styled_call(tag, tags) || is_styled_chained_call(tag, tags)
}

#[cfg(test)]
mod tests {
  use declsort_swc_runner::test_utils::run_test_visit_const;
  use swc_core::ecma::visit::{Visit, VisitWith};

  use super::*;

  struct Classify {
    tags: StyleTags,
    results: Vec<bool>,
  }

  impl Visit for Classify {
    fn visit_tagged_tpl(&mut self, node: &TaggedTpl) {
      self.results.push(is_style_block(node, &self.tags));
      node.visit_children_with(self);
    }
  }

  fn classify_with(code: &str, tags: StyleTags) -> Vec<bool> {
    run_test_visit_const(code, |_| Classify {
      tags,
      results: vec![],
    })
    .visitor
    .results
  }

  fn classify(code: &str) -> bool {
    let results = classify_with(code, StyleTags::default());
    assert_eq!(results.len(), 1, "expected one tagged template in {code}");
    results[0]
  }

  #[test]
  fn test_accepts_css_identifier() {
    assert!(classify("css`color: red;`"));
    assert!(classify("css<Props>`color: red;`"));
  }

  #[test]
  fn test_accepts_styled_member() {
    assert!(classify("styled.div`color: red;`"));
    assert!(classify("styled.div<Props>`color: red;`"));
  }

  #[test]
  fn test_accepts_styled_call() {
    assert!(classify("styled('div')`color: red;`"));
    assert!(classify("styled(CloseIcon)`color: red;`"));
  }

  #[test]
  fn test_accepts_chained_calls() {
    assert!(classify("styled('div').attrs({ role: 'list' })`color: red;`"));
    assert!(classify("styled.input.attrs({ type: 'text' })`color: red;`"));
  }

  #[test]
  fn test_rejects_other_tags() {
    assert!(!classify("html`<div></div>`"));
    assert!(!classify("theme.css`color: red;`"));
    assert!(!classify("styled.div.extend`color: red;`"));
    assert!(!classify("styled.div('x')`color: red;`"));
    assert!(!classify("makeStyled(Button)`color: red;`"));
    assert!(!classify("a.styled.div`color: red;`"));
  }

  #[test]
  fn test_custom_tags() {
    let tags = StyleTags {
      css: vec!["style".into()],
      styled: vec!["glamorous".into()],
    };

    assert_eq!(
      classify_with(
        "style`a: b;`; glamorous.div`a: b;`; css`a: b;`; styled.div`a: b;`",
        tags
      ),
      vec![true, true, false, false]
    );
  }
}
