use declsort_swc_runner::{run_visit_const, RunError, RunVisitResult};
use swc_core::ecma::parser::Syntax;

use crate::config::Config;
use crate::edit::{apply_replacements, merge_edits, Edit, Replacement};
use crate::extract::SourceLocation;
use crate::rule::{check_style_node, Violation};
use crate::source_index::SourceText;
use crate::visitor::StyleNodeCollector;

/// Fixing stops after this many passes even if fixable reports remain
pub const MAX_FIX_PASSES: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum LintError {
  #[error(transparent)]
  Parse(#[from] RunError),
}

/// A violation found in a source file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
  pub rule: &'static str,
  pub message: &'static str,
  /// Location of the offending template literal
  pub loc: SourceLocation,
  /// `None` when the declarations could not be located in the source
  pub fix: Option<Vec<Edit>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixOutput {
  pub output: String,
  /// Number of passes that changed the source
  pub passes: usize,
  /// Reports left after fixing
  pub reports: Vec<Report>,
}

impl FixOutput {
  pub fn fixed(&self) -> bool {
    self.passes > 0
  }
}

fn report(violation: &Violation<'_>, source: &SourceText<'_>) -> Report {
  let fix = match violation.fix(source) {
    Ok(edits) => Some(edits),
    Err(error) => {
      tracing::error!(
        "Style block at {}:{} cannot be fixed: {}",
        violation.loc.start.line,
        violation.loc.start.column,
        error
      );
      if cfg!(test) {
        panic!("Stylesheet positions do not match the source: {error}");
      }
      None
    }
  };

  Report {
    rule: violation.message_id(),
    message: violation.message(),
    loc: violation.loc,
    fix,
  }
}

/// Check every style block in `code`
pub fn lint_source(code: &str, syntax: Syntax, config: &Config) -> Result<Vec<Report>, LintError> {
  let RunVisitResult { visitor } = run_visit_const(code, syntax, |context| {
    StyleNodeCollector::new(context.source_map, &config.tags)
  })?;

  let source = SourceText::new(code);
  let reports = visitor
    .nodes
    .iter()
    .filter_map(|node| check_style_node(node, &config.groups))
    .map(|violation| report(&violation, &source))
    .collect();

  Ok(reports)
}

/// Lint `code` and apply fixes until no fixable report is left.
///
/// Every pass applies the fixes of all reports that do not overlap each other
/// and lints the result again.
pub fn fix_source(code: &str, syntax: Syntax, config: &Config) -> Result<FixOutput, LintError> {
  let mut output = code.to_string();
  let mut passes = 0;

  loop {
    let reports = lint_source(&output, syntax, config)?;
    if passes == MAX_FIX_PASSES {
      tracing::warn!("Stopped fixing after {} passes", passes);
      return Ok(FixOutput {
        output,
        passes,
        reports,
      });
    }

    let replacements: Vec<Replacement> = reports
      .iter()
      .filter_map(|report| report.fix.as_deref())
      .filter_map(|edits| match merge_edits(&output, edits) {
        Ok(replacement) => replacement,
        Err(error) => {
          tracing::error!("Discarding fix: {}", error);
          None
        }
      })
      .collect();

    let applied = apply_replacements(&output, &replacements);
    if applied.applied.is_empty() {
      return Ok(FixOutput {
        output,
        passes,
        reports,
      });
    }

    tracing::debug!(
      "Fix pass {} applied {} of {} fixes",
      passes + 1,
      applied.applied.len(),
      replacements.len()
    );
    output = applied.output;
    passes += 1;
  }
}

#[cfg(test)]
mod tests {
  use declsort_swc_runner::test_utils::test_syntax;
  use indoc::indoc;
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::extract::{LineColumn, StyleNode, TemplateSegment};
  use crate::groups::GroupTable;

  #[test]
  fn test_lint_reports_each_block() {
    let code = indoc! {"
      const a = css`height: 1px; width: 1px;`;
      const b = css`width: 1px; height: 1px;`;
      const c = styled.div`color: red; display: block;`;
    "};

    let reports = lint_source(code, test_syntax(), &Config::default()).unwrap();

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].rule, "sort-declarations-in-groups");
    assert_eq!(reports[0].message, "Declarations should be sorted in groups");
    assert_eq!(reports[0].loc.start, LineColumn::new(1, 13));
    assert_eq!(reports[1].loc.start, LineColumn::new(3, 20));
    assert!(reports.iter().all(|report| report.fix.is_some()));
  }

  #[test]
  fn test_fix_all_blocks_in_one_pass() {
    let code = indoc! {"
      const a = css`height: 1px; width: 1px;`;
      const c = styled.div`color: red; display: block;`;
    "};

    let result = fix_source(code, test_syntax(), &Config::default()).unwrap();

    assert_eq!(
      result.output,
      indoc! {"
        const a = css`width: 1px; height: 1px;`;
        const c = styled.div`display: block; color: red;`;
      "}
    );
    assert_eq!(result.passes, 1);
    assert_eq!(result.reports, vec![]);
    assert!(result.fixed());
  }

  #[test]
  fn test_fix_nested_blocks_over_passes() {
    let code = indoc! {"
      const a = styled.div`
        color: red;
        display: block;
        ${(props) => props.active && css`opacity: 1; position: relative;`}
      `;
    "};

    let result = fix_source(code, test_syntax(), &Config::default()).unwrap();

    assert_eq!(
      result.output,
      indoc! {"
        const a = styled.div`
          display: block;
          color: red;
          ${(props) => props.active && css`position: relative; opacity: 1;`}
        `;
      "}
    );
    assert_eq!(result.reports, vec![]);
  }

  #[test]
  fn test_clean_source_is_untouched() {
    let code = "const a = css`position: absolute; top: 0;`;";

    let result = fix_source(code, test_syntax(), &Config::default()).unwrap();

    assert_eq!(result.output, code);
    assert!(!result.fixed());
  }

  #[test]
  #[should_panic(expected = "Stylesheet positions do not match the source")]
  fn test_unlocatable_fix_fails_loudly_in_tests() {
    let loc = SourceLocation {
      start: LineColumn::new(3, 0),
      end: LineColumn::new(3, 26),
    };
    let node = StyleNode {
      loc,
      segments: vec![TemplateSegment {
        raw: "height: 1px; width: 1px;".to_string(),
        loc,
      }],
    };
    let violation = check_style_node(&node, GroupTable::builtin()).unwrap();

    report(&violation, &SourceText::new("const a = 1;"));
  }

  #[test]
  fn test_module_parse_error() {
    let result = lint_source("const a = css`", test_syntax(), &Config::default());

    assert!(matches!(result, Err(LintError::Parse(_))));
  }
}
