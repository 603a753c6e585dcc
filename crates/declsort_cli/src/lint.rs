use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use declsort::{fix_source, lint_source, Config, Report};
use declsort_swc_runner::syntax_for_path;
use rayon::prelude::*;

#[derive(Debug)]
pub struct FileResult {
  pub path: PathBuf,
  /// Reports left in the file, after fixing when fixing was requested
  pub reports: Vec<Report>,
  pub fixed: bool,
}

/// Lint one file, writing it back when `fix` is set and fixes changed it
pub fn lint_file(path: &Path, config: &Config, fix: bool) -> anyhow::Result<FileResult> {
  let span = tracing::debug_span!("lint_file", path = %path.display());
  let _guard = span.enter();

  let code =
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  let syntax = syntax_for_path(path);

  if !fix {
    let reports = lint_source(&code, syntax, config)
      .with_context(|| format!("Failed to lint {}", path.display()))?;
    return Ok(FileResult {
      path: path.to_path_buf(),
      reports,
      fixed: false,
    });
  }

  let result = fix_source(&code, syntax, config)
    .with_context(|| format!("Failed to lint {}", path.display()))?;

  let fixed = result.output != code;
  if fixed {
    tracing::debug!("Applied fixes in {} passes", result.passes);
    fs::write(path, &result.output)
      .with_context(|| format!("Failed to write {}", path.display()))?;
  }

  Ok(FileResult {
    path: path.to_path_buf(),
    reports: result.reports,
    fixed,
  })
}

/// Lint `files` in parallel, results come back in the order of `files`
pub fn lint_files(
  files: &[PathBuf],
  config: &Config,
  fix: bool,
) -> Vec<(PathBuf, anyhow::Result<FileResult>)> {
  files
    .par_iter()
    .map(|path| (path.clone(), lint_file(path, config, fix)))
    .collect()
}

#[cfg(test)]
mod tests {
  use indoc::indoc;
  use pretty_assertions::assert_eq;

  use super::*;

  const UNSORTED: &str = indoc! {"
    export const Title = styled.h1`
      font-size: 20px;
      margin: 0;
    `;
  "};

  #[test]
  fn test_lint_file_reports_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Title.js");
    fs::write(&path, UNSORTED).unwrap();

    let result = lint_file(&path, &Config::default(), false).unwrap();

    assert_eq!(result.reports.len(), 1);
    assert!(!result.fixed);
    assert_eq!(fs::read_to_string(&path).unwrap(), UNSORTED);
  }

  #[test]
  fn test_lint_file_fixes_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Title.tsx");
    fs::write(&path, UNSORTED).unwrap();

    let result = lint_file(&path, &Config::default(), true).unwrap();

    assert!(result.fixed);
    assert_eq!(result.reports.len(), 0);
    assert_eq!(
      fs::read_to_string(&path).unwrap(),
      indoc! {"
        export const Title = styled.h1`
          margin: 0;
          font-size: 20px;
        `;
      "}
    );
  }

  #[test]
  fn test_lint_files_keeps_failures_per_file() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.js");
    let broken = dir.path().join("broken.js");
    fs::write(&good, UNSORTED).unwrap();
    fs::write(&broken, "const = css`").unwrap();

    let results = lint_files(&[broken.clone(), good.clone()], &Config::default(), false);

    assert_eq!(results[0].0, broken);
    assert!(results[0].1.is_err());
    assert_eq!(results[1].0, good);
    assert_eq!(results[1].1.as_ref().unwrap().reports.len(), 1);
  }
}
