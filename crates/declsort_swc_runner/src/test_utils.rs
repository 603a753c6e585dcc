use std::path::Path;

use swc_core::ecma::parser::Syntax;
use swc_core::ecma::visit::Visit;

use crate::runner::{run_visit_const, syntax_for_path};
pub use crate::runner::{RunContext, RunVisitResult};

/// In the future this might be a different type to `RunContext`
pub type RunTestContext = RunContext;

/// Helper to test SWC visitors.
///
/// * Parse `code` with SWC
/// * Run a visitor over it
/// * Return the result
///
pub fn run_test_visit_const<V: Visit>(
  code: &str,
  make_visit: impl FnOnce(RunTestContext) -> V,
) -> RunVisitResult<V> {
  run_visit_const(code, test_syntax(), make_visit).unwrap()
}

/// TypeScript syntax, the fixtures use type arguments on styled tags
pub fn test_syntax() -> Syntax {
  syntax_for_path(Path::new("fixture.ts"))
}
