pub mod runner;
pub mod test_utils;

pub use runner::{
  parse_module, run_visit_const, syntax_for_path, ParsedModule, RunContext, RunError,
  RunVisitResult,
};
