use std::path::Path;

use swc_core::common::input::StringInput;
use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, Globals, SourceMap, GLOBALS};
use swc_core::ecma::ast::Module;
use swc_core::ecma::parser::lexer::Lexer;
use swc_core::ecma::parser::{EsSyntax, Parser, Syntax, TsSyntax};
use swc_core::ecma::visit::{Visit, VisitWith};

pub struct RunContext {
  /// Source-map in use
  pub source_map: Lrc<SourceMap>,
}

pub struct RunVisitResult<V> {
  pub visitor: V,
}

pub struct ParsedModule {
  pub source_map: Lrc<SourceMap>,
  pub module: Module,
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
  #[error("Failed to parse module: {}", .0.kind().msg())]
  SwcParse(swc_core::ecma::parser::error::Error),
}

/// Pick the parser syntax from a file extension.
///
/// `.ts`-like files parse as TypeScript (TSX for `.tsx`), everything else as
/// ECMAScript with JSX enabled.
pub fn syntax_for_path(path: &Path) -> Syntax {
  let extension = path
    .extension()
    .and_then(|extension| extension.to_str())
    .unwrap_or_default();

  match extension {
    "ts" | "mts" | "cts" => Syntax::Typescript(TsSyntax::default()),
    "tsx" => Syntax::Typescript(TsSyntax {
      tsx: true,
      ..Default::default()
    }),
    _ => Syntax::Es(EsSyntax {
      jsx: true,
      ..Default::default()
    }),
  }
}

/// Parse `code` into a module without running any transform over it.
pub fn parse_module(code: &str, syntax: Syntax) -> Result<ParsedModule, RunError> {
  let source_map = Lrc::new(SourceMap::default());
  let source_file = source_map.new_source_file(Lrc::new(FileName::Anon), code.into());

  let lexer = Lexer::new(
    syntax,
    Default::default(),
    StringInput::from(&*source_file),
    None,
  );

  let mut parser = Parser::new_from(lexer);
  let module = parser.parse_module().map_err(RunError::SwcParse)?;

  Ok(ParsedModule { source_map, module })
}

/// Runner of read-only SWC visitors
///
/// * Parse `code` with SWC
/// * Run a visitor over it
/// * Return the visitor so callers can read what it collected
///
pub fn run_visit_const<V: Visit>(
  code: &str,
  syntax: Syntax,
  make_visit: impl FnOnce(RunContext) -> V,
) -> Result<RunVisitResult<V>, RunError> {
  let ParsedModule { source_map, module } = parse_module(code, syntax)?;

  let visitor = GLOBALS.set(&Globals::new(), || {
    let context = RunContext { source_map };
    let mut visitor = make_visit(context);
    module.visit_with(&mut visitor);
    visitor
  });

  Ok(RunVisitResult { visitor })
}
