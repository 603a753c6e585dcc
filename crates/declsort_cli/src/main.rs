#![deny(unused_crate_dependencies)]

mod lint;
mod paths;
mod tracer;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use declsort::Config;

use crate::lint::{lint_files, FileResult};
use crate::paths::{collect_files, find_ancestor_file, CONFIG_FILE_NAME};

/// Check that declarations in CSS-in-JS template literals are sorted in
/// property groups
#[derive(Parser, Debug)]
#[command(name = "declsort", version)]
pub struct DeclsortCommand {
  /// Files or directories to lint
  #[arg(required = true)]
  pub paths: Vec<PathBuf>,
  /// Fix problems and write the files back
  #[arg(long)]
  pub fix: bool,
  /// Configuration file [default: nearest declsort.json]
  #[arg(long, env = "DECLSORT_CONFIG")]
  pub config: Option<PathBuf>,
  /// Only print the summary
  #[arg(long)]
  pub quiet: bool,
}

fn load_config(cmd: &DeclsortCommand) -> anyhow::Result<Config> {
  if let Some(path) = &cmd.config {
    return Ok(Config::read_from_file(path)?);
  }

  let cwd = std::env::current_dir()?;
  let found = find_ancestor_file(&cwd, CONFIG_FILE_NAME)?;
  let Some(path) = found.first() else {
    return Ok(Config::default());
  };

  tracing::debug!("Using config {}", path.display());
  Ok(Config::read_from_file(path)?)
}

fn print_file(result: &FileResult) {
  for report in &result.reports {
    println!(
      "{}:{}:{}  {}  {}",
      result.path.display(),
      report.loc.start.line,
      report.loc.start.column + 1,
      report.message,
      report.rule
    );
  }
}

fn main() -> anyhow::Result<ExitCode> {
  tracer::init_tracer();

  let cmd = DeclsortCommand::parse();
  let config = load_config(&cmd)?;
  let files = collect_files(&cmd.paths)?;
  tracing::debug!("Linting {} files", files.len());

  let mut problems = 0;
  let mut files_with_problems = 0;
  let mut files_fixed = 0;
  let mut failures = 0;

  for (path, result) in lint_files(&files, &config, cmd.fix) {
    match result {
      Ok(result) => {
        if result.fixed {
          files_fixed += 1;
        }
        if !result.reports.is_empty() {
          problems += result.reports.len();
          files_with_problems += 1;
        }
        if !cmd.quiet {
          print_file(&result);
        }
      }
      Err(error) => {
        failures += 1;
        eprintln!("{}: {:#}", path.display(), error);
      }
    }
  }

  if cmd.fix && files_fixed > 0 {
    println!("Fixed {} file(s)", files_fixed);
  }
  println!(
    "{} problem(s) in {} file(s)",
    problems, files_with_problems
  );

  if failures > 0 {
    return Ok(ExitCode::from(2));
  }
  if problems > 0 {
    return Ok(ExitCode::from(1));
  }
  Ok(ExitCode::SUCCESS)
}
