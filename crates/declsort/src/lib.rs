//! Checks that the declarations of CSS-in-JS template literals are ordered by
//! property group, and computes the edits that put them in order.
//!
//! ```
//! use declsort::{fix_source, Config};
//! use declsort_swc_runner::syntax_for_path;
//!
//! let code = "const a = css`height: 1px; width: 1px;`;";
//! let syntax = syntax_for_path(std::path::Path::new("a.js"));
//! let result = fix_source(code, syntax, &Config::default()).unwrap();
//!
//! assert_eq!(result.output, "const a = css`width: 1px; height: 1px;`;");
//! ```

pub mod classify;
pub mod config;
pub mod edit;
pub mod extract;
pub mod fix;
pub mod groups;
pub mod lint;
pub mod range;
pub mod rule;
pub mod sort;
pub mod source_index;
pub mod stylesheet;
pub mod validate;
pub mod visitor;

pub use classify::{is_style_block, StyleTags};
pub use config::{Config, ConfigError};
pub use edit::{apply_edits, Edit, EditError};
pub use extract::{extract_styles, StyleNode};
pub use groups::{GroupTable, GroupTableError};
pub use lint::{fix_source, lint_source, FixOutput, LintError, Report};
pub use range::LocationError;
pub use rule::{check_style_node, Violation, META, RULE_NAME};
pub use source_index::{SourceIndex, SourceText};
