use std::fs;
use std::path::{Path, PathBuf};

use jwalk::WalkDir;

pub const CONFIG_FILE_NAME: &str = "declsort.json";

const EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"];

/// Every `file_name` found in `start_dir` and its ancestors, nearest first
pub fn find_ancestor_file<P: AsRef<Path>, S: AsRef<Path>>(
  start_dir: P,
  file_name: S,
) -> anyhow::Result<Vec<PathBuf>> {
  let file_name = file_name.as_ref();
  let mut found = vec![];
  let mut current = start_dir.as_ref().to_path_buf();

  loop {
    let possible = current.join(file_name);

    if fs::exists(&possible)? {
      found.push(possible)
    }

    let Some(next) = current.parent() else {
      break;
    };

    current = next.to_path_buf();
  }

  Ok(found)
}

pub fn is_lintable(path: &Path) -> bool {
  path
    .extension()
    .and_then(|extension| extension.to_str())
    .is_some_and(|extension| EXTENSIONS.contains(&extension))
}

fn is_skipped_dir_entry(name: &str) -> bool {
  name == "node_modules" || name.starts_with('.')
}

/// Expands `paths` into the script files to lint. Files given directly are
/// kept as they are, directories are walked skipping hidden entries and
/// `node_modules`.
pub fn collect_files(paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
  let mut files = vec![];

  for path in paths {
    if !fs::exists(path)? {
      return Err(anyhow::anyhow!("No such file or directory: {}", path.display()));
    }

    if path.is_file() {
      files.push(path.clone());
      continue;
    }

    let walker = WalkDir::new(path)
      .sort(true)
      .skip_hidden(false)
      .process_read_dir(|_depth, _path, _state, children| {
        children.retain(|entry| {
          entry
            .as_ref()
            .map(|entry| !is_skipped_dir_entry(&entry.file_name().to_string_lossy()))
            .unwrap_or(true)
        });
      });

    for entry in walker {
      let entry = entry?;
      let entry_path = entry.path();
      if entry.file_type().is_file() && is_lintable(&entry_path) {
        files.push(entry_path);
      }
    }
  }

  files.sort();
  files.dedup();
  Ok(files)
}
