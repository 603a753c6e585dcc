use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classify::StyleTags;
use crate::groups::GroupTable;

/// Options of the declaration ordering check.
///
/// Example `declsort.json`:
///
/// ```json
/// {
///   "groups": [
///     ["position", "top", "right", "bottom", "left"],
///     ["display", "width", "height"]
///   ],
///   "tags": { "css": ["css"], "styled": ["styled"] }
/// }
/// ```
///
/// Missing keys fall back to the built-in table and tags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
  pub groups: GroupTable,
  pub tags: StyleTags,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Failed to read {}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("Invalid config {}: {source}", path.display())]
  Invalid {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

impl Config {
  pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(json)
  }

  pub fn read_from_file(path: &Path) -> Result<Self, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    Self::from_json(&contents).map_err(|source| ConfigError::Invalid {
      path: path.to_path_buf(),
      source,
    })
  }
}

#[cfg(test)]
mod tests {
  use indoc::indoc;
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn test_empty_config_uses_defaults() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    assert_eq!(&Config::default().groups, GroupTable::builtin());
  }

  #[test]
  fn test_custom_groups_and_tags() {
    let config = Config::from_json(indoc! {r#"
      {
        "groups": [["top"], ["width", "height"]],
        "tags": { "styled": ["glamorous"] }
      }
    "#})
    .unwrap();

    assert_eq!(config.groups.group_index("height"), Some(1));
    assert_eq!(config.groups.group_index("display"), None);
    assert_eq!(config.tags.styled, vec!["glamorous".to_string()]);
    assert_eq!(config.tags.css, vec!["css".to_string()]);
  }

  #[test]
  fn test_invalid_group_table() {
    let error = Config::from_json(r#"{ "groups": [] }"#).unwrap_err();
    assert!(error.to_string().contains("at least one group"));

    let error = Config::from_json(r#"{ "groups": [["top"], []] }"#).unwrap_err();
    assert!(error.to_string().contains("Property group 1 is empty"));
  }

  #[test]
  fn test_wrong_value_type() {
    assert!(Config::from_json(r#"{ "groups": "top" }"#).is_err());
  }

  #[test]
  fn test_missing_file() {
    let error = Config::read_from_file(Path::new("/nonexistent/declsort.json")).unwrap_err();

    assert!(matches!(error, ConfigError::Read { .. }));
  }
}
