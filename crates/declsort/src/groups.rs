use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_GROUPS_JSON: &str = include_str!("groups.json");

static DEFAULT_TABLE: Lazy<GroupTable> =
  Lazy::new(|| serde_json::from_str(DEFAULT_GROUPS_JSON).expect("valid built-in groups.json"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GroupTableError {
  #[error("Property group table must contain at least one group")]
  Empty,
  #[error("Property group {0} is empty")]
  EmptyGroup(usize),
}

/// Sort key of a property: its group index, then its index inside that group.
///
/// Properties that no group mentions get `(groups.len(), 0)` so they sort
/// after every known property and compare equal to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Priority {
  pub group: usize,
  pub index: usize,
}

/// Ordered property groups. Earlier groups sort first, inside a group the
/// declared order is the sort order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<String>>", into = "Vec<Vec<String>>")]
pub struct GroupTable {
  groups: Vec<Vec<String>>,
  lookup: HashMap<String, Priority>,
}

impl GroupTable {
  pub fn new(groups: Vec<Vec<String>>) -> Result<Self, GroupTableError> {
    if groups.is_empty() {
      return Err(GroupTableError::Empty);
    }

    let mut lookup = HashMap::new();
    for (group, properties) in groups.iter().enumerate() {
      if properties.is_empty() {
        return Err(GroupTableError::EmptyGroup(group));
      }

      for (index, property) in properties.iter().enumerate() {
        // First group mentioning a property wins
        lookup
          .entry(property.clone())
          .or_insert(Priority { group, index });
      }
    }

    Ok(Self { groups, lookup })
  }

  /// The table bundled with the crate
  pub fn builtin() -> &'static GroupTable {
    &DEFAULT_TABLE
  }

  pub fn groups(&self) -> &[Vec<String>] {
    &self.groups
  }

  /// Index of the first group containing `property`
  pub fn group_index(&self, property: &str) -> Option<usize> {
    self.lookup.get(property).map(|priority| priority.group)
  }

  pub fn priority(&self, property: &str) -> Priority {
    self.lookup.get(property).copied().unwrap_or(Priority {
      group: self.groups.len(),
      index: 0,
    })
  }
}

impl Default for GroupTable {
  fn default() -> Self {
    Self::builtin().clone()
  }
}

impl TryFrom<Vec<Vec<String>>> for GroupTable {
  type Error = GroupTableError;

  fn try_from(groups: Vec<Vec<String>>) -> Result<Self, Self::Error> {
    GroupTable::new(groups)
  }
}

impl From<GroupTable> for Vec<Vec<String>> {
  fn from(table: GroupTable) -> Self {
    table.groups
  }
}
