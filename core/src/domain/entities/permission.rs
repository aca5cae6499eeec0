//! Permission keys and the flat key sets granted to users.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a single permission
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionKey(String);

impl PermissionKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PermissionKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for PermissionKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Set of permission keys granted to a user
///
/// Membership is an exact string match: no hierarchy, no wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    keys: HashSet<PermissionKey>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &PermissionKey) -> bool {
        self.keys.contains(key)
    }

    /// True iff at least one of `required` is granted
    ///
    /// An empty requirement is never satisfied.
    pub fn intersects(&self, required: &[PermissionKey]) -> bool {
        required.iter().any(|key| self.keys.contains(key))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in sorted order, the shape stored in the cache
    pub fn to_sorted_vec(&self) -> Vec<PermissionKey> {
        let mut keys: Vec<PermissionKey> = self.keys.iter().cloned().collect();
        keys.sort();
        keys
    }
}

impl FromIterator<PermissionKey> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = PermissionKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}
