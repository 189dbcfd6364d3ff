//! Resource type catalog.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{HarnessError, Result};

/// Type suffixes the engine supports, in the engine's own order.
pub const BUILTIN_TYPE_SUFFIXES: &[&str] = &[
  "userstore_column",
  "userstore_column_soft_deleted_retention_duration",
  "userstore_accessor",
  "userstore_mutator",
  "userstore_purpose",
  "access_policy",
  "access_policy_template",
  "transformer",
];

static TYPE_SUFFIX_DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"TerraformTypeSuffix:\s+"([a-z0-9_]+)""#).expect("type suffix pattern is valid")
});

/// Ordered, read-only set of resource type suffixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
  suffixes: Vec<String>,
}

impl Catalog {
  /// Build a catalog, dropping duplicates while keeping first-seen order.
  pub fn new<I, S>(suffixes: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let mut out: Vec<String> = Vec::new();
    for s in suffixes {
      let s = s.into();
      if !out.contains(&s) {
        out.push(s);
      }
    }
    Self { suffixes: out }
  }

  pub fn builtin() -> Self {
    Self::new(BUILTIN_TYPE_SUFFIXES.iter().copied())
  }

  /// Extract every `TerraformTypeSuffix: "<suffix>"` definition from source text.
  pub fn parse_source(text: &str) -> Self {
    Self::new(TYPE_SUFFIX_DEFINITION.captures_iter(text).map(|c| c[1].to_string()))
  }

  /// Load the catalog from the engine's resource type table.
  pub fn from_source(path: &Path) -> Result<Self> {
    let text = std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
    let catalog = Self::parse_source(&text);
    if catalog.is_empty() {
      return Err(HarnessError::Parse {
        path: path.to_path_buf(),
        message: "no resource type suffix definitions found".to_string(),
      });
    }
    Ok(catalog)
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.suffixes.iter().map(String::as_str)
  }

  pub fn contains(&self, suffix: &str) -> bool {
    self.suffixes.iter().any(|s| s == suffix)
  }

  pub fn len(&self) -> usize {
    self.suffixes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.suffixes.is_empty()
  }
}
