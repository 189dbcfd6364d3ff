//! Manifest types.
//!
//! Only the fields the harness inspects are typed. Attribute values are kept
//! as opaque JSON values.
//!
//! # Example
//!
//! ```yaml
//! resources:
//!   - uc_terraform_type: userstore_column
//!     manifest_id: userstore_column_email
//!     resource_uuids:
//!       __DEFAULT: 0c4b2bd4-ffd5-4a7f-8fd4-42cd1b3e2a21
//!       "<<TARGET_FQTN>>": 0c4b2bd4-ffd5-4a7f-8fd4-42cd1b3e2a21
//!     attributes:
//!       name: email
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{HarnessError, Result};

/// Serialization formats the engine accepts for manifests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
  Yaml,
  Json,
}

impl ManifestFormat {
  /// Pick the format from the file extension.
  pub fn from_path(path: &Path) -> Result<Self> {
    match path.extension().and_then(|e| e.to_str()) {
      Some("yaml") | Some("yml") => Ok(ManifestFormat::Yaml),
      Some("json") => Ok(ManifestFormat::Json),
      _ => Err(HarnessError::UnsupportedFormat {
        path: path.to_path_buf(),
      }),
    }
  }
}

/// A parsed manifest.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
  #[serde(default, deserialize_with = "null_as_default")]
  pub resources: Vec<ResourceDecl>,
}

/// One resource declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDecl {
  /// Engine resource type suffix, e.g. `userstore_column`.
  #[serde(rename = "uc_terraform_type", default, deserialize_with = "null_as_default")]
  pub type_suffix: String,

  /// ID that is stable across targets and time.
  #[serde(default, deserialize_with = "null_as_default")]
  pub manifest_id: String,

  /// Target FQTN (or `__DEFAULT`) to resource UUID within that target.
  #[serde(default, deserialize_with = "null_as_default")]
  pub resource_uuids: BTreeMap<String, String>,

  #[serde(default, deserialize_with = "null_as_default")]
  pub attributes: BTreeMap<String, serde_json::Value>,
}

/// The engine writes nil collections as `null`; read those as empty.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Manifest {
  /// Parse manifest text in the given format.
  ///
  /// A blank document is an empty manifest.
  pub fn parse(text: &str, format: ManifestFormat, path: &Path) -> Result<Self> {
    if text.trim().is_empty() {
      return Ok(Manifest::default());
    }
    let parsed = match format {
      ManifestFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
      ManifestFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| HarnessError::Parse {
      path: path.to_path_buf(),
      message,
    })
  }

  /// Read and parse a manifest file, choosing the format by extension.
  pub fn load(path: &Path) -> Result<Self> {
    let format = ManifestFormat::from_path(path)?;
    let text = std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
    Self::parse(&text, format, path)
  }
}
