//! Static portability checks.
//!
//! A portable manifest binds every resource to the target through the
//! placeholder token, never a concrete FQTN. Checks run before any apply so a
//! non-portable manifest is rejected without touching the live target.

use std::path::Path;

use tracing::debug;

use super::types::Manifest;
use crate::consts::TARGET_FQTN_PLACEHOLDER;
use crate::coverage::Catalog;
use crate::error::{HarnessError, Result};

/// Load the manifest at `path` and validate it.
///
/// Returns the parsed manifest on success.
pub fn validate(path: &Path, catalog: Option<&Catalog>) -> Result<Manifest> {
  let manifest = Manifest::load(path)?;
  validate_manifest(&manifest, catalog)?;
  debug!(path = %path.display(), resources = manifest.resources.len(), "manifest is portable");
  Ok(manifest)
}

/// Validate an already-parsed manifest, stopping at the first bad resource.
///
/// When a catalog is supplied, each resource type must be one it lists.
pub fn validate_manifest(manifest: &Manifest, catalog: Option<&Catalog>) -> Result<()> {
  for (index, resource) in manifest.resources.iter().enumerate() {
    if catalog.is_some_and(|c| !c.contains(&resource.type_suffix)) {
      return Err(HarnessError::UnknownResourceType {
        index,
        type_suffix: resource.type_suffix.clone(),
      });
    }
    if resource.manifest_id.is_empty() {
      return Err(HarnessError::MissingManifestId { index });
    }
    if !resource.resource_uuids.contains_key(TARGET_FQTN_PLACEHOLDER) {
      return Err(HarnessError::Portability {
        manifest_id: resource.manifest_id.clone(),
      });
    }
  }
  Ok(())
}
