//! Harness configuration.
//!
//! All process-wide settings live in a [`HarnessConfig`] value that callers
//! pass explicitly, so several isolated harnesses can coexist in one process.

use std::path::{Path, PathBuf};

use reqwest::Url;

use crate::consts::{
  CI_ENV, DEFAULT_ENGINE, DEFAULT_MANIFEST_DIR, DEFAULT_NO_CHANGES_SENTINEL, DEFAULT_RESOURCE_PREFIX, TENANT_URL_ENV,
};
use crate::error::{HarnessError, Result};

/// Identity of the live target, substituted for the placeholder token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetIdentity(String);

impl TargetIdentity {
  /// Derive the identity from a tenant URL: the first DNS label of its host.
  ///
  /// `https://acme-prod.tenant.userclouds.com` becomes `acme-prod`.
  pub fn from_url(tenant_url: &str) -> Result<Self> {
    let url = Url::parse(tenant_url)
      .map_err(|e| HarnessError::Configuration(format!("invalid tenant URL {tenant_url:?}: {e}")))?;
    let host = url
      .host_str()
      .filter(|h| !h.is_empty())
      .ok_or_else(|| HarnessError::Configuration(format!("tenant URL {tenant_url:?} has no host")))?;
    let label = host.split('.').next().unwrap_or(host);
    Ok(Self(label.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl std::fmt::Display for TargetIdentity {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

/// Settings for one harness run.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
  /// Config engine executable.
  pub engine: PathBuf,
  /// Arguments placed before every engine subcommand.
  pub engine_args: Vec<String>,
  /// Directory holding the scenario manifests and their value directories.
  pub manifest_dir: PathBuf,
  /// Tenant URL. Only required once a manifest has to be templated.
  pub tenant_url: Option<String>,
  /// Extra arguments forwarded verbatim to every apply invocation.
  pub extra_args: Vec<String>,
  /// Literal phrase a dry-run must print when nothing would change.
  pub no_changes_sentinel: String,
  /// Prefix the engine uses when naming resources in its plan output.
  pub resource_prefix: String,
  /// Emit CI log-grouping markers instead of colored step headers.
  pub ci: bool,
  /// Source file to extract the resource type catalog from. Uses the
  /// built-in catalog when unset.
  pub catalog_source: Option<PathBuf>,
}

impl Default for HarnessConfig {
  fn default() -> Self {
    Self {
      engine: PathBuf::from(DEFAULT_ENGINE),
      engine_args: Vec::new(),
      manifest_dir: PathBuf::from(DEFAULT_MANIFEST_DIR),
      tenant_url: None,
      extra_args: Vec::new(),
      no_changes_sentinel: DEFAULT_NO_CHANGES_SENTINEL.to_string(),
      resource_prefix: DEFAULT_RESOURCE_PREFIX.to_string(),
      ci: false,
      catalog_source: None,
    }
  }
}

impl HarnessConfig {
  /// Defaults overlaid with the tenant URL and CI flag from the environment.
  pub fn from_env() -> Self {
    Self {
      tenant_url: std::env::var(TENANT_URL_ENV).ok().filter(|v| !v.is_empty()),
      ci: std::env::var_os(CI_ENV).is_some(),
      ..Self::default()
    }
  }

  /// Resolve the target identity, failing if no tenant URL is configured.
  pub fn target_identity(&self) -> Result<TargetIdentity> {
    let url = self
      .tenant_url
      .as_deref()
      .ok_or_else(|| HarnessError::Configuration(format!("{TENANT_URL_ENV} must be set")))?;
    TargetIdentity::from_url(url)
  }

  /// Path of a scenario manifest by file name.
  pub fn manifest_path(&self, name: &str) -> PathBuf {
    self.manifest_dir.join(name)
  }

  pub fn manifest_dir(&self) -> &Path {
    &self.manifest_dir
  }
}
