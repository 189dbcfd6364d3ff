//! Harness settings shared by every subcommand.

use std::path::{Path, PathBuf};

use clap::Args;
use clap::builder::FalseyValueParser;
use tracing::debug;

use ucconfig_e2e_lib::config::HarnessConfig;
use ucconfig_e2e_lib::consts::{
  CI_ENV, DEFAULT_ENGINE, DEFAULT_MANIFEST_DIR, DEFAULT_NO_CHANGES_SENTINEL, DEFAULT_RESOURCE_PREFIX, TENANT_URL_ENV,
};

#[derive(Debug, Clone, Args)]
pub struct HarnessArgs {
  /// Config engine executable
  #[arg(long, global = true, env = "UCCONFIG_BIN", default_value = DEFAULT_ENGINE)]
  pub engine: PathBuf,

  /// Argument placed before every engine subcommand (repeatable)
  #[arg(long = "engine-arg", global = true, value_name = "ARG", allow_hyphen_values = true)]
  pub engine_args: Vec<String>,

  /// Directory holding the scenario manifests
  #[arg(long, global = true, env = "UCCONFIG_E2E_MANIFEST_DIR", default_value = DEFAULT_MANIFEST_DIR)]
  pub manifest_dir: PathBuf,

  /// Tenant URL the engine is pointed at
  #[arg(long, global = true, env = TENANT_URL_ENV)]
  pub tenant_url: Option<String>,

  /// Extra argument forwarded to every apply (repeatable)
  #[arg(long = "extra-arg", global = true, value_name = "ARG", allow_hyphen_values = true)]
  pub extra_args: Vec<String>,

  /// Phrase a dry-run prints when nothing would change
  #[arg(long, global = true, env = "UCCONFIG_E2E_NO_CHANGES_SENTINEL", default_value = DEFAULT_NO_CHANGES_SENTINEL)]
  pub no_changes_sentinel: String,

  /// Prefix of resource names in the engine's plan output
  #[arg(long, global = true, default_value = DEFAULT_RESOURCE_PREFIX)]
  pub resource_prefix: String,

  /// Emit CI log-grouping markers
  #[arg(long, global = true, env = CI_ENV, value_parser = FalseyValueParser::new())]
  pub ci: bool,

  /// Source file to read resource type suffixes from
  #[arg(long, global = true, value_name = "FILE")]
  pub catalog_source: Option<PathBuf>,
}

impl HarnessArgs {
  pub fn config(&self) -> HarnessConfig {
    debug!(
      engine = %self.engine.display(),
      manifest_dir = %self.manifest_dir.display(),
      ci = self.ci,
      "harness settings"
    );
    HarnessConfig {
      engine: self.engine.clone(),
      engine_args: self.engine_args.clone(),
      manifest_dir: self.manifest_dir.clone(),
      tenant_url: self.tenant_url.clone().filter(|u| !u.is_empty()),
      extra_args: self.extra_args.clone(),
      no_changes_sentinel: self.no_changes_sentinel.clone(),
      resource_prefix: self.resource_prefix.clone(),
      ci: self.ci,
      catalog_source: self.catalog_source.clone(),
    }
  }
}

/// Use `manifest` as given if it exists, otherwise look it up in the manifest directory.
pub fn resolve_manifest(config: &HarnessConfig, manifest: &Path) -> PathBuf {
  if manifest.exists() || manifest.is_absolute() {
    manifest.to_path_buf()
  } else {
    config.manifest_dir().join(manifest)
  }
}
