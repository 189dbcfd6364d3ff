//! The harness: configuration, engine handle, classifier and catalog bundled
//! behind the operations a scenario step needs.

use std::path::Path;

use tracing::{debug, info};

use crate::config::HarnessConfig;
use crate::converge::{self, Outcome, OutcomeClassifier, PhraseClassifier};
use crate::coverage::{self, Catalog};
use crate::engine::Engine;
use crate::error::Result;
use crate::roundtrip;

pub struct Harness {
  config: HarnessConfig,
  engine: Engine,
  classifier: Box<dyn OutcomeClassifier>,
  catalog: Catalog,
}

impl Harness {
  /// Build a harness, loading the catalog from source when one is configured.
  pub fn new(config: HarnessConfig) -> Result<Self> {
    let catalog = match &config.catalog_source {
      Some(path) => Catalog::from_source(path)?,
      None => Catalog::builtin(),
    };
    debug!(types = catalog.len(), "resource type catalog loaded");
    let classifier = PhraseClassifier::new(config.resource_prefix.clone());
    Ok(Self {
      engine: Engine::from_config(&config),
      classifier: Box::new(classifier),
      catalog,
      config,
    })
  }

  /// Replace the outcome classifier.
  pub fn with_classifier(mut self, classifier: Box<dyn OutcomeClassifier>) -> Self {
    self.classifier = classifier;
    self
  }

  pub fn with_catalog(mut self, catalog: Catalog) -> Self {
    self.catalog = catalog;
    self
  }

  pub fn config(&self) -> &HarnessConfig {
    &self.config
  }

  pub fn catalog(&self) -> &Catalog {
    &self.catalog
  }

  /// Apply a manifest and return the engine's de-colorized output.
  pub async fn apply(&self, manifest: &Path) -> Result<String> {
    let target = self.config.target_identity()?;
    info!(manifest = %manifest.display(), target = %target, "applying");
    converge::apply(&self.engine, &target, Some(&self.catalog), manifest).await
  }

  /// Dry-run a manifest and require the no-changes sentinel.
  pub async fn assert_no_changes(&self, manifest: &Path) -> Result<String> {
    let target = self.config.target_identity()?;
    info!(manifest = %manifest.display(), target = %target, "checking for changes");
    converge::assert_no_changes(
      &self.engine,
      &target,
      Some(&self.catalog),
      manifest,
      &self.config.no_changes_sentinel,
    )
    .await
  }

  /// Regenerate a manifest from live state and require an exact match.
  pub async fn assert_generate_matches(&self, manifest: &Path) -> Result<()> {
    let target = self.config.target_identity()?;
    info!(manifest = %manifest.display(), target = %target, "regenerating");
    roundtrip::assert_generate_matches(&self.engine, &target, manifest).await
  }

  /// Require every cataloged type to appear in `output` with one of `outcomes`.
  pub fn assert_all_types_covered(&self, output: &str, outcomes: &[Outcome]) -> Result<()> {
    coverage::assert_all_types_covered(output, &self.catalog, self.classifier.as_ref(), outcomes)
  }
}
