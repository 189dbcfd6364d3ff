//! Outcome classification of engine plan output.
//!
//! The engine prints one line per planned change, e.g.
//! `userclouds_transformer.foo will be created`. Classification is regex over
//! that text, with the phrases kept as data so a structured parser can replace
//! it behind [`OutcomeClassifier`] without touching callers.
//!
//! Resource names are `<prefix><type suffix>.<identifier>` with the prefix
//! taken from [`HarnessConfig::resource_prefix`](crate::config::HarnessConfig).
//! This couples the harness to the engine's naming scheme.

use std::collections::BTreeMap;

use regex::Regex;

use crate::consts::DEFAULT_RESOURCE_PREFIX;
use crate::error::Result;

/// Planned change kinds the engine reports per resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
  Created,
  Updated,
  Replaced,
}

impl Outcome {
  pub fn as_str(self) -> &'static str {
    match self {
      Outcome::Created => "created",
      Outcome::Updated => "updated",
      Outcome::Replaced => "replaced",
    }
  }
}

/// Decides whether output shows a resource type with one of the given outcomes.
pub trait OutcomeClassifier: Send + Sync {
  fn matches(&self, output: &str, type_suffix: &str, outcomes: &[Outcome]) -> Result<bool>;
}

/// Regex classifier with the change phrases as data.
#[derive(Debug, Clone)]
pub struct PhraseClassifier {
  prefix: String,
  phrases: BTreeMap<Outcome, String>,
}

impl Default for PhraseClassifier {
  fn default() -> Self {
    Self::new(DEFAULT_RESOURCE_PREFIX)
  }
}

impl PhraseClassifier {
  /// Classifier with the engine's standard phrases.
  pub fn new(prefix: impl Into<String>) -> Self {
    let phrases = BTreeMap::from([
      (Outcome::Created, "will be created".to_string()),
      (Outcome::Updated, "will be updated".to_string()),
      (Outcome::Replaced, "must be replaced".to_string()),
    ]);
    Self {
      prefix: prefix.into(),
      phrases,
    }
  }

  /// Override the phrase for one outcome.
  pub fn with_phrase(mut self, outcome: Outcome, phrase: impl Into<String>) -> Self {
    self.phrases.insert(outcome, phrase.into());
    self
  }

  /// Pattern matching `<prefix><suffix>.<identifier> <phrase>` for any of `outcomes`.
  pub fn pattern(&self, type_suffix: &str, outcomes: &[Outcome]) -> Result<Regex> {
    let alternatives: Vec<String> = outcomes
      .iter()
      .filter_map(|o| self.phrases.get(o))
      .map(|p| regex::escape(p))
      .collect();
    let pattern = format!(
      r"{}{}\.[a-zA-Z0-9_-]+ (?:{})",
      regex::escape(&self.prefix),
      regex::escape(type_suffix),
      alternatives.join("|")
    );
    Ok(Regex::new(&pattern)?)
  }
}

impl OutcomeClassifier for PhraseClassifier {
  fn matches(&self, output: &str, type_suffix: &str, outcomes: &[Outcome]) -> Result<bool> {
    if outcomes.is_empty() {
      return Ok(false);
    }
    Ok(self.pattern(type_suffix, outcomes)?.is_match(output))
  }
}
