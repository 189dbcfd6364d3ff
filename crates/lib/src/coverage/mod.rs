//! Resource type coverage.
//!
//! The scenario manifests must exercise every resource type the engine knows
//! about. Adding a type to the engine without extending the manifests makes
//! the coverage check fail until they are updated.

mod catalog;

pub use catalog::{BUILTIN_TYPE_SUFFIXES, Catalog};

use tracing::{debug, warn};

use crate::converge::{Outcome, OutcomeClassifier};
use crate::error::{HarnessError, Result};

/// Require every cataloged type to appear in `output` with one of `outcomes`.
///
/// Fails on the first type (in catalog order) that is not found.
pub fn assert_all_types_covered(
  output: &str,
  catalog: &Catalog,
  classifier: &dyn OutcomeClassifier,
  outcomes: &[Outcome],
) -> Result<()> {
  if catalog.is_empty() {
    warn!("resource type catalog is empty, nothing to check");
  }
  for suffix in catalog.iter() {
    if !classifier.matches(output, suffix, outcomes)? {
      return Err(HarnessError::MissingCoverage {
        suffix: suffix.to_string(),
        expected: describe(outcomes),
      });
    }
    debug!(suffix, "resource type covered");
  }
  Ok(())
}

fn describe(outcomes: &[Outcome]) -> String {
  let names: Vec<_> = outcomes.iter().map(|o| o.as_str()).collect();
  names.join(" or ")
}
