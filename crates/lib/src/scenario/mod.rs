//! End-to-end scenario.
//!
//! A scenario is an ordered list of steps run strictly one after another
//! against a single live target. The first failing step stops the run.
//!
//! The standard scenario walks the target through its whole lifecycle:
//!
//! ```text
//! empty -> lots-of-resources -> lots-of-resources-modified -> empty
//! ```
//!
//! with a dry-run no-op check after every apply and a gen-manifest round trip
//! after each non-empty configuration.

mod group;

pub use group::StepGroup;

use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::converge::Outcome;
use crate::error::Result;
use crate::harness::Harness;

pub const EMPTY_MANIFEST: &str = "empty.yaml";
pub const LOTS_MANIFEST: &str = "lots-of-resources.yaml";
pub const MODIFIED_MANIFEST: &str = "lots-of-resources-modified.yaml";

/// What a step does with its manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
  /// Apply the manifest. With `expect`, every cataloged type must appear in
  /// the output with one of those outcomes.
  Apply {
    manifest: String,
    expect: Option<Vec<Outcome>>,
  },
  AssertNoChanges {
    manifest: String,
  },
  AssertGenerateMatches {
    manifest: String,
  },
}

impl StepAction {
  pub fn manifest(&self) -> &str {
    match self {
      StepAction::Apply { manifest, .. }
      | StepAction::AssertNoChanges { manifest }
      | StepAction::AssertGenerateMatches { manifest } => manifest,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
  pub description: String,
  pub action: StepAction,
}

impl Step {
  pub fn apply(manifest: &str, description: impl Into<String>) -> Self {
    Self {
      description: description.into(),
      action: StepAction::Apply {
        manifest: manifest.to_string(),
        expect: None,
      },
    }
  }

  pub fn apply_expecting(manifest: &str, outcomes: &[Outcome], description: impl Into<String>) -> Self {
    Self {
      description: description.into(),
      action: StepAction::Apply {
        manifest: manifest.to_string(),
        expect: Some(outcomes.to_vec()),
      },
    }
  }

  pub fn no_changes(manifest: &str) -> Self {
    Self {
      description: format!("Applying {manifest} again should not change anything..."),
      action: StepAction::AssertNoChanges {
        manifest: manifest.to_string(),
      },
    }
  }

  pub fn regenerate(manifest: &str) -> Self {
    Self {
      description: format!("Regenerating {manifest} should generate the same manifest..."),
      action: StepAction::AssertGenerateMatches {
        manifest: manifest.to_string(),
      },
    }
  }
}

/// Wall-clock time of one completed step.
#[derive(Debug, Clone)]
pub struct StepTiming {
  pub description: String,
  pub duration: Duration,
}

/// Steps completed by a successful run, in order.
#[derive(Debug, Clone, Default)]
pub struct ScenarioReport {
  pub steps: Vec<StepTiming>,
}

impl ScenarioReport {
  pub fn total(&self) -> Duration {
    self.steps.iter().map(|s| s.duration).sum()
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
  steps: Vec<Step>,
}

impl Scenario {
  pub fn new(steps: Vec<Step>) -> Self {
    Self { steps }
  }

  /// Baseline, create, no-op, regenerate, modify, no-op, regenerate, delete, no-op.
  pub fn standard() -> Self {
    Self::new(vec![
      // A previous failed run may have left resources behind.
      Step::apply(EMPTY_MANIFEST, "Applying empty.yaml to get to baseline state..."),
      Step::no_changes(EMPTY_MANIFEST),
      Step::apply_expecting(
        LOTS_MANIFEST,
        &[Outcome::Created],
        "Applying lots-of-resources.yaml to test resource creation...",
      ),
      Step::no_changes(LOTS_MANIFEST),
      Step::regenerate(LOTS_MANIFEST),
      Step::apply_expecting(
        MODIFIED_MANIFEST,
        &[Outcome::Updated, Outcome::Replaced],
        "Applying lots-of-resources-modified.yaml to test resource modification...",
      ),
      Step::no_changes(MODIFIED_MANIFEST),
      Step::regenerate(MODIFIED_MANIFEST),
      Step::apply(EMPTY_MANIFEST, "Applying empty.yaml to test resource deletion..."),
      Step::no_changes(EMPTY_MANIFEST),
    ])
  }

  pub fn steps(&self) -> &[Step] {
    &self.steps
  }

  /// Manifest file names the scenario reads, without duplicates.
  pub fn manifests(&self) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for step in &self.steps {
      let name = step.action.manifest();
      if !names.contains(&name) {
        names.push(name);
      }
    }
    names
  }

  /// Run every step in order, stopping at the first failure.
  pub async fn run(&self, harness: &Harness) -> Result<ScenarioReport> {
    let mut report = ScenarioReport::default();
    let ci = harness.config().ci;

    for (index, step) in self.steps.iter().enumerate() {
      let started = Instant::now();
      let outcome = {
        let _group = StepGroup::open(&step.description, ci);
        run_step(harness, &step.action).await
      };
      let duration = started.elapsed();

      if let Err(e) = outcome {
        error!(step = index + 1, description = %step.description, error = %e, "step failed");
        return Err(e);
      }
      info!(step = index + 1, elapsed_ms = duration.as_millis() as u64, "step passed");
      report.steps.push(StepTiming {
        description: step.description.clone(),
        duration,
      });
    }

    Ok(report)
  }
}

async fn run_step(harness: &Harness, action: &StepAction) -> Result<()> {
  let path = harness.config().manifest_path(action.manifest());
  match action {
    StepAction::Apply { expect, .. } => {
      let output = harness.apply(&path).await?;
      if let Some(outcomes) = expect {
        harness.assert_all_types_covered(&output, outcomes)?;
      }
    }
    StepAction::AssertNoChanges { .. } => {
      harness.assert_no_changes(&path).await?;
    }
    StepAction::AssertGenerateMatches { .. } => {
      harness.assert_generate_matches(&path).await?;
    }
  }
  Ok(())
}
