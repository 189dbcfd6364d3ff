//! Implementation of the `ucconfig-e2e run` command.
//!
//! Runs the standard scenario against the configured target and prints a
//! per-step timing summary.

use anyhow::{Context, Result};
use serde::Serialize;

use ucconfig_e2e_lib::Harness;
use ucconfig_e2e_lib::scenario::{Scenario, ScenarioReport};

use crate::args::HarnessArgs;
use crate::output::{OutputFormat, format_duration, print_json, print_stat, print_success};

#[derive(Serialize)]
struct StepSummary<'a> {
  description: &'a str,
  duration_ms: u128,
}

#[derive(Serialize)]
struct RunSummary<'a> {
  steps: Vec<StepSummary<'a>>,
  total_ms: u128,
}

pub fn cmd_run(args: &HarnessArgs, output: OutputFormat) -> Result<()> {
  let config = args.config();
  // Fail fast instead of after the first step.
  config.target_identity().context("Cannot determine the target")?;

  let harness = Harness::new(config).context("Failed to set up harness")?;
  let scenario = Scenario::standard();

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let report = rt.block_on(scenario.run(&harness)).context("Scenario failed")?;

  if output.is_json() {
    print_json(&summary(&report))?;
  } else {
    print_report(&report);
  }
  Ok(())
}

fn summary(report: &ScenarioReport) -> RunSummary<'_> {
  RunSummary {
    steps: report
      .steps
      .iter()
      .map(|s| StepSummary {
        description: &s.description,
        duration_ms: s.duration.as_millis(),
      })
      .collect(),
    total_ms: report.total().as_millis(),
  }
}

fn print_report(report: &ScenarioReport) {
  println!();
  for step in &report.steps {
    print_stat(&format_duration(step.duration), &step.description);
  }
  print_success(&format!(
    "{} steps passed in {}",
    report.steps.len(),
    format_duration(report.total())
  ));
}
