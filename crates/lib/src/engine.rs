//! Command-line contract of the config engine.
//!
//! ```text
//! <engine> apply <manifest> --auto-approve [extra...]
//! <engine> apply <manifest> --dry-run [extra...]
//! <engine> gen-manifest <output>
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::HarnessConfig;
use crate::error::Result;
use crate::process;

/// How an apply invocation treats the live target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
  /// Mutate the target without prompting.
  AutoApprove,
  /// Only print the plan.
  DryRun,
}

impl ApplyMode {
  fn flag(self) -> &'static str {
    match self {
      ApplyMode::AutoApprove => "--auto-approve",
      ApplyMode::DryRun => "--dry-run",
    }
  }
}

/// Handle on the engine executable plus arguments forwarded to every apply.
#[derive(Debug, Clone)]
pub struct Engine {
  program: PathBuf,
  leading_args: Vec<String>,
  extra_args: Vec<String>,
}

impl Engine {
  pub fn new(program: impl Into<PathBuf>, extra_args: Vec<String>) -> Self {
    Self {
      program: program.into(),
      leading_args: Vec::new(),
      extra_args,
    }
  }

  /// Arguments placed before the subcommand, for engines launched through a
  /// wrapper (`go run ./cmd/ucconfig`, an interpreter, ...).
  pub fn with_leading_args(mut self, leading_args: Vec<String>) -> Self {
    self.leading_args = leading_args;
    self
  }

  pub fn from_config(config: &HarnessConfig) -> Self {
    Self::new(&config.engine, config.extra_args.clone()).with_leading_args(config.engine_args.clone())
  }

  /// Arguments for an apply in the given mode.
  pub fn apply_args(&self, manifest: &Path, mode: ApplyMode) -> Vec<OsString> {
    let mut args = self.leading();
    args.extend([OsString::from("apply"), manifest.into(), mode.flag().into()]);
    args.extend(self.extra_args.iter().map(OsString::from));
    args
  }

  /// Arguments for regenerating a manifest into `output`.
  pub fn gen_manifest_args(&self, output: &Path) -> Vec<OsString> {
    let mut args = self.leading();
    args.extend([OsString::from("gen-manifest"), output.into()]);
    args
  }

  fn leading(&self) -> Vec<OsString> {
    self.leading_args.iter().map(OsString::from).collect()
  }

  /// Run apply and return its de-colorized output.
  pub async fn apply(&self, manifest: &Path, mode: ApplyMode) -> Result<String> {
    process::run(&self.program, self.apply_args(manifest, mode)).await
  }

  /// Run gen-manifest, writing the manifest to `output` and value files next to it.
  pub async fn gen_manifest(&self, output: &Path) -> Result<String> {
    process::run(&self.program, self.gen_manifest_args(output)).await
  }
}
