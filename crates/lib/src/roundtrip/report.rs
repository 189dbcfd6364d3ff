//! Comparison report for the round-trip check.

use std::fmt;

/// One difference between the original and the regenerated files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discrepancy {
  /// The regenerated manifest differs from the templated original.
  ManifestModified { diff: String },
  /// A value file shipped with the manifest was not regenerated.
  ValueFileDeleted { path: String },
  /// gen-manifest produced a value file the original does not have.
  ValueFileCreated { path: String },
  /// A value file exists on both sides with different contents.
  ValueFileModified { path: String, diff: String },
}

impl fmt::Display for Discrepancy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Discrepancy::ManifestModified { diff } => {
        writeln!(f, "Running gen-manifest modified the manifest:")?;
        write!(f, "{diff}")
      }
      Discrepancy::ValueFileDeleted { path } => writeln!(f, "Running gen-manifest deleted {path}"),
      Discrepancy::ValueFileCreated { path } => writeln!(f, "Running gen-manifest created {path}"),
      Discrepancy::ValueFileModified { path, diff } => {
        writeln!(f, "Running gen-manifest modified {path}:")?;
        writeln!(f, "{diff}")
      }
    }
  }
}

/// All discrepancies found by one comparison, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonReport {
  discrepancies: Vec<Discrepancy>,
}

impl ComparisonReport {
  pub fn push(&mut self, discrepancy: Discrepancy) {
    self.discrepancies.push(discrepancy);
  }

  pub fn differs(&self) -> bool {
    !self.discrepancies.is_empty()
  }

  pub fn len(&self) -> usize {
    self.discrepancies.len()
  }

  pub fn is_empty(&self) -> bool {
    self.discrepancies.is_empty()
  }

  pub fn discrepancies(&self) -> &[Discrepancy] {
    &self.discrepancies
  }
}

impl fmt::Display for ComparisonReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.discrepancies.is_empty() {
      return writeln!(f, "gen-manifest reproduced the manifest and its value files");
    }
    for d in &self.discrepancies {
      write!(f, "{d}")?;
    }
    Ok(())
  }
}
