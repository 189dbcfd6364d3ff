//! ucconfig-e2e-lib: end-to-end verification of the ucconfig config engine
//!
//! Drives the engine binary against a live target and checks that:
//! - every manifest converges (a dry-run after apply reports no changes)
//! - every known resource type is exercised by the scenario manifests
//! - `gen-manifest` reproduces the applied manifest and its value files
//!
//! Manifests are kept portable with the `<<TARGET_FQTN>>` placeholder, which
//! is substituted into a temporary copy before each engine invocation.

pub mod config;
pub mod consts;
pub mod converge;
pub mod coverage;
pub mod engine;
pub mod error;
pub mod harness;
pub mod manifest;
pub mod process;
pub mod roundtrip;
pub mod scenario;

#[cfg(test)]
mod util;

pub use error::{HarnessError, Result};
pub use harness::Harness;
