//! CLI smoke tests for ucconfig-e2e.
//!
//! Engine-driving commands run against `fixtures/fake-ucconfig.sh`, a shell
//! script that keeps its live state in a temp directory.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serial_test::serial;
use tempfile::TempDir;

const TENANT_URL: &str = "https://acme-e2e.tenant.userclouds.com";

const TYPES: &[&str] = &[
  "userstore_column",
  "userstore_column_soft_deleted_retention_duration",
  "userstore_accessor",
  "userstore_mutator",
  "userstore_purpose",
  "access_policy",
  "access_policy_template",
  "transformer",
];

/// Get a Command for the ucconfig-e2e binary with a clean environment.
fn e2e_cmd() -> Command {
  let mut cmd = cargo_bin_cmd!("ucconfig-e2e");
  cmd
    .env_remove("USERCLOUDS_TENANT_URL")
    .env_remove("UCCONFIG_BIN")
    .env_remove("UCCONFIG_E2E_MANIFEST_DIR")
    .env_remove("UCCONFIG_E2E_NO_CHANGES_SENTINEL")
    .env_remove("GITHUB_ACTIONS");
  cmd
}

fn fake_engine() -> PathBuf {
  dunce::canonicalize(Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fake-ucconfig.sh")).unwrap()
}

/// Command wired to the fake engine, with its state and manifests under `temp`.
fn fake_cmd(temp: &TempDir) -> Command {
  let mut cmd = e2e_cmd();
  cmd
    .env("FAKE_UCCONFIG_STATE", temp.path().join("state"))
    .arg("--engine")
    .arg("/bin/sh")
    .arg("--engine-arg")
    .arg(fake_engine())
    .arg("--manifest-dir")
    .arg(temp.path().join("manifests"))
    .arg("--tenant-url")
    .arg(TENANT_URL);
  cmd
}

/// Portable manifest declaring one resource per type, planning `phrase` for each.
fn manifest(types: &[&str], phrase: &str) -> String {
  let mut out = String::new();
  for t in types {
    out.push_str(&format!("# plan: userclouds_{t}.e2e {phrase}\n"));
  }
  out.push_str("resources:\n");
  for (i, t) in types.iter().enumerate() {
    out.push_str(&format!(
      "  - uc_terraform_type: {t}\n    manifest_id: e2e_{t}\n    resource_uuids:\n      __DEFAULT: 00000000-0000-0000-0000-{i:012}\n      \"<<TARGET_FQTN>>\": 00000000-0000-0000-0000-{i:012}\n"
    ));
  }
  out
}

fn scenario_dir(types: &[&str]) -> TempDir {
  let temp = TempDir::new().unwrap();
  let dir = temp.path().join("manifests");
  std::fs::create_dir_all(&dir).unwrap();
  std::fs::write(dir.join("empty.yaml"), "resources: []\n").unwrap();
  std::fs::write(dir.join("lots-of-resources.yaml"), manifest(types, "will be created")).unwrap();
  std::fs::write(
    dir.join("lots-of-resources-modified.yaml"),
    manifest(types, "will be updated in-place"),
  )
  .unwrap();
  temp
}

fn calls(temp: &TempDir) -> String {
  std::fs::read_to_string(temp.path().join("state/calls.log")).unwrap_or_default()
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  e2e_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"))
    .stdout(predicate::str::contains("roundtrip"));
}

#[test]
fn version_flag_works() {
  e2e_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("ucconfig-e2e"));
}

// =============================================================================
// Catalog
// =============================================================================

#[test]
fn catalog_lists_builtin_types() {
  e2e_cmd()
    .arg("catalog")
    .assert()
    .success()
    .stdout(predicate::str::contains("userstore_column_soft_deleted_retention_duration"))
    .stdout(predicate::str::contains("access_policy_template"));
}

#[test]
fn catalog_json_from_source() {
  let temp = TempDir::new().unwrap();
  let source = temp.path().join("types.go");
  std::fs::write(&source, "{TerraformTypeSuffix: \"widget\"},\n{TerraformTypeSuffix:  \"gadget\"},\n").unwrap();

  let out = e2e_cmd()
    .arg("--catalog-source")
    .arg(&source)
    .arg("catalog")
    .arg("--json")
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();
  let parsed: Vec<String> = serde_json::from_slice(&out).unwrap();
  assert_eq!(parsed, vec!["widget", "gadget"]);
}

#[test]
fn catalog_source_without_definitions_fails() {
  let temp = TempDir::new().unwrap();
  let source = temp.path().join("types.go");
  std::fs::write(&source, "package resourcetypes\n").unwrap();

  e2e_cmd()
    .arg("--catalog-source")
    .arg(&source)
    .arg("catalog")
    .assert()
    .failure()
    .stderr(predicate::str::contains("no resource type suffix definitions"));
}

// =============================================================================
// Validate
// =============================================================================

#[test]
fn validate_scenario_manifests() {
  let temp = scenario_dir(TYPES);
  fake_cmd(&temp)
    .arg("validate")
    .assert()
    .success()
    .stdout(predicate::str::contains("lots-of-resources-modified.yaml (8 resources)"));
  // Validation never runs the engine.
  assert!(calls(&temp).is_empty());
}

#[test]
fn validate_rejects_non_portable_manifest() {
  let temp = scenario_dir(TYPES);
  let pinned = temp.path().join("manifests/pinned.yaml");
  std::fs::write(
    &pinned,
    "resources:\n  - uc_terraform_type: transformer\n    manifest_id: t1\n    resource_uuids:\n      acme-e2e: 66666666-6666-6666-6666-666666666666\n",
  )
  .unwrap();

  fake_cmd(&temp)
    .arg("validate")
    .arg("pinned.yaml")
    .assert()
    .failure()
    .stderr(predicate::str::contains("resource t1 does not use the target placeholder"));
}

#[test]
fn validate_rejects_unknown_extension() {
  let temp = scenario_dir(TYPES);
  let toml = temp.path().join("manifests/m.toml");
  std::fs::write(&toml, "").unwrap();

  fake_cmd(&temp).arg("validate").arg(&toml).assert().failure();
}

// =============================================================================
// Engine-driving commands
// =============================================================================

#[test]
#[serial]
fn run_full_scenario() {
  let temp = scenario_dir(TYPES);
  fake_cmd(&temp)
    .arg("run")
    .assert()
    .success()
    .stdout(predicate::str::contains("Applying empty.yaml to get to baseline state..."))
    .stdout(predicate::str::contains("Regenerating lots-of-resources-modified.yaml should generate the same manifest..."))
    .stdout(predicate::str::contains("10 steps passed"));

  let log = calls(&temp);
  assert_eq!(log.lines().filter(|l| l.starts_with("apply ")).count(), 8);
  assert_eq!(log.lines().filter(|l| l.starts_with("gen-manifest ")).count(), 2);
  // The engine only ever saw templated copies.
  assert!(log.lines().filter(|l| l.starts_with("apply ")).all(|l| l.contains(".substituted-tmp.")));
}

#[test]
#[serial]
fn run_in_ci_emits_group_markers() {
  let temp = scenario_dir(TYPES);
  fake_cmd(&temp)
    .env("GITHUB_ACTIONS", "true")
    .args(["run", "--output", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains("::group::Applying empty.yaml to test resource deletion..."))
    .stdout(predicate::str::contains("::endgroup::"))
    .stdout(predicate::str::contains("\"total_ms\""));
}

#[test]
#[serial]
fn run_fails_on_missing_coverage() {
  let temp = scenario_dir(&TYPES[..7]);
  fake_cmd(&temp)
    .arg("run")
    .assert()
    .failure()
    .stderr(predicate::str::contains("did not see resource type transformer created"));
}

#[test]
fn run_without_tenant_url_fails_before_engine() {
  let temp = scenario_dir(TYPES);
  let mut cmd = e2e_cmd();
  cmd
    .env("FAKE_UCCONFIG_STATE", temp.path().join("state"))
    .args(["--engine", "/bin/sh", "--engine-arg"])
    .arg(fake_engine())
    .arg("--manifest-dir")
    .arg(temp.path().join("manifests"))
    .arg("run")
    .assert()
    .failure()
    .stderr(predicate::str::contains("USERCLOUDS_TENANT_URL"));
  assert!(calls(&temp).is_empty());
}

#[test]
fn apply_then_check_then_roundtrip() {
  let temp = scenario_dir(TYPES);
  fake_cmd(&temp)
    .args(["apply", "lots-of-resources.yaml", "--expect", "created"])
    .assert()
    .success()
    .stdout(predicate::str::contains("userclouds_transformer.e2e will be created"));
  fake_cmd(&temp).args(["check", "lots-of-resources.yaml"]).assert().success();
  fake_cmd(&temp).args(["roundtrip", "lots-of-resources.yaml"]).assert().success();
}

#[test]
fn check_reports_unexpected_diff() {
  let temp = scenario_dir(TYPES);
  fake_cmd(&temp)
    .args(["check", "lots-of-resources.yaml"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("reported changes"));
}

#[test]
fn roundtrip_reports_manifest_drift() {
  let temp = scenario_dir(TYPES);
  fake_cmd(&temp).args(["apply", "empty.yaml"]).assert().success();
  fake_cmd(&temp)
    .args(["roundtrip", "lots-of-resources.yaml"])
    .assert()
    .failure()
    .stdout(predicate::str::contains("Running gen-manifest modified the manifest:"));
}

#[test]
fn extra_args_are_forwarded() {
  let temp = scenario_dir(TYPES);
  fake_cmd(&temp)
    .args(["--extra-arg", "--tf-provider-version-constraint", "--extra-arg", "= 0.1.8"])
    .args(["apply", "empty.yaml"])
    .assert()
    .success();
  assert!(calls(&temp).contains("--auto-approve --tf-provider-version-constraint = 0.1.8"));
}
