//! Test utilities for ucconfig-e2e-lib.
//!
//! Provides shell helpers and [`FakeEngine`], a POSIX shell script standing in
//! for the config engine. It honors the engine's command-line contract and
//! keeps its "live state" in a temp directory:
//!
//! - `apply <m> --auto-approve` prints every `# plan: ...` line of the
//!   manifest, then records the manifest and its `<stem>_values` directory as
//!   the live state.
//! - `apply <m> --dry-run` prints the no-changes sentinel (colored) when the
//!   manifest equals the live state, otherwise the plan lines.
//! - `gen-manifest <out>` writes the live manifest and value files back.
//!
//! Manifests can steer it with `# fake: fail` (apply exits 1) and
//! `# fake: gen-drift` (gen-manifest alters what it writes).

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::HarnessConfig;
use crate::consts::TEMPLATED_MARKER;
use crate::engine::Engine;

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}

const FAKE_ENGINE_SCRIPT: &str = r##"#!/bin/sh
state="__STATE__"
echo "$*" >> "$state/calls.log"
case "$1" in
  apply)
    manifest="$2"
    mode="$3"
    cp "$manifest" "$state/last_applied"
    if grep -q '^# fake: fail' "$manifest"; then
      echo "apply failed"
      exit 1
    fi
    if [ "$mode" = "--dry-run" ]; then
      if cmp -s "$manifest" "$state/manifest"; then
        printf '\033[1mNo changes.\033[0m Your infrastructure matches the configuration.\n'
      else
        echo "Planned changes:"
        sed -n 's/^# plan: //p' "$manifest"
      fi
      exit 0
    fi
    sed -n 's/^# plan: //p' "$manifest"
    cp "$manifest" "$state/manifest"
    base=$(basename "$manifest")
    stem=${base%%.substituted-tmp.*}
    if [ "$stem" = "$base" ]; then stem=${base%.*}; fi
    values="$(dirname "$manifest")/${stem}_values"
    rm -rf "$state/values"
    if [ -d "$values" ]; then cp -R "$values" "$state/values"; fi
    echo "Apply complete!"
    ;;
  gen-manifest)
    out="$2"
    base=$(basename "$out")
    stem=${base%.*}
    v="$(dirname "$out")/${stem}_values"
    cp "$state/manifest" "$out"
    rm -rf "$v"
    mkdir -p "$v"
    if [ -d "$state/values" ]; then cp -R "$state/values/." "$v/"; fi
    if grep -q '^# fake: gen-drift' "$state/manifest"; then
      echo "# drifted" >> "$out"
      first=$(ls "$v" | head -n 1)
      last=$(ls "$v" | tail -n 1)
      if [ -n "$first" ]; then rm "$v/$first"; fi
      if [ -n "$last" ] && [ "$last" != "$first" ]; then echo "// drifted" >> "$v/$last"; fi
      echo "// new" > "$v/created_by_gen.js"
    fi
    echo "Wrote manifest: $out"
    ;;
  *)
    echo "unknown command: $1" >&2
    exit 2
    ;;
esac
"##;

/// Scripted stand-in for the config engine, isolated in a temp directory.
pub struct FakeEngine {
  pub temp: TempDir,
}

impl Default for FakeEngine {
  fn default() -> Self {
    Self::new()
  }
}

impl FakeEngine {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let state = temp.path().join("state");
    std::fs::create_dir_all(&state).unwrap();
    std::fs::create_dir_all(temp.path().join("manifests")).unwrap();
    std::fs::write(state.join("manifest"), "resources: []\n").unwrap();
    let script = FAKE_ENGINE_SCRIPT.replace("__STATE__", &state.to_string_lossy());
    std::fs::write(temp.path().join("ucconfig.sh"), script).unwrap();
    Self { temp }
  }

  /// Directory the scenario manifests are written to.
  pub fn manifest_dir(&self) -> PathBuf {
    self.temp.path().join("manifests")
  }

  pub fn script_path(&self) -> PathBuf {
    self.temp.path().join("ucconfig.sh")
  }

  /// Engine handle running the script through `/bin/sh`.
  ///
  /// Going through the shell avoids exec'ing a freshly written file, which can
  /// fail with ETXTBSY while other test threads fork.
  pub fn engine(&self, extra_args: Vec<String>) -> Engine {
    Engine::new("/bin/sh", extra_args).with_leading_args(vec![self.script_path().to_string_lossy().into_owned()])
  }

  /// Harness configuration pointed at this fake.
  pub fn config(&self) -> HarnessConfig {
    HarnessConfig {
      engine: PathBuf::from("/bin/sh"),
      engine_args: vec![self.script_path().to_string_lossy().into_owned()],
      manifest_dir: self.manifest_dir(),
      tenant_url: Some("https://acme-prod.tenant.userclouds.com".to_string()),
      ..HarnessConfig::default()
    }
  }

  pub fn write_manifest(&self, name: &str, content: &str) -> PathBuf {
    let path = self.manifest_dir().join(name);
    std::fs::write(&path, content).unwrap();
    path
  }

  /// Write a value file into `<manifest stem>_values/`.
  pub fn write_value_file(&self, manifest_name: &str, file: &str, content: &str) -> PathBuf {
    let stem = Path::new(manifest_name).file_stem().unwrap().to_string_lossy().into_owned();
    let dir = self.manifest_dir().join(format!("{stem}_values"));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(file);
    std::fs::write(&path, content).unwrap();
    path
  }

  /// Arguments of every engine invocation so far, one string per call.
  pub fn calls(&self) -> Vec<String> {
    std::fs::read_to_string(self.temp.path().join("state").join("calls.log"))
      .map(|log| log.lines().map(str::to_string).collect())
      .unwrap_or_default()
  }

  /// Contents of the manifest most recently passed to apply.
  pub fn last_applied(&self) -> String {
    std::fs::read_to_string(self.temp.path().join("state").join("last_applied")).unwrap_or_default()
  }

  /// Templated copies still present in the manifest directory.
  pub fn leftover_templated(&self) -> Vec<String> {
    std::fs::read_dir(self.manifest_dir())
      .unwrap()
      .filter_map(|e| e.ok())
      .map(|e| e.file_name().to_string_lossy().into_owned())
      .filter(|name| name.contains(TEMPLATED_MARKER))
      .collect()
  }

  /// Single-resource portable manifest whose apply plans a creation.
  pub fn portable_manifest(type_suffix: &str, manifest_id: &str) -> String {
    manifest_with(&[(type_suffix, manifest_id, "will be created")])
  }
}

/// Portable manifest with one resource per `(type, id, plan phrase)` entry.
pub fn manifest_with(resources: &[(&str, &str, &str)]) -> String {
  if resources.is_empty() {
    return "resources: []\n".to_string();
  }
  let mut out = String::new();
  for (type_suffix, id, phrase) in resources {
    out.push_str(&format!("# plan: userclouds_{type_suffix}.{id} {phrase}\n"));
  }
  out.push_str("resources:\n");
  for (i, (type_suffix, id, _)) in resources.iter().enumerate() {
    out.push_str(&format!(
      "  - uc_terraform_type: {type_suffix}\n    manifest_id: {id}\n    resource_uuids:\n      __DEFAULT: 00000000-0000-0000-0000-{i:012}\n      \"<<TARGET_FQTN>>\": 00000000-0000-0000-0000-{i:012}\n"
    ));
  }
  out
}
