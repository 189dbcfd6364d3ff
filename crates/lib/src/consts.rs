//! Fixed names shared between the harness and the config engine it drives.

/// Token that portable manifests use in place of the target's FQTN.
pub const TARGET_FQTN_PLACEHOLDER: &str = "<<TARGET_FQTN>>";

/// Environment variable holding the tenant URL the engine is pointed at.
pub const TENANT_URL_ENV: &str = "USERCLOUDS_TENANT_URL";

/// Environment variable set by GitHub Actions runners.
pub const CI_ENV: &str = "GITHUB_ACTIONS";

/// Default config engine executable, looked up on `PATH`.
pub const DEFAULT_ENGINE: &str = "ucconfig";

/// Default directory holding the scenario manifests.
pub const DEFAULT_MANIFEST_DIR: &str = "e2e-test";

/// Sentence printed by `apply --dry-run` when live state already matches.
pub const DEFAULT_NO_CHANGES_SENTINEL: &str = "No changes. Your infrastructure matches the configuration.";

/// Prefix the engine puts in front of every resource type suffix when it names
/// resources in plan output (`userclouds_<suffix>.<identifier>`).
pub const DEFAULT_RESOURCE_PREFIX: &str = "userclouds_";

/// Suffix appended to a manifest's stem to name its value-file directory.
pub const VALUES_DIR_SUFFIX: &str = "_values";

/// Marker embedded in the names of templated manifest copies.
pub const TEMPLATED_MARKER: &str = ".substituted-tmp.";
