//! Manifest handling.
//!
//! Manifests are read-only inputs. The harness parses them only far enough to
//! check portability, and materializes templated copies next to the original
//! so that relative `@FILE(...)` references keep resolving.

mod template;
mod types;
mod validate;

pub use template::{TemplatedManifest, substitute_placeholder};
pub use types::*;
pub use validate::{validate, validate_manifest};
