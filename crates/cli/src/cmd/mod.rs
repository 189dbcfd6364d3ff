mod apply;
mod catalog;
mod check;
mod roundtrip;
mod run;
mod validate;

pub use apply::{Expect, cmd_apply};
pub use catalog::cmd_catalog;
pub use check::cmd_check;
pub use roundtrip::cmd_roundtrip;
pub use run::cmd_run;
pub use validate::cmd_validate;
