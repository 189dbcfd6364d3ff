//! Step headers on the console.

use owo_colors::{OwoColorize, Stream};

/// Brackets a step's console output for the lifetime of the guard.
///
/// Under CI the step is wrapped in `::group::` / `::endgroup::` markers so the
/// log viewer can fold it. Otherwise the header is printed in yellow. The end
/// marker is written on drop, so it also appears when the step fails.
pub struct StepGroup {
  ci: bool,
}

impl StepGroup {
  pub fn open(message: &str, ci: bool) -> Self {
    println!("{}", header(message, ci));
    Self { ci }
  }
}

impl Drop for StepGroup {
  fn drop(&mut self) {
    if let Some(footer) = footer(self.ci) {
      println!("{footer}");
    }
  }
}

fn header(message: &str, ci: bool) -> String {
  if ci {
    format!("::group::{message}")
  } else {
    message.if_supports_color(Stream::Stdout, |m| m.bright_yellow()).to_string()
  }
}

fn footer(ci: bool) -> Option<&'static str> {
  ci.then_some("::endgroup::")
}
