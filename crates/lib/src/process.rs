//! Process runner.
//!
//! Runs an external command, echoing each line of its combined stdout/stderr
//! to the console as it arrives while accumulating a de-colorized copy for
//! pattern matching.

use std::ffi::OsStr;
use std::io::{self, BufRead, BufReader, Read};
use std::process::{ExitStatus, Stdio};
use std::sync::LazyLock;

use regex::Regex;
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::{HarnessError, Result};

static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\x1B(?:[@-Z\\-_]|\[[0-?]*[ -/]*[@-~])").expect("ANSI escape pattern is valid")
});

/// Remove ANSI escape sequences (colors, cursor movement) from text.
pub fn strip_ansi(text: &str) -> String {
  ANSI_ESCAPE.replace_all(text, "").into_owned()
}

/// Where echoed lines go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Echo {
  /// Print each line to stdout as it arrives.
  #[default]
  Console,
  /// Capture only.
  Silent,
}

/// Captured result of one command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
  pub status: ExitStatus,
  /// Combined stdout and stderr with color codes removed.
  pub text: String,
}

impl CommandOutput {
  pub fn success(&self) -> bool {
    self.status.success()
  }
}

/// Run a command and return its de-colorized output.
///
/// Fails with [`HarnessError::ProcessFailure`] when the command exits non-zero.
pub async fn run<I, S>(program: impl AsRef<OsStr>, args: I) -> Result<String>
where
  I: IntoIterator<Item = S>,
  S: AsRef<OsStr>,
{
  let program = program.as_ref();
  let output = run_unchecked(program, args, Echo::Console).await?;
  if !output.success() {
    return Err(HarnessError::ProcessFailure {
      program: program.to_string_lossy().into_owned(),
      code: output.status.code(),
      output: output.text,
    });
  }
  Ok(output.text)
}

/// Run a command to completion regardless of its exit status.
///
/// stdout and stderr share one pipe, so the captured text keeps the order in
/// which the command wrote it.
pub async fn run_unchecked<I, S>(program: impl AsRef<OsStr>, args: I, echo: Echo) -> Result<CommandOutput>
where
  I: IntoIterator<Item = S>,
  S: AsRef<OsStr>,
{
  let program = program.as_ref();
  let args: Vec<_> = args.into_iter().map(|a| a.as_ref().to_os_string()).collect();
  let program_name = program.to_string_lossy().into_owned();
  let spawn_error = |source| HarnessError::Spawn {
    program: program_name.clone(),
    source,
  };

  info!(
    program = %program_name,
    args = ?args.iter().map(|a| a.to_string_lossy()).collect::<Vec<_>>(),
    "running command"
  );

  let (reader, writer) = io::pipe().map_err(spawn_error)?;
  let stderr_writer = writer.try_clone().map_err(spawn_error)?;
  // The command holds the write ends until dropped; drop it right after
  // spawning so the reader sees EOF once the child exits.
  let mut child = {
    let mut command = Command::new(program);
    command
      .args(&args)
      .stdin(Stdio::null())
      .stdout(writer)
      .stderr(stderr_writer)
      .kill_on_drop(true);
    command.spawn().map_err(spawn_error)?
  };

  let (tx, mut rx) = mpsc::unbounded_channel();
  let forwarder = tokio::task::spawn_blocking(move || forward_lines(reader, tx));

  let mut text = String::new();
  while let Some(line) = rx.recv().await {
    if echo == Echo::Console {
      println!("{line}");
    }
    text.push_str(&strip_ansi(&line));
    text.push('\n');
  }
  if let Err(e) = forwarder.await {
    warn!(program = %program_name, error = %e, "output reader task failed");
  }

  let status = child.wait().await.map_err(spawn_error)?;
  debug!(program = %program_name, code = ?status.code(), bytes = text.len(), "command finished");

  Ok(CommandOutput { status, text })
}

fn forward_lines(stream: impl Read, tx: mpsc::UnboundedSender<String>) {
  let mut reader = BufReader::new(stream);
  let mut buf = Vec::new();
  loop {
    buf.clear();
    match reader.read_until(b'\n', &mut buf) {
      Ok(0) => break,
      Ok(_) => {
        let decoded = String::from_utf8_lossy(&buf);
        let line = decoded.trim_end_matches(['\n', '\r']);
        if tx.send(line.to_string()).is_err() {
          break;
        }
      }
      Err(e) => {
        debug!(error = %e, "stopped reading command output");
        break;
      }
    }
  }
}
