//! Builder for executing external tool commands.
//!
//! Two execution modes are provided: [`ToolCommand::execute`] captures all
//! output and fails on a non-zero exit, while
//! [`ToolCommand::execute_with_progress`] streams stdout, relaying progress
//! lines to a callback until the process exits.

use crate::{Error, Result};
use std::ffi::{OsStr, OsString};
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// How long to wait for output before checking whether the process exited.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Output captured from a tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit status.
    pub status: ExitStatus,
    /// Captured standard output (lossy UTF-8). Progress lines are not included
    /// when running with [`ToolCommand::execute_with_progress`].
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

/// A builder for constructing and executing external tool invocations.
///
/// # Example
///
/// ```no_run
/// use mkvstrip_av::ToolCommand;
///
/// let output = ToolCommand::new("mkvmerge")
///     .arg("--identify")
///     .arg("--identification-format")
///     .arg("json")
///     .arg("/path/to/video.mkv")
///     .execute()?;
/// println!("{}", output.stdout);
/// # Ok::<(), mkvstrip_av::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
    poll_interval: Duration,
}

impl ToolCommand {
    /// Create a new command for the given program path.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl AsRef<OsStr>) -> &mut Self {
        self.args.push(s.as_ref().to_os_string());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl AsRef<OsStr>>) -> &mut Self {
        self.args
            .extend(iter.into_iter().map(|s| s.as_ref().to_os_string()));
        self
    }

    /// Set how often a streaming execution checks for process exit.
    pub fn poll_interval(&mut self, d: Duration) -> &mut Self {
        self.poll_interval = d;
        self
    }

    fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }

    fn spawn_error(&self, e: std::io::Error) -> Error {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::tool_not_found(self.program.to_string_lossy())
        } else {
            Error::tool_failed(self.program_name(), format!("failed to spawn: {e}"))
        }
    }

    /// Execute the command, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// - Returns [`Error::ToolNotFound`] if the program does not exist.
    /// - Returns [`Error::ToolFailed`] if the process exits with a non-zero
    ///   status (message includes stderr, or stdout when stderr is empty).
    pub fn execute(&self) -> Result<ToolOutput> {
        #[cfg(feature = "tracing")]
        tracing::debug!(program = ?self.program, args = ?self.args, "Running tool");

        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        let tool_output = ToolOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        if !output.status.success() {
            let detail = if tool_output.stderr.trim().is_empty() {
                tool_output.stdout.trim()
            } else {
                tool_output.stderr.trim()
            };
            return Err(Error::tool_failed(
                self.program_name(),
                format!("exited with status {}: {}", output.status, detail),
            ));
        }

        Ok(tool_output)
    }

    /// Execute the command, streaming its stdout.
    ///
    /// Output is split on both `\n` and `\r`, since mkvmerge redraws its
    /// progress in place. Every line containing "progress" (case-insensitive)
    /// is passed to `on_progress`; all other lines are collected into
    /// [`ToolOutput::stdout`]. The process is checked for exit once per poll
    /// interval. The exit status is returned as-is; interpreting it is up to
    /// the caller.
    pub fn execute_with_progress(&self, on_progress: &mut dyn FnMut(&str)) -> Result<ToolOutput> {
        #[cfg(feature = "tracing")]
        tracing::debug!(program = ?self.program, args = ?self.args, "Running tool with progress");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::tool_failed(self.program_name(), "stdout was not captured"))?;

        let (tx, rx) = mpsc::channel::<String>();
        let reader = thread::spawn(move || {
            for_each_line(stdout, |line| tx.send(line).is_ok());
        });

        let mut collected = Vec::new();
        let mut relay = |line: String| {
            if line.to_lowercase().contains("progress") {
                on_progress(line.trim());
            } else {
                collected.push(line);
            }
        };

        let status = loop {
            match rx.recv_timeout(self.poll_interval) {
                Ok(line) => relay(line),
                Err(RecvTimeoutError::Timeout) => {}
                // Output closed before the process exited.
                Err(RecvTimeoutError::Disconnected) => thread::sleep(self.poll_interval),
            }

            if let Some(status) = child.try_wait()? {
                break status;
            }
        };

        let _ = reader.join();
        for line in rx.try_iter() {
            relay(line);
        }

        Ok(ToolOutput {
            status,
            stdout: collected.join("\n"),
            stderr: String::new(),
        })
    }
}

/// Feed every `\n`- or `\r`-terminated line of `source` to `f` as soon as
/// its terminator arrives. Empty lines are skipped. Reading stops early
/// when `f` returns false.
fn for_each_line(source: impl Read, mut f: impl FnMut(String) -> bool) {
    let mut reader = BufReader::new(source);
    let mut pending = Vec::new();

    loop {
        let (consumed, complete) = match reader.fill_buf() {
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Ok([]) | Err(_) => break,
            Ok(buf) => match buf.iter().position(|b| matches!(b, b'\n' | b'\r')) {
                Some(end) => {
                    pending.extend_from_slice(&buf[..end]);
                    (end + 1, true)
                }
                None => {
                    pending.extend_from_slice(buf);
                    (buf.len(), false)
                }
            },
        };
        reader.consume(consumed);

        if complete && !pending.is_empty() {
            let line = String::from_utf8_lossy(&pending).into_owned();
            pending.clear();
            if !f(line) {
                return;
            }
        }
    }

    if !pending.is_empty() {
        f(String::from_utf8_lossy(&pending).into_owned());
    }
}


#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::time::Instant;

    #[test]
    fn execute_echo() {
        let output = ToolCommand::new("echo").arg("hello").execute().unwrap();
        assert!(output.status.success());
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[test]
    fn execute_nonexistent_tool() {
        let result = ToolCommand::new("nonexistent_tool_xyz_12345").execute();
        assert_matches!(result, Err(Error::ToolNotFound { .. }));
    }

    #[test]
    fn execute_failure_reports_status() {
        let result = ToolCommand::new("sh")
            .args(["-c", "echo broken >&2; exit 3"])
            .execute();
        assert_matches!(result, Err(Error::ToolFailed { ref message, .. }) if message.contains("broken"));
    }

    #[test]
    fn execute_with_progress_relays_progress_lines() {
        let mut seen = Vec::new();
        let output = ToolCommand::new("sh")
            .args([
                "-c",
                "echo 'Muxing'; echo 'Progress: 50%'; echo 'progress: 100%'; echo done",
            ])
            .poll_interval(Duration::from_millis(10))
            .execute_with_progress(&mut |line: &str| seen.push(line.to_string()))
            .unwrap();

        assert!(output.status.success());
        assert_eq!(seen, vec!["Progress: 50%", "progress: 100%"]);
        assert_eq!(output.stdout, "Muxing\ndone");
    }

    #[test]
    fn execute_with_progress_relays_in_place_updates_as_they_arrive() {
        let start = Instant::now();
        let mut seen = Vec::new();
        ToolCommand::new("sh")
            .args([
                "-c",
                "printf 'Progress: 10%%\\r'; sleep 1; printf 'Progress: 100%%\\r\\n'",
            ])
            .poll_interval(Duration::from_millis(10))
            .execute_with_progress(&mut |line: &str| {
                seen.push((line.to_string(), start.elapsed()));
            })
            .unwrap();

        let lines: Vec<_> = seen.iter().map(|(line, _)| line.as_str()).collect();
        assert_eq!(lines, vec!["Progress: 10%", "Progress: 100%"]);
        // The first update is relayed before the tool finishes
        assert!(seen[1].1 - seen[0].1 >= Duration::from_millis(500));
    }

    #[test]
    fn execute_with_progress_returns_failure_status() {
        let output = ToolCommand::new("sh")
            .args(["-c", "echo 'Progress: 10%'; exit 2"])
            .poll_interval(Duration::from_millis(10))
            .execute_with_progress(&mut |_: &str| {})
            .unwrap();

        assert_eq!(output.status.code(), Some(2));
    }
}
