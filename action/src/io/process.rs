//! Fixer subprocess invocation under a deadline.
//!
//! The child's stdin is closed and both output streams are drained on their
//! own threads, keeping at most `capture_limit` bytes each. How the child
//! ended is reported as an [`Invocation`]; `Err` is reserved for failures of
//! the plumbing itself (waiting, killing, reading).

use std::io::{self, Read};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, warn};
use wait_timeout::ChildExt;

/// Bytes kept from one output stream and the count of bytes dropped past the limit.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Captured {
    pub kept: Vec<u8>,
    pub dropped: u64,
}

impl Captured {
    pub fn overflowed(&self) -> bool {
        self.dropped > 0
    }

    /// Trimmed lossy text for log lines.
    pub fn text(&self) -> String {
        let text = String::from_utf8_lossy(&self.kept).trim().to_string();
        if self.overflowed() {
            format!("{text} [{} more bytes dropped]", self.dropped)
        } else {
            text
        }
    }
}

/// How one fixer invocation ended.
#[derive(Debug)]
pub enum Invocation {
    /// The program could not be started (missing binary, permissions).
    NotStarted(io::Error),
    /// Still running at the deadline and killed. Its output is discarded.
    TimedOut { deadline: Duration },
    /// Exited on its own. `code` is `None` when a signal ended it.
    Exited {
        code: Option<i32>,
        stdout: Captured,
        stderr: Captured,
    },
}

/// Start `cmd`, wait up to `deadline`, and classify how it ended.
pub fn invoke(mut cmd: Command, deadline: Duration, capture_limit: usize) -> Result<Invocation> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(err) => return Ok(Invocation::NotStarted(err)),
    };
    let stdout = Drain::start(child.stdout.take(), capture_limit)?;
    let stderr = Drain::start(child.stderr.take(), capture_limit)?;

    let Some(status) = child.wait_timeout(deadline).context("wait for fixer")? else {
        warn!(?deadline, "fixer still running at deadline, killing");
        child.kill().context("kill fixer")?;
        child.wait().context("reap fixer")?;
        // Grandchildren may still hold the pipes open; leave the drains detached.
        return Ok(Invocation::TimedOut { deadline });
    };

    let stdout = stdout.finish().context("capture fixer stdout")?;
    let stderr = stderr.finish().context("capture fixer stderr")?;
    debug!(
        exit_code = ?status.code(),
        stdout_bytes = stdout.kept.len(),
        stdout_dropped = stdout.dropped,
        "fixer exited"
    );
    Ok(Invocation::Exited {
        code: status.code(),
        stdout,
        stderr,
    })
}

/// Background reader for one child stream.
struct Drain(JoinHandle<io::Result<Captured>>);

impl Drain {
    fn start<R>(stream: Option<R>, limit: usize) -> Result<Self>
    where
        R: Read + Send + 'static,
    {
        let stream = stream.ok_or_else(|| anyhow!("fixer stream was not piped"))?;
        Ok(Self(thread::spawn(move || capture(stream, limit))))
    }

    fn finish(self) -> Result<Captured> {
        self.0
            .join()
            .map_err(|_| anyhow!("output drain thread panicked"))?
            .context("read fixer output")
    }
}

/// Read `stream` to the end, keeping the first `limit` bytes.
fn capture<R: Read>(stream: R, limit: usize) -> io::Result<Captured> {
    let mut head = stream.take(u64::try_from(limit).unwrap_or(u64::MAX));
    let mut kept = Vec::new();
    head.read_to_end(&mut kept)?;
    let dropped = io::copy(&mut head.into_inner(), &mut io::sink())?;
    Ok(Captured { kept, dropped })
}
