//! Generic external-command execution.

use std::process::{Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;

/// Default timeout for quick cloud CLI calls (group create, account checks).
pub const DEFAULT_CMD_TIMEOUT: Duration = Duration::from_secs(120);

/// Command execution with an optional timeout and guaranteed process kill.
///
/// This trait is NOT tied to any one CLI — it can run any external command.
/// The production implementation uses tokio; test doubles return canned
/// results without spawning processes.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a command under the runner's default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run a command with no client-side timeout at all.
    ///
    /// Long cloud round-trips (VM creation, remote command execution) own
    /// their completion signal; the caller blocks for their full duration.
    async fn run_unbounded(&self, program: &str, args: &[&str]) -> Result<Output>;
}

/// Production `CommandRunner` — uses tokio for async process execution
/// with guaranteed timeout and kill on all platforms.
///
/// On Windows, `tokio::time::timeout` around `.output().await` does NOT kill
/// the child process when the timeout fires — the future is dropped but the
/// OS process keeps running. This implementation uses `tokio::select!` with
/// explicit `child.kill()` to guarantee the process is terminated.
pub struct TokioCommandRunner {
    timeout: Duration,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TokioCommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_CMD_TIMEOUT)
    }
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        run_inner(program, args, Some(self.timeout)).await
    }

    async fn run_unbounded(&self, program: &str, args: &[&str]) -> Result<Output> {
        run_inner(program, args, None).await
    }
}

async fn run_inner(program: &str, args: &[&str], timeout: Option<Duration>) -> Result<Output> {
    let mut child = tokio::process::Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("failed to spawn {program}"))?;

    let mut stdout_handle = child.stdout.take();
    let mut stderr_handle = child.stderr.take();

    // Read stdout/stderr CONCURRENTLY with wait() to avoid pipe deadlock.
    // If the child writes more than the OS pipe buffer (64KB Linux, 4KB
    // some Windows configs), it blocks on write. If we only call
    // child.wait() first, wait() never resolves → deadlock.
    let collect = async {
        let (status, stdout, stderr) = tokio::join!(
            child.wait(),
            async {
                let mut buf = Vec::new();
                if let Some(ref mut h) = stdout_handle {
                    let _ = h.read_to_end(&mut buf).await;
                }
                buf
            },
            async {
                let mut buf = Vec::new();
                if let Some(ref mut h) = stderr_handle {
                    let _ = h.read_to_end(&mut buf).await;
                }
                buf
            },
        );
        Ok(Output {
            status: status.with_context(|| format!("waiting for {program}"))?,
            stdout,
            stderr,
        })
    };

    match timeout {
        None => collect.await,
        Some(limit) => {
            tokio::select! {
                result = collect => result,
                () = tokio::time::sleep(limit) => {
                    let _ = child.kill().await;
                    anyhow::bail!("{program} timed out after {}s", limit.as_secs())
                }
            }
        }
    }
}
