//! Subprocess execution with a wall-clock bound.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::error::Error;

const SECRET_FLAGS: [&str; 2] = ["--auth", "--token"];

/// How long output is still collected after the child exits. A background
/// process it left behind may hold the pipes open indefinitely.
const DRAIN_GRACE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub envs: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, cwd: &Path) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.to_path_buf(),
            envs: Vec::new(),
        }
    }

    /// `npx <args>` in `cwd`.
    pub fn npx(cwd: &Path) -> Self {
        Self::new("npx", cwd)
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn env_opt(self, key: &str, value: Option<&String>) -> Self {
        match value {
            Some(v) => self.env(key, v.clone()),
            None => self,
        }
    }

    /// Program and args as they would be typed. Environment values and the
    /// value after a secret-bearing flag are left out.
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.as_str()];
        let mut hide_next = false;
        for arg in &self.args {
            parts.push(if hide_next { "***" } else { arg.as_str() });
            hide_next = SECRET_FLAGS.contains(&arg.as_str());
        }
        parts.join(" ")
    }

    fn to_command(&self) -> Command {
        // npx and friends are .cmd shims on Windows
        let mut cmd = if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(&self.program);
            cmd
        } else {
            Command::new(&self.program)
        };
        cmd.args(&self.args)
            .current_dir(&self.cwd)
            .envs(self.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

impl CommandOutput {
    pub fn combined(&self) -> String {
        match (self.stdout.trim().is_empty(), self.stderr.trim().is_empty()) {
            (false, false) => format!("{}\n{}", self.stdout.trim_end(), self.stderr.trim_end()),
            (false, true) => self.stdout.trim_end().to_string(),
            (true, false) => self.stderr.trim_end().to_string(),
            (true, true) => String::new(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs the command to completion. Exceeding `timeout` kills the child and
    /// yields `Error::Timeout(timeout)`. A non-zero exit is not an error here.
    async fn run(&self, spec: &CommandSpec, timeout: Duration) -> Result<CommandOutput, Error>;
}

/// Reads a child pipe in the background into a shared buffer.
struct Capture {
    buffer: Arc<Mutex<Vec<u8>>>,
    task: JoinHandle<()>,
}

impl Capture {
    fn start<R>(pipe: Option<R>) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&buffer);
        let task = tokio::spawn(async move {
            let Some(mut pipe) = pipe else { return };
            let mut chunk = [0u8; 8192];
            loop {
                match pipe.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => {
                        if let Ok(mut buf) = sink.lock() {
                            buf.extend_from_slice(&chunk[..n]);
                        }
                    }
                }
            }
        });
        Self { buffer, task }
    }

    /// Waits up to `grace` for EOF, then returns whatever was read.
    async fn finish(self, grace: Duration) -> String {
        let abort = self.task.abort_handle();
        if tokio::time::timeout(grace, self.task).await.is_err() {
            abort.abort();
            warn!("Output pipe still open after exit, a background process may be holding it");
        }
        let bytes = self.buffer.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn abort(&self) {
        self.task.abort();
    }
}

pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, spec: &CommandSpec, timeout: Duration) -> Result<CommandOutput, Error> {
        debug!("Running `{}` in {}", spec.display(), spec.cwd.display());
        let start = Instant::now();
        let mut child = spec.to_command().spawn().map_err(|e| {
            Error::CommandFailed(format!("Failed to spawn `{}`: {e}", spec.display()))
        })?;
        let stdout = Capture::start(child.stdout.take());
        let stderr = Capture::start(child.stderr.take());

        // Returning early drops the child, which kills it
        let status = match tokio::time::timeout(timeout, child.wait()).await {
            Ok(status) => status?,
            Err(_) => {
                stdout.abort();
                stderr.abort();
                error!("`{}` timed out after {}s", spec.display(), timeout.as_secs());
                return Err(Error::Timeout(timeout));
            }
        };

        Ok(CommandOutput {
            success: status.success(),
            code: status.code(),
            stdout: stdout.finish(DRAIN_GRACE).await,
            stderr: stderr.finish(DRAIN_GRACE).await,
            elapsed: start.elapsed(),
        })
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;

    pub fn output(success: bool, stdout: &str) -> CommandOutput {
        CommandOutput {
            success,
            code: Some(if success { 0 } else { 1 }),
            stdout: stdout.to_string(),
            stderr: String::new(),
            elapsed: Duration::from_millis(5),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn sh(script: &str) -> CommandSpec {
        CommandSpec::new("sh", Path::new(".")).args(["-c", script])
    }

    #[tokio::test]
    async fn test_run_success_captures_output() {
        let out = ProcessRunner
            .run(&sh("echo hello; echo oops >&2"), Duration::from_secs(5))
            .await
            .unwrap();
        assert!(out.success);
        assert_eq!(out.code, Some(0));
        assert_eq!(out.stdout.trim(), "hello");
        assert_eq!(out.combined(), "hello\noops");
    }

    #[tokio::test]
    async fn test_run_nonzero_exit_is_not_error() {
        let out = ProcessRunner
            .run(&sh("exit 3"), Duration::from_secs(5))
            .await
            .unwrap();
        assert!(!out.success);
        assert_eq!(out.code, Some(3));
    }

    #[tokio::test]
    async fn test_run_passes_env() {
        let spec = sh("printf %s \"$DEPLOY_TEST_VALUE\"").env("DEPLOY_TEST_VALUE", "abc");
        let out = ProcessRunner.run(&spec, Duration::from_secs(5)).await.unwrap();
        assert_eq!(out.stdout, "abc");
    }

    #[tokio::test]
    async fn test_background_process_does_not_hold_the_step() {
        let start = Instant::now();
        let out = ProcessRunner
            .run(&sh("sleep 3 & echo started"), Duration::from_secs(10))
            .await
            .unwrap();
        assert!(out.success);
        assert_eq!(out.stdout.trim(), "started");
        assert!(start.elapsed() < Duration::from_secs(2), "{:?}", start.elapsed());
    }

    #[tokio::test]
    async fn test_large_output_is_fully_captured() {
        let out = ProcessRunner
            .run(&sh("seq 1 20000"), Duration::from_secs(10))
            .await
            .unwrap();
        assert_eq!(out.stdout.lines().count(), 20000);
        assert_eq!(out.stdout.lines().last(), Some("20000"));
    }

    #[tokio::test]
    async fn test_run_timeout_reports_bound() {
        let timeout = Duration::from_millis(200);
        let result = ProcessRunner.run(&sh("sleep 5"), timeout).await;
        assert_matches!(result, Err(Error::Timeout(t)) if t == timeout);
    }

    #[tokio::test]
    async fn test_run_missing_program() {
        let spec = CommandSpec::new("definitely-not-a-real-program-xyz", Path::new("."));
        let result = ProcessRunner.run(&spec, Duration::from_secs(5)).await;
        assert_matches!(result, Err(Error::CommandFailed(_)));
    }

    #[test]
    fn test_display_omits_env() {
        let spec = CommandSpec::npx(Path::new("."))
            .args(["surge", "dist", "site.surge.sh"])
            .env("SURGE_TOKEN", "secret");
        assert_eq!(spec.display(), "npx surge dist site.surge.sh");
    }

    #[test]
    fn test_display_masks_tokens() {
        let spec = CommandSpec::npx(Path::new("."))
            .args(["vercel", "deploy", "dist", "--token", "vc-secret", "--prod"]);
        assert_eq!(spec.display(), "npx vercel deploy dist --token *** --prod");
    }
}
