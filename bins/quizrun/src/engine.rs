/// Process Engine - Out-of-Process Artifact Execution
///
/// **Core Responsibility:**
/// Run an injected artifact in a fresh child process and capture its stdout.
///
/// **Critical Architectural Boundary:**
/// - Engine knows HOW to execute (interpreter, process lifecycle)
/// - Engine does NOT know expected outputs
/// - Engine returns raw stdout for the Evaluator to judge
///
/// **Cleanup Guarantee:**
/// The artifact is owned by an `ArtifactGuard` from before the spawn until the
/// engine returns, so it is removed exactly once on success, failure, timeout,
/// or if the future is dropped mid-flight.

use quizrun_common::config::{GraderConfig, RuntimeConfig};
use quizrun_common::{GradeError, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Artifact cleanup guard - removes the artifact file on drop
pub struct ArtifactGuard {
    path: PathBuf,
}

impl ArtifactGuard {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ArtifactGuard {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(artifact = %self.path.display(), "Artifact removed"),
            Err(e) => warn!(artifact = %self.path.display(), error = %e, "Failed to remove artifact"),
        }
    }
}

pub struct ProcessEngine {
    runtime: RuntimeConfig,
    timeout: Option<Duration>,
}

impl ProcessEngine {
    pub fn new(config: &GraderConfig) -> Self {
        Self {
            runtime: config.runtime.clone(),
            timeout: config.timeout_ms.map(Duration::from_millis),
        }
    }

    /// Execute the artifact and return its captured stdout, untrimmed
    ///
    /// ## Errors
    /// * `Execution` - spawn failure or non-zero exit, carrying stderr
    /// * `ExecutionTimeout` - only when a timeout is configured
    pub async fn run(&self, artifact: PathBuf) -> Result<String> {
        let guard = ArtifactGuard::new(artifact);
        self.run_guarded(&guard).await
    }

    async fn run_guarded(&self, guard: &ArtifactGuard) -> Result<String> {
        let artifact = guard.path();

        let mut command = Command::new(&self.runtime.command);
        command
            .args(&self.runtime.args)
            .arg(artifact)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|e| GradeError::Execution {
            artifact: artifact.to_path_buf(),
            status: format!("failed to spawn '{}'", self.runtime.command),
            stderr: e.to_string(),
        })?;

        let start = Instant::now();
        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(output) => output,
                Err(_) => {
                    // The child future is dropped here and kill_on_drop reaps it
                    warn!(
                        artifact = %artifact.display(),
                        timeout_ms = limit.as_millis() as u64,
                        "Execution timed out - killing process"
                    );
                    return Err(GradeError::ExecutionTimeout {
                        artifact: artifact.to_path_buf(),
                        timeout_ms: limit.as_millis() as u64,
                    });
                }
            },
            None => child.wait_with_output().await,
        }
        .map_err(|e| GradeError::Execution {
            artifact: artifact.to_path_buf(),
            status: "failed to collect output".to_string(),
            stderr: e.to_string(),
        })?;

        let execution_ms = start.elapsed().as_millis() as u64;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            warn!(
                artifact = %artifact.display(),
                exit_code = ?output.status.code(),
                execution_ms,
                "Candidate process failed"
            );
            return Err(GradeError::Execution {
                artifact: artifact.to_path_buf(),
                status: output.status.to_string(),
                stderr,
            });
        }

        info!(
            artifact = %artifact.display(),
            execution_ms,
            stdout_bytes = stdout.len(),
            "Candidate process exited successfully"
        );
        Ok(stdout)
    }
}
