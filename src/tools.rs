use std::{path::Path, process::Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use crate::error::ToolError;

const GIT: &str = "git";
const GO: &str = "go";

/// The external tools the pipeline drives.
#[async_trait]
pub trait Toolchain: Send + Sync {
    /// Clones `url` into `dest`, which must not exist or be empty.
    async fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), ToolError>;

    /// Creates an empty repository in `dir`.
    async fn init_repo(&self, dir: &Path) -> Result<(), ToolError>;

    /// Reconciles the module's declared dependencies in `dir` with its imports.
    async fn tidy_dependencies(&self, dir: &Path) -> Result<(), ToolError>;
}

/// Runs `git` and `go` from `PATH`, sharing the caller's terminal.
///
/// Every child is killed as soon as `shutdown` is cancelled.
#[derive(Debug, Clone)]
pub struct SystemToolchain {
    shutdown: CancellationToken,
}

impl SystemToolchain {
    pub fn new(shutdown: CancellationToken) -> Self {
        Self { shutdown }
    }

    fn command(program: &str) -> Command {
        let mut cmd = Command::new(program);
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        cmd
    }

    async fn exec(&self, program: &'static str, mut cmd: Command) -> Result<(), ToolError> {
        if self.shutdown.is_cancelled() {
            return Err(ToolError::Cancelled { program });
        }
        log::debug!("running {cmd:?}");
        let mut child = cmd
            .spawn()
            .map_err(|source| ToolError::Spawn { program, source })?;

        let finished = tokio::select! {
            status = child.wait() => Some(status),
            _ = self.shutdown.cancelled() => None,
        };

        match finished {
            Some(status) => {
                let status = status.map_err(|source| ToolError::Wait { program, source })?;
                if status.success() {
                    Ok(())
                } else {
                    Err(ToolError::Exit { program, status })
                }
            }
            None => {
                log::warn!("shutdown requested, stopping {program}");
                if let Err(e) = child.kill().await {
                    log::debug!("failed to kill {program}: {e}");
                }
                Err(ToolError::Cancelled { program })
            }
        }
    }
}

#[async_trait]
impl Toolchain for SystemToolchain {
    async fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), ToolError> {
        let mut cmd = Self::command(GIT);
        cmd.args(["clone", "--progress", "--"]).arg(url).arg(dest);
        self.exec(GIT, cmd).await
    }

    async fn init_repo(&self, dir: &Path) -> Result<(), ToolError> {
        let mut cmd = Self::command(GIT);
        cmd.arg("init").current_dir(dir);
        self.exec(GIT, cmd).await
    }

    async fn tidy_dependencies(&self, dir: &Path) -> Result<(), ToolError> {
        let mut cmd = Self::command(GO);
        cmd.args(["mod", "tidy"]).current_dir(dir);
        self.exec(GO, cmd).await
    }
}
