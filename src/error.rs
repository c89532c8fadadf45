use std::{io, path::PathBuf, process::ExitStatus};

use thiserror::Error;

use crate::pipeline::Stage;

/// Failure of an external command-line tool.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unable to start `{program}`: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("lost track of `{program}`: {source}")]
    Wait {
        program: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("`{program}` exited with {status}")]
    Exit {
        program: &'static str,
        status: ExitStatus,
    },
    #[error("`{program}` interrupted by shutdown signal")]
    Cancelled { program: &'static str },
}

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("clone failed: destination {} already exists and is not empty", .0.display())]
    DestinationNotEmpty(PathBuf),
    #[error("clone failed: unable to inspect destination {}: {source}", .path.display())]
    DestinationUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("clone failed: {0}")]
    Clone(#[source] ToolError),

    #[error("replace imports failed: {}: {source}", .path.display())]
    Rewrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("remove .git failed: {}: {source}", .path.display())]
    RemoveHistory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("git init failed: {0}")]
    InitRepo(#[source] ToolError),

    #[error("go mod tidy failed: {0}")]
    Tidy(#[source] ToolError),
}

impl ScaffoldError {
    /// The pipeline stage that produced this error.
    pub fn stage(&self) -> Stage {
        match self {
            ScaffoldError::DestinationNotEmpty(_)
            | ScaffoldError::DestinationUnreadable { .. }
            | ScaffoldError::Clone(_) => Stage::Cloning,
            ScaffoldError::Rewrite { .. } => Stage::Rewriting,
            ScaffoldError::RemoveHistory { .. } | ScaffoldError::InitRepo(_) => {
                Stage::ResettingHistory
            }
            ScaffoldError::Tidy(_) => Stage::Tidying,
        }
    }

    /// True when the failure was caused by a shutdown signal rather than the tool itself.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            ScaffoldError::Clone(ToolError::Cancelled { .. })
                | ScaffoldError::InitRepo(ToolError::Cancelled { .. })
                | ScaffoldError::Tidy(ToolError::Cancelled { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failed_step() {
        let err = ScaffoldError::Tidy(ToolError::Cancelled { program: "go" });
        assert_eq!(
            err.to_string(),
            "go mod tidy failed: `go` interrupted by shutdown signal"
        );
        assert_eq!(err.stage(), Stage::Tidying);
        assert!(err.is_cancelled());

        let err = ScaffoldError::DestinationNotEmpty(PathBuf::from("/tmp/acme-service"));
        assert!(err.to_string().starts_with("clone failed:"));
        assert_eq!(err.stage(), Stage::Cloning);
        assert!(!err.is_cancelled());
    }
}
