use std::{fmt, fs, io, path::Path};

use crate::{error::ScaffoldError, project::Project, rewrite, tools::Toolchain};

/// Where a scaffolding run is, or where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Cloning,
    Rewriting,
    ResettingHistory,
    Tidying,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Cloning => "cloning",
            Stage::Rewriting => "rewriting imports",
            Stage::ResettingHistory => "resetting history",
            Stage::Tidying => "tidying dependencies",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Clones the template, renames its imports, gives it a fresh history and tidies
/// its dependencies. The first failing step ends the run; completed steps are not undone.
pub async fn run(project: &Project, tools: &dyn Toolchain) -> Result<(), ScaffoldError> {
    let dir = project.target_dir.as_path();

    log::info!("{}: {} into {}", Stage::Cloning, project.repo_url, dir.display());
    ensure_clonable(dir)?;
    tools
        .clone_repo(&project.repo_url, dir)
        .await
        .map_err(ScaffoldError::Clone)?;

    log::info!(
        "{}: {} -> {}",
        Stage::Rewriting,
        project.old_import,
        project.new_import
    );
    let rewritten = rewrite::replace_imports_in_dir(dir, &project.old_import, &project.new_import)?;
    log::debug!("{rewritten} files rewritten");

    log::info!("{}: removing .git folder", Stage::ResettingHistory);
    remove_history(dir)?;
    log::info!("{}: initializing new git repo", Stage::ResettingHistory);
    tools.init_repo(dir).await.map_err(ScaffoldError::InitRepo)?;

    log::info!("{}: running go mod tidy", Stage::Tidying);
    tools
        .tidy_dependencies(dir)
        .await
        .map_err(ScaffoldError::Tidy)?;

    log::info!("{}: {} is ready", Stage::Done, dir.display());
    Ok(())
}

/// A clone may only land in a missing or empty directory.
fn ensure_clonable(dir: &Path) -> Result<(), ScaffoldError> {
    let unreadable = |source: io::Error| ScaffoldError::DestinationUnreadable {
        path: dir.to_path_buf(),
        source,
    };
    match fs::read_dir(dir) {
        Ok(mut entries) => match entries.next() {
            None => Ok(()),
            Some(Ok(_)) => Err(ScaffoldError::DestinationNotEmpty(dir.to_path_buf())),
            Some(Err(e)) => Err(unreadable(e)),
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(unreadable(e)),
    }
}

fn remove_history(dir: &Path) -> Result<(), ScaffoldError> {
    let git_dir = dir.join(".git");
    match fs::remove_dir_all(&git_dir) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(ScaffoldError::RemoveHistory {
            path: git_dir,
            source: e,
        }),
        _ => Ok(()),
    }
}
