use clap::Parser;
use error::ScaffoldError;
use tokio_util::sync::CancellationToken;

use crate::project::Project;
use crate::tools::SystemToolchain;

mod args;
pub mod error;
mod logger;
pub mod pipeline;
pub mod project;
pub mod rewrite;
pub mod tools;

pub async fn builder() -> Result<(), ScaffoldError> {
    let args = args::Scaffold::parse();
    logger::init(&args.env, args.log_level);
    log::debug!("{args:?}");

    let shutdown = CancellationToken::new();
    tokio::spawn(cancel_on_signal(shutdown.clone()));

    let project = Project::new(args.repo_url, args.project, &args.dir);
    log::debug!("{project:?}");

    println!("Cloning the repo...");
    let tools = SystemToolchain::new(shutdown);
    pipeline::run(&project, &tools).await
}

/// Cancels `token` on the first SIGINT or SIGTERM.
async fn cancel_on_signal(token: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = term.recv() => {}
                }
            }
            Err(e) => {
                log::warn!("unable to listen for SIGTERM: {e}");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    let _ = tokio::signal::ctrl_c().await;

    log::warn!("shutdown signal received");
    token.cancel();
}
