use goscaffold::pipeline::Stage;

/// Conventional status for a process stopped by SIGINT.
const INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    if let Err(e) = goscaffold::builder().await {
        if e.is_cancelled() {
            log::warn!("interrupted while {}: {e}", e.stage());
            eprintln!("interrupted: {e}");
            std::process::exit(INTERRUPTED);
        }
        if log::log_enabled!(log::Level::Error) {
            log::error!("run failed ({} -> {}): {e}", e.stage(), Stage::Failed);
        } else {
            eprintln!("run failed: {e}");
        }
        std::process::exit(1);
    }
    println!("Done!");
}
