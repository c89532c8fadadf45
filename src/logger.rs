use std::io::Write;

use env_logger::WriteStyle;
use serde_json::json;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log output flavour selected by the `--env` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Profile {
    /// Human readable, coloured lines.
    Development,
    /// One JSON object per line.
    Production,
}

impl Profile {
    pub(crate) fn from_env(env: &str) -> Self {
        match env {
            "development" | "test" => Profile::Development,
            _ => Profile::Production,
        }
    }
}

pub(crate) fn init(env: &str, level: log::LevelFilter) {
    builder(Profile::from_env(env), level).init();
}

fn builder(profile: Profile, level: log::LevelFilter) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Off)
        .filter_module(env!("CARGO_CRATE_NAME"), level);

    if profile == Profile::Production {
        let id = host_id();
        builder.write_style(WriteStyle::Never).format(move |buf, record| {
            let line = json!({
                "level": record.level().as_str().to_lowercase(),
                "ts": buf.timestamp_millis().to_string(),
                "target": record.target(),
                "msg": record.args().to_string(),
                "id": id,
                "version": VERSION,
            });
            writeln!(buf, "{line}")
        });
    } else {
        builder.format_timestamp_millis();
    }
    builder
}

/// Name of the machine the run happens on, `unknown` when it cannot be found.
fn host_id() -> String {
    std::env::var("HOSTNAME")
        .ok()
        .or_else(|| std::fs::read_to_string("/etc/hostname").ok())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
