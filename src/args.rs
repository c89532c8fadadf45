use std::str::FromStr;

use clap::builder::TypedValueParser as _;
use clap::Parser;

/// Start a new Go service from a template repository.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Scaffold {
    /// Environment name. `development` and `test` log human readable lines, anything else logs JSON.
    #[arg(long, env = "ENV", value_name = "Env", default_value = "development")]
    pub(crate) env: String,

    /// Minimum log level (choose off to disable logging).
    #[arg(
        long,
        env = "LOG_LEVEL",
        default_value = "info",
        value_parser = clap::builder::PossibleValuesParser::new(["off", "trace", "debug", "info", "warn", "error"])
            .map(|s| log::LevelFilter::from_str(&s).unwrap()),
    )]
    pub(crate) log_level: log::LevelFilter,

    /// Template repository to clone. eg. https://github.com/org/boilerplate.
    #[arg(
        long,
        env = "REPO_URL",
        value_name = "Url",
        default_value = "https://github.com/ravilushqa/boilerplate"
    )]
    pub(crate) repo_url: String,

    /// Name of the new project, used for the directory and the import path.
    #[arg(
        long,
        env = "PROJECT",
        value_name = "Project Name",
        default_value = "new-project"
    )]
    pub(crate) project: String,

    /// Base directory the project directory is created under.
    #[arg(long, env = "DIR", value_name = "Directory", default_value = "./")]
    pub(crate) dir: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Scaffold::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let args = Scaffold::try_parse_from([
            "goscaffold",
            "--repo-url=https://example.com/org/boilerplate",
            "--project=acme-service",
            "--dir=/tmp/",
            "--log-level=debug",
            "--env=production",
        ])
        .unwrap();

        assert_eq!(args.repo_url, "https://example.com/org/boilerplate");
        assert_eq!(args.project, "acme-service");
        assert_eq!(args.dir, "/tmp/");
        assert_eq!(args.log_level, log::LevelFilter::Debug);
        assert_eq!(args.env, "production");
    }

    #[test]
    fn rejects_unknown_log_level() {
        let err = Scaffold::try_parse_from(["goscaffold", "--log-level=dpanic"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn help_is_reported_as_display_help() {
        let err = Scaffold::try_parse_from(["goscaffold", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
