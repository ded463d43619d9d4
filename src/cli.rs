use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "weatherstation - a caching weather station daemon",
    long_about = "weatherstation polls OpenWeatherMap for the configured coordinates, keeps the \
                  latest snapshot in memory and on disk, and serves it over HTTP. Callers may \
                  override the snapshot through the same endpoint."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the weather station daemon (default behavior)
    Run,
    /// Fetch and parse the current weather once, print it as JSON and exit
    Fetch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::parse_from(["weatherstation"]);
        assert_eq!(cli.command, None);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_fetch_with_config() {
        let cli = Cli::parse_from(["weatherstation", "fetch", "--config", "/etc/ws.yaml"]);
        assert_eq!(cli.command, Some(Commands::Fetch));
        assert_eq!(cli.config, Some(PathBuf::from("/etc/ws.yaml")));
    }
}
