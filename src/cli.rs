use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lectio::passage::DEFAULT_ENDPOINT;

#[derive(Parser, Debug)]
#[command(
    name = "lectio",
    version,
    about = "Normalize scripture references and fetch passage text"
)]
pub struct Cli {
    /// Raise the log level when RUST_LOG is unset (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the canonical form of each reference
    Clean(CleanArgs),
    /// Normalize each reference and print its passage text
    Fetch(FetchArgs),
    /// Report on the local passage cache
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CleanArgs {
    #[arg(required = true)]
    pub references: Vec<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    #[arg(required = true)]
    pub references: Vec<String>,

    #[arg(long, default_value = ".cache/lectio")]
    pub cache_root: PathBuf,

    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    #[arg(long, default_value_t = 10_000)]
    pub timeout_ms: u64,

    #[arg(long, default_value_t = false)]
    pub no_cache: bool,

    #[arg(long, default_value_t = false)]
    pub refresh: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = ".cache/lectio")]
    pub cache_root: PathBuf,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn fetch_defaults() {
        let cli = Cli::try_parse_from(["lectio", "fetch", "gen 1"]).expect("args should parse");
        let Commands::Fetch(args) = cli.command else {
            panic!("expected fetch command");
        };
        assert_eq!(args.references, vec!["gen 1".to_string()]);
        assert_eq!(args.cache_root, PathBuf::from(".cache/lectio"));
        assert_eq!(args.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(args.timeout_ms, 10_000);
        assert!(!args.no_cache);
        assert!(!args.refresh);
    }

    #[test]
    fn verbose_is_counted_after_the_subcommand() {
        let cli = Cli::try_parse_from(["lectio", "clean", "-vv", "gen 1"])
            .expect("args should parse");
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn clean_requires_a_reference() {
        assert!(Cli::try_parse_from(["lectio", "clean"]).is_err());
    }
}
