use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "scrub")]
#[command(about = "Find sensitive strings in git history and plan their removal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "SCRUB_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the full history and print a git-filter-repo plan
    Scan(ScanArgs),

    /// Write a default config file
    Init,

    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Replacement map with one OLD==>NEW per line (takes precedence over --lookup)
    pub map_file: Option<PathBuf>,

    /// Search for a single term, without replacements
    #[arg(long, default_value = "")]
    pub lookup: String,

    /// Compare case-insensitively
    #[arg(long)]
    pub case_insensitive: bool,

    /// Repository to scan; matched paths are checked relative to it
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,

    /// Read a saved `git log --all --full-history -p -U0` export instead of running git ("-" for stdin)
    #[arg(long)]
    pub from_file: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scan_defaults() {
        let cli = Cli::try_parse_from(["scrub", "scan", "--lookup", "token"]).unwrap();
        let Commands::Scan(args) = cli.command else {
            panic!("Expected scan command");
        };

        assert_eq!(args.lookup, "token");
        assert!(args.map_file.is_none());
        assert!(!args.case_insensitive);
        assert_eq!(args.repo, PathBuf::from("."));
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn test_scan_with_map_file() {
        let cli = Cli::try_parse_from([
            "scrub",
            "scan",
            "replacements.txt",
            "--case-insensitive",
            "--format",
            "json",
            "--from-file",
            "history.txt",
        ])
        .unwrap();
        let Commands::Scan(args) = cli.command else {
            panic!("Expected scan command");
        };

        assert_eq!(args.map_file, Some(PathBuf::from("replacements.txt")));
        assert!(args.case_insensitive);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.from_file, Some(PathBuf::from("history.txt")));
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["scrub", "init", "--config", "/tmp/scrub.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/scrub.toml")));
        assert!(matches!(cli.command, Commands::Init));
    }
}
