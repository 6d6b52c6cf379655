//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for `builddiff`.
#[derive(Debug, Parser)]
#[command(
    name = "builddiff",
    version,
    about = "List files added, updated and deleted between two builds"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compare two directory trees.
    Diff(DiffArgs),
    /// Print the effective blacklist.
    Blacklist(BlacklistArgs),
}

/// Arguments for `builddiff diff`.
#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Old directory, passed to the comparison verbatim.
    pub old: String,
    /// New directory, passed to the comparison verbatim.
    pub new: String,
    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
    /// Suppress progress output.
    #[arg(short, long)]
    pub quiet: bool,
    /// Fail if the report names directories other than OLD and NEW.
    #[arg(long)]
    pub validate_roots: bool,
    /// Blacklist configuration.
    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for `builddiff blacklist`.
#[derive(Debug, Args)]
pub struct BlacklistArgs {
    /// Blacklist configuration.
    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Config file and blacklist overrides shared by every subcommand.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config file (defaults to `$BUILDDIFF_CONFIG`, then `.builddiff.yaml`).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Extra relative path to exclude; repeatable.
    #[arg(long, value_name = "PATH")]
    pub ignore: Vec<String>,
    /// Start from an empty blacklist instead of the built-in one.
    #[arg(long)]
    pub no_default_blacklist: bool,
}

/// How `builddiff diff` prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable sections.
    Text,
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, OutputFormat};
    use clap::Parser;

    #[test]
    fn parses_diff_subcommand() {
        let cli = Cli::parse_from(["builddiff", "diff", "build-old", "build-new"]);
        let Command::Diff(args) = cli.command else { panic!("expected diff") };
        assert_eq!(args.old, "build-old");
        assert_eq!(args.new, "build-new");
        assert_eq!(args.format, OutputFormat::Text);
        assert!(!args.quiet);
        assert!(args.config.ignore.is_empty());
    }

    #[test]
    fn parses_diff_flags() {
        let cli = Cli::parse_from([
            "builddiff",
            "diff",
            "a",
            "b",
            "--format",
            "json",
            "-q",
            "--validate-roots",
            "--ignore",
            "x.txt",
            "--ignore",
            "y.txt",
            "--no-default-blacklist",
        ]);
        let Command::Diff(args) = cli.command else { panic!("expected diff") };
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.quiet);
        assert!(args.validate_roots);
        assert_eq!(args.config.ignore, vec!["x.txt", "y.txt"]);
        assert!(args.config.no_default_blacklist);
    }

    #[test]
    fn parses_blacklist_subcommand() {
        let cli = Cli::parse_from(["builddiff", "blacklist", "--config", "cfg.yaml"]);
        let Command::Blacklist(args) = cli.command else { panic!("expected blacklist") };
        assert_eq!(args.config.config.as_deref(), Some(std::path::Path::new("cfg.yaml")));
    }

    #[test]
    fn diff_requires_both_roots() {
        assert!(Cli::try_parse_from(["builddiff", "diff", "only-one"]).is_err());
    }
}
