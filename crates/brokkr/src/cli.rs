//! CLI argument parsing with clap

use clap::{Args, Parser, Subcommand};

/// Brokkr - Interactive project scaffolder
#[derive(Parser, Debug)]
#[command(name = "brokkr")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a new project
    New(NewArgs),

    /// Show version information
    Version(VersionArgs),
}

// New command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Template identifier (frontend, interactive, dcd, fsf)
    pub template: Option<String>,

    /// Project name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Skip interactive prompts
    #[arg(short, long)]
    pub skip: bool,

    /// Initialize a git repository
    #[arg(short, long)]
    pub git: bool,

    /// Use the clean template variant
    #[arg(short, long)]
    pub clean: bool,

    /// Gitpod environment mode (skips local virtual-environment handling)
    #[arg(short = 'p', long)]
    pub gitpod: bool,

    /// Install dependencies after scaffolding
    #[arg(short, long)]
    pub install: bool,
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_new_flags_parse() {
        let cli = Cli::parse_from(["brokkr", "new", "dcd", "-n", "Demo", "-s", "-g"]);

        match cli.command {
            Commands::New(args) => {
                assert_eq!(args.template.as_deref(), Some("dcd"));
                assert_eq!(args.name.as_deref(), Some("Demo"));
                assert!(args.skip);
                assert!(args.git);
                assert!(!args.gitpod);
                assert!(!args.install);
            }
            _ => panic!("expected new command"),
        }
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let result = Cli::try_parse_from(["brokkr", "new", "--bogus"]);
        assert!(result.is_err());
    }
}
