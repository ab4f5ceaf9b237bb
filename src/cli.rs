//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Plinth - plugin catalog installer
///
/// Resolve plugin selections against a catalog and install them into a
/// project, resuming where a previous run stopped.
#[derive(Parser, Debug)]
#[command(
    name = "plinth",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Plugin catalog resolver and resumable installer",
    long_about = "Plinth reads a catalog of installable units (foundations, languages, \
                  infrastructure, standards, applications), resolves a selection to an \
                  ordered, conflict-free plan and installs it into a project. Progress is \
                  recorded per unit, so an interrupted or failed run resumes where it stopped.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  plinth init\n    \
                  plinth plan languages/python\n    \
                  plinth install languages/python -o languages/python:linter=ruff\n    \
                  plinth status --markdown"
)]
pub struct Cli {
    /// Project directory (defaults to the nearest directory containing .plinth/)
    #[arg(long, short = 'p', global = true, env = "PLINTH_PROJECT")]
    pub project: Option<PathBuf>,

    /// Catalog file, or '-' to read it from stdin
    #[arg(long, short = 'c', global = true, env = "PLINTH_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create .plinth/ in the project directory (stores --catalog in its config)
    Init,

    /// Load and validate the catalog
    Validate,

    /// List catalog units
    List(ListArgs),

    /// Show unit information
    Show(ShowArgs),

    /// Preview the installation plan without changing anything
    Plan(PlanArgs),

    /// Install units and everything they require
    Install(InstallArgs),

    /// Show install state of the project
    Status(StatusArgs),

    /// Reset failed units so the next install retries them
    Reset(ResetArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List installable units:\n    plinth list\n\n\
                  Include planned and requested units:\n    plinth list --all")]
pub struct ListArgs {
    /// Include units that are not installable yet
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show unit information:\n    plinth show languages/python")]
pub struct ShowArgs {
    /// Unit id to show
    pub unit: String,
}

/// Arguments for the plan command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Preview a selection:\n    plinth plan languages/python tools/docker\n\n\
                  Machine readable output:\n    plinth plan languages/python --json")]
pub struct PlanArgs {
    /// Units to plan (defaults to 'units' in .plinth/config.yaml)
    pub units: Vec<String>,

    /// Option choice as UNIT:NAME=VALUE (repeatable)
    #[arg(long = "option", short = 'o', value_name = "UNIT:NAME=VALUE")]
    pub options: Vec<String>,

    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Install units:\n    plinth install languages/python tools/docker\n\n\
                  Choose an option:\n    plinth install languages/python -o languages/python:linter=ruff\n\n\
                  Resume the previous selection:\n    plinth install\n\n\
                  Keep going past failures:\n    plinth install --continue-on-error\n\n\
                  Show what would be installed:\n    plinth install languages/python --dry-run")]
pub struct InstallArgs {
    /// Units to install. Without units: config 'units', then the recorded selection
    pub units: Vec<String>,

    /// Option choice as UNIT:NAME=VALUE (repeatable)
    #[arg(long = "option", short = 'o', value_name = "UNIT:NAME=VALUE")]
    pub options: Vec<String>,

    /// Install units that do not depend on a failed unit
    #[arg(long)]
    pub continue_on_error: bool,

    /// Print the plan without installing
    #[arg(long)]
    pub dry_run: bool,

    /// Skip interactive selection and confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Arguments for the status command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show install state:\n    plinth status\n\n\
                  Markdown table for an issue or README:\n    plinth status --markdown")]
pub struct StatusArgs {
    /// Print a Markdown table
    #[arg(long)]
    pub markdown: bool,
}

/// Arguments for the reset command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Retry a failed unit:\n    plinth reset tools/docker\n\n\
                  Without confirmation:\n    plinth reset tools/docker -y")]
pub struct ResetArgs {
    /// Failed units to reset
    #[arg(required = true)]
    pub units: Vec<String>,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    plinth completions --shell bash > ~/.bash_completion.d/plinth\n\n\
                  Generate zsh completions:\n    plinth completions --shell zsh > ~/.zfunc/_plinth\n\n\
                  Generate fish completions:\n    plinth completions --shell fish > ~/.config/fish/completions/plinth.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_install() {
        let cli = Cli::try_parse_from(["plinth", "install", "languages/python"]).unwrap();
        match cli.command {
            Commands::Install(args) => {
                assert_eq!(args.units, vec!["languages/python"]);
                assert!(args.options.is_empty());
                assert!(!args.continue_on_error);
                assert!(!args.dry_run);
            }
            _ => panic!("Expected Install command"),
        }
    }

    #[test]
    fn test_cli_parsing_install_no_units() {
        let cli = Cli::try_parse_from(["plinth", "install"]).unwrap();
        match cli.command {
            Commands::Install(args) => assert!(args.units.is_empty()),
            _ => panic!("Expected Install command"),
        }
    }

    #[test]
    fn test_cli_parsing_install_with_options() {
        let cli = Cli::try_parse_from([
            "plinth",
            "install",
            "languages/python",
            "tools/docker",
            "-o",
            "languages/python:linter=ruff",
            "--option",
            "tools/docker:engine=podman",
            "--continue-on-error",
            "-y",
        ])
        .unwrap();
        match cli.command {
            Commands::Install(args) => {
                assert_eq!(args.units, vec!["languages/python", "tools/docker"]);
                assert_eq!(
                    args.options,
                    vec!["languages/python:linter=ruff", "tools/docker:engine=podman"]
                );
                assert!(args.continue_on_error);
                assert!(args.yes);
            }
            _ => panic!("Expected Install command"),
        }
    }

    #[test]
    fn test_cli_parsing_plan_json() {
        let cli = Cli::try_parse_from(["plinth", "plan", "a", "--json"]).unwrap();
        match cli.command {
            Commands::Plan(args) => {
                assert_eq!(args.units, vec!["a"]);
                assert!(args.json);
            }
            _ => panic!("Expected Plan command"),
        }
    }

    #[test]
    fn test_cli_parsing_reset_requires_unit() {
        assert!(Cli::try_parse_from(["plinth", "reset"]).is_err());
        let cli = Cli::try_parse_from(["plinth", "reset", "a", "b"]).unwrap();
        match cli.command {
            Commands::Reset(args) => assert_eq!(args.units, vec!["a", "b"]),
            _ => panic!("Expected Reset command"),
        }
    }

    #[test]
    fn test_cli_parsing_status_markdown() {
        let cli = Cli::try_parse_from(["plinth", "status", "--markdown"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Status(StatusArgs { markdown: true })
        ));
    }

    #[test]
    fn test_cli_parsing_version() {
        let cli = Cli::try_parse_from(["plinth", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_cli_global_options() {
        let cli = Cli::try_parse_from([
            "plinth",
            "-v",
            "-p",
            "/tmp/project",
            "-c",
            "/tmp/catalog.yaml",
            "list",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.project, Some(PathBuf::from("/tmp/project")));
        assert_eq!(cli.catalog, Some(PathBuf::from("/tmp/catalog.yaml")));
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["plinth", "-v", "-q", "status"]).is_err());
    }

    #[test]
    fn test_init_accepts_global_catalog() {
        let cli = Cli::try_parse_from(["plinth", "init", "--catalog", "team.yaml"]).unwrap();
        assert!(matches!(cli.command, Commands::Init));
        assert_eq!(cli.catalog, Some(PathBuf::from("team.yaml")));
    }
}
