//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "repoman",
    bin_name = "repoman",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Git repository and license management",
    long_about = "repoman drives git for everyday repository operations \
                  and writes LICENSE files from built-in or custom templates.",
    after_help = "EXAMPLES:\n\
        \x20 repoman -C my-project init\n\
        \x20 repoman license add MIT --author \"Jane Doe\"\n\
        \x20 repoman commit -m \"Initial commit\"\n\
        \x20 repoman push origin main",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialise a new repository.
    #[command(
        about = "Initialise a new repository",
        after_help = "EXAMPLES:\n\
            \x20 repoman init\n\
            \x20 repoman -C ../new-project init"
    )]
    Init,

    /// Stage files for commit.
    #[command(about = "Stage files for commit")]
    Add(AddArgs),

    /// Commit staged changes.
    #[command(
        about = "Commit staged changes",
        after_help = "EXAMPLES:\n\
            \x20 repoman commit -m \"Add license\""
    )]
    Commit(CommitArgs),

    /// Push a branch to a remote.
    #[command(
        about = "Push a branch to a remote",
        after_help = "EXAMPLES:\n\
            \x20 repoman push                 # remote.name / remote.branch from config\n\
            \x20 repoman push upstream develop"
    )]
    Push(RemoteArgs),

    /// Pull a branch from a remote.
    #[command(about = "Pull a branch from a remote")]
    Pull(RemoteArgs),

    /// Create a branch and switch to it.
    #[command(about = "Create a branch and switch to it")]
    Branch(BranchArgs),

    /// Merge a branch into the current branch.
    #[command(about = "Merge a branch into the current branch")]
    Merge(BranchArgs),

    /// Switch to an existing branch.
    #[command(visible_alias = "co", about = "Switch to an existing branch")]
    Checkout(BranchArgs),

    /// List local branches, current first.
    #[command(about = "List local branches")]
    Branches,

    /// Show the working tree status.
    #[command(visible_alias = "st", about = "Show the working tree status")]
    Status,

    /// Work with license templates.
    #[command(subcommand, about = "Generate and list licenses")]
    License(LicenseCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 repoman completions bash > ~/.local/share/bash-completion/completions/repoman\n\
            \x20 repoman completions zsh  > ~/.zfunc/_repoman\n\
            \x20 repoman completions fish > ~/.config/fish/completions/repoman.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the repoman configuration.
    #[command(subcommand, about = "Configuration management")]
    Config(ConfigCommands),
}

// ── repository operations ─────────────────────────────────────────────────────

/// Arguments for `repoman add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Files to stage, relative to the repository root.
    #[arg(value_name = "FILES", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,
}

/// Arguments for `repoman commit`.
#[derive(Debug, Args)]
pub struct CommitArgs {
    /// Commit message.
    #[arg(short = 'm', long = "message", value_name = "MSG")]
    pub message: String,
}

/// Arguments for `repoman push` / `repoman pull`.
#[derive(Debug, Args)]
pub struct RemoteArgs {
    /// Remote name (default: `remote.name` from config).
    #[arg(value_name = "REMOTE")]
    pub remote: Option<String>,

    /// Branch name (default: `remote.branch` from config).
    #[arg(value_name = "BRANCH")]
    pub branch: Option<String>,
}

/// A single branch name.
#[derive(Debug, Args)]
pub struct BranchArgs {
    #[arg(value_name = "NAME")]
    pub name: String,
}

// ── license subcommands ───────────────────────────────────────────────────────

/// Subcommands for `repoman license`.
#[derive(Debug, Subcommand)]
pub enum LicenseCommands {
    /// List available license identifiers.
    #[command(visible_alias = "ls")]
    List,

    /// Write a LICENSE file and stage it.
    #[command(after_help = "EXAMPLES:\n\
        \x20 repoman license add MIT --author \"Jane Doe\"\n\
        \x20 repoman license add Apache-2.0   # uses license.default_author")]
    Add {
        /// License identifier, e.g. `MIT` (see `repoman license list`).
        #[arg(value_name = "ID")]
        id: String,

        /// Copyright holder.
        #[arg(short = 'a', long = "author", value_name = "NAME")]
        author: Option<String>,
    },
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `repoman completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `repoman config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration.
    Show,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_add_with_several_files() {
        let cli = Cli::parse_from(["repoman", "add", "README.md", "src/lib.rs"]);
        match cli.command {
            Commands::Add(args) => assert_eq!(
                args.files,
                [PathBuf::from("README.md"), PathBuf::from("src/lib.rs")]
            ),
            other => panic!("expected Add, got {other:?}"),
        }
    }

    #[test]
    fn add_requires_files() {
        assert!(Cli::try_parse_from(["repoman", "add"]).is_err());
    }

    #[test]
    fn commit_requires_message() {
        assert!(Cli::try_parse_from(["repoman", "commit"]).is_err());
        let cli = Cli::parse_from(["repoman", "commit", "-m", "Initial commit"]);
        assert!(matches!(cli.command, Commands::Commit(CommitArgs { message }) if message == "Initial commit"));
    }

    #[test]
    fn push_arguments_are_optional() {
        let cli = Cli::parse_from(["repoman", "push"]);
        assert!(matches!(
            cli.command,
            Commands::Push(RemoteArgs {
                remote: None,
                branch: None
            })
        ));

        let cli = Cli::parse_from(["repoman", "pull", "upstream", "develop"]);
        match cli.command {
            Commands::Pull(args) => {
                assert_eq!(args.remote.as_deref(), Some("upstream"));
                assert_eq!(args.branch.as_deref(), Some("develop"));
            }
            other => panic!("expected Pull, got {other:?}"),
        }
    }

    #[test]
    fn license_add_with_author() {
        let cli = Cli::parse_from(["repoman", "license", "add", "MIT", "--author", "Acme"]);
        match cli.command {
            Commands::License(LicenseCommands::Add { id, author }) => {
                assert_eq!(id, "MIT");
                assert_eq!(author.as_deref(), Some("Acme"));
            }
            other => panic!("expected license add, got {other:?}"),
        }
    }

    #[test]
    fn repo_flag_is_global() {
        let cli = Cli::parse_from(["repoman", "status", "-C", "/tmp/project"]);
        assert_eq!(cli.global.repo, PathBuf::from("/tmp/project"));

        let cli = Cli::parse_from(["repoman", "status"]);
        assert_eq!(cli.global.repo, PathBuf::from("."));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["repoman", "--quiet", "--verbose", "status"]);
        assert!(result.is_err());
    }
}
