//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--repo <path>` / `-R`: Working copy to operate on (default: current directory)
//! - `--backend <name>`: Backend, overriding configuration
//! - `--config <key=value>`: Extra tool config override (repeatable)
//! - `--log-format <xml|template>`: Log rendering, overriding configuration
//! - `--json`: Machine-readable output
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::adapter::LogFormat;

/// dvcs - one command line over distributed version-control tools
#[derive(Parser, Debug)]
#[command(name = "dvcs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Working copy to operate on
    #[arg(short = 'R', long, global = true, value_name = "PATH")]
    pub repo: Option<PathBuf>,

    /// Backend to use (hg, git); overrides configuration
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Extra tool configuration override, e.g. ui.username=Jan
    #[arg(long = "config", global = true, value_name = "KEY=VALUE")]
    pub config: Vec<String>,

    /// Log rendering requested from the tool (xml, template)
    #[arg(long, global = true, value_name = "FORMAT", value_parser = parse_log_format)]
    pub log_format: Option<LogFormat>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

fn parse_log_format(s: &str) -> Result<LogFormat, String> {
    LogFormat::parse(s).ok_or_else(|| format!("unknown log format '{s}', expected xml or template"))
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    // ========== Working copy ==========
    /// Clone a remote repository into the working-copy path
    Clone {
        /// Source repository (path or URL)
        remote: String,
    },

    /// Create a new repository at the working-copy path
    Init,

    /// Show the current branch, or set the branch for the next commit
    Branch {
        /// New branch name
        name: Option<String>,
    },

    /// Schedule files for addition (everything when no paths are given)
    Add {
        /// Paths to add
        paths: Vec<String>,
    },

    /// Commit pending changes
    #[command(
        after_help = "\
WORKFLOW EXAMPLES:
    # Commit everything, adding new and forgetting missing files
    dvcs commit -m \"Fix parser\"

    # Commit selected files only, without addremove
    dvcs commit -m \"Docs\" --no-addremove README.md"
    )]
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: String,

        /// Record the commit as this user
        #[arg(short, long)]
        user: Option<String>,

        /// Do not add new or forget missing files first
        #[arg(long)]
        no_addremove: bool,

        /// Restrict the commit to these paths
        files: Vec<String>,
    },

    /// Update the working copy to a branch or revision
    Update {
        /// Branch to update to
        #[arg(conflicts_with = "rev")]
        branch: Option<String>,

        /// Revision to update to
        #[arg(short, long)]
        rev: Option<String>,

        /// Keep uncommitted changes
        #[arg(long)]
        no_clean: bool,
    },

    /// Show changed files in the working copy
    Status,

    /// Show file status changes between two revisions
    Changed {
        /// Start revision
        start: String,
        /// End revision
        end: String,
    },

    // ========== Exchange ==========
    /// Merge another head into the working copy
    #[command(
        long_about = "Merge another head into the working copy.\n\n\
            Conflicting files are handed to dvcs-mergetool, which snapshots the \
            base, local and other versions and reports them as JSON objects in \
            the merge output.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Preview what merging the stable branch would bring in
    dvcs merge stable --preview

    # Merge and list the conflicts as JSON
    dvcs merge stable --conflicts --json"
    )]
    Merge {
        /// Branch to merge
        #[arg(conflicts_with = "rev")]
        branch: Option<String>,

        /// Revision to merge
        #[arg(short, long)]
        rev: Option<String>,

        /// Only list the changesets that would be merged
        #[arg(long)]
        preview: bool,

        /// Print the conflict reports instead of the raw output
        #[arg(long)]
        conflicts: bool,
    },

    /// Push outgoing changesets
    Push {
        /// Destination repository (default path when omitted)
        destination: Option<String>,

        /// Allow creating new remote branches
        #[arg(long)]
        new_branch: bool,
    },

    /// Pull incoming changesets
    Pull {
        /// Source repository (default path when omitted)
        source: Option<String>,

        /// Only pull this branch
        #[arg(short, long)]
        branch: Option<String>,
    },

    /// List changesets on the default remote that are missing locally
    Incoming {
        /// Only consider this branch
        #[arg(short, long)]
        branch: Option<String>,

        /// Only report whether there are any (exit status 1 when none)
        #[arg(long)]
        check: bool,
    },

    // ========== History ==========
    /// Show history
    Log {
        /// Restrict to one branch
        #[arg(short, long)]
        branch: Option<String>,
    },

    /// Show the changesets of one author
    UserCommits {
        /// Author to match
        user: String,

        /// Maximum number of changesets
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// List branches with their status
    Branches,

    /// Show the changesets of one branch
    BranchRevisions {
        /// Branch name
        branch: String,
    },

    /// Show the tip changeset
    Head {
        /// Tip of this branch instead of the repository
        #[arg(short, long)]
        branch: Option<String>,
    },

    /// List touched files per changeset in a revision range
    ChangedFiles {
        /// Last revision of the range
        end: String,

        /// First revision of the range (default: the first revision)
        #[arg(short, long)]
        start: Option<String>,
    },

    // ========== Diffs ==========
    /// Show a unified diff of one file
    Diff {
        /// File, relative to the working copy
        path: String,

        /// Compare against this revision
        #[arg(short, long)]
        rev: Option<String>,
    },

    /// Show an HTML side-by-side diff of one file
    DiffHtml {
        /// File, relative to the working copy
        path: String,

        /// Compare against this revision
        #[arg(short, long)]
        rev: Option<String>,
    },

    // ========== Setup ==========
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    dvcs completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    dvcs completion zsh >> ~/.zshrc

    # Fish
    dvcs completion fish > ~/.config/fish/completions/dvcs.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the resolved configuration and where it came from
    Show,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["dvcs", "status", "-R", "/srv/repo", "--json"]).unwrap();
        assert_eq!(cli.repo, Some(PathBuf::from("/srv/repo")));
        assert!(cli.json);
        assert!(matches!(cli.command, Command::Status));
    }

    #[test]
    fn repeatable_config() {
        let cli = Cli::try_parse_from([
            "dvcs",
            "--config",
            "ui.a=1",
            "--config",
            "ui.b=2",
            "branches",
        ])
        .unwrap();
        assert_eq!(cli.config, vec!["ui.a=1", "ui.b=2"]);
    }

    #[test]
    fn log_format_flag() {
        let cli = Cli::try_parse_from(["dvcs", "log", "--log-format", "Template"]).unwrap();
        assert_eq!(cli.log_format, Some(LogFormat::Template));

        let cli = Cli::try_parse_from(["dvcs", "--log-format", "markup", "log"]).unwrap();
        assert_eq!(cli.log_format, Some(LogFormat::Xml));

        assert!(Cli::try_parse_from(["dvcs", "--log-format", "json", "log"]).is_err());
    }

    #[test]
    fn merge_branch_and_rev_conflict() {
        let result = Cli::try_parse_from(["dvcs", "merge", "stable", "--rev", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn commit_requires_message() {
        assert!(Cli::try_parse_from(["dvcs", "commit"]).is_err());
        let cli = Cli::try_parse_from(["dvcs", "commit", "-m", "msg", "--no-addremove", "a.txt"]).unwrap();
        match cli.command {
            Command::Commit {
                message,
                no_addremove,
                files,
                ..
            } => {
                assert_eq!(message, "msg");
                assert!(no_addremove);
                assert_eq!(files, vec!["a.txt"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn kebab_case_subcommands() {
        assert!(Cli::try_parse_from(["dvcs", "user-commits", "jan", "-l", "3"]).is_ok());
        assert!(Cli::try_parse_from(["dvcs", "branch-revisions", "default"]).is_ok());
        assert!(Cli::try_parse_from(["dvcs", "changed-files", "5", "--start", "0"]).is_ok());
        assert!(Cli::try_parse_from(["dvcs", "diff-html", "a.txt"]).is_ok());
    }
}
