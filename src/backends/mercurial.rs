//! backends::mercurial
//!
//! The complete backend, driving the `hg` executable.
//!
//! # Command conventions
//!
//! - every scoped command carries `-R <path>`; `clone` and `init` do not
//! - log-producing commands request either `--style xml` or
//!   [`LOG_TEMPLATE`], per [`LogFormat`], and always `--verbose` so the
//!   touched files are included
//! - `push`/`pull` treat exit 1 with `no changes found` as a zero summary
//! - `incoming` treats exit 1 as "nothing incoming"
//! - `extdiff` exit codes are ignored

use std::path::Path;
use std::sync::Arc;

use crate::adapter::{
    classify, ensure_branch_or_revision, AdapterConfig, CommandBuilder, CommitOptions, Dialect,
    Dvcs, ExitPolicy, Invocation, LogFormat, MergeOptions, Outcome, PullOptions, PushOptions,
    RepoHandle, UpdateOptions,
};
use crate::core::model::{BranchSet, ChangeSummary, ChangedFiles, Log, LogEntry, StatusReport};
use crate::core::types::BackendKind;
use crate::error::DvcsError;
use crate::parse::{
    parse_branches, parse_change_summary, parse_status, parse_template_log, parse_xml_log,
    LOG_TEMPLATE,
};
use crate::process::CommandRunner;

/// Default executable.
pub const HG: &str = "hg";

/// Name under which the merge tool is registered in `merge-tools.*`.
const MERGE_TOOL_ALIAS: &str = "dvcs";

/// Mercurial adapter.
pub struct Mercurial {
    handle: RepoHandle,
    commands: CommandBuilder,
    log_format: LogFormat,
    merge_tool: String,
    diff_tool: String,
    runner: Arc<dyn CommandRunner>,
}

impl std::fmt::Debug for Mercurial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mercurial")
            .field("handle", &self.handle)
            .field("log_format", &self.log_format)
            .finish_non_exhaustive()
    }
}

impl Mercurial {
    /// Create an adapter for the working copy at `path`.
    pub fn new(
        path: impl AsRef<Path>,
        config: &AdapterConfig,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        let path = path.as_ref();
        Self {
            handle: RepoHandle::new(path, BackendKind::Mercurial),
            commands: CommandBuilder::new(Dialect::MERCURIAL, HG, path, config),
            log_format: config.log_format,
            merge_tool: config.merge_tool.to_string_lossy().into_owned(),
            diff_tool: config.diff_tool.to_string_lossy().into_owned(),
            runner,
        }
    }

    fn exec(&self, invocation: Invocation, policy: ExitPolicy) -> Result<Outcome, DvcsError> {
        let _span = tracing::debug_span!("hg", operation = invocation.operation()).entered();
        let command = invocation.render();
        let output = self.runner.run(&command)?;
        classify(&command, output, policy)
    }

    fn exec_text(&self, invocation: Invocation) -> Result<String, DvcsError> {
        self.exec(invocation, ExitPolicy::Strict)
            .map(Outcome::into_text)
    }

    /// Append the log rendering flags for the configured format.
    fn with_log_format(&self, invocation: Invocation) -> Invocation {
        match self.log_format {
            LogFormat::Xml => invocation.arg("--style").arg("xml").arg("--verbose"),
            LogFormat::Template => invocation.arg("--template").value(LOG_TEMPLATE),
        }
    }

    fn parse_log(&self, out: &str) -> Result<Log, DvcsError> {
        match self.log_format {
            LogFormat::Xml => parse_xml_log(out),
            LogFormat::Template => parse_template_log(out),
        }
    }

    /// Run a `log` invocation and parse its output.
    fn read_log(&self, invocation: Invocation) -> Result<Log, DvcsError> {
        let out = self.exec_text(self.with_log_format(invocation))?;
        self.parse_log(&out)
    }

    fn transfer(&self, invocation: Invocation) -> Result<ChangeSummary, DvcsError> {
        match self.exec(invocation, ExitPolicy::NoChangesFound)? {
            Outcome::Output(out) => Ok(parse_change_summary(&out)),
            Outcome::Empty => Ok(ChangeSummary::ZERO),
        }
    }

    /// Build `incoming`, quieting status chatter for template output.
    fn incoming(&self, branch: Option<&str>) -> Invocation {
        let invocation = self.commands.command("incoming");
        let invocation = match self.log_format {
            LogFormat::Xml => invocation,
            LogFormat::Template => invocation.arg("--quiet"),
        };
        self.with_log_format(invocation)
            .opt_value("--branch", branch)
    }

    fn repo_file(&self, path: &str) -> String {
        self.commands.repo_path().join(path).to_string_lossy().into_owned()
    }
}

impl Dvcs for Mercurial {
    fn handle(&self) -> &RepoHandle {
        &self.handle
    }

    fn clone_repo(&self, remote: &str) -> Result<String, DvcsError> {
        self.exec_text(
            self.commands
                .command("clone")
                .unscoped()
                .value(remote)
                .path(self.handle.path()),
        )
    }

    fn branch(&self, name: &str) -> Result<String, DvcsError> {
        let out = self.exec_text(self.commands.command("branch").opt_arg(Some(name)))?;
        Ok(out.trim().to_string())
    }

    fn add(&self, paths: &[String]) -> Result<String, DvcsError> {
        let invocation = self.commands.command("add");
        let invocation = if paths.is_empty() {
            // The glob must stay outside the quotes so the shell expands it.
            let root = crate::adapter::quote(&self.commands.repo_path().to_string_lossy());
            invocation.arg(format!("{root}/*"))
        } else {
            invocation.values(paths)
        };
        self.exec_text(invocation)
    }

    fn commit(&self, options: &CommitOptions) -> Result<String, DvcsError> {
        self.exec_text(
            self.commands
                .command("commit")
                .arg("-m")
                .value(&options.message)
                .flag_if(options.addremove, "--addremove")
                .opt_value("--user", options.user.as_deref())
                .values(&options.files),
        )
    }

    fn merge(&self, options: &MergeOptions) -> Result<String, DvcsError> {
        ensure_branch_or_revision(options.branch.as_deref(), options.revision.as_deref())?;

        let tool = |key: &str| format!("merge-tools.{MERGE_TOOL_ALIAS}.{key}");
        self.exec_text(
            self.commands
                .command("merge")
                .opt_arg(options.branch.as_deref())
                .opt_value("--rev", options.revision.as_deref())
                .config(&tool("args"), "$base $local $other $output")
                .config(&tool("priority"), "1000")
                .config(&tool("executable"), &self.merge_tool)
                .config(&tool("premerge"), "True")
                .arg("--noninteractive")
                .flag_if(options.preview, "--preview"),
        )
    }

    fn push(&self, options: &PushOptions) -> Result<ChangeSummary, DvcsError> {
        self.transfer(
            self.commands
                .command("push")
                .flag_if(options.new_branch, "--new-branch")
                .opt_arg(options.destination.as_deref()),
        )
    }

    fn pull(&self, options: &PullOptions) -> Result<ChangeSummary, DvcsError> {
        self.transfer(
            self.commands
                .command("pull")
                .opt_value("--branch", options.branch.as_deref())
                .opt_arg(options.source.as_deref()),
        )
    }

    fn update(&self, options: &UpdateOptions) -> Result<String, DvcsError> {
        ensure_branch_or_revision(options.branch.as_deref(), options.revision.as_deref())?;

        self.exec_text(
            self.commands
                .command("update")
                .opt_arg(options.branch.as_deref())
                .opt_value("--rev", options.revision.as_deref())
                .flag_if(options.clean, "-C"),
        )
    }

    fn init_repo(&self) -> Result<String, DvcsError> {
        self.exec_text(
            self.commands
                .command("init")
                .unscoped()
                .path(self.handle.path()),
        )
    }

    fn status(&self) -> Result<StatusReport, DvcsError> {
        let out = self.exec_text(self.commands.command("status"))?;
        parse_status(&out)
    }

    fn log(&self, branch: Option<&str>) -> Result<Log, DvcsError> {
        self.read_log(self.commands.command("log").opt_value("--branch", branch))
    }

    fn user_commits(&self, user: &str, limit: Option<u32>) -> Result<Vec<LogEntry>, DvcsError> {
        let log = self.read_log(
            self.commands
                .command("log")
                .arg("-u")
                .value(user)
                .opt_value("-l", limit.map(|n| n.to_string())),
        )?;
        Ok(log.into_entries())
    }

    fn changed_between_nodes(&self, start: &str, end: &str) -> Result<StatusReport, DvcsError> {
        let out = self.exec_text(
            self.commands
                .command("status")
                .arg("--rev")
                .value(format!("{start}:{end}")),
        )?;
        parse_status(&out)
    }

    fn branches(&self) -> Result<BranchSet, DvcsError> {
        let out = self.exec_text(self.commands.command("branches").arg("-c"))?;
        let mut set = parse_branches(&out)?;
        set.sort();
        Ok(set)
    }

    fn branch_revisions(&self, branch: &str) -> Result<Vec<LogEntry>, DvcsError> {
        let log = self.read_log(self.commands.command("log").arg("-b").value(branch))?;
        Ok(log.into_entries())
    }

    fn diff_unified(&self, path: &str, identifier: Option<&str>) -> Result<String, DvcsError> {
        self.exec_text(
            self.commands
                .command("diff")
                .value(self.repo_file(path))
                .opt_value("-r", identifier),
        )
    }

    fn diff_html(&self, path: &str, identifier: Option<&str>) -> Result<String, DvcsError> {
        let invocation = self
            .commands
            .command("extdiff")
            .config("extensions.extdiff", "")
            .arg("-p")
            .value(&self.diff_tool)
            .value(self.repo_file(path))
            .opt_value("-r", identifier);
        self.exec(invocation, ExitPolicy::Suppressed)
            .map(Outcome::into_text)
    }

    fn has_new_changesets(&self, branch: Option<&str>) -> Result<bool, DvcsError> {
        let invocation = self.commands.command("incoming").opt_value("--branch", branch);
        match self.exec(invocation, ExitPolicy::ExitOneIsEmpty)? {
            Outcome::Output(out) => Ok(!out.trim().is_empty()),
            Outcome::Empty => Ok(false),
        }
    }

    fn get_new_changesets(&self, branch: Option<&str>) -> Result<Vec<LogEntry>, DvcsError> {
        match self.exec(self.incoming(branch), ExitPolicy::ExitOneIsEmpty)? {
            Outcome::Output(out) => Ok(self.parse_log(&out)?.into_entries()),
            Outcome::Empty => Ok(Vec::new()),
        }
    }

    fn get_changed_files(
        &self,
        start: Option<&str>,
        end: &str,
    ) -> Result<Vec<ChangedFiles>, DvcsError> {
        let range = format!("{}:{end}", start.unwrap_or_default());
        let log = self.read_log(self.commands.command("log").arg("--rev").value(range))?;
        Ok(log
            .into_entries()
            .into_iter()
            .map(|entry| ChangedFiles {
                node: entry.node,
                files: entry.files,
            })
            .collect())
    }

    fn get_head(&self, branch: Option<&str>) -> Result<Option<LogEntry>, DvcsError> {
        let log = self.read_log(
            self.commands
                .command("log")
                .arg("-l")
                .arg("1")
                .opt_value("--branch", branch),
        )?;
        Ok(log.into_entries().into_iter().next())
    }
}
