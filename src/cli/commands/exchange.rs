//! Commands that talk to other repositories: merge, push, pull, incoming.

use anyhow::{Context as _, Result};

use super::{Context, Exit};
use crate::adapter::{MergeOptions, PullOptions, PushOptions};
use crate::core::model::ChangeSummary;
use crate::parse::parse_conflicts;
use crate::ui::output;

/// Merge, optionally printing the merge-tool reports instead of the output.
pub fn merge(
    ctx: &Context,
    branch: Option<String>,
    revision: Option<String>,
    preview: bool,
    conflicts: bool,
) -> Result<()> {
    let options = MergeOptions {
        branch,
        revision,
        preview,
    };
    let out = ctx.open()?.merge(&options)?;

    if !conflicts {
        return ctx.show_output(&out);
    }

    let reports = parse_conflicts(&out).context("Failed to read merge-tool reports")?;
    ctx.show(&reports, || {
        reports
            .iter()
            .map(|c| {
                format!(
                    "{}\n  base:  {}\n  local: {}\n  other: {}",
                    c.tar.display(),
                    c.base.display(),
                    c.local.display(),
                    c.other.display()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn show_summary(ctx: &Context, verb: &str, summary: &ChangeSummary) -> Result<()> {
    if ctx.json {
        return ctx.show(summary, String::new);
    }
    if summary.is_zero() {
        output::print("no changes found", ctx.verbosity);
    } else {
        output::print(format!("{verb} {summary}"), ctx.verbosity);
    }
    Ok(())
}

pub fn push(ctx: &Context, destination: Option<String>, new_branch: bool) -> Result<()> {
    let summary = ctx.open()?.push(&PushOptions {
        destination,
        new_branch,
    })?;
    show_summary(ctx, "pushed", &summary)
}

pub fn pull(ctx: &Context, source: Option<String>, branch: Option<String>) -> Result<()> {
    let summary = ctx.open()?.pull(&PullOptions { source, branch })?;
    show_summary(ctx, "pulled", &summary)
}

/// List incoming changesets, or with `check` only signal via exit status.
pub fn incoming(ctx: &Context, branch: Option<&str>, check: bool) -> Result<()> {
    let repo = ctx.open()?;

    if check {
        let any = repo.has_new_changesets(branch)?;
        if ctx.json {
            ctx.show(&serde_json::json!({ "incoming": any }), String::new)?;
        }
        if !any {
            return Err(Exit(1).into());
        }
        return Ok(());
    }

    let entries = repo.get_new_changesets(branch)?;
    ctx.show(&entries, || output::format_entries(&entries))
}
