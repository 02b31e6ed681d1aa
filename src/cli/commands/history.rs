//! History commands.

use anyhow::Result;

use super::Context;
use crate::ui::output;

pub fn log(ctx: &Context, branch: Option<&str>) -> Result<()> {
    let log = ctx.open()?.log(branch)?;
    ctx.show(&log, || output::format_entries(&log.entries))
}

pub fn user_commits(ctx: &Context, user: &str, limit: Option<u32>) -> Result<()> {
    let entries = ctx.open()?.user_commits(user, limit)?;
    ctx.show(&entries, || output::format_entries(&entries))
}

pub fn branches(ctx: &Context) -> Result<()> {
    let set = ctx.open()?.branches()?;
    ctx.show(&set, || output::format_branches(&set))
}

pub fn branch_revisions(ctx: &Context, branch: &str) -> Result<()> {
    let entries = ctx.open()?.branch_revisions(branch)?;
    ctx.show(&entries, || output::format_entries(&entries))
}

pub fn head(ctx: &Context, branch: Option<&str>) -> Result<()> {
    let head = ctx.open()?.get_head(branch)?;
    ctx.show(&head, || {
        head.as_ref()
            .map(output::format_entry)
            .unwrap_or_else(|| "no changesets".to_string())
    })
}

pub fn changed_files(ctx: &Context, start: Option<&str>, end: &str) -> Result<()> {
    let changed = ctx.open()?.get_changed_files(start, end)?;
    ctx.show(&changed, || output::format_changed_files(&changed))
}
