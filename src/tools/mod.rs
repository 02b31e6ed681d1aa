//! tools
//!
//! Logic behind the external helper programs the backends hand to the
//! tool: `dvcs-mergetool` (wired into `merge`) and `dvcs-difftool` (run by
//! `extdiff` for HTML diffs).

pub mod html_diff;
pub mod merge_tool;
