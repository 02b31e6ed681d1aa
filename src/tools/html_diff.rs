//! tools::html_diff
//!
//! Side-by-side HTML table of a line diff.
//!
//! The output is a single `<table class="diff">` whose rows pair the old
//! and new line numbers with their text. Unchanged lines appear on both
//! sides; a deleted run facing an inserted run is shown as changed
//! (`diff_chg`), unmatched deletions as `diff_sub` and insertions as
//! `diff_add`.

use std::fmt::Write;
use std::time::{Duration, Instant};

use similar::{capture_diff_slices_deadline, Algorithm, DiffTag};

/// Time allowed for searching a minimal diff. Past it the remaining
/// region is reported as one replaced block, which is still a valid edit
/// script.
const DIFF_DEADLINE: Duration = Duration::from_secs(2);

/// One step of an edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOp {
    /// Line present in both inputs: (old index, new index)
    Equal(usize, usize),
    /// Line only in the old input
    Delete(usize),
    /// Line only in the new input
    Insert(usize),
}

/// Compute a line edit script with the linear-space Myers algorithm.
///
/// Within a replaced block all deletions come before all insertions.
pub fn diff_lines(old: &[&str], new: &[&str]) -> Vec<LineOp> {
    let deadline = Instant::now().checked_add(DIFF_DEADLINE);
    let mut ops = Vec::with_capacity(old.len().max(new.len()));

    for op in capture_diff_slices_deadline(Algorithm::Myers, old, new, deadline) {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => ops.extend(
                old_range
                    .zip(new_range)
                    .map(|(i, j)| LineOp::Equal(i, j)),
            ),
            DiffTag::Delete => ops.extend(old_range.map(LineOp::Delete)),
            DiffTag::Insert => ops.extend(new_range.map(LineOp::Insert)),
            DiffTag::Replace => {
                ops.extend(old_range.map(LineOp::Delete));
                ops.extend(new_range.map(LineOp::Insert));
            }
        }
    }
    ops
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\t' => out.push_str("&nbsp;&nbsp;&nbsp;&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

type Cell<'a> = Option<(usize, &'a str, &'static str)>;

fn cell(out: &mut String, side: Cell<'_>) {
    match side {
        Some((index, text, class)) => {
            let text = escape(text);
            let body = if class.is_empty() {
                text
            } else {
                format!("<span class=\"{class}\">{text}</span>")
            };
            let _ = write!(
                out,
                "<td class=\"diff_header\">{}</td><td nowrap=\"nowrap\">{body}</td>",
                index + 1
            );
        }
        None => out.push_str("<td class=\"diff_header\"></td><td nowrap=\"nowrap\"></td>"),
    }
}

fn row(out: &mut String, left: Cell<'_>, right: Cell<'_>) {
    out.push_str("<tr>");
    cell(out, left);
    cell(out, right);
    out.push_str("</tr>\n");
}

/// Render the diff of `old` against `new` as an HTML table.
///
/// # Example
///
/// ```
/// use dvcswrap::tools::html_diff::make_table;
///
/// let html = make_table("a\nb\n", "a\nc\n");
/// assert!(html.starts_with("<table class=\"diff\">"));
/// assert!(html.contains("<span class=\"diff_chg\">c</span>"));
/// ```
pub fn make_table(old: &str, new: &str) -> String {
    let old: Vec<&str> = old.lines().collect();
    let new: Vec<&str> = new.lines().collect();
    let ops = diff_lines(&old, &new);

    let mut out = String::from("<table class=\"diff\">\n<tbody>\n");

    let mut k = 0;
    while k < ops.len() {
        match ops[k] {
            LineOp::Equal(i, j) => {
                row(&mut out, Some((i, old[i], "")), Some((j, new[j], "")));
                k += 1;
            }
            _ => {
                // Collect the whole run of edits, then pair deletions with
                // insertions.
                let mut deleted = Vec::new();
                let mut inserted = Vec::new();
                while k < ops.len() {
                    match ops[k] {
                        LineOp::Delete(i) => deleted.push(i),
                        LineOp::Insert(j) => inserted.push(j),
                        LineOp::Equal(..) => break,
                    }
                    k += 1;
                }
                for p in 0..deleted.len().max(inserted.len()) {
                    let (left, right) = match (deleted.get(p), inserted.get(p)) {
                        (Some(&i), Some(&j)) => (
                            Some((i, old[i], "diff_chg")),
                            Some((j, new[j], "diff_chg")),
                        ),
                        (Some(&i), None) => (Some((i, old[i], "diff_sub")), None),
                        (None, Some(&j)) => (None, Some((j, new[j], "diff_add"))),
                        (None, None) => (None, None),
                    };
                    row(&mut out, left, right);
                }
            }
        }
    }

    out.push_str("</tbody>\n</table>");
    out
}
