//! parse::log
//!
//! Changelog parsing.
//!
//! Two source forms produce identical [`LogEntry`] values:
//!
//! - **XML**, from `log --style xml`: one `logentry` element per change.
//! - **Template**, from `log --template LOG_TEMPLATE`: one line per change,
//!   eight fields separated by a double tab. The files and tags fields are
//!   single-tab joined; the description is a JSON string so embedded
//!   newlines survive the line-oriented format.
//!
//! Both forms are grouped into a [`Log`] by the same function, so the
//! per-branch mapping is identical regardless of source.

use chrono::{DateTime, FixedOffset};

use crate::core::model::{format_author, Log, LogEntry, DEFAULT_BRANCH};
use crate::core::types::NodeId;
use crate::error::DvcsError;

/// Template passed to `log --template` for the line-oriented form.
///
/// Backslash escapes are interpreted by the tool, not by the shell.
pub const LOG_TEMPLATE: &str = r#"{rev}\t\t{node}\t\t{branch}\t\t{author}\t\t{date|isodatesec}\t\t{join(files, "\t")}\t\t{join(tags, "\t")}\t\t{desc|json}\n"#;

/// Separator between template fields.
const FIELD_SEP: &str = "\t\t";

/// Separator inside the files and tags fields.
const ITEM_SEP: char = '\t';

/// Number of fields on each template line.
const TEMPLATE_FIELDS: usize = 8;

/// Parse a timestamp from either supported rendering.
///
/// Accepts RFC 3339 (`2012-03-02T15:49:01+01:00`, as in XML `date`
/// elements) and `isodatesec` (`2012-03-02 15:49:01 +0100`). The offset is
/// always kept; there is no truncating fallback.
///
/// # Example
///
/// ```
/// use dvcswrap::parse::parse_date;
///
/// let a = parse_date("2012-03-02T15:49:01+01:00").unwrap();
/// let b = parse_date("2012-03-02 15:49:01 +0100").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.offset().local_minus_utc(), 3600);
/// ```
pub fn parse_date(raw: &str) -> Result<DateTime<FixedOffset>, DvcsError> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z"))
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M %z"))
        .map_err(|e| DvcsError::parse("date", format!("'{raw}': {e}")))
}

/// Parse `log --style xml` output.
///
/// Text preceding the XML document (e.g. the `comparing with ...` lines
/// printed by `incoming`) is skipped. Blank output is an empty log.
///
/// # Errors
///
/// [`DvcsError::Parse`] for malformed markup, missing attributes, or
/// unparseable field values. The underlying parser message is kept.
pub fn parse_xml_log(xml: &str) -> Result<Log, DvcsError> {
    if xml.trim().is_empty() {
        return Ok(Log::default());
    }

    let start = xml
        .find("<?xml")
        .or_else(|| xml.find("<log"))
        .ok_or_else(|| DvcsError::parse("log", "no XML document in output"))?;

    let doc = roxmltree::Document::parse(&xml[start..]).map_err(|e| DvcsError::parse("log", e))?;

    let root = doc.root_element();
    if !root.has_tag_name("log") {
        return Err(DvcsError::parse(
            "log",
            format!("unexpected root element <{}>", root.tag_name().name()),
        ));
    }

    let entries = root
        .children()
        .filter(|n| n.has_tag_name("logentry"))
        .map(parse_xml_entry)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Log::from_entries(entries))
}

fn parse_xml_entry(node: roxmltree::Node<'_, '_>) -> Result<LogEntry, DvcsError> {
    let revision = node
        .attribute("revision")
        .ok_or_else(|| DvcsError::parse("log", "logentry without revision attribute"))?;
    let revision = parse_revision(revision)?;

    let node_id = node
        .attribute("node")
        .ok_or_else(|| DvcsError::parse("log", format!("logentry {revision} without node")))?;
    let node_id = NodeId::new(node_id)?;

    let mut branch = DEFAULT_BRANCH.to_string();
    let mut author = None;
    let mut message = String::new();
    let mut timestamp = None;
    let mut files = Vec::new();
    let mut tags = Vec::new();

    for child in node.children().filter(|c| c.is_element()) {
        let text = child.text().unwrap_or("");
        match child.tag_name().name() {
            "branch" if !text.is_empty() => branch = text.to_string(),
            "msg" => message = text.to_string(),
            "author" => author = Some(format_author(text, child.attribute("email"))),
            "date" => timestamp = Some(parse_date(text)?),
            "paths" => {
                files = child
                    .children()
                    .filter(|p| p.has_tag_name("path"))
                    .filter_map(|p| p.text())
                    .map(str::to_string)
                    .collect();
            }
            "tag" if !text.is_empty() => tags.push(text.to_string()),
            _ => {}
        }
    }

    let timestamp = timestamp
        .ok_or_else(|| DvcsError::parse("log", format!("logentry {revision} without date")))?;

    Ok(LogEntry {
        revision,
        node: node_id,
        branch,
        author: author.unwrap_or_default(),
        message,
        timestamp,
        files,
        tags,
    })
}

/// Parse output produced with [`LOG_TEMPLATE`].
///
/// Blank lines are ignored; every other line must carry exactly eight
/// fields.
pub fn parse_template_log(out: &str) -> Result<Log, DvcsError> {
    let entries = out
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(parse_template_line)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Log::from_entries(entries))
}

fn parse_template_line(line: &str) -> Result<LogEntry, DvcsError> {
    let fields: Vec<&str> = line.split(FIELD_SEP).collect();
    let [rev, node, branch, author, date, files, tags, desc] = fields[..] else {
        return Err(DvcsError::parse(
            "log",
            format!(
                "expected {} fields, got {} in line {:?}",
                TEMPLATE_FIELDS,
                fields.len(),
                line
            ),
        ));
    };

    let message: String = serde_json::from_str(desc)
        .map_err(|e| DvcsError::parse("log", format!("description {desc:?}: {e}")))?;

    Ok(LogEntry {
        revision: parse_revision(rev)?,
        node: NodeId::new(node.trim())?,
        branch: if branch.is_empty() {
            DEFAULT_BRANCH.to_string()
        } else {
            branch.to_string()
        },
        author: normalize_author(author),
        message,
        timestamp: parse_date(date)?,
        files: split_items(files),
        tags: split_items(tags),
    })
}

fn parse_revision(raw: &str) -> Result<u64, DvcsError> {
    raw.trim()
        .parse()
        .map_err(|e| DvcsError::parse("log", format!("revision '{raw}': {e}")))
}

fn split_items(field: &str) -> Vec<String> {
    field
        .split(ITEM_SEP)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize a raw `Name <email>` author string.
fn normalize_author(raw: &str) -> String {
    match raw.split_once('<') {
        Some((name, rest)) => format_author(name, Some(rest.trim_end().trim_end_matches('>'))),
        None => format_author(raw, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML_LOG: &str = r#"<?xml version="1.0"?>
<log>
<logentry revision="6" node="43ada45cd8361f4f2bdbd5e5e5c9a4cde3a8ef00">
<tag>tip</tag>
<parent revision="5" node="bc841aa8bbb1cf6519670192857aeab484a48b56" />
<author email="starenka0@gmail.com">Jan Florian</author>
<date>2012-03-02T16:31:27+01:00</date>
<msg xml:space="preserve">removed one
and &lt;kept&gt; the rest</msg>
<paths>
<path action="R">one</path>
<path action="M">dir with space/two</path>
</paths>
</logentry>
<logentry revision="5" node="bc841aa8bbb1cf6519670192857aeab484a48b56">
<branch>test</branch>
<author email="JUDr.PhDr.Mgr. et Mgr.Henryk Lahola">JUDr.PhDr.Mgr. et Mgr.Henryk Lahola</author>
<date>2012-03-02T15:59:36+01:00</date>
<msg xml:space="preserve">gos knows</msg>
</logentry>
<logentry revision="0" node="690216eee7b291ac9dca0164d660576bdba51d47">
<tag>v0.1</tag>
<tag>first-release</tag>
<author email="starenka0@gmail.com">Jan Florian</author>
<date>2012-03-02T15:49:01+01:00</date>
<msg xml:space="preserve">first</msg>
</logentry>
</log>
"#;

    mod date {
        use super::*;

        #[test]
        fn rfc3339_keeps_offset() {
            let d = parse_date("2012-03-02T15:49:01+01:00").unwrap();
            assert_eq!(d.to_rfc3339(), "2012-03-02T15:49:01+01:00");
        }

        #[test]
        fn isodatesec_keeps_offset() {
            let d = parse_date("2012-03-02 15:49:01 -0530").unwrap();
            assert_eq!(d.to_rfc3339(), "2012-03-02T15:49:01-05:30");
        }

        #[test]
        fn both_forms_agree() {
            assert_eq!(
                parse_date("2012-03-02T15:59:36+01:00").unwrap(),
                parse_date("2012-03-02 15:59:36 +0100").unwrap()
            );
        }

        #[test]
        fn garbage_is_parse_error() {
            assert!(matches!(
                parse_date("yesterday"),
                Err(DvcsError::Parse { what: "date", .. })
            ));
        }
    }

    mod xml {
        use super::*;

        #[test]
        fn parses_all_entries_in_order() {
            let log = parse_xml_log(XML_LOG).unwrap();
            let revs: Vec<u64> = log.entries.iter().map(|e| e.revision).collect();
            assert_eq!(revs, vec![6, 5, 0]);
        }

        #[test]
        fn fields_of_first_entry() {
            let log = parse_xml_log(XML_LOG).unwrap();
            let e = &log.entries[0];
            assert_eq!(e.node.as_str(), "43ada45cd8361f4f2bdbd5e5e5c9a4cde3a8ef00");
            assert_eq!(e.short_id(), "43ada45cd836");
            assert_eq!(e.branch, "default");
            assert_eq!(e.author, "Jan Florian <starenka0@gmail.com>");
            assert_eq!(e.message, "removed one\nand <kept> the rest");
            assert_eq!(e.files, vec!["one", "dir with space/two"]);
            assert_eq!(e.tags, vec!["tip"]);
            assert_eq!(e.timestamp.to_rfc3339(), "2012-03-02T16:31:27+01:00");
        }

        #[test]
        fn branch_element_overrides_default() {
            let log = parse_xml_log(XML_LOG).unwrap();
            assert_eq!(log.entries[1].branch, "test");
            assert_eq!(log.branch("test").len(), 1);
            assert_eq!(log.branch("default").len(), 2);
        }

        #[test]
        fn email_equal_to_name_is_kept() {
            let log = parse_xml_log(XML_LOG).unwrap();
            assert_eq!(
                log.entries[1].author,
                "JUDr.PhDr.Mgr. et Mgr.Henryk Lahola <JUDr.PhDr.Mgr. et Mgr.Henryk Lahola>"
            );
        }

        #[test]
        fn missing_email_attribute_mirrors_name() {
            let xml = r#"<?xml version="1.0"?>
<log>
<logentry revision="1" node="690216eee7b291ac9dca0164d660576bdba51d47">
<author>brogrammer</author>
<date>2012-03-02T15:49:01+01:00</date>
<msg xml:space="preserve">Always look good. Always!</msg>
</logentry>
</log>"#;
            let log = parse_xml_log(xml).unwrap();
            assert_eq!(log.entries[0].author, "brogrammer <brogrammer>");
        }

        #[test]
        fn all_tags_collected() {
            let log = parse_xml_log(XML_LOG).unwrap();
            assert_eq!(log.entries[2].tags, vec!["v0.1", "first-release"]);
        }

        #[test]
        fn files_default_to_empty() {
            let log = parse_xml_log(XML_LOG).unwrap();
            assert!(log.entries[1].files.is_empty());
            assert!(log.entries[1].tags.is_empty());
        }

        #[test]
        fn empty_document() {
            let log = parse_xml_log("<?xml version=\"1.0\"?>\n<log>\n</log>\n").unwrap();
            assert!(log.is_empty());
        }

        #[test]
        fn blank_output_is_empty_log() {
            assert!(parse_xml_log("  \n").unwrap().is_empty());
        }

        #[test]
        fn skips_leading_incoming_noise() {
            let out = format!("comparing with /tmp/remote\nsearching for changes\n{XML_LOG}");
            let log = parse_xml_log(&out).unwrap();
            assert_eq!(log.len(), 3);
        }

        #[test]
        fn malformed_markup_is_parse_error() {
            let result = parse_xml_log("<?xml version=\"1.0\"?>\n<log><logentry revision=\"1\"");
            match result {
                Err(DvcsError::Parse { what, message }) => {
                    assert_eq!(what, "log");
                    assert!(!message.is_empty());
                }
                other => panic!("expected parse error, got {other:?}"),
            }
        }

        #[test]
        fn missing_node_is_parse_error() {
            let xml = r#"<log><logentry revision="1"><date>2012-03-02T15:49:01+01:00</date></logentry></log>"#;
            assert!(matches!(parse_xml_log(xml), Err(DvcsError::Parse { .. })));
        }

        #[test]
        fn missing_date_is_parse_error() {
            let xml = r#"<log><logentry revision="1" node="690216eee7b291ac9dca0164d660576bdba51d47"></logentry></log>"#;
            assert!(matches!(parse_xml_log(xml), Err(DvcsError::Parse { .. })));
        }

        #[test]
        fn wrong_root_is_parse_error() {
            assert!(matches!(
                parse_xml_log("<changes/>"),
                Err(DvcsError::Parse { .. })
            ));
        }

        #[test]
        fn no_xml_at_all_is_parse_error() {
            assert!(matches!(
                parse_xml_log("abort: repository not found"),
                Err(DvcsError::Parse { .. })
            ));
        }
    }

    mod template {
        use super::*;

        const TEMPLATE_LOG: &str = concat!(
            "6\t\t43ada45cd8361f4f2bdbd5e5e5c9a4cde3a8ef00\t\tdefault\t\tJan Florian <starenka0@gmail.com>\t\t2012-03-02 16:31:27 +0100\t\tone\tdir with space/two\t\ttip\t\t\"removed one\\nand <kept> the rest\"\n",
            "5\t\tbc841aa8bbb1cf6519670192857aeab484a48b56\t\ttest\t\tJUDr.PhDr.Mgr. et Mgr.Henryk Lahola\t\t2012-03-02 15:59:36 +0100\t\t\t\t\t\t\"gos knows\"\n",
            "0\t\t690216eee7b291ac9dca0164d660576bdba51d47\t\tdefault\t\tJan Florian <starenka0@gmail.com>\t\t2012-03-02 15:49:01 +0100\t\t\t\tv0.1\tfirst-release\t\t\"first\"\n",
        );

        #[test]
        fn matches_xml_form() {
            let from_template = parse_template_log(TEMPLATE_LOG).unwrap();
            let from_xml = parse_xml_log(XML_LOG).unwrap();
            assert_eq!(from_template.entries.len(), from_xml.entries.len());
            for (t, x) in from_template.entries.iter().zip(&from_xml.entries) {
                assert_eq!(t.revision, x.revision);
                assert_eq!(t.node, x.node);
                assert_eq!(t.branch, x.branch);
                assert_eq!(t.message, x.message);
                assert_eq!(t.timestamp.to_rfc3339(), x.timestamp.to_rfc3339());
                assert_eq!(t.files, x.files);
                assert_eq!(t.tags, x.tags);
            }
        }

        #[test]
        fn author_without_email_is_mirrored() {
            let log = parse_template_log(TEMPLATE_LOG).unwrap();
            assert_eq!(
                log.entries[1].author,
                "JUDr.PhDr.Mgr. et Mgr.Henryk Lahola <JUDr.PhDr.Mgr. et Mgr.Henryk Lahola>"
            );
            assert_eq!(log.entries[0].author, "Jan Florian <starenka0@gmail.com>");
        }

        #[test]
        fn empty_files_tokens_are_dropped() {
            // files field is "\ta": a leading empty token
            let line = "1\t\t690216eee7b291ac9dca0164d660576bdba51d47\t\t\t\ta <a@b>\t\t2012-03-02 15:49:01 +0100\t\t\ta\t\tb\t\t\"\"";
            let log = parse_template_log(line).unwrap();
            let e = &log.entries[0];
            assert_eq!(e.branch, "default");
            assert_eq!(e.files, vec!["a"]);
            assert_eq!(e.tags, vec!["b"]);
            assert_eq!(e.message, "");
        }

        #[test]
        fn blank_output_is_empty_log() {
            assert!(parse_template_log("").unwrap().is_empty());
            assert!(parse_template_log("\n\n").unwrap().is_empty());
        }

        #[test]
        fn wrong_arity_is_parse_error() {
            let result = parse_template_log("1\t\tabc\t\tdefault\n");
            match result {
                Err(DvcsError::Parse { message, .. }) => {
                    assert!(message.contains("expected 8 fields, got 3"))
                }
                other => panic!("expected parse error, got {other:?}"),
            }
        }

        #[test]
        fn bad_description_is_parse_error() {
            let line = "1\t\t690216eee7b291ac9dca0164d660576bdba51d47\t\tdefault\t\ta\t\t2012-03-02 15:49:01 +0100\t\t\t\t\t\tnot json";
            assert!(matches!(
                parse_template_log(line),
                Err(DvcsError::Parse { .. })
            ));
        }

        #[test]
        fn bad_revision_is_parse_error() {
            let line = "x\t\t690216eee7b291ac9dca0164d660576bdba51d47\t\tdefault\t\ta\t\t2012-03-02 15:49:01 +0100\t\t\t\t\t\t\"m\"";
            assert!(matches!(
                parse_template_log(line),
                Err(DvcsError::Parse { .. })
            ));
        }

        #[test]
        fn template_separators_are_literal_escapes() {
            assert!(LOG_TEMPLATE.contains(r"\t\t"));
            assert!(!LOG_TEMPLATE.contains('\t'));
            assert_eq!(LOG_TEMPLATE.matches(r"\t\t").count(), TEMPLATE_FIELDS - 1);
        }
    }
}
