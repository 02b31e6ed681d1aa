//! End-to-end adapter flows against a scripted runner.
//!
//! Each test opens a repository through the public factory, scripts the
//! tool's output, and checks both the structured result and the exact
//! command the adapter handed to the shell.

use std::sync::Arc;

use dvcswrap::adapter::{
    open_repository_with, AdapterConfig, CommitOptions, Dvcs, LogFormat, MergeOptions,
    PushOptions, UpdateOptions,
};
use dvcswrap::core::model::{BranchStatus, ChangeSummary};
use dvcswrap::process::mock::MockRunner;
use dvcswrap::process::RunOutput;
use dvcswrap::DvcsError;

const XML_LOG: &str = r#"<?xml version="1.0"?>
<log>
<logentry revision="6" node="43ada45cd8361f4f2bdbd5e5e5c9a4cde3a8ef00">
<tag>tip</tag>
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
<date>2012-03-02T15:49:01+01:00</date>
<msg xml:space="preserve">gos knows</msg>
<paths>
<path action="A">three</path>
</paths>
</logentry>
<logentry revision="0" node="690216eee7b291ac9dca0164d660576bdba51d47">
<tag>v0.1</tag>
<tag>first-release</tag>
<author email="starenka0@gmail.com">Jan Florian</author>
<date>2012-02-28T10:00:00+01:00</date>
<msg xml:space="preserve">first</msg>
<paths>
<path action="A">one</path>
</paths>
</logentry>
</log>
"#;

const TEMPLATE_LOG: &str = concat!(
    "6\t\t43ada45cd8361f4f2bdbd5e5e5c9a4cde3a8ef00\t\t\t\tJan Florian <starenka0@gmail.com>\t\t2012-03-02 16:31:27 +0100\t\tone\tdir with space/two\t\ttip\t\t\"removed one\\nand <kept> the rest\"\n",
    "5\t\tbc841aa8bbb1cf6519670192857aeab484a48b56\t\ttest\t\tJUDr.PhDr.Mgr. et Mgr.Henryk Lahola\t\t2012-03-02 15:49:01 +0100\t\tthree\t\t\t\t\"gos knows\"\n",
    "0\t\t690216eee7b291ac9dca0164d660576bdba51d47\t\tdefault\t\tJan Florian <starenka0@gmail.com>\t\t2012-02-28 10:00:00 +0100\t\tone\t\tv0.1\tfirst-release\t\t\"first\"\n",
);

const BRANCHES: &str = "\
default                                    10:0d3f1a2b3c4d
apache-proxy                                8:1a2b3c4d5e6f
venv_reloc_fix                              5:2b3c4d5e6f70 (inactive)
nginx-apache                                4:3c4d5e6f7081 (inactive)
django1.4 (beta)                            3:4d5e6f708192 (closed)
evil with spaces and 1 digit and 1.0 float! 2:5e6f708192a3 (inactive)
";

fn open(runner: &MockRunner) -> Box<dyn Dvcs> {
    open_with(runner, AdapterConfig::default())
}

fn open_with(runner: &MockRunner, config: AdapterConfig) -> Box<dyn Dvcs> {
    open_repository_with("/srv/repo", "mercurial.hg", config, Arc::new(runner.clone())).unwrap()
}

mod history {
    use super::*;

    #[test]
    fn xml_log_groups_by_branch() {
        let runner = MockRunner::new().respond(RunOutput::ok(XML_LOG));
        let repo = open(&runner);

        let log = repo.log(None).unwrap();

        assert_eq!(log.len(), 3);
        assert_eq!(log.branch("default").len(), 2);
        assert_eq!(log.branch("test").len(), 1);
        let bucketed: usize = log.by_branch.values().map(Vec::len).sum();
        assert_eq!(bucketed, log.len());

        let tip = &log.entries[0];
        assert_eq!(tip.revision, 6);
        assert_eq!(tip.short_id(), "43ada45cd836");
        assert_eq!(tip.author, "Jan Florian <starenka0@gmail.com>");
        assert_eq!(tip.message, "removed one\nand <kept> the rest");
        assert_eq!(tip.files, vec!["one", "dir with space/two"]);
        assert_eq!(tip.tags, vec!["tip"]);

        assert_eq!(
            runner.last_command().unwrap(),
            "hg -R /srv/repo log --style xml --verbose"
        );
    }

    #[test]
    fn template_form_matches_xml_form() {
        let xml_runner = MockRunner::new().respond(RunOutput::ok(XML_LOG));
        let tpl_runner = MockRunner::new().respond(RunOutput::ok(TEMPLATE_LOG));

        let from_xml = open(&xml_runner).log(None).unwrap();
        let from_template = open_with(
            &tpl_runner,
            AdapterConfig::default().with_log_format(LogFormat::Template),
        )
        .log(None)
        .unwrap();

        assert_eq!(from_xml.entries, from_template.entries);
        assert_eq!(from_xml.by_branch, from_template.by_branch);
        assert!(tpl_runner
            .last_command()
            .unwrap()
            .starts_with("hg -R /srv/repo log --template '"));
    }

    #[test]
    fn author_without_email_repeats_name() {
        let runner = MockRunner::new().respond(RunOutput::ok(XML_LOG));
        let log = open(&runner).branch_revisions("test").unwrap();
        assert_eq!(
            log[0].author,
            "JUDr.PhDr.Mgr. et Mgr.Henryk Lahola <JUDr.PhDr.Mgr. et Mgr.Henryk Lahola>"
        );
    }

    #[test]
    fn head_is_first_entry() {
        let runner = MockRunner::new().respond(RunOutput::ok(XML_LOG));
        let head = open(&runner).get_head(Some("default")).unwrap().unwrap();
        assert_eq!(head.revision, 6);
        assert_eq!(
            runner.last_command().unwrap(),
            "hg -R /srv/repo log -l 1 --branch default --style xml --verbose"
        );
    }

    #[test]
    fn changed_files_pair_nodes_with_paths() {
        let runner = MockRunner::new().respond(RunOutput::ok(XML_LOG));
        let changed = open(&runner).get_changed_files(None, "6").unwrap();
        assert_eq!(changed.len(), 3);
        assert_eq!(changed[1].node.short(), "bc841aa8bbb1");
        assert_eq!(changed[1].files, vec!["three"]);
    }

    #[test]
    fn incoming_exit_one_is_empty() {
        let runner = MockRunner::new()
            .respond(RunOutput::exit(1, "comparing with /srv/upstream\nno changes found\n", ""))
            .respond(RunOutput::exit(1, "comparing with /srv/upstream\nno changes found\n", ""));
        let repo = open(&runner);

        assert!(!repo.has_new_changesets(None).unwrap());
        assert!(repo.get_new_changesets(None).unwrap().is_empty());
    }

    #[test]
    fn malformed_log_is_parse_error() {
        let runner = MockRunner::new().respond(RunOutput::ok("<log><logentry revision=\"1\">"));
        let err = open(&runner).log(None).unwrap_err();
        assert!(matches!(err, DvcsError::Parse { what: "log", .. }));
    }
}

mod working_copy {
    use super::*;

    #[test]
    fn branches_land_in_status_buckets() {
        let runner = MockRunner::new().respond(RunOutput::ok(BRANCHES));
        let set = open(&runner).branches().unwrap();

        assert_eq!(set.all.len(), 6);
        assert_eq!(
            set.bucket(BranchStatus::Active),
            &["apache-proxy".to_string(), "default".to_string()][..]
        );
        assert_eq!(set.closed, vec!["django1.4 (beta)"]);
        assert_eq!(set.inactive.len(), 3);
        assert!(set
            .inactive
            .contains(&"evil with spaces and 1 digit and 1.0 float!".to_string()));
        assert_eq!(runner.last_command().unwrap(), "hg -R /srv/repo branches -c");
    }

    #[test]
    fn status_buckets() {
        let runner = MockRunner::new().respond(RunOutput::ok("A asd\n? test_file.txt\n"));
        let report = open(&runner).status().unwrap();

        assert_eq!(report.added, vec!["asd"]);
        assert_eq!(report.not_versioned, vec!["test_file.txt"]);
        assert!(report.missing.is_empty());
        assert!(report.modified.is_empty());
        assert!(report.removed.is_empty());
        assert_eq!(runner.last_command().unwrap(), "hg -R /srv/repo status");
    }

    #[test]
    fn commit_then_update() {
        let runner = MockRunner::new();
        let repo = open(&runner);

        repo.commit(&CommitOptions::new("initial import")).unwrap();
        repo.update(&UpdateOptions {
            branch: Some("test".into()),
            ..UpdateOptions::default()
        })
        .unwrap();

        let commands = runner.commands();
        assert_eq!(commands.len(), 2);
        assert!(commands[0].starts_with("hg -R /srv/repo commit"));
        assert!(commands[0].contains("'initial import'"));
        assert!(commands[1].contains("update"));
        assert!(commands[1].contains("test"));
    }

    #[test]
    fn commit_failure_keeps_diagnostics() {
        let runner = MockRunner::new().respond(RunOutput::exit(1, "nothing changed", ""));
        let err = open(&runner)
            .commit(&CommitOptions::new("noop"))
            .unwrap_err();

        assert_eq!(err.exit_code(), Some(1));
        assert_eq!(err.stdout(), Some("nothing changed"));
    }

    #[test]
    fn merge_precondition_spawns_nothing() {
        let runner = MockRunner::new();
        let err = open(&runner)
            .merge(&MergeOptions {
                branch: Some("test".into()),
                revision: Some("5".into()),
                preview: false,
            })
            .unwrap_err();

        assert!(matches!(err, DvcsError::Precondition(_)));
        assert!(runner.commands().is_empty());
    }

    #[test]
    fn commands_have_single_spaces() {
        let runner = MockRunner::new();
        let repo = open(&runner);

        repo.push(&PushOptions::default()).unwrap();
        repo.merge(&MergeOptions::default()).unwrap();
        repo.update(&UpdateOptions::default()).unwrap();
        repo.status().unwrap();

        for cmd in runner.commands() {
            assert!(!cmd.contains("  "), "double space in {cmd:?}");
            assert!(!cmd.ends_with(' '), "trailing space in {cmd:?}");
        }
    }
}

mod exchange {
    use super::*;

    #[test]
    fn push_summary() {
        let runner = MockRunner::new().respond(RunOutput::ok(
            "pushing to /srv/upstream\nsearching for changes\nadding changesets\nadding manifests\nadding file changes\nadded 1 changesets with 1 changes to 1 files\n",
        ));
        let summary = open(&runner).push(&PushOptions::default()).unwrap();
        assert_eq!(
            summary,
            ChangeSummary {
                changesets: 1,
                changes: 1,
                files: 1
            }
        );
    }

    #[test]
    fn push_nothing_is_zero() {
        let runner = MockRunner::new().respond(RunOutput::exit(
            1,
            "pushing to /srv/upstream\nsearching for changes\nno changes found\n",
            "",
        ));
        let summary = open(&runner).push(&PushOptions::default()).unwrap();
        assert!(summary.is_zero());
    }

    #[test]
    fn push_abort_is_command_failure() {
        let runner = MockRunner::new().respond(RunOutput::exit(
            255,
            "pushing to /srv/upstream\n",
            "abort: repository /srv/upstream not found!\n",
        ));
        let err = open(&runner).push(&PushOptions::default()).unwrap_err();
        assert_eq!(err.exit_code(), Some(255));
        assert!(err.stderr().unwrap().contains("not found"));
    }
}

mod registry {
    use super::*;

    #[test]
    fn unknown_backend_spawns_nothing() {
        let runner = MockRunner::new();
        let err = open_repository_with(
            "/srv/repo",
            "svn",
            AdapterConfig::default(),
            Arc::new(runner.clone()),
        )
        .err()
        .expect("expected UnknownBackend error");

        assert!(matches!(err, DvcsError::UnknownBackend { .. }));
        assert!(err.to_string().contains("hg, git"));
        assert!(runner.commands().is_empty());
    }

    #[test]
    fn git_backend_reports_missing_operations() {
        let runner = MockRunner::new();
        let repo = open_repository_with(
            "/srv/repo",
            "git",
            AdapterConfig::default(),
            Arc::new(runner.clone()),
        )
        .unwrap();

        assert_eq!(repo.name(), "git");
        let err = repo.push(&PushOptions::default()).unwrap_err();
        assert!(err.is_not_implemented());
        assert!(runner.commands().is_empty());

        repo.init_repo().unwrap();
        assert_eq!(runner.commands().len(), 1);
    }

    #[test]
    fn binary_override_applies_to_one_operation() {
        let runner = MockRunner::new();
        let repo = open_with(
            &runner,
            AdapterConfig::default().with_binary_override("status", "/opt/hg/bin/hg"),
        );

        repo.status().unwrap();
        repo.branches().unwrap();

        let commands = runner.commands();
        assert!(commands[0].starts_with("/opt/hg/bin/hg -R /srv/repo status"));
        assert!(commands[1].starts_with("hg -R /srv/repo branches"));
    }
}
