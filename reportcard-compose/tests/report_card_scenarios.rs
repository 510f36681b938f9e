//! End-to-end composer scenarios with a recording typesetter.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use reportcard_compose::{
    composer::{BASIC_TEMPLATE, TOP_LEVEL_TEMPLATE},
    typeset::document_path,
    Composer, ComposerConfig, SectionArgs, TypesetError, Typesetter,
};
use reportcard_core::{CapacityLimits, Diagnostic, Status};
use rstest::rstest;
use tempfile::TempDir;

const REPORT_CARD: &str = r#"\documentclass{article}
\title{Report card: {{ trialID }} }
\begin{document}
\input{ {{ section0 }} }
\input{ {{ section1 }} }
% last: [{{ section9 }}]
\end{document}
"#;

const INTRO: &str = r#"\section{Intro}
{{ argument0 }}
\includegraphics{ {{ rawArgument0 }} }
{% for row in seqArguments0 %}{{ row }};{% endfor %}
"#;

const BASIC: &str = "{{ trialID }}/{{ name }}/{{ creator }}/{{ type }}/{{ robotType }}/\
{{ description }}/{{ time }}/{{ totalTime }}/{{ totalTimeFigure }}";

#[derive(Default)]
struct Recorder {
    calls: RefCell<Vec<(PathBuf, PathBuf, PathBuf)>>,
}

impl Typesetter for Recorder {
    fn typeset(
        &self,
        markup: &Path,
        output_dir: &Path,
        resource_dir: &Path,
    ) -> Result<PathBuf, TypesetError> {
        self.calls.borrow_mut().push((
            markup.to_path_buf(),
            output_dir.to_path_buf(),
            resource_dir.to_path_buf(),
        ));
        let document = document_path(markup, output_dir);
        std::fs::write(&document, b"%PDF-1.5").expect("write document");
        Ok(document)
    }
}

fn template_dir() -> TempDir {
    let dir = TempDir::new().expect("templates");
    for (name, body) in [
        (TOP_LEVEL_TEMPLATE, REPORT_CARD),
        ("intro", INTRO),
        (BASIC_TEMPLATE, BASIC),
    ] {
        std::fs::write(dir.path().join(format!("{name}.tex")), body).expect("write template");
    }
    dir
}

#[test]
fn intro_section_keeps_escaped_and_raw_values_apart() {
    let tpl = template_dir();
    let work = TempDir::new().expect("work");
    let composer = Composer::new(ComposerConfig::new(tpl.path()), Recorder::default());

    let args = SectionArgs {
        arguments: vec!["50% done".into()],
        raw_arguments: vec!["/tmp/img.png".into()],
        ..Default::default()
    };
    let outcome = composer.render_section(work.path(), "intro", &args);

    assert_eq!(outcome.status(), Status::Success);
    let markup = std::fs::read_to_string(&outcome.path).expect("read section");
    assert!(markup.contains("50\\% done"), "{markup}");
    assert!(markup.contains("/tmp/img.png"), "{markup}");
    assert!(composer.typesetter().calls.borrow().is_empty());
}

#[test]
fn sections_feed_the_top_level_render() {
    let tpl = template_dir();
    let work = TempDir::new().expect("work");
    let composer = Composer::new(ComposerConfig::new(tpl.path()), Recorder::default());

    let intro = composer.render_section(
        work.path(),
        "intro",
        &SectionArgs {
            arguments: vec!["ok".into()],
            raw_arguments: vec!["img.png".into()],
            seq_arguments: vec![vec!["a_1".into(), "b".into()]],
            ..Default::default()
        },
    );
    let intro_path = intro.path.to_string_lossy().into_owned();
    let outcome = composer.generate(work.path(), "T42", &[intro_path.as_str()]);

    assert!(outcome.is_clean(), "{:?}", outcome.diagnostics);
    assert_eq!(outcome.path, work.path().join("rc.pdf"));

    let rc = std::fs::read_to_string(work.path().join("rc.tex")).expect("read rc.tex");
    assert!(rc.contains(&format!("\\input{{ {intro_path} }}")), "{rc}");
    assert!(rc.contains("Report card: T42"));
    assert!(rc.contains("% last: []"));

    let calls = composer.typesetter().calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, work.path().join("rc.tex"));
    assert_eq!(calls[0].1, work.path());
    assert_eq!(calls[0].2, tpl.path());
}

#[test]
fn eleven_sections_report_capacity_and_still_return_a_path() {
    let tpl = template_dir();
    let work = TempDir::new().expect("work");
    let temp = work.path().join("rc");
    let composer = Composer::new(ComposerConfig::new(tpl.path()), Recorder::default());

    let sections: Vec<String> = (1..=11).map(|i| format!("/tmp/rc/p{i}.tex")).collect();
    let outcome = composer.generate(&temp, "T42", &sections);

    let capacity: Vec<_> = outcome.capacity_exceeded().collect();
    assert_eq!(
        capacity,
        vec![&Diagnostic::CapacityExceeded {
            group: "section".into(),
            limit: 10,
            count: 11,
        }]
    );
    assert_eq!(outcome.status(), Status::Partial);
    assert!(outcome.path.starts_with(&temp));
    assert!(outcome.path.is_file());
}

#[test]
fn basic_binds_nine_slots_by_position() {
    let tpl = template_dir();
    let work = TempDir::new().expect("work");
    let composer = Composer::new(ComposerConfig::new(tpl.path()), Recorder::default());

    let args = [
        "T_1", "pick&place", "alice", "demo", "PR2", "50% success", "12:00", "3.5s", "fig.png",
    ];
    let outcome = composer.basic(work.path(), &args);

    assert!(outcome.is_clean(), "{:?}", outcome.diagnostics);
    assert!(outcome.path.ends_with("basic.pdf"));
    let markup = std::fs::read_to_string(work.path().join("basic.tex")).expect("read");
    assert_eq!(
        markup,
        "T\\_1/pick\\&place/alice/demo/PR2/50\\% success/12:00/3.5s/fig.png"
    );
}

#[rstest]
#[case(8, 0)]
#[case(9, 0)]
#[case(10, 1)]
fn basic_argument_count(#[case] n: usize, #[case] expected_capacity: usize) {
    let tpl = template_dir();
    let work = TempDir::new().expect("work");
    let composer = Composer::new(ComposerConfig::new(tpl.path()), Recorder::default());

    let args: Vec<String> = (0..n).map(|i| format!("v{i}")).collect();
    let outcome = composer.basic(work.path(), &args);
    assert_eq!(outcome.capacity_exceeded().count(), expected_capacity);
    assert!(outcome.path.is_file());
}

#[test]
fn over_long_sequences_are_reported_per_sequence() {
    let tpl = template_dir();
    let work = TempDir::new().expect("work");
    let config = ComposerConfig {
        template_dir: tpl.path().to_path_buf(),
        limits: CapacityLimits {
            sequence_elements: 3,
            ..CapacityLimits::default()
        },
    };
    let composer = Composer::new(config, Recorder::default());

    let long: Vec<String> = (0..4).map(|i| i.to_string()).collect();
    let args = SectionArgs {
        arguments: vec!["x".into()],
        raw_arguments: vec!["y".into()],
        seq_arguments: vec![long.clone(), vec!["ok".into()]],
        raw_seq_arguments: vec![long],
    };
    let outcome = composer.render_section(work.path(), "intro", &args);

    let groups: Vec<String> = outcome
        .capacity_exceeded()
        .map(|d| match d {
            Diagnostic::CapacityExceeded { group, .. } => group.clone(),
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(groups, vec!["seqArguments0", "rawSeqArguments0"]);
    // the fragment is still rendered with every element
    let markup = std::fs::read_to_string(&outcome.path).expect("read");
    assert!(markup.contains("0;1;2;3;"), "{markup}");
}

#[test]
fn unknown_section_template_is_a_render_diagnostic() {
    let tpl = template_dir();
    let work = TempDir::new().expect("work");
    let composer = Composer::new(ComposerConfig::new(tpl.path()), Recorder::default());

    let outcome = composer.render_section(work.path(), "missing", &SectionArgs::default());
    assert_eq!(outcome.status(), Status::Failed);
    assert_eq!(outcome.path, work.path().join("missing.tex"));
    match outcome.diagnostics.as_slice() {
        [Diagnostic::Render { template, message }] => {
            assert_eq!(template, "missing");
            assert!(message.contains("missing.tex"), "{message}");
        }
        other => panic!("unexpected diagnostics: {other:?}"),
    }
}
