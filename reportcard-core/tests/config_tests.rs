//! Config error-message and package-resolution integration tests.

use assert_fs::prelude::*;
use predicates::prelude::*;
use reportcard_core::{config, ConfigError};

// ---------------------------------------------------------------------------
// 1. Load error messages
// ---------------------------------------------------------------------------

#[test]
fn load_corrupt_yaml_returns_parse_error_with_path() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    home.child(".reportcard/config.yaml")
        .write_str(": : corrupt : yaml : !!!\n  - broken: [unclosed")
        .expect("write");

    let err = config::load_at(home.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
    assert!(err.to_string().contains("config.yaml"), "must contain file path, got: {err}");
}

#[test]
fn load_wrong_type_yaml_returns_parse_error() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    home.child(".reportcard/config.yaml")
        .write_str("limits: lots\n")
        .expect("write");

    let err = config::load_at(home.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
}

#[test]
fn empty_file_is_default_config() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let file = home.child("config.yaml");
    file.write_str("\n").expect("write");

    let loaded = config::load_from(file.path()).expect("load");
    assert_eq!(loaded, config::Config::default());
}

// ---------------------------------------------------------------------------
// 2. Template dir resolution
// ---------------------------------------------------------------------------

#[test]
fn package_template_dir_resolves_to_existing_directory() {
    let ws = assert_fs::TempDir::new().expect("tempdir");
    let templates = ws.child("report_card/report_card/tex_templates");
    templates.create_dir_all().expect("mkdir");
    templates.child("reportCard.tex").write_str("\\documentclass{article}").expect("write");

    let file = ws.child("config.yaml");
    file.write_str(&format!(
        "template_dir: package://report_card/report_card/tex_templates\npackages:\n  report_card: {}\n",
        ws.child("report_card").path().display()
    ))
    .expect("write config");

    let loaded = config::load_from(file.path()).expect("load");
    let dir = loaded.resolve_template_dir().expect("resolve");
    assert_eq!(dir, templates.path());
    templates
        .child("reportCard.tex")
        .assert(predicate::path::exists());
}

#[test]
fn plain_template_dir_is_untouched() {
    let ws = assert_fs::TempDir::new().expect("tempdir");
    let file = ws.child("config.yaml");
    file.write_str("template_dir: /srv/templates\n").expect("write");

    let loaded = config::load_from(file.path()).expect("load");
    assert_eq!(
        loaded.resolve_template_dir().expect("resolve"),
        std::path::PathBuf::from("/srv/templates")
    );
}
