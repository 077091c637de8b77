use crate::common::command::{run_domdiff, workspace_dir};
use crate::common::snapshot::write_page;
use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use predicates::prelude::*;
use rstest::rstest;

mod common;

#[rstest]
fn default_palette_is_printed(workspace_dir: TempDir) {
    run_domdiff(workspace_dir.path(), &["stylesheet"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            ".dd-changed { background-color: #ffff40; }\n",
        ))
        .stdout(predicate::str::contains("data-ddid").not());
}

#[rstest]
fn selected_rules_use_the_loaded_palette(workspace_dir: TempDir) {
    workspace_dir
        .child("colors.json")
        .write_str(r##"{ "selectedChanged": { "background": "#0000ff", "text": "#ffffff" } }"##)
        .unwrap();

    run_domdiff(
        workspace_dir.path(),
        &["stylesheet", "--select", "2", "--colors", "colors.json"],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains(
        ".dd-changed[data-ddid=\"2\"] { color: #ffffff; background-color: #0000ff; }",
    ));
}

#[rstest]
fn invalid_palette_is_an_error(workspace_dir: TempDir) {
    workspace_dir
        .child("colors.json")
        .write_str(r#"{ "word": { "background": "yellow" } }"#)
        .unwrap();

    run_domdiff(workspace_dir.path(), &["stylesheet", "--colors", "colors.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid colour: yellow"));
}

#[rstest]
fn segments_list_node_ids_and_text(workspace_dir: TempDir) {
    let page = write_page(&workspace_dir, "page.json", &["hello", "world"]);

    run_domdiff(workspace_dir.path(), &["segments", &page])
        .assert()
        .success()
        .stdout(predicate::str::contains("pane 0"))
        .stdout(predicate::str::contains("    0       20 \"hello\""))
        .stdout(predicate::str::contains("    1       21 \"world\""));
}
