use crate::common::command::{run_domdiff, run_domdiff_json, workspace_dir};
use crate::common::snapshot::write_page;
use assert_fs::TempDir;
use assert_fs::fixture::PathChild;
use assert_fs::prelude::PathAssert;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use serde_json::json;

mod common;

/// Workspace holding `left.json` and `right.json` that differ in their
/// second paragraph
#[fixture]
fn compared_dir(workspace_dir: TempDir) -> TempDir {
    write_page(&workspace_dir, "left.json", &["one", "two", "three"]);
    write_page(&workspace_dir, "right.json", &["one", "deux", "three"]);
    workspace_dir
}

#[rstest]
fn highlight_reports_patches_per_pane(compared_dir: TempDir) {
    let report = run_domdiff_json(
        compared_dir.path(),
        &["highlight", "left.json", "right.json", "--no-word-diff"],
    );

    assert_eq!(
        report["patches"],
        json!([
            [{
                "nodeId": 21,
                "serializedMarkup": "<SPAN class=\"dd-diff dd-changed\" data-ddid=\"0\" data-ddtext=\"two\">two</SPAN>"
            }],
            [{
                "nodeId": 21,
                "serializedMarkup": "<SPAN class=\"dd-diff dd-changed\" data-ddid=\"0\" data-ddtext=\"deux\">deux</SPAN>"
            }]
        ])
    );
    assert_eq!(report["selected"], json!(null));
}

#[rstest]
fn word_runs_are_marked_inside_wrappers(compared_dir: TempDir) {
    let report = run_domdiff_json(compared_dir.path(), &["highlight", "left.json", "right.json"]);

    let markup = report["patches"][1][0]["serializedMarkup"].as_str().unwrap();
    assert!(markup.contains("<SPAN class=\"dd-wdiff dd-word\">deux</SPAN>"));
}

#[rstest]
fn selection_is_reported_with_its_nodes(compared_dir: TempDir) {
    let report = run_domdiff_json(
        compared_dir.path(),
        &["highlight", "left.json", "right.json", "--select", "0"],
    );

    assert_eq!(report["selected"], json!(0));
    assert_eq!(report["selectedNodeIds"], json!([21, 21]));
    assert!(
        report["stylesheet"]
            .as_str()
            .unwrap()
            .contains(".dd-changed[data-ddid=\"0\"]")
    );
}

#[rstest]
fn out_dir_receives_every_pane(compared_dir: TempDir) {
    run_domdiff(
        compared_dir.path(),
        &["highlight", "left.json", "right.json", "--out-dir", "out"],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("Highlighted 2 panes with 1 diffs"));

    for file in [
        "pane-0.json",
        "pane-1.json",
        "pane-0.patches.json",
        "pane-1.patches.json",
        "domdiff.css",
    ] {
        compared_dir.child("out").child(file).assert(predicate::path::exists());
    }
    compared_dir
        .child("out/pane-0.json")
        .assert(predicate::str::contains("dd-changed"));
}

#[rstest]
fn revert_undoes_a_written_highlight(compared_dir: TempDir) {
    run_domdiff(
        compared_dir.path(),
        &["highlight", "left.json", "right.json", "-o", "out"],
    )
    .assert()
    .success();

    let patches = run_domdiff_json(
        compared_dir.path(),
        &["revert", "out/pane-0.json", "--out", "clean.json"],
    );
    assert_eq!(patches, json!([{ "nodeId": 21, "serializedMarkup": "two" }]));

    let diffs = run_domdiff_json(compared_dir.path(), &["compare", "clean.json", "left.json"]);
    assert_eq!(diffs["ranges"], json!([]));
}

#[rstest]
fn three_pane_highlight_marks_the_snapshot_side(workspace_dir: TempDir) {
    write_page(&workspace_dir, "left.json", &["a", "x"]);
    write_page(&workspace_dir, "base.json", &["a", "b"]);
    write_page(&workspace_dir, "right.json", &["a", "b"]);

    let report = run_domdiff_json(
        workspace_dir.path(),
        &["highlight", "left.json", "base.json", "right.json"],
    );

    assert_eq!(report["diffs"]["ranges"][0]["op"], json!("onlyInPane0"));
    assert_eq!(
        report["patches"][2][0]["serializedMarkup"],
        json!("<SPAN class=\"dd-diff dd-snpchanged\" data-ddid=\"0\" data-ddtext=\"b\">b</SPAN>")
    );
}
