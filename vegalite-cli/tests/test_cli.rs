use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};

fn vegalite() -> Command {
    let mut cmd = Command::cargo_bin("vegalite").unwrap();
    cmd.env_remove("VEGALITE_DATA_DIR").env_remove("RUST_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn anscombe_prints_faceted_scatter() {
    let spec = stdout_json(vegalite().arg("anscombe"));

    assert_eq!(spec["mark"], json!("circle"));
    assert_eq!(spec["width"], json!(150));
    assert_eq!(spec["height"], json!(150));

    let channels: Vec<_> = spec["encoding"].as_object().unwrap().keys().cloned().collect();
    assert_eq!(channels, vec!["x", "y", "column"]);
    assert_eq!(spec["encoding"]["x"]["scale"], json!({"zero": false}));
    assert_eq!(spec["encoding"]["y"]["scale"], json!({"zero": false}));
    assert_eq!(
        spec["encoding"]["column"],
        json!({"field": "Series", "type": "nominal"})
    );

    let name = spec["data"]["name"].as_str().unwrap();
    assert!(name.starts_with("data-"));
    assert_eq!(spec["datasets"][name].as_array().unwrap().len(), 44);
}

#[test]
fn anscombe_inline_compact() {
    let output = vegalite()
        .args(["anscombe", "--inline", "--compact", "--width", "200"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.trim_end().lines().count(), 1);

    let spec: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(spec["width"], json!(200));
    assert_eq!(spec["data"]["values"].as_array().unwrap().len(), 44);
    assert!(spec.get("datasets").is_none());
}

#[test]
fn anscombe_respects_max_rows() {
    vegalite()
        .args(["anscombe", "--max-rows", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the embedding limit of 10"));
}

#[test]
fn datasets_lists_bundled_names() {
    vegalite()
        .arg("datasets")
        .assert()
        .success()
        .stdout(predicate::str::contains("anscombe"));
}

#[test]
fn show_prints_first_rows() {
    vegalite()
        .args(["show", "anscombe", "--rows", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Series"))
        .stdout(predicate::str::contains("8.04"))
        .stdout(predicate::str::contains("3 of 44 rows, columns: Series, X, Y"));
}

#[test]
fn show_reads_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("scores.csv"), "name,score\na,1\nb,2\n").unwrap();

    vegalite()
        .args(["show", "scores", "--data-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 of 2 rows, columns: name, score"));
}

#[test]
fn show_unknown_dataset_fails() {
    vegalite()
        .args(["show", "not-a-dataset"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not-a-dataset"));
}
