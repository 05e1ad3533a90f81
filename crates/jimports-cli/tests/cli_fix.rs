use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn jimports_cmd() -> Command {
    Command::cargo_bin("jimports").unwrap()
}

#[test]
fn version_flag_exits_zero() {
    jimports_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("jimports"));
}

#[test]
fn no_file_prints_usage_and_exits_zero() {
    jimports_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn unreadable_file_exits_one() {
    jimports_cmd()
        .arg("/no/such/File.java")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn syntax_errors_go_to_stderr_with_positions() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("Broken.java");
    fs::write(&file, "class Broken {\n").unwrap();

    jimports_cmd()
        .arg(&file)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(": error: "));
}

#[test]
fn adds_stdlib_imports_to_stdout() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("App.java");
    fs::write(
        &file,
        "package com.mine;\n\nclass App {\n    Map<String, List<String>> index;\n}\n",
    )
    .unwrap();

    jimports_cmd()
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("import java.util.List;"))
        .stdout(predicate::str::contains("import java.util.Map;"))
        .stdout(predicate::str::contains("Map<String, List<String>> index;"));
}

#[test]
fn already_imported_files_come_back_unchanged() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("App.java");
    let source =
        "package com.mine;\n\nimport java.util.List;\n\nclass App {\n    List<String> l;\n}\n";
    fs::write(&file, source).unwrap();

    jimports_cmd()
        .arg(&file)
        .assert()
        .success()
        .stdout(source);
}

#[test]
fn sibling_classes_resolve_through_their_package() {
    let tmp = TempDir::new().unwrap();
    let app = tmp.path().join("App.java");
    fs::write(
        &app,
        "package com.mine;\n\nclass App {\n    Helper helper;\n}\n",
    )
    .unwrap();
    fs::write(
        tmp.path().join("Helper.java"),
        "package com.mine;\n\nclass Helper {}\n",
    )
    .unwrap();

    jimports_cmd()
        .arg(&app)
        .assert()
        .success()
        .stdout(predicate::str::contains("import com.mine.Helper;"));
}

#[test]
fn replace_rewrites_the_file_in_place() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("App.java");
    fs::write(
        &file,
        "package com.mine;\n\nclass App {\n    List<String> l;\n}\n",
    )
    .unwrap();

    jimports_cmd()
        .arg("--replace")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let rewritten = fs::read_to_string(&file).unwrap();
    assert!(rewritten.contains("import java.util.List;"));
    assert!(rewritten.contains("class App {"));
}

#[test]
fn unresolvable_identifiers_still_produce_output() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("App.java");
    fs::write(
        &file,
        "package com.mine;\n\nclass App {\n    CompletelyUnknownType x;\n    List<String> l;\n}\n",
    )
    .unwrap();

    // favors output over diagnostics: the known import is added, the
    // unknown identifier is silently left alone
    jimports_cmd()
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("import java.util.List;"))
        .stdout(predicate::str::contains("CompletelyUnknownType x;"));
}
