//! Tests for the makedoc binary: generated files, tags-only output and exit
//! codes.

use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn makedoc() -> Command {
    Command::new(env!("CARGO_BIN_EXE_makedoc"))
}

#[test]
fn test_tags_only_writes_table_to_stdout() {
    let output = makedoc()
        .current_dir(testdata_path())
        .args(["-tags", "echo.c", "nodecl.c"])
        .output()
        .expect("makedoc should run");

    assert_eq!(output.status.code(), Some(0));
    let expected = "\x0c\necho.c,81\n\
                    DECLARE_INFO_COMMAND (info_echo,\x7f5,92\n\
                    DECLARE_INFO_COMMAND (info_ea_test,\x7f10,188\n";
    assert_eq!(String::from_utf8(output.stdout).unwrap(), expected);

    // Nothing is generated on disk in tags-only mode.
    assert!(!testdata_path().join("doc.c").exists());
    assert!(!testdata_path().join("funs.h").exists());
}

#[test]
fn test_generates_three_files() {
    let temp = TempDir::new().unwrap();
    let echo = testdata_path().join("echo.c");

    let output = makedoc()
        .current_dir(temp.path())
        .arg("--output-dir")
        .arg(temp.path())
        .arg(&echo)
        .output()
        .expect("makedoc should run");

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());

    let funs = std::fs::read_to_string(temp.path().join("funs.h")).unwrap();
    let doc = std::fs::read_to_string(temp.path().join("doc.c")).unwrap();
    let key = std::fs::read_to_string(temp.path().join("key.c")).unwrap();

    assert!(funs.starts_with("/* funs.h -- Generated declarations for Info commands. */\n"));
    assert!(funs.contains("extern void info_ea_test (WINDOW *window, int count, unsigned char key);\n"));
    assert!(funs.ends_with("\n#define A_NCOMMANDS 2\n"));

    let echo_str = echo.to_string_lossy();
    assert!(doc.contains(&format!("\t{}\n", echo_str)));
    assert!(doc.contains(&format!("/* Commands found in \"{}\". */\n", echo_str)));
    assert!(doc.contains("\"echo-area-test\""));
    assert!(doc.ends_with("};\n"));

    assert!(key.contains("   { \"echo\", A_info_echo },\n"));
    assert!(key.ends_with("   { (char *)NULL, 0 }\n};\n"));
}

#[test]
fn test_config_file_controls_layout() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("makedoc.yaml"),
        "doc_file: \"commands.c\"\nlayout:\n  numeric_keys: false\n",
    )
    .unwrap();

    let output = makedoc()
        .current_dir(temp.path())
        .arg(testdata_path().join("echo.c"))
        .output()
        .expect("makedoc should run");

    assert_eq!(output.status.code(), Some(0));
    assert!(!temp.path().join("doc.c").exists());

    let doc = std::fs::read_to_string(temp.path().join("commands.c")).unwrap();
    assert!(doc.contains("   { info_echo, \"echo\", \"Echo a key.\" },\n"));

    let funs = std::fs::read_to_string(temp.path().join("funs.h")).unwrap();
    assert!(!funs.contains("#define A_info_echo"));
    assert_eq!(funs.matches("#define").count(), 1);
    assert!(funs.ends_with("\n#define A_NCOMMANDS 2\n"));
}

#[test]
fn test_option_after_file_is_warned() {
    let temp = TempDir::new().unwrap();

    let output = makedoc()
        .current_dir(temp.path())
        .env_remove("RUST_LOG")
        .arg(testdata_path().join("echo.c"))
        .arg("--no-keys")
        .output()
        .expect("makedoc should run");

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Warning: --no-keys follows a file and is ignored"));
}

#[test]
fn test_missing_input_exits_with_error() {
    let temp = TempDir::new().unwrap();

    let output = makedoc()
        .current_dir(temp.path())
        .arg("no-such-file.c")
        .output()
        .expect("makedoc should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Couldn't manipulate the file no-such-file.c."));
}

#[test]
fn test_unwritable_output_exits_with_error() {
    let temp = TempDir::new().unwrap();
    let missing_dir = temp.path().join("missing").join("dir");

    let output = makedoc()
        .current_dir(temp.path())
        .arg("--output-dir")
        .arg(&missing_dir)
        .arg(testdata_path().join("echo.c"))
        .output()
        .expect("makedoc should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Couldn't manipulate the file"));
}

#[test]
fn test_json_summary_on_stderr() {
    let output = makedoc()
        .current_dir(testdata_path())
        .env_remove("RUST_LOG")
        .args(["--summary", "json", "-tags", "echo.c"])
        .output()
        .expect("makedoc should run");

    assert_eq!(output.status.code(), Some(0));
    let summary: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(summary["total"], 2);
    assert_eq!(summary["files"][0]["declarations"][1]["visible_name"], "echo-area-test");
}
