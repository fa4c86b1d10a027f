use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command;

fn workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir.parent().unwrap().parent().unwrap().to_path_buf()
}

fn ram() -> Command {
    let mut cmd = Command::cargo_bin("ram").unwrap();
    cmd.env_remove("RAM_UNINIT").env_remove("RAM_VERBOSE");
    cmd
}

fn write_program(dir: &tempfile::TempDir, src: &str) -> PathBuf {
    let path = dir.path().join("prog.ram");
    std::fs::write(&path, src).unwrap();
    path
}

#[test]
fn runs_countdown_program() {
    let root = workspace_root();
    ram()
        .arg(root.join("programs/countdown.ram"))
        .args(["--input", "3"])
        .assert()
        .success()
        .stdout("1 1 1\n");
}

#[test]
fn runs_power_sum_program() {
    let root = workspace_root();
    ram()
        .arg(root.join("programs/pow3n_plus_pow2n.ram"))
        .args(["-i", "15"])
        .assert()
        .success()
        .stdout("14381675\n");
}

#[test]
fn reads_input_from_file() {
    let root = workspace_root();
    let tmp_dir = tempfile::tempdir().unwrap();
    let input = tmp_dir.path().join("input.txt");
    std::fs::write(&input, "3, 4\n5 0\n").unwrap();

    ram()
        .arg(root.join("programs/sum_until_zero.ram"))
        .arg("--input-file")
        .arg(&input)
        .assert()
        .success()
        .stdout("12\n");
}

#[test]
fn load_error_is_nonzero() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = write_program(&tmp_dir, "LOAD(=1)\nLOD(2)\n");

    ram()
        .arg(path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Load error"))
        .stderr(predicate::str::contains("unknown opcode 'LOD'"))
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn runtime_error_reports_partial_output() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = write_program(&tmp_dir, "WRITE(=7)\nREAD(1)\n");

    ram()
        .arg(path)
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Runtime error"))
        .stderr(predicate::str::contains("no more input"))
        .stderr(predicate::str::contains("partial output:"));
}

#[test]
fn uninit_flag_defaults_cells_to_zero() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = write_program(&tmp_dir, "WRITE(5)\n");

    ram()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("uninitialized cell 5"));

    ram()
        .arg(&path)
        .args(["--uninit", "zero"])
        .assert()
        .success()
        .stdout("0\n")
        .stderr(predicate::str::contains("Reaching uninitialized cell 5, defaulted to 0"))
        .stderr(predicate::str::contains("Output:").not());
}

#[test]
fn check_only_validates() {
    let root = workspace_root();
    ram()
        .arg(root.join("programs/countdown.ram"))
        .arg("--check")
        .assert()
        .success()
        .stdout(predicate::str::contains("6 instructions, 2 labels"));
}

#[test]
fn trace_file_receives_verbose_trace() {
    let root = workspace_root();
    let tmp_dir = tempfile::tempdir().unwrap();
    let trace = tmp_dir.path().join("trace.log");

    ram()
        .arg(root.join("programs/countdown.ram"))
        .args(["-i", "1", "-v", "--name", "countdown", "--trace"])
        .arg(&trace)
        .assert()
        .success()
        .stdout("1\n");

    let log = std::fs::read_to_string(&trace).unwrap();
    assert!(log.contains("RUNNING countdown"));
    assert!(log.contains("JZERO(END) LOOP"));
    assert!(log.contains("Output: { 1 }"));
}
