//! Build command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

/// Tool outputs of a fresh `all` build with skip-exist on: `cp` finds
/// `cp.so` and the launcher object already on disk.
const FRESH_ALL: [&str; 5] = ["file.o", "path.o", "libcp_v1.so", "cpc-main.o", "cp"];

/// Tool outputs of an `all` build with skip-exist off. Nothing is remembered
/// within a run, so objects are rebuilt on every path that reaches them:
/// directly, through `cp.so`, and through `cp` via `cp.so`.
const REBUILD_ALL: [&str; 11] = [
  "file.o",
  "path.o",
  "file.o",
  "path.o",
  "libcp_v1.so",
  "cpc-main.o",
  "file.o",
  "path.o",
  "libcp_v1.so",
  "cpc-main.o",
  "cp",
];

#[test]
fn build_all_runs_tools_in_dependency_order() {
  let env = TestEnv::new();

  env
    .cpbuild_cmd()
    .arg("all")
    .assert()
    .success()
    .stdout(predicate::str::contains("Built 6 target(s)"))
    .stdout(predicate::str::contains("Skipped: 4"));

  assert_eq!(env.outputs(), FRESH_ALL);
  let calls = env.calls();
  assert!(calls[0].contains("tc64/gcc -c src/io/file.c -o"));
  assert!(calls[1].contains("tc64/gcc -c src/path.c -o"));
  assert!(calls[2].contains("tc64/gcc -shared -o"));
  assert!(calls[3].contains("-c src/cpc/main.c -o"));
  assert!(calls[4].contains(" -lcp_v1 -L"));

  assert!(env.artifact("libcp_v1.so").is_file());
  assert!(env.artifact("cp").is_file());
  assert!(!env.artifact("test_path.o").exists());
}

#[test]
fn fresh_build_without_skip_repeats_shared_dependencies() {
  let env = TestEnv::new();

  env
    .cpbuild_cmd()
    .args(["--no-skip-exist", "all"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Built 12 target(s)"));

  assert_eq!(env.outputs(), REBUILD_ALL);
}

#[test]
fn objects_carry_version_macros() {
  let env = TestEnv::new();

  env.cpbuild_cmd().arg("path.o").assert().success();

  let calls = env.calls();
  assert_eq!(calls.len(), 1);
  assert!(calls[0].contains("-DCP_VERSION_HEX=0x0F010203"));
  assert!(calls[0].contains("-DCP_VERSION_MAJOR=1"));
  assert!(calls[0].contains("-DCP_VERSION_STRING=\"v1.2.3\""));
}

#[test]
fn second_build_skips_existing_outputs() {
  let env = TestEnv::new();

  env.cpbuild_cmd().arg("all").assert().success();
  env
    .cpbuild_cmd()
    .arg("all")
    .assert()
    .success()
    .stdout(predicate::str::contains("Built 1 target(s)"))
    .stdout(predicate::str::contains("Skipped: 5"));

  assert_eq!(env.outputs(), FRESH_ALL);
}

#[test]
fn no_skip_flag_rebuilds() {
  let env = TestEnv::new();

  env.cpbuild_cmd().arg("all").assert().success();
  env.cpbuild_cmd().args(["all", "--no-skip-exist"]).assert().success();

  assert_eq!(env.outputs()[..5], FRESH_ALL);
  assert_eq!(env.outputs()[5..], REBUILD_ALL);
}

#[test]
fn skip_env_zero_rebuilds() {
  let env = TestEnv::new();

  env.cpbuild_cmd().arg("all").assert().success();
  env.cpbuild_cmd().env("CPBUILDSKIPEXIST", "0").arg("all").assert().success();

  assert_eq!(env.outputs()[5..], REBUILD_ALL);
}

#[test]
fn skip_env_is_case_sensitive() {
  let env = TestEnv::new();

  env.cpbuild_cmd().arg("all").assert().success();
  env.cpbuild_cmd().env("CPBUILDSKIPEXIST", "FALSE").arg("all").assert().success();

  assert_eq!(env.outputs(), FRESH_ALL);
}

#[test]
fn skip_flag_beats_env() {
  let env = TestEnv::new();

  env.cpbuild_cmd().arg("all").assert().success();
  env
    .cpbuild_cmd()
    .env("CPBUILDSKIPEXIST", "false")
    .args(["--skip-exist", "all"])
    .assert()
    .success();

  assert_eq!(env.outputs(), FRESH_ALL);
}

#[test]
fn bit_flag_selects_toolchain() {
  let env = TestEnv::new();

  env.cpbuild_cmd().args(["--32", "path.o"]).assert().success();

  assert!(env.calls()[0].contains("tc32/gcc"));
}

#[test]
fn bit_flag_beats_env() {
  let env = TestEnv::new();

  env
    .cpbuild_cmd()
    .env("CPBUILDBIT", "32")
    .args(["path.o", "--64"])
    .assert()
    .success();

  assert!(env.calls()[0].contains("tc64/gcc"));
}

#[test]
fn bit_env_selects_toolchain() {
  let env = TestEnv::new();

  env.cpbuild_cmd().env("CPBUILDBIT", "32").arg("path.o").assert().success();

  assert!(env.calls()[0].contains("tc32/gcc"));
}

#[test]
fn dotfile_supplies_missing_variables() {
  let env = TestEnv::new();
  let tc32 = env.path("tc32");
  env.write_file(
    "project/build.env",
    &format!("# local toolchain\nCPBUILDGCC32={}\nCPBUILDBIT=32\n", tc32.display()),
  );

  env
    .cpbuild_cmd()
    .env_remove("CPBUILDGCC32")
    .arg("path.o")
    .assert()
    .success();

  assert!(env.calls()[0].contains("tc32/gcc"));
}

#[test]
fn dotfile_never_overrides_process_environment() {
  let env = TestEnv::new();
  env.write_file("project/build.env", "CPBUILDBIT=32\n");

  env
    .cpbuild_cmd()
    .env("CPBUILDBIT", "64")
    .arg("path.o")
    .assert()
    .success();

  assert!(env.calls()[0].contains("tc64/gcc"));
}

#[test]
fn dotfile_entries_reach_tools() {
  let env = TestEnv::new();
  env.write_file("project/build.env", "CPBUILD_FAKE_MARK=from-dotfile\n");

  env.cpbuild_cmd().arg("path.o").assert().success();

  assert_eq!(env.calls()[1], "mark from-dotfile");
}

#[test]
fn env_file_flag_picks_another_dotfile() {
  let env = TestEnv::new();
  env.write_file("project/ci.env", "CPBUILDBIT=32\n");

  env
    .cpbuild_cmd()
    .args(["--env-file", "ci.env", "path.o"])
    .assert()
    .success();

  assert!(env.calls()[0].contains("tc32/gcc"));
}

#[test]
fn tool_failure_stops_the_build() {
  let env = TestEnv::new();

  env
    .cpbuild_cmd()
    .env("CPBUILD_FAKE_FAIL", "1")
    .arg("all")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("command failed"));

  assert_eq!(env.calls().len(), 1);
  assert!(!env.artifact("cp").exists());
}

#[test]
fn unknown_target_runs_nothing() {
  let env = TestEnv::new();

  env.cpbuild_cmd().args(["path.o", "nonexistent"]).assert().code(1);

  assert!(env.calls().is_empty());
}

#[test]
fn build_path_that_is_a_file_fails() {
  let env = TestEnv::new();
  env.write_file("project/build", "");

  env
    .cpbuild_cmd()
    .arg("all")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("is not a directory"));

  assert!(env.calls().is_empty());
}

#[test]
fn json_report_lists_built_targets() {
  let env = TestEnv::new();

  let output = env
    .cpbuild_cmd()
    .args(["--output", "json", "cp"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(
    report["built"],
    serde_json::json!(["file.o", "path.o", "cp.so", "cpc-main.o", "cp"])
  );
  assert_eq!(report["version"], "v1.2.3");
}

#[test]
fn invocations_are_logged() {
  let env = TestEnv::new();

  env
    .cpbuild_cmd()
    .arg("path.o")
    .assert()
    .success()
    .stderr(predicate::str::contains("calling "));
}

#[test]
fn quiet_hides_progress_logs() {
  let env = TestEnv::new();

  env
    .cpbuild_cmd()
    .args(["-q", "path.o"])
    .assert()
    .success()
    .stderr(predicate::str::contains("calling ").not());
}
