//! Clean target integration tests.

use super::common::TestEnv;

#[test]
fn clean_objects_keeps_linked_outputs() {
  let env = TestEnv::new();
  env.cpbuild_cmd().arg("all").assert().success();

  env.cpbuild_cmd().arg("clean-objects").assert().success();

  assert!(!env.artifact("path.o").exists());
  assert!(!env.artifact("cpc-main.o").exists());
  assert!(env.artifact("libcp_v1.so").is_file());
  assert!(env.artifact("cp").is_file());
}

#[test]
fn clean_empties_build_directory() {
  let env = TestEnv::new();
  env.cpbuild_cmd().arg("all").assert().success();
  env.write_file("project/build/nested/leftover.txt", "");

  env.cpbuild_cmd().arg("clean").assert().success();

  let build = env.project().join("build");
  assert!(build.is_dir());
  assert_eq!(std::fs::read_dir(build).unwrap().count(), 0);
}

#[test]
fn clean_then_build_rebuilds_everything() {
  let env = TestEnv::new();
  env.cpbuild_cmd().arg("all").assert().success();

  env.cpbuild_cmd().args(["clean", "all"]).assert().success();

  let outputs = env.outputs();
  assert_eq!(outputs.len(), 10);
  assert_eq!(outputs[..5], outputs[5..]);
  assert_eq!(outputs[5..], ["file.o", "path.o", "libcp_v1.so", "cpc-main.o", "cp"]);
}
