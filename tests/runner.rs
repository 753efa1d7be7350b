use std::{fs, path::Path};

use pretty_assertions::assert_eq;
use sift::{
    config::PreprocessorConfig,
    error::PreprocessError,
    interpreter::value::core::Value,
    runner::{Preprocessor, RunSummary},
};
use tempfile::{TempDir, tempdir};

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap_or_else(|e| panic!("Failed to read {relative}: {e}"))
}

/// A source tree with one file of each handling, and an empty destination.
fn fixture() -> (TempDir, PreprocessorConfig) {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    write(&src,
          "app/Main.java",
          "//#if debug\nlog();\n//#endif\nrun(/*$version$*/);\n");
    write(&src, "app/notes.txt", "//#excludeif true\nsecret\n");
    write(&src, "app/logo.png", "\u{1}binary");
    write(&src, "pom.xml", "<project/>");
    write(&src, "generated/Gen.java", "class Gen {}\n");

    let config = PreprocessorConfig { sources: vec![src],
                                      destination: dir.path().join("out"),
                                      global_variables: vec![("debug".to_string(), Value::Bool(false)),
                                                             ("version".to_string(), Value::Integer(3))],
                                      excluded_folders: vec!["generated".to_string()],
                                      ..PreprocessorConfig::default() };
    (dir, config)
}

#[test]
fn run_processes_copies_and_skips() {
    let (dir, config) = fixture();
    let out = dir.path().join("out");

    let summary = Preprocessor::new(config).unwrap().run().unwrap();

    assert_eq!(summary,
               RunSummary { processed: 1,
                            copied:    1,
                            unchanged: 0,
                            excluded:  2,
                            failed:    0, });
    assert_eq!(read(&out, "app/Main.java"), "run(3);\n");
    assert_eq!(read(&out, "app/logo.png"), "\u{1}binary");
    assert!(!out.join("app/notes.txt").exists());
    assert!(!out.join("pom.xml").exists());
    assert!(!out.join("generated").exists());
}

#[test]
fn second_run_is_identical_and_skips_unchanged_files() {
    let (dir, config) = fixture();
    let out = dir.path().join("out");

    Preprocessor::new(config.clone()).unwrap().run().unwrap();
    let first = read(&out, "app/Main.java");

    let config = PreprocessorConfig { skip_unchanged: true,
                                      ..config };
    let summary = Preprocessor::new(config).unwrap().run().unwrap();

    assert_eq!(read(&out, "app/Main.java"), first);
    assert_eq!(summary.unchanged, 2);
    assert_eq!(summary.processed + summary.copied, 0);
}

#[test]
fn dry_run_writes_nothing() {
    let (dir, config) = fixture();
    let config = PreprocessorConfig { dry_run: true,
                                      ..config };

    let summary = Preprocessor::new(config).unwrap().run().unwrap();

    assert_eq!(summary.processed, 1);
    assert!(!dir.path().join("out").exists());
}

#[test]
fn clear_destination_removes_stale_files() {
    let (dir, config) = fixture();
    let out = dir.path().join("out");
    write(&out, "stale.java", "old");

    let config = PreprocessorConfig { clear_destination: true,
                                      ..config };
    Preprocessor::new(config).unwrap().run().unwrap();

    assert!(!out.join("stale.java").exists());
    assert!(out.join("app/Main.java").exists());
}

#[test]
fn globals_flow_between_files_in_walk_order() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    write(&src, "a.txt", "//#global stamp = \"from a\"\n");
    write(&src, "b.txt", "/*$stamp$*/\n");

    let config = PreprocessorConfig { sources: vec![src],
                                      destination: dir.path().join("out"),
                                      ..PreprocessorConfig::default() };
    let mut preprocessor = Preprocessor::new(config).unwrap();
    preprocessor.run().unwrap();

    assert_eq!(read(&dir.path().join("out"), "b.txt"), "from a\n");
    assert_eq!(preprocessor.globals().get("stamp"), Some(&Value::from("from a")));
}

#[test]
fn single_file_sources_land_at_the_destination_root() {
    let dir = tempdir().unwrap();
    write(dir.path(), "in/One.java", "one\n");

    let config = PreprocessorConfig { sources: vec![dir.path().join("in/One.java")],
                                      destination: dir.path().join("out"),
                                      ..PreprocessorConfig::default() };
    Preprocessor::new(config).unwrap().run().unwrap();

    assert_eq!(read(&dir.path().join("out"), "One.java"), "one\n");
}

#[test]
fn failures_abort_unless_ignored() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    write(&src, "a_bad.java", "//#if true\n");
    write(&src, "b_good.java", "good\n");

    let config = PreprocessorConfig { sources: vec![src],
                                      destination: dir.path().join("out"),
                                      ..PreprocessorConfig::default() };
    let error = Preprocessor::new(config.clone()).unwrap().run().unwrap_err();
    assert!(matches!(error, PreprocessError::UnbalancedDirective { .. }));
    assert!(!dir.path().join("out/a_bad.java").exists());

    let config = PreprocessorConfig { ignore_missing_sources: true,
                                      ..config };
    let summary = Preprocessor::new(config).unwrap().run().unwrap();
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.processed, 1);
    assert!(!dir.path().join("out/a_bad.java").exists());
}

#[test]
fn missing_sources() {
    let dir = tempdir().unwrap();
    let config = PreprocessorConfig { sources: vec![dir.path().join("absent")],
                                      destination: dir.path().join("out"),
                                      ..PreprocessorConfig::default() };
    assert!(matches!(Preprocessor::new(config.clone()).unwrap().run(), Err(PreprocessError::Io { .. })));

    let config = PreprocessorConfig { ignore_missing_sources: true,
                                      ..config };
    assert_eq!(Preprocessor::new(config).unwrap().run().unwrap(), RunSummary::default());
}

#[test]
fn config_files_seed_the_globals() {
    let dir = tempdir().unwrap();
    write(dir.path(), "build.cfg", "# settings\nversion = 7\nvendor=\"acme\"\n");
    write(dir.path(), "override.cfg", "version=8\n");

    let config = PreprocessorConfig { global_variables: vec![("version".to_string(), Value::Integer(1))],
                                      config_files: vec![dir.path().join("build.cfg"), dir.path().join("override.cfg")],
                                      ..PreprocessorConfig::default() };
    let preprocessor = Preprocessor::new(config).unwrap();

    assert_eq!(preprocessor.globals().get("version"), Some(&Value::Integer(8)));
    assert_eq!(preprocessor.globals().get("vendor"), Some(&Value::from("acme")));
}

#[test]
fn invalid_configuration_is_rejected() {
    let config = PreprocessorConfig { source_encoding: "ISO-8859-1".to_string(),
                                      ..PreprocessorConfig::default() };
    assert!(matches!(Preprocessor::new(config), Err(PreprocessError::Config { .. })));

    let config = PreprocessorConfig { excluded_folders: vec!["[".to_string()],
                                      ..PreprocessorConfig::default() };
    assert!(matches!(Preprocessor::new(config), Err(PreprocessError::Config { .. })));

    let dir = tempdir().unwrap();
    write(dir.path(), "bad.cfg", "no equals sign\n");
    let config = PreprocessorConfig { config_files: vec![dir.path().join("bad.cfg")],
                                      ..PreprocessorConfig::default() };
    assert!(matches!(Preprocessor::new(config), Err(PreprocessError::Config { .. })));
}

#[cfg(unix)]
#[test]
fn keep_attributes_copies_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    write(&src, "run.txt", "echo\n");
    fs::set_permissions(src.join("run.txt"), fs::Permissions::from_mode(0o755)).unwrap();

    let config = PreprocessorConfig { sources: vec![src],
                                      destination: dir.path().join("out"),
                                      keep_attributes: true,
                                      ..PreprocessorConfig::default() };
    Preprocessor::new(config).unwrap().run().unwrap();

    let mode = fs::metadata(dir.path().join("out/run.txt")).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
}
