use std::fs;

use pretty_assertions::assert_eq;
use sift::{
    config::PreprocessorConfig,
    context::variables::Variables,
    error::PreprocessError,
    interpreter::value::core::Value,
    pipeline::file::{FileOutput, FilePipeline},
    preprocess_str,
};
use tempfile::tempdir;

fn text(output: FileOutput) -> String {
    match output {
        FileOutput::Text(text) => text,
        FileOutput::Excluded => panic!("file was unexpectedly excluded"),
    }
}

#[test]
fn comments_are_removed_outside_literals() {
    let source = "\
int a = 1; // counter
/* block
   comment */ int b = 2;
String s = \"// kept\";
char c = '/';

end
";
    let expected = "\
int a = 1;
 int b = 2;
String s = \"// kept\";
char c = '/';

end
";
    assert_eq!(preprocess_str(source, &PreprocessorConfig::default()).unwrap(), expected);
}

#[test]
fn comments_can_be_kept() {
    let config = PreprocessorConfig { keep_comments: true,
                                      ..PreprocessorConfig::default() };
    let source = "int a = 1; // counter\n/* doc */\n";
    assert_eq!(preprocess_str(source, &config).unwrap(), source);
}

#[test]
fn unterminated_block_comment_drops_the_rest_of_the_file() {
    let source = "copy src/*.java to dist\nline two\n";
    assert_eq!(preprocess_str(source, &PreprocessorConfig::default()).unwrap(), "copy src\n");

    let config = PreprocessorConfig { keep_lines: true,
                                      ..PreprocessorConfig::default() };
    assert_eq!(preprocess_str(source, &config).unwrap(), "copy src\n\n");
}

#[test]
fn keep_lines_preserves_line_numbers() {
    let config = PreprocessorConfig { keep_lines: true,
                                      ..PreprocessorConfig::default() };
    let source = "\
//#local on = false
a
//#if on
b
// only a comment
//#else
c
//#endif
//#exit
d
e
";
    let output = preprocess_str(source, &config).unwrap();
    assert_eq!(output, "\na\n\n\n\n\nc\n\n\n\n\n");
    assert_eq!(output.lines().count(), source.lines().count());
}

#[test]
fn line_terminators() {
    let config = PreprocessorConfig { eol: "\r\n".to_string(),
                                      ..PreprocessorConfig::default() };
    assert_eq!(preprocess_str("a\nb", &config).unwrap(), "a\r\nb\r\n");

    let config = PreprocessorConfig { care_for_trailing_eol: true,
                                      ..config };
    assert_eq!(preprocess_str("a\nb", &config).unwrap(), "a\r\nb");
    assert_eq!(preprocess_str("a\r\nb\r\n", &config).unwrap(), "a\r\nb\r\n");
}

#[test]
fn globals_persist_across_files() {
    let config = PreprocessorConfig::default();
    let mut globals = Variables::new();
    let mut pipeline = FilePipeline::new(&config, &mut globals);

    let first = pipeline.process_str("A.java".as_ref(), "//#global shared = 5\n//#local mine = 1\n")
                        .unwrap();
    assert_eq!(text(first), "");

    let second = pipeline.process_str("B.java".as_ref(),
                                      "//#ifdef mine\nleak\n//#endif\nvalue=/*$shared$*/\n")
                         .unwrap();
    assert_eq!(text(second), "value=5\n");
    assert_eq!(pipeline.globals().get("shared"), Some(&Value::Integer(5)));
}

#[test]
fn file_variables_follow_the_current_file() {
    let config = PreprocessorConfig::default();
    let mut globals = Variables::new();
    let output = FilePipeline::new(&config, &mut globals).process_str("src/Main.java".as_ref(),
                                                                      "a\n/*$__filename__ + \":\" + __line__$*/\n")
                                                         .unwrap();
    assert_eq!(text(output), "a\nMain.java:2\n");
}

#[test]
fn includes_are_processed_in_place() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("part.txt"),
              "//#local from_part = true\npart /*$__filename__$*/\n//#exit\nnever\n").unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested/leaf.txt"), "leaf\n").unwrap();
    let main = dir.path().join("main.txt");
    fs::write(&main,
              "before\n//#include \"part.txt\"\n//#include \"nested/\" + \"leaf.txt\"\n//#ifdef from_part\nafter /*$__line__$*/\n//#endif\n").unwrap();

    let config = PreprocessorConfig::default();
    let mut globals = Variables::new();
    let output = FilePipeline::new(&config, &mut globals).process_file(&main).unwrap();

    assert_eq!(text(output), "before\npart part.txt\nleaf\nafter 5\n");
}

#[test]
fn include_failures() {
    let dir = tempdir().unwrap();
    let config = PreprocessorConfig::default();
    let mut globals = Variables::new();
    let mut pipeline = FilePipeline::new(&config, &mut globals);

    let looping = dir.path().join("loop.txt");
    fs::write(&looping, "//#include \"loop.txt\"\n").unwrap();
    assert!(matches!(pipeline.process_file(&looping), Err(PreprocessError::IncludeDepth { .. })));

    let missing = dir.path().join("missing.txt");
    fs::write(&missing, "//#include \"nowhere.txt\"\n").unwrap();
    assert!(matches!(pipeline.process_file(&missing), Err(PreprocessError::Include { .. })));

    let typed = dir.path().join("typed.txt");
    fs::write(&typed, "//#include 42\n").unwrap();
    assert!(matches!(pipeline.process_file(&typed), Err(PreprocessError::MalformedDirective { .. })));
}

#[test]
fn includes_cannot_leave_blocks_open() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("open.txt"), "//#if true\n").unwrap();
    fs::write(dir.path().join("close.txt"), "//#endif\n").unwrap();
    let config = PreprocessorConfig::default();
    let mut globals = Variables::new();
    let mut pipeline = FilePipeline::new(&config, &mut globals);

    let opener = dir.path().join("opener.txt");
    fs::write(&opener, "//#include \"open.txt\"\n//#endif\n").unwrap();
    let error = pipeline.process_file(&opener).unwrap_err();
    assert!(matches!(error, PreprocessError::UnbalancedDirective { .. }));
    assert!(error.location().unwrap().file.ends_with("open.txt"));

    let closer = dir.path().join("closer.txt");
    fs::write(&closer, "//#if true\n//#include \"close.txt\"\n//#endif\n").unwrap();
    assert!(matches!(pipeline.process_file(&closer), Err(PreprocessError::UnbalancedDirective { .. })));
}

#[test]
fn excluded_files_produce_no_output() {
    let config = PreprocessorConfig::default();
    let mut globals = Variables::new();
    let output = FilePipeline::new(&config, &mut globals).process_str("A.java".as_ref(), "a\n//#excludeif true\n")
                                                         .unwrap();
    assert_eq!(output, FileOutput::Excluded);
    assert_eq!(output.text(), None);
}

#[test]
fn missing_files_are_io_errors() {
    let dir = tempdir().unwrap();
    let config = PreprocessorConfig::default();
    let mut globals = Variables::new();
    let result = FilePipeline::new(&config, &mut globals).process_file(&dir.path().join("absent.java"));
    assert!(matches!(result, Err(PreprocessError::Io { .. })));
}
