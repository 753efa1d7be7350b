use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use sift::{
    config::PreprocessorConfig,
    context::special::{EnvironmentVariables, SharedVariables, SpecialVariables},
    error::{ExpressionError, PreprocessError, RuntimeError},
    extension::Extension,
    interpreter::value::core::Value,
    preprocess_str,
};

fn run(source: &str) -> String {
    run_with(source, &PreprocessorConfig::default())
}

fn run_with(source: &str, config: &PreprocessorConfig) -> String {
    preprocess_str(source, config).unwrap_or_else(|e| panic!("Preprocessing failed: {e}\n{source}"))
}

fn fail(source: &str) -> PreprocessError {
    fail_with(source, &PreprocessorConfig::default())
}

fn fail_with(source: &str, config: &PreprocessorConfig) -> PreprocessError {
    match preprocess_str(source, config) {
        Ok(output) => panic!("Preprocessing succeeded but was expected to fail:\n{output}"),
        Err(e) => e,
    }
}

fn runtime_error(error: &PreprocessError) -> Option<&RuntimeError> {
    match error {
        PreprocessError::Expression { source: ExpressionError::Runtime(e), .. } => Some(e),
        _ => None,
    }
}

#[test]
fn if_else_selects_one_branch() {
    assert_eq!(run("//#if 1==1\nkept\n//#else\ndropped\n//#endif"), "kept\n");
    assert_eq!(run("//#if 1==2\nkept\n//#else\ndropped\n//#endif\n"), "dropped\n");
}

#[test]
fn first_true_elif_wins() {
    let source = "\
//#local x = 2
//#if x == 1
one
//#elif x == 2
two
//#elif x >= 2
again
//#else
other
//#endif
";
    assert_eq!(run(source), "two\n");
}

#[test]
fn nested_blocks_in_suppressed_regions_are_not_evaluated() {
    let source = "\
//#if false
//#if undefined_name
a
//#else
b
//#endif
//#else
c
//#endif
";
    assert_eq!(run(source), "c\n");
}

#[test]
fn elif_conditions_are_skipped_once_a_branch_was_taken() {
    let source = "//#if true\nyes\n//#elif undefined_name\nno\n//#endif\n";
    assert_eq!(run(source), "yes\n");
}

#[test]
fn unbalanced_directives() {
    assert!(matches!(fail("//#endif\n"), PreprocessError::UnbalancedDirective { .. }));
    assert!(matches!(fail("//#else\n"), PreprocessError::UnbalancedDirective { .. }));
    assert!(matches!(fail("//#if true\n//#else\n//#else\n//#endif\n"),
                     PreprocessError::UnbalancedDirective { .. }));
    assert!(matches!(fail("//#if true\n//#else\n//#elif true\n//#endif\n"),
                     PreprocessError::UnbalancedDirective { .. }));

    let error = fail("first\n//#if true\nbody\n");
    assert!(matches!(error, PreprocessError::UnbalancedDirective { .. }));
    let location = error.location().unwrap();
    assert_eq!(location.line, 2);
    assert_eq!(location.text, "//#if true");
}

#[test]
fn conditions_must_be_boolean() {
    let error = fail("//#if 1\nx\n//#endif\n");
    assert!(matches!(runtime_error(&error), Some(RuntimeError::ExpectedBoolean { .. })));
}

#[test]
fn errors_carry_the_line() {
    let error = fail("a\n//#if 1 +\nb\n//#endif\n");
    let location = error.location().unwrap();
    assert_eq!(location.line, 2);
    assert_eq!(location.text, "//#if 1 +");
    assert!(error.to_string().contains("<input>:2:"));
}

#[test]
fn define_and_ifdef() {
    let source = "\
//#define debug
//#ifdef DEBUG
yes
//#endif
//#ifndef release
no-release
//#endif
";
    assert_eq!(run(source), "yes\nno-release\n");
    assert_eq!(run("//#define level = 3\n/*$level * 2$*/\n"), "6\n");
}

#[test]
fn undef_removes_variables() {
    assert_eq!(run("//#define a\n//#undef a\n//#ifdef a\nx\n//#endif\n"), "");

    let error = fail("//#undef never_defined\n");
    assert!(matches!(runtime_error(&error), Some(RuntimeError::UnresolvedVariable { .. })));
}

#[test]
fn local_and_global_need_a_value() {
    assert!(matches!(fail("//#local x\n"), PreprocessError::MalformedDirective { .. }));
    assert!(matches!(fail("//#global x =\n"), PreprocessError::MalformedDirective { .. }));
    assert!(matches!(fail("//#local 9lives = 1\n"), PreprocessError::MalformedDirective { .. }));
}

#[test]
fn local_shadows_global() {
    let config = PreprocessorConfig { global_variables: vec![("level".to_string(), Value::Integer(1))],
                                      ..PreprocessorConfig::default() };
    assert_eq!(run_with("/*$level$*/\n//#local level = 2\n/*$level$*/\n", &config), "1\n2\n");
}

#[test]
fn unknown_variables() {
    let error = fail("//#if missing\nx\n//#endif\n");
    assert!(matches!(runtime_error(&error), Some(RuntimeError::UnresolvedVariable { .. })));

    let config = PreprocessorConfig { unknown_variable_as_false: true,
                                      ..PreprocessorConfig::default() };
    assert_eq!(run_with("//#if missing\nx\n//#else\ny\n//#endif\n", &config), "y\n");
}

#[test]
fn uncomment_lines() {
    let config = PreprocessorConfig { global_variables: vec![("v".to_string(), Value::Integer(3))],
                                      ..PreprocessorConfig::default() };
    assert_eq!(run_with("//$int x = /*$v$*/;\n//$$raw /*$v$*/\n    //$indented\n", &config),
               "int x = 3;\nraw /*$v$*/\n    indented\n");

    let config = PreprocessorConfig { preserve_indentation: true,
                                      ..config };
    assert_eq!(run_with("  //$x\n  //$$y\n", &config), "     x\n      y\n");
}

#[test]
fn uncomment_lines_follow_the_active_branch() {
    assert_eq!(run("//#if false\n//$hidden\n//#else\n//$shown\n//#endif\n"), "shown\n");
}

#[test]
fn exit_directives() {
    assert_eq!(run("a\n//#exit\nb\n"), "a\n");
    assert_eq!(run("a\n//#exitif 2 > 1\nb\n"), "a\n");
    assert_eq!(run("a\n//#exitif 2 < 1\nb\n"), "a\nb\n");
}

#[test]
fn exit_inside_a_block_closes_it() {
    assert_eq!(run("//#if true\na\n//#exit\n//#endif\n"), "a\n");
}

#[test]
fn excludeif_drops_the_file() {
    assert_eq!(run("a\n//#excludeif true\nb\n"), "");
    assert_eq!(run("a\n//#excludeif false\nb\n"), "a\nb\n");
}

#[test]
fn error_directive_fails_with_its_text() {
    let error = fail("//#error version /*$1 + 1$*/ is not supported\n");
    let PreprocessError::UserError { message, .. } = error else {
        panic!("expected a user error, got {error:?}");
    };
    assert_eq!(message, "version 2 is not supported");

    assert_eq!(run("//#if false\n//#error unreachable\n//#endif\nok\n"), "ok\n");
}

#[test]
fn echo_and_warning_produce_no_output() {
    assert_eq!(run("//#echo building /*$1$*/\n//#warning careful\ntext\n"), "text\n");
}

#[test]
fn unknown_directives() {
    assert!(matches!(fail("//#pragma once\n"), PreprocessError::UnknownDirective { .. }));
    assert_eq!(run("//#if false\n//#pragma once\n//#endif\n"), "");
    assert!(matches!(fail("//#IF true\n//#endif\n"), PreprocessError::UnknownDirective { .. }));
}

#[test]
fn directives_without_arguments_reject_trailing_text() {
    assert_eq!(run("//#if true\nx\n//#endif // done\n"), "x\n");
    assert!(matches!(fail("//#if true\n//#endif done\n"), PreprocessError::MalformedDirective { .. }));
}

#[test]
fn whitespace_before_directives() {
    let source = "// #if false\nx\n// #endif\n";
    assert_eq!(run(source), "x\n");

    let config = PreprocessorConfig { allow_whitespace_before_directive: true,
                                      ..PreprocessorConfig::default() };
    assert_eq!(run_with(source, &config), "");
}

#[test]
fn writes_to_read_only_providers_fail() {
    let config = PreprocessorConfig { special_variables: vec![Arc::new(EnvironmentVariables::from_pairs([("HOME", "/root")]))],
                                      ..PreprocessorConfig::default() };

    assert_eq!(run_with("/*$env.home$*/\n", &config), "/root\n");
    let error = fail_with("//#local env.home = \"/tmp\"\n", &config);
    assert!(matches!(runtime_error(&error), Some(RuntimeError::ReadOnlyVariable { .. })));
    let error = fail_with("//#undef env.home\n", &config);
    assert!(matches!(runtime_error(&error), Some(RuntimeError::ReadOnlyVariable { .. })));
}

#[test]
fn writes_to_shared_providers_go_through() {
    let shared = Arc::new(SharedVariables::new("build."));
    let config = PreprocessorConfig { special_variables: vec![shared.clone()],
                                      ..PreprocessorConfig::default() };

    assert_eq!(run_with("//#global build.number = 7\n/*$build.number + 1$*/\n", &config), "8\n");
    assert_eq!(shared.get("build.number"), Some(Value::Integer(7)));
}

#[test]
fn actions_reach_the_extension() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&calls);
    let extension: Arc<dyn Extension> = Arc::new(move |_: &std::path::Path, args: &[Value]| {
                                                     recorded.lock().unwrap().push(args.to_vec());
                                                     !args.is_empty()
                                                 });
    let config = PreprocessorConfig { extension: Some(extension),
                                      ..PreprocessorConfig::default() };

    assert_eq!(run_with("//#action 1 + 1, \"two\"\nbody\n", &config), "body\n");
    assert_eq!(*calls.lock().unwrap(), vec![vec![Value::Integer(2), Value::from("two")]]);

    assert!(matches!(fail_with("//#action\n", &config), PreprocessError::ExtensionFailure { .. }));
}

#[test]
fn actions_without_extension_are_ignored() {
    assert_eq!(run("//#action \"notify\"\nbody\n"), "body\n");
}

#[test]
fn actions_without_extension_skip_their_arguments() {
    assert_eq!(run("//#action undefined_thing\nbody\n"), "body\n");
    assert_eq!(run("//#action 1 +\nbody\n"), "body\n");
}
