use pretty_assertions::assert_eq;
use sift::{
    ast::BinaryOperator,
    context::{
        core::VariableContext,
        special::{EnvironmentVariables, SpecialVariables},
        variables::Variables,
    },
    error::{ExpressionError, ParseError, RuntimeError},
    evaluate,
    interpreter::value::core::{Value, ValueKind},
};
use std::sync::Arc;

fn assert_value(src: &str, expected: impl Into<Value>) {
    match evaluate(src) {
        Ok(value) => assert_eq!(value, expected.into(), "expression: {src}"),
        Err(e) => panic!("Expression '{src}' failed: {e}"),
    }
}

fn assert_parse_error(src: &str) -> ParseError {
    match evaluate(src) {
        Err(ExpressionError::Parse(e)) => e,
        other => panic!("Expression '{src}' should not parse, got {other:?}"),
    }
}

fn assert_runtime_error(src: &str) -> RuntimeError {
    match evaluate(src) {
        Err(ExpressionError::Runtime(e)) => e,
        other => panic!("Expression '{src}' should fail at runtime, got {other:?}"),
    }
}

#[test]
fn literals() {
    assert_value("42", 42);
    assert_value("0x1F", 31);
    assert_value("0xFFFFFFFFFFFFFFFF", -1);
    assert_value("2.5", 2.5_f32);
    assert_value("true", true);
    assert_value("\"tab\\there\"", "tab\there");
}

#[test]
fn arithmetic_and_precedence() {
    assert_value("1+2*3", 7);
    assert_value("(1+2)*3", 9);
    assert_value("10 - 4 - 3", 3);
    assert_value("10 / 4", 2);
    assert_value("10 % 3", 1);
    assert_value("10.0 % 3", 1.0_f32);
    assert_value("-7 % 3", -1);
    assert_value("7 % 2.5", 2.0_f32);
    assert_value("7.5 % 2.0", 1.5_f32);
    assert_value("-7 / 2", -3);
    assert_value("1 + 0.5", 1.5_f32);
    assert_value("-3 * -2", 6);
    assert_value("--5", 5);
    assert_value("+5", 5);
}

#[test]
fn integer_arithmetic_wraps() {
    assert_value("0x7FFFFFFFFFFFFFFF + 1", i64::MIN);
}

#[test]
fn string_concatenation() {
    assert_value("\"v\" + 1", "v1");
    assert_value("\"a\" + 1 + 2", "a12");
    assert_value("1 + 2 + \"a\"", "3a");
    assert_value("\"x\" + 1.5", "x1.5");
    assert_value("\"on: \" + true", "on: true");
}

#[test]
fn comparisons() {
    assert_value("1 == 1.0", true);
    assert_value("2 != 3", true);
    assert_value("2 <= 2", true);
    assert_value("1 < 1.5", true);
    assert_value("2.0 >= 2", true);
    assert_value("2.5 > 3", false);
    assert_value("\"abc\" < \"abd\"", true);
    assert_value("1 < 2 == true", true);
    assert_value("set(1, 2) == set(2, 1)", true);
    assert_value("set(1, 2) != set(1)", true);

    let error = assert_runtime_error("\"1\" == 1");
    assert!(matches!(error, RuntimeError::TypeMismatch { .. }));
}

#[test]
fn operator_families_reject_foreign_operators() {
    let one = Value::Integer(1);
    let yes = Value::Bool(true);

    let results = [VariableContext::eval_arithmetic(BinaryOperator::Less, &one, &one),
                   VariableContext::eval_arithmetic(BinaryOperator::And, &Value::Float(1.0), &one),
                   VariableContext::eval_ordering(BinaryOperator::Add, &one, &one),
                   VariableContext::eval_logic(BinaryOperator::Mul, &one, &one),
                   VariableContext::eval_logic(BinaryOperator::Equal, &yes, &yes)];
    for result in results {
        assert!(matches!(result, Err(RuntimeError::TypeMismatch { .. })), "{result:?}");
    }
}

#[test]
fn logic_is_bitwise_on_integers() {
    assert_value("true && false", false);
    assert_value("false || true", true);
    assert_value("true ^ true", false);
    assert_value("6 && 3", 2);
    assert_value("6 || 3", 7);
    assert_value("6 ^ 3", 5);
    assert_value("1 == 1 && 2 == 2", true);

    let error = assert_runtime_error("1 && true");
    assert!(matches!(error, RuntimeError::TypeMismatch { .. }));
}

#[test]
fn logic_operators_evaluate_both_sides() {
    let error = assert_runtime_error("false && missing");
    assert_eq!(error, RuntimeError::UnresolvedVariable { name: "missing".to_string() });
}

#[test]
fn not_is_complement_on_integers() {
    assert_value("!true", false);
    assert_value("!10", !10_i64);
    assert_value("!!10", 10);

    assert_eq!(assert_runtime_error("!1.5"),
               RuntimeError::UnaryTypeMismatch { operator: "!".to_string(),
                                                 kind:     ValueKind::Float, });
    assert!(matches!(assert_runtime_error("-\"a\""), RuntimeError::UnaryTypeMismatch { .. }));
}

#[test]
fn division_by_zero() {
    assert_eq!(assert_runtime_error("1 / 0"), RuntimeError::DivisionByZero);
    assert_eq!(assert_runtime_error("1 % 0"), RuntimeError::DivisionByZero);
    assert_value("1.0 / 0", f32::INFINITY);
}

#[test]
fn builtin_functions() {
    assert_value("abs(-4)", 4);
    assert_value("abs(-1.5)", 1.5_f32);
    assert_value("round(2.5)", 3);
    assert_value("round(-2.5)", -3);
    assert_value("str2int(\"0x10\")", 16);
    assert_value("str2int(\" -7 \")", -7);
    assert_value("str2float(\"1.25\")", 1.25_f32);
    assert_value("str2bool(\"True\")", true);
    assert_value("tostr(1.0)", "1.0");
    assert_value("tostr(0.0000001)", "1.0e-7");
    assert_value("tostr(-2.5e20)", "-2.5e20");
    assert_value("strlen(\"héllo\")", 5);
    assert_value("issubstr(\"WORLD\", \"hello world\")", true);
    assert_value("str2java(\"say \\\"hi\\\"\\n\")", "say \\\"hi\\\"\\n");
    assert_value("STRLEN(\"ab\")", 2);

    assert!(matches!(assert_runtime_error("str2int(\"twelve\")"), RuntimeError::InvalidArgument { .. }));
    assert!(matches!(assert_runtime_error("strlen(3)"), RuntimeError::FunctionTypeMismatch { .. }));
}

#[test]
fn set_functions() {
    assert_value("size(set(1, 2, 2, 3))", 3);
    assert_value("size(set())", 0);
    assert_value("contains(set(\"a\", \"b\"), \"b\")", true);
    assert_value("contains(set(1, 2), 1.0)", false);
    assert_value("size(union(set(1, 2), set(2, 3)))", 3);
    assert_value("intersect(set(1, 2, 3), set(3, 2)) == set(2, 3)", true);
    assert_value("diff(set(1, 2, 3), set(2))", Value::set_of([Value::Integer(1), Value::Integer(3)]));
    assert_value("tostr(set(1, \"a\"))", "{1, \"a\"}");
}

#[test]
fn nested_sets_ignore_member_order() {
    assert_value("set(set(1, 2)) == set(set(2, 1))", true);
    assert_value("size(set(set(1, 2), set(2, 1)))", 1);
    assert_value("contains(set(set(1, 2)), set(2, 1))", true);
    assert_value("set(set(1, 2)) == set(set(1, 3))", false);
}

#[test]
fn syntax_errors() {
    assert!(assert_parse_error("1 +").to_string().contains("offset 2"));
    assert!(matches!(assert_parse_error(""), ParseError::EmptyExpression));
    assert!(matches!(assert_parse_error("(1 + 2"), ParseError::ExpectedClosingParen { .. }));
    assert!(matches!(assert_parse_error("1 + 2)"), ParseError::UnmatchedParen { .. }));
    assert_eq!(assert_parse_error("(1 +)"),
               ParseError::DanglingOperator { operator: "+".to_string(),
                                              offset:   3, });
    assert!(matches!(assert_parse_error("issubstr(\"a\" +, \"b\")"), ParseError::DanglingOperator { .. }));
    assert!(matches!(assert_parse_error("1 2"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(assert_parse_error("set(1,,2)"), ParseError::EmptyArgument { .. }));
    assert!(matches!(assert_parse_error("sqrt(4)"), ParseError::UnknownFunction { .. }));
    assert!(matches!(assert_parse_error("strlen(\"a\", \"b\")"), ParseError::ArgumentCountMismatch { .. }));
    assert!(assert_parse_error("1 @ 2").is_lexical());
}

#[test]
fn variables_resolve_through_layers() {
    let globals: Variables = [("level", Value::Integer(1)), ("name", Value::from("global"))].into_iter()
                                                                                           .collect();
    let locals: Variables = [("Level", Value::Integer(2))].into_iter().collect();
    let context = VariableContext::new(&globals).with_locals(&locals);

    assert_eq!(context.eval_source("LEVEL + 1").unwrap(), Value::Integer(3));
    assert_eq!(context.eval_source("name").unwrap(), Value::from("global"));
    assert!(matches!(context.eval_source("nope"),
                     Err(ExpressionError::Runtime(RuntimeError::UnresolvedVariable { .. }))));

    let lenient = context.unknown_as_false(true);
    assert_eq!(lenient.eval_source("nope || level == 2").unwrap(), Value::Bool(true));
    assert!(!lenient.is_defined("nope"));
}

#[test]
fn providers_shadow_other_layers() {
    let globals: Variables = [("env.user", Value::from("shadowed"))].into_iter().collect();
    let specials: Vec<Arc<dyn SpecialVariables>> =
        vec![Arc::new(EnvironmentVariables::from_pairs([("USER", "alice"), ("JOBS", "4")]))];
    let context = VariableContext::new(&globals).with_specials(&specials);

    assert_eq!(context.eval_source("env.user").unwrap(), Value::from("alice"));
    assert_eq!(context.eval_source("env.jobs * 2").unwrap(), Value::Integer(8));
    assert!(!context.is_defined("env.home"));
}

#[test]
fn file_variables() {
    let globals = Variables::new();
    let path = std::path::Path::new("src/app/Main.java");
    let context = VariableContext::new(&globals).with_file(path, 12);

    assert_eq!(context.eval_source("__line__").unwrap(), Value::Integer(12));
    assert_eq!(context.eval_source("__filename__").unwrap(), Value::from("Main.java"));
    assert_eq!(context.eval_source("__filefolder__").unwrap(), Value::from("src/app"));
}
