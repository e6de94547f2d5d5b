use crate::helpers::{execute_err, execute_with_result};
use insta::assert_display_snapshot;
use plox::ExecuteError;

#[test]
fn an_undefined_variable_is_a_runtime_error() {
    let (output, result) = execute_with_result("print a;");
    assert_eq!(output, "");
    let error = result.unwrap_err();
    assert!(matches!(error, ExecuteError::Runtime(_)));
    assert_display_snapshot!(error, @r###"
    Undefined variable 'a'.
    [line 1]
    "###);
}

#[test]
fn assigning_to_an_undefined_variable_is_a_runtime_error() {
    assert_display_snapshot!(execute_err("b = 1;"), @r###"
    Undefined variable 'b'.
    [line 1]
    "###);
}

#[test]
fn a_top_level_return_is_a_static_error_and_nothing_runs() {
    let (output, result) = execute_with_result(r#"print "before"; return 1;"#);
    assert_eq!(output, "");
    let error = result.unwrap_err();
    assert!(matches!(error, ExecuteError::Static(_)));
    assert_display_snapshot!(error, @r###"
    [line 1] Error at 'return': Can't return from top-level code.
    "###);
}

#[test]
fn scan_and_parse_errors_are_reported_together() {
    let error = execute_err("var a = @;");
    assert_display_snapshot!(error, @r###"
    [line 1] Error: Unexpected character.
    [line 1] Error at ';': Expect expression.
    "###);
}

#[test]
fn output_produced_before_a_runtime_error_sticks() {
    let (output, result) = execute_with_result("print 1; print a; print 2;");
    assert_eq!(output, "1\n");
    assert!(matches!(result.unwrap_err(), ExecuteError::Runtime(_)));
}

#[test]
fn calling_a_non_callable_is_a_runtime_error() {
    assert_display_snapshot!(execute_err(r#""not a function"();"#), @r###"
    Can only call functions and classes.
    [line 1]
    "###);
}

#[test]
fn an_arity_mismatch_is_reported_after_arguments_are_evaluated() {
    let source = r#"fun f(a, b) {}
f(1);"#;
    assert_display_snapshot!(execute_err(source), @r###"
    Expected 2 arguments but got 1.
    [line 2]
    "###);
}

#[test]
fn comparison_operands_must_be_numbers() {
    assert_display_snapshot!(execute_err(r#"print 1 < "2";"#), @r###"
    Operands must be numbers.
    [line 1]
    "###);
}

#[test]
fn plus_rejects_mixed_operands() {
    assert_display_snapshot!(execute_err(r#"print 1 + "a";"#), @r###"
    Operands must be two numbers or two strings.
    [line 1]
    "###);
}

#[test]
fn negation_requires_a_number() {
    assert_display_snapshot!(execute_err(r#"print -"a";"#), @r###"
    Operand must be a number.
    [line 1]
    "###);
}

#[test]
fn only_instances_have_properties() {
    assert_display_snapshot!(execute_err("print 4.foo;"), @r###"
    Only instances have properties.
    [line 1]
    "###);
}

#[test]
fn only_instances_have_fields() {
    assert_display_snapshot!(execute_err(r#""text".foo = 1;"#), @r###"
    Only instances have fields.
    [line 1]
    "###);
}

#[test]
fn reading_an_undefined_property_is_a_runtime_error() {
    let source = r#"class Empty {}
Empty().ghost;"#;
    assert_display_snapshot!(execute_err(source), @r###"
    Undefined property 'ghost'.
    [line 2]
    "###);
}

#[test]
fn calling_a_missing_super_method_is_a_runtime_error() {
    let source = r#"class A {}
class B < A {
  go() {
    super.missing();
  }
}
B().go();"#;
    assert_display_snapshot!(execute_err(source), @r###"
    Undefined property 'missing'.
    [line 4]
    "###);
}

#[test]
fn inheriting_from_a_non_class_is_a_runtime_error() {
    let source = r#"var NotAClass = "so not a class";
class Subclass < NotAClass {}"#;
    assert_display_snapshot!(execute_err(source), @r###"
    Superclass must be a class.
    [line 2]
    "###);
}

#[test]
fn a_runtime_error_stops_the_rest_of_the_program() {
    let (output, _) = execute_with_result("print a; print 2;");
    assert_eq!(output, "");
}
