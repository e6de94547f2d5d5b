use crate::helpers::execute;
use insta::assert_display_snapshot;
use plox::Interpreter;

#[test]
fn declare_and_invoke_function() {
    let source = r#"fun sayHi(first, last) {
  print "Hi, " + first + " " + last + "!";
}

sayHi("Dear", "Reader");"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    Hi, Dear Reader!
    "###);
}

#[test]
fn a_function_without_a_return_evaluates_to_nil() {
    let source = r#"fun noop() {}
print noop();"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    nil
    "###);
}

#[test]
fn a_counter_closure_owns_its_captured_state() {
    let source = r#"fun makeCounter() {
  var i = 0;
  fun count() {
    i = i + 1;
    print i;
  }
  return count;
}

var counter = makeCounter();
counter();
counter();"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    1
    2
    "###);
}

#[test]
fn two_counters_do_not_share_state() {
    let source = r#"fun makeCounter() {
  var i = 0;
  fun count() {
    i = i + 1;
    print i;
  }
  return count;
}

var a = makeCounter();
var b = makeCounter();
a();
a();
b();"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    1
    2
    1
    "###);
}

#[test]
fn recursion_works() {
    let source = r#"fun fib(n) {
  if (n <= 1) return n;
  return fib(n - 2) + fib(n - 1);
}

print fib(10);"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    55
    "###);
}

#[test]
fn return_unwinds_nested_blocks_but_only_one_frame() {
    let source = r#"fun find() {
  var i = 0;
  while (true) {
    if (i == 2) {
      return i;
    }
    i = i + 1;
  }
}
print find();
print "after";"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    2
    after
    "###);
}

#[test]
fn functions_and_natives_have_display_forms() {
    let source = r#"fun sayHi() {}
print sayHi;
print clock;"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    <fn sayHi>
    <native fn>
    "###);
}

#[test]
fn clock_returns_a_non_decreasing_number_of_seconds() {
    let source = r#"var before = clock();
var after = clock();
print after >= before;
print before > 0;"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    true
    true
    "###);
}

#[test]
fn arguments_are_evaluated_left_to_right() {
    let source = r#"fun tag(label) {
  print label;
  return label;
}
fun take(a, b, c) {}
take(tag(1), tag(2), tag(3));"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    1
    2
    3
    "###);
}

#[test]
fn an_interpreter_session_spans_multiple_executions() {
    // What the REPL does: one interpreter, fed a line at a time. The closure
    // declared by the first line must still work on later lines.
    let mut buffer = Vec::new();
    {
        let mut interpreter = Interpreter::new(&mut buffer);
        interpreter
            .execute_raw(
                r#"fun makeCounter() {
  var i = 0;
  fun count() {
    i = i + 1;
    print i;
  }
  return count;
}
var counter = makeCounter();"#,
            )
            .unwrap();
        interpreter.execute_raw("counter();").unwrap();
        interpreter.execute_raw("counter();").unwrap();
    }
    let output = String::from_utf8(buffer).unwrap();
    assert_display_snapshot!(output, @r###"
    1
    2
    "###);
}
