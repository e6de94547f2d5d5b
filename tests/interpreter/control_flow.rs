use crate::helpers::execute;
use insta::assert_display_snapshot;

#[test]
fn two_branch_conditional_works() {
    let source = r#"if (3 > 5) {
    print true;
} else {
    print false;
}"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    false
    "###);
}

#[test]
fn single_branch_conditional_works() {
    let source = r#"if (5 > 2) {
    print true;
}"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    true
    "###);
}

#[test]
fn zero_is_truthy() {
    let source = r#"if (0) {
    print "zero is truthy";
}"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    zero is truthy
    "###);
}

#[test]
fn while_loops_run_until_the_condition_turns_falsey() {
    let source = r#"var i = 0;
while (i < 3) {
  print i;
  i = i + 1;
}"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    0
    1
    2
    "###);
}

#[test]
fn for_loops_desugar_to_while_loops() {
    let source = r#"for (var i = 0; i < 3; i = i + 1) print i;"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    0
    1
    2
    "###);
}

#[test]
fn a_for_loop_without_clauses_still_runs_its_body() {
    // An omitted condition defaults to true; the `return` is the only way out.
    let source = r#"fun run() {
  var i = 0;
  for (;;) {
    if (i > 1) return;
    print i;
    i = i + 1;
  }
}
run();"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    0
    1
    "###);
}

#[test]
fn logical_operators_return_the_deciding_operand() {
    let source = r#"print "hi" or 2;
print nil or "yes";
print nil and 2;
print 0 and 1;
print false or false;"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    hi
    yes
    nil
    1
    false
    "###);
}

#[test]
fn logical_operators_short_circuit_side_effects() {
    let source = r#"fun loud(value) {
  print "evaluated";
  return value;
}
true or loud(true);
false and loud(true);
false or loud(true);"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    evaluated
    "###);
}
