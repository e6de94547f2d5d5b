use crate::helpers::execute;
use insta::assert_display_snapshot;

#[test]
fn arithmetic_on_numbers() {
    let source = r#"print 1 + 2;
print 7 - 2.5;
print 3 * 4;
print 10 / 4;
print -(3 + 2);"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    3
    4.5
    12
    2.5
    -5
    "###);
}

#[test]
fn plus_concatenates_strings() {
    let source = r#"var a = "foo";
var b = "bar";
print a + b;"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    foobar
    "###);
}

#[test]
fn division_by_zero_follows_float_semantics() {
    let source = r#"print 1 / 0;
print -1 / 0;
print 0 / 0;"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    inf
    -inf
    NaN
    "###);
}

#[test]
fn comparisons_require_numbers_and_yield_booleans() {
    let source = r#"print 1 < 2;
print 2 <= 2;
print 1 > 2;
print 2 >= 3;"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    true
    true
    false
    false
    "###);
}

#[test]
fn equality_is_structural_within_a_variant() {
    let source = r#"print nil == nil;
print nil == false;
print 1 == 1;
print 1 == 2;
print "a" == "a";
print "a" == "b";
print 1 == "1";
print true != false;"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    true
    false
    true
    false
    true
    false
    false
    true
    "###);
}

#[test]
fn bang_negates_truthiness() {
    let source = r#"print !nil;
print !false;
print !0;
print !"";"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    true
    true
    false
    false
    "###);
}

#[test]
fn grouping_overrides_precedence() {
    let source = r#"print 1 + 2 * 3;
print (1 + 2) * 3;
print !((1 + 2) * 3 == 9);"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    7
    9
    false
    "###);
}

#[test]
fn subtraction_and_division_are_left_associative() {
    let source = r#"print 10 - 4 - 3;
print 16 / 4 / 2;"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    3
    2
    "###);
}
