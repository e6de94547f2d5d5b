use crate::helpers::execute;
use insta::assert_display_snapshot;

#[test]
fn lexical_scopes_are_interpreted_correctly() {
    let source = r#"var a = "global a";
var b = "global b";
var c = "global c";
{
  var a = "outer a";
  var b = "outer b";
  {
    var a = "inner a";
    print a;
    print b;
    print c;
  }
  print a;
  print b;
  print c;
}
print a;
print b;
print c;"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    inner a
    outer b
    global c
    outer a
    outer b
    global c
    global a
    global b
    global c
    "###);
}

#[test]
fn a_block_shadows_and_then_uncovers_an_outer_variable() {
    let source = r#"var a = 1;
{
  var a = 2;
  print a;
}
print a;"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    2
    1
    "###);
}

#[test]
fn a_closure_keeps_seeing_the_binding_it_captured() {
    // The second `showA()` call still prints "global": the inner `var a`
    // creates a new binding, it does not rebind the captured one.
    let source = r#"var a = "global";
{
  fun showA() {
    print a;
  }

  showA();
  var a = "block";
  showA();
  print a;
}"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    global
    global
    block
    "###);
}

#[test]
fn assignment_reaches_through_to_the_enclosing_scope() {
    let source = r#"var a = 1;
{
  a = 2;
}
print a;"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    2
    "###);
}
