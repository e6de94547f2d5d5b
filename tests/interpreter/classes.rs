use crate::helpers::execute;
use insta::assert_display_snapshot;

#[test]
fn classes_and_instances_have_display_forms() {
    let source = r#"class Bagel {}
print Bagel;
print Bagel();"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    Bagel
    Bagel instance
    "###);
}

#[test]
fn fields_can_be_set_and_read() {
    let source = r#"class Bag {}
var bag = Bag();
bag.content = "bread";
print bag.content;
bag.content = "cheese";
print bag.content;"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    bread
    cheese
    "###);
}

#[test]
fn methods_see_the_instance_through_this() {
    let source = r#"class Cake {
  taste() {
    var adjective = "delicious";
    print "The " + this.flavour + " cake is " + adjective + "!";
  }
}

var cake = Cake();
cake.flavour = "chocolate";
cake.taste();"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    The chocolate cake is delicious!
    "###);
}

#[test]
fn a_bound_method_remembers_its_instance() {
    let source = r#"class Person {
  sayName() {
    print this.name;
  }
}

var jane = Person();
jane.name = "Jane";
var method = jane.sayName;
method();"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    Jane
    "###);
}

#[test]
fn fields_shadow_methods() {
    let source = r#"class Oops {
  describe() {
    print "the method";
  }
}

var oops = Oops();
oops.describe();
fun replacement() {
  print "the field";
}
oops.describe = replacement;
oops.describe();"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    the method
    the field
    "###);
}

#[test]
fn the_initializer_runs_on_construction() {
    let source = r#"class Point {
  init(x, y) {
    this.x = x;
    this.y = y;
  }
}

var p = Point(3, 4);
print p.x;
print p.y;"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    3
    4
    "###);
}

#[test]
fn the_initializer_always_returns_the_instance() {
    let source = r#"class C {
  init() {
    this.touched = true;
  }
}

var c = C();
print c.init();"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    C instance
    "###);
}

#[test]
fn a_bare_return_in_an_initializer_still_yields_the_instance() {
    let source = r#"class Guard {
  init(armed) {
    this.armed = armed;
    if (!armed) return;
    this.ready = true;
  }
}

print Guard(false);"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    Guard instance
    "###);
}

#[test]
fn methods_are_inherited_through_the_superclass_chain() {
    let source = r#"class Doughnut {
  cook() {
    print "Fry until golden brown.";
  }
}

class BostonCream < Doughnut {}

BostonCream().cook();"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    Fry until golden brown.
    "###);
}

#[test]
fn super_calls_the_overridden_method() {
    let source = r#"class A {
  hello() {
    print "A";
  }
}

class B < A {
  hello() {
    super.hello();
    print "B";
  }
}

B().hello();"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    A
    B
    "###);
}

#[test]
fn super_binds_this_to_the_original_instance() {
    let source = r#"class Doughnut {
  cook() {
    print "Cooking " + this.kind + ".";
  }
}

class BostonCream < Doughnut {
  cook() {
    super.cook();
    print "Pipe full of custard.";
  }
}

var bc = BostonCream();
bc.kind = "Boston cream";
bc.cook();"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    Cooking Boston cream.
    Pipe full of custard.
    "###);
}

#[test]
fn subclass_initializers_may_call_super_init() {
    let source = r#"class Named {
  init(name) {
    this.name = name;
  }
}

class Dog < Named {
  init(name, breed) {
    super.init(name);
    this.breed = breed;
  }
}

var rex = Dog("Rex", "collie");
print rex.name;
print rex.breed;"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    Rex
    collie
    "###);
}

#[test]
fn state_lives_on_the_instance_not_the_class() {
    let source = r#"class Counter {
  init() {
    this.count = 0;
  }
  bump() {
    this.count = this.count + 1;
    print this.count;
  }
}

var a = Counter();
var b = Counter();
a.bump();
a.bump();
b.bump();"#;
    let output = execute(source);
    assert_display_snapshot!(output, @r###"
    1
    2
    1
    "###);
}
