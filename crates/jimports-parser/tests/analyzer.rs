use jimports_core::Identifier;
use jimports_parser::{parse_java, ParseError};

fn ids(names: &[&str]) -> Vec<Identifier> {
    names.iter().map(|n| Identifier::from(*n)).collect()
}

#[test]
fn reports_undeclared_type_references() {
    let file = parse_java(
        r#"
package com.mine;

public class App {
    private List<String> names;
    private Map<String, Integer> counts;
}
"#,
    )
    .unwrap();

    assert!(file.unresolved.contains(&Identifier::from("List")));
    assert!(file.unresolved.contains(&Identifier::from("Map")));
    // java.lang filtering happens downstream; the analyzer just reports
    assert!(file.unresolved.contains(&Identifier::from("String")));
    assert!(file.unresolved.contains(&Identifier::from("Integer")));
}

#[test]
fn locally_declared_names_are_never_unresolved() {
    let file = parse_java(
        r#"
class App {
    int total;

    void accumulate(int amount) {
        int doubled = amount * 2;
        total += doubled;
    }
}
"#,
    )
    .unwrap();

    for name in ids(&["App", "total", "accumulate", "amount", "doubled"]) {
        assert!(
            !file.unresolved.contains(&name),
            "{name} should be resolved"
        );
    }
    assert!(file.unresolved.is_empty());
}

#[test]
fn class_bodies_are_order_independent() {
    let file = parse_java(
        r#"
class Counter {
    void bump() {
        count++;
        helper();
    }

    int count;

    void helper() {}
}
"#,
    )
    .unwrap();

    assert!(file.unresolved.is_empty());
}

#[test]
fn top_level_types_are_order_independent() {
    let file = parse_java(
        r#"
class First {
    Second second = new Second();
}

class Second {}
"#,
    )
    .unwrap();

    assert!(file.unresolved.is_empty());
}

// A class extending a later sibling is deferred until scope close, then
// its inherited members resolve the uses in the subclass body.
#[test]
fn orphan_extension_defers_across_the_scope() {
    let file = parse_java(
        r#"
class B extends A {
    void update() {
        shared = 1;
    }
}

class A {
    int shared;
}
"#,
    )
    .unwrap();

    assert!(file.unresolved.is_empty());
    assert!(file.orphans.is_empty());
}

#[test]
fn inheritance_chain_closes_after_whole_file() {
    let file = parse_java(
        r#"
class Leaf extends Mid {
    void use() {
        int total = midValue + baseValue;
    }
}

class Mid extends Base {
    int midValue;
}

class Base {
    int baseValue;
}
"#,
    )
    .unwrap();

    assert!(file.unresolved.is_empty());
    assert!(file.orphans.is_empty());
}

#[test]
fn extension_through_a_nested_class_selector() {
    let file = parse_java(
        r#"
class Outer {
    static class Inner {
        int nested;
    }
}

class Sub extends Outer.Inner {
    int twice() {
        return nested * 2;
    }
}
"#,
    )
    .unwrap();

    assert!(file.unresolved.is_empty());
    assert!(file.orphans.is_empty());
}

#[test]
fn unknown_superclass_leaves_an_orphan_with_pending_uses() {
    let file = parse_java(
        r#"
class Worker extends ExternalBase {
    void run() {
        dispatch();
    }
}
"#,
    )
    .unwrap();

    assert_eq!(file.orphans.len(), 1);
    let orphan = &file.orphans[0];
    assert_eq!(orphan.name, Identifier::from("Worker"));
    assert_eq!(orphan.superclass.to_string(), "ExternalBase");
    assert!(orphan.pending.contains(&Identifier::from("dispatch")));
    // the superclass name itself is not an identifier reference
    assert!(!file.unresolved.contains(&Identifier::from("ExternalBase")));
}

#[test]
fn superclass_bound_to_a_non_class_is_dropped_silently() {
    let file = parse_java(
        r#"
class Holder {
    int thing;

    class Child extends thing {
        void go() {}
    }
}
"#,
    )
    .unwrap();

    // `thing` is only a field; the extension is abandoned without any
    // orphan or unresolved entry for it
    assert!(file.orphans.is_empty());
}

#[test]
fn qualified_names_only_reference_their_head() {
    let file = parse_java(
        r#"
class Main {
    void run() {
        System.out.println(Strings.repeat("x", 3));
    }
}
"#,
    )
    .unwrap();

    assert!(file.unresolved.contains(&Identifier::from("System")));
    assert!(file.unresolved.contains(&Identifier::from("Strings")));
    assert!(!file.unresolved.contains(&Identifier::from("out")));
    assert!(!file.unresolved.contains(&Identifier::from("println")));
    assert!(!file.unresolved.contains(&Identifier::from("repeat")));
}

#[test]
fn lambda_and_loop_variables_bind_in_their_scopes() {
    let file = parse_java(
        r#"
class Main {
    void run(List<String> names) {
        names.forEach(name -> name.length());
        for (String each : names) {
            each.trim();
        }
    }
}
"#,
    )
    .unwrap();

    assert!(!file.unresolved.contains(&Identifier::from("name")));
    assert!(!file.unresolved.contains(&Identifier::from("each")));
    assert!(file.unresolved.contains(&Identifier::from("List")));
}

#[test]
fn type_parameters_are_not_references() {
    let file = parse_java(
        r#"
class Box<T> {
    T value;

    <R> R map(Function<T, R> f) {
        return f.apply(value);
    }
}
"#,
    )
    .unwrap();

    assert!(!file.unresolved.contains(&Identifier::from("T")));
    assert!(!file.unresolved.contains(&Identifier::from("R")));
    assert!(file.unresolved.contains(&Identifier::from("Function")));
}

#[test]
fn annotations_are_references() {
    let file = parse_java(
        r#"
@Entity
class Person {
    @Override
    public String toString() {
        return "";
    }
}
"#,
    )
    .unwrap();

    assert!(file.unresolved.contains(&Identifier::from("Entity")));
    assert!(file.unresolved.contains(&Identifier::from("Override")));
}

#[test]
fn captures_package_imports_and_anchor() {
    let source = r#"package com.mine.app;

import java.util.List;
import static org.junit.Assert.assertEquals;
import java.util.*;

class App {}
"#;
    let file = parse_java(source).unwrap();

    assert_eq!(file.package.as_ref().unwrap().to_string(), "com.mine.app");
    // the wildcard import introduces no identifier and is not retained
    assert_eq!(file.imports.len(), 2);
    assert_eq!(file.imports[0].selector.to_string(), "java.util.List");
    assert!(!file.imports[0].is_static);
    assert_eq!(
        file.imports[1].selector.to_string(),
        "org.junit.Assert.assertEquals"
    );
    assert!(file.imports[1].is_static);
    assert!(file.already_imported(&Identifier::from("List")));
    assert!(!file.already_imported(&Identifier::from("Map")));

    let wildcard_end = source.find("java.util.*;").unwrap() + "java.util.*;".len();
    assert_eq!(file.insert_offset, wildcard_end);
}

#[test]
fn top_level_declarations_expose_member_sets() {
    let file = parse_java(
        r#"
class Shapes {
    int sides;
    void rotate() {}
    static class Corner {}
}

interface Drawable {
    void draw();
}
"#,
    )
    .unwrap();

    assert_eq!(file.declarations.len(), 2);
    let shapes = file
        .declarations
        .iter()
        .find(|d| d.name == Identifier::from("Shapes"))
        .unwrap();
    for member in ids(&["sides", "rotate", "Corner"]) {
        assert!(shapes.members.contains(&member));
    }
    let drawable = file
        .declarations
        .iter()
        .find(|d| d.name == Identifier::from("Drawable"))
        .unwrap();
    assert!(drawable.members.contains(&Identifier::from("draw")));
}

#[test]
fn syntax_errors_are_fatal_with_positions() {
    let err = parse_java("class Broken {").unwrap_err();
    match err {
        ParseError::Syntax { diagnostics } => {
            assert!(!diagnostics.is_empty());
            let rendered = diagnostics[0].to_string();
            assert!(rendered.contains(": error: "), "got {rendered}");
        }
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn try_catch_and_switch_scopes() {
    let file = parse_java(
        r#"
class Main {
    int classify(int code) {
        try (AutoCloseable guard = open()) {
            switch (code) {
                case 1:
                    int one = code + 1;
                    return one;
                default:
                    break;
            }
        } catch (RuntimeException boom) {
            return boom.hashCode();
        } finally {
            cleanup();
        }
        return 0;
    }
}
"#,
    )
    .unwrap();

    for bound in ids(&["guard", "one", "boom"]) {
        assert!(!file.unresolved.contains(&bound), "{bound} should bind");
    }
    // open() and cleanup() are not declared anywhere
    assert!(file.unresolved.contains(&Identifier::from("open")));
    assert!(file.unresolved.contains(&Identifier::from("cleanup")));
    assert!(file.unresolved.contains(&Identifier::from("AutoCloseable")));
}
