//! Programs with nothing to lower must come back unchanged.

use std::sync::Arc;

use bumpalo::Bump;
use esdown_ast::ast::member::ClassMember;
use esdown_ast::string_interner::StringInterner;
use esdown_test_helpers::{lower_to_string, TreeBuilder};

#[test]
fn test_program_without_super_is_unchanged() {
    let arena = Bump::new();
    let interner = Arc::new(StringInterner::new());
    let b = TreeBuilder::new(&arena, interner.clone());

    let mut program = b.program(vec![
        b.var_stmt("x", b.num(1.0)),
        b.expr_stmt(b.call(b.ident("f"), vec![b.ident("x")])),
    ]);

    let (changed, output) = lower_to_string(&mut program, &arena, &interner).unwrap();
    assert!(!changed);
    assert_eq!(output, "var x = 1;\nf(x);\n");
}

#[test]
fn test_class_without_super_is_unchanged() {
    let arena = Bump::new();
    let interner = Arc::new(StringInterner::new());
    let b = TreeBuilder::new(&arena, interner.clone());

    let method = b.method("m", &[], vec![b.ret(b.member(b.this(), "x"))]);
    let class = b.class_decl("B", Some(b.ident("A")), vec![ClassMember::Method(method)]);
    let mut program = b.program(vec![class]);

    let (changed, output) = lower_to_string(&mut program, &arena, &interner).unwrap();
    assert!(!changed, "no member referenced super");
    assert!(!output.contains("$esdownRuntime"));
}

#[test]
fn test_lowering_is_idempotent() {
    let arena = Bump::new();
    let interner = Arc::new(StringInterner::new());
    let b = TreeBuilder::new(&arena, interner.clone());

    let method = b.method("m", &[], vec![b.ret(b.super_member("x"))]);
    let class = b.class_decl("B", Some(b.ident("A")), vec![ClassMember::Method(method)]);
    let mut program = b.program(vec![class]);

    let (first_changed, first_output) = lower_to_string(&mut program, &arena, &interner).unwrap();
    assert!(first_changed);

    let (second_changed, second_output) = lower_to_string(&mut program, &arena, &interner).unwrap();
    assert!(!second_changed, "a lowered tree has no super left to rewrite");
    assert_eq!(first_output, second_output);
}

#[test]
fn test_object_literal_lowering_is_idempotent() {
    let arena = Bump::new();
    let interner = Arc::new(StringInterner::new());
    let b = TreeBuilder::new(&arena, interner.clone());

    let object = b.object(vec![b.object_method(
        "m",
        &[],
        vec![b.ret(b.super_member("x"))],
    )]);
    let mut program = b.program(vec![b.var_stmt("o", object)]);

    let (_, first_output) = lower_to_string(&mut program, &arena, &interner).unwrap();
    let (second_changed, second_output) = lower_to_string(&mut program, &arena, &interner).unwrap();
    assert!(!second_changed);
    assert_eq!(first_output, second_output);
}

#[test]
fn test_synthesized_names_skip_user_bindings() {
    let arena = Bump::new();
    let interner = Arc::new(StringInterner::new());
    let b = TreeBuilder::new(&arena, interner.clone());

    // The program already binds $__0, so the identity temp must skip it.
    let object = b.object(vec![b.object_method(
        "m",
        &[],
        vec![b.ret(b.super_member("x"))],
    )]);
    let mut program = b.program(vec![
        b.var_stmt("$__0", b.num(0.0)),
        b.var_stmt("o", object),
    ]);

    let (_, output) = lower_to_string(&mut program, &arena, &interner).unwrap();
    assert!(
        output.contains("($__1 = {"),
        "the generator must not reuse the user's $__0, got:\n{output}"
    );
    assert!(output.contains("$esdownRuntime.superGet(this, $__1, \"x\")"));
}
