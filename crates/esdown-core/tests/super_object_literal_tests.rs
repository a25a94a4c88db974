//! Lowering of `super` inside object literal members.
//!
//! An anonymous literal has no stable binding to hang prototype lookups on,
//! so the first `super` use mints an identity temp: the literal becomes
//! `($__n = { ... })` and every helper call inside references `$__n`. A
//! literal with no `super` references is left untouched.

use std::sync::Arc;

use bumpalo::Bump;
use esdown_ast::string_interner::StringInterner;
use esdown_test_helpers::{lower_to_string, TreeBuilder};

#[test]
fn test_literal_with_super_is_wrapped_in_identity_assignment() {
    let arena = Bump::new();
    let interner = Arc::new(StringInterner::new());
    let b = TreeBuilder::new(&arena, interner.clone());

    let object = b.object(vec![b.object_method(
        "m",
        &[],
        vec![b.ret(b.super_member("x"))],
    )]);
    let mut program = b.program(vec![b.var_stmt("o", object)]);

    let (changed, output) = lower_to_string(&mut program, &arena, &interner).unwrap();
    assert!(changed);
    assert!(
        output.contains("var o = ($__0 = {"),
        "the literal must be wrapped so the temp captures its value, got:\n{output}"
    );
    assert!(output.contains("$esdownRuntime.superGet(this, $__0, \"x\")"));
    assert!(
        output.contains("var $__0;"),
        "the identity temp is declared in the enclosing scope, got:\n{output}"
    );
}

#[test]
fn test_one_temp_is_shared_by_all_members() {
    let arena = Bump::new();
    let interner = Arc::new(StringInterner::new());
    let b = TreeBuilder::new(&arena, interner.clone());

    let object = b.object(vec![
        b.object_method("m1", &[], vec![b.ret(b.super_member("x"))]),
        b.object_method("m2", &[], vec![b.ret(b.super_member("y"))]),
    ]);
    let mut program = b.program(vec![b.var_stmt("o", object)]);

    let (_, output) = lower_to_string(&mut program, &arena, &interner).unwrap();
    assert!(output.contains("$esdownRuntime.superGet(this, $__0, \"x\")"));
    assert!(output.contains("$esdownRuntime.superGet(this, $__0, \"y\")"));
    assert!(
        !output.contains("$__1"),
        "both members must share one identity temp, got:\n{output}"
    );
}

#[test]
fn test_literal_without_super_is_untouched() {
    let arena = Bump::new();
    let interner = Arc::new(StringInterner::new());
    let b = TreeBuilder::new(&arena, interner.clone());

    let object = b.object(vec![
        b.prop("x", b.num(1.0)),
        b.object_method("m", &[], vec![b.ret(b.ident("x"))]),
    ]);
    let mut program = b.program(vec![b.var_stmt("o", object)]);

    let (changed, output) = lower_to_string(&mut program, &arena, &interner).unwrap();
    assert!(!changed, "nothing referenced super, so nothing may change");
    assert!(!output.contains("$esdownRuntime"));
    assert!(!output.contains("$__0"));
}

#[test]
fn test_computed_key_resolves_against_enclosing_member() {
    let arena = Bump::new();
    let interner = Arc::new(StringInterner::new());
    let b = TreeBuilder::new(&arena, interner.clone());

    // var p = { m1() { var o2 = { [super.x]: 2 }; return o2; } };
    let inner = b.object(vec![b.computed_prop(b.super_member("x"), b.num(2.0))]);
    let outer = b.object(vec![b.object_method(
        "m1",
        &[],
        vec![b.var_stmt("o2", inner), b.ret(b.ident("o2"))],
    )]);
    let mut program = b.program(vec![b.var_stmt("p", outer)]);

    let (_, output) = lower_to_string(&mut program, &arena, &interner).unwrap();
    assert!(
        output.contains("[$esdownRuntime.superGet(this, $__0, \"x\")]: 2"),
        "the computed key belongs to the outer literal's home, got:\n{output}"
    );
    assert!(
        !output.contains("$__1"),
        "the inner literal must not allocate its own temp, got:\n{output}"
    );
}

#[test]
fn test_property_value_resolves_against_enclosing_member() {
    let arena = Bump::new();
    let interner = Arc::new(StringInterner::new());
    let b = TreeBuilder::new(&arena, interner.clone());

    // var q = { m() { return { x: super.y }; } };
    let inner = b.object(vec![b.prop("x", b.super_member("y"))]);
    let outer = b.object(vec![b.object_method("m", &[], vec![b.ret(inner)])]);
    let mut program = b.program(vec![b.var_stmt("q", outer)]);

    let (_, output) = lower_to_string(&mut program, &arena, &interner).unwrap();
    assert!(
        output.contains("x: $esdownRuntime.superGet(this, $__0, \"y\")"),
        "plain property values evaluate in the enclosing member, got:\n{output}"
    );
}

#[test]
fn test_temp_is_declared_in_enclosing_function() {
    let arena = Bump::new();
    let interner = Arc::new(StringInterner::new());
    let b = TreeBuilder::new(&arena, interner.clone());

    // The literal lives inside f's body, so the temp must be declared there
    // and not at top level.
    use esdown_ast::ast::statement::{FunctionDeclaration, Statement};
    use esdown_ast::span::Span;
    let object = b.object(vec![b.object_method(
        "m",
        &[],
        vec![b.ret(b.super_member("x"))],
    )]);
    let func = Statement::Function(FunctionDeclaration {
        name: b.spanned("f"),
        params: &[],
        body: b.block(vec![b.var_stmt("o", object), b.ret(b.ident("o"))]),
        span: Span::dummy(),
    });
    let mut program = b.program(vec![func]);

    let (_, output) = lower_to_string(&mut program, &arena, &interner).unwrap();
    assert!(
        output.contains("function f() {\n  var $__0;"),
        "the temp is hoisted into f, got:\n{output}"
    );
    assert!(
        !output.starts_with("var $__0;"),
        "no top-level declaration is needed, got:\n{output}"
    );
}
