//! Explicit rejection of `super` in positions the lowering has no rule for.
//!
//! Silently passing `super` through would only surface at run time as a
//! reference error in the target dialect, so each of these reports an error
//! diagnostic; the unit is still processed to the end.

use std::sync::Arc;

use bumpalo::Bump;
use esdown_ast::ast::member::ClassMember;
use esdown_ast::string_interner::StringInterner;
use esdown_core::diagnostics::DiagnosticLevel;
use esdown_core::errors::LoweringError;
use esdown_test_helpers::{lower_with_diagnostics, TreeBuilder};

#[test]
fn test_top_level_super_reports_error() {
    let arena = Bump::new();
    let interner = Arc::new(StringInterner::new());
    let b = TreeBuilder::new(&arena, interner.clone());

    let mut program = b.program(vec![b.expr_stmt(b.super_member("x"))]);
    let (result, diagnostics, output) = lower_with_diagnostics(&mut program, &arena, &interner);

    assert!(matches!(
        result,
        Err(LoweringError::DiagnosticsEmitted { count: 1 })
    ));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].level, DiagnosticLevel::Error);
    assert!(diagnostics[0]
        .message
        .contains("only allowed inside class or object literal members"));
    // Best effort: the node is left as written.
    assert!(output.contains("super.x"));
}

#[test]
fn test_bare_super_reports_error() {
    let arena = Bump::new();
    let interner = Arc::new(StringInterner::new());
    let b = TreeBuilder::new(&arena, interner.clone());

    let method = b.method("m", &[], vec![b.ret(b.super_kw())]);
    let class = b.class_decl("B", Some(b.ident("A")), vec![ClassMember::Method(method)]);
    let mut program = b.program(vec![class]);

    let (result, diagnostics, _) = lower_with_diagnostics(&mut program, &arena, &interner);
    assert!(result.is_err());
    assert!(diagnostics[0]
        .message
        .contains("only valid in member accesses and constructor calls"));
}

#[test]
fn test_super_call_in_object_literal_method_reports_error() {
    let arena = Bump::new();
    let interner = Arc::new(StringInterner::new());
    let b = TreeBuilder::new(&arena, interner.clone());

    let object = b.object(vec![b.object_method(
        "m",
        &[],
        vec![b.expr_stmt(b.super_call(vec![]))],
    )]);
    let mut program = b.program(vec![b.var_stmt("o", object)]);

    let (result, diagnostics, _) = lower_with_diagnostics(&mut program, &arena, &interner);
    assert!(result.is_err());
    assert!(diagnostics[0]
        .message
        .contains("only valid inside a class constructor"));
}

#[test]
fn test_delete_super_member_reports_error() {
    let arena = Bump::new();
    let interner = Arc::new(StringInterner::new());
    let b = TreeBuilder::new(&arena, interner.clone());

    let method = b.method(
        "m",
        &[],
        vec![b.expr_stmt(b.unary_delete(b.super_member("x")))],
    );
    let class = b.class_decl("B", Some(b.ident("A")), vec![ClassMember::Method(method)]);
    let mut program = b.program(vec![class]);

    let (result, diagnostics, _) = lower_with_diagnostics(&mut program, &arena, &interner);
    assert!(result.is_err());
    assert!(diagnostics[0]
        .message
        .contains("cannot delete a 'super' member reference"));
}

#[test]
fn test_errors_do_not_stop_the_rest_of_the_unit() {
    let arena = Bump::new();
    let interner = Arc::new(StringInterner::new());
    let b = TreeBuilder::new(&arena, interner.clone());

    let good_method = b.method("ok", &[], vec![b.ret(b.super_member("x"))]);
    let class = b.class_decl(
        "B",
        Some(b.ident("A")),
        vec![ClassMember::Method(good_method)],
    );
    let mut program = b.program(vec![b.expr_stmt(b.super_member("oops")), class]);

    let (result, diagnostics, output) = lower_with_diagnostics(&mut program, &arena, &interner);
    assert!(matches!(
        result,
        Err(LoweringError::DiagnosticsEmitted { count: 1 })
    ));
    assert_eq!(diagnostics.len(), 1);
    assert!(
        output.contains("$esdownRuntime.superGet(this, B.prototype, \"x\")"),
        "the valid class is still lowered, got:\n{output}"
    );
}
