//! Canonical node construction helpers.
//!
//! Pure functions: inputs are moved or copied into freshly allocated nodes,
//! never mutated. Lowering passes compose these to build their rewrites.

use bumpalo::Bump;

use crate::ast::expression::{
    AssignmentOp, BinaryOp, Expression, ExpressionKind, Literal,
};
use crate::ast::statement::{
    Statement, VariableDeclaration, VariableDeclarator, VariableKind,
};
use crate::span::{Span, Spanned};
use crate::string_interner::StringId;

pub fn identifier<'arena>(name: StringId, span: Span) -> Expression<'arena> {
    Expression {
        kind: ExpressionKind::Identifier(name),
        span,
    }
}

pub fn number_literal<'arena>(value: f64, span: Span) -> Expression<'arena> {
    Expression {
        kind: ExpressionKind::Literal(Literal::Number(value)),
        span,
    }
}

pub fn string_literal<'arena>(value: StringId, span: Span) -> Expression<'arena> {
    Expression {
        kind: ExpressionKind::Literal(Literal::String(value)),
        span,
    }
}

pub fn this_expression<'arena>(span: Span) -> Expression<'arena> {
    Expression {
        kind: ExpressionKind::ThisKeyword,
        span,
    }
}

/// `object.property`
pub fn member<'arena>(
    arena: &'arena Bump,
    object: Expression<'arena>,
    property: Spanned<StringId>,
    span: Span,
) -> Expression<'arena> {
    Expression {
        kind: ExpressionKind::Member(arena.alloc(object), property),
        span,
    }
}

/// `object[key]`
pub fn index<'arena>(
    arena: &'arena Bump,
    object: Expression<'arena>,
    key: Expression<'arena>,
    span: Span,
) -> Expression<'arena> {
    Expression {
        kind: ExpressionKind::Index(arena.alloc(object), arena.alloc(key)),
        span,
    }
}

/// `callee(args...)`
pub fn call<'arena>(
    arena: &'arena Bump,
    callee: Expression<'arena>,
    args: Vec<Expression<'arena>>,
    span: Span,
) -> Expression<'arena> {
    Expression {
        kind: ExpressionKind::Call(arena.alloc(callee), arena.alloc_slice_clone(&args)),
        span,
    }
}

pub fn binary<'arena>(
    arena: &'arena Bump,
    op: BinaryOp,
    left: Expression<'arena>,
    right: Expression<'arena>,
    span: Span,
) -> Expression<'arena> {
    Expression {
        kind: ExpressionKind::Binary(op, arena.alloc(left), arena.alloc(right)),
        span,
    }
}

pub fn assignment<'arena>(
    arena: &'arena Bump,
    target: Expression<'arena>,
    op: AssignmentOp,
    value: Expression<'arena>,
    span: Span,
) -> Expression<'arena> {
    Expression {
        kind: ExpressionKind::Assignment(arena.alloc(target), op, arena.alloc(value)),
        span,
    }
}

/// `a, b, c` — the sequence value is the last operand.
pub fn comma<'arena>(
    arena: &'arena Bump,
    operands: Vec<Expression<'arena>>,
    span: Span,
) -> Expression<'arena> {
    Expression {
        kind: ExpressionKind::Comma(arena.alloc_slice_clone(&operands)),
        span,
    }
}

pub fn parenthesized<'arena>(
    arena: &'arena Bump,
    inner: Expression<'arena>,
    span: Span,
) -> Expression<'arena> {
    Expression {
        kind: ExpressionKind::Parenthesized(arena.alloc(inner)),
        span,
    }
}

/// `var a, b, c;` — used to hoist synthesized temporaries into the enclosing
/// function body.
pub fn var_declaration<'arena>(
    arena: &'arena Bump,
    names: &[StringId],
    span: Span,
) -> Statement<'arena> {
    let declarators: Vec<VariableDeclarator<'arena>> = names
        .iter()
        .map(|&name| VariableDeclarator {
            name: Spanned::new(name, span),
            init: None,
        })
        .collect();
    Statement::Variable(VariableDeclaration {
        kind: VariableKind::Var,
        declarators: arena.alloc_slice_clone(&declarators),
        span,
    })
}
