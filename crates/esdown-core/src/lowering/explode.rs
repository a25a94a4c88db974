//! Read-modify-write decomposition for `super` members.
//!
//! `super.x += e` and `super.x++` must read the member once, combine, and
//! write once, with operands evaluated in source order. Rewriting both sides
//! of the compound form directly would run the member-resolution machinery
//! twice and could re-run a side-effecting computed key. Instead the node is
//! decomposed into a comma sequence of plain reads and writes over fresh
//! temporaries; the caller re-runs the ordinary single-evaluation rules over
//! the result. The decomposition never descends into nested function, arrow
//! or class boundaries: hoisted operands are opaque here and are re-entered
//! by the normal traversal on the second pass.

use esdown_ast::ast::expression::{
    AssignmentOp, BinaryOp, Expression, ExpressionKind, Fixity, UpdateOp,
};
use esdown_ast::factory;
use esdown_ast::span::Span;

use crate::lowering::SuperLowering;

/// Expressions that can be evaluated twice with no observable difference;
/// these skip temp hoisting.
fn is_simple_expression(expr: &Expression<'_>) -> bool {
    match &expr.kind {
        ExpressionKind::Literal(_)
        | ExpressionKind::Identifier(_)
        | ExpressionKind::ThisKeyword => true,
        ExpressionKind::Member(object, _) => is_simple_expression(object),
        ExpressionKind::Index(object, key) => {
            is_simple_expression(object) && is_simple_expression(key)
        }
        _ => false,
    }
}

#[derive(Clone, Copy)]
enum Modify<'arena> {
    /// `target op= value`
    Combine(BinaryOp, &'arena Expression<'arena>),
    /// `++target` / `target--`
    Step(UpdateOp, Fixity),
}

impl<'arena> SuperLowering<'arena, '_> {
    /// Decompose a compound assignment or increment/decrement whose target
    /// is a `super` member into an equivalent comma sequence containing only
    /// plain reads and writes.
    pub(crate) fn explode_super_expression(
        &mut self,
        expr: &Expression<'arena>,
    ) -> ExpressionKind<'arena> {
        match &expr.kind {
            ExpressionKind::Assignment(target, op, value) => {
                let Some(binary) = op.binary_op() else {
                    unreachable!("plain assignment is rewritten without exploding")
                };
                self.explode_parts(*target, Modify::Combine(binary, *value), expr.span)
            }
            ExpressionKind::Update(op, fixity, operand) => {
                self.explode_parts(*operand, Modify::Step(*op, *fixity), expr.span)
            }
            _ => unreachable!("only compound assignments and increments are exploded"),
        }
    }

    fn explode_parts(
        &mut self,
        target: &'arena Expression<'arena>,
        modify: Modify<'arena>,
        span: Span,
    ) -> ExpressionKind<'arena> {
        let mut sequence: Vec<Expression<'arena>> = Vec::new();

        // Hoist a side-effecting computed key so it is evaluated exactly once;
        // the read and the write below then share the temp.
        let member = match &target.kind {
            ExpressionKind::Member(..) => target.clone(),
            ExpressionKind::Index(object, key) => {
                if is_simple_expression(key) {
                    target.clone()
                } else {
                    let key_temp = self.fresh_temp();
                    sequence.push(factory::assignment(
                        self.arena,
                        factory::identifier(key_temp, key.span),
                        AssignmentOp::Assign,
                        (**key).clone(),
                        key.span,
                    ));
                    Expression {
                        kind: ExpressionKind::Index(
                            *object,
                            self.arena.alloc(factory::identifier(key_temp, key.span)),
                        ),
                        span: target.span,
                    }
                }
            }
            _ => unreachable!("exploded target must be a super member reference"),
        };

        // Read the current value exactly once.
        let read_temp = self.fresh_temp();
        sequence.push(factory::assignment(
            self.arena,
            factory::identifier(read_temp, span),
            AssignmentOp::Assign,
            member.clone(),
            span,
        ));

        let new_value = match modify {
            Modify::Combine(op, value) => {
                let operand = if is_simple_expression(value) {
                    (*value).clone()
                } else {
                    let value_temp = self.fresh_temp();
                    sequence.push(factory::assignment(
                        self.arena,
                        factory::identifier(value_temp, value.span),
                        AssignmentOp::Assign,
                        (*value).clone(),
                        value.span,
                    ));
                    factory::identifier(value_temp, value.span)
                };
                factory::binary(
                    self.arena,
                    op,
                    factory::identifier(read_temp, span),
                    operand,
                    span,
                )
            }
            Modify::Step(op, _) => {
                let binary = match op {
                    UpdateOp::Increment => BinaryOp::Add,
                    UpdateOp::Decrement => BinaryOp::Subtract,
                };
                factory::binary(
                    self.arena,
                    binary,
                    factory::identifier(read_temp, span),
                    factory::number_literal(1.0, span),
                    span,
                )
            }
        };

        // Write exactly once; for prefix and compound forms the write is the
        // value of the whole sequence.
        sequence.push(factory::assignment(
            self.arena,
            member,
            AssignmentOp::Assign,
            new_value,
            span,
        ));

        // A postfix step yields the value read before the write.
        if let Modify::Step(_, Fixity::Postfix) = modify {
            sequence.push(factory::identifier(read_temp, span));
        }

        ExpressionKind::Comma(self.arena.alloc_slice_clone(&sequence))
    }
}
