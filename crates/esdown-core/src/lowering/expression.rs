//! Expression walk of the super-lowering pass.
//!
//! Rewrites every `super`-involving form into a `$esdownRuntime` helper
//! call, consulting the context stack for the home object of the member
//! being transformed. Everything else recurses generically, cloning a child
//! and re-allocating it only when something inside changed.

use esdown_ast::ast::expression::{
    ArrowBody, AssignmentOp, Expression, ExpressionKind, UnaryOp,
};
use esdown_ast::factory;
use esdown_ast::span::{Span, Spanned};
use esdown_ast::string_interner::StringId;

use crate::lowering::SuperLowering;

/// The member name of a `super` access: a fixed name for dotted access, an
/// already-lowered key expression for computed access.
pub(crate) enum SuperKey<'arena> {
    Named(Spanned<StringId>),
    Computed(Expression<'arena>),
}

pub(crate) fn is_super(expr: &Expression<'_>) -> bool {
    matches!(expr.kind, ExpressionKind::SuperKeyword)
}

/// `super.name` or `super[expr]`.
pub(crate) fn is_super_member(expr: &Expression<'_>) -> bool {
    match &expr.kind {
        ExpressionKind::Member(object, _) => is_super(object),
        ExpressionKind::Index(object, _) => is_super(object),
        _ => false,
    }
}

impl<'arena> SuperLowering<'arena, '_> {
    pub(crate) fn lower_expression(&mut self, expr: &mut Expression<'arena>) -> bool {
        match &expr.kind {
            ExpressionKind::Literal(_)
            | ExpressionKind::Identifier(_)
            | ExpressionKind::ThisKeyword => false,

            ExpressionKind::SuperKeyword => {
                self.handler.error(
                    expr.span,
                    "'super' is only valid in member accesses and constructor calls",
                );
                false
            }

            ExpressionKind::Member(object, name) if is_super(object) => {
                let name = *name;
                let span = expr.span;
                match self.super_member_get(SuperKey::Named(name), span) {
                    Some(rewritten) => {
                        *expr = rewritten;
                        true
                    }
                    None => false,
                }
            }

            ExpressionKind::Index(object, key) if is_super(object) => {
                let key: &'arena Expression<'arena> = *key;
                let span = expr.span;
                let mut key_expr = (*key).clone();
                self.lower_expression(&mut key_expr);
                match self.super_member_get(SuperKey::Computed(key_expr), span) {
                    Some(rewritten) => {
                        *expr = rewritten;
                        true
                    }
                    None => false,
                }
            }

            // super(...) — a constructor call against the ancestor class.
            ExpressionKind::Call(callee, args) if is_super(callee) => {
                let args: &'arena [Expression<'arena>] = *args;
                let span = expr.span;
                match self.super_constructor_call(args, span) {
                    Some(rewritten) => {
                        *expr = rewritten;
                        true
                    }
                    None => false,
                }
            }

            // super.m(...) — the member read is rewritten first, then invoked
            // with `this` as the explicit receiver.
            ExpressionKind::Call(callee, args) if is_super_member(callee) => {
                let callee: &'arena Expression<'arena> = *callee;
                let args: &'arena [Expression<'arena>] = *args;
                let span = expr.span;
                let key = match &callee.kind {
                    ExpressionKind::Member(_, name) => SuperKey::Named(*name),
                    ExpressionKind::Index(_, key) => {
                        let mut key_expr = (**key).clone();
                        self.lower_expression(&mut key_expr);
                        SuperKey::Computed(key_expr)
                    }
                    _ => unreachable!("guard checked for a super member"),
                };
                let Some(get_expr) = self.super_member_get(key, callee.span) else {
                    return false;
                };
                let mut call_args = Vec::with_capacity(args.len() + 1);
                call_args.push(factory::this_expression(span));
                for arg in args {
                    let mut lowered = arg.clone();
                    self.lower_expression(&mut lowered);
                    call_args.push(lowered);
                }
                *expr = factory::call(
                    self.arena,
                    factory::member(
                        self.arena,
                        get_expr,
                        Spanned::new(self.names.call, span),
                        span,
                    ),
                    call_args,
                    span,
                );
                true
            }

            ExpressionKind::Assignment(target, op, value) if is_super_member(target) => {
                let target: &'arena Expression<'arena> = *target;
                let op = *op;
                let value: &'arena Expression<'arena> = *value;
                let span = expr.span;
                if op == AssignmentOp::Assign {
                    let key = match &target.kind {
                        ExpressionKind::Member(_, name) => SuperKey::Named(*name),
                        ExpressionKind::Index(_, key) => {
                            let mut key_expr = (**key).clone();
                            self.lower_expression(&mut key_expr);
                            SuperKey::Computed(key_expr)
                        }
                        _ => unreachable!("guard checked for a super member"),
                    };
                    let mut new_value = (*value).clone();
                    self.lower_expression(&mut new_value);
                    match self.super_member_set(key, new_value, span) {
                        Some(rewritten) => {
                            *expr = rewritten;
                            true
                        }
                        None => false,
                    }
                } else {
                    // Compound assignment: decompose so the member is read
                    // once and written once, then re-run the plain rules.
                    self.explode_and_relower(expr)
                }
            }

            ExpressionKind::Update(_, _, operand) if is_super_member(operand) => {
                self.explode_and_relower(expr)
            }

            ExpressionKind::Unary(UnaryOp::Delete, operand) if is_super_member(operand) => {
                self.handler
                    .error(expr.span, "cannot delete a 'super' member reference");
                false
            }

            ExpressionKind::Object(_) => self.lower_object_literal(expr),
            ExpressionKind::Class(_) => self.lower_class_expression(expr),

            _ => self.lower_expression_children(expr),
        }
    }

    fn explode_and_relower(&mut self, expr: &mut Expression<'arena>) -> bool {
        let span = expr.span;
        let original = expr.clone();
        let exploded = self.explode_super_expression(&original);
        expr.kind = ExpressionKind::Parenthesized(self.arena.alloc(Expression {
            kind: exploded,
            span,
        }));
        self.lower_expression(expr);
        true
    }

    fn super_member_get(
        &mut self,
        key: SuperKey<'arena>,
        span: Span,
    ) -> Option<Expression<'arena>> {
        let home = self.home_reference(span)?;
        let name_expr = match key {
            SuperKey::Named(name) => factory::string_literal(name.node, name.span),
            SuperKey::Computed(expr) => expr,
        };
        self.rewrites += 1;
        Some(self.runtime_call(
            self.names.super_get,
            vec![factory::this_expression(span), home, name_expr],
            span,
        ))
    }

    fn super_member_set(
        &mut self,
        key: SuperKey<'arena>,
        value: Expression<'arena>,
        span: Span,
    ) -> Option<Expression<'arena>> {
        let home = self.home_reference(span)?;
        let name_expr = match key {
            SuperKey::Named(name) => factory::string_literal(name.node, name.span),
            SuperKey::Computed(expr) => expr,
        };
        self.rewrites += 1;
        Some(self.runtime_call(
            self.names.super_set,
            vec![factory::this_expression(span), home, name_expr, value],
            span,
        ))
    }

    fn super_constructor_call(
        &mut self,
        args: &'arena [Expression<'arena>],
        span: Span,
    ) -> Option<Expression<'arena>> {
        let ctor = self.constructor_reference(span)?;
        self.rewrites += 1;
        let bound = self.runtime_call(self.names.super_constructor, vec![ctor], span);
        let mut call_args = Vec::with_capacity(args.len() + 1);
        call_args.push(factory::this_expression(span));
        for arg in args {
            let mut lowered = arg.clone();
            self.lower_expression(&mut lowered);
            call_args.push(lowered);
        }
        Some(factory::call(
            self.arena,
            factory::member(self.arena, bound, Spanned::new(self.names.call, span), span),
            call_args,
            span,
        ))
    }

    /// `$esdownRuntime.<helper>(args...)`
    fn runtime_call(
        &self,
        helper: StringId,
        args: Vec<Expression<'arena>>,
        span: Span,
    ) -> Expression<'arena> {
        let callee = factory::member(
            self.arena,
            factory::identifier(self.names.namespace, span),
            Spanned::new(helper, span),
            span,
        );
        factory::call(self.arena, callee, args, span)
    }

    /// The expression denoting the object whose prototype chain this `super`
    /// access searches from: `<Class>.prototype` for instance members,
    /// `<Class>` for static members, a lazily minted identity temp for
    /// object literals. First use creates the reference; later uses share it.
    fn home_reference(&mut self, span: Span) -> Option<Expression<'arena>> {
        let Some((is_static, frame_index)) = self.stack.resolve() else {
            self.handler.error(
                span,
                "'super' is only allowed inside class or object literal members",
            );
            return None;
        };

        let missing = {
            let frame = self.stack.frame(frame_index);
            if is_static {
                frame.ctor_ref.is_none()
            } else {
                frame.proto_ref.is_none()
            }
        };
        if missing {
            let depth = self.stack.frame(frame_index).scope_depth;
            let name = self.fresh_temp_at(depth);
            let reference = factory::identifier(name, Span::dummy());
            let frame = self.stack.frame_mut(frame_index);
            if is_static {
                frame.ctor_ref = Some(reference);
            } else {
                frame.proto_ref = Some(reference);
            }
        }

        let frame = self.stack.frame_mut(frame_index);
        let slot = if is_static {
            frame.has_ctor_ref = true;
            &frame.ctor_ref
        } else {
            frame.has_proto_ref = true;
            &frame.proto_ref
        };
        match slot {
            Some(reference) => Some(reference.clone()),
            None => unreachable!("home reference was initialized above"),
        }
    }

    /// The static-side reference of the enclosing class, for `super(...)`.
    /// Object literals have no constructor side, so a call there is an
    /// unsupported construct, not a lookup miss.
    fn constructor_reference(&mut self, span: Span) -> Option<Expression<'arena>> {
        let Some((_, frame_index)) = self.stack.resolve() else {
            self.handler.error(
                span,
                "'super' is only allowed inside class or object literal members",
            );
            return None;
        };
        let frame = self.stack.frame_mut(frame_index);
        let existing = frame.ctor_ref.clone();
        match existing {
            Some(reference) => {
                frame.has_ctor_ref = true;
                Some(reference)
            }
            None => {
                self.handler
                    .error(span, "'super(...)' is only valid inside a class constructor");
                None
            }
        }
    }

    fn lower_expression_children(&mut self, expr: &mut Expression<'arena>) -> bool {
        match &expr.kind {
            ExpressionKind::Literal(_)
            | ExpressionKind::Identifier(_)
            | ExpressionKind::ThisKeyword
            | ExpressionKind::SuperKeyword => false,

            ExpressionKind::Object(_) | ExpressionKind::Class(_) => {
                unreachable!("object literals and classes are handled by the structure walk")
            }

            ExpressionKind::Array(elements) => {
                let elements: &'arena [Expression<'arena>] = *elements;
                let mut list: Vec<_> = elements.to_vec();
                let mut changed = false;
                for element in &mut list {
                    changed |= self.lower_expression(element);
                }
                if changed {
                    expr.kind = ExpressionKind::Array(self.arena.alloc_slice_clone(&list));
                }
                changed
            }

            ExpressionKind::Comma(elements) => {
                let elements: &'arena [Expression<'arena>] = *elements;
                let mut list: Vec<_> = elements.to_vec();
                let mut changed = false;
                for element in &mut list {
                    changed |= self.lower_expression(element);
                }
                if changed {
                    expr.kind = ExpressionKind::Comma(self.arena.alloc_slice_clone(&list));
                }
                changed
            }

            ExpressionKind::Function(func) => {
                let func = *func;
                let mut new_func = (*func).clone();
                let changed = self.lower_function_body(&mut new_func.body);
                if changed {
                    expr.kind = ExpressionKind::Function(self.arena.alloc(new_func));
                }
                changed
            }

            ExpressionKind::Arrow(arrow) => {
                let arrow = *arrow;
                let mut new_arrow = (*arrow).clone();
                let changed = match &mut new_arrow.body {
                    ArrowBody::Expression(body) => {
                        let mut new_body = (**body).clone();
                        if self.lower_expression(&mut new_body) {
                            *body = self.arena.alloc(new_body);
                            true
                        } else {
                            false
                        }
                    }
                    ArrowBody::Block(block) => self.lower_function_body(block),
                };
                if changed {
                    expr.kind = ExpressionKind::Arrow(self.arena.alloc(new_arrow));
                }
                changed
            }

            ExpressionKind::Member(object, name) => {
                let name = *name;
                let object: &'arena Expression<'arena> = *object;
                let mut new_object = (*object).clone();
                if self.lower_expression(&mut new_object) {
                    expr.kind = ExpressionKind::Member(self.arena.alloc(new_object), name);
                    true
                } else {
                    false
                }
            }

            ExpressionKind::Index(object, key) => {
                let object: &'arena Expression<'arena> = *object;
                let key: &'arena Expression<'arena> = *key;
                let mut new_object = (*object).clone();
                let mut new_key = (*key).clone();
                let object_changed = self.lower_expression(&mut new_object);
                let key_changed = self.lower_expression(&mut new_key);
                if object_changed || key_changed {
                    expr.kind = ExpressionKind::Index(
                        self.arena.alloc(new_object),
                        self.arena.alloc(new_key),
                    );
                }
                object_changed || key_changed
            }

            ExpressionKind::Call(callee, args) => {
                let callee: &'arena Expression<'arena> = *callee;
                let args: &'arena [Expression<'arena>] = *args;
                let mut new_callee = (*callee).clone();
                let callee_changed = self.lower_expression(&mut new_callee);
                let mut new_args: Vec<_> = args.to_vec();
                let mut args_changed = false;
                for arg in &mut new_args {
                    args_changed |= self.lower_expression(arg);
                }
                if callee_changed || args_changed {
                    expr.kind = ExpressionKind::Call(
                        self.arena.alloc(new_callee),
                        self.arena.alloc_slice_clone(&new_args),
                    );
                }
                callee_changed || args_changed
            }

            ExpressionKind::New(callee, args) => {
                let callee: &'arena Expression<'arena> = *callee;
                let args: &'arena [Expression<'arena>] = *args;
                let mut new_callee = (*callee).clone();
                let callee_changed = self.lower_expression(&mut new_callee);
                let mut new_args: Vec<_> = args.to_vec();
                let mut args_changed = false;
                for arg in &mut new_args {
                    args_changed |= self.lower_expression(arg);
                }
                if callee_changed || args_changed {
                    expr.kind = ExpressionKind::New(
                        self.arena.alloc(new_callee),
                        self.arena.alloc_slice_clone(&new_args),
                    );
                }
                callee_changed || args_changed
            }

            ExpressionKind::Binary(op, left, right) => {
                let op = *op;
                let left: &'arena Expression<'arena> = *left;
                let right: &'arena Expression<'arena> = *right;
                let mut new_left = (*left).clone();
                let mut new_right = (*right).clone();
                let left_changed = self.lower_expression(&mut new_left);
                let right_changed = self.lower_expression(&mut new_right);
                if left_changed || right_changed {
                    expr.kind = ExpressionKind::Binary(
                        op,
                        self.arena.alloc(new_left),
                        self.arena.alloc(new_right),
                    );
                }
                left_changed || right_changed
            }

            ExpressionKind::Unary(op, operand) => {
                let op = *op;
                let operand: &'arena Expression<'arena> = *operand;
                let mut new_operand = (*operand).clone();
                if self.lower_expression(&mut new_operand) {
                    expr.kind = ExpressionKind::Unary(op, self.arena.alloc(new_operand));
                    true
                } else {
                    false
                }
            }

            ExpressionKind::Update(op, fixity, operand) => {
                let op = *op;
                let fixity = *fixity;
                let operand: &'arena Expression<'arena> = *operand;
                let mut new_operand = (*operand).clone();
                if self.lower_expression(&mut new_operand) {
                    expr.kind =
                        ExpressionKind::Update(op, fixity, self.arena.alloc(new_operand));
                    true
                } else {
                    false
                }
            }

            ExpressionKind::Assignment(target, op, value) => {
                let op = *op;
                let target: &'arena Expression<'arena> = *target;
                let value: &'arena Expression<'arena> = *value;
                let mut new_target = (*target).clone();
                let mut new_value = (*value).clone();
                let target_changed = self.lower_expression(&mut new_target);
                let value_changed = self.lower_expression(&mut new_value);
                if target_changed || value_changed {
                    expr.kind = ExpressionKind::Assignment(
                        self.arena.alloc(new_target),
                        op,
                        self.arena.alloc(new_value),
                    );
                }
                target_changed || value_changed
            }

            ExpressionKind::Conditional(condition, when_true, when_false) => {
                let condition: &'arena Expression<'arena> = *condition;
                let when_true: &'arena Expression<'arena> = *when_true;
                let when_false: &'arena Expression<'arena> = *when_false;
                let mut new_condition = (*condition).clone();
                let mut new_true = (*when_true).clone();
                let mut new_false = (*when_false).clone();
                let mut changed = self.lower_expression(&mut new_condition);
                changed |= self.lower_expression(&mut new_true);
                changed |= self.lower_expression(&mut new_false);
                if changed {
                    expr.kind = ExpressionKind::Conditional(
                        self.arena.alloc(new_condition),
                        self.arena.alloc(new_true),
                        self.arena.alloc(new_false),
                    );
                }
                changed
            }

            ExpressionKind::Parenthesized(inner) => {
                let inner: &'arena Expression<'arena> = *inner;
                let mut new_inner = (*inner).clone();
                if self.lower_expression(&mut new_inner) {
                    expr.kind = ExpressionKind::Parenthesized(self.arena.alloc(new_inner));
                    true
                } else {
                    false
                }
            }
        }
    }
}
