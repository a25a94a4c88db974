//! Structure walk of the super-lowering pass.
//!
//! Drives the traversal over statements, class bodies and object literals,
//! opening a context frame per class/object and a member marker per member
//! body before handing the body to the expression walk. On the way out of an
//! object literal whose members referenced `super`, the produced literal is
//! wrapped as `(<temp> = <literal>)` so the temp referenced inside the
//! rewritten bodies denotes the literal's own value at runtime.

use esdown_ast::ast::expression::{AssignmentOp, Expression, ExpressionKind, ObjectProperty};
use esdown_ast::ast::member::{ClassMember, PropertyKey};
use esdown_ast::ast::statement::{Block, ClassDeclaration, Statement};
use esdown_ast::factory;
use esdown_ast::span::{Span, Spanned};
use esdown_ast::string_interner::StringId;

use crate::lowering::context::ContextFrame;
use crate::lowering::SuperLowering;

impl<'arena> SuperLowering<'arena, '_> {
    pub(crate) fn lower_statement(&mut self, statement: &mut Statement<'arena>) -> bool {
        match statement {
            Statement::Expression(expr) | Statement::Throw(expr) => self.lower_expression(expr),
            Statement::Variable(decl) => {
                let mut declarators: Vec<_> = decl.declarators.to_vec();
                let mut changed = false;
                for declarator in &mut declarators {
                    if let Some(init) = &mut declarator.init {
                        changed |= self.lower_expression(init);
                    }
                }
                if changed {
                    decl.declarators = self.arena.alloc_slice_clone(&declarators);
                }
                changed
            }
            Statement::Function(func) => self.lower_function_body(&mut func.body),
            Statement::Class(class) => self.lower_class_declaration(class),
            Statement::Return(ret) => match &mut ret.value {
                Some(value) => self.lower_expression(value),
                None => false,
            },
            Statement::If(if_stmt) => {
                let mut changed = self.lower_expression(&mut if_stmt.condition);
                changed |= self.lower_block(&mut if_stmt.then_block);
                if let Some(else_block) = &mut if_stmt.else_block {
                    changed |= self.lower_block(else_block);
                }
                changed
            }
            Statement::While(while_stmt) => {
                let mut changed = self.lower_expression(&mut while_stmt.condition);
                changed |= self.lower_block(&mut while_stmt.body);
                changed
            }
            Statement::For(for_stmt) => {
                let mut changed = false;
                if let Some(init) = for_stmt.init {
                    let mut new_init = (*init).clone();
                    if self.lower_statement(&mut new_init) {
                        for_stmt.init = Some(self.arena.alloc(new_init));
                        changed = true;
                    }
                }
                if let Some(test) = &mut for_stmt.test {
                    changed |= self.lower_expression(test);
                }
                if let Some(update) = &mut for_stmt.update {
                    changed |= self.lower_expression(update);
                }
                changed |= self.lower_block(&mut for_stmt.body);
                changed
            }
            Statement::Block(block) => self.lower_block(block),
        }
    }

    pub(crate) fn lower_block(&mut self, block: &mut Block<'arena>) -> bool {
        let mut statements: Vec<_> = block.statements.to_vec();
        let mut changed = false;
        for statement in &mut statements {
            changed |= self.lower_statement(statement);
        }
        if changed {
            block.statements = self.arena.alloc_slice_clone(&statements);
        }
        changed
    }

    /// Function bodies open a temp-var scope; names allocated while the body
    /// is transformed are declared in a `var` statement prepended on exit.
    pub(crate) fn lower_function_body(&mut self, block: &mut Block<'arena>) -> bool {
        self.scopes.push();
        let mut changed = self.lower_block(block);
        let temps = self.scopes.pop();
        if !temps.is_empty() {
            let mut statements = Vec::with_capacity(block.statements.len() + 1);
            statements.push(factory::var_declaration(self.arena, &temps, Span::dummy()));
            statements.extend(block.statements.iter().cloned());
            block.statements = self.arena.alloc_slice_clone(&statements);
            changed = true;
        }
        changed
    }

    fn push_class_context(&mut self, name: Spanned<StringId>) {
        let ctor_ref = factory::identifier(name.node, name.span);
        let proto_ref = factory::member(
            self.arena,
            factory::identifier(name.node, name.span),
            Spanned::new(self.names.prototype, name.span),
            name.span,
        );
        self.stack.push_context(ContextFrame::for_class(ctor_ref, proto_ref));
    }

    fn lower_class_declaration(&mut self, class: &mut ClassDeclaration<'arena>) -> bool {
        let mut changed = false;
        // The extends clause evaluates in the enclosing scope, before the
        // class context exists.
        if let Some(extends) = class.extends {
            let mut new_extends = (*extends).clone();
            if self.lower_expression(&mut new_extends) {
                class.extends = Some(self.arena.alloc(new_extends));
                changed = true;
            }
        }
        self.push_class_context(class.name);
        if let Some(members) = self.lower_member_list(class.members) {
            class.members = members;
            changed = true;
        }
        self.stack.pop_context();
        changed
    }

    pub(crate) fn lower_class_expression(&mut self, expr: &mut Expression<'arena>) -> bool {
        let class_ref = match &expr.kind {
            ExpressionKind::Class(class) => *class,
            _ => unreachable!("lower_class_expression called on a non-class node"),
        };
        let mut class = (*class_ref).clone();
        let mut changed = false;

        // An anonymous class gets a synthesized name so its members have a
        // stable binding to hang prototype lookups on; a class expression's
        // name is only bound inside the class body, so no declaration is
        // needed.
        let name = match class.name {
            Some(name) => name,
            None => {
                let name = Spanned::new(self.ids.next(self.interner), class.span);
                class.name = Some(name);
                changed = true;
                name
            }
        };

        if let Some(extends) = class.extends {
            let mut new_extends = (*extends).clone();
            if self.lower_expression(&mut new_extends) {
                class.extends = Some(self.arena.alloc(new_extends));
                changed = true;
            }
        }
        self.push_class_context(name);
        if let Some(members) = self.lower_member_list(class.members) {
            class.members = members;
            changed = true;
        }
        self.stack.pop_context();

        if changed {
            expr.kind = ExpressionKind::Class(self.arena.alloc(class));
        }
        changed
    }

    fn lower_member_list(
        &mut self,
        members: &'arena [ClassMember<'arena>],
    ) -> Option<&'arena [ClassMember<'arena>]> {
        let mut list: Vec<_> = members.to_vec();
        let mut changed = false;
        for member in &mut list {
            changed |= self.lower_class_member(member);
        }
        if changed {
            Some(self.arena.alloc_slice_clone(&list))
        } else {
            None
        }
    }

    fn lower_class_member(&mut self, member: &mut ClassMember<'arena>) -> bool {
        match member {
            ClassMember::Constructor(ctor) => {
                self.stack.push_member(false);
                let changed = self.lower_function_body(&mut ctor.body);
                self.stack.pop_member();
                changed
            }
            ClassMember::Method(method) => {
                let mut changed = self.lower_property_key(&mut method.key);
                self.stack.push_member(method.is_static);
                changed |= self.lower_function_body(&mut method.body);
                self.stack.pop_member();
                changed
            }
            ClassMember::Accessor(accessor) => {
                let mut changed = self.lower_property_key(&mut accessor.key);
                self.stack.push_member(accessor.is_static);
                changed |= self.lower_function_body(&mut accessor.body);
                self.stack.pop_member();
                changed
            }
        }
    }

    /// Computed keys evaluate in the enclosing member's scope, so they are
    /// transformed before the member marker is pushed.
    fn lower_property_key(&mut self, key: &mut PropertyKey<'arena>) -> bool {
        if let PropertyKey::Computed(expr) = key {
            let mut new_key = (**expr).clone();
            if self.lower_expression(&mut new_key) {
                *key = PropertyKey::Computed(self.arena.alloc(new_key));
                return true;
            }
        }
        false
    }

    pub(crate) fn lower_object_literal(&mut self, expr: &mut Expression<'arena>) -> bool {
        let properties = match &expr.kind {
            ExpressionKind::Object(properties) => *properties,
            _ => unreachable!("lower_object_literal called on a non-object node"),
        };

        self.stack
            .push_context(ContextFrame::for_object_literal(self.scopes.innermost()));
        let mut list: Vec<_> = properties.to_vec();
        let mut changed = false;
        for property in &mut list {
            changed |= self.lower_object_property(property);
        }
        let frame = self.stack.pop_context();
        debug_assert!(
            !frame.has_ctor_ref,
            "object literal members cannot be static"
        );

        if changed {
            expr.kind = ExpressionKind::Object(self.arena.alloc_slice_clone(&list));
        }

        if frame.has_proto_ref {
            let Some(identity) = frame.proto_ref else {
                unreachable!("has_proto_ref implies a prototype reference was created")
            };
            let span = expr.span;
            let literal = expr.clone();
            *expr = factory::parenthesized(
                self.arena,
                factory::assignment(self.arena, identity, AssignmentOp::Assign, literal, span),
                span,
            );
            changed = true;
        }
        changed
    }

    fn lower_object_property(&mut self, property: &mut ObjectProperty<'arena>) -> bool {
        match property {
            ObjectProperty::Property { key, value, .. } => {
                // Plain properties carry no member marker: both the key and
                // the value evaluate in the enclosing member's scope.
                let mut changed = self.lower_property_key(key);
                changed |= self.lower_expression(value);
                changed
            }
            ObjectProperty::Method(method) => {
                let mut changed = self.lower_property_key(&mut method.key);
                self.stack.push_member(method.is_static);
                changed |= self.lower_function_body(&mut method.body);
                self.stack.pop_member();
                changed
            }
            ObjectProperty::Accessor(accessor) => {
                let mut changed = self.lower_property_key(&mut accessor.key);
                self.stack.push_member(accessor.is_static);
                changed |= self.lower_function_body(&mut accessor.body);
                self.stack.pop_member();
                changed
            }
            ObjectProperty::Shorthand(_) => false,
        }
    }
}
