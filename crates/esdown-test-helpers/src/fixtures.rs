//! Ergonomic tree builders for tests.

use std::sync::Arc;

use bumpalo::Bump;

use esdown_ast::ast::expression::{
    ArrowBody, ArrowFunction, AssignmentOp, BinaryOp, ClassExpression, Expression,
    ExpressionKind, Fixity, ObjectProperty, UpdateOp,
};
use esdown_ast::ast::member::{
    AccessorDefinition, AccessorKind, ClassMember, ConstructorDefinition, MethodDefinition,
    PropertyKey,
};
use esdown_ast::ast::statement::{Block, ClassDeclaration, ReturnStatement, Statement};
use esdown_ast::ast::Program;
use esdown_ast::factory;
use esdown_ast::span::{Span, Spanned};
use esdown_ast::string_interner::{StringId, StringInterner};

/// Builds fixture trees against one arena and interner.
pub struct TreeBuilder<'arena> {
    pub arena: &'arena Bump,
    pub interner: Arc<StringInterner>,
}

impl<'arena> TreeBuilder<'arena> {
    pub fn new(arena: &'arena Bump, interner: Arc<StringInterner>) -> Self {
        Self { arena, interner }
    }

    pub fn id(&self, name: &str) -> StringId {
        self.interner.intern(name)
    }

    pub fn spanned(&self, name: &str) -> Spanned<StringId> {
        Spanned::new(self.id(name), Span::dummy())
    }

    // ---- expressions -----------------------------------------------------

    pub fn ident(&self, name: &str) -> Expression<'arena> {
        factory::identifier(self.id(name), Span::dummy())
    }

    pub fn num(&self, value: f64) -> Expression<'arena> {
        factory::number_literal(value, Span::dummy())
    }

    pub fn str_lit(&self, value: &str) -> Expression<'arena> {
        factory::string_literal(self.id(value), Span::dummy())
    }

    pub fn this(&self) -> Expression<'arena> {
        factory::this_expression(Span::dummy())
    }

    pub fn super_kw(&self) -> Expression<'arena> {
        Expression {
            kind: ExpressionKind::SuperKeyword,
            span: Span::dummy(),
        }
    }

    pub fn member(&self, object: Expression<'arena>, name: &str) -> Expression<'arena> {
        factory::member(self.arena, object, self.spanned(name), Span::dummy())
    }

    pub fn index(
        &self,
        object: Expression<'arena>,
        key: Expression<'arena>,
    ) -> Expression<'arena> {
        factory::index(self.arena, object, key, Span::dummy())
    }

    /// `super.name`
    pub fn super_member(&self, name: &str) -> Expression<'arena> {
        self.member(self.super_kw(), name)
    }

    /// `super[key]`
    pub fn super_index(&self, key: Expression<'arena>) -> Expression<'arena> {
        self.index(self.super_kw(), key)
    }

    pub fn call(
        &self,
        callee: Expression<'arena>,
        args: Vec<Expression<'arena>>,
    ) -> Expression<'arena> {
        factory::call(self.arena, callee, args, Span::dummy())
    }

    /// `super(args...)`
    pub fn super_call(&self, args: Vec<Expression<'arena>>) -> Expression<'arena> {
        self.call(self.super_kw(), args)
    }

    pub fn assign(
        &self,
        target: Expression<'arena>,
        value: Expression<'arena>,
    ) -> Expression<'arena> {
        factory::assignment(self.arena, target, AssignmentOp::Assign, value, Span::dummy())
    }

    pub fn compound_assign(
        &self,
        target: Expression<'arena>,
        op: AssignmentOp,
        value: Expression<'arena>,
    ) -> Expression<'arena> {
        factory::assignment(self.arena, target, op, value, Span::dummy())
    }

    pub fn update(
        &self,
        op: UpdateOp,
        fixity: Fixity,
        operand: Expression<'arena>,
    ) -> Expression<'arena> {
        Expression {
            kind: ExpressionKind::Update(op, fixity, self.arena.alloc(operand)),
            span: Span::dummy(),
        }
    }

    pub fn binary(
        &self,
        op: BinaryOp,
        left: Expression<'arena>,
        right: Expression<'arena>,
    ) -> Expression<'arena> {
        factory::binary(self.arena, op, left, right, Span::dummy())
    }

    pub fn unary_delete(&self, operand: Expression<'arena>) -> Expression<'arena> {
        Expression {
            kind: ExpressionKind::Unary(
                esdown_ast::ast::expression::UnaryOp::Delete,
                self.arena.alloc(operand),
            ),
            span: Span::dummy(),
        }
    }

    pub fn arrow_expr(&self, params: &[&str], body: Expression<'arena>) -> Expression<'arena> {
        let arrow = ArrowFunction {
            params: self.param_list(params),
            body: ArrowBody::Expression(self.arena.alloc(body)),
            span: Span::dummy(),
        };
        Expression {
            kind: ExpressionKind::Arrow(self.arena.alloc(arrow)),
            span: Span::dummy(),
        }
    }

    pub fn object(&self, properties: Vec<ObjectProperty<'arena>>) -> Expression<'arena> {
        Expression {
            kind: ExpressionKind::Object(self.arena.alloc_slice_clone(&properties)),
            span: Span::dummy(),
        }
    }

    pub fn class_expr(
        &self,
        name: Option<&str>,
        extends: Option<Expression<'arena>>,
        members: Vec<ClassMember<'arena>>,
    ) -> Expression<'arena> {
        let class = ClassExpression {
            name: name.map(|n| self.spanned(n)),
            extends: extends.map(|e| &*self.arena.alloc(e)),
            members: self.arena.alloc_slice_clone(&members),
            span: Span::dummy(),
        };
        Expression {
            kind: ExpressionKind::Class(self.arena.alloc(class)),
            span: Span::dummy(),
        }
    }

    // ---- statements ------------------------------------------------------

    pub fn expr_stmt(&self, expr: Expression<'arena>) -> Statement<'arena> {
        Statement::Expression(expr)
    }

    pub fn ret(&self, value: Expression<'arena>) -> Statement<'arena> {
        Statement::Return(ReturnStatement {
            value: Some(value),
            span: Span::dummy(),
        })
    }

    pub fn var_stmt(&self, name: &str, init: Expression<'arena>) -> Statement<'arena> {
        use esdown_ast::ast::statement::{VariableDeclaration, VariableDeclarator, VariableKind};
        let declarator = VariableDeclarator {
            name: self.spanned(name),
            init: Some(init),
        };
        Statement::Variable(VariableDeclaration {
            kind: VariableKind::Var,
            declarators: self.arena.alloc_slice_clone(&[declarator]),
            span: Span::dummy(),
        })
    }

    pub fn block(&self, statements: Vec<Statement<'arena>>) -> Block<'arena> {
        Block {
            statements: self.arena.alloc_slice_clone(&statements),
            span: Span::dummy(),
        }
    }

    // ---- members ---------------------------------------------------------

    fn param_list(&self, names: &[&str]) -> &'arena [Spanned<StringId>] {
        let params: Vec<_> = names.iter().map(|name| self.spanned(name)).collect();
        self.arena.alloc_slice_clone(&params)
    }

    pub fn method(
        &self,
        name: &str,
        params: &[&str],
        body: Vec<Statement<'arena>>,
    ) -> MethodDefinition<'arena> {
        MethodDefinition {
            is_static: false,
            key: PropertyKey::Identifier(self.spanned(name)),
            params: self.param_list(params),
            body: self.block(body),
            span: Span::dummy(),
        }
    }

    pub fn static_method(
        &self,
        name: &str,
        params: &[&str],
        body: Vec<Statement<'arena>>,
    ) -> MethodDefinition<'arena> {
        MethodDefinition {
            is_static: true,
            ..self.method(name, params, body)
        }
    }

    pub fn computed_method(
        &self,
        key: Expression<'arena>,
        body: Vec<Statement<'arena>>,
    ) -> MethodDefinition<'arena> {
        MethodDefinition {
            is_static: false,
            key: PropertyKey::Computed(self.arena.alloc(key)),
            params: &[],
            body: self.block(body),
            span: Span::dummy(),
        }
    }

    pub fn getter(&self, name: &str, body: Vec<Statement<'arena>>) -> AccessorDefinition<'arena> {
        AccessorDefinition {
            is_static: false,
            kind: AccessorKind::Get,
            key: PropertyKey::Identifier(self.spanned(name)),
            params: &[],
            body: self.block(body),
            span: Span::dummy(),
        }
    }

    pub fn setter(
        &self,
        name: &str,
        param: &str,
        body: Vec<Statement<'arena>>,
    ) -> AccessorDefinition<'arena> {
        AccessorDefinition {
            is_static: false,
            kind: AccessorKind::Set,
            key: PropertyKey::Identifier(self.spanned(name)),
            params: self.param_list(&[param]),
            body: self.block(body),
            span: Span::dummy(),
        }
    }

    pub fn constructor(
        &self,
        params: &[&str],
        body: Vec<Statement<'arena>>,
    ) -> ConstructorDefinition<'arena> {
        ConstructorDefinition {
            params: self.param_list(params),
            body: self.block(body),
            span: Span::dummy(),
        }
    }

    pub fn class_decl(
        &self,
        name: &str,
        extends: Option<Expression<'arena>>,
        members: Vec<ClassMember<'arena>>,
    ) -> Statement<'arena> {
        Statement::Class(ClassDeclaration {
            name: self.spanned(name),
            extends: extends.map(|e| &*self.arena.alloc(e)),
            members: self.arena.alloc_slice_clone(&members),
            span: Span::dummy(),
        })
    }

    pub fn object_method(
        &self,
        name: &str,
        params: &[&str],
        body: Vec<Statement<'arena>>,
    ) -> ObjectProperty<'arena> {
        ObjectProperty::Method(self.method(name, params, body))
    }

    pub fn prop(&self, key: &str, value: Expression<'arena>) -> ObjectProperty<'arena> {
        ObjectProperty::Property {
            key: PropertyKey::Identifier(self.spanned(key)),
            value,
            span: Span::dummy(),
        }
    }

    pub fn computed_prop(
        &self,
        key: Expression<'arena>,
        value: Expression<'arena>,
    ) -> ObjectProperty<'arena> {
        ObjectProperty::Property {
            key: PropertyKey::Computed(self.arena.alloc(key)),
            value,
            span: Span::dummy(),
        }
    }

    pub fn program(&self, statements: Vec<Statement<'arena>>) -> Program<'arena> {
        Program::new(statements, Span::dummy())
    }
}
