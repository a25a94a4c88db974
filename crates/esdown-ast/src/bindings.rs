//! Collection of every identifier bound anywhere in a program.
//!
//! The unique identifier generator seeds its blacklist from this walk so
//! synthesized names can never shadow user code. The walk must therefore
//! visit every binding position: variable declarators, function and class
//! names, and parameter lists, at any nesting depth.

use rustc_hash::FxHashSet;

use crate::ast::expression::{ArrowBody, Expression, ExpressionKind, ObjectProperty};
use crate::ast::member::{ClassMember, PropertyKey};
use crate::ast::statement::{Block, Statement};
use crate::ast::Program;
use crate::span::Spanned;
use crate::string_interner::StringId;

pub fn collect_binding_identifiers(program: &Program<'_>, names: &mut FxHashSet<StringId>) {
    for statement in &program.statements {
        collect_statement(statement, names);
    }
}

fn collect_params(params: &[Spanned<StringId>], names: &mut FxHashSet<StringId>) {
    for param in params {
        names.insert(param.node);
    }
}

fn collect_block(block: &Block<'_>, names: &mut FxHashSet<StringId>) {
    for statement in block.statements {
        collect_statement(statement, names);
    }
}

fn collect_statement(statement: &Statement<'_>, names: &mut FxHashSet<StringId>) {
    match statement {
        Statement::Expression(expr) | Statement::Throw(expr) => collect_expression(expr, names),
        Statement::Variable(decl) => {
            for declarator in decl.declarators {
                names.insert(declarator.name.node);
                if let Some(init) = &declarator.init {
                    collect_expression(init, names);
                }
            }
        }
        Statement::Function(func) => {
            names.insert(func.name.node);
            collect_params(func.params, names);
            collect_block(&func.body, names);
        }
        Statement::Class(class) => {
            names.insert(class.name.node);
            if let Some(extends) = class.extends {
                collect_expression(extends, names);
            }
            collect_members(class.members, names);
        }
        Statement::Return(ret) => {
            if let Some(value) = &ret.value {
                collect_expression(value, names);
            }
        }
        Statement::If(if_stmt) => {
            collect_expression(&if_stmt.condition, names);
            collect_block(&if_stmt.then_block, names);
            if let Some(else_block) = &if_stmt.else_block {
                collect_block(else_block, names);
            }
        }
        Statement::While(while_stmt) => {
            collect_expression(&while_stmt.condition, names);
            collect_block(&while_stmt.body, names);
        }
        Statement::For(for_stmt) => {
            if let Some(init) = for_stmt.init {
                collect_statement(init, names);
            }
            if let Some(test) = &for_stmt.test {
                collect_expression(test, names);
            }
            if let Some(update) = &for_stmt.update {
                collect_expression(update, names);
            }
            collect_block(&for_stmt.body, names);
        }
        Statement::Block(block) => collect_block(block, names),
    }
}

fn collect_members(members: &[ClassMember<'_>], names: &mut FxHashSet<StringId>) {
    for member in members {
        match member {
            ClassMember::Constructor(ctor) => {
                collect_params(ctor.params, names);
                collect_block(&ctor.body, names);
            }
            ClassMember::Method(method) => {
                collect_key(&method.key, names);
                collect_params(method.params, names);
                collect_block(&method.body, names);
            }
            ClassMember::Accessor(accessor) => {
                collect_key(&accessor.key, names);
                collect_params(accessor.params, names);
                collect_block(&accessor.body, names);
            }
        }
    }
}

fn collect_key(key: &PropertyKey<'_>, names: &mut FxHashSet<StringId>) {
    if let PropertyKey::Computed(expr) = key {
        collect_expression(expr, names);
    }
}

fn collect_expression(expr: &Expression<'_>, names: &mut FxHashSet<StringId>) {
    match &expr.kind {
        ExpressionKind::Literal(_)
        | ExpressionKind::Identifier(_)
        | ExpressionKind::ThisKeyword
        | ExpressionKind::SuperKeyword => {}
        ExpressionKind::Array(elements) | ExpressionKind::Comma(elements) => {
            for element in *elements {
                collect_expression(element, names);
            }
        }
        ExpressionKind::Object(properties) => {
            for property in *properties {
                match property {
                    ObjectProperty::Property { key, value, .. } => {
                        collect_key(key, names);
                        collect_expression(value, names);
                    }
                    ObjectProperty::Method(method) => {
                        collect_key(&method.key, names);
                        collect_params(method.params, names);
                        collect_block(&method.body, names);
                    }
                    ObjectProperty::Accessor(accessor) => {
                        collect_key(&accessor.key, names);
                        collect_params(accessor.params, names);
                        collect_block(&accessor.body, names);
                    }
                    ObjectProperty::Shorthand(_) => {}
                }
            }
        }
        ExpressionKind::Function(func) => {
            if let Some(name) = func.name {
                names.insert(name.node);
            }
            collect_params(func.params, names);
            collect_block(&func.body, names);
        }
        ExpressionKind::Arrow(arrow) => {
            collect_params(arrow.params, names);
            match &arrow.body {
                ArrowBody::Expression(body) => collect_expression(body, names),
                ArrowBody::Block(block) => collect_block(block, names),
            }
        }
        ExpressionKind::Class(class) => {
            if let Some(name) = class.name {
                names.insert(name.node);
            }
            if let Some(extends) = class.extends {
                collect_expression(extends, names);
            }
            collect_members(class.members, names);
        }
        ExpressionKind::Member(object, _) => collect_expression(object, names),
        ExpressionKind::Index(object, key) => {
            collect_expression(object, names);
            collect_expression(key, names);
        }
        ExpressionKind::Call(callee, args) | ExpressionKind::New(callee, args) => {
            collect_expression(callee, names);
            for arg in *args {
                collect_expression(arg, names);
            }
        }
        ExpressionKind::Binary(_, left, right) => {
            collect_expression(left, names);
            collect_expression(right, names);
        }
        ExpressionKind::Unary(_, operand)
        | ExpressionKind::Update(_, _, operand)
        | ExpressionKind::Parenthesized(operand) => collect_expression(operand, names),
        ExpressionKind::Assignment(target, _, value) => {
            collect_expression(target, names);
            collect_expression(value, names);
        }
        ExpressionKind::Conditional(condition, when_true, when_false) => {
            collect_expression(condition, names);
            collect_expression(when_true, names);
            collect_expression(when_false, names);
        }
    }
}
