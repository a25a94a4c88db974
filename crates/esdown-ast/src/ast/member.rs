//! Members shared between class bodies and object literals.

use crate::ast::expression::Expression;
use crate::ast::statement::Block;
use crate::span::{Span, Spanned};
use crate::string_interner::StringId;

#[derive(Debug, Clone)]
pub enum PropertyKey<'arena> {
    Identifier(Spanned<StringId>),
    String(Spanned<StringId>),
    Number(Spanned<f64>),
    /// `[expr]` — evaluated in the enclosing scope when the literal is built.
    Computed(&'arena Expression<'arena>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    Get,
    Set,
}

#[derive(Debug, Clone)]
pub struct MethodDefinition<'arena> {
    pub is_static: bool,
    pub key: PropertyKey<'arena>,
    pub params: &'arena [Spanned<StringId>],
    pub body: Block<'arena>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ConstructorDefinition<'arena> {
    pub params: &'arena [Spanned<StringId>],
    pub body: Block<'arena>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct AccessorDefinition<'arena> {
    pub is_static: bool,
    pub kind: AccessorKind,
    pub key: PropertyKey<'arena>,
    /// Empty for getters, the single value parameter for setters.
    pub params: &'arena [Spanned<StringId>],
    pub body: Block<'arena>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ClassMember<'arena> {
    Constructor(ConstructorDefinition<'arena>),
    Method(MethodDefinition<'arena>),
    Accessor(AccessorDefinition<'arena>),
}
