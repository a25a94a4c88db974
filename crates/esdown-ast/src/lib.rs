//! Shared tree representation for the esdown lowering passes.
//!
//! The AST is arena-allocated: nodes reference their children through
//! `&'arena` pointers and `&'arena [..]` slices owned by a `bumpalo::Bump`.
//! Passes transform trees in place by cloning a child, rewriting the clone
//! and re-allocating it into the arena only when something actually changed,
//! so untouched subtrees keep their original allocations.

pub mod ast;
pub mod bindings;
pub mod factory;
pub mod span;
pub mod string_interner;
