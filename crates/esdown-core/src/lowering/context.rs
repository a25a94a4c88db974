//! Lexical context bookkeeping for the super-lowering walk.
//!
//! Each class body or object literal pushes a [`ContextFrame`]; each member
//! body pushes a `Member` marker directly on top of its frame. A `super`
//! reference resolves against the nearest `Member` marker from the top of
//! the stack and the frame immediately beneath it, so computed keys and
//! extends clauses (transformed before the marker is pushed) land on the
//! enclosing member's home object.

use esdown_ast::ast::expression::Expression;

/// Per-class/object-literal record of how to reference its instance-side and
/// static-side storage. Reference fields are written at most once and cloned
/// into every rewrite; the flags record whether a reference was ever
/// requested.
#[derive(Debug, Clone)]
pub(crate) struct ContextFrame<'arena> {
    pub proto_ref: Option<Expression<'arena>>,
    pub ctor_ref: Option<Expression<'arena>>,
    pub has_proto_ref: bool,
    pub has_ctor_ref: bool,
    /// Temp-var scope enclosing the literal; identity temps are declared here.
    pub scope_depth: usize,
}

impl<'arena> ContextFrame<'arena> {
    /// Classes know both references statically: the class name and
    /// `<name>.prototype`.
    pub fn for_class(ctor_ref: Expression<'arena>, proto_ref: Expression<'arena>) -> Self {
        Self {
            proto_ref: Some(proto_ref),
            ctor_ref: Some(ctor_ref),
            has_proto_ref: false,
            has_ctor_ref: false,
            scope_depth: 0,
        }
    }

    /// Object literals start with no references; one is minted on first use.
    pub fn for_object_literal(scope_depth: usize) -> Self {
        Self {
            proto_ref: None,
            ctor_ref: None,
            has_proto_ref: false,
            has_ctor_ref: false,
            scope_depth,
        }
    }
}

#[derive(Debug)]
pub(crate) enum StackEntry<'arena> {
    Context(ContextFrame<'arena>),
    Member { is_static: bool },
}

#[derive(Debug, Default)]
pub(crate) struct ContextStack<'arena> {
    entries: Vec<StackEntry<'arena>>,
}

impl<'arena> ContextStack<'arena> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push_context(&mut self, frame: ContextFrame<'arena>) {
        self.entries.push(StackEntry::Context(frame));
    }

    pub fn pop_context(&mut self) -> ContextFrame<'arena> {
        match self.entries.pop() {
            Some(StackEntry::Context(frame)) => frame,
            other => panic!("context stack corrupted: expected a context frame, found {other:?}"),
        }
    }

    pub fn push_member(&mut self, is_static: bool) {
        self.entries.push(StackEntry::Member { is_static });
    }

    pub fn pop_member(&mut self) {
        match self.entries.pop() {
            Some(StackEntry::Member { .. }) => {}
            other => panic!("context stack corrupted: expected a member marker, found {other:?}"),
        }
    }

    /// The access target for a `super` reference at the current depth:
    /// the nearest member marker's static flag and the index of the context
    /// frame beneath it. `None` when no member body encloses this position,
    /// which is a user error, not stack corruption.
    pub fn resolve(&self) -> Option<(bool, usize)> {
        let member_index = self
            .entries
            .iter()
            .rposition(|entry| matches!(entry, StackEntry::Member { .. }))?;
        let StackEntry::Member { is_static } = &self.entries[member_index] else {
            unreachable!()
        };
        match member_index.checked_sub(1).map(|i| &self.entries[i]) {
            Some(StackEntry::Context(_)) => Some((*is_static, member_index - 1)),
            _ => panic!("context stack corrupted: member marker without an enclosing context"),
        }
    }

    pub fn frame(&self, index: usize) -> &ContextFrame<'arena> {
        match &self.entries[index] {
            StackEntry::Context(frame) => frame,
            other => panic!("context stack corrupted: expected a context frame, found {other:?}"),
        }
    }

    pub fn frame_mut(&mut self, index: usize) -> &mut ContextFrame<'arena> {
        match &mut self.entries[index] {
            StackEntry::Context(frame) => frame,
            other => panic!("context stack corrupted: expected a context frame, found {other:?}"),
        }
    }
}
