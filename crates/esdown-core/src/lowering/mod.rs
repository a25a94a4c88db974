//! Dialect lowering passes.
//!
//! [`Lowerer`] drives [`LoweringPass`] objects over one compilation unit.
//! The only pass today is [`SuperLoweringPass`], which eliminates every
//! `super` reference: the structure walk (`structure.rs`) establishes where
//! each member's prototype/constructor object lives, and the expression walk
//! (`expression.rs`) rewrites each `super` form into a runtime helper call
//! using that information. Both halves share one worker with a single
//! context stack, temp-var scope stack and identifier generator.

mod context;
mod explode;
mod expression;
mod structure;
mod temp_vars;
mod unique_ids;

pub use unique_ids::UniqueIdentifierGenerator;

use std::sync::Arc;

use bumpalo::Bump;
use tracing::debug;

use esdown_ast::ast::Program;
use esdown_ast::factory;
use esdown_ast::span::Span;
use esdown_ast::string_interner::{StringId, StringInterner};

use crate::diagnostics::DiagnosticHandler;
use crate::errors::LoweringError;
use crate::lowering::context::ContextStack;
use crate::lowering::temp_vars::TempVarScopes;
use crate::runtime::RuntimeNames;

/// A whole-program tree rewrite. Passes mutate the program in place and
/// report whether anything changed.
pub trait LoweringPass<'arena> {
    fn name(&self) -> &'static str;

    fn run(
        &mut self,
        program: &mut Program<'arena>,
        arena: &'arena Bump,
    ) -> Result<bool, LoweringError>;
}

/// Runs the registered lowering passes over one compilation unit.
pub struct Lowerer {
    handler: Arc<dyn DiagnosticHandler>,
    interner: Arc<StringInterner>,
}

impl Lowerer {
    pub fn new(handler: Arc<dyn DiagnosticHandler>, interner: Arc<StringInterner>) -> Self {
        Self { handler, interner }
    }

    /// Lower `program` in place. Construct-level problems are reported
    /// through the diagnostic handler and processing continues over the rest
    /// of the unit; if any error diagnostics were emitted the result is
    /// `Err(DiagnosticsEmitted)` once the whole unit has been processed.
    pub fn lower<'arena>(
        &mut self,
        program: &mut Program<'arena>,
        arena: &'arena Bump,
    ) -> Result<bool, LoweringError> {
        let errors_before = self.handler.error_count();
        let mut passes: Vec<Box<dyn LoweringPass<'arena>>> = vec![Box::new(
            SuperLoweringPass::new(self.handler.clone(), self.interner.clone()),
        )];

        let mut changed = false;
        for pass in &mut passes {
            debug!("running lowering pass: {}", pass.name());
            changed |= pass.run(program, arena)?;
        }

        let emitted = self.handler.error_count() - errors_before;
        if emitted > 0 {
            return Err(LoweringError::DiagnosticsEmitted { count: emitted });
        }
        Ok(changed)
    }
}

/// Rewrites `super` member reads/writes, `super` member calls and
/// `super(...)` constructor calls into `$esdownRuntime` helper calls.
pub struct SuperLoweringPass {
    handler: Arc<dyn DiagnosticHandler>,
    interner: Arc<StringInterner>,
    names: RuntimeNames,
    ids: UniqueIdentifierGenerator,
}

impl SuperLoweringPass {
    pub fn new(handler: Arc<dyn DiagnosticHandler>, interner: Arc<StringInterner>) -> Self {
        let names = RuntimeNames::new(&interner);
        Self {
            handler,
            interner,
            names,
            ids: UniqueIdentifierGenerator::new(),
        }
    }
}

impl<'arena> LoweringPass<'arena> for SuperLoweringPass {
    fn name(&self) -> &'static str {
        "super-lowering"
    }

    fn run(
        &mut self,
        program: &mut Program<'arena>,
        arena: &'arena Bump,
    ) -> Result<bool, LoweringError> {
        self.ids.blacklist_program(program);

        let mut worker = SuperLowering {
            arena,
            interner: self.interner.as_ref(),
            handler: self.handler.as_ref(),
            names: &self.names,
            ids: &mut self.ids,
            stack: ContextStack::new(),
            scopes: TempVarScopes::new(),
            rewrites: 0,
        };
        let changed = worker.lower_program(program);
        debug!("super lowering rewrote {} reference(s)", worker.rewrites);
        Ok(changed)
    }
}

/// Shared state of the two cooperating transformer halves.
pub(crate) struct SuperLowering<'arena, 'p> {
    pub(crate) arena: &'arena Bump,
    pub(crate) interner: &'p StringInterner,
    pub(crate) handler: &'p dyn DiagnosticHandler,
    pub(crate) names: &'p RuntimeNames,
    pub(crate) ids: &'p mut UniqueIdentifierGenerator,
    pub(crate) stack: ContextStack<'arena>,
    pub(crate) scopes: TempVarScopes,
    pub(crate) rewrites: usize,
}

impl<'arena> SuperLowering<'arena, '_> {
    pub(crate) fn lower_program(&mut self, program: &mut Program<'arena>) -> bool {
        self.scopes.push();
        let mut changed = false;
        for statement in &mut program.statements {
            changed |= self.lower_statement(statement);
        }
        let temps = self.scopes.pop();
        if !temps.is_empty() {
            program
                .statements
                .insert(0, factory::var_declaration(self.arena, &temps, Span::dummy()));
            changed = true;
        }
        changed
    }

    /// Allocate a fresh temporary declared in the scope at `depth`.
    pub(crate) fn fresh_temp_at(&mut self, depth: usize) -> StringId {
        let name = self.ids.next(self.interner);
        self.scopes.declare_at(depth, name);
        name
    }

    /// Allocate a fresh temporary in the innermost scope.
    pub(crate) fn fresh_temp(&mut self) -> StringId {
        let depth = self.scopes.innermost();
        self.fresh_temp_at(depth)
    }
}
