//! Lower-and-print pipeline for tests.

use std::sync::Arc;

use anyhow::Context;
use bumpalo::Bump;

use esdown_ast::ast::Program;
use esdown_ast::string_interner::StringInterner;
use esdown_core::diagnostics::{CollectingDiagnosticHandler, Diagnostic};
use esdown_core::errors::LoweringError;
use esdown_core::lowering::Lowerer;
use esdown_core::printer::print_program;

/// Lower `program` in place and return `(changed, printed_output)`.
///
/// Fails when the lowering reported error diagnostics; the diagnostics are
/// included in the error message.
pub fn lower_to_string<'arena>(
    program: &mut Program<'arena>,
    arena: &'arena Bump,
    interner: &Arc<StringInterner>,
) -> anyhow::Result<(bool, String)> {
    let handler = Arc::new(CollectingDiagnosticHandler::new());
    let mut lowerer = Lowerer::new(handler.clone(), interner.clone());
    let changed = lowerer
        .lower(program, arena)
        .with_context(|| format!("diagnostics: {:?}", handler.diagnostics()))?;
    Ok((changed, print_program(program, interner)))
}

/// Like [`lower_to_string`] but keeps going on errors, handing back the
/// result, the collected diagnostics, and the (best-effort) printed output.
pub fn lower_with_diagnostics<'arena>(
    program: &mut Program<'arena>,
    arena: &'arena Bump,
    interner: &Arc<StringInterner>,
) -> (Result<bool, LoweringError>, Vec<Diagnostic>, String) {
    let handler = Arc::new(CollectingDiagnosticHandler::new());
    let mut lowerer = Lowerer::new(handler.clone(), interner.clone());
    let result = lowerer.lower(program, arena);
    let printed = print_program(program, interner);
    (result, handler.diagnostics(), printed)
}
