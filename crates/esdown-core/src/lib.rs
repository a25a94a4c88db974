//! Lowering core: rewrites `super` references from the newer dialect into
//! runtime helper calls the older dialect can execute.

pub mod diagnostics;
pub mod errors;
pub mod lowering;
pub mod printer;
pub mod runtime;

pub use diagnostics::{
    CollectingDiagnosticHandler, Diagnostic, DiagnosticHandler, DiagnosticLevel,
};
pub use errors::LoweringError;
pub use lowering::{Lowerer, LoweringPass, SuperLoweringPass, UniqueIdentifierGenerator};
pub use printer::print_program;
