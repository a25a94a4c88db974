use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoweringError {
    /// The unit was processed to the end but error diagnostics were reported.
    #[error("lowering emitted {count} error diagnostic(s)")]
    DiagnosticsEmitted { count: usize },
}
