//! Diagnostic reporting shared by all lowering passes.

use esdown_ast::span::Span;
use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Error,
    Warning,
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub span: Span,
    pub message: String,
}

/// Sink for diagnostics produced while a unit is processed.
///
/// Passes keep going after reporting an error so one run surfaces as many
/// problems as possible; the driver checks the error count at the end.
pub trait DiagnosticHandler: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);

    /// Number of error-level diagnostics reported so far.
    fn error_count(&self) -> usize;

    fn error(&self, span: Span, message: &str) {
        self.report(Diagnostic {
            level: DiagnosticLevel::Error,
            span,
            message: message.to_owned(),
        });
    }

    fn warning(&self, span: Span, message: &str) {
        self.report(Diagnostic {
            level: DiagnosticLevel::Warning,
            span,
            message: message.to_owned(),
        });
    }

    fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Handler that buffers diagnostics for later inspection. Used by tests and
/// by drivers that render diagnostics in a batch.
#[derive(Debug, Default)]
pub struct CollectingDiagnosticHandler {
    collected: Mutex<Vec<Diagnostic>>,
}

impl CollectingDiagnosticHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.collected.lock().clone()
    }
}

impl DiagnosticHandler for CollectingDiagnosticHandler {
    fn report(&self, diagnostic: Diagnostic) {
        self.collected.lock().push(diagnostic);
    }

    fn error_count(&self) -> usize {
        self.collected
            .lock()
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Error)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_in_order() {
        let handler = CollectingDiagnosticHandler::new();
        handler.error(Span::dummy(), "first");
        handler.warning(Span::dummy(), "second");
        let collected = handler.diagnostics();
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].message, "first");
        assert_eq!(collected[1].level, DiagnosticLevel::Warning);
    }

    #[test]
    fn test_error_count_ignores_warnings() {
        let handler = CollectingDiagnosticHandler::new();
        handler.warning(Span::dummy(), "just a warning");
        assert_eq!(handler.error_count(), 0);
        assert!(!handler.has_errors());
        handler.error(Span::dummy(), "a real problem");
        assert_eq!(handler.error_count(), 1);
        assert!(handler.has_errors());
    }
}
