//! Recoverable compile conditions.
//!
//! A structural model produced by an assistant is frequently slightly wrong:
//! flows point at components that do not exist, ids are repeated, two shapes
//! sit on top of each other. None of these abort a compile. The offending
//! element is left out of the output and a [`Diagnostic`] describing it is
//! returned next to the XML.
//!
//! Codes are organized by stage:
//! - `W1xx` - Connector resolution and routing
//! - `W2xx` - Model indexing

use std::fmt;

use log::warn;

/// Codes identifying each kind of recoverable condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// Unknown flow endpoint.
    ///
    /// A flow's `Start` or `Target` names no component in the model.
    W100,

    /// Ambiguous lane ownership.
    ///
    /// A flow endpoint id is declared in more than one lane, so the lane
    /// it belongs to cannot be determined.
    W101,

    /// Coincident anchors.
    ///
    /// Start and target share a connection midpoint, leaving no direction
    /// to route along.
    W102,

    /// Duplicate component id.
    ///
    /// Only the first declaration is kept.
    W200,

    /// Duplicate flow id.
    ///
    /// Only the first declaration is kept. A flow whose id is already taken
    /// by a component is dropped as well.
    W201,
}

impl DiagnosticCode {
    /// Returns the code as a string (e.g., "W100").
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::W100 => "W100",
            DiagnosticCode::W101 => "W101",
            DiagnosticCode::W102 => "W102",
            DiagnosticCode::W200 => "W200",
            DiagnosticCode::W201 => "W201",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single recoverable condition, tied to the model element it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    code: DiagnosticCode,
    element: String,
    message: String,
    help: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic about the element with id `element`.
    pub fn new(code: DiagnosticCode, element: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            element: element.into(),
            message: message.into(),
            help: None,
        }
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn code(&self) -> DiagnosticCode {
        self.code
    }

    /// Id of the model element that was dropped or affected.
    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "warning[W100]: message"
        write!(f, "warning[{}]: {}", self.code, self.message)?;
        if let Some(help) = &self.help {
            write!(f, " (help: {help})")?;
        }
        Ok(())
    }
}

/// Accumulates diagnostics across the stages of one compile.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic, logging it as a warning.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        warn!(
            code = diagnostic.code.as_str(),
            element = diagnostic.element.as_str();
            "{}", diagnostic.message
        );
        self.diagnostics.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns true if a diagnostic with `code` was recorded for `element`.
    pub fn contains(&self, code: DiagnosticCode, element: &str) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.code == code && d.element == element)
    }

    /// Finish collection, returning every diagnostic in emission order.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::new(
            DiagnosticCode::W100,
            "Flow_1",
            "flow `Flow_1` targets unknown component `Ghost`",
        );
        assert_eq!(
            diag.to_string(),
            "warning[W100]: flow `Flow_1` targets unknown component `Ghost`"
        );
    }

    #[test]
    fn test_diagnostic_display_with_help() {
        let diag = Diagnostic::new(DiagnosticCode::W200, "Task_1", "duplicate id")
            .with_help("rename one of the components");
        assert!(diag.to_string().ends_with("(help: rename one of the components)"));
        assert_eq!(diag.help(), Some("rename one of the components"));
    }

    #[test]
    fn test_collector_keeps_emission_order() {
        let mut collector = DiagnosticCollector::new();
        assert!(collector.is_empty());

        collector.emit(Diagnostic::new(DiagnosticCode::W201, "F", "second flow"));
        collector.emit(Diagnostic::new(DiagnosticCode::W100, "G", "ghost"));

        assert_eq!(collector.len(), 2);
        assert!(collector.contains(DiagnosticCode::W100, "G"));
        assert!(!collector.contains(DiagnosticCode::W100, "F"));

        let codes: Vec<_> = collector.finish().iter().map(|d| d.code()).collect();
        assert_eq!(codes, vec![DiagnosticCode::W201, DiagnosticCode::W100]);
    }
}
