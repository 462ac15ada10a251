//! Error adapter for converting CompileError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! JSON syntax and shape errors in the input model carry a line and column,
//! which are turned into a labeled span over the offending source line.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use swimlane::{CompileError, model::ModelError};

/// Adapter for a model error with its source text.
pub struct ModelAdapter<'a> {
    err: &'a ModelError,
    src: &'a str,
}

impl<'a> ModelAdapter<'a> {
    pub fn new(err: &'a ModelError, src: &'a str) -> Self {
        Self { err, src }
    }

    /// Byte span of the reported position, if the error has one.
    fn span(&self) -> Option<SourceSpan> {
        match self.err {
            ModelError::Json(json) if json.line() > 0 => {
                Some(span_at(self.src, json.line(), json.column()))
            }
            _ => None,
        }
    }
}

impl fmt::Debug for ModelAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for ModelAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for ModelAdapter<'_> {}

impl MietteDiagnostic for ModelAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("swimlane::model"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.err {
            ModelError::Json(_) => {
                "a model needs `Pools`, each with `ID` and `Lanes`; lanes need `ID`, `Components` and `Flows`"
            }
            ModelError::MissingObject => "the reply must contain a JSON object between `{` and `}`",
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span()?;
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some("here".to_string()),
            span,
        ))))
    }
}

/// Adapter for [`CompileError`] variants without source text.
pub struct ErrorAdapter<'a>(pub &'a CompileError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CompileError::Io(_) => "swimlane::io",
            CompileError::Model { .. } => "swimlane::model",
            CompileError::EmptyModel => "swimlane::empty",
            CompileError::Edit(_) => "swimlane::edit",
            CompileError::Export(_) => "swimlane::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            CompileError::EmptyModel => Some(Box::new("add at least one pool to the model")),
            CompileError::Edit(_) => Some(Box::new(
                "edit instructions must name existing pools, lanes, components and flows",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A model error pointing into its source text.
    Model(ModelAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Model(m) => fmt::Display::fmt(m, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Model(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Model(m) => m.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Model(m) => m.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Model(m) => m.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Model(m) => m.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Converts a 1-based line and column into a one-character span, clamped
/// to the end of `src`.
fn span_at(src: &str, line: usize, column: usize) -> SourceSpan {
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let offset = (line_start + column.saturating_sub(1)).min(src.len());
    let len = usize::from(offset < src.len());
    SourceSpan::new(offset.into(), len)
}

/// Convert a [`CompileError`] into a reportable error.
pub fn to_reportable(err: &CompileError) -> Reportable<'_> {
    match err {
        CompileError::Model { err, src } => Reportable::Model(ModelAdapter::new(err, src)),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}
