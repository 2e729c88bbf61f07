//! Diagnostic reporting.
//!
//! The front-end reports every problem through a [`Handler`]: fatal errors
//! and non-fatal warnings both land here as positioned [`Diagnostic`]s and
//! are rendered in the `file:line:col: message` form the driver prints to
//! stderr. The handler uses interior mutability so the lexer and parser can
//! share it without threading `&mut` through every production.

use std::cell::RefCell;
use std::fmt;

use crate::Span;

/// Diagnostic severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// A fatal error; the affected input is abandoned.
    Error,
    /// A warning; processing continues.
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// A positioned diagnostic message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level.
    pub level: Level,
    /// The message text.
    pub message: String,
    /// Source location the message refers to.
    pub span: Span,
}

impl Diagnostic {
    /// Creates an error diagnostic.
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            span,
        }
    }

    /// Creates a warning diagnostic.
    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
            span,
        }
    }
}

/// Collects diagnostics for one compilation of one input file.
///
/// # Examples
///
/// ```
/// use thcc_util::{Handler, Span};
///
/// let handler = Handler::new("main.hc");
/// handler.error("unexpected character '@'", Span::new(4, 5, 1, 5));
///
/// assert!(handler.has_errors());
/// assert_eq!(
///     handler.rendered(),
///     vec!["main.hc:1:5: unexpected character '@'".to_string()],
/// );
/// ```
pub struct Handler {
    /// Logical name of the input file, used only for rendering.
    file: String,
    /// Collected diagnostics, in emission order.
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    /// Creates a handler for the named input file.
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Returns the input file name this handler reports against.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Records an error.
    pub fn error(&self, message: impl Into<String>, span: Span) {
        self.emit(Diagnostic::error(message, span));
    }

    /// Records a warning.
    pub fn warning(&self, message: impl Into<String>, span: Span) {
        self.emit(Diagnostic::warning(message, span));
    }

    /// Records a prebuilt diagnostic.
    pub fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Returns true if any error has been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }

    /// Returns the number of recorded errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    /// Returns the number of recorded warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Warning)
            .count()
    }

    /// Returns a clone of all recorded diagnostics, in emission order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Renders one diagnostic as `file:line:col: message`.
    ///
    /// Warnings carry an explicit `warning:` tag; errors do not, matching
    /// the channel format the driver prints.
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        match diagnostic.level {
            Level::Error => format!(
                "{}:{}:{}: {}",
                self.file, diagnostic.span.line, diagnostic.span.column, diagnostic.message
            ),
            Level::Warning => format!(
                "{}:{}:{}: warning: {}",
                self.file, diagnostic.span.line, diagnostic.span.column, diagnostic.message
            ),
        }
    }

    /// Renders all recorded diagnostics, in emission order.
    pub fn rendered(&self) -> Vec<String> {
        self.diagnostics
            .borrow()
            .iter()
            .map(|d| self.render(d))
            .collect()
    }
}
