//! Diagnostics collection for packing runs.
//!
//! This module provides types for collecting and reporting diagnostic
//! messages during a packing pass. The pass treats most irregularities as
//! non-fatal — an unresolvable cold-start entry, a missing canary class, a
//! first attempt that grew the container count — and records them here while
//! running to completion.
//!
//! Each invocation owns its own [`Diagnostics`] container, returned as part
//! of the pack result, so concurrent invocations never share reporting
//! state.
//!
//! # Key Components
//!
//! - [`Diagnostics`] - Append-only container for diagnostic entries
//! - [`Diagnostic`] - Individual diagnostic entry with severity and context
//! - [`DiagnosticSeverity`] - Severity level (Info, Warning, Error)
//! - [`DiagnosticCategory`] - Category of the diagnostic source
//!
//! # Usage Examples
//!
//! ```rust
//! use dexpack::metadata::diagnostics::{Diagnostics, DiagnosticCategory};
//!
//! let diagnostics = Diagnostics::new();
//!
//! diagnostics.warning(DiagnosticCategory::Canary, "no canary class found");
//! diagnostics.info(DiagnosticCategory::ColdStart, "no such entry com/app/Gone");
//!
//! assert!(diagnostics.has_warnings());
//! for entry in diagnostics.iter() {
//!     println!("{}", entry);
//! }
//! ```

use std::fmt;

use crate::metadata::token::Token;

/// Severity level of a diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    /// Informational message, not indicating a problem.
    ///
    /// Used for progress traces: container terminations, prune iteration
    /// counts, cold-start entries that resolve to nothing.
    Info,

    /// Warning about a condition the pass recovered from.
    ///
    /// Examples: a canary class missing from the lookup (one is
    /// synthesized), a packing attempt that grew the container count (the
    /// engine retries).
    Warning,

    /// Error describing a condition that aborted the pass.
    ///
    /// Recorded for context alongside the returned [`crate::Error`].
    Error,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Info => write!(f, "INFO"),
            DiagnosticSeverity::Warning => write!(f, "WARN"),
            DiagnosticSeverity::Error => write!(f, "ERROR"),
        }
    }
}

/// Category indicating the source or type of diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    /// Cold-start ordering issues.
    ///
    /// Examples: entries that resolve to no class, end-marker flushes.
    ColdStart,

    /// Canary class handling.
    ///
    /// Examples: canary missing from the lookup and synthesized.
    Canary,

    /// Capacity accounting and container termination.
    ///
    /// Examples: the per-container termination trace with reference counts.
    Capacity,

    /// Static reachability pruning.
    ///
    /// Examples: per-iteration unreferenced counts, classes skipped because
    /// they are no longer linked to the cold-start set.
    Prune,

    /// General pass progress not fitting other categories.
    General,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::ColdStart => write!(f, "ColdStart"),
            DiagnosticCategory::Canary => write!(f, "Canary"),
            DiagnosticCategory::Capacity => write!(f, "Capacity"),
            DiagnosticCategory::Prune => write!(f, "Prune"),
            DiagnosticCategory::General => write!(f, "General"),
        }
    }
}

/// A single diagnostic entry with context information.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level of this diagnostic.
    pub severity: DiagnosticSeverity,

    /// Category indicating the source of this diagnostic.
    pub category: DiagnosticCategory,

    /// Human-readable description of the event.
    pub message: String,

    /// Optional token related to the event.
    pub token: Option<Token>,
}

impl Diagnostic {
    /// Creates a new diagnostic entry.
    pub fn new(
        severity: DiagnosticSeverity,
        category: DiagnosticCategory,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            message: message.into(),
            token: None,
        }
    }

    /// Adds token context to the diagnostic.
    #[must_use]
    pub fn with_token(mut self, token: Token) -> Self {
        self.token = Some(token);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.category, self.message)?;
        if let Some(token) = self.token {
            write!(f, " (token: {})", token)?;
        }
        Ok(())
    }
}

/// Append-only container for diagnostic entries.
///
/// Entries are pushed through `&self`, so the pass can record events from
/// anywhere without threading a mutable reference through every helper.
#[derive(Debug)]
pub struct Diagnostics {
    entries: boxcar::Vec<Diagnostic>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics {
    /// Creates a new empty diagnostics container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: boxcar::Vec::new(),
        }
    }

    /// Adds an informational diagnostic.
    pub fn info(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(Diagnostic::new(DiagnosticSeverity::Info, category, message));
    }

    /// Adds a warning diagnostic.
    pub fn warning(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(Diagnostic::new(
            DiagnosticSeverity::Warning,
            category,
            message,
        ));
    }

    /// Adds an error diagnostic.
    pub fn error(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(Diagnostic::new(
            DiagnosticSeverity::Error,
            category,
            message,
        ));
    }

    /// Adds a pre-constructed diagnostic entry.
    pub fn push(&self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Returns true if any diagnostics were collected.
    #[must_use]
    pub fn has_any(&self) -> bool {
        self.entries.count() > 0
    }

    /// Returns true if any error diagnostics were collected.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Returns true if any warning diagnostics were collected.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    /// Total number of collected entries.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.count()
    }

    /// Number of error entries.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.iter()
            .filter(|d| d.severity == DiagnosticSeverity::Error)
            .count()
    }

    /// Number of warning entries.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.iter()
            .filter(|d| d.severity == DiagnosticSeverity::Warning)
            .count()
    }

    /// Number of informational entries.
    #[must_use]
    pub fn info_count(&self) -> usize {
        self.iter()
            .filter(|d| d.severity == DiagnosticSeverity::Info)
            .count()
    }

    /// Iterates over all entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().map(|(_, diagnostic)| diagnostic)
    }

    /// Returns all warning entries.
    #[must_use]
    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.iter()
            .filter(|d| d.severity == DiagnosticSeverity::Warning)
            .collect()
    }

    /// Returns all entries of a category.
    #[must_use]
    pub fn by_category(&self, category: DiagnosticCategory) -> Vec<&Diagnostic> {
        self.iter().filter(|d| d.category == category).collect()
    }

    /// Generates a one-line summary of collected counts.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} diagnostics ({} errors, {} warnings, {} info)",
            self.count(),
            self.error_count(),
            self.warning_count(),
            self.info_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_by_severity() {
        let diagnostics = Diagnostics::new();
        diagnostics.info(DiagnosticCategory::General, "starting");
        diagnostics.warning(DiagnosticCategory::Canary, "no canary class found");
        diagnostics.warning(DiagnosticCategory::General, "container count grew");

        assert!(diagnostics.has_any());
        assert!(diagnostics.has_warnings());
        assert!(!diagnostics.has_errors());
        assert_eq!(diagnostics.count(), 3);
        assert_eq!(diagnostics.warning_count(), 2);
        assert_eq!(diagnostics.info_count(), 1);
    }

    #[test]
    fn test_by_category_filter() {
        let diagnostics = Diagnostics::new();
        diagnostics.info(DiagnosticCategory::ColdStart, "no such entry a");
        diagnostics.info(DiagnosticCategory::ColdStart, "no such entry b");
        diagnostics.info(DiagnosticCategory::Prune, "found 0 unreferenced");

        assert_eq!(
            diagnostics.by_category(DiagnosticCategory::ColdStart).len(),
            2
        );
        assert_eq!(diagnostics.by_category(DiagnosticCategory::Canary).len(), 0);
    }

    #[test]
    fn test_display_includes_token() {
        let diagnostic = Diagnostic::new(
            DiagnosticSeverity::Warning,
            DiagnosticCategory::Canary,
            "no canary class found",
        )
        .with_token(crate::metadata::token::Token::type_id(4));

        let rendered = format!("{}", diagnostic);
        assert!(rendered.starts_with("[WARN] Canary:"));
        assert!(rendered.contains("0x01000004"));
    }

    #[test]
    fn test_summary_shape() {
        let diagnostics = Diagnostics::new();
        diagnostics.info(DiagnosticCategory::General, "x");
        assert_eq!(diagnostics.summary(), "1 diagnostics (0 errors, 0 warnings, 1 info)");
    }
}
