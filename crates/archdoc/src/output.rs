//! Styled messages on stderr.
//!
//! stdout is reserved for command results such as the ADF JSON printed by
//! `archdoc convert`.

use archdoc_adf::{Diagnostic, Severity};
use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    plain: Style,
    success: Style,
    warning: Style,
    error: Style,
    heading: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            plain: Style::new(),
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red(),
            heading: Style::new().cyan().bold(),
        }
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(&self.plain, msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.line(&self.success, msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.line(&self.warning, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.error, msg);
    }

    pub(crate) fn highlight(&self, msg: &str) {
        self.line(&self.heading, msg);
    }

    /// Print conversion diagnostics, colored by severity.
    pub(crate) fn diagnostics(&self, diagnostics: &[Diagnostic]) {
        if diagnostics.is_empty() {
            return;
        }
        self.warning(&format!("\nDiagnostics ({}):", diagnostics.len()));
        for diagnostic in diagnostics {
            let style = match diagnostic.severity() {
                Severity::Info => &self.plain,
                Severity::Warning => &self.warning,
                Severity::Fatal => &self.error,
            };
            self.line(style, &format!("  - {diagnostic}"));
        }
    }

    fn line(&self, style: &Style, msg: &str) {
        // Write errors on stderr are ignored
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }
}
