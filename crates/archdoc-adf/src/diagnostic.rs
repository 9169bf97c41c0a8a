//! Degradation diagnostics.
//!
//! Conversion and assembly never fail on content problems. Each problem is
//! recorded as a [`Diagnostic`] next to the produced document so callers can
//! tell a faithful conversion from a degraded one.

use std::fmt;

/// How much a diagnostic affects the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Cosmetic loss, e.g. an unknown wrapper tag was flattened.
    Info,
    /// Content was replaced or dropped.
    Warning,
    /// The page could not be converted at all.
    Fatal,
}

/// One degradation event, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Input could not be turned into a DOM; the document is empty.
    ParseFailure { reason: String },

    /// A tag or attribute was not mapped as-is.
    MappingWarning { tag: String, message: String },

    /// An image was replaced by a text placeholder.
    ImageResolutionFailure { key: String, reason: String },

    /// A partial document was skipped during assembly.
    MergeFailure { part: usize, reason: String },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Self::ParseFailure { .. } => Severity::Fatal,
            Self::MappingWarning { .. } => Severity::Info,
            Self::ImageResolutionFailure { .. } | Self::MergeFailure { .. } => Severity::Warning,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseFailure { reason } => write!(f, "HTML parse failure: {reason}"),
            Self::MappingWarning { tag, message } => write!(f, "<{tag}>: {message}"),
            Self::ImageResolutionFailure { key, reason } => {
                write!(f, "image '{key}' not resolved: {reason}")
            }
            Self::MergeFailure { part, reason } => {
                write!(f, "partial document #{part} skipped: {reason}")
            }
        }
    }
}
