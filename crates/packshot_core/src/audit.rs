//! The identity contract produced by the forensic audit.

use serde::{Deserialize, Serialize};

const FALLBACK_REPORT: &str = "standard geometry, matte material";

/// Identity-critical facts about the primary asset.
///
/// Opaque text: the pipeline only re-injects it into later prompts.
///
/// # Examples
///
/// ```
/// use packshot_core::AuditReport;
///
/// let report = AuditReport::fallback();
/// assert!(report.is_fallback());
/// assert_eq!(report.as_str(), "standard geometry, matte material");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(transparent)]
pub struct AuditReport(String);

impl AuditReport {
    /// Wraps audit text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Generic report substituted when the audit stage fails.
    pub fn fallback() -> Self {
        Self(FALLBACK_REPORT.to_string())
    }

    /// True when this is the substituted fallback.
    pub fn is_fallback(&self) -> bool {
        self.0 == FALLBACK_REPORT
    }

    /// The report text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
