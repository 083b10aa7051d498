//! Per-link state definitions for tracking crawl progress
//!
//! Every link in the work queue walks `Pending -> Navigating -> <outcome>`.

use std::fmt;

/// Represents the current state of a link in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    // ===== Active States =====
    /// Link is queued and has not been visited yet
    Pending,

    /// Renderer is navigating to the link and waiting for it to settle
    Navigating,

    // ===== Terminal Success States =====
    /// Content was extracted and a page record was produced
    Extracted,

    // ===== Terminal Error States =====
    /// No selector matched or the content was at or below the minimum length
    Empty,

    /// Navigation failed or timed out
    NavigationFailed,

    /// The per-page file could not be written
    WriteFailed,
}

impl PageState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    /// Returns true if this is an active state (link may still be processed)
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Navigating)
    }

    /// Returns true if this represents a successful extraction
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Extracted)
    }

    /// Returns true if this outcome counts toward the failure tally
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::Empty | Self::NavigationFailed | Self::WriteFailed
        )
    }

    /// Checks whether moving from `self` to `next` is allowed
    pub fn can_transition_to(&self, next: PageState) -> bool {
        match self {
            Self::Pending => next == Self::Navigating,
            Self::Navigating => next.is_terminal(),
            _ => false,
        }
    }

    /// Short machine-readable name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Navigating => "navigating",
            Self::Extracted => "extracted",
            Self::Empty => "empty",
            Self::NavigationFailed => "navigation_failed",
            Self::WriteFailed => "write_failed",
        }
    }

    /// Returns all possible page states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Pending,
            Self::Navigating,
            Self::Extracted,
            Self::Empty,
            Self::NavigationFailed,
            Self::WriteFailed,
        ]
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
