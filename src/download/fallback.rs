//! Fallback strategies for failed extractor calls

use crate::error::ExtractErrorKind;
use crate::extractor::{
    ExtractOptions, ALTERNATE_CLIENT, FORMAT_BEST, FORMAT_BEST_MERGED, FORMAT_BEST_MP4,
};
use std::fmt;

/// One alternative attempt after the primary call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Same request, different client identity
    AlternateClient(&'static str),
    /// Same request, different format selector
    Format(&'static str),
}

impl Fallback {
    /// Options for this attempt, derived from the primary options
    pub fn apply(&self, primary: &ExtractOptions) -> ExtractOptions {
        let options = primary.clone();
        match self {
            Fallback::AlternateClient(client) => options.with_player_client(client),
            Fallback::Format(format) => options.with_format(format),
        }
    }
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::AlternateClient(client) => write!(f, "client={}", client),
            Fallback::Format(format) => write!(f, "format={}", format),
        }
    }
}

/// Ordered fallbacks for one failure; the first one that succeeds wins
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FallbackPlan {
    steps: Vec<Fallback>,
}

impl FallbackPlan {
    /// Plan for a failed primary call.
    ///
    /// `kind` is `None` when the failure did not come from the extractor
    /// itself (e.g. the binary could not be started); nothing is retried then.
    pub fn for_failure(kind: Option<ExtractErrorKind>, authenticated: bool) -> Self {
        let steps = match kind {
            Some(ExtractErrorKind::Forbidden) if authenticated => {
                vec![Fallback::AlternateClient(ALTERNATE_CLIENT)]
            }
            Some(ExtractErrorKind::MergerUnavailable) => vec![Fallback::Format(FORMAT_BEST_MP4)],
            Some(ExtractErrorKind::FormatUnavailable) => vec![
                Fallback::Format(FORMAT_BEST_MERGED),
                Fallback::Format(FORMAT_BEST_MP4),
                Fallback::Format(FORMAT_BEST),
            ],
            _ => Vec::new(),
        };
        Self { steps }
    }

    pub fn steps(&self) -> &[Fallback] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
