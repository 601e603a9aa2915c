//! Video curation
//!
//! `VideoCurator::curate` never fails and never returns an empty list: every
//! provider problem resolves to the fallback identifiers, and the reason is
//! kept in `CurationOutcome` for logging and tests.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::FailureKind;
use crate::video::VideoId;
use crate::youtube::{SearchQuery, VideoSearch};

pub const MAX_SEARCH_TERM_CHARS: usize = 100;
pub const SHORTS_QUALIFIER: &str = "#shorts";
pub const MAX_VIDEOS_PER_MODULE: u32 = 3;
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    MissingCredential,
    NoValidResults,
    Provider(String),
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurationOutcome {
    Live,
    Fallback(FallbackReason),
}

/// Videos attached to one module, plus how they were obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curation {
    pub videos: Vec<VideoId>,
    pub outcome: CurationOutcome,
}

impl Curation {
    fn fallback(reason: FallbackReason) -> Self {
        let videos = match reason {
            FallbackReason::MissingCredential => VideoId::offline_fallbacks(),
            _ => vec![VideoId::primary_fallback()],
        };
        Self {
            videos,
            outcome: CurationOutcome::Fallback(reason),
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self.outcome {
            CurationOutcome::Live => None,
            CurationOutcome::Fallback(_) => Some(FailureKind::CurationFallbackUsed),
        }
    }
}

pub struct VideoCurator {
    /// `None` when no search credential is configured.
    search: Option<Arc<dyn VideoSearch>>,
    timeout: Duration,
}

impl VideoCurator {
    pub fn new(search: Arc<dyn VideoSearch>) -> Self {
        Self {
            search: Some(search),
            timeout: DEFAULT_SEARCH_TIMEOUT,
        }
    }

    /// A curator with no search credential; always returns the offline fallbacks.
    pub fn without_credential() -> Self {
        Self {
            search: None,
            timeout: DEFAULT_SEARCH_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn curate(&self, search_term: &str) -> Curation {
        let Some(search) = &self.search else {
            return Curation::fallback(FallbackReason::MissingCredential);
        };

        let query = SearchQuery {
            q: build_search_query(search_term),
            max_results: MAX_VIDEOS_PER_MODULE,
        };

        let candidates = match tokio::time::timeout(self.timeout, search.search_short_videos(&query)).await {
            Ok(Ok(candidates)) => candidates,
            Ok(Err(e)) => {
                warn!("Video search failed for '{}': {}", query.q, e);
                return Curation::fallback(FallbackReason::Provider(e.to_string()));
            }
            Err(_) => {
                warn!("Video search timed out for '{}'", query.q);
                return Curation::fallback(FallbackReason::Timeout);
            }
        };

        let returned = candidates.len();
        let videos: Vec<VideoId> = candidates
            .iter()
            .filter_map(|candidate| VideoId::parse(candidate))
            .take(MAX_VIDEOS_PER_MODULE as usize)
            .collect();

        if videos.is_empty() {
            warn!(
                "No valid videos for '{}' ({} candidates returned), using fallback",
                query.q, returned
            );
            return Curation::fallback(FallbackReason::NoValidResults);
        }

        info!("Curated {} videos for '{}'", videos.len(), query.q);
        Curation {
            videos,
            outcome: CurationOutcome::Live,
        }
    }
}

/// Truncate to `MAX_SEARCH_TERM_CHARS` characters and append the shorts qualifier.
pub fn build_search_query(search_term: &str) -> String {
    let truncated: String = search_term.chars().take(MAX_SEARCH_TERM_CHARS).collect();
    format!("{} {}", truncated, SHORTS_QUALIFIER)
}
