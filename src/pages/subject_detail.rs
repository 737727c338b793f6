use tokio::sync::watch;
use tracing::debug;

use super::{PageState, normalize_id};
use crate::guard::{LivenessToken, MountGuard};
use crate::services::{CascadeService, SubjectDetail};

/// Subject detail page: one subject, its courses, and each course's tool
/// tags. Runs the full two-level cascade for every observed identifier.
pub struct SubjectDetailPage {
    service: CascadeService,
    guard: MountGuard,
    state: watch::Sender<PageState<SubjectDetail>>,
}

impl SubjectDetailPage {
    pub fn new(service: CascadeService) -> Self {
        let (state, _) = watch::channel(PageState::Idle);
        Self {
            service,
            guard: MountGuard::new(),
            state,
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> PageState<SubjectDetail> {
        self.state.borrow().clone()
    }

    /// Watch state transitions as they are committed.
    pub fn subscribe(&self) -> watch::Receiver<PageState<SubjectDetail>> {
        self.state.subscribe()
    }

    /// Load the page for `raw_id`. Starting a new observation invalidates
    /// whatever was in flight for a previous identifier; a late result
    /// from an abandoned fetch is dropped instead of committed. A blank
    /// identifier goes straight to `NotFound` without touching the
    /// gateway.
    pub async fn observe(&self, raw_id: &str) {
        let token = self.guard.issue();

        let Some(id) = normalize_id(raw_id) else {
            self.commit(&token, PageState::NotFound);
            return;
        };

        self.commit(&token, PageState::Loading);

        let next = match self.service.load_subject_detail(id).await {
            Ok(Some(partial)) => PageState::Loaded {
                data: partial.data,
                partial_error: partial.error,
            },
            Ok(None) => PageState::NotFound,
            Err(e) => PageState::Error {
                message: e.to_string(),
            },
        };

        if !self.commit(&token, next) {
            debug!("discarding stale result for subject {}", id);
        }
    }

    /// Tear the page down; anything still in flight can no longer commit.
    pub fn unmount(&self) {
        self.guard.invalidate();
    }

    fn commit(&self, token: &LivenessToken, next: PageState<SubjectDetail>) -> bool {
        if !token.is_current() {
            return false;
        }
        self.state.send_replace(next);
        true
    }
}
