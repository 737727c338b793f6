use tokio::sync::watch;
use tracing::debug;

use super::{PageState, normalize_id};
use crate::guard::{LivenessToken, MountGuard};
use crate::services::{CascadeService, CourseDetail};

/// Course detail page: one course, its parent subject's name for the back
/// affordance, and the course's visible assignments.
pub struct CourseDetailPage {
    service: CascadeService,
    guard: MountGuard,
    state: watch::Sender<PageState<CourseDetail>>,
}

impl CourseDetailPage {
    pub fn new(service: CascadeService) -> Self {
        let (state, _) = watch::channel(PageState::Idle);
        Self {
            service,
            guard: MountGuard::new(),
            state,
        }
    }

    pub fn state(&self) -> PageState<CourseDetail> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PageState<CourseDetail>> {
        self.state.subscribe()
    }

    /// Load the page for `raw_id`, with the same liveness discipline as
    /// the other detail page: the newest observation wins, blank ids skip
    /// the gateway entirely.
    pub async fn observe(&self, raw_id: &str) {
        let token = self.guard.issue();

        let Some(id) = normalize_id(raw_id) else {
            self.commit(&token, PageState::NotFound);
            return;
        };

        self.commit(&token, PageState::Loading);

        let next = match self.service.load_course_detail(id).await {
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
            debug!("discarding stale result for course {}", id);
        }
    }

    pub fn unmount(&self) {
        self.guard.invalidate();
    }

    fn commit(&self, token: &LivenessToken, next: PageState<CourseDetail>) -> bool {
        if !token.is_current() {
            return false;
        }
        self.state.send_replace(next);
        true
    }
}
