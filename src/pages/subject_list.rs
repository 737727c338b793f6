use tokio::sync::watch;
use tracing::debug;

use super::PageState;
use crate::guard::{LivenessToken, MountGuard};
use crate::models::Subject;
use crate::services::CascadeService;

/// Subject listing page. No path identifier and no cascade, just the one
/// visible, ordered collection.
pub struct SubjectListPage {
    service: CascadeService,
    guard: MountGuard,
    state: watch::Sender<PageState<Vec<Subject>>>,
}

impl SubjectListPage {
    pub fn new(service: CascadeService) -> Self {
        let (state, _) = watch::channel(PageState::Idle);
        Self {
            service,
            guard: MountGuard::new(),
            state,
        }
    }

    pub fn state(&self) -> PageState<Vec<Subject>> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PageState<Vec<Subject>>> {
        self.state.subscribe()
    }

    pub async fn load(&self) {
        let token = self.guard.issue();

        self.commit(&token, PageState::Loading);

        let next = match self.service.load_subject_list().await {
            Ok(subjects) => PageState::Loaded {
                data: subjects,
                partial_error: None,
            },
            Err(e) => PageState::Error {
                message: e.to_string(),
            },
        };

        if !self.commit(&token, next) {
            debug!("discarding stale subject listing");
        }
    }

    pub fn unmount(&self) {
        self.guard.invalidate();
    }

    fn commit(&self, token: &LivenessToken, next: PageState<Vec<Subject>>) -> bool {
        if !token.is_current() {
            return false;
        }
        self.state.send_replace(next);
        true
    }
}
