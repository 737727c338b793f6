pub mod course_detail;
pub mod subject_detail;
pub mod subject_list;

pub use course_detail::CourseDetailPage;
pub use subject_detail::SubjectDetailPage;
pub use subject_list::SubjectListPage;

use serde::Serialize;

/// What a page currently shows. Every page starts `Idle`, enters `Loading`
/// when it begins resolving, and settles in one of the three terminal
/// states. `Loaded` can still carry the message of a non-fatal fetch that
/// degraded part of the data.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageState<T> {
    Idle,
    Loading,
    Loaded {
        data: T,
        partial_error: Option<String>,
    },
    NotFound,
    Error {
        message: String,
    },
}

impl<T> PageState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, PageState::Loading)
    }
}

/// Path identifiers arrive as opaque strings; blank means absent.
pub(crate) fn normalize_id(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}
