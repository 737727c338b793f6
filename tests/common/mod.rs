use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use portfolio_backend::error::FetchError;
use portfolio_backend::models::{
    Activity, Assignment, Course, CourseTool, Profile, SocialLink, Subject,
};
use portfolio_backend::supabase::SupabaseClient;

/// In-memory stand-in for the remote store. Scripted rows come back with
/// the remote's filter semantics (parent-id match, visibility) but in
/// arrival order; per-operation failure switches simulate upstream errors.
#[derive(Default)]
pub struct MockSupabase {
    pub subjects: Vec<Subject>,
    pub courses: Vec<Course>,
    pub tools: Vec<CourseTool>,
    pub assignments: Vec<Assignment>,
    pub profile: Option<Profile>,
    pub social_links: Vec<SocialLink>,
    pub activities: Vec<Activity>,

    pub fail_subject_list: bool,
    pub fail_subject_by_id: bool,
    pub fail_courses: bool,
    pub fail_course_by_id: bool,
    /// Course ids whose tool fetch errors.
    pub fail_tools_for: Vec<String>,
    pub fail_assignments: bool,
    pub fail_profile: bool,

    /// Total gateway calls issued, across all operations.
    pub calls: AtomicUsize,
    /// When set, `fetch_subject_by_id` for this id blocks until notified.
    pub gate: Option<(String, Arc<Notify>)>,
}

impl MockSupabase {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn upstream(message: &str) -> FetchError {
    FetchError::Upstream {
        status: 500,
        message: message.to_string(),
    }
}

#[async_trait]
impl SupabaseClient for MockSupabase {
    async fn fetch_subjects(&self) -> Result<Vec<Subject>, FetchError> {
        self.tick();
        if self.fail_subject_list {
            return Err(upstream("subjects unavailable"));
        }
        Ok(self.subjects.clone())
    }

    async fn fetch_subject_by_id(&self, id: &str) -> Result<Option<Subject>, FetchError> {
        self.tick();
        if let Some((gated_id, notify)) = &self.gate {
            if gated_id == id {
                notify.notified().await;
            }
        }
        if self.fail_subject_by_id {
            return Err(upstream("subjects unavailable"));
        }
        Ok(self.subjects.iter().find(|s| s.id == id).cloned())
    }

    async fn fetch_courses_by_subject(&self, subject_id: &str) -> Result<Vec<Course>, FetchError> {
        self.tick();
        if self.fail_courses {
            return Err(upstream("courses unavailable"));
        }
        Ok(self
            .courses
            .iter()
            .filter(|c| c.subject_id == subject_id)
            .cloned()
            .collect())
    }

    async fn fetch_course_by_id(&self, id: &str) -> Result<Option<Course>, FetchError> {
        self.tick();
        if self.fail_course_by_id {
            return Err(upstream("courses unavailable"));
        }
        Ok(self.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn fetch_course_tools(&self, course_id: &str) -> Result<Vec<CourseTool>, FetchError> {
        self.tick();
        if self.fail_tools_for.iter().any(|id| id == course_id) {
            return Err(upstream("tools unavailable"));
        }
        Ok(self
            .tools
            .iter()
            .filter(|t| t.course_id == course_id)
            .cloned()
            .collect())
    }

    async fn fetch_assignments_by_course(
        &self,
        course_id: &str,
    ) -> Result<Vec<Assignment>, FetchError> {
        self.tick();
        if self.fail_assignments {
            return Err(upstream("assignments unavailable"));
        }
        Ok(self
            .assignments
            .iter()
            .filter(|a| a.course_id == course_id && a.is_visible)
            .cloned()
            .collect())
    }

    async fn fetch_profile(&self) -> Result<Option<Profile>, FetchError> {
        self.tick();
        if self.fail_profile {
            return Err(upstream("profile unavailable"));
        }
        Ok(self.profile.clone())
    }

    async fn fetch_social_links(&self) -> Result<Vec<SocialLink>, FetchError> {
        self.tick();
        Ok(self.social_links.clone())
    }

    async fn fetch_activities(&self) -> Result<Vec<Activity>, FetchError> {
        self.tick();
        Ok(self.activities.clone())
    }
}

pub fn subject(id: &str, name: &str, sort_order: Option<i32>) -> Subject {
    Subject {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{} description", name),
        icon: None,
        course_count: None,
        sort_order,
    }
}

pub fn course(id: &str, subject_id: &str, name: &str) -> Course {
    Course {
        id: id.to_string(),
        subject_id: subject_id.to_string(),
        name: name.to_string(),
        description: format!("{} description", name),
        term: None,
        assignment_count: None,
    }
}

pub fn tool(id: &str, course_id: &str, label: &str, sort_order: Option<i32>) -> CourseTool {
    CourseTool {
        id: id.to_string(),
        course_id: course_id.to_string(),
        tool: label.to_string(),
        sort_order,
    }
}

pub fn assignment(
    id: &str,
    course_id: &str,
    title: &str,
    sort_order: Option<i32>,
    is_visible: bool,
) -> Assignment {
    Assignment {
        id: id.to_string(),
        course_id: course_id.to_string(),
        title: title.to_string(),
        description: format!("{} description", title),
        github_link: None,
        sort_order,
        is_visible,
    }
}
