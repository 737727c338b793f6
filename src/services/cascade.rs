use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::models::{Activity, Assignment, Course, CourseTool, Profile, SocialLink, Subject};
use crate::supabase::SupabaseClient;

/// Label shown for the parent subject when its lookup fails.
const FALLBACK_SUBJECT_NAME: &str = "Subject";

/// Tool tags kept per course for display.
const MAX_TOOLS_SHOWN: usize = 3;

/// A successfully loaded page body, plus the message of any non-fatal
/// fetch that degraded part of it.
#[derive(Debug, Clone)]
pub struct Partial<T> {
    pub data: T,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectDetail {
    pub subject: Subject,
    pub courses: Vec<Course>,
    /// Course id -> up to three tool labels, ordered by sort key. A course
    /// whose tool fetch failed maps to an empty list.
    pub tools_by_course: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseDetail {
    pub course: Course,
    /// Display name for the "back" affordance; `course.subject_id` is the
    /// target. Falls back to a generic label if the parent lookup fails.
    pub parent_name: String,
    pub assignments: Vec<Assignment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeSummary {
    pub profile: Option<Profile>,
    pub social_links: Vec<SocialLink>,
    pub activities: Vec<Activity>,
    /// Messages of sections that failed to load, in fetch order.
    pub partial_errors: Vec<String>,
}

/// Resolves a page's primary entity, then its dependent collections,
/// combining partial failures instead of aborting the whole page.
///
/// Failure policy: a failed primary fetch is fatal (`Err`), a missing
/// primary row is `Ok(None)`, and every secondary or nested fetch degrades
/// only its own piece of the result.
#[derive(Clone)]
pub struct CascadeService {
    supabase: Arc<dyn SupabaseClient>,
}

impl CascadeService {
    pub fn new(supabase: Arc<dyn SupabaseClient>) -> Self {
        Self { supabase }
    }

    /// Visible subjects, ordered by sort key (absent keys rank as 0, ties
    /// keep arrival order).
    pub async fn load_subject_list(&self) -> Result<Vec<Subject>, FetchError> {
        let mut subjects = self.supabase.fetch_subjects().await?;
        subjects.sort_by_key(Subject::sort_key);
        debug!("loaded {} subjects", subjects.len());
        Ok(subjects)
    }

    /// Subject by id, its courses, and each course's tool tags.
    ///
    /// The subject and course fetches are both keyed by the path id and run
    /// concurrently; the per-course tool fetches fan out once the courses
    /// are known.
    pub async fn load_subject_detail(
        &self,
        subject_id: &str,
    ) -> Result<Option<Partial<SubjectDetail>>, FetchError> {
        let (subject_res, courses_res) = tokio::join!(
            self.supabase.fetch_subject_by_id(subject_id),
            self.supabase.fetch_courses_by_subject(subject_id),
        );

        let Some(subject) = subject_res? else {
            debug!("subject {} not found", subject_id);
            return Ok(None);
        };

        let mut partial_errors = Vec::new();

        let courses = match courses_res {
            Ok(courses) => courses,
            Err(e) => {
                warn!("course listing for subject {} failed: {}", subject_id, e);
                partial_errors.push(e.to_string());
                Vec::new()
            }
        };

        let tools_by_course = self.fetch_tools_for(&courses).await;

        Ok(Some(Partial {
            data: SubjectDetail {
                subject,
                courses,
                tools_by_course,
            },
            error: join_errors(partial_errors),
        }))
    }

    /// Course by id, the parent subject's name for the back affordance,
    /// and the course's visible assignments.
    pub async fn load_course_detail(
        &self,
        course_id: &str,
    ) -> Result<Option<Partial<CourseDetail>>, FetchError> {
        let Some(course) = self.supabase.fetch_course_by_id(course_id).await? else {
            debug!("course {} not found", course_id);
            return Ok(None);
        };

        let (subject_res, assignments_res) = tokio::join!(
            self.supabase.fetch_subject_by_id(&course.subject_id),
            self.supabase.fetch_assignments_by_course(course_id),
        );

        let mut partial_errors = Vec::new();

        // The back affordance survives a failed or empty parent lookup.
        let parent_name = match subject_res {
            Ok(Some(subject)) => subject.name,
            Ok(None) => FALLBACK_SUBJECT_NAME.to_string(),
            Err(e) => {
                warn!("parent lookup for course {} failed: {}", course_id, e);
                partial_errors.push(e.to_string());
                FALLBACK_SUBJECT_NAME.to_string()
            }
        };

        let mut assignments = match assignments_res {
            Ok(assignments) => assignments,
            Err(e) => {
                warn!("assignment listing for course {} failed: {}", course_id, e);
                partial_errors.push(e.to_string());
                Vec::new()
            }
        };
        assignments.sort_by_key(Assignment::sort_key);

        Ok(Some(Partial {
            data: CourseDetail {
                course,
                parent_name,
                assignments,
            },
            error: join_errors(partial_errors),
        }))
    }

    /// Landing-page aggregate. The three sections load concurrently and
    /// each failure degrades only its own section.
    pub async fn load_home_summary(&self) -> HomeSummary {
        let (profile_res, links_res, activities_res) = tokio::join!(
            self.supabase.fetch_profile(),
            self.supabase.fetch_social_links(),
            self.supabase.fetch_activities(),
        );

        let mut partial_errors = Vec::new();

        let profile = match profile_res {
            Ok(profile) => profile,
            Err(e) => {
                warn!("profile fetch failed: {}", e);
                partial_errors.push(e.to_string());
                None
            }
        };

        let mut social_links = match links_res {
            Ok(links) => links,
            Err(e) => {
                warn!("social link listing failed: {}", e);
                partial_errors.push(e.to_string());
                Vec::new()
            }
        };
        social_links.sort_by_key(SocialLink::sort_key);

        let mut activities = match activities_res {
            Ok(activities) => activities,
            Err(e) => {
                warn!("activity listing failed: {}", e);
                partial_errors.push(e.to_string());
                Vec::new()
            }
        };
        activities.sort_by_key(Activity::sort_key);

        HomeSummary {
            profile,
            social_links,
            activities,
            partial_errors,
        }
    }

    /// Fan out one tool fetch per course and join them all. Tasks finish
    /// in any order; each result lands in the map under its own course id.
    /// A failing fetch leaves that course with an empty label list and
    /// does not disturb its siblings.
    async fn fetch_tools_for(&self, courses: &[Course]) -> HashMap<String, Vec<String>> {
        let mut tasks = JoinSet::new();
        for course in courses {
            let supabase = Arc::clone(&self.supabase);
            let course_id = course.id.clone();
            tasks.spawn(async move {
                let labels = match supabase.fetch_course_tools(&course_id).await {
                    Ok(mut tools) => {
                        tools.sort_by_key(CourseTool::sort_key);
                        tools.truncate(MAX_TOOLS_SHOWN);
                        tools.into_iter().map(|t| t.tool).collect()
                    }
                    Err(e) => {
                        warn!("tool listing for course {} failed: {}", course_id, e);
                        Vec::new()
                    }
                };
                (course_id, labels)
            });
        }

        // Every course gets an entry up front, so a lost task degrades to
        // the same empty list a failed fetch does.
        let mut tools_by_course: HashMap<String, Vec<String>> = courses
            .iter()
            .map(|c| (c.id.clone(), Vec::new()))
            .collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((course_id, labels)) => {
                    tools_by_course.insert(course_id, labels);
                }
                Err(e) => {
                    warn!("tool fetch task panicked: {}", e);
                }
            }
        }
        tools_by_course
    }
}

fn join_errors(errors: Vec<String>) -> Option<String> {
    if errors.is_empty() {
        None
    } else {
        Some(errors.join("; "))
    }
}
