pub mod dto;

use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{AppError, FetchError};
use crate::models::{Activity, Assignment, Course, CourseTool, Profile, SocialLink, Subject};
use dto::{ApiErrorBody, ListQuery};

#[derive(Clone, Debug)]
pub struct SupabaseConfig {
    pub base_url: String,
    pub anon_key: String,
}

impl SupabaseConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let base_url = env::var("SUPABASE_URL")
            .map_err(|_| AppError::BadRequest("SUPABASE_URL is not set".to_string()))?;
        let anon_key = env::var("SUPABASE_ANON_KEY")
            .map_err(|_| AppError::BadRequest("SUPABASE_ANON_KEY is not set".to_string()))?;

        Ok(Self { base_url, anon_key })
    }
}

/// Read-only view of the portfolio tables. Every operation resolves to a
/// value or a structured [`FetchError`]; a by-id lookup that matches zero
/// or several rows reports `None` rather than picking one.
#[async_trait]
pub trait SupabaseClient: Send + Sync {
    async fn fetch_subjects(&self) -> Result<Vec<Subject>, FetchError>;
    async fn fetch_subject_by_id(&self, id: &str) -> Result<Option<Subject>, FetchError>;
    async fn fetch_courses_by_subject(&self, subject_id: &str) -> Result<Vec<Course>, FetchError>;
    async fn fetch_course_by_id(&self, id: &str) -> Result<Option<Course>, FetchError>;
    async fn fetch_course_tools(&self, course_id: &str) -> Result<Vec<CourseTool>, FetchError>;
    async fn fetch_assignments_by_course(&self, course_id: &str)
        -> Result<Vec<Assignment>, FetchError>;
    async fn fetch_profile(&self) -> Result<Option<Profile>, FetchError>;
    async fn fetch_social_links(&self) -> Result<Vec<SocialLink>, FetchError>;
    async fn fetch_activities(&self) -> Result<Vec<Activity>, FetchError>;
}

pub struct SupabaseHttpClient {
    client: Client,
    config: SupabaseConfig,
}

impl SupabaseHttpClient {
    pub fn new(config: SupabaseConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::BadRequest(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &ListQuery,
    ) -> Result<Vec<T>, FetchError> {
        let url = format!(
            "{}/rest/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            table
        );

        let response = self
            .client
            .get(&url)
            .query(&query.to_query_pairs())
            .header("apikey", &self.config.anon_key)
            .header("Authorization", format!("Bearer {}", self.config.anon_key))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            // PostgREST puts the useful text in a JSON `message` field.
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or(body);
            return Err(FetchError::Upstream { status, message });
        }

        let body_text = response.text().await?;
        serde_json::from_str::<Vec<T>>(&body_text).map_err(|e| {
            tracing::error!("failed to parse rows from {}: {}", table, e);
            FetchError::from(e)
        })
    }

    /// Single-row lookup.
    async fn fetch_one<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &ListQuery,
    ) -> Result<Option<T>, FetchError> {
        let rows = self.fetch_rows::<T>(table, query).await?;
        Ok(single_row(rows))
    }
}

/// Reduce a by-id result set to its single row. Zero or multiple matches
/// are both reported as absent instead of silently picking one.
pub fn single_row<T>(mut rows: Vec<T>) -> Option<T> {
    if rows.len() == 1 { rows.pop() } else { None }
}

#[async_trait]
impl SupabaseClient for SupabaseHttpClient {
    async fn fetch_subjects(&self) -> Result<Vec<Subject>, FetchError> {
        let query = ListQuery {
            visible_only: true,
            order_by: Some("sort_order"),
            ..Default::default()
        };
        self.fetch_rows("subjects", &query).await
    }

    async fn fetch_subject_by_id(&self, id: &str) -> Result<Option<Subject>, FetchError> {
        self.fetch_one("subjects", &ListQuery::by_id(id)).await
    }

    async fn fetch_courses_by_subject(&self, subject_id: &str) -> Result<Vec<Course>, FetchError> {
        let query = ListQuery {
            parent: Some(("subject_id", subject_id.to_string())),
            ..Default::default()
        };
        self.fetch_rows("courses", &query).await
    }

    async fn fetch_course_by_id(&self, id: &str) -> Result<Option<Course>, FetchError> {
        self.fetch_one("courses", &ListQuery::by_id(id)).await
    }

    async fn fetch_course_tools(&self, course_id: &str) -> Result<Vec<CourseTool>, FetchError> {
        let query = ListQuery {
            parent: Some(("course_id", course_id.to_string())),
            order_by: Some("sort_order"),
            ..Default::default()
        };
        self.fetch_rows("course_tools", &query).await
    }

    async fn fetch_assignments_by_course(
        &self,
        course_id: &str,
    ) -> Result<Vec<Assignment>, FetchError> {
        let query = ListQuery {
            parent: Some(("course_id", course_id.to_string())),
            visible_only: true,
            order_by: Some("sort_order"),
            ..Default::default()
        };
        self.fetch_rows("assignments", &query).await
    }

    async fn fetch_profile(&self) -> Result<Option<Profile>, FetchError> {
        self.fetch_one("profile", &ListQuery::default()).await
    }

    async fn fetch_social_links(&self) -> Result<Vec<SocialLink>, FetchError> {
        let query = ListQuery {
            visible_only: true,
            order_by: Some("sort_order"),
            ..Default::default()
        };
        self.fetch_rows("social_links", &query).await
    }

    async fn fetch_activities(&self) -> Result<Vec<Activity>, FetchError> {
        let query = ListQuery {
            visible_only: true,
            order_by: Some("sort_order"),
            ..Default::default()
        };
        self.fetch_rows("activities", &query).await
    }
}

/// Client that sees an empty portfolio. Useful as a stand-in where no
/// Supabase project is configured.
pub struct NoopSupabaseClient;

#[async_trait]
impl SupabaseClient for NoopSupabaseClient {
    async fn fetch_subjects(&self) -> Result<Vec<Subject>, FetchError> {
        Ok(Vec::new())
    }

    async fn fetch_subject_by_id(&self, _id: &str) -> Result<Option<Subject>, FetchError> {
        Ok(None)
    }

    async fn fetch_courses_by_subject(&self, _subject_id: &str) -> Result<Vec<Course>, FetchError> {
        Ok(Vec::new())
    }

    async fn fetch_course_by_id(&self, _id: &str) -> Result<Option<Course>, FetchError> {
        Ok(None)
    }

    async fn fetch_course_tools(&self, _course_id: &str) -> Result<Vec<CourseTool>, FetchError> {
        Ok(Vec::new())
    }

    async fn fetch_assignments_by_course(
        &self,
        _course_id: &str,
    ) -> Result<Vec<Assignment>, FetchError> {
        Ok(Vec::new())
    }

    async fn fetch_profile(&self) -> Result<Option<Profile>, FetchError> {
        Ok(None)
    }

    async fn fetch_social_links(&self) -> Result<Vec<SocialLink>, FetchError> {
        Ok(Vec::new())
    }

    async fn fetch_activities(&self) -> Result<Vec<Activity>, FetchError> {
        Ok(Vec::new())
    }
}
