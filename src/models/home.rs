use serde::{Deserialize, Serialize};

/// Singleton owner profile shown on the landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub full_name: String,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub id: String,
    pub label: String,
    pub url: String,
    pub icon: Option<String>,
    pub sort_order: Option<i32>,
}

impl SocialLink {
    pub fn sort_key(&self) -> i32 {
        self.sort_order.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub sort_order: Option<i32>,
}

impl Activity {
    pub fn sort_key(&self) -> i32 {
        self.sort_order.unwrap_or(0)
    }
}
