use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: String,
    pub github_link: Option<String>,
    pub sort_order: Option<i32>,
    pub is_visible: bool,
}

impl Assignment {
    pub fn sort_key(&self) -> i32 {
        self.sort_order.unwrap_or(0)
    }
}
