use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
    pub course_count: Option<i32>,
    pub sort_order: Option<i32>,
}

impl Subject {
    pub fn sort_key(&self) -> i32 {
        self.sort_order.unwrap_or(0)
    }

    pub fn course_count(&self) -> i32 {
        self.course_count.unwrap_or(0)
    }
}
