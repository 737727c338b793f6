use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub subject_id: String,
    pub name: String,
    pub description: String,
    pub term: Option<String>,
    pub assignment_count: Option<i32>,
}

impl Course {
    pub fn assignment_count(&self) -> i32 {
        self.assignment_count.unwrap_or(0)
    }
}

/// One tool tag attached to a course ("Python", "R", ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseTool {
    pub id: String,
    pub course_id: String,
    pub tool: String,
    pub sort_order: Option<i32>,
}

impl CourseTool {
    pub fn sort_key(&self) -> i32 {
        self.sort_order.unwrap_or(0)
    }
}
