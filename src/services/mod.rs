pub mod cascade;

pub use cascade::{CascadeService, CourseDetail, HomeSummary, Partial, SubjectDetail};
