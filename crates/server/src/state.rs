use std::sync::Arc;

use service::student::{StudentRepository, StudentService};

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub students: StudentService<dyn StudentRepository>,
}

impl AppState {
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self {
        Self { students: StudentService::new(repo) }
    }
}
