use models::student::StudentId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl ServiceError {
    pub fn email_taken(email: &str) -> Self { Self::BadRequest(format!("Email {} taken", email)) }

    pub fn student_not_found(id: StudentId) -> Self { Self::NotFound(format!("Student with id {} does not exists", id)) }

    pub fn id_space_exhausted() -> Self { Self::Repository("student id space exhausted".into()) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 1001,
            ServiceError::NotFound(_) => 1003,
            ServiceError::Repository(_) => 1200,
        }
    }
}
