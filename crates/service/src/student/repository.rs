use async_trait::async_trait;
use models::student::{Student, StudentId};

use crate::errors::ServiceError;

/// Storage collaborator behind `StudentService`.
///
/// Implementations own all state. Their faults come back as
/// `ServiceError::Repository` and are passed through by the service untouched.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Student>, ServiceError>;
    /// Persist a student, assigning an id when it has none.
    async fn save(&self, student: Student) -> Result<Student, ServiceError>;
    async fn exists_by_id(&self, id: StudentId) -> Result<bool, ServiceError>;
    async fn delete_by_id(&self, id: StudentId) -> Result<(), ServiceError>;
    async fn select_exists_email(&self, email: &str) -> Result<bool, ServiceError>;
}

/// Recording test double for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    #[derive(Default, Debug, Clone)]
    struct Calls {
        find_all: usize,
        saved: Vec<Student>,
        deleted: Vec<StudentId>,
        email_checks: Vec<String>,
        id_checks: Vec<StudentId>,
    }

    /// Answers are fixed up front; every call is recorded for later inspection.
    /// Unstubbed lookups answer `false`.
    #[derive(Default)]
    pub struct RecordingStudentRepository {
        students: Vec<Student>,
        email_taken: bool,
        id_exists: bool,
        failure: Option<String>,
        calls: Mutex<Calls>,
    }

    impl RecordingStudentRepository {
        pub fn new() -> Self { Self::default() }

        pub fn with_students(mut self, students: Vec<Student>) -> Self {
            self.students = students;
            self
        }

        pub fn with_email_taken(mut self, taken: bool) -> Self {
            self.email_taken = taken;
            self
        }

        pub fn with_existing_id(mut self, exists: bool) -> Self {
            self.id_exists = exists;
            self
        }

        /// Every call fails with `ServiceError::Repository(reason)`.
        pub fn failing(mut self, reason: impl Into<String>) -> Self {
            self.failure = Some(reason.into());
            self
        }

        pub fn find_all_calls(&self) -> usize { self.calls().find_all }
        pub fn saved(&self) -> Vec<Student> { self.calls().saved.clone() }
        pub fn deleted(&self) -> Vec<StudentId> { self.calls().deleted.clone() }
        pub fn email_checks(&self) -> Vec<String> { self.calls().email_checks.clone() }
        pub fn id_checks(&self) -> Vec<StudentId> { self.calls().id_checks.clone() }

        fn calls(&self) -> MutexGuard<'_, Calls> {
            self.calls.lock().unwrap_or_else(PoisonError::into_inner)
        }

        fn check_failure(&self) -> Result<(), ServiceError> {
            match &self.failure {
                Some(reason) => Err(ServiceError::Repository(reason.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl StudentRepository for RecordingStudentRepository {
        async fn find_all(&self) -> Result<Vec<Student>, ServiceError> {
            self.calls().find_all += 1;
            self.check_failure()?;
            Ok(self.students.clone())
        }

        async fn save(&self, student: Student) -> Result<Student, ServiceError> {
            self.calls().saved.push(student.clone());
            self.check_failure()?;
            Ok(student)
        }

        async fn exists_by_id(&self, id: StudentId) -> Result<bool, ServiceError> {
            self.calls().id_checks.push(id);
            self.check_failure()?;
            Ok(self.id_exists)
        }

        async fn delete_by_id(&self, id: StudentId) -> Result<(), ServiceError> {
            self.calls().deleted.push(id);
            self.check_failure()
        }

        async fn select_exists_email(&self, email: &str) -> Result<bool, ServiceError> {
            self.calls().email_checks.push(email.to_string());
            self.check_failure()?;
            Ok(self.email_taken)
        }
    }
}
