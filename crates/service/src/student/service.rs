use std::sync::Arc;

use models::student::{Student, StudentId};
use tracing::{debug, info, instrument, warn};

use super::repository::StudentRepository;
use crate::errors::ServiceError;

/// Student business service independent of web framework and storage.
pub struct StudentService<R: StudentRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: StudentRepository + ?Sized> Clone for StudentService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

impl<R: StudentRepository + ?Sized> StudentService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Everything the repository holds, as returned by it.
    #[instrument(skip(self))]
    pub async fn get_all_students(&self) -> Result<Vec<Student>, ServiceError> {
        let students = self.repo.find_all().await?;
        debug!(count = students.len(), "students_listed");
        Ok(students)
    }

    /// Save a student whose email is not registered yet.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::student::{Gender, Student};
    /// use service::student::{repository::mock::RecordingStudentRepository, StudentService};
    ///
    /// let repo = Arc::new(RecordingStudentRepository::new().with_email_taken(true));
    /// let svc = StudentService::new(repo.clone());
    /// let student = Student::new("John", "john@gmail.com", Gender::Male);
    /// let err = tokio_test::block_on(svc.add_student(student)).unwrap_err();
    /// assert_eq!(err.to_string(), "Email john@gmail.com taken");
    /// assert!(repo.saved().is_empty());
    /// ```
    #[instrument(skip(self, student), fields(email = %student.email))]
    pub async fn add_student(&self, student: Student) -> Result<Student, ServiceError> {
        if self.repo.select_exists_email(&student.email).await? {
            warn!("email_taken");
            return Err(ServiceError::email_taken(&student.email));
        }
        let saved = self.repo.save(student).await?;
        info!(student_id = ?saved.id, email = %saved.email, "student_added");
        Ok(saved)
    }

    /// Delete an existing student by id.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::student::{repository::mock::RecordingStudentRepository, StudentService};
    ///
    /// let repo = Arc::new(RecordingStudentRepository::new().with_existing_id(true));
    /// let svc = StudentService::new(repo.clone());
    /// tokio_test::block_on(svc.delete_student(1)).unwrap();
    /// assert_eq!(repo.deleted(), vec![1]);
    /// ```
    #[instrument(skip(self))]
    pub async fn delete_student(&self, id: StudentId) -> Result<(), ServiceError> {
        if !self.repo.exists_by_id(id).await? {
            warn!("student_not_found");
            return Err(ServiceError::student_not_found(id));
        }
        self.repo.delete_by_id(id).await?;
        info!(student_id = id, "student_deleted");
        Ok(())
    }
}
