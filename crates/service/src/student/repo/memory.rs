use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use models::student::{Student, StudentId};

use crate::errors::ServiceError;
use crate::student::repository::StudentRepository;

/// Process-local repository. Ids come from a sequence starting at 1.
pub struct InMemoryStudentRepository {
    students: DashMap<StudentId, Student>,
    next_id: AtomicI64,
}

impl Default for InMemoryStudentRepository {
    fn default() -> Self {
        Self { students: DashMap::new(), next_id: AtomicI64::new(1) }
    }
}

impl InMemoryStudentRepository {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn find_all(&self) -> Result<Vec<Student>, ServiceError> {
        let mut all: Vec<Student> = self.students.iter().map(|e| e.value().clone()).collect();
        all.sort_by_key(|s| s.id);
        Ok(all)
    }

    async fn save(&self, student: Student) -> Result<Student, ServiceError> {
        let id = match student.id {
            Some(id) => {
                let next = id.checked_add(1).ok_or_else(ServiceError::id_space_exhausted)?;
                self.next_id.fetch_max(next, Ordering::SeqCst);
                id
            }
            None => self
                .next_id
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
                .map_err(|_| ServiceError::id_space_exhausted())?,
        };
        let saved = student.with_id(id);
        self.students.insert(id, saved.clone());
        Ok(saved)
    }

    async fn exists_by_id(&self, id: StudentId) -> Result<bool, ServiceError> {
        Ok(self.students.contains_key(&id))
    }

    async fn delete_by_id(&self, id: StudentId) -> Result<(), ServiceError> {
        self.students.remove(&id);
        Ok(())
    }

    async fn select_exists_email(&self, email: &str) -> Result<bool, ServiceError> {
        Ok(self.students.iter().any(|e| e.value().email == email))
    }
}
