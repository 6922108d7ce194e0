use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use models::student::{Student, StudentId};

use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;
use crate::student::repository::StudentRepository;

/// Repository persisted to a single JSON file, keyed by id.
/// New ids are one past the largest id on file.
pub struct JsonFileStudentRepository {
    store: Arc<JsonMapStore<StudentId, Student>>,
}

impl JsonFileStudentRepository {
    /// Open the data file, creating it if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let store = JsonMapStore::open(path).await?;
        Ok(Self { store })
    }
}

#[async_trait]
impl StudentRepository for JsonFileStudentRepository {
    async fn find_all(&self) -> Result<Vec<Student>, ServiceError> {
        let mut all = self.store.values().await;
        all.sort_by_key(|s| s.id);
        Ok(all)
    }

    async fn save(&self, student: Student) -> Result<Student, ServiceError> {
        self.store
            .update_map(|m| {
                let id = match student.id {
                    Some(id) => id,
                    None => m
                        .keys()
                        .max()
                        .copied()
                        .unwrap_or(0)
                        .checked_add(1)
                        .ok_or_else(ServiceError::id_space_exhausted)?,
                };
                let saved = student.with_id(id);
                m.insert(id, saved.clone());
                Ok(saved)
            })
            .await
    }

    async fn exists_by_id(&self, id: StudentId) -> Result<bool, ServiceError> {
        Ok(self.store.contains_key(&id).await)
    }

    async fn delete_by_id(&self, id: StudentId) -> Result<(), ServiceError> {
        self.store.remove(&id).await?;
        Ok(())
    }

    async fn select_exists_email(&self, email: &str) -> Result<bool, ServiceError> {
        Ok(self.store.any(|s| s.email == email).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::student::Gender;

    #[tokio::test]
    async fn students_survive_reopen() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("students_{}.json", uuid::Uuid::new_v4()));
        let repo = JsonFileStudentRepository::open(&tmp).await?;

        let john = repo.save(Student::new("John", "john@gmail.com", Gender::Male)).await?;
        let jane = repo.save(Student::new("Jane", "jane@gmail.com", Gender::Female)).await?;
        assert_eq!(john.id, Some(1));
        assert_eq!(jane.id, Some(2));
        repo.delete_by_id(1).await?;

        let reopened = JsonFileStudentRepository::open(&tmp).await?;
        assert_eq!(reopened.find_all().await?, vec![jane]);
        assert!(reopened.select_exists_email("jane@gmail.com").await?);
        assert!(!reopened.exists_by_id(1).await?);

        let next = reopened.save(Student::new("Mark", "mark@gmail.com", Gender::Male)).await?;
        assert_eq!(next.id, Some(3));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn exhausted_id_space_is_an_error() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("students_{}.json", uuid::Uuid::new_v4()));
        let repo = JsonFileStudentRepository::open(&tmp).await?;
        repo.save(Student::new("John", "john@gmail.com", Gender::Male).with_id(i64::MAX)).await?;

        let err = repo.save(Student::new("Jane", "jane@gmail.com", Gender::Female)).await.unwrap_err();
        assert_eq!(err, ServiceError::id_space_exhausted());
        assert_eq!(repo.find_all().await?.len(), 1);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
