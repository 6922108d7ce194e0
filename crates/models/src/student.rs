use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Identifier assigned by the repository on save.
pub type StudentId = i64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

/// A student record. `id` stays `None` until a repository persists it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(default)]
    pub id: Option<StudentId>,
    pub name: String,
    pub email: String,
    pub gender: Gender,
}

impl Student {
    pub fn new(name: impl Into<String>, email: impl Into<String>, gender: Gender) -> Self {
        Self { id: None, name: name.into(), email: email.into(), gender }
    }

    /// Copy of this student carrying the given id.
    pub fn with_id(mut self, id: StudentId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Creation payload: no id, the repository generates one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub gender: Gender,
}

impl NewStudent {
    /// Validate the payload and turn it into an unsaved `Student`.
    pub fn into_student(self) -> Result<Student, ModelError> {
        validate_name(&self.name)?;
        validate_email(&self.email)?;
        Ok(Student::new(self.name, self.email, self.gender))
    }
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.trim().is_empty() && !domain.trim().is_empty() => Ok(()),
        _ => Err(ModelError::Validation("invalid email".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_serializes_uppercase() {
        let s = Student::new("John", "john@gmail.com", Gender::Male);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["gender"], "MALE");
        assert!(json["id"].is_null());

        let back: Student = serde_json::from_str(r#"{"name":"Jane","email":"jane@gmail.com","gender":"FEMALE"}"#).unwrap();
        assert_eq!(back.gender, Gender::Female);
        assert_eq!(back.id, None);
    }

    #[test]
    fn new_student_validation() {
        let ok = NewStudent { name: "John".into(), email: "john@gmail.com".into(), gender: Gender::Male };
        let student = ok.into_student().unwrap();
        assert_eq!(student, Student::new("John", "john@gmail.com", Gender::Male));

        let blank = NewStudent { name: "  ".into(), email: "john@gmail.com".into(), gender: Gender::Male };
        assert_eq!(blank.into_student(), Err(ModelError::Validation("name required".into())));

        for bad in ["john", "@gmail.com", "john@", "a@b@c"] {
            let input = NewStudent { name: "John".into(), email: bad.into(), gender: Gender::Male };
            assert!(matches!(input.into_student(), Err(ModelError::Validation(_))), "{bad} should be rejected");
        }
    }
}
