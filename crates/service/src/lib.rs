//! Service layer holding the student business rules.
//! - Separates validation and orchestration from storage.
//! - Storage is reached through the `StudentRepository` trait.
//! - Ships in-memory and JSON-file repository backends.

pub mod errors;
pub mod storage;
pub mod student;
