//! Concrete `StudentRepository` backends.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStudentRepository;
pub use memory::InMemoryStudentRepository;
