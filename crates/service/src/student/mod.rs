//! Student module: repository abstraction, backends and the business service.

pub mod repo;
pub mod repository;
pub mod service;

pub use repository::StudentRepository;
pub use service::StudentService;
