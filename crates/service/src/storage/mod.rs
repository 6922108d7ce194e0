//! Storage helpers for repository backends
//!
//! Small maps persisted as JSON, for backends where a database is overkill.

pub mod json_map_store;
