//! Repository modules implementing store operations for all Scrud entities.
//!
//! Each module adds methods to `ScrudService` via `impl ScrudService` blocks.

pub mod auth;
pub mod course;
pub mod enrollment;
pub mod student;
pub mod teacher;
