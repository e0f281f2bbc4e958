//! Update builder types for entity mutations.
//!
//! Each builder produces an update struct with `Option` fields. Only `Some` fields
//! generate SET clauses in the dynamic UPDATE SQL. Nullable columns use
//! `Option<Option<_>>` so "leave alone" and "clear" stay distinct.

pub mod course;
pub mod student;
pub mod teacher;
