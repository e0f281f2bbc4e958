//! # scrud-core
//!
//! Core types and pure derivations for Scrud.
//!
//! This crate provides the foundational types shared across all Scrud crates:
//! - Entity structs for students, teachers, courses, and enrollments
//! - Gender, role, and entity-type enums
//! - ID prefix constants
//! - Cross-cutting error types
//! - The credit-weighted grade aggregator (`grading`)
//! - The course availability resolver (`availability`)
//! - CLI response types

pub mod availability;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod grading;
pub mod identity;
pub mod ids;
pub mod responses;
