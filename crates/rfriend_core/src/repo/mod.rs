//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define data access contracts for records, link tables and activities.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes must run `Validate::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`,
//!   `ForeignKeyViolation`) in addition to DB transport errors.

pub mod activity_repo;
mod administrative_records;
mod conclusion_records;
mod evidence_records;
pub mod link_repo;
pub mod record_repo;
