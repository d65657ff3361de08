//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep command-line and other surfaces decoupled from storage details.

pub mod activity_service;
pub mod admin_service;
pub mod place_service;
pub mod source_service;
