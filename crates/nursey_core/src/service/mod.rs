//! Core use-case services.
//!
//! # Responsibility
//! - Drive the per-command cycle over the versioned book.
//! - Keep command/UI layers decoupled from model and storage details.

pub mod book_service;
