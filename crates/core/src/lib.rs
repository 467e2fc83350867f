//! Pure domain logic for the booking sync service.
//!
//! This crate has no async I/O so the same rules can be exercised by the
//! webhook handler, the CMS editing widget endpoint, and unit tests without
//! any infrastructure.

pub mod availability;
pub mod booking;
pub mod signature;
