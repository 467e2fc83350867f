//! Request handlers.
//!
//! Each submodule provides async handler functions for one route group.
//! Handlers delegate to `packleader_core` for the domain rules and to the
//! content store for persistence, mapping errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod availability;
pub mod webhooks;
