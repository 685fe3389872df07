//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the repositories in `rookery_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod observation;
pub mod stats;
