//! Records and read models shared by the database layer and API clients.
//!
//! Row mapping (`sqlx::FromRow`) is only derived with the `sqlx` feature.

pub mod observation;
pub mod stats;
