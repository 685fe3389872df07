//! Domain logic for wildlife observation records.
//!
//! Everything here is pure and database-free: the error taxonomy, the fixed
//! set of survey locations, observation input validation, the shared record
//! types, and the rules for attached photos.

pub mod error;
pub mod image;
pub mod location;
pub mod models;
pub mod observation;
pub mod types;
