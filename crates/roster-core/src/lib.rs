//! Domain layer for Roster.
//!
//! Holds the client/session model, the store contract, configuration types
//! and the front-end independent view state.

pub mod client;
pub mod config;
pub mod error;
pub mod view;

// Re-export common error type
pub use error::RosterError;
