//! Application layer for Roster.
//!
//! This crate provides the interaction flows that coordinate the view state
//! from `roster-core` with a client store.

pub mod client_usecase;

pub use client_usecase::{AdminFields, ClientPage, ClientUseCase, PendingDrafts, RequestFields};
