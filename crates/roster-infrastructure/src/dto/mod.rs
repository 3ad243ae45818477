//! Data transfer objects for the persisted roster document.

mod client;

pub use client::{ClientDto, DatabaseDto, SessionDto};
