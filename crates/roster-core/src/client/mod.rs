//! Client domain module.
//!
//! # Module Structure
//!
//! - `model`: `Client`, `Session`, the status/therapy enums and the typed
//!   create/update payloads
//! - `repository`: the `ClientRepository` store contract

mod model;
pub mod repository;

pub use model::{
    Client, ClientStatus, ClientUpdate, NewClient, NewSession, Session, SessionUpdate, Therapy,
};

pub use repository::ClientRepository;
