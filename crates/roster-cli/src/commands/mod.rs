//! Request/response handlers, one per store operation.
//!
//! Each handler takes plain data and returns plain data or an error string,
//! the same shape a webview shell would register as IPC commands.

pub mod clients;
pub mod paths;
pub mod sessions;

pub use clients::*;
pub use paths::*;
pub use sessions::*;
