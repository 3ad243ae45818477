pub mod config_service;
pub mod dto;
pub mod json_client_repository;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::json_client_repository::JsonClientRepository;
pub use crate::paths::RosterPaths;
