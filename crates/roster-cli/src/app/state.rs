use std::sync::Arc;

use roster_application::ClientUseCase;
use roster_core::client::ClientRepository;
use roster_infrastructure::ConfigService;

/// Application state shared across command handlers.
pub struct AppState {
    pub client_repository: Arc<dyn ClientRepository>,
    pub client_usecase: Arc<ClientUseCase>,
    pub config_service: Arc<ConfigService>,
}
