use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use roster_application::ClientUseCase;
use roster_core::client::ClientRepository;
use roster_infrastructure::{ConfigService, JsonClientRepository};

use crate::app::AppState;

pub struct AppBootstrap {
    pub app_state: AppState,
}

impl AppBootstrap {
    /// Wires the store and use case, then makes sure the roster document
    /// exists.
    ///
    /// The data directory comes from, in order: the `--data-dir` flag (or
    /// `ROSTER_DATA_DIR`), `data_dir` in config.toml, the platform default.
    pub async fn initialize(
        config_service: ConfigService,
        data_dir_override: Option<PathBuf>,
    ) -> Result<Self> {
        let config = config_service.get_config();
        let data_dir = data_dir_override.or(config.data_dir);

        let repository = JsonClientRepository::new(data_dir.as_deref())
            .context("Failed to resolve the roster location")?;
        repository
            .initialize()
            .await
            .with_context(|| {
                format!(
                    "Failed to initialize roster at {}",
                    repository.database_path().display()
                )
            })?;

        tracing::info!(
            "[Bootstrap] Roster ready at {}",
            repository.database_path().display()
        );

        let client_repository: Arc<dyn ClientRepository> = Arc::new(repository);
        let client_usecase = Arc::new(ClientUseCase::new(client_repository.clone()));

        Ok(Self {
            app_state: AppState {
                client_repository,
                client_usecase,
                config_service: Arc::new(config_service),
            },
        })
    }
}
