use crate::app::AppState;

/// Gets the path of the roster document
pub fn get_db_path(state: &AppState) -> Result<String, String> {
    let path = state.client_repository.database_path();
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| "Database path is not valid UTF-8".to_string())
}

/// Gets the path of config.toml
pub fn get_config_path(state: &AppState) -> Result<String, String> {
    let path = state
        .config_service
        .config_path()
        .ok_or("Cannot determine the config directory")?;
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| "Config path is not valid UTF-8".to_string())
}
