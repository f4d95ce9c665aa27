use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Incoming directory is set
/// - Timeouts are non-zero
/// - Pagination limits are consistent
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.library.incoming_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "library.incoming_dir cannot be empty".to_string(),
        ));
    }

    if config.library.scan_timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "library.scan_timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.transmission.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "transmission.timeout_secs cannot be 0".to_string(),
        ));
    }

    let pagination = &config.pagination;
    if pagination.default_limit == 0 || pagination.max_limit == 0 {
        return Err(ConfigError::ValidationError(
            "pagination limits cannot be 0".to_string(),
        ));
    }
    if pagination.default_limit > pagination.max_limit {
        return Err(ConfigError::ValidationError(format!(
            "pagination.default_limit ({}) exceeds pagination.max_limit ({})",
            pagination.default_limit, pagination.max_limit
        )));
    }

    Ok(())
}
