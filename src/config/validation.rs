use crate::config::types::{
    BatchConfig, Config, FetcherConfig, OutputConfig, PhotoEngine, PhotosConfig, PlatformConfig,
};
use crate::platform::Platform;
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    for platform in Platform::ALL {
        validate_platform_config(platform, config.platforms.get(platform))?;
    }
    validate_fetcher_config(&config.fetcher)?;
    validate_photos_config(&config.photos)?;
    validate_output_config(&config.output)?;
    validate_batch_config(&config.batch)?;
    Ok(())
}

/// Validates rate limit and domain list of one platform
fn validate_platform_config(platform: Platform, config: &PlatformConfig) -> Result<(), ConfigError> {
    if !config.rate_limit.is_finite() || config.rate_limit <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "{} rate-limit must be a positive number, got {}",
            platform.key(),
            config.rate_limit
        )));
    }

    if let Some(burst) = config.burst {
        if !burst.is_finite() || burst < 1.0 {
            return Err(ConfigError::Validation(format!(
                "{} burst must be >= 1, got {}",
                platform.key(),
                burst
            )));
        }
    }

    if config.domains.is_empty() {
        return Err(ConfigError::Validation(format!(
            "{} must accept at least one domain",
            platform.key()
        )));
    }

    for domain in &config.domains {
        validate_domain_string(domain)?;
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(
            "request-timeout must be >= 1 second".to_string(),
        ));
    }

    if config.max_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "max-retries must be at most 10, got {}",
            config.max_retries
        )));
    }

    if !config.backoff_factor.is_finite() || config.backoff_factor < 0.0 {
        return Err(ConfigError::Validation(format!(
            "backoff-factor must be >= 0, got {}",
            config.backoff_factor
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates photo configuration
fn validate_photos_config(config: &PhotosConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "photos directory cannot be empty".to_string(),
        ));
    }

    if !(1..=100).contains(&config.quality) {
        return Err(ConfigError::Validation(format!(
            "photo quality must be between 1 and 100, got {}",
            config.quality
        )));
    }

    if config.engine == PhotoEngine::Browser && !cfg!(feature = "browser") {
        return Err(ConfigError::Validation(
            "photo engine \"browser\" requires building with the `browser` feature".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates batch limits
fn validate_batch_config(config: &BatchConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_rows < 1 || config.max_concurrent_rows > 64 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-rows must be between 1 and 64, got {}",
            config.max_concurrent_rows
        )));
    }

    if config.max_file_size_mb < 1 {
        return Err(ConfigError::Validation(
            "max-file-size-mb must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Checks that `domain` is a bare host name with at least two labels
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return Err(ConfigError::InvalidDomain(format!(
            "'{domain}' is not a host name (expected something like 'github.com')"
        )));
    }

    let label_ok = |label: &str| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    };
    if let Some(bad) = labels.iter().find(|label| !label_ok(label)) {
        return Err(ConfigError::InvalidDomain(format!(
            "'{domain}' has an invalid label '{bad}'"
        )));
    }

    Ok(())
}
