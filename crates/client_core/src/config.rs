use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::error::SettingsError;

pub const DEFAULT_SETTINGS_FILE: &str = "simcheck.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_url: String,
    pub submit_path: String,
    pub poll_path: String,
    pub processing_delay: Duration,
    pub transport_retry_delay: Duration,
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            submit_path: "/check".into(),
            poll_path: "/results".into(),
            processing_delay: Duration::from_millis(2000),
            transport_retry_delay: Duration::from_millis(3000),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Settings {
    pub fn submit_url(&self) -> Result<Url, SettingsError> {
        self.endpoint(&self.submit_path)
    }

    pub fn poll_url(&self) -> Result<Url, SettingsError> {
        self.endpoint(&self.poll_path)
    }

    fn endpoint(&self, path: &str) -> Result<Url, SettingsError> {
        let invalid = |source| SettingsError::InvalidServerUrl {
            url: self.server_url.clone(),
            source,
        };
        let base = Url::parse(self.server_url.trim()).map_err(invalid)?;
        base.join(path).map_err(invalid)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    submit_path: Option<String>,
    poll_path: Option<String>,
    processing_delay_ms: Option<u64>,
    transport_retry_delay_ms: Option<u64>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then the settings file, then environment overrides.
///
/// An explicitly named file must exist; the default file is optional.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    let mut settings = Settings::default();

    let (path, required) = match path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_SETTINGS_FILE), false),
    };
    match fs::read_to_string(path) {
        Ok(raw) => apply_file_settings(&mut settings, &raw, path)?,
        Err(source) if required => {
            return Err(SettingsError::Read {
                path: path.display().to_string(),
                source,
            })
        }
        Err(_) => {}
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok())?;
    settings.submit_url()?;
    settings.poll_url()?;
    Ok(settings)
}

fn apply_file_settings(
    settings: &mut Settings,
    raw: &str,
    path: &Path,
) -> Result<(), SettingsError> {
    let file_cfg: FileSettings = toml::from_str(raw).map_err(|source| SettingsError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.submit_path {
        settings.submit_path = v;
    }
    if let Some(v) = file_cfg.poll_path {
        settings.poll_path = v;
    }
    if let Some(v) = file_cfg.processing_delay_ms {
        settings.processing_delay = Duration::from_millis(v);
    }
    if let Some(v) = file_cfg.transport_retry_delay_ms {
        settings.transport_retry_delay = Duration::from_millis(v);
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout = Duration::from_secs(v);
    }
    Ok(())
}

pub(crate) fn apply_env_overrides(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), SettingsError> {
    if let Some(v) = lookup("SIMCHECK_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__SUBMIT_PATH") {
        settings.submit_path = v;
    }
    if let Some(v) = lookup("APP__POLL_PATH") {
        settings.poll_path = v;
    }
    if let Some(v) = lookup("APP__PROCESSING_DELAY_MS") {
        settings.processing_delay = Duration::from_millis(parse_u64("APP__PROCESSING_DELAY_MS", v)?);
    }
    if let Some(v) = lookup("APP__TRANSPORT_RETRY_DELAY_MS") {
        settings.transport_retry_delay =
            Duration::from_millis(parse_u64("APP__TRANSPORT_RETRY_DELAY_MS", v)?);
    }
    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        settings.request_timeout = Duration::from_secs(parse_u64("APP__REQUEST_TIMEOUT_SECS", v)?);
    }
    Ok(())
}

fn parse_u64(key: &'static str, value: String) -> Result<u64, SettingsError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| SettingsError::InvalidValue { key, value })
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
