use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;
use client_core::RemoteSettings;
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "desktop.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub auth_token: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "https://mesto.nomoreparties.co/v1/cohort-42".into(),
            auth_token: None,
        }
    }
}

/// Defaults, then `path` (if readable), then environment.
pub fn load_settings(path: &Path) -> Settings {
    let raw = fs::read_to_string(path).ok();
    settings_from(raw.as_deref(), |key| std::env::var(key).ok())
}

fn settings_from(raw_file: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = raw_file {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
            if let Some(v) = file_cfg.get("base_url") {
                settings.base_url = v.clone();
            }
            if let Some(v) = file_cfg.get("auth_token") {
                settings.auth_token = Some(v.clone());
            }
        }
    }

    if let Some(v) = env("MESTO_BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = env("APP__BASE_URL") {
        settings.base_url = v;
    }

    if let Some(v) = env("MESTO_TOKEN") {
        settings.auth_token = Some(v);
    }
    if let Some(v) = env("APP__AUTH_TOKEN") {
        settings.auth_token = Some(v);
    }

    settings
}

/// `None` when no token is configured; the session then runs without a service.
pub fn remote_settings(settings: &Settings) -> anyhow::Result<Option<RemoteSettings>> {
    let Some(token) = settings
        .auth_token
        .as_deref()
        .map(str::trim)
        .filter(|token| !token.is_empty())
    else {
        return Ok(None);
    };

    let base_url = Url::parse(settings.base_url.trim())
        .with_context(|| format!("invalid base url '{}'", settings.base_url))?;
    if !matches!(base_url.scheme(), "http" | "https") {
        anyhow::bail!("base url '{base_url}' must use http or https");
    }

    Ok(Some(RemoteSettings::new(base_url, token)))
}
