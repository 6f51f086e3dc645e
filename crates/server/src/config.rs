use std::{collections::HashMap, fs};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_password: String,
    /// Sender mailbox; falls back to `smtp_user` when empty.
    pub smtp_from: String,
    pub owner_email: String,
    pub owner_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:5500".into(),
            smtp_host: "smtp.gmail.com".into(),
            smtp_port: 587,
            smtp_user: String::new(),
            smtp_password: String::new(),
            smtp_from: String::new(),
            owner_email: "owner@example.com".into(),
            owner_name: "Portfolio Owner".into(),
        }
    }
}

/// Defaults, overlaid by an optional `server.toml`, overlaid by
/// environment variables.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings);

    settings
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
        return;
    };
    if let Some(v) = file_cfg.get("bind_addr") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = file_cfg.get("smtp_host") {
        settings.smtp_host = v.clone();
    }
    if let Some(v) = file_cfg.get("smtp_port") {
        apply_port(settings, v);
    }
    if let Some(v) = file_cfg.get("smtp_user") {
        settings.smtp_user = v.clone();
    }
    if let Some(v) = file_cfg.get("smtp_password") {
        settings.smtp_password = v.clone();
    }
    if let Some(v) = file_cfg.get("smtp_from") {
        settings.smtp_from = v.clone();
    }
    if let Some(v) = file_cfg.get("owner_email") {
        settings.owner_email = v.clone();
    }
    if let Some(v) = file_cfg.get("owner_name") {
        settings.owner_name = v.clone();
    }
}

fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(v) = std::env::var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Ok(v) = std::env::var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Ok(v) = std::env::var("SMTP_HOST") {
        settings.smtp_host = v;
    }
    if let Ok(v) = std::env::var("APP__SMTP_HOST") {
        settings.smtp_host = v;
    }

    if let Ok(v) = std::env::var("SMTP_PORT") {
        apply_port(settings, &v);
    }
    if let Ok(v) = std::env::var("APP__SMTP_PORT") {
        apply_port(settings, &v);
    }

    if let Ok(v) = std::env::var("SMTP_USER") {
        settings.smtp_user = v;
    }
    if let Ok(v) = std::env::var("APP__SMTP_USER") {
        settings.smtp_user = v;
    }

    if let Ok(v) = std::env::var("SMTP_PASSWORD") {
        settings.smtp_password = v;
    }
    if let Ok(v) = std::env::var("APP__SMTP_PASSWORD") {
        settings.smtp_password = v;
    }

    if let Ok(v) = std::env::var("SMTP_FROM") {
        settings.smtp_from = v;
    }
    if let Ok(v) = std::env::var("APP__SMTP_FROM") {
        settings.smtp_from = v;
    }

    if let Ok(v) = std::env::var("OWNER_EMAIL") {
        settings.owner_email = v;
    }
    if let Ok(v) = std::env::var("APP__OWNER_EMAIL") {
        settings.owner_email = v;
    }

    if let Ok(v) = std::env::var("OWNER_NAME") {
        settings.owner_name = v;
    }
    if let Ok(v) = std::env::var("APP__OWNER_NAME") {
        settings.owner_name = v;
    }
}

/// Unparsable port values are ignored rather than fatal.
fn apply_port(settings: &mut Settings, raw: &str) {
    if let Ok(parsed) = raw.trim().parse::<u16>() {
        settings.smtp_port = parsed;
    }
}
