//! Configuration handling for the contact form and the relay server

use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Default endpoint for the HTTP-POST transport
const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:8080/sendmail";
/// Default address the relay server listens on
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ROUTE: &str = "/sendmail";
const DEFAULT_RECIPIENT: &str = "contact@jrbindustries.com";
const DEFAULT_EMAILJS_API_URL: &str = "https://api.emailjs.com";

/// Which backend the contact form delivers through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportKind {
    /// Third-party mail relay service (EmailJS)
    RelayScript,
    /// JSON POST to the relay endpoint
    #[default]
    HttpPost,
}

impl FromStr for TransportKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relay-script" | "relay_script" | "emailjs" => Ok(Self::RelayScript),
            "http-post" | "http_post" | "http" => Ok(Self::HttpPost),
            other => Err(anyhow!("Unknown transport '{other}'")),
        }
    }
}

/// How the relay server hands mail to the outside world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MailTransportKind {
    /// The host's sendmail binary
    #[default]
    Sendmail,
    Smtp,
}

/// Credentials for the relay-script transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayScriptConfig {
    pub api_url: String,
    pub service_id: String,
    pub template_id: String,
    /// EmailJS public key, sent as `user_id`
    pub public_key: String,
    pub to_email: String,
}

impl Default for RelayScriptConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_EMAILJS_API_URL.to_string(),
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
            to_email: DEFAULT_RECIPIENT.to_string(),
        }
    }
}

/// Mail relay server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Path the relay endpoint is mounted on
    pub route: String,
    /// Recipient of every contact email
    pub mail_to: String,
    /// Fixed From address; the sender's address is used when unset
    pub mail_from: Option<String>,
    pub mail_transport: MailTransportKind,
    pub smtp_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            route: DEFAULT_ROUTE.to_string(),
            mail_to: DEFAULT_RECIPIENT.to_string(),
            mail_from: None,
            mail_transport: MailTransportKind::default(),
            smtp_url: None,
        }
    }
}

/// Configuration shared by the form client and the relay server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub transport: TransportKind,
    /// Target of the HTTP-POST transport
    pub endpoint_url: String,
    pub relay_script: RelayScriptConfig,
    pub server: ServerConfig,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            transport: TransportKind::default(),
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            relay_script: RelayScriptConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl ContactConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "jrbindustries", "jrb-contact")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: ContactConfig = serde_json::from_str(&content)?;
                tracing::debug!("Loaded config from {}", path.display());
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file, returning where it was written
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path().ok_or_else(|| anyhow!("No config directory available"))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Override values from environment-style lookups
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(kind) = lookup("JRB_TRANSPORT") {
            self.transport = kind.parse()?;
        }
        if let Some(url) = lookup("JRB_ENDPOINT_URL") {
            self.endpoint_url = url;
        }
        if let Some(addr) = lookup("JRB_BIND_ADDR") {
            self.server.bind_addr = addr;
        }
        if let Some(to) = lookup("JRB_MAIL_TO") {
            self.server.mail_to = to;
        }
        if let Some(from) = lookup("JRB_MAIL_FROM") {
            self.server.mail_from = Some(from);
        }
        if let Some(url) = lookup("JRB_SMTP_URL") {
            self.server.smtp_url = Some(url);
            self.server.mail_transport = MailTransportKind::Smtp;
        }
        if let Some(id) = lookup("EMAILJS_SERVICE_ID") {
            self.relay_script.service_id = id;
        }
        if let Some(id) = lookup("EMAILJS_TEMPLATE_ID") {
            self.relay_script.template_id = id;
        }
        if let Some(key) = lookup("EMAILJS_PUBLIC_KEY") {
            self.relay_script.public_key = key;
        }
        Ok(())
    }
}
