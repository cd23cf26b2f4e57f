//! Process-wide configuration, loaded from `PORCHLIGHT_*` environment
//! variables with CLI flags layered on top in `main`.

use std::path::PathBuf;
use std::time::Duration;

use crate::content::{LoadPolicy, ResolveStrategy};
use crate::notify::MailConfig;

/// Whether the content store is read once at startup or per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadPolicy {
    /// Load at startup and share the snapshot across requests.
    Cached,
    /// Re-read the file on every request.
    OnDemand,
}

impl std::str::FromStr for ReloadPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cached" => Ok(Self::Cached),
            "on-demand" => Ok(Self::OnDemand),
            other => Err(format!(
                "unknown reload policy '{other}' (expected 'cached' or 'on-demand')"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the HTTP server (from PORCHLIGHT_PORT).
    pub port: u16,
    /// Path to the content JSON file (from PORCHLIGHT_CONTENT).
    pub content_path: PathBuf,
    /// Missing/malformed-file behavior (from PORCHLIGHT_LOAD_POLICY).
    pub load_policy: LoadPolicy,
    /// Startup-snapshot vs per-request read (from PORCHLIGHT_RELOAD).
    pub reload: ReloadPolicy,
    /// Identifier strategy for detail routes (from PORCHLIGHT_RESOLVER).
    pub resolver: ResolveStrategy,
    /// Trim trailing slashes before routing (from PORCHLIGHT_TRIM_SLASHES).
    pub trim_trailing_slash: bool,
    /// SMTP settings; `None` when PORCHLIGHT_SMTP_HOST is unset, which
    /// disables the contact form's delivery step.
    pub mail: Option<MailConfig>,
}

impl Config {
    /// Load configuration from environment variables. Every field has a
    /// default except the SMTP block, which is assembled only when a host
    /// is configured.
    pub fn from_env() -> Self {
        let port = env_parsed("PORCHLIGHT_PORT").unwrap_or(3000);

        let content_path = std::env::var("PORCHLIGHT_CONTENT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("content.json"));

        // Strict by default: a missing data file should fail loudly.
        let load_policy = env_parsed("PORCHLIGHT_LOAD_POLICY").unwrap_or(LoadPolicy::Strict);
        let reload = env_parsed("PORCHLIGHT_RELOAD").unwrap_or(ReloadPolicy::OnDemand);
        let resolver = env_parsed("PORCHLIGHT_RESOLVER").unwrap_or(ResolveStrategy::TitleSlug);

        let trim_trailing_slash = std::env::var("PORCHLIGHT_TRIM_SLASHES")
            .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        Self {
            port,
            content_path,
            load_policy,
            reload,
            resolver,
            trim_trailing_slash,
            mail: mail_from_env(),
        }
    }
}

fn mail_from_env() -> Option<MailConfig> {
    let host = std::env::var("PORCHLIGHT_SMTP_HOST").ok()?;

    let username = std::env::var("PORCHLIGHT_SMTP_USERNAME").unwrap_or_default();
    let password = std::env::var("PORCHLIGHT_SMTP_PASSWORD").unwrap_or_default();
    let sender = std::env::var("PORCHLIGHT_MAIL_SENDER").unwrap_or_else(|_| username.clone());
    let recipient = std::env::var("PORCHLIGHT_MAIL_RECIPIENT").unwrap_or_else(|_| sender.clone());

    Some(MailConfig {
        port: env_parsed("PORCHLIGHT_SMTP_PORT").unwrap_or(465),
        timeout: env_parsed("PORCHLIGHT_MAIL_TIMEOUT_SECS")
            .map(Duration::from_secs)
            .unwrap_or(MailConfig::DEFAULT_TIMEOUT),
        max_attempts: env_parsed("PORCHLIGHT_MAIL_ATTEMPTS")
            .unwrap_or(MailConfig::DEFAULT_MAX_ATTEMPTS),
        host,
        username,
        password,
        sender,
        recipient,
    })
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
