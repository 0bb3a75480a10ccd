//! Application configuration loaded from environment variables.
//!
//! - `GEMSHOP_API_URL`: gateway base URL (default `http://localhost:8080/api`)
//! - `GEMSHOP_TIMEOUT_SECS`: per-request timeout in seconds (default 10)
//! - `GEMSHOP_SESSION_FILE`: store the session in this JSON file instead of
//!   the system keychain
//! - `GEMSHOP_LOG_FILE`: tracing output file (default `gemshop.log`)
//! - `GEMSHOP_CA_CERT`: extra PEM root certificate for self-hosted gateways

use std::path::PathBuf;
use std::time::Duration;

/// Default gateway endpoint used by the storefront backend in development.
const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default log file, relative to the working directory.
const DEFAULT_LOG_FILE: &str = "gemshop.log";

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub gateway: GatewayConfig,
    /// Session file path; `None` selects the system keychain.
    pub session_file: Option<PathBuf>,
    pub log_file: PathBuf,
}

/// Gateway connection settings.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub ca_cert: Option<PathBuf>,
}

impl GatewayConfig {
    /// Settings for a gateway at `base_url` with default timeout and trust roots.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            ca_cert: None,
        }
    }
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`GemshopError::Config`](crate::GemshopError::Config) if
/// `GEMSHOP_TIMEOUT_SECS` is not a positive integer or `GEMSHOP_API_URL`
/// is not an http(s) URL.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let base_url =
        non_empty_var("GEMSHOP_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(crate::GemshopError::Config(format!(
            "GEMSHOP_API_URL must be an http(s) URL, got {base_url}"
        )));
    }

    let timeout = match non_empty_var("GEMSHOP_TIMEOUT_SECS") {
        Some(raw) => match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                return Err(crate::GemshopError::Config(format!(
                    "GEMSHOP_TIMEOUT_SECS must be a positive integer, got {raw}"
                )));
            }
        },
        None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    };

    Ok(AppConfig {
        gateway: GatewayConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            ca_cert: non_empty_var("GEMSHOP_CA_CERT").map(PathBuf::from),
        },
        session_file: non_empty_var("GEMSHOP_SESSION_FILE").map(PathBuf::from),
        log_file: non_empty_var("GEMSHOP_LOG_FILE")
            .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from),
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Serializes tests that touch the process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ALL_VARS: [&str; 5] = [
        "GEMSHOP_API_URL",
        "GEMSHOP_TIMEOUT_SECS",
        "GEMSHOP_SESSION_FILE",
        "GEMSHOP_LOG_FILE",
        "GEMSHOP_CA_CERT",
    ];

    /// Helper that clears every gemshop variable, applies `vars`, runs `f`,
    /// then restores the originals.
    fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let originals: Vec<(&str, Option<String>)> = ALL_VARS
            .iter()
            .map(|k| (*k, std::env::var(k).ok()))
            .collect();

        // SAFETY: every test touching these variables holds ENV_LOCK.
        unsafe {
            for k in ALL_VARS {
                std::env::remove_var(k);
            }
            for (k, v) in vars {
                std::env::set_var(k, v);
            }
        }

        f();

        for (k, original) in originals {
            // SAFETY: restoring original values under the same lock.
            unsafe {
                match original {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn defaults_without_env_vars() {
        with_env(&[], || {
            let config = fetch_config().unwrap();
            assert_eq!(config.gateway.base_url, DEFAULT_API_URL);
            assert_eq!(config.gateway.timeout, Duration::from_secs(10));
            assert!(config.gateway.ca_cert.is_none());
            assert!(config.session_file.is_none());
            assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        });
    }

    #[test]
    fn custom_api_url_drops_trailing_slash() {
        with_env(&[("GEMSHOP_API_URL", "https://shop.example.com/api/")], || {
            let config = fetch_config().unwrap();
            assert_eq!(config.gateway.base_url, "https://shop.example.com/api");
        });
    }

    #[test]
    fn rejects_non_http_url() {
        with_env(&[("GEMSHOP_API_URL", "ftp://shop.example.com")], || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("GEMSHOP_API_URL"));
        });
    }

    #[test]
    fn parses_timeout() {
        with_env(&[("GEMSHOP_TIMEOUT_SECS", "30")], || {
            let config = fetch_config().unwrap();
            assert_eq!(config.gateway.timeout, Duration::from_secs(30));
        });
    }

    #[test]
    fn rejects_zero_or_garbage_timeout() {
        for raw in ["0", "soon", "-3"] {
            with_env(&[("GEMSHOP_TIMEOUT_SECS", raw)], || {
                let err = fetch_config().unwrap_err();
                assert!(err.to_string().contains("positive integer"), "{raw}");
            });
        }
    }

    #[test]
    fn session_file_selects_file_store() {
        with_env(&[("GEMSHOP_SESSION_FILE", "/tmp/gemshop-session.json")], || {
            let config = fetch_config().unwrap();
            assert_eq!(
                config.session_file,
                Some(PathBuf::from("/tmp/gemshop-session.json"))
            );
        });
    }

    #[test]
    fn empty_values_treated_as_absent() {
        with_env(
            &[
                ("GEMSHOP_API_URL", ""),
                ("GEMSHOP_TIMEOUT_SECS", ""),
                ("GEMSHOP_SESSION_FILE", ""),
                ("GEMSHOP_LOG_FILE", ""),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.gateway.base_url, DEFAULT_API_URL);
                assert!(config.session_file.is_none());
                assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_FILE));
            },
        );
    }
}
