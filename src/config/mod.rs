//! Configuration module for Shade Finder
//!
//! Runtime settings come from CLI flags only. The Gemini credential is
//! entered in the UI per session and deliberately has no place here.

use std::path::PathBuf;
use tracing::warn;

/// Default bind host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port
pub const DEFAULT_PORT: u16 = 5870;

/// Resolved runtime settings
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub client_dir: PathBuf,
}

impl ServerSettings {
    pub fn new(host: String, port: u16, client_override: Option<PathBuf>) -> Self {
        Self {
            host,
            port,
            client_dir: resolve_client_dir(client_override),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Locate the static client directory.
///
/// Precedence: explicit override, `client/` beside the executable, then
/// `client/` in the working directory.
pub fn resolve_client_dir(overridden: Option<PathBuf>) -> PathBuf {
    if let Some(path) = overridden {
        if !path.join("index.html").exists() {
            warn!("Client directory {} has no index.html", path.display());
        }
        return path;
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(beside) = exe.parent().map(|p| p.join("client")) {
            if beside.join("index.html").exists() {
                return beside;
            }
        }
    }

    PathBuf::from("client")
}
