use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub library: LibraryConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub transmission: TransmissionConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Completed-downloads directory configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// Directory where finished downloads land.
    pub incoming_dir: PathBuf,
    /// File and directory names skipped at every level of the scan.
    #[serde(default = "default_ignored_files")]
    pub ignored_files: Vec<String>,
    /// Deadline for one scan of `incoming_dir` (none by default).
    #[serde(default)]
    pub scan_timeout_secs: Option<u64>,
}

impl LibraryConfig {
    pub fn new(incoming_dir: impl Into<PathBuf>) -> Self {
        Self {
            incoming_dir: incoming_dir.into(),
            ignored_files: default_ignored_files(),
            scan_timeout_secs: None,
        }
    }
}

/// Platform metadata artifacts that never count as downloaded files.
pub fn default_ignored_files() -> Vec<String> {
    [".DS_Store", "Thumbs.db", "desktop.ini"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Transmission RPC connection parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransmissionConfig {
    #[serde(default = "default_transmission_host")]
    pub host: String,
    #[serde(default = "default_transmission_port")]
    pub port: u16,
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for TransmissionConfig {
    fn default() -> Self {
        Self {
            host: default_transmission_host(),
            port: default_transmission_port(),
            rpc_path: default_rpc_path(),
            username: None,
            password: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl TransmissionConfig {
    /// Full RPC endpoint URL.
    pub fn rpc_url(&self) -> String {
        let path = self.rpc_path.trim_start_matches('/');
        format!("http://{}:{}/{}", self.host, self.port, path)
    }
}

fn default_transmission_host() -> String {
    "localhost".to_string()
}

fn default_transmission_port() -> u16 {
    9091
}

fn default_rpc_path() -> String {
    "/transmission/rpc".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// Limit/offset pagination defaults for list endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaginationConfig {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> usize {
    50
}

fn default_max_limit() -> usize {
    500
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub library: LibraryConfig,
    pub transmission: SanitizedTransmissionConfig,
    pub pagination: PaginationConfig,
}

/// Sanitized Transmission config (password hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTransmissionConfig {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub password_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            library: config.library.clone(),
            transmission: SanitizedTransmissionConfig {
                url: config.transmission.rpc_url(),
                username: config.transmission.username.clone(),
                password_configured: config
                    .transmission
                    .password
                    .as_ref()
                    .is_some_and(|p| !p.is_empty()),
                timeout_secs: config.transmission.timeout_secs,
            },
            pagination: config.pagination.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_config() {
        let toml = r#"
[library]
incoming_dir = "/srv/incoming"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.library.incoming_dir, PathBuf::from("/srv/incoming"));
        assert_eq!(config.library.ignored_files, default_ignored_files());
        assert!(config.library.scan_timeout_secs.is_none());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.transmission.port, 9091);
        assert_eq!(config.pagination.default_limit, 50);
    }

    #[test]
    fn test_deserialize_missing_library_fails() {
        let toml = r#"
[server]
port = 8080
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_transmission_config() {
        let toml = r#"
[library]
incoming_dir = "/srv/incoming"
ignored_files = [".DS_Store"]

[transmission]
host = "seedbox"
port = 9092
username = "admin"
password = "hunter2"
timeout_secs = 5
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.library.ignored_files, vec![".DS_Store".to_string()]);
        assert_eq!(config.transmission.host, "seedbox");
        assert_eq!(config.transmission.username.as_deref(), Some("admin"));
        assert_eq!(config.transmission.timeout_secs, 5);
        assert_eq!(
            config.transmission.rpc_url(),
            "http://seedbox:9092/transmission/rpc"
        );
    }

    #[test]
    fn test_rpc_url_handles_path_without_slash() {
        let config = TransmissionConfig {
            rpc_path: "rpc".to_string(),
            ..Default::default()
        };
        assert_eq!(config.rpc_url(), "http://localhost:9091/rpc");
    }

    #[test]
    fn test_sanitized_config_hides_password() {
        let config = Config {
            library: LibraryConfig::new("/srv/incoming"),
            server: ServerConfig::default(),
            transmission: TransmissionConfig {
                username: Some("admin".to_string()),
                password: Some("secret".to_string()),
                ..Default::default()
            },
            pagination: PaginationConfig::default(),
        };

        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.transmission.password_configured);
        assert_eq!(sanitized.transmission.username.as_deref(), Some("admin"));

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("secret"));
    }
}
