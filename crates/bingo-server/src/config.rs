use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;

use bingo_card::UpdatePolicy;
use bingo_ingest::Thumbnailer;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Server configuration, usually loaded from a TOML file.
///
/// Every field has a default, so a partial file (or none at all) is valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Base URL pictures are linked under. Defaults to this server's own
    /// `/v1/blobs` route.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_base_url: Option<String>,
    pub max_upload_bytes: usize,
    pub thumbnail_max_dim: u32,
    pub update: UpdatePolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
            public_base_url: None,
            max_upload_bytes: 10 * 1024 * 1024,
            thumbnail_max_dim: Thumbnailer::DEFAULT_MAX_DIM,
            update: UpdatePolicy::default(),
        }
    }
}

impl ServerConfig {
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but cannot run.
    pub fn validate(&self) -> ServerResult<()> {
        if self.update.max_attempts == 0 {
            return Err(ServerError::Config(
                "update.max_attempts must be at least 1".into(),
            ));
        }
        if self.thumbnail_max_dim == 0 {
            return Err(ServerError::Config(
                "thumbnail_max_dim must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> ServerResult<String> {
        toml::to_string_pretty(self).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// The base URL thumbnails are served from.
    pub fn blob_base_url(&self) -> String {
        match &self.public_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://{}/v1/blobs", self.bind_addr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(c.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(c.thumbnail_max_dim, 320);
        assert_eq!(c.update.max_attempts, 8);
        assert!(c.public_base_url.is_none());
    }

    #[test]
    fn blob_base_url_defaults_to_own_route() {
        let c = ServerConfig::default();
        assert_eq!(c.blob_base_url(), "http://127.0.0.1:8080/v1/blobs");

        let c = ServerConfig {
            public_base_url: Some("https://cdn.example.com/bingo/".into()),
            ..ServerConfig::default()
        };
        assert_eq!(c.blob_base_url(), "https://cdn.example.com/bingo");
    }

    #[test]
    fn toml_roundtrip_through_file() {
        let config = ServerConfig {
            bind_addr: "0.0.0.0:9000".parse().unwrap(),
            public_base_url: Some("https://bingo.example.com/v1/blobs".into()),
            max_upload_bytes: 1024,
            thumbnail_max_dim: 128,
            update: UpdatePolicy {
                max_attempts: 3,
                backoff_base_ms: 5,
                backoff_max_ms: 50,
            },
        };

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_toml().unwrap().as_bytes()).unwrap();
        assert_eq!(ServerConfig::load(file.path()).unwrap(), config);
    }

    #[test]
    fn partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "thumbnail_max_dim = 64\n\n[update]\nmax_attempts = 2").unwrap();

        let c = ServerConfig::load(file.path()).unwrap();
        assert_eq!(c.thumbnail_max_dim, 64);
        assert_eq!(c.update.max_attempts, 2);
        assert_eq!(c.update.backoff_max_ms, UpdatePolicy::default().backoff_max_ms);
        assert_eq!(c.bind_addr, ServerConfig::default().bind_addr);
    }

    #[test]
    fn invalid_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_addr = 12").unwrap();
        let err = ServerConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn zero_attempts_is_rejected_on_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[update]\nmax_attempts = 0").unwrap();
        let err = ServerConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ServerError::Config(ref m) if m.contains("max_attempts")));
    }

    #[test]
    fn zero_thumbnail_dim_is_rejected() {
        let c = ServerConfig {
            thumbnail_max_dim: 0,
            ..ServerConfig::default()
        };
        assert!(matches!(c.validate(), Err(ServerError::Config(_))));
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ServerConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ServerError::Io(_)));
    }
}
