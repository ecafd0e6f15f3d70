//! Server configuration.

use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};

use super::error::ValidationError;

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind host.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Returns the bind address.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the host is not a valid IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ValidationError::invalid("server.host", "not a valid IP address"))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.socket_addr()?;
        if self.port == 0 {
            return Err(ValidationError::invalid("server.port", "must be non-zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_all_interfaces_on_8080() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_ip_host() {
        let config = ServerConfig {
            host: "localhost".to_string(),
            port: 8080,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_port_zero() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        };
        assert!(config.validate().is_err());
    }
}
