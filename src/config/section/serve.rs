//! `[serve]` section: where the playground listens.
//!
//! ```toml
//! [serve]
//! interface = "0.0.0.0"   # LAN access; the default is loopback only
//! port = 5280             # shell page, /preview, /copy, /download
//! ws_port = 35730         # live link between host and shell
//! open = true             # launch a browser once bound
//! ```
//!
//! Taken ports are retried upward, so the bound ports may differ.

use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

use crate::cli::serve::DEFAULT_WS_PORT;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    pub interface: IpAddr,
    pub port: u16,
    pub ws_port: u16,
    pub open: bool,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: Ipv4Addr::LOCALHOST.into(),
            port: 5280,
            ws_port: DEFAULT_WS_PORT,
            open: false,
        }
    }
}

impl ServeConfig {
    /// The HTTP and WebSocket listeners cannot share a port.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == self.ws_port {
            return Err(format!(
                "port and ws_port are both {}",
                self.port
            ));
        }
        Ok(())
    }

    pub fn is_loopback(&self) -> bool {
        self.interface.is_loopback()
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv6Addr;

    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults_are_loopback() {
        let serve = test_parse_config("").serve;
        assert!(serve.is_loopback());
        assert_eq!((serve.port, serve.ws_port), (5280, 35730));
        assert!(!serve.open);
        assert!(serve.validate().is_ok());
    }

    #[test]
    fn test_lan_interface_and_ports() {
        let serve = test_parse_config(
            "[serve]\ninterface = \"0.0.0.0\"\nport = 8080\nws_port = 9000\nopen = true",
        )
        .serve;
        assert!(!serve.is_loopback());
        assert_eq!(serve.port, 8080);
        assert_eq!(serve.ws_port, 9000);
        assert!(serve.open);
    }

    #[test]
    fn test_ipv6_interface() {
        let serve = test_parse_config("[serve]\ninterface = \"::1\"").serve;
        assert_eq!(serve.interface, IpAddr::V6(Ipv6Addr::LOCALHOST));
    }

    #[test]
    fn test_shared_port_rejected() {
        let serve = ServeConfig {
            ws_port: 5280,
            ..ServeConfig::default()
        };
        assert!(serve.validate().unwrap_err().contains("5280"));
    }
}
