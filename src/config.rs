use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::error::{DashboardError, Result};

pub const DEFAULT_DATASET: &str = "medicine_data.csv";
pub const DEFAULT_PORT: u16 = 8050;

/// Startup settings for the dashboard server
#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// CSV file loaded once before the server starts
    pub dataset_path: PathBuf,

    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET),
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
        }
    }
}

impl ServerConfig {
    /// Build the configuration from positional arguments
    ///
    /// # Arguments
    /// * `args` - Command line arguments including the program name:
    ///   `[dataset_path] [bind_address]`, both optional
    ///
    /// # Returns
    /// * `Result<ServerConfig>` - Defaults for anything not given, or
    ///   `DashboardError::Config` for an unparsable address or extra arguments
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut config = ServerConfig::default();

        if args.len() > 3 {
            return Err(DashboardError::Config(format!(
                "usage: {} [dataset_path] [bind_address]",
                args.first().map(String::as_str).unwrap_or("dashboard")
            )));
        }
        if let Some(path) = args.get(1) {
            config.dataset_path = PathBuf::from(path);
        }
        if let Some(addr) = args.get(2) {
            config.bind_addr = addr
                .parse()
                .map_err(|e| DashboardError::Config(format!("bad bind address '{addr}': {e}")))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_arguments() {
        let config = ServerConfig::from_args(&args(&["dashboard"])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr.port(), 8050);
    }

    #[test]
    fn positional_overrides() {
        let config =
            ServerConfig::from_args(&args(&["dashboard", "data/meds.csv", "0.0.0.0:9000"]))
                .unwrap();
        assert_eq!(config.dataset_path, PathBuf::from("data/meds.csv"));
        assert_eq!(config.bind_addr.port(), 9000);
    }

    #[test]
    fn rejects_bad_address() {
        let err = ServerConfig::from_args(&args(&["dashboard", "x.csv", "nowhere"])).unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)));
    }

    #[test]
    fn rejects_extra_arguments() {
        assert!(ServerConfig::from_args(&args(&["dashboard", "a", "127.0.0.1:1", "b"])).is_err());
    }
}
