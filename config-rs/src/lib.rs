//! config-rs/lib.rs
//! Shared configuration utilities for consistent service configuration
//! Provides standardized functions for port/address management

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Normalize a service name to its environment variable stem
/// (e.g. "crop-form" -> "CROP_FORM")
fn env_stem(service_name: &str) -> String {
    service_name
        .to_uppercase()
        .replace(|c: char| !c.is_ascii_alphanumeric(), "_")
}

/// Get service port from environment variables with proper fallback
///
/// # Arguments
/// * `service_name` - The name of the service (e.g., "CROP_FORM", "PREDICTION")
/// * `default_port` - The default port to use if not specified in environment
///
/// # Returns
/// The port number to use for the service
pub fn get_service_port(service_name: &str, default_port: u16) -> u16 {
    let var_name = format!("{}_SERVICE_PORT", env_stem(service_name));
    match env::var(&var_name) {
        Ok(value) => value.parse::<u16>().unwrap_or_else(|_| {
            log::warn!("Invalid port in {}, using default {}", var_name, default_port);
            default_port
        }),
        Err(_) => default_port,
    }
}

/// Create a SocketAddr for binding a service
///
/// # Arguments
/// * `service_name` - The name of the service
/// * `default_port` - The default port to use if not specified in environment
///
/// # Returns
/// A SocketAddr configured with the appropriate bind address and port
pub fn get_bind_address(service_name: &str, default_port: u16) -> SocketAddr {
    let var_name = format!("{}_SERVICE_ADDR", env_stem(service_name));

    // Check if there's a full address override
    if let Ok(addr_str) = env::var(&var_name) {
        let trimmed = addr_str
            .trim_start_matches("http://")
            .trim_start_matches("https://");
        if let Ok(addr) = trimmed.parse::<SocketAddr>() {
            return addr;
        }
        log::warn!("Invalid address format in {}, using default", var_name);
    }

    let port = get_service_port(service_name, default_port);
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port)
}

/// Per-service view over the environment, loading `.env` once on creation
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    service_name: String,
}

impl ServiceConfig {
    pub fn new(service_name: &str) -> Self {
        if let Err(e) = dotenv::dotenv() {
            log::debug!("No .env file loaded: {}", e);
        }

        Self {
            service_name: service_name.to_string(),
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Port this service listens on (`<SERVICE>_SERVICE_PORT`)
    pub fn get_service_port(&self, default_port: u16) -> u16 {
        get_service_port(&self.service_name, default_port)
    }

    /// Address this service binds to (`<SERVICE>_SERVICE_ADDR` or 0.0.0.0:port)
    pub fn get_bind_address(&self, port: u16) -> SocketAddr {
        get_bind_address(&self.service_name, port)
    }

    /// Free-form setting `<SERVICE>_<KEY>` with a default
    pub fn get_setting(&self, key: &str, default: &str) -> String {
        let var_name = format!("{}_{}", env_stem(&self.service_name), env_stem(key));
        env::var(&var_name).unwrap_or_else(|_| default.to_string())
    }
}
