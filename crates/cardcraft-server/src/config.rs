//! Server configuration from command-line flags and environment.

use clap::Parser;
use std::net::SocketAddr;

/// Largest accepted upload, in bytes.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Parser, Debug, Clone)]
#[command(name = "cardcraft-server", about = "CardCraft REST API server")]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "CARDCRAFT_BIND", default_value = "0.0.0.0:3030")]
    pub bind: SocketAddr,

    /// Public URL the web client is served from, used for share links.
    #[arg(long, env = "CARDCRAFT_PUBLIC_URL", default_value = "http://localhost:3030")]
    pub public_url: String,

    /// Maximum image upload size in bytes.
    #[arg(long, env = "CARDCRAFT_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Seed the store with sample cards on startup.
    #[arg(long, env = "CARDCRAFT_SAMPLE_DATA")]
    pub sample_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 3030)),
            public_url: "http://localhost:3030".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            sample_data: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let config = Config::parse_from([
            "cardcraft-server",
            "--bind",
            "127.0.0.1:8080",
            "--public-url",
            "https://cards.example.com",
            "--sample-data",
        ]);
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.public_url, "https://cards.example.com");
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert!(config.sample_data);
    }
}
