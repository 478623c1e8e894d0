use std::net::SocketAddr;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // .env is optional; real deployments set plain environment variables
        let _ = dotenvy::dotenv();

        let listen_addr = std::env::var("BT_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8350".to_string())
            .parse()
            .context("BT_LISTEN_ADDR must be a valid socket address")?;

        Ok(Config { listen_addr })
    }
}
