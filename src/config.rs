use clap::Parser;
use std::net::SocketAddr;

/// Runtime configuration. Every flag falls back to an environment variable.
#[derive(Parser, Debug, Clone)]
#[command(name = "dog-records", about = "CRUD service for dog records")]
pub struct ServiceConfig {
    /// Address the HTTP server binds to
    #[arg(long, default_value = "127.0.0.1:7071", env = "DOGS_BIND")]
    pub bind: SocketAddr,

    /// Partition key shared by every record
    #[arg(long, default_value = "DOG", env = "DOGS_PARTITION")]
    pub partition: String,

    /// Table name, used to identify the table in logs
    #[arg(long, default_value = "dogs", env = "DOGS_TABLE")]
    pub table: String,

    /// Default log filter; `RUST_LOG` takes precedence when set
    #[arg(long, default_value = "info", env = "DOGS_LOG_LEVEL")]
    pub log_level: String,
}
