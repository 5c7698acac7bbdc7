pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod executor;
pub mod utils;

pub use cli::Cli;
pub use client::{AuthMethod, Client, Error, RemoteEntry, Result};
pub use config::{Config, ConnectionConfig, FilePair, HostCheckMethod};
pub use executor::SftpExecutor;
