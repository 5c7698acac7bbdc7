// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Configuration: the per-connection settings, the YAML config file
//! schema, and the merge of file values with command-line overrides.
//!
//! Resolution priority, highest first: CLI flags, the selected server
//! profile, the file's `defaults` block, built-in defaults.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::utils::expand_tilde;

pub const DEFAULT_PORT: u16 = 22;

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Everything needed to reach and authenticate against one server.
///
/// Borrowed, never stored, by the operations that use it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub host: String,
    /// Zero is treated the same as unset: connect on 22.
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    /// Used only when no key is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Path to a private key file. Wins over `key` and `password`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_file: Option<PathBuf>,
    /// Inline private key material. Wins over `password`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Passphrase for either key form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_passphrase: Option<String>,
    #[serde(default)]
    pub host_check: HostCheckMethod,
    /// Bound on connection establishment, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout: Option<u64>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
            username: String::new(),
            password: None,
            key_file: None,
            key: None,
            key_passphrase: None,
            host_check: HostCheckMethod::default(),
            connect_timeout: None,
        }
    }
}

impl ConnectionConfig {
    /// The port to connect on; zero and unset both mean 22.
    pub fn effective_port(&self) -> u16 {
        if self.port == 0 {
            DEFAULT_PORT
        } else {
            self.port
        }
    }
}

/// One transfer in a batch operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    pub local_path: PathBuf,
    pub remote_path: String,
}

impl FilePair {
    pub fn new(local_path: impl Into<PathBuf>, remote_path: impl Into<String>) -> Self {
        Self {
            local_path: local_path.into(),
            remote_path: remote_path.into(),
        }
    }
}

/// How to verify the server's host key.
///
/// Written as a plain string in config files and on the command line:
/// `off` (or `accept-any`), `known-hosts` (or `default`), or a path to a
/// known_hosts file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HostCheckMethod {
    /// Trust whatever key the server presents.
    #[default]
    AcceptAny,
    /// Check against ~/.ssh/known_hosts.
    DefaultKnownHosts,
    /// Check against a specific known_hosts file.
    KnownHostsFile(PathBuf),
}

impl FromStr for HostCheckMethod {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "off" | "accept-any" => Self::AcceptAny,
            "known-hosts" | "default" => Self::DefaultKnownHosts,
            path => Self::KnownHostsFile(PathBuf::from(path)),
        })
    }
}

impl fmt::Display for HostCheckMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AcceptAny => f.write_str("off"),
            Self::DefaultKnownHosts => f.write_str("known-hosts"),
            Self::KnownHostsFile(path) => write!(f, "{}", path.display()),
        }
    }
}

impl From<String> for HostCheckMethod {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl From<HostCheckMethod> for String {
    fn from(value: HostCheckMethod) -> Self {
        value.to_string()
    }
}

/// The on-disk configuration: defaults plus named server profiles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub servers: HashMap<String, ServerProfile>,
}

/// Settings applied to every connection unless overridden.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_passphrase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_check: Option<HostCheckMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout: Option<u64>,
}

/// One named server entry; mirrors the connection surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerProfile {
    pub host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_passphrase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_check: Option<HostCheckMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout: Option<u64>,
}

/// Connection settings taken from the command line, before merging.
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub key_file: Option<PathBuf>,
    pub key: Option<String>,
    pub key_passphrase: Option<String>,
    pub host_check: Option<HostCheckMethod>,
    pub connect_timeout: Option<u64>,
}

impl Config {
    /// Load from an explicit file, failing when it is missing or invalid.
    pub fn load(path: &Path) -> Result<Self> {
        let expanded = expand_tilde(path);
        let contents = std::fs::read_to_string(&expanded)
            .with_context(|| format!("failed to read config file: {}", expanded.display()))?;
        serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", expanded.display()))
    }

    /// A CLI-provided path is loaded unconditionally; otherwise the user
    /// config dir is tried, and an absent file means built-in defaults.
    pub fn load_with_priority(cli_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = cli_path {
            return Self::load(path);
        }
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::load(&path);
            }
        }
        Ok(Self::default())
    }

    /// Platform config location, e.g. `~/.config/sftpc/config.yaml`.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "sftpc")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge the file, an optional server profile, and CLI overrides into
    /// one connection configuration.
    pub fn resolve_connection(
        &self,
        server: Option<&str>,
        overrides: ConnectionOverrides,
    ) -> Result<ConnectionConfig> {
        let mut connection = ConnectionConfig::default();

        let defaults = &self.defaults;
        if let Some(port) = defaults.port {
            connection.port = port;
        }
        if let Some(username) = &defaults.username {
            connection.username = username.clone();
        }
        if let Some(key_file) = &defaults.key_file {
            connection.key_file = Some(key_file.clone());
        }
        if let Some(key_passphrase) = &defaults.key_passphrase {
            connection.key_passphrase = Some(key_passphrase.clone());
        }
        if let Some(host_check) = &defaults.host_check {
            connection.host_check = host_check.clone();
        }
        if let Some(connect_timeout) = defaults.connect_timeout {
            connection.connect_timeout = Some(connect_timeout);
        }

        if let Some(name) = server {
            let profile = self
                .servers
                .get(name)
                .with_context(|| format!("server profile '{name}' not found in configuration"))?;
            connection.host = profile.host.clone();
            if let Some(port) = profile.port {
                connection.port = port;
            }
            if let Some(username) = &profile.username {
                connection.username = username.clone();
            }
            if let Some(password) = &profile.password {
                connection.password = Some(password.clone());
            }
            if let Some(key_file) = &profile.key_file {
                connection.key_file = Some(key_file.clone());
            }
            if let Some(key) = &profile.key {
                connection.key = Some(key.clone());
            }
            if let Some(key_passphrase) = &profile.key_passphrase {
                connection.key_passphrase = Some(key_passphrase.clone());
            }
            if let Some(host_check) = &profile.host_check {
                connection.host_check = host_check.clone();
            }
            if let Some(connect_timeout) = profile.connect_timeout {
                connection.connect_timeout = Some(connect_timeout);
            }
        }

        let ConnectionOverrides {
            host,
            port,
            username,
            password,
            key_file,
            key,
            key_passphrase,
            host_check,
            connect_timeout,
        } = overrides;
        if let Some(host) = host {
            connection.host = host;
        }
        if let Some(port) = port {
            connection.port = port;
        }
        if let Some(username) = username {
            connection.username = username;
        }
        if let Some(password) = password {
            connection.password = Some(password);
        }
        if let Some(key_file) = key_file {
            connection.key_file = Some(key_file);
        }
        if let Some(key) = key {
            connection.key = Some(key);
        }
        if let Some(key_passphrase) = key_passphrase {
            connection.key_passphrase = Some(key_passphrase);
        }
        if let Some(host_check) = host_check {
            connection.host_check = host_check;
        }
        if let Some(connect_timeout) = connect_timeout {
            connection.connect_timeout = Some(connect_timeout);
        }

        if connection.host.is_empty() {
            bail!("no host configured; pass --host or --server");
        }
        if connection.username.is_empty() {
            connection.username =
                std::env::var("USER").context("no username configured and USER is not set")?;
        }
        if let Some(key_file) = &connection.key_file {
            connection.key_file = Some(expand_tilde(key_file));
        }
        if let HostCheckMethod::KnownHostsFile(path) = &connection.host_check {
            connection.host_check = HostCheckMethod::KnownHostsFile(expand_tilde(path));
        }

        Ok(connection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_port_maps_zero_to_22() {
        let mut config = ConnectionConfig {
            host: "example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(config.effective_port(), 22);

        config.port = 0;
        assert_eq!(config.effective_port(), 22);

        config.port = 2222;
        assert_eq!(config.effective_port(), 2222);
    }

    #[test]
    fn port_defaults_to_22_when_absent_from_yaml() {
        let config: ConnectionConfig =
            serde_yaml::from_str("host: example.com\nusername: bob\n").unwrap();
        assert_eq!(config.port, 22);
    }

    #[test]
    fn host_check_parses_from_strings() {
        assert_eq!(
            "off".parse::<HostCheckMethod>().unwrap(),
            HostCheckMethod::AcceptAny
        );
        assert_eq!(
            "known-hosts".parse::<HostCheckMethod>().unwrap(),
            HostCheckMethod::DefaultKnownHosts
        );
        assert_eq!(
            "/etc/ssh/known_hosts".parse::<HostCheckMethod>().unwrap(),
            HostCheckMethod::KnownHostsFile(PathBuf::from("/etc/ssh/known_hosts"))
        );
    }

    #[test]
    fn host_check_round_trips_through_strings() {
        for method in [
            HostCheckMethod::AcceptAny,
            HostCheckMethod::DefaultKnownHosts,
            HostCheckMethod::KnownHostsFile(PathBuf::from("/tmp/kh")),
        ] {
            let text = String::from(method.clone());
            assert_eq!(HostCheckMethod::from(text), method);
        }
    }

    #[test]
    fn config_file_schema_parses() {
        let yaml = r#"
defaults:
  username: deploy
  port: 2022
servers:
  staging:
    host: stage.example.com
    key_file: /keys/staging
  prod:
    host: prod.example.com
    port: 22
    password: hunter2
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.defaults.username.as_deref(), Some("deploy"));
        assert_eq!(config.servers.len(), 2);
        assert_eq!(config.servers["staging"].host, "stage.example.com");
        assert_eq!(config.servers["prod"].password.as_deref(), Some("hunter2"));
    }

    #[test]
    fn resolve_applies_profile_over_defaults() {
        let yaml = r#"
defaults:
  username: deploy
  port: 2022
servers:
  staging:
    host: stage.example.com
    port: 2222
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let connection = config
            .resolve_connection(Some("staging"), ConnectionOverrides::default())
            .unwrap();
        assert_eq!(connection.host, "stage.example.com");
        assert_eq!(connection.port, 2222);
        assert_eq!(connection.username, "deploy");
    }

    #[test]
    fn resolve_applies_cli_flags_over_profile() {
        let yaml = r#"
servers:
  staging:
    host: stage.example.com
    username: deploy
    password: from-profile
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let overrides = ConnectionOverrides {
            username: Some("release".to_string()),
            port: Some(2200),
            ..Default::default()
        };
        let connection = config
            .resolve_connection(Some("staging"), overrides)
            .unwrap();
        assert_eq!(connection.username, "release");
        assert_eq!(connection.port, 2200);
        assert_eq!(connection.password.as_deref(), Some("from-profile"));
    }

    #[test]
    fn resolve_rejects_unknown_profile() {
        let config = Config::default();
        let err = config
            .resolve_connection(Some("nowhere"), ConnectionOverrides::default())
            .unwrap_err();
        assert!(err.to_string().contains("nowhere"));
    }

    #[test]
    fn resolve_requires_a_host() {
        let config = Config::default();
        let overrides = ConnectionOverrides {
            username: Some("bob".to_string()),
            ..Default::default()
        };
        let err = config.resolve_connection(None, overrides).unwrap_err();
        assert!(err.to_string().contains("no host"));
    }

    #[test]
    fn file_pair_holds_both_sides() {
        let pair = FilePair::new("/tmp/a.txt", "inbound/a.txt");
        assert_eq!(pair.local_path, PathBuf::from("/tmp/a.txt"));
        assert_eq!(pair.remote_path, "inbound/a.txt");
    }
}
