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

//! Connection establishment and teardown.
//!
//! A [`Client`] is one authenticated SSH connection. Operations open their
//! own SFTP channels on it; the connection itself is opened once per
//! operation call by the executor and closed when the call finishes.

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use russh::client::{self, Config, Handle, Handler};

use super::auth::{self, AuthMethod};
use super::error::{Error, Result};
use crate::config::{ConnectionConfig, HostCheckMethod};

/// One authenticated SSH connection to a remote server.
///
/// Cloning is cheap; clones share the underlying connection handle.
#[derive(Clone)]
pub struct Client {
    pub(super) connection_handle: Arc<Handle<ClientHandler>>,
    username: String,
    host: String,
    port: u16,
}

impl Client {
    /// Connect to the host named by `config` and authenticate.
    ///
    /// The port falls back to 22 when unset or zero, and the
    /// authentication method follows [`AuthMethod::from_config`]. When a
    /// connect timeout is configured, establishment is abandoned once it
    /// elapses; authentication itself is not bounded.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let host = config.host.clone();
        let port = config.effective_port();
        let auth = AuthMethod::from_config(config);

        let handler = ClientHandler {
            hostname: host.clone(),
            port,
            host_check: config.host_check.clone(),
        };
        let ssh_config = Arc::new(Config::default());

        let connecting = client::connect(ssh_config, (host.as_str(), port), handler);
        let connected = match config.connect_timeout {
            Some(secs) => tokio::time::timeout(Duration::from_secs(secs), connecting)
                .await
                .map_err(|_| Error::ConnectTimeout {
                    host: host.clone(),
                    port,
                    secs,
                })?,
            None => connecting.await,
        };
        let mut handle = connected.map_err(|err| match err {
            Error::Ssh(source) => Error::Connect {
                host: host.clone(),
                port,
                source,
            },
            other => other,
        })?;

        auth::authenticate(&mut handle, &config.username, auth).await?;

        Ok(Self {
            connection_handle: Arc::new(handle),
            username: config.username.clone(),
            host,
            port,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Close the connection.
    pub async fn disconnect(&self) -> Result<()> {
        self.connection_handle
            .disconnect(russh::Disconnect::ByApplication, "", "")
            .await
            .map_err(Error::from)
    }

    /// Whether the underlying connection has been closed.
    pub fn is_closed(&self) -> bool {
        self.connection_handle.is_closed()
    }
}

impl Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("username", &self.username)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("connection_handle", &"Handle<ClientHandler>")
            .finish()
    }
}

/// Server key verification driven by [`HostCheckMethod`].
#[derive(Debug, Clone)]
pub(super) struct ClientHandler {
    hostname: String,
    port: u16,
    host_check: HostCheckMethod,
}

impl Handler for ClientHandler {
    type Error = Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &russh::keys::PublicKey,
    ) -> Result<bool> {
        match &self.host_check {
            HostCheckMethod::AcceptAny => Ok(true),
            HostCheckMethod::DefaultKnownHosts => {
                let known =
                    russh::keys::check_known_hosts(&self.hostname, self.port, server_public_key)
                        .map_err(|_| Error::HostCheck {
                            host: self.hostname.clone(),
                            port: self.port,
                        })?;
                Ok(known)
            }
            HostCheckMethod::KnownHostsFile(known_hosts_path) => {
                let known = russh::keys::check_known_hosts_path(
                    &self.hostname,
                    self.port,
                    server_public_key,
                    known_hosts_path,
                )
                .map_err(|_| Error::HostCheck {
                    host: self.hostname.clone(),
                    port: self.port,
                })?;
                Ok(known)
            }
        }
    }
}
