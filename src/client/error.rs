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

//! Error types for the SFTP client layer.
//!
//! Every failure a caller can observe falls into one of a few kinds:
//! connection establishment ([`Error::Connect`], [`Error::ConnectTimeout`],
//! [`Error::HostCheck`]), credential selection and validity
//! ([`Error::Auth`], [`Error::AuthConfig`]), the remote action itself
//! ([`Error::Remote`]), local file access ([`Error::LocalIo`]), and the
//! aggregate result of a continue-on-error batch ([`Error::Batch`]).

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The TCP connection or SSH handshake with the server failed.
    #[error("failed to connect to {host}:{port}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: russh::Error,
    },

    /// Connection establishment did not finish within the configured bound.
    #[error("timed out connecting to {host}:{port} after {secs}s")]
    ConnectTimeout { host: String, port: u16, secs: u64 },

    /// The server's host key could not be checked against known hosts.
    #[error("host key verification failed for {host}:{port}")]
    HostCheck { host: String, port: u16 },

    /// The server rejected the presented credentials.
    #[error("{method} authentication failed for user '{username}'")]
    Auth {
        username: String,
        method: &'static str,
    },

    /// Key material was unreadable or unparseable.
    #[error("unusable private key material: {0}")]
    AuthConfig(#[source] russh::keys::Error),

    /// The remote action failed (missing file, permission denied, ...).
    #[error("remote operation failed on '{path}': {source}")]
    Remote {
        path: String,
        #[source]
        source: RemoteError,
    },

    /// A local file could not be read or created.
    #[error("local I/O error on '{}': {source}", path.display())]
    LocalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Aggregate outcome of a continue-on-error batch.
    #[error("{} of {total} remote targets failed: {}", failed.len(), failed.join(", "))]
    Batch { total: usize, failed: Vec<String> },

    /// SSH-level plumbing failed outside connection establishment
    /// (channel open, subsystem request, disconnect).
    #[error(transparent)]
    Ssh(#[from] russh::Error),

    /// The SFTP subsystem session could not be started.
    #[error("could not start sftp session: {0}")]
    Sftp(#[from] russh_sftp::client::error::Error),
}

/// Why a remote action failed: either the SFTP request was rejected by the
/// server, or the data stream to an open remote file broke.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error(transparent)]
    Protocol(#[from] russh_sftp::client::error::Error),
    #[error(transparent)]
    Stream(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn remote(path: impl Into<String>, source: impl Into<RemoteError>) -> Self {
        Self::Remote {
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn local_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LocalIo {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_names_the_failing_path() {
        let err = Error::remote(
            "logs/app.log",
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"),
        );
        let msg = err.to_string();
        assert!(msg.contains("logs/app.log"), "got: {msg}");
    }

    #[test]
    fn local_io_error_names_the_failing_path() {
        let err = Error::local_io(
            "/tmp/missing.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing.txt"), "got: {msg}");
    }

    #[test]
    fn batch_error_reports_counts_and_paths() {
        let err = Error::Batch {
            total: 5,
            failed: vec!["a.txt".to_string(), "b.txt".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("2 of 5"), "got: {msg}");
        assert!(msg.contains("a.txt") && msg.contains("b.txt"), "got: {msg}");
    }

    #[test]
    fn auth_error_names_user_and_method() {
        let err = Error::Auth {
            username: "deploy".to_string(),
            method: "password",
        };
        let msg = err.to_string();
        assert!(msg.contains("deploy") && msg.contains("password"), "got: {msg}");
    }
}
