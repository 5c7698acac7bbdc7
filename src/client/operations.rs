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

//! Per-target SFTP primitives on an open connection.
//!
//! Each primitive opens its own SFTP channel, so a batch can run many
//! primitives over one connection. Paths are used literally; no
//! normalization happens here. Some sshd_config files do not enable sftp
//! by default; the remote needs a line like `Subsystem sftp internal-sftp`
//! or `Subsystem sftp /usr/lib/openssh/sftp-server`.

use std::path::Path;

use russh_sftp::{client::SftpSession, protocol::OpenFlags};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use super::connection::Client;
use super::error::{Error, Result};

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub name: String,
    pub size: Option<u64>,
    pub is_dir: bool,
}

impl Client {
    /// Open a fresh SFTP channel on this connection.
    pub(crate) async fn sftp(&self) -> Result<SftpSession> {
        let channel = self.connection_handle.channel_open_session().await?;
        channel.request_subsystem(true, "sftp").await?;
        Ok(SftpSession::new(channel.into_stream()).await?)
    }

    /// List `remote_dir`, preserving the server-reported order.
    ///
    /// The "." self-entry is dropped; everything else, including "..",
    /// is returned as the server sent it.
    pub async fn list_dir(&self, remote_dir: &str) -> Result<Vec<RemoteEntry>> {
        let sftp = self.sftp().await?;
        let entries = sftp
            .read_dir(remote_dir)
            .await
            .map_err(|err| Error::remote(remote_dir, err))?;

        Ok(entries
            .filter(|entry| entry.file_name() != ".")
            .map(|entry| {
                let metadata = entry.metadata();
                RemoteEntry {
                    name: entry.file_name(),
                    size: metadata.size,
                    is_dir: metadata.file_type().is_dir(),
                }
            })
            .collect())
    }

    /// Upload one local file to `remote_path`, creating or truncating it.
    pub async fn upload_file<T: AsRef<Path>>(&self, local_path: T, remote_path: &str) -> Result<()> {
        let local_path = local_path.as_ref();
        let contents = tokio::fs::read(local_path)
            .await
            .map_err(|err| Error::local_io(local_path, err))?;

        let sftp = self.sftp().await?;
        let mut remote_file = sftp
            .open_with_flags(
                remote_path,
                OpenFlags::CREATE | OpenFlags::TRUNCATE | OpenFlags::WRITE,
            )
            .await
            .map_err(|err| Error::remote(remote_path, err))?;
        remote_file
            .write_all(&contents)
            .await
            .map_err(|err| Error::remote(remote_path, err))?;
        remote_file
            .flush()
            .await
            .map_err(|err| Error::remote(remote_path, err))?;
        remote_file
            .shutdown()
            .await
            .map_err(|err| Error::remote(remote_path, err))?;

        Ok(())
    }

    /// Download `remote_path` into a local file, creating or truncating it.
    pub async fn download_file<T: AsRef<Path>>(
        &self,
        remote_path: &str,
        local_path: T,
    ) -> Result<()> {
        let local_path = local_path.as_ref();

        let sftp = self.sftp().await?;
        let mut remote_file = sftp
            .open_with_flags(remote_path, OpenFlags::READ)
            .await
            .map_err(|err| Error::remote(remote_path, err))?;
        let mut contents = Vec::new();
        remote_file
            .read_to_end(&mut contents)
            .await
            .map_err(|err| Error::remote(remote_path, err))?;

        tokio::fs::write(local_path, &contents)
            .await
            .map_err(|err| Error::local_io(local_path, err))?;

        Ok(())
    }

    /// Delete one remote file.
    pub async fn remove_file(&self, remote_path: &str) -> Result<()> {
        let sftp = self.sftp().await?;
        sftp.remove_file(remote_path)
            .await
            .map_err(|err| Error::remote(remote_path, err))
    }

    /// Create a remote directory. Fails if it already exists.
    pub async fn create_dir(&self, remote_dir: &str) -> Result<()> {
        let sftp = self.sftp().await?;
        sftp.create_dir(remote_dir)
            .await
            .map_err(|err| Error::remote(remote_dir, err))
    }
}
