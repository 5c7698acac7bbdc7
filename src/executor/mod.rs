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

//! Session-scoped execution of SFTP operations.
//!
//! Every public method follows the same skeleton: open one connection,
//! run the remote action, report the outcome, close the connection. The
//! skeleton lives in [`run_scoped`], which releases the session on every
//! exit path. Batch methods reuse the single connection for the whole
//! batch and differ only in their failure policy: transfers abort at the
//! first error, deletions attempt every target.

mod outcome;

pub use outcome::{report, Operation, OperationOutcome};

use std::future::Future;
use std::path::Path;

use tracing::debug;

use crate::client::{Client, Error, RemoteEntry, Result};
use crate::config::{ConnectionConfig, FilePair};

/// A session whose release must happen exactly once per operation.
pub(crate) trait SessionHandle: Clone {
    async fn close(&self) -> Result<()>;
}

impl SessionHandle for Client {
    async fn close(&self) -> Result<()> {
        self.disconnect().await
    }
}

/// Run `body` against the session, then release the session regardless
/// of how the body finished. The body's result wins; a close failure
/// after a completed body is logged and swallowed. Bodies must not close
/// the session themselves.
pub(crate) async fn run_scoped<S, T, F, Fut>(session: S, body: F) -> Result<T>
where
    S: SessionHandle,
    F: FnOnce(S) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let guard = session.clone();
    let result = body(session).await;
    if let Err(close_err) = guard.close().await {
        debug!(error = %close_err, "session close failed");
    }
    result
}

fn normalize_dir(remote_dir: &str) -> &str {
    if remote_dir.is_empty() {
        "."
    } else {
        remote_dir
    }
}

fn pair_targets(operation: Operation, pair: &FilePair) -> Vec<String> {
    let local = pair.local_path.display().to_string();
    let remote = pair.remote_path.clone();
    match operation {
        Operation::Download => vec![remote, local],
        _ => vec![local, remote],
    }
}

fn batch_targets(operation: Operation, pairs: &[FilePair]) -> Vec<String> {
    if let [pair] = pairs {
        pair_targets(operation, pair)
    } else {
        vec![format!("{} files", pairs.len())]
    }
}

/// Apply `action` to every pair in order, stopping at the first failure.
async fn transfer_all<F, Fut>(operation: Operation, pairs: &[FilePair], mut action: F) -> Result<()>
where
    F: FnMut(FilePair) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    for pair in pairs {
        let targets = pair_targets(operation, pair);
        match action(pair.clone()).await {
            Ok(()) => report(&OperationOutcome::success(operation, targets)),
            Err(err) => {
                report(&OperationOutcome::failure(operation, targets, &err));
                return Err(err);
            }
        }
    }
    Ok(())
}

/// Apply `action` to every path independently. Failures are reported per
/// item and folded into one aggregate error once all paths were tried.
async fn delete_all<F, Fut>(paths: &[String], mut action: F) -> Result<()>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let mut failed = Vec::new();
    for path in paths {
        match action(path.clone()).await {
            Ok(()) => report(&OperationOutcome::success(
                Operation::Delete,
                vec![path.clone()],
            )),
            Err(err) => {
                report(&OperationOutcome::failure(
                    Operation::Delete,
                    vec![path.clone()],
                    &err,
                ));
                failed.push(path.clone());
            }
        }
    }
    if failed.is_empty() {
        Ok(())
    } else {
        Err(Error::Batch {
            total: paths.len(),
            failed,
        })
    }
}

/// Stateless front door for all SFTP operations.
///
/// Methods take the connection settings explicitly and hold nothing
/// between calls; each call dials a fresh connection and closes it
/// before returning.
#[derive(Debug, Clone, Copy, Default)]
pub struct SftpExecutor;

impl SftpExecutor {
    pub fn new() -> Self {
        Self
    }

    async fn with_session<T, F, Fut>(&self, config: &ConnectionConfig, body: F) -> Result<T>
    where
        F: FnOnce(Client) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let client = Client::connect(config).await?;
        run_scoped(client, body).await
    }

    async fn with_batch_session<T, F, Fut>(
        &self,
        config: &ConnectionConfig,
        operation: Operation,
        targets: Vec<String>,
        body: F,
    ) -> Result<T>
    where
        F: FnOnce(Client) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let client = match Client::connect(config).await {
            Ok(client) => client,
            Err(err) => {
                report(&OperationOutcome::failure(operation, targets, &err));
                return Err(err);
            }
        };
        run_scoped(client, body).await
    }

    fn reported<T>(&self, result: Result<T>, operation: Operation, targets: Vec<String>) -> Result<T> {
        match &result {
            Ok(_) => report(&OperationOutcome::success(operation, targets)),
            Err(err) => report(&OperationOutcome::failure(operation, targets, err)),
        }
        result
    }

    /// List a remote directory, "." when `remote_dir` is empty. The
    /// listing excludes the "." entry and keeps the server's order.
    pub async fn list_dir(
        &self,
        config: &ConnectionConfig,
        remote_dir: &str,
    ) -> Result<Vec<RemoteEntry>> {
        let dir = normalize_dir(remote_dir);
        let result = self
            .with_session(config, |client| async move { client.list_dir(dir).await })
            .await;
        match &result {
            Ok(entries) => report(&OperationOutcome::success_with_detail(
                Operation::List,
                vec![dir.to_string()],
                format!("{} entries", entries.len()),
            )),
            Err(err) => report(&OperationOutcome::failure(
                Operation::List,
                vec![dir.to_string()],
                err,
            )),
        }
        result
    }

    /// Upload one local file to `remote_path`.
    pub async fn upload_file(
        &self,
        config: &ConnectionConfig,
        local_path: &Path,
        remote_path: &str,
    ) -> Result<()> {
        let result = self
            .with_session(config, |client| async move {
                client.upload_file(local_path, remote_path).await
            })
            .await;
        self.reported(
            result,
            Operation::Upload,
            vec![local_path.display().to_string(), remote_path.to_string()],
        )
    }

    /// Upload a batch over one connection, aborting at the first failure.
    pub async fn upload_files(&self, config: &ConnectionConfig, pairs: &[FilePair]) -> Result<()> {
        let targets = batch_targets(Operation::Upload, pairs);
        self.with_batch_session(config, Operation::Upload, targets, |client| async move {
            transfer_all(Operation::Upload, pairs, |pair| {
                let client = client.clone();
                async move { client.upload_file(&pair.local_path, &pair.remote_path).await }
            })
            .await
        })
        .await
    }

    /// Download one remote file to `local_path`.
    pub async fn download_file(
        &self,
        config: &ConnectionConfig,
        remote_path: &str,
        local_path: &Path,
    ) -> Result<()> {
        let result = self
            .with_session(config, |client| async move {
                client.download_file(remote_path, local_path).await
            })
            .await;
        self.reported(
            result,
            Operation::Download,
            vec![remote_path.to_string(), local_path.display().to_string()],
        )
    }

    /// Download a batch over one connection, aborting at the first failure.
    pub async fn download_files(&self, config: &ConnectionConfig, pairs: &[FilePair]) -> Result<()> {
        let targets = batch_targets(Operation::Download, pairs);
        self.with_batch_session(config, Operation::Download, targets, |client| async move {
            transfer_all(Operation::Download, pairs, |pair| {
                let client = client.clone();
                async move {
                    client
                        .download_file(&pair.remote_path, &pair.local_path)
                        .await
                }
            })
            .await
        })
        .await
    }

    /// Delete one remote file. Missing targets are an error.
    pub async fn delete_file(&self, config: &ConnectionConfig, remote_path: &str) -> Result<()> {
        let result = self
            .with_session(config, |client| async move {
                client.remove_file(remote_path).await
            })
            .await;
        self.reported(result, Operation::Delete, vec![remote_path.to_string()])
    }

    /// Delete a batch over one connection. Every path is attempted even
    /// when earlier ones fail; any failure surfaces as one aggregate
    /// error naming the paths that could not be deleted.
    pub async fn delete_files(&self, config: &ConnectionConfig, paths: &[String]) -> Result<()> {
        self.with_batch_session(config, Operation::Delete, paths.to_vec(), |client| async move {
            delete_all(paths, |path| {
                let client = client.clone();
                async move { client.remove_file(&path).await }
            })
            .await
        })
        .await
    }

    /// Create a remote directory. Fails if the path already exists.
    pub async fn create_dir(&self, config: &ConnectionConfig, remote_dir: &str) -> Result<()> {
        let result = self
            .with_session(config, |client| async move {
                client.create_dir(remote_dir).await
            })
            .await;
        self.reported(result, Operation::CreateDir, vec![remote_dir.to_string()])
    }
}
