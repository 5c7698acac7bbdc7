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

//! Tests against a real SFTP server, driven by environment variables:
//! SFTPC_TEST_HOST (required), SFTPC_TEST_PORT, SFTPC_TEST_USER,
//! SFTPC_TEST_PASSWORD, SFTPC_TEST_KEY_FILE. Uploads land in the test
//! account's home directory and are removed afterwards.

use std::fs;

use tempfile::TempDir;

use sftpc::config::{ConnectionConfig, FilePair};
use sftpc::executor::SftpExecutor;
use sftpc::Error;

fn test_connection() -> Option<ConnectionConfig> {
    let host = std::env::var("SFTPC_TEST_HOST").ok()?;
    let port = std::env::var("SFTPC_TEST_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(22);
    let username = std::env::var("SFTPC_TEST_USER")
        .or_else(|_| std::env::var("USER"))
        .unwrap_or_else(|_| "root".to_string());

    Some(ConnectionConfig {
        host,
        port,
        username,
        password: std::env::var("SFTPC_TEST_PASSWORD").ok(),
        key_file: std::env::var("SFTPC_TEST_KEY_FILE").ok().map(Into::into),
        ..Default::default()
    })
}

#[tokio::test]
async fn test_upload_download_roundtrip() {
    let Some(connection) = test_connection() else {
        eprintln!("Skipping live test: SFTPC_TEST_HOST is not set");
        return;
    };

    let local_temp = TempDir::new().unwrap();
    let source = local_temp.path().join("roundtrip.txt");
    fs::write(&source, "sftpc roundtrip content").unwrap();

    let executor = SftpExecutor::new();
    let remote_path = format!("sftpc-test-{}.txt", std::process::id());

    executor
        .upload_file(&connection, &source, &remote_path)
        .await
        .expect("uploaded file");

    let downloaded = local_temp.path().join("downloaded.txt");
    executor
        .download_file(&connection, &remote_path, &downloaded)
        .await
        .expect("downloaded file");

    assert_eq!(
        fs::read_to_string(&downloaded).unwrap(),
        "sftpc roundtrip content"
    );

    executor
        .delete_file(&connection, &remote_path)
        .await
        .expect("deleted file");
}

#[tokio::test]
async fn test_listing_excludes_the_current_directory_entry() {
    let Some(connection) = test_connection() else {
        eprintln!("Skipping live test: SFTPC_TEST_HOST is not set");
        return;
    };

    let executor = SftpExecutor::new();
    let entries = executor
        .list_dir(&connection, "")
        .await
        .expect("listed home directory");
    assert!(entries.iter().all(|entry| entry.name != "."));
}

#[tokio::test]
async fn test_batch_delete_reports_missing_paths() {
    let Some(connection) = test_connection() else {
        eprintln!("Skipping live test: SFTPC_TEST_HOST is not set");
        return;
    };

    let executor = SftpExecutor::new();
    let local_temp = TempDir::new().unwrap();
    let source = local_temp.path().join("present.txt");
    fs::write(&source, "delete me").unwrap();

    let present = format!("sftpc-present-{}.txt", std::process::id());
    let missing = format!("sftpc-missing-{}.txt", std::process::id());
    executor
        .upload_file(&connection, &source, &present)
        .await
        .expect("uploaded file");

    let result = executor
        .delete_files(&connection, &[present.clone(), missing.clone()])
        .await;

    match result {
        Err(Error::Batch { total, failed }) => {
            assert_eq!(total, 2);
            assert_eq!(failed, vec![missing]);
        }
        other => panic!("expected a batch error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_batch_upload_over_one_connection() {
    let Some(connection) = test_connection() else {
        eprintln!("Skipping live test: SFTPC_TEST_HOST is not set");
        return;
    };

    let executor = SftpExecutor::new();
    let local_temp = TempDir::new().unwrap();

    let mut pairs = Vec::new();
    for name in ["one.txt", "two.txt", "three.txt"] {
        let path = local_temp.path().join(name);
        fs::write(&path, name).unwrap();
        pairs.push(FilePair::new(
            path,
            format!("sftpc-batch-{}-{name}", std::process::id()),
        ));
    }

    executor
        .upload_files(&connection, &pairs)
        .await
        .expect("uploaded batch");

    let remote: Vec<String> = pairs.iter().map(|p| p.remote_path.clone()).collect();
    executor
        .delete_files(&connection, &remote)
        .await
        .expect("cleaned up batch");
}

#[tokio::test]
async fn test_mkdir_rejects_an_existing_directory() {
    let Some(connection) = test_connection() else {
        eprintln!("Skipping live test: SFTPC_TEST_HOST is not set");
        return;
    };

    let executor = SftpExecutor::new();
    let directory = format!("sftpc-dir-{}", std::process::id());

    executor
        .create_dir(&connection, &directory)
        .await
        .expect("created directory");

    let second = executor.create_dir(&connection, &directory).await;
    assert!(second.is_err(), "creating an existing directory must fail");
}
