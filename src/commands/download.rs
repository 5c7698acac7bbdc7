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

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::config::{ConnectionConfig, FilePair};
use crate::executor::SftpExecutor;

use super::remote_file_name;

/// A destination counts as a directory when it says so with a trailing
/// slash or already exists as one.
fn is_dir_destination(destination: &str) -> bool {
    destination.ends_with('/') || Path::new(destination).is_dir()
}

async fn ensure_local_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).await.with_context(|| {
            format!("failed to create destination directory: {}", dir.display())
        })?;
    }
    Ok(())
}

/// Download the positional paths: every path but the last is a remote
/// source, the last is the local destination. One source targets the
/// destination literally unless it names a directory; several sources
/// land in the destination directory under their own file names.
pub async fn download_files(
    executor: &SftpExecutor,
    connection: &ConnectionConfig,
    paths: &[String],
) -> Result<()> {
    let (destination, sources) = paths
        .split_last()
        .context("download needs at least one source and a destination")?;

    if let [source] = sources {
        let local_path = if is_dir_destination(destination) {
            ensure_local_dir(Path::new(destination)).await?;
            Path::new(destination).join(remote_file_name(source)?)
        } else {
            PathBuf::from(destination)
        };

        println!(
            "\n{} {} {} {} {}",
            "▶".cyan(),
            "Downloading".cyan().bold(),
            source.green(),
            "→".dimmed(),
            local_path.display()
        );
        executor
            .download_file(connection, source, &local_path)
            .await?;
        println!("  {} {}", "●".green(), "Download complete".green());
        return Ok(());
    }

    let target_dir = Path::new(destination);
    ensure_local_dir(target_dir).await?;

    let mut pairs = Vec::with_capacity(sources.len());
    for source in sources {
        let local_path = target_dir.join(remote_file_name(source)?);
        pairs.push(FilePair::new(local_path, source.clone()));
    }

    println!(
        "\n{} {} {} file(s) {} {} {}",
        "▶".cyan(),
        "Downloading".cyan().bold(),
        pairs.len().to_string().yellow(),
        "to".dimmed(),
        destination.green(),
        "(SFTP)".dimmed()
    );
    for pair in &pairs {
        println!("  {} {}", "•".dimmed(), pair.remote_path);
    }

    executor.download_files(connection, &pairs).await?;
    println!("  {} {}", "●".green(), "All downloads complete".green());
    Ok(())
}
