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
use std::path::PathBuf;

use crate::config::{ConnectionConfig, FilePair};
use crate::executor::SftpExecutor;

use super::{join_remote, source_file_name};

/// Upload the positional paths: every path but the last is a local
/// source, the last is the remote destination. One source targets the
/// destination literally unless it ends with '/'; several sources need
/// a directory destination and keep their own file names.
pub async fn upload_files(
    executor: &SftpExecutor,
    connection: &ConnectionConfig,
    paths: &[String],
) -> Result<()> {
    let (destination, sources) = paths
        .split_last()
        .context("upload needs at least one source and a destination")?;

    if let [source] = sources {
        let source = PathBuf::from(source);
        let remote_path = if destination.ends_with('/') {
            join_remote(destination, &source_file_name(&source)?)
        } else {
            destination.clone()
        };

        println!(
            "\n{} {} {} {} {}",
            "▶".cyan(),
            "Uploading".cyan().bold(),
            source.display(),
            "→".dimmed(),
            remote_path.green()
        );
        executor
            .upload_file(connection, &source, &remote_path)
            .await?;
        println!("  {} {}", "●".green(), "Upload complete".green());
        return Ok(());
    }

    let mut pairs = Vec::with_capacity(sources.len());
    for source in sources {
        let local_path = PathBuf::from(source);
        let remote_path = join_remote(destination, &source_file_name(&local_path)?);
        pairs.push(FilePair::new(local_path, remote_path));
    }

    println!(
        "\n{} {} {} file(s) {} {} {}",
        "▶".cyan(),
        "Uploading".cyan().bold(),
        pairs.len().to_string().yellow(),
        "to".dimmed(),
        destination.green(),
        "(SFTP)".dimmed()
    );
    for pair in &pairs {
        println!("  {} {}", "•".dimmed(), pair.local_path.display());
    }

    executor.upload_files(connection, &pairs).await?;
    println!("  {} {}", "●".green(), "All uploads complete".green());
    Ok(())
}
