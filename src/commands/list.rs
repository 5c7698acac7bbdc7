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

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::config::ConnectionConfig;
use crate::executor::SftpExecutor;

/// Print a remote directory listing in the server's order.
pub async fn list_directory(
    executor: &SftpExecutor,
    connection: &ConnectionConfig,
    directory: &str,
) -> Result<()> {
    let entries = executor.list_dir(connection, directory).await?;

    println!(
        "\n{} {} {}",
        "▶".cyan(),
        "Listing".cyan().bold(),
        directory.green()
    );

    if entries.is_empty() {
        println!("  {}", "(empty)".dimmed());
        return Ok(());
    }

    for entry in &entries {
        let marker = if entry.is_dir { "d" } else { "-" };
        let size = entry
            .size
            .map_or_else(|| "-".to_string(), |bytes| bytes.to_string());
        println!("  {marker} {size:>12} {}", entry.name);
    }
    println!(
        "\n  {} {} {}",
        "●".blue(),
        entries.len().to_string().yellow(),
        if entries.len() == 1 {
            "entry"
        } else {
            "entries"
        }
    );
    Ok(())
}
