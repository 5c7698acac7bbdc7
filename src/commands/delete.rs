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

/// Delete the given remote files. A single path must exist; with
/// several paths every one is attempted even when some fail.
pub async fn delete_files(
    executor: &SftpExecutor,
    connection: &ConnectionConfig,
    paths: &[String],
) -> Result<()> {
    if let [path] = paths {
        executor.delete_file(connection, path).await?;
        println!("\n{} {} {}", "●".green(), "Deleted".green(), path);
        return Ok(());
    }

    executor.delete_files(connection, paths).await?;
    println!(
        "\n{} {} {} {}",
        "●".green(),
        "Deleted".green(),
        paths.len().to_string().yellow(),
        "files"
    );
    Ok(())
}
