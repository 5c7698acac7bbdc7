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
use clap::Parser;
use owo_colors::OwoColorize;

use sftpc::{
    cli::{Cli, Commands},
    commands::{delete, download, list, mkdir, upload},
    config::{Config, ConnectionOverrides},
    executor::SftpExecutor,
    utils::init_logging,
};

/// Read a secret from the environment variable named by `var`.
fn read_env_secret(var: &str) -> Result<String> {
    std::env::var(var).with_context(|| format!("environment variable {var} is not set"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load_with_priority(cli.config.as_deref())?;

    let mut overrides = ConnectionOverrides {
        host: cli.host.clone(),
        port: cli.port,
        username: cli.username.clone(),
        key_file: cli.key_file.clone(),
        host_check: cli.known_hosts.clone(),
        connect_timeout: cli.connect_timeout,
        ..Default::default()
    };
    if let Some(var) = &cli.password_env {
        overrides.password = Some(read_env_secret(var)?);
    }
    if let Some(var) = &cli.key_env {
        overrides.key = Some(read_env_secret(var)?);
    }
    if let Some(var) = &cli.key_passphrase_env {
        overrides.key_passphrase = Some(read_env_secret(var)?);
    }

    let connection = config.resolve_connection(cli.server.as_deref(), overrides)?;
    let executor = SftpExecutor::new();

    match &cli.command {
        Commands::List { directory } => {
            list::list_directory(&executor, &connection, directory).await
        }
        Commands::Upload { paths } => upload::upload_files(&executor, &connection, paths).await,
        Commands::Download { paths } => {
            download::download_files(&executor, &connection, paths).await
        }
        Commands::Delete { paths } => delete::delete_files(&executor, &connection, paths).await,
        Commands::Mkdir { directory } => {
            mkdir::create_directory(&executor, &connection, directory).await
        }
    }
}
