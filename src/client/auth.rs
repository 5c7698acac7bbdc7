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

//! Authentication method selection and execution.
//!
//! A [`ConnectionConfig`] maps onto exactly one [`AuthMethod`] by a fixed
//! precedence: a key file wins over inline key material, which wins over
//! the password. Secrets are held in [`Zeroizing`] buffers so they are
//! wiped on drop.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use russh::client::{Handle, Handler};
use zeroize::Zeroizing;

use super::error::{Error, Result};
use crate::config::ConnectionConfig;

/// How to prove the user's identity to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AuthMethod {
    Password(Zeroizing<String>),
    PrivateKey {
        /// Entire contents of a private key file.
        key_data: Zeroizing<String>,
        key_pass: Option<Zeroizing<String>>,
    },
    PrivateKeyFile {
        key_file_path: PathBuf,
        key_pass: Option<Zeroizing<String>>,
    },
}

impl AuthMethod {
    pub fn with_password(password: &str) -> Self {
        Self::Password(Zeroizing::new(password.to_string()))
    }

    pub fn with_key(key: &str, passphrase: Option<&str>) -> Self {
        Self::PrivateKey {
            key_data: Zeroizing::new(key.to_string()),
            key_pass: passphrase.map(|p| Zeroizing::new(p.to_string())),
        }
    }

    pub fn with_key_file<T: AsRef<Path>>(key_file_path: T, passphrase: Option<&str>) -> Self {
        Self::PrivateKeyFile {
            key_file_path: key_file_path.as_ref().to_path_buf(),
            key_pass: passphrase.map(|p| Zeroizing::new(p.to_string())),
        }
    }

    /// Select the method for a configuration.
    ///
    /// Precedence: `key_file`, then `key`, then `username`/`password`.
    /// A missing password means the empty password.
    pub fn from_config(config: &ConnectionConfig) -> Self {
        if let Some(key_file) = &config.key_file {
            Self::with_key_file(key_file, config.key_passphrase.as_deref())
        } else if let Some(key) = &config.key {
            Self::with_key(key, config.key_passphrase.as_deref())
        } else {
            Self::with_password(config.password.as_deref().unwrap_or_default())
        }
    }

    /// Short name used in log and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Password(_) => "password",
            Self::PrivateKey { .. } => "private key",
            Self::PrivateKeyFile { .. } => "private key file",
        }
    }
}

/// Perform authentication on a freshly connected handle.
pub(super) async fn authenticate<H: Handler>(
    handle: &mut Handle<H>,
    username: &str,
    auth: AuthMethod,
) -> Result<()> {
    let method = auth.name();
    let rejected = || Error::Auth {
        username: username.to_string(),
        method,
    };

    match auth {
        AuthMethod::Password(password) => {
            let answer = handle.authenticate_password(username, &**password).await?;
            if !answer.success() {
                return Err(rejected());
            }
        }
        AuthMethod::PrivateKey { key_data, key_pass } => {
            let key = russh::keys::decode_secret_key(&key_data, key_pass.as_ref().map(|p| &***p))
                .map_err(Error::AuthConfig)?;
            let answer = handle
                .authenticate_publickey(
                    username,
                    russh::keys::PrivateKeyWithHashAlg::new(
                        Arc::new(key),
                        handle.best_supported_rsa_hash().await?.flatten(),
                    ),
                )
                .await?;
            if !answer.success() {
                return Err(rejected());
            }
        }
        AuthMethod::PrivateKeyFile {
            key_file_path,
            key_pass,
        } => {
            let key =
                russh::keys::load_secret_key(&key_file_path, key_pass.as_ref().map(|p| &***p))
                    .map_err(Error::AuthConfig)?;
            let answer = handle
                .authenticate_publickey(
                    username,
                    russh::keys::PrivateKeyWithHashAlg::new(
                        Arc::new(key),
                        handle.best_supported_rsa_hash().await?.flatten(),
                    ),
                )
                .await?;
            if !answer.success() {
                return Err(rejected());
            }
        }
    }
    Ok(())
}
