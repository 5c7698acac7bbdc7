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

//! SFTP client built on russh.
//!
//! One [`Client`] is one authenticated connection; each file operation
//! opens its own SFTP channel on it. The SSH transport, key exchange, and
//! SFTP protocol all live in the underlying libraries; this layer chooses
//! credentials, opens channels, and maps errors.

mod auth;
mod connection;
mod error;
mod operations;

pub use auth::AuthMethod;
pub use connection::Client;
pub use error::{Error, RemoteError, Result};
pub use operations::RemoteEntry;
