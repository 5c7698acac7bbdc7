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

//! Command implementations invoked from `main`.

pub mod delete;
pub mod download;
pub mod list;
pub mod mkdir;
pub mod upload;

use anyhow::Result;
use std::path::Path;

/// File name of a local source as a UTF-8 string, for appending to a
/// directory destination.
fn source_file_name(source: &Path) -> Result<String> {
    let name = source
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("source path has no file name: {}", source.display()))?;
    Ok(name.to_string_lossy().into_owned())
}

/// Final component of a remote path.
fn remote_file_name(path: &str) -> Result<String> {
    let name = path.trim_end_matches('/').rsplit('/').next().unwrap_or("");
    if name.is_empty() {
        anyhow::bail!("remote path has no file name: {path}");
    }
    Ok(name.to_string())
}

/// Join `name` onto a remote directory, tolerating a trailing slash.
fn join_remote(dir: &str, name: &str) -> String {
    if dir.ends_with('/') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_file_name_is_extracted() {
        assert_eq!(
            source_file_name(Path::new("dist/site.tar.gz")).unwrap(),
            "site.tar.gz"
        );
        assert!(source_file_name(Path::new("..")).is_err());
    }

    #[test]
    fn remote_file_name_is_extracted() {
        assert_eq!(remote_file_name("/var/log/app.log").unwrap(), "app.log");
        assert_eq!(remote_file_name("app.log").unwrap(), "app.log");
        assert_eq!(remote_file_name("logs/app.log/").unwrap(), "app.log");
        assert!(remote_file_name("/").is_err());
    }

    #[test]
    fn join_remote_handles_trailing_slash() {
        assert_eq!(join_remote("/srv/static/", "a.css"), "/srv/static/a.css");
        assert_eq!(join_remote("/srv/static", "a.css"), "/srv/static/a.css");
    }
}
