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

//! Per-operation outcomes and their reporting.
//!
//! [`report`] emits exactly one leveled event per outcome: info on
//! success, error on failure, always naming the target path(s). It only
//! logs, so it cannot fail.

use tracing::{error, info};

/// Which remote action an outcome describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Upload,
    Download,
    Delete,
    CreateDir,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Upload => "upload",
            Self::Download => "download",
            Self::Delete => "delete",
            Self::CreateDir => "mkdir",
        }
    }

    fn gerund(self) -> &'static str {
        match self {
            Self::List => "listing",
            Self::Upload => "uploading",
            Self::Download => "downloading",
            Self::Delete => "deleting",
            Self::CreateDir => "creating directory",
        }
    }
}

/// What happened to one operation against its target path(s).
///
/// Produced per operation and consumed immediately by [`report`];
/// never persisted. Transfer targets are ordered source first: upload
/// carries [local, remote], download carries [remote, local].
#[derive(Debug, Clone)]
pub struct OperationOutcome {
    pub operation: Operation,
    pub targets: Vec<String>,
    pub succeeded: bool,
    pub detail: Option<String>,
}

impl OperationOutcome {
    pub fn success(operation: Operation, targets: Vec<String>) -> Self {
        Self {
            operation,
            targets,
            succeeded: true,
            detail: None,
        }
    }

    pub fn success_with_detail(
        operation: Operation,
        targets: Vec<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            targets,
            succeeded: true,
            detail: Some(detail.into()),
        }
    }

    pub fn failure(operation: Operation, targets: Vec<String>, error: &dyn std::fmt::Display) -> Self {
        Self {
            operation,
            targets,
            succeeded: false,
            detail: Some(error.to_string()),
        }
    }

    fn message(&self) -> String {
        let detail = self.detail.as_deref();
        let fail_detail = detail.unwrap_or("unknown error");
        match (self.operation, self.targets.as_slice()) {
            (Operation::List, [dir]) => {
                if self.succeeded {
                    match detail {
                        Some(detail) => format!("Listed [{dir}]: {detail}"),
                        None => format!("Listed [{dir}]"),
                    }
                } else {
                    format!("Failed listing [{dir}]: {fail_detail}")
                }
            }
            (Operation::Upload, [local, remote]) => {
                if self.succeeded {
                    format!("File [{local}] successfully uploaded to [{remote}]")
                } else {
                    format!("Failed uploading the file [{local}] to [{remote}]: {fail_detail}")
                }
            }
            (Operation::Download, [remote, local]) => {
                if self.succeeded {
                    format!("File [{remote}] successfully downloaded to [{local}]")
                } else {
                    format!("Failed downloading the file [{remote}] to [{local}]: {fail_detail}")
                }
            }
            (Operation::Delete, [path]) => {
                if self.succeeded {
                    format!("File [{path}] successfully deleted")
                } else {
                    format!("Failed deleting the file [{path}]: {fail_detail}")
                }
            }
            (Operation::CreateDir, [dir]) => {
                if self.succeeded {
                    format!("Directory [{dir}] successfully created")
                } else {
                    format!("Failed creating the directory [{dir}]: {fail_detail}")
                }
            }
            // Batch-level events carry a "<n> files" target or several paths.
            (_, targets) => {
                let targets = targets.join(", ");
                if self.succeeded {
                    match detail {
                        Some(detail) => {
                            format!("Completed {} [{targets}]: {detail}", self.operation.as_str())
                        }
                        None => format!("Completed {} [{targets}]", self.operation.as_str()),
                    }
                } else {
                    format!(
                        "Failed {} [{targets}]: {fail_detail}",
                        self.operation.gerund()
                    )
                }
            }
        }
    }
}

/// Emit one leveled event for `outcome`.
pub fn report(outcome: &OperationOutcome) {
    let operation = outcome.operation.as_str();
    let message = outcome.message();
    if outcome.succeeded {
        info!(operation, "{message}");
    } else {
        error!(operation, "{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_outcome_has_no_detail() {
        let outcome = OperationOutcome::success(Operation::Upload, vec!["a.txt".to_string()]);
        assert!(outcome.succeeded);
        assert!(outcome.detail.is_none());
        assert_eq!(outcome.operation.as_str(), "upload");
    }

    #[test]
    fn failure_outcome_carries_the_error_text() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let outcome = OperationOutcome::failure(Operation::Delete, vec!["a.txt".to_string()], &err);
        assert!(!outcome.succeeded);
        assert_eq!(outcome.detail.as_deref(), Some("denied"));
    }

    #[test]
    fn upload_messages_name_both_sides() {
        let ok = OperationOutcome::success(
            Operation::Upload,
            vec!["dist/site.tar.gz".to_string(), "/srv/site.tar.gz".to_string()],
        );
        assert_eq!(
            ok.message(),
            "File [dist/site.tar.gz] successfully uploaded to [/srv/site.tar.gz]"
        );

        let failed = OperationOutcome::failure(
            Operation::Upload,
            vec!["dist/site.tar.gz".to_string(), "/srv/site.tar.gz".to_string()],
            &"permission denied",
        );
        assert_eq!(
            failed.message(),
            "Failed uploading the file [dist/site.tar.gz] to [/srv/site.tar.gz]: permission denied"
        );
    }

    #[test]
    fn download_messages_lead_with_the_remote_side() {
        let ok = OperationOutcome::success(
            Operation::Download,
            vec!["/var/log/app.log".to_string(), "./app.log".to_string()],
        );
        assert_eq!(
            ok.message(),
            "File [/var/log/app.log] successfully downloaded to [./app.log]"
        );
    }

    #[test]
    fn listing_message_carries_the_entry_count() {
        let ok = OperationOutcome::success_with_detail(
            Operation::List,
            vec!["/var/www".to_string()],
            "4 entries",
        );
        assert_eq!(ok.message(), "Listed [/var/www]: 4 entries");
    }

    #[test]
    fn delete_and_mkdir_messages_name_the_path() {
        let deleted =
            OperationOutcome::success(Operation::Delete, vec!["old.log".to_string()]);
        assert_eq!(deleted.message(), "File [old.log] successfully deleted");

        let failed = OperationOutcome::failure(
            Operation::CreateDir,
            vec!["/srv/new".to_string()],
            &"already exists",
        );
        assert_eq!(
            failed.message(),
            "Failed creating the directory [/srv/new]: already exists"
        );
    }

    #[test]
    fn batch_level_failures_fall_back_to_a_generic_shape() {
        let failed = OperationOutcome::failure(
            Operation::Upload,
            vec!["3 files".to_string()],
            &"connection refused",
        );
        assert_eq!(
            failed.message(),
            "Failed uploading [3 files]: connection refused"
        );

        let failed = OperationOutcome::failure(
            Operation::Delete,
            vec!["a.log".to_string(), "b.log".to_string()],
            &"connection refused",
        );
        assert_eq!(
            failed.message(),
            "Failed deleting [a.log, b.log]: connection refused"
        );
    }

    #[test]
    fn report_never_panics() {
        report(&OperationOutcome::success(
            Operation::List,
            vec![".".to_string()],
        ));
        report(&OperationOutcome::failure(
            Operation::Download,
            vec!["r.txt".to_string(), "l.txt".to_string()],
            &"broken",
        ));
    }
}
