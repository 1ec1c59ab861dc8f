use serde::{Deserialize, Serialize};
use warden_core::VersionsReport;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionsResponse {
    pub applied: u64,
    #[serde(default)]
    pub remote: Option<u64>,
    /// Why `remote` is missing, when the version feed failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_error: Option<String>,
    pub update_available: bool,
}

impl From<VersionsReport> for VersionsResponse {
    fn from(report: VersionsReport) -> Self {
        Self {
            update_available: report.update_available(),
            applied: report.applied,
            remote: report.remote,
            remote_error: report.remote_error,
        }
    }
}
