use std::fmt;

use serde::{Deserialize, Serialize};

/// Status of a remote job as reported by the status endpoint.
///
/// `Completed` and `Error` are terminal. Any value the provider reports
/// outside the known set is kept as `Unknown` and treated like `Pending`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Pending,
    Completed,
    Error,
    Unknown(String),
}

impl JobStatus {
    /// Parse the wire representation (`"pending"`, `"completed"`, `"error"`).
    pub fn from_wire(value: &str) -> Self {
        match value {
            "pending" => JobStatus::Pending,
            "completed" => JobStatus::Completed,
            "error" => JobStatus::Error,
            other => JobStatus::Unknown(other.to_string()),
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Completed => "completed",
            JobStatus::Error => "error",
            JobStatus::Unknown(other) => other,
        }
    }

    /// Whether polling must stop once this status is observed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Error)
    }
}

impl From<String> for JobStatus {
    fn from(value: String) -> Self {
        JobStatus::from_wire(&value)
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        status.as_wire().to_string()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}
