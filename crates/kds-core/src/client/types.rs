use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Completion endpoint exposed by the backend.
///
/// Backends in the field expose one of two contracts; a deployment picks one
/// and uses it consistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionRoute {
    /// `POST /complete/{id}`
    Complete,
    /// `POST /update_status/{id}?status=ready`
    #[default]
    UpdateStatus,
}

impl CompletionRoute {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionRoute::Complete => "complete",
            CompletionRoute::UpdateStatus => "update_status",
        }
    }
}

impl std::fmt::Display for CompletionRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompletionRoute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "complete" => Ok(CompletionRoute::Complete),
            "update_status" | "update-status" => Ok(CompletionRoute::UpdateStatus),
            other => Err(format!(
                "Unknown completion route '{}'. Valid options: complete, update-status",
                other
            )),
        }
    }
}
