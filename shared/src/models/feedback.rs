//! Internal Feedback Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Triage status of an internal feedback entry
///
/// Moves forward only: `new → read → archived` (or `new → archived`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStatus {
    New,
    Read,
    Archived,
}

impl FeedbackStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Archived => "archived",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::New => 0,
            Self::Read => 1,
            Self::Archived => 2,
        }
    }

    /// Whether staff may move an entry from `self` to `next`.
    ///
    /// Re-applying the current status is allowed and changes nothing.
    pub fn can_transition_to(&self, next: FeedbackStatus) -> bool {
        next.rank() >= self.rank()
    }
}

impl fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(Self::New),
            "read" => Ok(Self::Read),
            "archived" => Ok(Self::Archived),
            other => Err(format!("unknown feedback status: {other}")),
        }
    }
}

/// Internal feedback row, joined with the referenced server's name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InternalFeedback {
    pub id: i64,
    pub text: String,
    pub status: FeedbackStatus,
    pub created_at: i64,
    pub server_id: Option<i64>,
    pub server_name: Option<String>,
}

/// Query string of the feedback list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackQuery {
    pub status: Option<String>,
    pub search: Option<String>,
}

/// Status change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackStatusUpdate {
    #[serde(default)]
    pub status: String,
}
