//! Review Generation Models

use serde::{Deserialize, Serialize};

/// One customer-selected tag: a (category, value) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewTag {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub value: String,
}

impl ReviewTag {
    pub fn new(category: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            value: value.into(),
        }
    }
}

/// `POST /generate-review` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateReviewRequest {
    /// Output language code, defaults to `fr`
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub tags: Vec<ReviewTag>,
    /// Free-text note routed to staff only
    #[serde(default)]
    pub private_feedback: Option<String>,
    /// Client flow that produced the request (e.g. `quick`, `guided`)
    #[serde(default)]
    pub mode: Option<String>,
}

/// `POST /generate-review` success body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerateReviewResponse {
    /// A review was generated
    Review { review: String },
    /// Only private feedback was sent; nothing to generate
    FeedbackOnly { message: String },
}

/// Generated review log row (keyed by server display name)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct GeneratedReview {
    pub id: i64,
    pub server_name: String,
    pub created_at: i64,
    pub mode: Option<String>,
}

/// Dish tag to append to the menu selection log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSelectionEntry {
    pub dish_name: String,
    pub dish_category: String,
}

/// Non-identity tag to append to the qualitative feedback log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualitativeEntry {
    pub category: String,
    pub value: String,
}
