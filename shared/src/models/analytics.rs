//! Dashboard Analytics Models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use super::GeneratedReview;

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Aggregation window of the stats endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Period {
    Last7Days,
    Last30Days,
    #[default]
    AllTime,
}

impl Period {
    pub fn days(&self) -> Option<i64> {
        match self {
            Self::Last7Days => Some(7),
            Self::Last30Days => Some(30),
            Self::AllTime => None,
        }
    }

    /// Lower bound (Unix millis) of the window ending at `now`
    pub fn since(&self, now: i64) -> Option<i64> {
        self.days().map(|d| now - d * DAY_MILLIS)
    }
}

impl FromStr for Period {
    type Err = String;

    /// Accepts `7`, `30`, `all` and the `7d` / `30d` spellings; blank means all
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "7" | "7d" => Ok(Self::Last7Days),
            "30" | "30d" => Ok(Self::Last30Days),
            "" | "all" => Ok(Self::AllTime),
            other => Err(format!("unsupported period: {other}")),
        }
    }
}

/// `?period=` query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeriodQuery {
    pub period: Option<String>,
}

/// Review count for one server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ServerStat {
    pub server_name: String,
    pub count: i64,
}

/// Selection count for one dish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DishStat {
    pub dish_name: String,
    pub dish_category: String,
    pub count: i64,
}

/// Occurrence count of one tag value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: i64,
}

/// Qualitative tag breakdown: category → values by frequency
pub type QualitativeSynthesis = BTreeMap<String, Vec<ValueCount>>;

/// One day of the review trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// `YYYY-MM-DD` (UTC)
    pub date: String,
    pub count: i64,
}

/// `GET /dashboard` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_reviews: i64,
    pub reviews_last_7_days: i64,
    pub new_feedback_count: i64,
    pub server_stats: Vec<ServerStat>,
    pub trend: Vec<TrendPoint>,
    pub recent_reviews: Vec<GeneratedReview>,
}

/// Row counts removed by a data reset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResetSummary {
    pub generated_reviews: u64,
    pub menu_selections: u64,
    pub qualitative_feedback: u64,
    pub internal_feedback: u64,
}
