//! Menu Option Model ("flavors": dishes and ambiance descriptors)

use serde::{Deserialize, Serialize};

/// Menu option entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuOption {
    pub id: i64,
    pub text: String,
    pub category: String,
}

/// Create menu option payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuOptionCreate {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub category: String,
}

/// Update menu option payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuOptionUpdate {
    pub text: Option<String>,
    pub category: Option<String>,
}

/// Public menu option entry, grouped by category on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuOptionSummary {
    pub id: i64,
    pub text: String,
}
