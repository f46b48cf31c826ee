//! Server Model (waiting staff roster)

use serde::{Deserialize, Serialize};

/// Server entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Server {
    pub id: i64,
    /// Display name, unique across the roster
    pub name: String,
    pub image_url: Option<String>,
}

/// Create server payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCreate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Update server payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerUpdate {
    pub name: Option<String>,
    pub image_url: Option<String>,
}

/// Public roster entry (no image reference)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ServerSummary {
    pub id: i64,
    pub name: String,
}
