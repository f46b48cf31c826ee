//! Public catalog snapshot served to the customer UI

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{MenuOptionSummary, ServerSummary};

/// `GET /api/public/data` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublicData {
    pub servers: Vec<ServerSummary>,
    /// Menu options grouped by category key
    pub flavors: BTreeMap<String, Vec<MenuOptionSummary>>,
}
