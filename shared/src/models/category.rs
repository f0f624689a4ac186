//! Category Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}
