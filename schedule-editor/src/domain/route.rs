//! Routes.

use serde::{Deserialize, Serialize};

/// A route, read here only to backfill trip fields from its pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: String,
    pub route_short_name: Option<String>,
}
