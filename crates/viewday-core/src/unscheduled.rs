//! Unscheduled candidates: notes inside a rule's scope that lack a usable
//! date value.

use serde::{Deserialize, Serialize};

/// One detector hit. Ephemeral, deduplicated by path per detector call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnscheduledItem {
    pub path: String,
    pub basename: String,
    pub folder: String,
    /// Id of the rule that matched first.
    pub source_id: String,
    pub property: String,
    pub source_color: String,
    /// Best-effort duration in minutes, when the note carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}
