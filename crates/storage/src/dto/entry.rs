use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Optional body of an entry request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateEntryRequest {
    #[serde(default)]
    pub submission_data: Option<serde_json::Value>,
}
