use serde::Serialize;
use utoipa::ToSchema;

/// Immutable catalog entry. Prices are integer minor currency units.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[schema(example = "ai-agents")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub duration: String,
    pub units: String,
    pub schedule: String,
    pub category: String,
    #[schema(example = 19900)]
    pub price: i64,
    pub is_premium: bool,
}

impl Course {
    pub fn is_free(&self) -> bool {
        self.price <= 0
    }
}
