use crate::app::ProductService;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tokio::sync::RwLock;
use utoipa::ToSchema;

/// Shared handler state.
///
/// Reads take the service's read lock; create/update/delete take the write lock, so only one
/// read-modify-persist sequence runs at a time and concurrent writers cannot lose updates.
#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<RwLock<ProductService>>,
}

impl AppState {
    pub fn new(product_service: ProductService) -> Self {
        Self {
            product_service: Arc::new(RwLock::new(product_service)),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
