use crate::app::ProductService;
use crate::domain::{Product, ProductFields};
use crate::error::StoreResult;
use crate::transport::http::docs;
use crate::transport::http::error::{ApiError, ApiResult};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    responses(
        (status = 200, description = "The list of the products", body = [docs::Product])
    )
)]
pub async fn list_products_handler(State(state): State<AppState>) -> Json<Vec<Product>> {
    let service = state.product_service.read().await;
    Json(service.list().to_vec())
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "The product id")
    ),
    responses(
        (status = 200, description = "The product description by id", body = docs::Product),
        (status = 404, description = "The product was not found")
    )
)]
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    let service = state.product_service.read().await;
    Ok(Json(service.get(&id)?))
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = docs::ProductInput,
    responses(
        (status = 200, description = "The product was successfully created", body = docs::Product),
        (status = 422, description = "Unprocessable entity (body is not a JSON object)", body = ApiResponse),
        (status = 500, description = "Some server error", body = ApiResponse)
    )
)]
pub async fn create_product_handler(
    State(state): State<AppState>,
    request: Result<Json<ProductFields>, JsonRejection>,
) -> ApiResult<Json<Product>> {
    let Json(fields) = request?;
    let product = mutate(&state, move |service| service.create(fields)).await?;
    Ok(Json(product))
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "The product id")
    ),
    request_body = docs::ProductInput,
    responses(
        (status = 200, description = "The product was updated", body = docs::Product),
        (status = 404, description = "The product was not found"),
        (status = 422, description = "Unprocessable entity (body is not a JSON object)", body = ApiResponse),
        (status = 500, description = "Some error happened", body = ApiResponse)
    )
)]
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<ProductFields>, JsonRejection>,
) -> ApiResult<Json<Product>> {
    let Json(fields) = request?;
    let product = mutate(&state, move |service| service.update(&id, fields)).await?;
    Ok(Json(product))
}

/// Deleting an unknown id still answers 200.
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "The product id")
    ),
    responses(
        (status = 200, description = "The product was deleted (or did not exist)"),
        (status = 500, description = "Some error happened", body = ApiResponse)
    )
)]
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    mutate(&state, move |service| service.delete(&id)).await?;
    Ok(StatusCode::OK)
}

/// Runs a mutation on the blocking pool while holding the service's write lock.
/// Every mutation rewrites and syncs the products file, which must not stall an async worker.
async fn mutate<T, F>(state: &AppState, op: F) -> ApiResult<T>
where
    F: FnOnce(&mut ProductService) -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let mut service = state.product_service.clone().write_owned().await;
    tokio::task::spawn_blocking(move || op(&mut *service))
        .await
        .map_err(|e| ApiError::Internal(format!("product write task failed: {}", e)))?
        .map_err(ApiError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[tokio::test]
    async fn mutations_run_off_the_async_worker() {
        let state = AppState::new(ProductService::in_memory().unwrap());
        let caller = thread::current().id();

        let worker = mutate(&state, |service| {
            service.delete("doesnotexist")?;
            Ok(thread::current().id())
        })
        .await
        .unwrap();

        assert_ne!(worker, caller);
    }

    #[tokio::test]
    async fn mutation_errors_keep_their_status() {
        let state = AppState::new(ProductService::in_memory().unwrap());

        let err = mutate(&state, |service| service.update("nope", ProductFields::new()))
            .await
            .err()
            .unwrap();

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_handler_works_on_a_single_threaded_runtime() {
        let state = AppState::new(ProductService::in_memory().unwrap());
        let mut fields = ProductFields::new();
        fields.insert("name".to_string(), serde_json::json!("Laptop"));

        let Json(created) = create_product_handler(State(state.clone()), Ok(Json(fields)))
            .await
            .unwrap();

        assert_eq!(state.product_service.read().await.get(&created.id).unwrap(), created);
    }
}
