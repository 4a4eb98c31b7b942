//! Recommendation route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use shopgraph_graph::queries::recommend::{
    self, CategoryRecommendation, Recommendation, DEFAULT_CATEGORY_LIMIT,
    DEFAULT_CUSTOMER_LIMIT, DEFAULT_PRODUCT_LIMIT,
};
use tracing::error;

use crate::state::AppState;

/// `?limit=N`. Negative or non-numeric values fail extraction with a 400.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CustomerRecsResponse {
    pub customer: String,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Serialize)]
pub struct ProductRecsResponse {
    pub product: String,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Serialize)]
pub struct CategoryRecsResponse {
    pub customer: String,
    pub recommendations: Vec<CategoryRecommendation>,
}

fn internal_error(route: &'static str, e: anyhow::Error) -> (StatusCode, String) {
    error!(route, error = %format!("{:#}", e), "Recommendation query failed");
    (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", e))
}

pub async fn for_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    Query(params): Query<LimitParams>,
) -> Result<Json<CustomerRecsResponse>, (StatusCode, String)> {
    let limit = params.limit.unwrap_or(DEFAULT_CUSTOMER_LIMIT);
    let recommendations = recommend::for_customer(&state.graph, &customer_id, limit)
        .await
        .map_err(|e| internal_error("customer", e))?;

    Ok(Json(CustomerRecsResponse { customer: customer_id, recommendations }))
}

pub async fn for_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Query(params): Query<LimitParams>,
) -> Result<Json<ProductRecsResponse>, (StatusCode, String)> {
    let limit = params.limit.unwrap_or(DEFAULT_PRODUCT_LIMIT);
    let recommendations = recommend::for_product(&state.graph, &product_id, limit)
        .await
        .map_err(|e| internal_error("product", e))?;

    Ok(Json(ProductRecsResponse { product: product_id, recommendations }))
}

pub async fn for_category(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    Query(params): Query<LimitParams>,
) -> Result<Json<CategoryRecsResponse>, (StatusCode, String)> {
    let limit = params.limit.unwrap_or(DEFAULT_CATEGORY_LIMIT);
    let recommendations = recommend::for_category(&state.graph, &customer_id, limit)
        .await
        .map_err(|e| internal_error("category", e))?;

    Ok(Json(CategoryRecsResponse { customer: customer_id, recommendations }))
}
