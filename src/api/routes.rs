//! API Routes
//!
//! HTTP endpoint definitions for credits and customers.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use uuid::Uuid;

use crate::error::AppError;

use super::dto::{
    CreditDto, CreditView, CreditViewList, CustomerDto, CustomerIdQuery, CustomerUpdateDto,
    CustomerView,
};
use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::AppState;

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        // Credits
        .route("/credits", post(save_credit).get(find_all_credits_by_customer))
        .route("/credits/:credit_code", get(find_credit_by_code))
        // Customers
        .route("/customers", post(save_customer).patch(update_customer))
        .route("/customers/:customer_id", get(find_customer).delete(delete_customer))
}

// =========================================================================
// POST /credits
// =========================================================================

/// Request a credit for an existing customer
async fn save_credit(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreditDto>,
) -> Result<(StatusCode, Json<CreditView>), AppError> {
    let today = Local::now().date_naive();
    let command = request.into_command(today)?;

    let (credit, customer) = state.credits.save(command, today).await?;

    Ok((StatusCode::CREATED, Json(CreditView::new(&credit, &customer))))
}

// =========================================================================
// GET /credits?customerId=
// =========================================================================

/// List a customer's credits, oldest first
async fn find_all_credits_by_customer(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CustomerIdQuery>,
) -> Result<Json<Vec<CreditViewList>>, AppError> {
    let credits = state.credits.find_all_by_customer(query.customer_id).await?;

    Ok(Json(credits.iter().map(CreditViewList::from).collect()))
}

// =========================================================================
// GET /credits/:credit_code?customerId=
// =========================================================================

async fn find_credit_by_code(
    State(state): State<AppState>,
    ApiPath(credit_code): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<CustomerIdQuery>,
) -> Result<Json<CreditView>, AppError> {
    let (credit, customer) = state
        .credits
        .find_by_credit_code(query.customer_id, credit_code)
        .await?;

    Ok(Json(CreditView::new(&credit, &customer)))
}

// =========================================================================
// POST /customers
// =========================================================================

/// Register a customer
async fn save_customer(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CustomerDto>,
) -> Result<(StatusCode, Json<CustomerView>), AppError> {
    let command = request.into_command()?;
    let customer = state.customers.save(command).await?;

    Ok((StatusCode::CREATED, Json(customer.into())))
}

// =========================================================================
// GET /customers/:customer_id
// =========================================================================

async fn find_customer(
    State(state): State<AppState>,
    ApiPath(customer_id): ApiPath<i64>,
) -> Result<Json<CustomerView>, AppError> {
    let customer = state.customers.find_by_id(customer_id).await?;
    Ok(Json(customer.into()))
}

// =========================================================================
// PATCH /customers?customerId=
// =========================================================================

async fn update_customer(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CustomerIdQuery>,
    ApiJson(request): ApiJson<CustomerUpdateDto>,
) -> Result<Json<CustomerView>, AppError> {
    let command = request.into_command(query.customer_id)?;
    let customer = state.customers.update(command).await?;

    Ok(Json(customer.into()))
}

// =========================================================================
// DELETE /customers/:customer_id
// =========================================================================

/// Delete a customer and their credits
async fn delete_customer(
    State(state): State<AppState>,
    ApiPath(customer_id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    state.customers.delete(customer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
