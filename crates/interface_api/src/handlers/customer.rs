//! Retail customer handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use validator::Validate;

use core_kernel::CustomerId;
use domain_investment::RetailCustomer;

use crate::dto::customer::{CreateRetailCustomerRequest, CustomerEmailPath, CustomerResponse};
use crate::handlers::parse_id;
use crate::{error::ApiError, AppState};

/// Creates a retail customer
pub async fn create_retail_customer(
    State(state): State<AppState>,
    Json(request): Json<CreateRetailCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), ApiError> {
    request.validate()?;

    let row = state.customers.create(&request.into_new_customer()).await?;
    let customer = RetailCustomer::from(row);
    info!(customer_id = %customer.id, "Retail customer created");

    Ok((StatusCode::CREATED, Json(customer.into())))
}

/// Gets a retail customer by ID
pub async fn get_retail_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let id: CustomerId = parse_id(&id, "customer ID")?;

    let row = state.customers.get_by_id(*id.as_uuid()).await?;
    Ok(Json(RetailCustomer::from(row).into()))
}

/// Gets a retail customer by email address
pub async fn get_retail_customer_by_email(
    State(state): State<AppState>,
    Path(path): Path<CustomerEmailPath>,
) -> Result<Json<CustomerResponse>, ApiError> {
    path.validate()?;

    let row = state.customers.get_by_email(&path.normalised()).await?;
    Ok(Json(RetailCustomer::from(row).into()))
}
