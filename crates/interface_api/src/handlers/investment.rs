//! Investment handlers

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use core_kernel::{CustomerId, FundId, InvestmentId, Paginated};
use domain_investment::CreateInvestmentRequest;

use crate::dto::investment::{CustomerFundTotalResponse, InvestmentResponse};
use crate::dto::pagination::PaginationQuery;
use crate::handlers::{operation_metadata, parse_id};
use crate::{error::ApiError, AppState};

/// Records an investment
pub async fn create_investment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateInvestmentRequest>,
) -> Result<(StatusCode, Json<InvestmentResponse>), ApiError> {
    let metadata = operation_metadata(&state, &headers);
    let investment = state
        .investments
        .create_investment(request, Some(metadata))
        .await?;

    Ok((StatusCode::CREATED, Json(investment.into())))
}

/// Gets an investment by ID
pub async fn get_investment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<InvestmentResponse>, ApiError> {
    let id: InvestmentId = parse_id(&id, "investment ID")?;
    let metadata = operation_metadata(&state, &headers);

    let investment = state.investments.get_investment(id, Some(metadata)).await?;
    Ok(Json(investment.into()))
}

/// Lists a customer's investments, oldest first
pub async fn list_customer_investments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(customer_id): Path<String>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<Paginated<InvestmentResponse>>, ApiError> {
    let customer_id: CustomerId = parse_id(&customer_id, "customer ID")?;
    let metadata = operation_metadata(&state, &headers);

    let page = state
        .investments
        .list_investments_by_customer(customer_id, query.page_request(), Some(metadata))
        .await?;

    Ok(Json(page.map(InvestmentResponse::from)))
}

/// Gets the running total a customer holds in a fund
pub async fn get_customer_fund_total(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((customer_id, fund_id)): Path<(String, String)>,
) -> Result<Json<CustomerFundTotalResponse>, ApiError> {
    let customer_id: CustomerId = parse_id(&customer_id, "customer ID")?;
    let fund_id: FundId = parse_id(&fund_id, "fund ID")?;
    let metadata = operation_metadata(&state, &headers);

    let total = state
        .investments
        .get_customer_fund_total(customer_id, fund_id, Some(metadata))
        .await?;

    Ok(Json(total.into()))
}
