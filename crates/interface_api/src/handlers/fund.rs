//! Fund handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};

use core_kernel::{FundId, Paginated};
use domain_investment::Fund;

use crate::dto::fund::FundResponse;
use crate::dto::pagination::PaginationQuery;
use crate::handlers::parse_id;
use crate::{error::ApiError, AppState};

/// Lists funds ordered by name
pub async fn list_funds(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<Paginated<FundResponse>>, ApiError> {
    let page = query.page_request();

    let total = state.funds.count().await?;
    let rows = state.funds.list(page.limit(), page.offset()).await?;

    let funds = rows
        .into_iter()
        .map(|row| FundResponse::from(Fund::from(row)))
        .collect();

    Ok(Json(Paginated::new(funds, page, u64::try_from(total).unwrap_or_default())))
}

/// Gets a fund by ID
pub async fn get_fund(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FundResponse>, ApiError> {
    let id: FundId = parse_id(&id, "fund ID")?;

    let row = state.funds.get_by_id(*id.as_uuid()).await?;
    Ok(Json(Fund::from(row).into()))
}
