//! HTTP API Layer
//!
//! REST API for the ISA investment service using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: request handlers for customers, funds and investments
//! - **Middleware**: request ids, request logging, tracing, timeouts
//! - **DTOs**: request/response bodies with the camelCase wire shape
//! - **Error Handling**: consistent JSON error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, ApiConfig};
//!
//! let app = create_router(pool, ApiConfig::default());
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use domain_investment::{InvestmentPort, InvestmentService};
use infra_db::{CustomerRepository, FundRepository, PostgresInvestmentAdapter};

pub use crate::config::ApiConfig;
pub use crate::error::ApiError;

use crate::handlers::{customer, fund, health, investment};
use crate::middleware::request_logging_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub investments: InvestmentService,
    pub customers: CustomerRepository,
    pub funds: FundRepository,
    pub config: ApiConfig,
}

impl AppState {
    /// State backed entirely by PostgreSQL
    pub fn new(pool: PgPool, config: ApiConfig) -> Self {
        let adapter = PostgresInvestmentAdapter::new(pool.clone(), config.adapter_settings());
        Self::with_investment_port(pool, Arc::new(adapter), config)
    }

    /// State with a caller-supplied investment port
    pub fn with_investment_port(
        pool: PgPool,
        port: Arc<dyn InvestmentPort>,
        config: ApiConfig,
    ) -> Self {
        Self {
            investments: InvestmentService::new(port),
            customers: CustomerRepository::new(pool.clone()),
            funds: FundRepository::new(pool.clone()),
            pool,
            config,
        }
    }
}

/// Creates the main API router backed by PostgreSQL
pub fn create_router(pool: PgPool, config: ApiConfig) -> Router {
    build_router(AppState::new(pool, config))
}

/// Creates the API router for the given state
pub fn build_router(state: AppState) -> Router {
    let request_timeout = state.config.request_timeout();

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let customer_routes = Router::new()
        .route("/retail", post(customer::create_retail_customer))
        .route("/email/:email", get(customer::get_retail_customer_by_email))
        .route("/:id", get(customer::get_retail_customer));

    let fund_routes = Router::new()
        .route("/", get(fund::list_funds))
        .route("/:id", get(fund::get_fund));

    let investment_routes = Router::new()
        .route("/", post(investment::create_investment))
        .route("/:id", get(investment::get_investment))
        .route(
            "/customer/:customer_id",
            get(investment::list_customer_investments),
        )
        .route(
            "/customer/:customer_id/fund/:fund_id",
            get(investment::get_customer_fund_total),
        );

    Router::new()
        .merge(health_routes)
        .nest("/customers", customer_routes)
        .nest("/funds", fund_routes)
        .nest("/investments", investment_routes)
        .layer(
            ServiceBuilder::new()
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .map_response(|res: axum::http::Response<_>| res.map(axum::body::Body::new))
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(axum_middleware::from_fn(request_logging_middleware)),
        )
        .with_state(state)
}
