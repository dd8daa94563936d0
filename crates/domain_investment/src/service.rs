//! Investment application service
//!
//! Translates external requests into port calls. Apart from request
//! validation and pagination arithmetic it adds no branching of its own.
//! Port errors keep their variant; storage failures gain a prefix naming
//! the operation and identifiers.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use core_kernel::{
    CustomerId, FundId, HealthCheckResult, InvestmentId, OperationMetadata, PageRequest, Paginated,
};

use crate::error::InvestmentError;
use crate::investment::{CreateInvestmentRequest, Investment};
use crate::ports::InvestmentPort;
use crate::total::CustomerFundTotal;

/// Service for recording and reading investments
#[derive(Clone)]
pub struct InvestmentService {
    port: Arc<dyn InvestmentPort>,
}

impl InvestmentService {
    /// Creates a new investment service backed by `port`
    pub fn new(port: Arc<dyn InvestmentPort>) -> Self {
        Self { port }
    }

    /// Validates and records an investment
    ///
    /// # Errors
    ///
    /// - `Validation` for a missing field or non-positive amount; the port is
    ///   not called
    /// - whatever the port returns, with the customer and fund added to
    ///   storage failure messages
    #[instrument(
        skip(self, request, metadata),
        fields(customer_id = tracing::field::Empty, fund_id = tracing::field::Empty)
    )]
    pub async fn create_investment(
        &self,
        request: CreateInvestmentRequest,
        metadata: Option<OperationMetadata>,
    ) -> Result<Investment, InvestmentError> {
        let new_investment = request.validate().inspect_err(|e| {
            debug!(error = %e, "Rejected investment request");
        })?;

        let span = tracing::Span::current();
        span.record("customer_id", tracing::field::display(new_investment.customer_id));
        span.record("fund_id", tracing::field::display(new_investment.fund_id));

        let (customer_id, fund_id) = (new_investment.customer_id, new_investment.fund_id);
        let investment = self
            .port
            .create_investment(new_investment, metadata)
            .await
            .map_err(|e| {
                e.with_context(format!(
                    "making investment for customer {customer_id} in fund {fund_id}"
                ))
            })
            .inspect_err(|e| warn!(error = %e, kind = ?e.kind(), "Failed to make investment"))?;

        info!(investment_id = %investment.id, amount = %investment.amount, "Investment recorded");
        Ok(investment)
    }

    /// Lists a customer's investments with page metadata
    #[instrument(skip(self, metadata), fields(customer_id = %customer_id))]
    pub async fn list_investments_by_customer(
        &self,
        customer_id: CustomerId,
        page: PageRequest,
        metadata: Option<OperationMetadata>,
    ) -> Result<Paginated<Investment>, InvestmentError> {
        let (investments, total) = self
            .port
            .list_investments_by_customer(customer_id, page, metadata)
            .await
            .map_err(|e| e.with_context(format!("listing investments for customer {customer_id}")))
            .inspect_err(|e| warn!(error = %e, "Failed to list investments"))?;

        Ok(Paginated::new(investments, page, total))
    }

    #[instrument(skip(self, metadata), fields(investment_id = %id))]
    pub async fn get_investment(
        &self,
        id: InvestmentId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Investment, InvestmentError> {
        self.port.get_investment(id, metadata).await
    }

    #[instrument(skip(self, metadata), fields(customer_id = %customer_id, fund_id = %fund_id))]
    pub async fn get_customer_fund_total(
        &self,
        customer_id: CustomerId,
        fund_id: FundId,
        metadata: Option<OperationMetadata>,
    ) -> Result<CustomerFundTotal, InvestmentError> {
        self.port
            .get_customer_fund_total(customer_id, fund_id, metadata)
            .await
    }

    /// Health of the underlying store
    pub async fn health(&self) -> HealthCheckResult {
        self.port.health_check().await
    }
}
