//! Investment Domain Ports
//!
//! The `InvestmentPort` trait is the storage contract of the investment
//! write and read paths. Two adapters implement it:
//!
//! - **PostgreSQL Adapter** (`infra_db::adapters::PostgresInvestmentAdapter`):
//!   the production transactional boundary
//! - **Mock Adapter** ([`mock::MockInvestmentPort`]): an in-memory store with
//!   the same rules, for tests
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_investment::{InvestmentPort, InvestmentService};
//! use std::sync::Arc;
//!
//! let port: Arc<dyn InvestmentPort> = Arc::new(PostgresInvestmentAdapter::new(pool, settings));
//! let service = InvestmentService::new(port);
//! ```

use async_trait::async_trait;

use core_kernel::{
    CustomerId, DomainPort, FundId, HealthCheckable, InvestmentId, OperationMetadata, PageRequest,
};

use crate::error::InvestmentError;
use crate::investment::{Investment, NewInvestment};
use crate::total::CustomerFundTotal;

/// Storage contract for investments and customer fund totals
///
/// Every method takes optional [`OperationMetadata`]; a deadline carried
/// there bounds the whole call and an expired deadline surfaces as a
/// timed-out `InvestmentError::Storage`.
#[async_trait]
pub trait InvestmentPort: DomainPort + HealthCheckable {
    /// Stores a new investment and recomputes the customer fund total in
    /// the same transaction
    ///
    /// # Errors
    ///
    /// - `DifferentFundNotAllowed` when the fund restriction rejects the fund
    /// - `Storage` tagged with the failing stage; nothing is persisted
    async fn create_investment(
        &self,
        investment: NewInvestment,
        metadata: Option<OperationMetadata>,
    ) -> Result<Investment, InvestmentError>;

    /// Lists a customer's investments oldest first, together with the total
    /// number of that customer's investments
    async fn list_investments_by_customer(
        &self,
        customer_id: CustomerId,
        page: PageRequest,
        metadata: Option<OperationMetadata>,
    ) -> Result<(Vec<Investment>, u64), InvestmentError>;

    /// Retrieves an investment by ID, or `NotFound`
    async fn get_investment(
        &self,
        id: InvestmentId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Investment, InvestmentError>;

    /// Retrieves the running total for a customer and fund, or `NotFound`
    /// when the customer never invested in that fund
    async fn get_customer_fund_total(
        &self,
        customer_id: CustomerId,
        fund_id: FundId,
        metadata: Option<OperationMetadata>,
    ) -> Result<CustomerFundTotal, InvestmentError>;
}

/// Mock implementation of InvestmentPort for testing
///
/// Writes are serialised by a single lock, which stands in for the
/// per-customer advisory lock of the PostgreSQL adapter.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use chrono::Utc;
    use rust_decimal::Decimal;
    use tokio::sync::RwLock;

    use core_kernel::HealthCheckResult;

    use crate::customer::RetailCustomer;
    use crate::fund::Fund;
    use crate::rules::FundRestriction;
    use crate::StorageStage;

    #[derive(Debug, Default)]
    struct MockState {
        investments: Vec<Investment>,
        totals: HashMap<(CustomerId, FundId), CustomerFundTotal>,
        customers: HashMap<CustomerId, RetailCustomer>,
        funds: HashMap<FundId, Fund>,
    }

    impl MockState {
        fn existing_fund(&self, customer_id: CustomerId) -> Option<FundId> {
            self.investments
                .iter()
                .find(|i| i.customer_id == customer_id)
                .map(|i| i.fund_id)
        }

        fn recompute_total(&self, customer_id: CustomerId, fund_id: FundId) -> CustomerFundTotal {
            let customer = self.customers.get(&customer_id);
            CustomerFundTotal {
                customer_id,
                first_name: customer.map(|c| c.first_name.clone()).unwrap_or_default(),
                last_name: customer.map(|c| c.last_name.clone()).unwrap_or_default(),
                email: customer.map(|c| c.email.clone()).unwrap_or_default(),
                fund_id,
                fund_name: self.funds.get(&fund_id).map(|f| f.name.clone()).unwrap_or_default(),
                total_investment: CustomerFundTotal::sum_for(&self.investments, customer_id, fund_id),
            }
        }
    }

    /// In-memory mock implementation of InvestmentPort
    #[derive(Debug, Clone, Default)]
    pub struct MockInvestmentPort {
        state: Arc<RwLock<MockState>>,
        restriction: FundRestriction,
        fail_next_refresh: Arc<AtomicBool>,
        fail_reads: Arc<AtomicBool>,
    }

    impl MockInvestmentPort {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_restriction(mut self, restriction: FundRestriction) -> Self {
            self.restriction = restriction;
            self
        }

        /// Registers a customer so totals carry its name and email
        pub async fn add_customer(&self, customer: RetailCustomer) {
            self.state.write().await.customers.insert(customer.id, customer);
        }

        /// Registers a fund so totals carry its name
        pub async fn add_fund(&self, fund: Fund) {
            self.state.write().await.funds.insert(fund.id, fund);
        }

        /// Makes the next total recomputation fail, rolling back its insert
        pub fn fail_next_refresh(&self) {
            self.fail_next_refresh.store(true, Ordering::SeqCst);
        }

        /// Makes every read fail with a storage error until reset
        pub fn set_fail_reads(&self, fail: bool) {
            self.fail_reads.store(fail, Ordering::SeqCst);
        }

        /// Every committed investment, in insertion order
        pub async fn investments(&self) -> Vec<Investment> {
            self.state.read().await.investments.clone()
        }

        /// Sum of committed amounts for a pair, read straight from the rows
        pub async fn committed_sum(&self, customer_id: CustomerId, fund_id: FundId) -> Decimal {
            CustomerFundTotal::sum_for(&self.state.read().await.investments, customer_id, fund_id)
        }

        fn check_reads(&self) -> Result<(), InvestmentError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(InvestmentError::storage(StorageStage::Query, "injected read failure"));
            }
            Ok(())
        }
    }

    impl DomainPort for MockInvestmentPort {}

    #[async_trait]
    impl HealthCheckable for MockInvestmentPort {
        async fn health_check(&self) -> HealthCheckResult {
            if self.fail_reads.load(Ordering::SeqCst) {
                HealthCheckResult::unhealthy("mock-investment-port", 0, "injected read failure")
            } else {
                HealthCheckResult::healthy("mock-investment-port", 0)
            }
        }
    }

    #[async_trait]
    impl InvestmentPort for MockInvestmentPort {
        async fn create_investment(
            &self,
            investment: NewInvestment,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Investment, InvestmentError> {
            let mut state = self.state.write().await;

            let existing = state.existing_fund(investment.customer_id);
            self.restriction
                .check(investment.customer_id, existing, investment.fund_id)?;

            let stored = Investment {
                id: investment.id,
                customer_id: investment.customer_id,
                fund_id: investment.fund_id,
                amount: investment.amount,
                created_at: Utc::now(),
                status: investment.status,
            };
            state.investments.push(stored.clone());

            if self.fail_next_refresh.swap(false, Ordering::SeqCst) {
                state.investments.pop();
                return Err(InvestmentError::storage(
                    StorageStage::Refresh,
                    "injected refresh failure",
                ));
            }

            let key = (stored.customer_id, stored.fund_id);
            let total = state.recompute_total(key.0, key.1);
            state.totals.insert(key, total);

            Ok(stored)
        }

        async fn list_investments_by_customer(
            &self,
            customer_id: CustomerId,
            page: PageRequest,
            _metadata: Option<OperationMetadata>,
        ) -> Result<(Vec<Investment>, u64), InvestmentError> {
            self.check_reads()?;
            let state = self.state.read().await;

            let mut owned: Vec<&Investment> = state
                .investments
                .iter()
                .filter(|i| i.customer_id == customer_id)
                .collect();
            owned.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

            let total = owned.len() as u64;
            let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
            let items = owned
                .into_iter()
                .skip(offset)
                .take(page.page_size() as usize)
                .cloned()
                .collect();

            Ok((items, total))
        }

        async fn get_investment(
            &self,
            id: InvestmentId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Investment, InvestmentError> {
            self.check_reads()?;
            self.state
                .read()
                .await
                .investments
                .iter()
                .find(|i| i.id == id)
                .cloned()
                .ok_or_else(|| InvestmentError::not_found("Investment", id))
        }

        async fn get_customer_fund_total(
            &self,
            customer_id: CustomerId,
            fund_id: FundId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<CustomerFundTotal, InvestmentError> {
            self.check_reads()?;
            self.state
                .read()
                .await
                .totals
                .get(&(customer_id, fund_id))
                .cloned()
                .ok_or_else(|| {
                    InvestmentError::not_found("CustomerFundTotal", format!("{customer_id}/{fund_id}"))
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockInvestmentPort;
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_mock_port_create_and_get() {
        let port = MockInvestmentPort::new();
        let new = NewInvestment::new(CustomerId::new(), FundId::new(), dec!(100));

        let stored = port.create_investment(new.clone(), None).await.unwrap();
        assert_eq!(stored.id, new.id);

        let fetched = port.get_investment(new.id, None).await.unwrap();
        assert_eq!(fetched, stored);
    }

    #[tokio::test]
    async fn test_mock_port_not_found() {
        let port = MockInvestmentPort::new();
        let result = port.get_investment(InvestmentId::new_v7(), None).await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_mock_port_health_check() {
        let port = MockInvestmentPort::new();
        assert!(port.health_check().await.is_healthy());
        port.set_fail_reads(true);
        assert!(!port.health_check().await.is_healthy());
    }
}
