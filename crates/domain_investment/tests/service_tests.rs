//! Investment Service Tests
//!
//! Exercises `InvestmentService` over the in-memory `MockInvestmentPort`.
//!
//! # Test Organization
//!
//! - `create_scenarios` - single-fund rule and running totals
//! - `validation` - request shape checks that never reach the port
//! - `atomicity` - failed recomputation leaves nothing behind
//! - `listing` - pagination metadata and ordering
//! - `lookups` - point and total lookups

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{CustomerId, FundId, InvestmentId, PageRequest};
use domain_investment::{
    CreateInvestmentRequest, ErrorKind, Fund, FundRestriction, InvestmentError, InvestmentService,
    InvestmentStatus, MockInvestmentPort, RetailCustomer, StorageStage,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

struct Harness {
    port: MockInvestmentPort,
    service: InvestmentService,
}

fn harness() -> Harness {
    harness_with(FundRestriction::SingleFund)
}

fn harness_with(restriction: FundRestriction) -> Harness {
    let port = MockInvestmentPort::new().with_restriction(restriction);
    let service = InvestmentService::new(Arc::new(port.clone()));
    Harness { port, service }
}

async fn invest(
    service: &InvestmentService,
    customer: CustomerId,
    fund: FundId,
    amount: Decimal,
) -> Result<domain_investment::Investment, InvestmentError> {
    service
        .create_investment(CreateInvestmentRequest::new(customer, fund, amount), None)
        .await
}

// ============================================================================
// CREATE SCENARIOS
// ============================================================================

mod create_scenarios {
    use super::*;

    #[tokio::test]
    async fn test_first_investment_sets_total() {
        let h = harness();
        let (customer, fund) = (CustomerId::new(), FundId::new());

        let investment = invest(&h.service, customer, fund, dec!(100)).await.unwrap();
        assert_eq!(investment.status, InvestmentStatus::Pending);

        let total = h.service.get_customer_fund_total(customer, fund, None).await.unwrap();
        assert_eq!(total.total_investment, dec!(100));
    }

    #[tokio::test]
    async fn test_second_fund_is_rejected_and_store_unchanged() {
        let h = harness();
        let (customer, f1, f2) = (CustomerId::new(), FundId::new(), FundId::new());
        invest(&h.service, customer, f1, dec!(100)).await.unwrap();

        let error = invest(&h.service, customer, f2, dec!(50)).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvariantViolation);
        match error {
            InvestmentError::DifferentFundNotAllowed { existing_fund_id, requested_fund_id, .. } => {
                assert_eq!(existing_fund_id, f1);
                assert_eq!(requested_fund_id, f2);
            }
            other => panic!("unexpected error {other:?}"),
        }

        assert_eq!(h.port.investments().await.len(), 1);
        let total = h.service.get_customer_fund_total(customer, f1, None).await.unwrap();
        assert_eq!(total.total_investment, dec!(100));
        assert!(h
            .service
            .get_customer_fund_total(customer, f2, None)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_same_fund_accumulates() {
        let h = harness();
        let (customer, fund) = (CustomerId::new(), FundId::new());
        invest(&h.service, customer, fund, dec!(100)).await.unwrap();
        invest(&h.service, customer, fund, dec!(50)).await.unwrap();

        let total = h.service.get_customer_fund_total(customer, fund, None).await.unwrap();
        assert_eq!(total.total_investment, dec!(150));
    }

    #[tokio::test]
    async fn test_rule_is_per_customer() {
        let h = harness();
        let (a, b) = (CustomerId::new(), CustomerId::new());
        let (f1, f2) = (FundId::new(), FundId::new());

        invest(&h.service, a, f1, dec!(10)).await.unwrap();
        invest(&h.service, b, f2, dec!(20)).await.unwrap();
    }

    #[tokio::test]
    async fn test_unrestricted_allows_several_funds() {
        let h = harness_with(FundRestriction::Unrestricted);
        let customer = CustomerId::new();
        let (f1, f2) = (FundId::new(), FundId::new());

        invest(&h.service, customer, f1, dec!(10)).await.unwrap();
        invest(&h.service, customer, f2, dec!(20)).await.unwrap();

        let t1 = h.service.get_customer_fund_total(customer, f1, None).await.unwrap();
        let t2 = h.service.get_customer_fund_total(customer, f2, None).await.unwrap();
        assert_eq!(t1.total_investment, dec!(10));
        assert_eq!(t2.total_investment, dec!(20));
    }

    #[tokio::test]
    async fn test_total_carries_names() {
        let h = harness();
        let customer = RetailCustomer {
            id: CustomerId::new(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        };
        let fund = Fund::new("Cushon Equities Fund");
        h.port.add_customer(customer.clone()).await;
        h.port.add_fund(fund.clone()).await;

        invest(&h.service, customer.id, fund.id, dec!(25000)).await.unwrap();

        let total = h.service.get_customer_fund_total(customer.id, fund.id, None).await.unwrap();
        assert_eq!(total.first_name, "Ada");
        assert_eq!(total.email, "ada@example.com");
        assert_eq!(total.fund_name, "Cushon Equities Fund");
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

mod validation {
    use super::*;

    #[tokio::test]
    async fn test_missing_customer_is_rejected() {
        let h = harness();
        let request = CreateInvestmentRequest {
            customer_id: None,
            fund_id: Some(FundId::new()),
            amount: Some(dec!(10)),
        };
        let error = h.service.create_investment(request, None).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert!(h.port.investments().await.is_empty());
    }

    #[tokio::test]
    async fn test_non_positive_amounts_are_rejected() {
        let h = harness();
        for amount in [dec!(0), dec!(-5), dec!(0.001)] {
            let error = invest(&h.service, CustomerId::new(), FundId::new(), amount)
                .await
                .unwrap_err();
            assert_eq!(error.kind(), ErrorKind::Validation, "amount {amount}");
        }
        assert!(h.port.investments().await.is_empty());
    }

    #[tokio::test]
    async fn test_amount_is_rounded_to_pence() {
        let h = harness();
        let investment = invest(&h.service, CustomerId::new(), FundId::new(), dec!(10.129))
            .await
            .unwrap();
        assert_eq!(investment.amount, dec!(10.13));
    }
}

// ============================================================================
// ATOMICITY
// ============================================================================

mod atomicity {
    use super::*;

    #[tokio::test]
    async fn test_failed_refresh_leaves_no_insert() {
        let h = harness();
        let (customer, fund) = (CustomerId::new(), FundId::new());
        invest(&h.service, customer, fund, dec!(100)).await.unwrap();

        h.port.fail_next_refresh();
        let error = invest(&h.service, customer, fund, dec!(40)).await.unwrap_err();
        assert_eq!(error.stage(), Some(StorageStage::Refresh));
        assert!(error.to_string().contains(&customer.to_string()));
        assert!(error.to_string().contains(&fund.to_string()));

        let (items, total) = (
            h.service
                .list_investments_by_customer(customer, PageRequest::default(), None)
                .await
                .unwrap()
                .data,
            h.port.committed_sum(customer, fund).await,
        );
        assert_eq!(items.len(), 1);
        assert_eq!(total, dec!(100));

        let aggregate = h.service.get_customer_fund_total(customer, fund, None).await.unwrap();
        assert_eq!(aggregate.total_investment, dec!(100));
    }

    #[tokio::test]
    async fn test_failed_first_investment_does_not_lock_in_fund() {
        let h = harness();
        let (customer, f1, f2) = (CustomerId::new(), FundId::new(), FundId::new());

        h.port.fail_next_refresh();
        assert!(invest(&h.service, customer, f1, dec!(100)).await.is_err());

        invest(&h.service, customer, f2, dec!(100)).await.unwrap();
    }
}

// ============================================================================
// LISTING
// ============================================================================

mod listing {
    use super::*;

    #[tokio::test]
    async fn test_first_page_of_one() {
        let h = harness();
        let (customer, fund) = (CustomerId::new(), FundId::new());
        invest(&h.service, customer, fund, dec!(100)).await.unwrap();
        invest(&h.service, customer, fund, dec!(50)).await.unwrap();

        let page = h
            .service
            .list_investments_by_customer(customer, PageRequest::new(1, 1), None)
            .await
            .unwrap();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].amount, dec!(100));
        assert_eq!(page.pagination.total_items, 2);
        assert_eq!(page.pagination.total_pages, 2);
        assert!(page.pagination.has_next);
        assert!(!page.pagination.has_previous);
    }

    #[tokio::test]
    async fn test_total_is_scoped_to_customer() {
        let h = harness();
        let (a, b, fund) = (CustomerId::new(), CustomerId::new(), FundId::new());
        invest(&h.service, a, fund, dec!(1)).await.unwrap();
        invest(&h.service, b, fund, dec!(2)).await.unwrap();
        invest(&h.service, b, fund, dec!(3)).await.unwrap();

        let page = h
            .service
            .list_investments_by_customer(a, PageRequest::default(), None)
            .await
            .unwrap();
        assert_eq!(page.pagination.total_items, 1);
        assert!(page.data.iter().all(|i| i.customer_id == a));
    }

    #[tokio::test]
    async fn test_listing_is_repeatable() {
        let h = harness();
        let (customer, fund) = (CustomerId::new(), FundId::new());
        for amount in [dec!(5), dec!(6), dec!(7)] {
            invest(&h.service, customer, fund, amount).await.unwrap();
        }

        let request = PageRequest::new(2, 2);
        let first = h.service.list_investments_by_customer(customer, request, None).await.unwrap();
        let second = h.service.list_investments_by_customer(customer, request, None).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.data.len(), 1);
        assert!(first.pagination.has_previous);
    }

    #[tokio::test]
    async fn test_empty_listing_is_not_an_error() {
        let h = harness();
        let page = h
            .service
            .list_investments_by_customer(CustomerId::new(), PageRequest::default(), None)
            .await
            .unwrap();
        assert!(page.is_empty());
        assert_eq!(page.pagination.total_pages, 0);
    }

    #[tokio::test]
    async fn test_storage_failure_propagates_unchanged() {
        let h = harness();
        h.port.set_fail_reads(true);
        let error = h
            .service
            .list_investments_by_customer(CustomerId::new(), PageRequest::default(), None)
            .await
            .unwrap_err();
        assert_eq!(error.stage(), Some(StorageStage::Query));
        assert!(error.to_string().contains("listing investments for customer"));
    }
}

// ============================================================================
// LOOKUPS
// ============================================================================

mod lookups {
    use super::*;

    #[tokio::test]
    async fn test_get_unknown_investment() {
        let h = harness();
        let error = h.service.get_investment(InvestmentId::new_v7(), None).await.unwrap_err();
        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn test_get_total_for_pair_without_investments() {
        let h = harness();
        let error = h
            .service
            .get_customer_fund_total(CustomerId::new(), FundId::new(), None)
            .await
            .unwrap_err();
        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn test_get_recorded_investment() {
        let h = harness();
        let created = invest(&h.service, CustomerId::new(), FundId::new(), dec!(75))
            .await
            .unwrap();
        let fetched = h.service.get_investment(created.id, None).await.unwrap();
        assert_eq!(fetched, created);
    }
}
