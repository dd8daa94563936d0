//! Property tests for the investment write path
//!
//! Random sequences of investment attempts are replayed against the mock
//! port; afterwards no customer holds more than one fund and every stored
//! total matches the committed rows.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{CustomerId, FundId};
use domain_investment::{
    CreateInvestmentRequest, FundRestriction, InvestmentService, MockInvestmentPort,
};

/// One attempted investment, as indices into small customer and fund pools
#[derive(Debug, Clone)]
struct Attempt {
    customer: usize,
    fund: usize,
    pence: i64,
}

fn attempt_strategy() -> impl Strategy<Value = Attempt> {
    (0usize..3, 0usize..3, 1i64..1_000_000).prop_map(|(customer, fund, pence)| Attempt {
        customer,
        fund,
        pence,
    })
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

async fn replay(
    restriction: FundRestriction,
    attempts: &[Attempt],
) -> (MockInvestmentPort, InvestmentService, Vec<CustomerId>, Vec<FundId>) {
    let port = MockInvestmentPort::new().with_restriction(restriction);
    let service = InvestmentService::new(Arc::new(port.clone()));
    let customers: Vec<CustomerId> = (0..3).map(|_| CustomerId::new()).collect();
    let funds: Vec<FundId> = (0..3).map(|_| FundId::new()).collect();

    for attempt in attempts {
        let request = CreateInvestmentRequest::new(
            customers[attempt.customer],
            funds[attempt.fund],
            Decimal::new(attempt.pence, 2),
        );
        // Rejections are expected; the invariants are checked afterwards
        let _ = service.create_investment(request, None).await;
    }

    (port, service, customers, funds)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_single_fund_per_customer(attempts in prop::collection::vec(attempt_strategy(), 1..30)) {
        let rt = runtime();
        let (port, _, _, _) = rt.block_on(replay(FundRestriction::SingleFund, &attempts));

        let mut funds_by_customer: HashMap<CustomerId, HashSet<FundId>> = HashMap::new();
        for investment in rt.block_on(port.investments()) {
            funds_by_customer
                .entry(investment.customer_id)
                .or_default()
                .insert(investment.fund_id);
        }
        for funds in funds_by_customer.values() {
            prop_assert!(funds.len() <= 1);
        }
    }

    #[test]
    fn prop_total_matches_committed_rows(
        attempts in prop::collection::vec(attempt_strategy(), 1..30),
        unrestricted in any::<bool>(),
    ) {
        let restriction = FundRestriction::from_single_fund_flag(!unrestricted);
        let rt = runtime();
        let (port, service, customers, funds) = rt.block_on(replay(restriction, &attempts));

        for customer in &customers {
            for fund in &funds {
                let committed = rt.block_on(port.committed_sum(*customer, *fund));
                match rt.block_on(service.get_customer_fund_total(*customer, *fund, None)) {
                    Ok(total) => prop_assert_eq!(total.total_investment, committed),
                    Err(e) => {
                        prop_assert!(e.is_not_found());
                        prop_assert_eq!(committed, Decimal::ZERO);
                    }
                }
            }
        }
    }

    #[test]
    fn prop_first_fund_wins(attempts in prop::collection::vec(attempt_strategy(), 1..30)) {
        let rt = runtime();
        let (port, _, customers, funds) = rt.block_on(replay(FundRestriction::SingleFund, &attempts));
        let stored = rt.block_on(port.investments());

        for (index, customer) in customers.iter().enumerate() {
            let first_attempt = attempts.iter().find(|a| a.customer == index);
            let held: HashSet<FundId> = stored
                .iter()
                .filter(|i| i.customer_id == *customer)
                .map(|i| i.fund_id)
                .collect();
            match first_attempt {
                Some(first) => prop_assert_eq!(held, HashSet::from([funds[first.fund]])),
                None => prop_assert!(held.is_empty()),
            }
        }
    }
}
