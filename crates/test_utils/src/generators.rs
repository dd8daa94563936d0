//! Property-Based Test Generators
//!
//! Proptest strategies for investment amounts and page requests.

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::PageRequest;

/// Positive amounts in pence, up to ten million pounds
pub fn positive_pence_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000i64
}

/// Positive amounts already at two decimal places
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    positive_pence_strategy().prop_map(|pence| Decimal::new(pence, 2))
}

/// Zero or negative amounts, which must always be rejected
pub fn non_positive_amount_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000i64..=0i64).prop_map(|pence| Decimal::new(pence, 2))
}

/// Amounts with more precision than the store keeps
pub fn unrounded_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64, 3u32..6u32).prop_map(|(m, s)| Decimal::new(m, s))
}

/// Raw `page` / `page_size` query values, valid or not
pub fn raw_page_param_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        Just(Some("abc".to_string())),
        (-100i64..100i64).prop_map(|n| Some(n.to_string())),
    ]
}

/// Valid page requests
pub fn page_request_strategy() -> impl Strategy<Value = PageRequest> {
    (1u32..50u32, 1u32..100u32).prop_map(|(page, size)| PageRequest::new(page, size))
}
