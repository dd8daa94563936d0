//! Request and response bodies

pub mod customer;
pub mod fund;
pub mod investment;
pub mod pagination;
