//! Pagination query parameters

use serde::Deserialize;

use core_kernel::PageRequest;

/// Raw `page` and `page_size` query parameters
///
/// Kept as strings so malformed values fall back to the defaults instead
/// of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl PaginationQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::parse(self.page.as_deref(), self.page_size.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_values_fall_back() {
        let query = PaginationQuery {
            page: Some("-3".to_string()),
            page_size: Some("lots".to_string()),
        };
        let request = query.page_request();
        assert_eq!(request.page(), 1);
        assert_eq!(request.page_size(), 10);
    }

    #[test]
    fn test_valid_values_are_kept() {
        let query = PaginationQuery {
            page: Some("3".to_string()),
            page_size: Some("25".to_string()),
        };
        let request = query.page_request();
        assert_eq!((request.page(), request.page_size()), (3, 25));
    }
}
