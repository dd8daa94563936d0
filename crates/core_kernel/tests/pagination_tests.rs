//! Tests for the pagination contract

use core_kernel::{
    PageRequest, Paginated, PaginationMeta, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
use proptest::prelude::*;

mod parse_tests {
    use super::*;

    #[test]
    fn test_valid_values_are_kept() {
        let request = PageRequest::parse(Some("4"), Some("25"));
        assert_eq!(request.page(), 4);
        assert_eq!(request.page_size(), 25);
    }

    #[test]
    fn test_each_parameter_falls_back_independently() {
        let request = PageRequest::parse(Some("0"), Some("5"));
        assert_eq!(request.page(), DEFAULT_PAGE);
        assert_eq!(request.page_size(), 5);

        let request = PageRequest::parse(Some("3"), Some("1.5"));
        assert_eq!(request.page(), 3);
        assert_eq!(request.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_empty_string_uses_default() {
        assert_eq!(PageRequest::parse(Some(""), Some("")), PageRequest::default());
    }

    #[test]
    fn test_new_replaces_zero() {
        assert_eq!(PageRequest::new(0, 0), PageRequest::default());
    }
}

mod envelope_tests {
    use super::*;

    #[test]
    fn test_first_of_several_pages() {
        let page = Paginated::new(vec![1], PageRequest::new(1, 1), 3);
        assert_eq!(page.pagination.total_pages, 3);
        assert!(page.pagination.has_next);
        assert!(!page.pagination.has_previous);
    }

    #[test]
    fn test_last_page() {
        let page = Paginated::new(vec![21, 22], PageRequest::new(3, 10), 22);
        assert_eq!(page.pagination.total_pages, 3);
        assert!(!page.pagination.has_next);
        assert!(page.pagination.has_previous);
    }

    #[test]
    fn test_page_beyond_end() {
        let page: Paginated<u8> = Paginated::new(vec![], PageRequest::new(9, 10), 15);
        assert!(page.is_empty());
        assert!(!page.pagination.has_next);
        assert!(page.pagination.has_previous);
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = Paginated::new(vec![1, 2], PageRequest::new(1, 2), 5);
        let mapped = page.clone().map(|n| n.to_string());
        assert_eq!(mapped.data, vec!["1".to_string(), "2".to_string()]);
        assert_eq!(mapped.pagination, page.pagination);
    }

    #[test]
    fn test_serialized_field_names() {
        let page = Paginated::new(vec!["x"], PageRequest::new(1, 10), 1);
        let json = serde_json::to_value(&page).unwrap();
        let meta = &json["pagination"];
        for key in ["current_page", "page_size", "total_items", "total_pages", "has_next", "has_previous"] {
            assert!(meta.get(key).is_some(), "missing {key}");
        }
    }
}

proptest! {
    #[test]
    fn prop_parse_always_positive(page in any::<Option<String>>(), size in any::<Option<String>>()) {
        let request = PageRequest::parse(page.as_deref(), size.as_deref());
        prop_assert!(request.page() >= 1);
        prop_assert!(request.page_size() >= 1);
        prop_assert!(request.page_size() <= MAX_PAGE_SIZE);
    }

    #[test]
    fn prop_offset_never_negative(page in any::<u32>(), size in any::<u32>()) {
        let request = PageRequest::new(page, size);
        prop_assert!(request.offset() >= 0);
        prop_assert_eq!(
            request.offset(),
            i64::from(request.page() - 1) * i64::from(request.page_size())
        );
    }

    #[test]
    fn prop_total_pages_is_ceiling(total in 0u64..10_000, page in 1u32..50, size in 1u32..100) {
        let meta = PaginationMeta::new(PageRequest::new(page, size), total);
        let size = u64::from(size);
        prop_assert_eq!(meta.total_pages, (total + size - 1) / size);
        prop_assert_eq!(meta.has_next, u64::from(page) < meta.total_pages);
        prop_assert_eq!(meta.has_previous, page > 1);
    }
}
