use crate::shared::date_utils::from_input_value;
use contracts::domain::a002_employee_registration::{
    RegistrationBucket, RegistrationListQuery, RegistrationPage, RegistrationRow,
};
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct RegistrationListState {
    pub rows: Vec<RegistrationRow>,
    pub search_query: String,
    // `yyyy-mm-dd`, empty when open
    pub date_from: String,
    pub date_to: String,
    // Pagination fields (page is 0-based here, 1-based on the wire)
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
    pub is_loaded: bool,
}

impl RegistrationListState {
    pub fn new(page_size: usize) -> Self {
        Self {
            rows: Vec::new(),
            search_query: String::new(),
            date_from: String::new(),
            date_to: String::new(),
            page: 0,
            page_size,
            total_count: 0,
            total_pages: 0,
            is_loaded: false,
        }
    }

    pub fn query(&self, bucket: RegistrationBucket) -> RegistrationListQuery {
        RegistrationListQuery::new(bucket, self.page + 1, self.page_size)
            .with_search(&self.search_query)
            .with_date_range(from_input_value(&self.date_from), from_input_value(&self.date_to))
    }

    pub fn apply_page(&mut self, page: RegistrationPage) {
        self.total_count = page.total;
        self.total_pages = page.last_page.max(1);
        self.page = page.current_page.saturating_sub(1).min(self.total_pages - 1);
        self.rows = page.rows;
        self.is_loaded = true;
    }
}

pub fn create_state(page_size: usize) -> RwSignal<RegistrationListState> {
    RwSignal::new(RegistrationListState::new(page_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_employee_registration::ApprovalStatus;

    #[test]
    fn test_query_uses_one_based_page_and_filters() {
        let mut state = RegistrationListState::new(25);
        state.page = 2;
        state.search_query = "  dela cruz ".into();
        state.date_from = "2024-03-31".into();
        state.date_to = "2024-03-01".into();

        let query = state.query(RegistrationBucket::AwaitingResubmission);
        assert_eq!(query.page, 3);
        assert_eq!(query.per_page, 25);
        assert_eq!(query.status, "pending");
        assert_eq!(query.approval_status, ApprovalStatus::AwaitingResubmission);
        assert_eq!(query.search.as_deref(), Some("dela cruz"));
        assert_eq!(query.date_from.as_deref(), Some("2024-03-01"));
        assert_eq!(query.date_to.as_deref(), Some("2024-03-31"));
    }

    #[test]
    fn test_blank_filters_are_not_sent() {
        let query = RegistrationListState::new(10).query(RegistrationBucket::Cancelled);
        assert_eq!(query.page, 1);
        assert!(query.search.is_none());
        assert!(query.date_from.is_none() && query.date_to.is_none());
    }

    #[test]
    fn test_apply_page_clamps_to_last_page() {
        let mut state = RegistrationListState::new(10);
        state.apply_page(RegistrationPage {
            rows: Vec::new(),
            current_page: 4,
            last_page: 2,
            per_page: 10,
            total: 12,
        });
        assert_eq!(state.page, 1);
        assert_eq!(state.total_pages, 2);
        assert!(state.is_loaded);
    }
}
