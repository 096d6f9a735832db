//! List query parameters.

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Raw list parameters as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParameters {
    pub filters: Option<String>,
    pub sort_order: Option<String>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl ListParameters {
    /// 1-based page number; anything below 1 is treated as the first page.
    #[must_use]
    pub fn page_number(&self) -> u32 {
        self.page_number.unwrap_or(1).max(1)
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::from(self.page_number() - 1) * i64::from(self.page_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        let params = ListParameters::default();

        assert_eq!(params.page_number(), 1);
        assert_eq!(params.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn page_size_is_capped() {
        let params = ListParameters {
            page_size: Some(5_000),
            ..ListParameters::default()
        };

        assert_eq!(params.page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn zero_page_number_and_size_are_raised_to_one() {
        let params = ListParameters {
            page_number: Some(0),
            page_size: Some(0),
            ..ListParameters::default()
        };

        assert_eq!(params.page_number(), 1);
        assert_eq!(params.page_size(), 1);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let params = ListParameters {
            page_number: Some(3),
            page_size: Some(20),
            ..ListParameters::default()
        };

        assert_eq!(params.offset(), 40);
    }
}
