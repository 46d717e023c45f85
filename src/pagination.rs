use serde::Serialize;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Requested page window, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Rows to skip; a page far past the end saturates instead of wrapping.
    pub fn offset(&self) -> i64 {
        let skipped = (self.page.max(1) - 1).saturating_mul(self.per_page);
        i64::try_from(skipped).unwrap_or(i64::MAX)
    }

    pub fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }
}

/// One page of items plus the information needed to render pagers.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: usize, total_pages: usize) -> Self {
        Self {
            items,
            page,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_counts_from_first_page() {
        let page = |page| Pagination { page, per_page: 20 };
        assert_eq!(page(0).offset(), 0);
        assert_eq!(page(1).offset(), 0);
        assert_eq!(page(3).offset(), 40);
        assert_eq!(page(3).limit(), 20);
    }

    #[test]
    fn huge_page_saturates() {
        let pagination = Pagination {
            page: usize::MAX / 4,
            per_page: 20,
        };
        assert_eq!(pagination.offset(), i64::MAX);

        let pagination = Pagination {
            page: usize::MAX,
            per_page: usize::MAX,
        };
        assert_eq!(pagination.offset(), i64::MAX);
        assert_eq!(pagination.limit(), i64::MAX);
    }
}
