use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Paging window for list queries.
///
/// Pages are zero-based. The server only sees `limit` and the derived
/// `offset`; there is no cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page: u32,
    pub limit: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl Page {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// `page * limit`, widened so it cannot overflow.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_first_page_of_fifty() {
        let page = Page::default();
        assert_eq!(page.page, 0);
        assert_eq!(page.limit, 50);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn offset_is_page_times_limit() {
        assert_eq!(Page::new(3, 25).offset(), 75);
        assert_eq!(Page::new(7, 0).offset(), 0);
        assert_eq!(Page::new(0, 100).offset(), 0);
    }

    #[test]
    fn offset_does_not_overflow_u32() {
        let page = Page::new(u32::MAX, u32::MAX);
        assert_eq!(page.offset(), u64::from(u32::MAX) * u64::from(u32::MAX));
    }
}
