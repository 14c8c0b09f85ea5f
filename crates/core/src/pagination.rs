//! Offset/limit pagination for the goods listing.

use serde::Serialize;

use crate::error::CoreError;
use crate::good::Good;

/// Largest page a single list request may return.
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// A checked `(offset, limit)` pair.
///
/// `limit` is what the store is asked for; `requested_limit` is what the
/// client sent and is echoed back in [`PageMeta`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
    pub requested_limit: i64,
}

impl Page {
    /// Reject negative values and cap `limit` at [`MAX_PAGE_LIMIT`].
    pub fn new(offset: i64, limit: i64) -> Result<Self, CoreError> {
        if offset < 0 {
            return Err(CoreError::Validation(format!(
                "offset must be non-negative, got {offset}"
            )));
        }
        if limit < 0 {
            return Err(CoreError::Validation(format!(
                "limit must be non-negative, got {limit}"
            )));
        }
        Ok(Self {
            offset,
            limit: limit.min(MAX_PAGE_LIMIT),
            requested_limit: limit,
        })
    }
}

/// Metadata returned alongside a page of goods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    /// Number of goods in this page.
    pub total: usize,
    /// Number of goods in this page flagged `removed`.
    pub removed: usize,
    /// The limit as requested, before capping.
    pub limit: i64,
    pub offset: i64,
}

impl PageMeta {
    pub fn for_page(page: Page, goods: &[Good]) -> Self {
        Self {
            total: goods.len(),
            removed: goods.iter().filter(|g| g.removed).count(),
            limit: page.requested_limit,
            offset: page.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn good(id: i64, removed: bool) -> Good {
        Good {
            id,
            project_id: 1,
            name: format!("good-{id}"),
            description: String::new(),
            priority: None,
            removed,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn page_passes_through_valid_values() {
        assert_eq!(
            Page::new(10, 2).unwrap(),
            Page {
                offset: 10,
                limit: 2,
                requested_limit: 2,
            }
        );
    }

    #[test]
    fn page_caps_limit_but_keeps_requested_value() {
        let page = Page::new(0, 50_000).unwrap();
        assert_eq!(page.limit, MAX_PAGE_LIMIT);
        assert_eq!(page.requested_limit, 50_000);
    }

    #[test]
    fn page_allows_zero_limit() {
        assert_eq!(Page::new(0, 0).unwrap().limit, 0);
    }

    #[test]
    fn page_rejects_negative_offset() {
        assert!(matches!(Page::new(-1, 2), Err(CoreError::Validation(_))));
    }

    #[test]
    fn page_rejects_negative_limit() {
        assert!(matches!(Page::new(0, -2), Err(CoreError::Validation(_))));
    }

    #[test]
    fn meta_counts_removed_goods() {
        let goods = vec![good(1, false), good(2, true), good(3, true)];
        let meta = PageMeta::for_page(Page::new(0, 3).unwrap(), &goods);
        assert_eq!(meta.total, 3);
        assert_eq!(meta.removed, 2);
        assert_eq!(meta.limit, 3);
        assert_eq!(meta.offset, 0);
    }

    #[test]
    fn meta_echoes_requested_limit() {
        let meta = PageMeta::for_page(Page::new(0, 5_000).unwrap(), &[good(1, false)]);
        assert_eq!(meta.limit, 5_000);
        assert_eq!(meta.total, 1);
    }

    #[test]
    fn meta_for_empty_page() {
        let meta = PageMeta::for_page(Page::new(40, 20).unwrap(), &[]);
        assert_eq!(meta.total, 0);
        assert_eq!(meta.removed, 0);
        assert_eq!(meta.offset, 40);
    }
}
