//! Paginated list envelope
//!
//! List endpoints answer either with a plain JSON array or with a
//! `{count, next, previous, results}` page. `Listing` accepts both.

use serde::{Deserialize, Serialize};

/// One page of results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of items across all pages
    pub count: usize,

    /// Link or marker for the next page
    #[serde(default)]
    pub next: Option<String>,

    /// Link or marker for the previous page
    #[serde(default)]
    pub previous: Option<String>,

    /// Items on this page
    pub results: Vec<T>,
}

impl<T: Clone> Page<T> {
    /// Cut a 1-based page out of a local collection
    ///
    /// `next`/`previous` hold the neighbouring page numbers, if any. A page
    /// past the end yields empty results; page 0 is treated as page 1.
    pub fn slice(items: &[T], page: usize, page_size: usize) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let start = (page - 1).saturating_mul(page_size).min(items.len());
        let end = start.saturating_add(page_size).min(items.len());

        Self {
            count: items.len(),
            next: (end < items.len()).then(|| (page + 1).to_string()),
            previous: (page > 1).then(|| (page - 1).to_string()),
            results: items[start..end].to_vec(),
        }
    }
}

/// Either a bare array or a page envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Page(Page<T>),
    Plain(Vec<T>),
}

impl<T> Listing<T> {
    /// The items carried by this listing
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Page(page) => page.results,
            Self::Plain(items) => items,
        }
    }

    /// Whether the envelope reports more items than it carries
    pub fn is_partial(&self) -> bool {
        match self {
            Self::Page(page) => page.next.is_some() || page.count > page.results.len(),
            Self::Plain(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice() {
        let items: Vec<u32> = (1..=25).collect();

        let first = Page::slice(&items, 1, 10);
        assert_eq!(first.count, 25);
        assert_eq!(first.results, (1..=10).collect::<Vec<_>>());
        assert_eq!(first.next.as_deref(), Some("2"));
        assert_eq!(first.previous, None);

        let last = Page::slice(&items, 3, 10);
        assert_eq!(last.results, (21..=25).collect::<Vec<_>>());
        assert_eq!(last.next, None);
        assert_eq!(last.previous.as_deref(), Some("2"));

        let beyond = Page::slice(&items, 9, 10);
        assert!(beyond.results.is_empty());
    }

    #[test]
    fn test_listing_accepts_both_shapes() {
        let plain: Listing<u32> = serde_json::from_str("[1,2,3]").unwrap();
        assert!(!plain.is_partial());
        assert_eq!(plain.into_items(), vec![1, 2, 3]);

        let page: Listing<u32> =
            serde_json::from_str(r#"{"count":5,"next":"?page=2","previous":null,"results":[1,2]}"#)
                .unwrap();
        assert!(page.is_partial());
        assert_eq!(page.into_items(), vec![1, 2]);
    }
}
