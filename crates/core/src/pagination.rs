//! Paginated list envelopes and the page-number window shown to users

use serde::{Deserialize, Serialize};

/// List envelope returned by every paginated backend endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    /// Number of pages for the given page size
    pub fn total_pages(&self, page_size: u32) -> u32 {
        total_pages(self.count, page_size)
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// `page` / `page_size` query parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl PageQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }
}

/// Ceiling of `count / page_size`. Zero when there is nothing to show.
pub fn total_pages(count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    u32::try_from(count.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
}

/// One slot of the pager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

impl std::fmt::Display for PageItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Page(n) => write!(f, "{n}"),
            Self::Ellipsis => f.write_str("..."),
        }
    }
}

/// Pages to display around `page`
///
/// Up to five pages are listed in full. Beyond that the first and last page
/// are always shown, along with two neighbours on each side of `page`, and
/// gaps collapse into an ellipsis. A single page (or none) yields no pager.
pub fn page_window(page: u32, total_pages: u32) -> Vec<PageItem> {
    if total_pages <= 1 {
        return Vec::new();
    }
    if total_pages <= 5 {
        return (1..=total_pages).map(PageItem::Page).collect();
    }

    let page = page.clamp(1, total_pages);
    let start = page.saturating_sub(2).max(1);
    let end = page.saturating_add(2).min(total_pages);

    let mut items = vec![PageItem::Page(1)];
    if start > 2 {
        items.push(PageItem::Ellipsis);
    }
    items.extend(
        (start..=end)
            .filter(|&n| n > 1 && n < total_pages)
            .map(PageItem::Page),
    );
    if end < total_pages - 1 {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(total_pages));
    items.dedup();
    items
}

/// Render a window as `1 ... 4 [5] 6 ... 10`
pub fn render_window(page: u32, total_pages: u32) -> String {
    page_window(page, total_pages)
        .iter()
        .map(|item| match item {
            PageItem::Page(n) if *n == page => format!("[{n}]"),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Ellipsis, Page};

    #[test]
    fn counts_pages() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn single_page_has_no_pager() {
        assert!(page_window(1, 1).is_empty());
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn small_totals_list_everything() {
        assert_eq!(
            page_window(3, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
    }

    #[test]
    fn window_at_start() {
        assert_eq!(
            page_window(1, 10),
            vec![Page(1), Page(2), Page(3), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn window_in_middle() {
        assert_eq!(
            page_window(5, 10),
            vec![
                Page(1),
                Ellipsis,
                Page(3),
                Page(4),
                Page(5),
                Page(6),
                Page(7),
                Ellipsis,
                Page(10)
            ]
        );
    }

    #[test]
    fn window_at_end() {
        assert_eq!(
            page_window(10, 10),
            vec![Page(1), Ellipsis, Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn no_ellipsis_when_gap_is_empty() {
        // start = 2, end = 6: nothing hidden on either side
        assert_eq!(
            page_window(4, 7),
            vec![
                Page(1),
                Page(2),
                Page(3),
                Page(4),
                Page(5),
                Page(6),
                Page(7)
            ]
        );
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        assert_eq!(page_window(0, 6), page_window(1, 6));
        assert_eq!(page_window(99, 6), page_window(6, 6));
    }

    #[test]
    fn renders_current_page() {
        assert_eq!(render_window(5, 10), "1 ... 3 4 [5] 6 7 ... 10");
    }

    #[test]
    fn envelope_deserializes() {
        let page: Paginated<u32> = serde_json::from_str(
            r#"{"count": 45, "next": "http://x/?page=2", "previous": null, "results": [1, 2]}"#,
        )
        .unwrap();
        assert_eq!(page.total_pages(20), 3);
        assert!(page.has_next());
        assert_eq!(page.results, vec![1, 2]);
    }
}
