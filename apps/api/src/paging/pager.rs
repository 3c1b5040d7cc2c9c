use serde::Serialize;
use tracing::{debug, warn};

use super::client::{PageError, PageSource};

/// Cards the server returns per fetch, matching the first server-rendered page.
pub const PAGE_SIZE: u64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Listing {
    Members,
    Companies,
    Jobs,
}

impl Listing {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Members => "/load-more-members",
            Self::Companies => "/load-more-companies",
            Self::Jobs => "/load-more-jobs",
        }
    }

    pub fn button_id(&self) -> &'static str {
        match self {
            Self::Members => "load-more-members-btn",
            Self::Companies => "load-more-companies-btn",
            Self::Jobs => "load-more-jobs-btn",
        }
    }

    pub fn container_id(&self) -> &'static str {
        match self {
            Self::Members => "members-grid-container",
            Self::Companies => "companies-grid-container",
            Self::Jobs => "jobs-grid-container",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub listing: Listing,
    pub offset: u64,
}

impl PageRequest {
    pub fn path_and_query(&self) -> String {
        format!("{}?offset={}", self.listing.path(), self.offset)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Cards were appended; the button stays only if more remain.
    Appended { next_offset: u64, more: bool },
    /// The server had nothing left to send.
    Exhausted,
    Failed,
    /// Click ignored: the button is hidden or a fetch is in flight.
    Ignored,
}

/// State of one "load more" button and the grid it feeds.
#[derive(Debug, Clone)]
pub struct LoadMorePager {
    listing: Listing,
    total: u64,
    offset: u64,
    visible: bool,
    in_flight: bool,
    appended: Vec<String>,
}

impl LoadMorePager {
    /// The button starts hidden when the first page already holds everything.
    pub fn new(listing: Listing, total: u64, offset: u64) -> Self {
        Self {
            listing,
            total,
            offset,
            visible: total > offset,
            in_flight: false,
            appended: Vec::new(),
        }
    }

    /// Builds a pager from the button's `data-total` / `data-offset` values.
    /// Missing or unparsable values count as zero.
    pub fn from_attrs(listing: Listing, total: Option<&str>, offset: Option<&str>) -> Self {
        let number = |raw: Option<&str>| {
            raw.and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or_default()
        };
        Self::new(listing, number(total), number(offset))
    }

    pub fn listing(&self) -> Listing {
        self.listing
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The button is disabled while its fetch is outstanding.
    pub fn is_disabled(&self) -> bool {
        self.in_flight
    }

    /// HTML fragments appended to the grid so far, in order.
    pub fn appended(&self) -> &[String] {
        &self.appended
    }

    /// Click on the button.
    pub fn begin(&mut self) -> Option<PageRequest> {
        if !self.visible || self.in_flight {
            return None;
        }
        self.in_flight = true;
        Some(PageRequest {
            listing: self.listing,
            offset: self.offset,
        })
    }

    pub fn finish(
        &mut self,
        request: &PageRequest,
        result: Result<String, PageError>,
    ) -> PageOutcome {
        if !self.in_flight || request.offset != self.offset {
            debug!(listing = ?self.listing, offset = request.offset, "unexpected page response");
            return PageOutcome::Ignored;
        }
        self.in_flight = false;

        let html = match result {
            Ok(html) => html,
            Err(e) => {
                warn!(listing = ?self.listing, error = %e, "load more failed");
                self.visible = false;
                return PageOutcome::Failed;
            }
        };

        if html.trim().is_empty() {
            debug!(listing = ?self.listing, "no more cards");
            self.visible = false;
            return PageOutcome::Exhausted;
        }

        self.appended.push(html);
        self.offset = self.offset.saturating_add(PAGE_SIZE);
        if self.offset >= self.total {
            self.visible = false;
        }
        PageOutcome::Appended {
            next_offset: self.offset,
            more: self.visible,
        }
    }

    pub async fn load_more(&mut self, source: &dyn PageSource) -> PageOutcome {
        let Some(request) = self.begin() else {
            return PageOutcome::Ignored;
        };
        let result = source.fetch(&request).await;
        self.finish(&request, result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    struct FakePages {
        pages: Mutex<Vec<Result<String, PageError>>>,
        seen: Mutex<Vec<u64>>,
    }

    impl FakePages {
        fn new(pages: Vec<Result<String, PageError>>) -> Self {
            Self {
                pages: Mutex::new(pages),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PageSource for FakePages {
        async fn fetch(&self, request: &PageRequest) -> Result<String, PageError> {
            self.seen.lock().unwrap().push(request.offset);
            self.pages.lock().unwrap().remove(0)
        }
    }

    fn card(n: u64) -> Result<String, PageError> {
        Ok(format!("<div class=\"card\">{n}</div>"))
    }

    #[test]
    fn test_hidden_when_first_page_holds_everything() {
        assert!(!LoadMorePager::new(Listing::Members, 20, 20).is_visible());
        assert!(!LoadMorePager::new(Listing::Members, 0, 0).is_visible());
        assert!(LoadMorePager::new(Listing::Members, 21, 20).is_visible());
    }

    #[test]
    fn test_from_attrs_defaults_to_zero() {
        let p = LoadMorePager::from_attrs(Listing::Jobs, Some("abc"), None);
        assert_eq!((p.total(), p.offset()), (0, 0));
        assert!(!p.is_visible());

        let p = LoadMorePager::from_attrs(Listing::Jobs, Some(" 45 "), Some("20"));
        assert_eq!((p.total(), p.offset()), (45, 20));
        assert!(p.is_visible());
        assert_eq!(p.listing().button_id(), "load-more-jobs-btn");
        assert_eq!(p.listing().container_id(), "jobs-grid-container");
    }

    #[test]
    fn test_begin_disables_until_finished() {
        let mut p = LoadMorePager::new(Listing::Companies, 60, 20);
        let req = p.begin().unwrap();
        assert_eq!(req.path_and_query(), "/load-more-companies?offset=20");
        assert!(p.is_disabled());
        assert_eq!(p.begin(), None);

        let outcome = p.finish(&req, card(1));
        assert_eq!(outcome, PageOutcome::Appended { next_offset: 40, more: true });
        assert!(!p.is_disabled());
    }

    #[test]
    fn test_hides_once_offset_reaches_total() {
        let mut p = LoadMorePager::new(Listing::Members, 45, 20);
        let req = p.begin().unwrap();
        p.finish(&req, card(1));
        let req = p.begin().unwrap();
        assert_eq!(req.offset, 40);
        let outcome = p.finish(&req, card(2));
        assert_eq!(outcome, PageOutcome::Appended { next_offset: 60, more: false });
        assert!(!p.is_visible());
        assert_eq!(p.begin(), None);
        assert_eq!(p.appended().len(), 2);
    }

    #[test]
    fn test_blank_response_hides() {
        let mut p = LoadMorePager::new(Listing::Jobs, 100, 20);
        let req = p.begin().unwrap();
        assert_eq!(p.finish(&req, Ok("  \n ".into())), PageOutcome::Exhausted);
        assert!(!p.is_visible());
        assert_eq!(p.offset(), 20);
        assert!(p.appended().is_empty());
    }

    #[test]
    fn test_fetch_error_hides() {
        let mut p = LoadMorePager::new(Listing::Jobs, 100, 20);
        let req = p.begin().unwrap();
        let outcome = p.finish(&req, Err(PageError::Status { status: 500 }));
        assert_eq!(outcome, PageOutcome::Failed);
        assert!(!p.is_visible());
        assert!(!p.is_disabled());
    }

    #[test]
    fn test_response_for_other_offset_is_ignored() {
        let mut p = LoadMorePager::new(Listing::Members, 100, 20);
        let stray = PageRequest {
            listing: Listing::Members,
            offset: 0,
        };
        assert_eq!(p.finish(&stray, card(0)), PageOutcome::Ignored);
        let req = p.begin().unwrap();
        assert_eq!(p.finish(&stray, card(0)), PageOutcome::Ignored);
        assert!(p.is_disabled());
        assert!(matches!(p.finish(&req, card(1)), PageOutcome::Appended { .. }));
    }

    #[tokio::test]
    async fn test_load_more_walks_pages() {
        let source = FakePages::new(vec![card(1), card(2), Ok(String::new())]);
        let mut p = LoadMorePager::new(Listing::Members, 100, 20);

        p.load_more(&source).await;
        p.load_more(&source).await;
        assert_eq!(p.load_more(&source).await, PageOutcome::Exhausted);
        assert_eq!(p.load_more(&source).await, PageOutcome::Ignored);

        assert_eq!(*source.seen.lock().unwrap(), vec![20, 40, 60]);
        assert_eq!(p.offset(), 60);
    }
}
