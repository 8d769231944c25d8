//! Page windows over server-side collections.

use serde::Serialize;

use super::error::DomainError;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// A 1-based page number paired with the requested page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Result<Self, DomainError> {
        if page == 0 {
            return Err(DomainError::validation("page numbers start at 1"));
        }
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(DomainError::validation(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        Ok(Self { page, limit })
    }

    pub fn page(self) -> u32 {
        self.page
    }

    pub fn limit(self) -> u32 {
        self.limit
    }

    pub fn with_page(self, page: u32) -> Result<Self, DomainError> {
        Self::new(page, self.limit)
    }

    pub fn query_pairs(self) -> [(&'static str, String); 2] {
        [
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}

/// Last addressable page for a collection; an empty collection still has page 1.
pub fn last_page(total_pages: u32) -> u32 {
    total_pages.max(1)
}

pub fn total_pages_for(total_items: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_items.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// One window of a server collection as acknowledged by the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    items: Vec<T>,
    page_number: u32,
    page_size: u32,
    total_items: u64,
    total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(
        items: Vec<T>,
        page_number: u32,
        page_size: u32,
        total_items: u64,
        total_pages: u32,
    ) -> Result<Self, DomainError> {
        if page_size == 0 {
            return Err(DomainError::invariant("page size must be at least 1"));
        }
        if page_number == 0 {
            return Err(DomainError::invariant("page numbers start at 1"));
        }
        if items.len() > page_size as usize {
            return Err(DomainError::invariant(format!(
                "page holds {} items but the page size is {page_size}",
                items.len()
            )));
        }
        if page_number > last_page(total_pages) {
            return Err(DomainError::invariant(format!(
                "page {page_number} is beyond the last page {total_pages}"
            )));
        }
        if total_pages == 0 && !items.is_empty() {
            return Err(DomainError::invariant(
                "an empty collection cannot return items",
            ));
        }
        Ok(Self {
            items,
            page_number,
            page_size,
            total_items,
            total_pages,
        })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn number(&self) -> u32 {
        self.page_number
    }

    pub fn size(&self) -> u32 {
        self.page_size
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn last_page(&self) -> u32 {
        last_page(self.total_pages)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    pub fn contains_page(&self, page: u32) -> bool {
        (1..=self.last_page()).contains(&page)
    }
}

/// Outcome of asking the server for a page.
///
/// Collections can shrink between requests, so a page that existed when the
/// request was issued may be past the end by the time it is answered.
#[derive(Debug, Clone, PartialEq)]
pub enum PageFetch<T> {
    Page(Page<T>),
    BeyondEnd { total_items: u64, total_pages: u32 },
}

impl<T> PageFetch<T> {
    /// Window a fully materialised collection the same way the server would.
    pub fn from_slice(all: Vec<T>, request: PageRequest) -> Result<Self, DomainError> {
        let total_items = all.len() as u64;
        let total_pages = total_pages_for(total_items, request.limit());
        if request.page() > last_page(total_pages) {
            return Ok(Self::BeyondEnd {
                total_items,
                total_pages,
            });
        }
        let start = (request.page() as usize - 1) * request.limit() as usize;
        let items: Vec<T> = all
            .into_iter()
            .skip(start)
            .take(request.limit() as usize)
            .collect();
        Page::new(
            items,
            request.page(),
            request.limit(),
            total_items,
            total_pages,
        )
        .map(Self::Page)
    }

    pub fn into_page(self) -> Option<Page<T>> {
        match self {
            Self::Page(page) => Some(page),
            Self::BeyondEnd { .. } => None,
        }
    }
}
