//! Pure pagination math, chunking, and navigation state.

use thiserror::Error;

/// Errors raised by the pure pagination helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// Page size must be at least one item.
    #[error("page size must be at least 1, got {0}")]
    InvalidPageSize(usize),
}

/// Navigation actions exposed by paginated views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavAction {
    Previous,
    Home,
    Next,
}

impl NavAction {
    /// Stable identifier used inside component custom IDs.
    pub fn as_str(self) -> &'static str {
        match self {
            NavAction::Previous => "previous",
            NavAction::Home => "home",
            NavAction::Next => "next",
        }
    }

    /// Parse an identifier produced by [`NavAction::as_str`].
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "previous" => Some(NavAction::Previous),
            "home" => Some(NavAction::Home),
            "next" => Some(NavAction::Next),
            _ => None,
        }
    }
}

/// Split `items` into consecutive pages of at most `size` elements.
///
/// An empty input yields no pages at all, not a single empty page.
pub fn chunk<T: Clone>(items: &[T], size: usize) -> Result<Vec<Vec<T>>, PaginationError> {
    if size == 0 {
        return Err(PaginationError::InvalidPageSize(size));
    }

    Ok(items.chunks(size).map(<[T]>::to_vec).collect())
}

/// Clamp a zero-based page index into `[0, total_pages - 1]`.
fn clamp_index(page: usize, total_pages: usize) -> usize {
    page.min(total_pages.max(1) - 1)
}

/// Current position in a chunked list.
///
/// `page` is zero-based and always lies in `[0, page_count())`. An empty
/// `pages` list behaves like a single empty page. `page_size` is the size the
/// items were chunked with, so global item numbers follow from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState<T> {
    page: usize,
    page_size: usize,
    pages: Vec<Vec<T>>,
}

impl<T> PaginationState<T> {
    /// Chunk `items` by `page_size` and start on the first page.
    pub fn paginate(items: &[T], page_size: usize) -> Result<Self, PaginationError>
    where
        T: Clone,
    {
        Ok(Self {
            page: 0,
            page_size,
            pages: chunk(items, page_size)?,
        })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// One-based number of the first item on the current page.
    pub fn first_item_number(&self) -> usize {
        self.page * self.page_size + 1
    }

    pub fn pages(&self) -> &[Vec<T>] {
        &self.pages
    }

    /// Number of pages, never less than one.
    pub fn page_count(&self) -> usize {
        self.pages.len().max(1)
    }

    /// Items on the current page, empty when there is no data.
    pub fn current_items(&self) -> &[T] {
        self.pages.get(self.page).map_or(&[], Vec::as_slice)
    }

    /// Total number of items across all pages.
    pub fn item_count(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }

    pub fn is_first(&self) -> bool {
        self.page == 0
    }

    pub fn is_last(&self) -> bool {
        self.page + 1 >= self.page_count()
    }

    /// Apply a navigation action, staying inside the valid page range.
    pub fn navigate(&mut self, action: NavAction) {
        self.page = match action {
            NavAction::Previous => self.page.saturating_sub(1),
            NavAction::Home => 0,
            NavAction::Next => clamp_index(self.page.saturating_add(1), self.page_count()),
        };
    }
}
