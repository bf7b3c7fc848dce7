//! Page-number pagination.

use std::str::FromStr;

use thiserror::Error;

/// Keyword accepted in place of a page number to select the final page.
pub const LAST_PAGE_KEYWORD: &str = "last";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("invalid page")]
    InvalidPage,
}

/// Requested page, either by 1-based number or as "the last one".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumber {
    Number(u64),
    Last,
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::Number(1)
    }
}

impl FromStr for PageNumber {
    type Err = PaginationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == LAST_PAGE_KEYWORD {
            return Ok(Self::Last);
        }

        match value.parse::<u64>() {
            Ok(number) if number >= 1 => Ok(Self::Number(number)),
            _ => Err(PaginationError::InvalidPage),
        }
    }
}

/// Page directive passed down to list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: PageNumber,
    pub size: u64,
}

impl PageRequest {
    /// A zero size is treated as one item per page.
    #[must_use]
    pub fn new(number: PageNumber, size: u64) -> Self {
        Self {
            number,
            size: size.max(1),
        }
    }

    /// Resolve the requested page against the total number of matching items.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidPage`] when the page lies past the last page.
    pub fn resolve(&self, count: u64) -> Result<u64, PaginationError> {
        let last = num_pages(count, self.size);

        match self.number {
            PageNumber::Last => Ok(last),
            PageNumber::Number(number) if number <= last => Ok(number),
            PageNumber::Number(_) => Err(PaginationError::InvalidPage),
        }
    }
}

/// Number of pages needed for `count` items. An empty result still has one (empty) page.
#[must_use]
pub fn num_pages(count: u64, size: u64) -> u64 {
    count.div_ceil(size.max(1)).max(1)
}

/// Zero-based offset of the first item on page `number`.
#[must_use]
pub fn offset(number: u64, size: u64) -> u64 {
    number.saturating_sub(1).saturating_mul(size)
}

/// One page of results plus what's needed to link to its neighbours.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub count: u64,
    pub number: u64,
    pub size: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, count: u64, number: u64, size: u64) -> Self {
        Self {
            items,
            count,
            number,
            size,
        }
    }

    #[must_use]
    pub fn num_pages(&self) -> u64 {
        num_pages(self.count, self.size)
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages()
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    #[must_use]
    pub fn next_number(&self) -> Option<u64> {
        self.has_next().then(|| self.number + 1)
    }

    #[must_use]
    pub fn previous_number(&self) -> Option<u64> {
        self.has_previous().then(|| self.number - 1)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            count: self.count,
            number: self.number,
            size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_number_parses_numbers_and_last() {
        assert_eq!("3".parse::<PageNumber>(), Ok(PageNumber::Number(3)));
        assert_eq!("last".parse::<PageNumber>(), Ok(PageNumber::Last));
        assert_eq!("0".parse::<PageNumber>(), Err(PaginationError::InvalidPage));
        assert_eq!("-1".parse::<PageNumber>(), Err(PaginationError::InvalidPage));
        assert_eq!("two".parse::<PageNumber>(), Err(PaginationError::InvalidPage));
    }

    #[test]
    fn empty_results_still_have_a_first_page() {
        let request = PageRequest::new(PageNumber::default(), 10);

        assert_eq!(request.resolve(0), Ok(1));
        assert_eq!(num_pages(0, 10), 1);
    }

    #[test]
    fn resolve_rejects_pages_past_the_end() {
        let request = PageRequest::new(PageNumber::Number(3), 10);

        assert_eq!(request.resolve(20), Err(PaginationError::InvalidPage));
        assert_eq!(request.resolve(21), Ok(3));
    }

    #[test]
    fn last_resolves_to_final_page() {
        let request = PageRequest::new(PageNumber::Last, 10);

        assert_eq!(request.resolve(25), Ok(3));
    }

    #[test]
    fn offsets_are_zero_based() {
        assert_eq!(offset(1, 10), 0);
        assert_eq!(offset(3, 10), 20);
    }

    #[test]
    fn neighbours_are_reported_only_when_they_exist() {
        let first = Page::new(vec![1, 2], 5, 1, 2);
        let middle = Page::new(vec![3, 4], 5, 2, 2);
        let last = Page::new(vec![5], 5, 3, 2);

        assert_eq!((first.previous_number(), first.next_number()), (None, Some(2)));
        assert_eq!(
            (middle.previous_number(), middle.next_number()),
            (Some(1), Some(3))
        );
        assert_eq!((last.previous_number(), last.next_number()), (Some(2), None));
    }

    #[test]
    fn zero_page_size_is_clamped() {
        assert_eq!(PageRequest::new(PageNumber::Last, 0).size, 1);
    }
}
