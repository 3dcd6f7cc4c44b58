use serde::Serialize;

pub const SEARCH_PAGE_SIZE: usize = 9;
pub const SAVED_PAGE_SIZE: usize = 5;

/// Splits an ordered list into fixed-size, 1-based pages.
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    items: Vec<T>,
    per_page: usize,
}

/// One page of results plus the navigation data a listing needs.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub num_pages: usize,
    pub count: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_page: Option<usize>,
    pub previous_page: Option<usize>,
}

impl<T> Paginator<T> {
    /// A `per_page` of zero is treated as one.
    pub fn new(items: Vec<T>, per_page: usize) -> Self {
        Self {
            items,
            per_page: per_page.max(1),
        }
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Always at least one, so an empty list still has an (empty) first page.
    pub fn num_pages(&self) -> usize {
        self.items.len().div_ceil(self.per_page).max(1)
    }

    /// Resolves a raw `?page=` value. Anything that is not an integer gives
    /// page 1; an integer outside `1..=num_pages`, however large, gives the
    /// last page.
    pub fn page_number(&self, raw: Option<&str>) -> usize {
        let Some(raw) = raw.map(str::trim) else {
            return 1;
        };

        let digits = raw.strip_prefix(|c| c == '+' || c == '-').unwrap_or(raw);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return 1;
        }

        let last = self.num_pages();
        match raw.parse::<usize>() {
            Ok(n) if (1..=last).contains(&n) => n,
            _ => last,
        }
    }

    pub fn page(self, raw: Option<&str>) -> Page<T> {
        let number = self.page_number(raw);
        let num_pages = self.num_pages();
        let count = self.count();

        let items = self
            .items
            .into_iter()
            .skip((number - 1) * self.per_page)
            .take(self.per_page)
            .collect();

        let has_next = number < num_pages;
        let has_previous = number > 1;

        Page {
            items,
            number,
            num_pages,
            count,
            has_next,
            has_previous,
            next_page: has_next.then_some(number + 1),
            previous_page: has_previous.then(|| number - 1),
        }
    }
}
