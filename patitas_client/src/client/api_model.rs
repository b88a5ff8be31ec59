use std::collections::BTreeMap;
use std::fmt::Debug;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One page of a backend collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginatedResponse<T> {
    pub count: usize,
    pub results: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

impl<T> Default for PaginatedResponse<T> {
    fn default() -> Self {
        Self {
            count: 0,
            results: Vec::new(),
            next: None,
            previous: None,
        }
    }
}

impl<T> PaginatedResponse<T> {
    pub fn new(count: usize, results: Vec<T>) -> Self {
        Self {
            count,
            results,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Row counts offered by the page size selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum PageSize {
    #[default]
    Ten,
    TwentyFive,
    Fifty,
    Hundred,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [
        PageSize::Ten,
        PageSize::TwentyFive,
        PageSize::Fifty,
        PageSize::Hundred,
    ];

    pub fn value(self) -> usize {
        match self {
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
            PageSize::Hundred => 100,
        }
    }

    pub fn from_value(value: usize) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.value() == value)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = usize;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::from_value(value).ok_or(value)
    }
}

/// Typed filter sets convert themselves into query pairs. `None` values
/// are dropped before they reach the request.
pub trait ListFilters {
    fn filter_pairs(&self) -> Vec<(&'static str, Option<String>)>;
}

/// The params tuple identifying one logical list query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListQueryParams {
    pub page: usize,
    pub page_size: PageSize,
    pub search: String,
    pub ordering: Option<String>,
    pub filters: BTreeMap<String, String>,
}

impl Default for ListQueryParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: PageSize::default(),
            search: String::new(),
            ordering: None,
            filters: BTreeMap::new(),
        }
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

impl ListQueryParams {
    pub fn new(page: usize, page_size: PageSize) -> Self {
        Self {
            page: page.max(1),
            page_size,
            ..Default::default()
        }
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = search.to_owned();
        self
    }

    pub fn with_filter(mut self, key: &str, value: &str) -> Self {
        self.set_filter(key, Some(value.to_owned()));
        self
    }

    /// Sets or clears one filter; empty values clear it.
    pub fn set_filter(&mut self, key: &str, value: Option<String>) {
        match normalize(value) {
            Some(v) => {
                self.filters.insert(key.to_owned(), v);
            }
            None => {
                self.filters.remove(key);
            }
        }
    }

    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_owned(), self.page.to_string()),
            ("page_size".to_owned(), self.page_size.value().to_string()),
        ];
        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("search".to_owned(), search.to_owned()));
        }
        if let Some(ordering) = normalize(self.ordering.clone()) {
            pairs.push(("ordering".to_owned(), ordering));
        }
        for (k, v) in &self.filters {
            pairs.push((k.to_owned(), v.to_owned()));
        }
        pairs
    }

    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(self.to_query_pairs()).unwrap_or_default()
    }
}

/// Filter pairs for endpoints without pagination (exports, KPIs).
pub fn filter_query_pairs<F: ListFilters + ?Sized>(filters: &F) -> Vec<(String, String)> {
    filters
        .filter_pairs()
        .into_iter()
        .filter_map(|(k, v)| normalize(v).map(|v| (k.to_owned(), v)))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        filter_query_pairs(self)
    }
}

impl ListFilters for DateRange {
    fn filter_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("start_date", self.start_date.map(|d| d.to_string())),
            ("end_date", self.end_date.map(|d| d.to_string())),
        ]
    }
}
