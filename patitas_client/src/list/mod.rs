pub mod cache;
pub mod controller;
pub mod debounce;
pub mod inner;
pub mod list_key;
pub mod listener;
pub mod pagination;
pub mod source;

#[cfg(test)]
pub(crate) mod memory_source;

use crate::client::api_model::PageSize;

pub const DEFAULT_DEBOUNCE_MILLIS: u64 = 500;
pub const DEFAULT_CACHE_TTL_MILLIS: u64 = 60000;

pub type ListController<T> = self::controller::ListController<T>;
pub type ListDefaultListener<T> = self::listener::ListDefaultListener<T>;
pub type ListSnapshot<T> = self::listener::ListSnapshot<T>;

/// Per screen list behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    /// Quiescence window applied to the search text.
    pub debounce_millis: u64,
    /// Keep the rows of the last successful page while loading or after a failure.
    pub keep_previous_data: bool,
    pub cache_ttl_millis: u64,
    pub page_size: PageSize,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            debounce_millis: DEFAULT_DEBOUNCE_MILLIS,
            keep_previous_data: false,
            cache_ttl_millis: DEFAULT_CACHE_TTL_MILLIS,
            page_size: PageSize::default(),
        }
    }
}

impl ListOptions {
    pub fn new(keep_previous_data: bool) -> Self {
        Self {
            keep_previous_data,
            ..Default::default()
        }
    }

    pub fn set_debounce_millis(mut self, debounce_millis: u64) -> Self {
        self.debounce_millis = debounce_millis;
        self
    }

    pub fn set_cache_ttl_millis(mut self, cache_ttl_millis: u64) -> Self {
        self.cache_ttl_millis = cache_ttl_millis;
        self
    }

    pub fn set_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }
}
