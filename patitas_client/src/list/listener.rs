use std::sync::{Arc, RwLock};

use crate::client::api_model::{ListQueryParams, PaginatedResponse};
use crate::client::error::FetchError;

use super::pagination::PaginationView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    Loading,
    Ready,
    Failed,
}

/// The last fetch error as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFailure {
    pub message: String,
    pub status: Option<u16>,
    pub endpoint: Option<String>,
}

impl From<&FetchError> for ListFailure {
    fn from(err: &FetchError) -> Self {
        Self {
            message: err.to_string(),
            status: err.status(),
            endpoint: err.endpoint().map(|e| e.to_owned()),
        }
    }
}

/// Everything a list screen renders. `version` grows with every publish.
#[derive(Debug)]
pub struct ListSnapshot<T> {
    pub status: ListStatus,
    pub params: ListQueryParams,
    pub raw_search: String,
    pub data: Option<Arc<PaginatedResponse<T>>>,
    pub pagination: PaginationView,
    pub error: Option<ListFailure>,
    pub version: u64,
}

impl<T> Clone for ListSnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            status: self.status,
            params: self.params.clone(),
            raw_search: self.raw_search.clone(),
            data: self.data.clone(),
            pagination: self.pagination.clone(),
            error: self.error.clone(),
            version: self.version,
        }
    }
}

impl<T> ListSnapshot<T> {
    pub fn rows(&self) -> &[T] {
        match &self.data {
            Some(data) => &data.results,
            None => &[],
        }
    }

    pub fn total_items(&self) -> usize {
        self.pagination.total_items
    }

    pub fn is_loading(&self) -> bool {
        self.status == ListStatus::Loading
    }
}

pub trait ListListener<T> {
    fn change(&self, snapshot: &ListSnapshot<T>);
}

pub type ListenerCallback<T> = Arc<dyn Fn(&ListSnapshot<T>) + Send + Sync>;

/// Keeps the latest snapshot, optionally forwarding it to a callback.
pub struct ListDefaultListener<T> {
    pub content: Arc<RwLock<Option<ListSnapshot<T>>>>,
    callback: Option<ListenerCallback<T>>,
}

impl<T> Clone for ListDefaultListener<T> {
    fn clone(&self) -> Self {
        Self {
            content: self.content.clone(),
            callback: self.callback.clone(),
        }
    }
}

impl<T> Default for ListDefaultListener<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListDefaultListener<T> {
    pub fn new() -> Self {
        Self {
            content: Default::default(),
            callback: None,
        }
    }

    pub fn with_callback(callback: ListenerCallback<T>) -> Self {
        Self {
            content: Default::default(),
            callback: Some(callback),
        }
    }

    pub fn get_value(&self) -> Option<ListSnapshot<T>> {
        self.content.read().ok().and_then(|r| r.clone())
    }

    fn set_value(&self, snapshot: &ListSnapshot<T>) {
        if let Ok(mut r) = self.content.write() {
            *r = Some(snapshot.clone());
        }
    }
}

impl<T> ListListener<T> for ListDefaultListener<T> {
    fn change(&self, snapshot: &ListSnapshot<T>) {
        log::debug!(
            "ListDefaultListener change,version:{},status:{:?}",
            snapshot.version,
            snapshot.status
        );
        self.set_value(snapshot);
        if let Some(callback) = &self.callback {
            callback(snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;

    fn snapshot(version: u64) -> ListSnapshot<i64> {
        ListSnapshot {
            status: ListStatus::Ready,
            params: ListQueryParams::default(),
            raw_search: String::new(),
            data: Some(Arc::new(PaginatedResponse::new(2, vec![1, 2]))),
            pagination: Default::default(),
            error: None,
            version,
        }
    }

    #[test]
    fn test_default_listener_keeps_latest() {
        let seen = Arc::new(AtomicU64::new(0));
        let seen_clone = seen.clone();
        let listener = ListDefaultListener::<i64>::with_callback(Arc::new(
            move |s: &ListSnapshot<i64>| {
                seen_clone.store(s.version, Ordering::SeqCst);
            },
        ));
        assert!(listener.get_value().is_none());
        listener.change(&snapshot(1));
        listener.change(&snapshot(2));
        let value = listener.get_value().unwrap();
        assert_eq!(value.version, 2);
        assert_eq!(value.rows(), &[1, 2]);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failure_from_fetch_error() {
        let err = FetchError::Http {
            status: 503,
            endpoint: "http://127.0.0.1:8000/api/casos/".to_owned(),
            body: String::new(),
        };
        let failure = ListFailure::from(&err);
        assert_eq!(failure.status, Some(503));
        assert_eq!(
            failure.endpoint.as_deref(),
            Some("http://127.0.0.1:8000/api/casos/")
        );
        assert!(failure.message.contains("503"));
    }
}
