use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;

use crate::client::api_model::{ListQueryParams, PaginatedResponse};
use crate::client::error::{FetchError, FetchResult};
use crate::client::get_md5;
use crate::client::utils::ms;

use super::source::{PageResult, PageSource};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Row {
    pub id: i64,
    pub name: String,
    pub estado: String,
}

/// Rows `1..=size`: every fourth one is "Max", the rest "Luna"; every
/// third one is adopted.
pub(crate) fn rows(size: i64) -> Vec<Row> {
    (1..=size)
        .map(|i| Row {
            id: i,
            name: if i % 4 == 0 {
                format!("Max {}", i)
            } else {
                format!("Luna {}", i)
            },
            estado: if i % 3 == 0 {
                "ADOPTADO".to_owned()
            } else {
                "ABIERTO".to_owned()
            },
        })
        .collect()
}

/// In-memory collection recording every request it serves.
#[derive(Default)]
pub(crate) struct MemorySource {
    rows: Mutex<Vec<Row>>,
    requests: Mutex<Vec<ListQueryParams>>,
    delays: Mutex<HashMap<usize, u64>>,
    fail_pages: Mutex<HashSet<usize>>,
}

impl MemorySource {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    pub fn requests(&self) -> Vec<ListQueryParams> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn set_delay(&self, page: usize, millis: u64) {
        self.delays.lock().unwrap().insert(page, millis);
    }

    pub fn set_fail(&self, page: usize, fail: bool) {
        let mut fail_pages = self.fail_pages.lock().unwrap();
        if fail {
            fail_pages.insert(page);
        } else {
            fail_pages.remove(&page);
        }
    }

    pub fn set_rows(&self, rows: Vec<Row>) {
        *self.rows.lock().unwrap() = rows;
    }

    fn query(&self, params: &ListQueryParams) -> PaginatedResponse<Row> {
        let search = params.search.trim().to_lowercase();
        let estado = params.filters.get("estado");
        let matched: Vec<Row> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|e| search.is_empty() || e.name.to_lowercase().contains(&search))
            .filter(|e| estado.map(|v| &e.estado == v).unwrap_or(true))
            .cloned()
            .collect();
        let size = params.page_size.value();
        let results = matched
            .iter()
            .skip((params.page - 1) * size)
            .take(size)
            .cloned()
            .collect();
        PaginatedResponse::new(matched.len(), results)
    }
}

#[async_trait]
impl PageSource<Row> for MemorySource {
    fn endpoint(&self) -> String {
        "memory/casos/".to_owned()
    }

    async fn fetch_page(&self, params: &ListQueryParams) -> FetchResult<PageResult<Row>> {
        self.requests.lock().unwrap().push(params.clone());
        let delay = self.delays.lock().unwrap().get(&params.page).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(ms(delay)).await;
        }
        if self.fail_pages.lock().unwrap().contains(&params.page) {
            return Err(FetchError::Http {
                status: 500,
                endpoint: self.endpoint(),
                body: "boom".to_owned(),
            });
        }
        let response = self.query(params);
        let sign = get_md5(&serde_json::to_vec(&response).unwrap());
        Ok(PageResult { response, sign })
    }
}
