use std::collections::HashMap;
use std::sync::Arc;

use inner_mem_cache::TimeoutSet;

use crate::client::api_model::PaginatedResponse;

pub struct CachedPage<T> {
    pub response: Arc<PaginatedResponse<T>>,
    pub sign: String,
    pub expire_time: u64,
}

impl<T> Clone for CachedPage<T> {
    fn clone(&self) -> Self {
        Self {
            response: self.response.clone(),
            sign: self.sign.clone(),
            expire_time: self.expire_time,
        }
    }
}

/// Resolved pages by list key. Written on every resolve, the later
/// resolution of a key overwrites the earlier one.
pub struct QueryCache<T> {
    map: HashMap<String, CachedPage<T>>,
    timeout_set: TimeoutSet<String>,
    ttl_millis: u64,
}

impl<T> QueryCache<T> {
    pub fn new(ttl_millis: u64) -> Self {
        Self {
            map: Default::default(),
            timeout_set: Default::default(),
            ttl_millis,
        }
    }

    pub fn get(&self, key: &str, now: u64) -> Option<&CachedPage<T>> {
        self.map.get(key).filter(|e| e.expire_time > now)
    }

    pub fn insert(
        &mut self,
        key: String,
        response: Arc<PaginatedResponse<T>>,
        sign: String,
        now: u64,
    ) {
        let expire_time = now + self.ttl_millis;
        self.timeout_set.add(expire_time, key.clone());
        self.map.insert(
            key,
            CachedPage {
                response,
                sign,
                expire_time,
            },
        );
    }

    pub fn remove(&mut self, key: &str) -> Option<CachedPage<T>> {
        self.map.remove(key)
    }

    /// Drops entries whose ttl elapsed. Keys refreshed after they were
    /// scheduled survive until their newer expiry.
    pub fn clear_expired(&mut self, now: u64) -> usize {
        let mut size = 0;
        for key in self.timeout_set.timeout(now) {
            let expired = self
                .map
                .get(&key)
                .map(|e| e.expire_time <= now)
                .unwrap_or(false);
            if expired {
                self.map.remove(&key);
                size += 1;
            }
        }
        size
    }

    pub fn invalidate_all(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
