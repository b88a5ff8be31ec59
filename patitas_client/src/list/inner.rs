use std::sync::Arc;
use std::time::Duration;

use actix::prelude::*;

use crate::client::api_model::{ListQueryParams, PageSize, PaginatedResponse};
use crate::client::error::FetchResult;
use crate::client::now_millis;
use crate::client::utils::ms;

use super::cache::QueryCache;
use super::debounce::Debounce;
use super::list_key::ListKey;
use super::listener::{ListFailure, ListListener, ListSnapshot, ListStatus};
use super::pagination::{derive_pagination_view, total_pages};
use super::source::{PageResult, PageSource};
use super::ListOptions;

/// State machine behind one list screen.
///
/// Every command, debounce timer and fetch completion runs in this actor's
/// mailbox, one at a time. A completed fetch is always cached under its own
/// key but only shown when that key is still the current one.
pub struct ListInnerActor<T> {
    source: Arc<dyn PageSource<T>>,
    endpoint: String,
    options: ListOptions,
    params: ListQueryParams,
    search: Debounce<String>,
    cache: QueryCache<T>,
    status: ListStatus,
    data: Option<Arc<PaginatedResponse<T>>>,
    //key and signature of the page in `data`
    data_key: String,
    data_sign: String,
    //key of the last query issued for the view
    view_key: String,
    total_items: usize,
    //count key `total_items` was read from
    total_key: String,
    //bumped by invalidate, older fetches are neither cached nor shown
    generation: u64,
    error: Option<ListFailure>,
    listeners: Vec<Box<dyn ListListener<T> + Send>>,
    version: u64,
}

pub enum ListCmd<T> {
    SetSearch(String),
    SetFilter(String, Option<String>),
    SetFilters(Vec<(String, Option<String>)>),
    SetOrdering(Option<String>),
    SetPage(usize),
    SetPageSize(PageSize),
    NextPage,
    PreviousPage,
    Refresh,
    Invalidate,
    Snapshot,
    Subscribe(Box<dyn ListListener<T> + Send>),
    Close,
}

impl<T: 'static> Message for ListCmd<T> {
    type Result = Result<ListHandleResult<T>, std::io::Error>;
}

pub enum ListHandleResult<T> {
    None,
    Accepted(bool),
    Snapshot(ListSnapshot<T>),
}

impl<T> ListInnerActor<T>
where
    T: Send + Sync + 'static,
{
    pub fn new(source: Arc<dyn PageSource<T>>, options: ListOptions) -> Self {
        let endpoint = source.endpoint();
        let params = ListQueryParams::new(1, options.page_size);
        let search = Debounce::new(String::new(), ms(options.debounce_millis));
        let cache = QueryCache::new(options.cache_ttl_millis);
        Self {
            source,
            endpoint,
            options,
            params,
            search,
            cache,
            status: ListStatus::Loading,
            data: None,
            data_key: String::new(),
            data_sign: String::new(),
            view_key: String::new(),
            total_items: 0,
            total_key: String::new(),
            generation: 0,
            error: None,
            listeners: Vec::new(),
            version: 0,
        }
    }

    fn current_key(&self) -> String {
        ListKey::new(&self.endpoint, &self.params).build_key()
    }

    fn current_count_key(&self) -> String {
        ListKey::new(&self.endpoint, &self.params).count_key()
    }

    fn snapshot(&self) -> ListSnapshot<T> {
        ListSnapshot {
            status: self.status,
            params: self.params.clone(),
            raw_search: self.search.live().to_owned(),
            data: self.data.clone(),
            pagination: derive_pagination_view(
                self.params.page,
                self.total_items,
                self.params.page_size.value(),
            ),
            error: self.error.clone(),
            version: self.version,
        }
    }

    fn publish(&mut self) {
        self.version += 1;
        let snapshot = self.snapshot();
        for listener in self.listeners.iter() {
            listener.change(&snapshot);
        }
    }

    fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.params.page_size.value())
    }

    /// Brings the view to the current key, from the cache when possible.
    fn query(&mut self, ctx: &mut Context<Self>) {
        let key = self.current_key();
        if let Some(page) = self.cache.get(&key, now_millis()) {
            let (response, sign) = (page.response.clone(), page.sign.clone());
            log::debug!("list cache hit:{}", &key);
            self.view_key = key.clone();
            self.apply_page(key, response, sign);
            return;
        }
        //the same page stays on screen while it is fetched again
        let revalidate = self.view_key == key
            && self.data_key == key
            && self.status == ListStatus::Ready
            && self.data.is_some();
        self.view_key = key.clone();
        if !revalidate {
            self.status = ListStatus::Loading;
            self.error = None;
            if !self.options.keep_previous_data {
                self.data = None;
                self.data_key.clear();
                self.data_sign.clear();
            }
            self.publish();
        }
        self.fetch(key, ctx);
    }

    fn query_if_changed(&mut self, ctx: &mut Context<Self>) {
        if self.current_key() != self.view_key {
            self.query(ctx);
        }
    }

    fn fetch(&mut self, key: String, ctx: &mut Context<Self>) {
        let source = self.source.clone();
        let params = self.params.clone();
        let generation = self.generation;
        log::debug!("list fetch:{}", &key);
        async move { (key, source.fetch_page(&params).await) }
            .into_actor(self)
            .map(move |(key, res), act, _| act.on_page(key, generation, res))
            .spawn(ctx);
    }

    fn on_page(&mut self, key: String, generation: u64, res: FetchResult<PageResult<T>>) {
        if generation != self.generation {
            log::debug!("list response from before invalidate ignored:{}", &key);
            return;
        }
        let current = key == self.current_key();
        match res {
            Ok(page) => {
                let response = Arc::new(page.response);
                self.cache
                    .insert(key.clone(), response.clone(), page.sign.clone(), now_millis());
                if current {
                    self.apply_page(key, response, page.sign);
                } else {
                    log::debug!("list stale response ignored:{}", &key);
                }
            }
            Err(e) => {
                if !current {
                    log::debug!("list stale error ignored:{},{}", &key, e);
                    return;
                }
                log::warn!("list fetch error:{}", e);
                self.status = ListStatus::Failed;
                self.error = Some(ListFailure::from(&e));
                if !self.options.keep_previous_data {
                    self.data = None;
                    self.data_key.clear();
                    self.data_sign.clear();
                    self.total_items = 0;
                    self.total_key.clear();
                }
                self.publish();
            }
        }
    }

    fn apply_page(&mut self, key: String, response: Arc<PaginatedResponse<T>>, sign: String) {
        let unchanged = self.status == ListStatus::Ready
            && self.data.is_some()
            && self.data_key == key
            && self.data_sign == sign;
        if unchanged {
            return;
        }
        self.total_items = response.count;
        self.total_key = self.current_count_key();
        self.data = Some(response);
        self.data_key = key;
        self.data_sign = sign;
        self.status = ListStatus::Ready;
        self.error = None;
        self.publish();
    }

    fn reset_page(&mut self) {
        self.params.page = 1;
    }

    fn on_search_settled(&mut self, changed: bool, ctx: &mut Context<Self>) {
        if changed {
            self.params.search = self.search.value().to_owned();
            self.reset_page();
        }
        self.query_if_changed(ctx);
    }

    /// Accepted only inside `1..=total_pages` of the current query; until its
    /// count is known every page is rejected.
    fn set_page(&mut self, page: usize, ctx: &mut Context<Self>) -> bool {
        let total_pages = if self.total_key == self.current_count_key() {
            self.total_pages()
        } else {
            0
        };
        if page < 1 || page > total_pages || page == self.params.page {
            log::debug!(
                "list page rejected:{},current:{},total:{}",
                page,
                self.params.page,
                total_pages
            );
            return false;
        }
        self.params.page = page;
        self.query(ctx);
        true
    }

    pub fn hb(&self, ctx: &mut Context<Self>) {
        ctx.run_later(Duration::new(1, 0), |act, ctx| {
            let size = act.cache.clear_expired(now_millis());
            if size > 0 {
                log::debug!("list cache expired:{},left:{}", size, act.cache.len());
            }
            act.hb(ctx);
        });
    }
}

impl<T> Actor for ListInnerActor<T>
where
    T: Send + Sync + 'static,
{
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        log::info!("ListInnerActor started,endpoint:{}", &self.endpoint);
        self.hb(ctx);
        self.query(ctx);
    }

    fn stopping(&mut self, ctx: &mut Self::Context) -> Running {
        self.search.cancel(ctx);
        Running::Stop
    }

    fn stopped(&mut self, _: &mut Self::Context) {
        log::info!("ListInnerActor stopped,endpoint:{}", &self.endpoint);
    }
}

impl<T> Handler<ListCmd<T>> for ListInnerActor<T>
where
    T: Send + Sync + 'static,
{
    type Result = Result<ListHandleResult<T>, std::io::Error>;

    fn handle(&mut self, msg: ListCmd<T>, ctx: &mut Context<Self>) -> Self::Result {
        match msg {
            ListCmd::SetSearch(search) => {
                self.reset_page();
                self.search
                    .push(search, ctx, |act| &mut act.search, Self::on_search_settled);
                self.publish();
            }
            ListCmd::SetFilter(key, value) => {
                self.params.set_filter(&key, value);
                self.reset_page();
                self.query(ctx);
            }
            ListCmd::SetFilters(pairs) => {
                self.params.filters.clear();
                for (key, value) in pairs {
                    self.params.set_filter(&key, value);
                }
                self.reset_page();
                self.query(ctx);
            }
            ListCmd::SetOrdering(ordering) => {
                self.params.ordering = ordering;
                self.reset_page();
                self.query(ctx);
            }
            ListCmd::SetPage(page) => {
                return Ok(ListHandleResult::Accepted(self.set_page(page, ctx)));
            }
            ListCmd::SetPageSize(page_size) => {
                self.params.page_size = page_size;
                self.reset_page();
                self.query(ctx);
            }
            ListCmd::NextPage => {
                let page = self.params.page + 1;
                return Ok(ListHandleResult::Accepted(self.set_page(page, ctx)));
            }
            ListCmd::PreviousPage => {
                let page = self.params.page.saturating_sub(1);
                return Ok(ListHandleResult::Accepted(self.set_page(page, ctx)));
            }
            ListCmd::Refresh => {
                let key = self.current_key();
                self.cache.remove(&key);
                self.query(ctx);
            }
            ListCmd::Invalidate => {
                self.generation += 1;
                self.cache.invalidate_all();
                self.query(ctx);
            }
            ListCmd::Snapshot => {
                return Ok(ListHandleResult::Snapshot(self.snapshot()));
            }
            ListCmd::Subscribe(listener) => {
                listener.change(&self.snapshot());
                self.listeners.push(listener);
            }
            ListCmd::Close => {
                ctx.stop();
            }
        }
        Ok(ListHandleResult::None)
    }
}
