use std::sync::Arc;

use actix::prelude::*;
use anyhow::anyhow;

use crate::client::api_model::{ListFilters, PageSize};

use super::inner::{ListCmd, ListHandleResult, ListInnerActor};
use super::listener::{ListListener, ListSnapshot};
use super::source::PageSource;
use super::ListOptions;

/// Handle to one list screen. Dropping it stops the list actor.
pub struct ListController<T>
where
    T: Send + Sync + 'static,
{
    addr: Addr<ListInnerActor<T>>,
}

impl<T> Drop for ListController<T>
where
    T: Send + Sync + 'static,
{
    fn drop(&mut self) {
        self.addr.do_send(ListCmd::Close);
    }
}

impl<T> ListController<T>
where
    T: Send + Sync + 'static,
{
    /// Starts the list actor on the current actix system; the first page
    /// is requested right away.
    pub fn new(source: Arc<dyn PageSource<T>>, options: ListOptions) -> Self {
        let addr = ListInnerActor::new(source, options).start();
        Self { addr }
    }

    async fn send(&self, cmd: ListCmd<T>) -> anyhow::Result<ListHandleResult<T>> {
        let res = self.addr.send(cmd).await??;
        Ok(res)
    }

    async fn send_accepted(&self, cmd: ListCmd<T>) -> anyhow::Result<bool> {
        match self.send(cmd).await? {
            ListHandleResult::Accepted(accepted) => Ok(accepted),
            _ => Err(anyhow!("unexpected list response")),
        }
    }

    /// Resets to page 1 now, queries once the text has been quiet for the
    /// debounce window.
    pub async fn set_search(&self, search: &str) -> anyhow::Result<()> {
        self.send(ListCmd::SetSearch(search.to_owned())).await?;
        Ok(())
    }

    /// An empty or missing value removes the filter.
    pub async fn set_filter(&self, key: &str, value: Option<&str>) -> anyhow::Result<()> {
        self.send(ListCmd::SetFilter(
            key.to_owned(),
            value.map(|e| e.to_owned()),
        ))
        .await?;
        Ok(())
    }

    pub async fn set_filters<F: ListFilters + ?Sized>(&self, filters: &F) -> anyhow::Result<()> {
        let pairs = filters
            .filter_pairs()
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v))
            .collect();
        self.send(ListCmd::SetFilters(pairs)).await?;
        Ok(())
    }

    pub async fn set_ordering(&self, ordering: Option<&str>) -> anyhow::Result<()> {
        self.send(ListCmd::SetOrdering(ordering.map(|e| e.to_owned())))
            .await?;
        Ok(())
    }

    /// Returns false when `page` is outside `1..=total_pages` or already shown.
    pub async fn set_page(&self, page: usize) -> anyhow::Result<bool> {
        self.send_accepted(ListCmd::SetPage(page)).await
    }

    pub async fn set_page_size(&self, page_size: PageSize) -> anyhow::Result<()> {
        self.send(ListCmd::SetPageSize(page_size)).await?;
        Ok(())
    }

    pub async fn next_page(&self) -> anyhow::Result<bool> {
        self.send_accepted(ListCmd::NextPage).await
    }

    pub async fn previous_page(&self) -> anyhow::Result<bool> {
        self.send_accepted(ListCmd::PreviousPage).await
    }

    /// Fetches the current page again, bypassing the cache.
    pub async fn refresh(&self) -> anyhow::Result<()> {
        self.send(ListCmd::Refresh).await?;
        Ok(())
    }

    /// Forgets every cached page, then refetches the current one.
    pub async fn invalidate(&self) -> anyhow::Result<()> {
        self.send(ListCmd::Invalidate).await?;
        Ok(())
    }

    pub async fn snapshot(&self) -> anyhow::Result<ListSnapshot<T>> {
        match self.send(ListCmd::Snapshot).await? {
            ListHandleResult::Snapshot(snapshot) => Ok(snapshot),
            _ => Err(anyhow!("unexpected list response")),
        }
    }

    pub async fn subscribe<L: ListListener<T> + Send + 'static>(
        &self,
        listener: Box<L>,
    ) -> anyhow::Result<()> {
        self.send(ListCmd::Subscribe(listener)).await?;
        Ok(())
    }
}
