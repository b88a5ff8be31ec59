use async_trait::async_trait;

use crate::client::api_model::{ListQueryParams, PaginatedResponse};
use crate::client::error::FetchResult;
use crate::client::resource::{Entity, ResourceClient};

/// One fetched page and the signature of its body.
pub struct PageResult<T> {
    pub response: PaginatedResponse<T>,
    pub sign: String,
}

/// Where a list controller gets its pages from.
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    /// Collection identity, part of every cache key.
    fn endpoint(&self) -> String;

    async fn fetch_page(&self, params: &ListQueryParams) -> FetchResult<PageResult<T>>;
}

#[async_trait]
impl<T: Entity> PageSource<T> for ResourceClient<T> {
    fn endpoint(&self) -> String {
        self.collection_url()
    }

    async fn fetch_page(&self, params: &ListQueryParams) -> FetchResult<PageResult<T>> {
        let (response, sign) = self.request_client.list_page(T::RESOURCE, params).await?;
        Ok(PageResult { response, sign })
    }
}
