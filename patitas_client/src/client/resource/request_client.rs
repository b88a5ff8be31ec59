use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::api_model::{ListQueryParams, PaginatedResponse};
use crate::client::error::{FetchError, FetchResult};
use crate::client::utils::{ResponseWrap, Utils};
use crate::client::{get_md5, ApiEndpoint, Credential};

use super::Resource;

pub const DEFAULT_TIMEOUT_MILLIS: u64 = 10000;

#[derive(Clone)]
pub struct ResourceRequestClient {
    pub(crate) endpoint: Arc<ApiEndpoint>,
    pub(crate) client: reqwest::Client,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) timeout_millis: u64,
}

impl ResourceRequestClient {
    pub fn new(endpoint: Arc<ApiEndpoint>, credential: Option<Credential>) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| FetchError::InvalidRequest(e.to_string()))?;
        Ok(Self::new_with_client(endpoint, credential, client))
    }

    pub fn new_with_client(
        endpoint: Arc<ApiEndpoint>,
        credential: Option<Credential>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            endpoint,
            client,
            headers: Self::build_http_headers(credential.as_ref()),
            timeout_millis: DEFAULT_TIMEOUT_MILLIS,
        }
    }

    pub fn set_timeout_millis(&mut self, timeout_millis: u64) {
        self.timeout_millis = timeout_millis;
    }

    pub fn build_http_headers(credential: Option<&Credential>) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("Accept".to_owned(), "application/json".to_owned());
        if let Some(credential) = credential {
            if credential.is_valid() {
                headers.insert("Authorization".to_owned(), credential.header_value());
            }
        }
        headers
    }

    pub fn list_url(&self, resource: Resource, params: &ListQueryParams) -> FetchResult<String> {
        Utils::with_query(&self.endpoint.url(resource.path()), &params.to_query_pairs())
    }

    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Vec<u8>>,
    ) -> FetchResult<ResponseWrap> {
        let url = Utils::with_query(&self.endpoint.url(path), query)?;
        let resp = match body {
            Some(body) => {
                let mut headers = self.headers.clone();
                headers.insert("Content-Type".to_owned(), "application/json".to_owned());
                Utils::request(
                    &self.client,
                    method,
                    &url,
                    body,
                    Some(&headers),
                    Some(self.timeout_millis),
                )
                .await?
            }
            None => {
                Utils::request(
                    &self.client,
                    method,
                    &url,
                    vec![],
                    Some(&self.headers),
                    Some(self.timeout_millis),
                )
                .await?
            }
        };
        resp.error_for_status()
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> FetchResult<T> {
        let resp = self.send(Method::GET, path, query, None).await?;
        resp.json()
    }

    pub async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> FetchResult<T> {
        let body = serde_json::to_vec(body).map_err(|e| FetchError::InvalidRequest(e.to_string()))?;
        let resp = self.send(method, path, &[], Some(body)).await?;
        resp.json()
    }

    pub async fn delete(&self, path: &str) -> FetchResult<()> {
        let resp = self.send(Method::DELETE, path, &[], None).await?;
        log::info!("delete:{},status:{}", &resp.url, resp.status);
        Ok(())
    }

    pub async fn get_bytes(&self, path: &str, query: &[(String, String)]) -> FetchResult<ResponseWrap> {
        self.send(Method::GET, path, query, None).await
    }

    /// Fetches one page and signs it with the MD5 of the raw body.
    pub async fn list_page<T: DeserializeOwned>(
        &self,
        resource: Resource,
        params: &ListQueryParams,
    ) -> FetchResult<(PaginatedResponse<T>, String)> {
        let resp = self
            .send(Method::GET, resource.path(), &params.to_query_pairs(), None)
            .await?;
        let page: PaginatedResponse<T> = resp.json()?;
        log::debug!(
            "list_page:{},count:{},rows:{}",
            &resp.url,
            page.count,
            page.results.len()
        );
        Ok((page, get_md5(&resp.body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::api_model::PageSize;

    fn request_client(credential: Option<Credential>) -> ResourceRequestClient {
        let endpoint = Arc::new(ApiEndpoint::parse("http://127.0.0.1:8000/api").unwrap());
        ResourceRequestClient::new_with_client(endpoint, credential, reqwest::Client::new())
    }

    #[test]
    fn test_list_url_scenario() {
        let client = request_client(None);
        let params = ListQueryParams::new(1, PageSize::Ten).with_search("luna");
        assert_eq!(
            client.list_url(Resource::Casos, &params).unwrap(),
            "http://127.0.0.1:8000/api/casos/?page=1&page_size=10&search=luna"
        );
        let params = ListQueryParams::new(1, PageSize::Fifty);
        assert_eq!(
            client.list_url(Resource::Donaciones, &params).unwrap(),
            "http://127.0.0.1:8000/api/donaciones/?page=1&page_size=50"
        );
    }

    #[test]
    fn test_headers() {
        let client = request_client(Some(Credential::new("t0k3n")));
        assert_eq!(
            client.headers.get("Authorization").map(|e| e.as_str()),
            Some("Bearer t0k3n")
        );
        let client = request_client(Some(Credential::new("")));
        assert!(client.headers.get("Authorization").is_none());
        assert_eq!(client.timeout_millis, DEFAULT_TIMEOUT_MILLIS);
    }
}
