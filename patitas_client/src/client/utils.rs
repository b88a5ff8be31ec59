use std::borrow::Cow;
use std::collections::HashMap;
use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;

use super::error::{FetchError, FetchResult};

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

pub struct Utils;

#[derive(Default, Clone, Debug)]
pub struct ResponseWrap {
    pub url: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ResponseWrap {
    pub fn status_is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn get_lossy_string_body(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Turns a non-2xx response into `FetchError::Http`.
    pub fn error_for_status(self) -> FetchResult<Self> {
        if self.status_is_success() {
            return Ok(self);
        }
        let body = self.get_lossy_string_body().into_owned();
        log::warn!("request failed,url:{},status:{},body:{}", &self.url, self.status, &body);
        Err(FetchError::Http {
            status: self.status,
            endpoint: self.url,
            body,
        })
    }

    pub fn json<T: DeserializeOwned>(&self) -> FetchResult<T> {
        serde_json::from_slice(&self.body).map_err(|source| {
            log::error!(
                "decode response error:\n\turl:{}\n\t{}",
                &self.url,
                self.get_lossy_string_body()
            );
            FetchError::Decode {
                endpoint: self.url.clone(),
                source,
            }
        })
    }
}

impl Utils {
    async fn get_response_wrap(url: &str, resp: reqwest::Response) -> FetchResult<ResponseWrap> {
        let status = resp.status().as_u16();
        let mut resp_headers = vec![];
        for (k, v) in resp.headers() {
            let value = String::from_utf8_lossy(v.as_bytes()).into_owned();
            resp_headers.push((k.as_str().to_owned(), value));
        }
        let body = resp
            .bytes()
            .await
            .map_err(|source| FetchError::Network {
                endpoint: url.to_owned(),
                source,
            })?
            .to_vec();
        Ok(ResponseWrap {
            url: url.to_owned(),
            status,
            headers: resp_headers,
            body,
        })
    }

    pub async fn request(
        client: &reqwest::Client,
        method: Method,
        url: &str,
        body: Vec<u8>,
        headers: Option<&HashMap<String, String>>,
        timeout_millis: Option<u64>,
    ) -> FetchResult<ResponseWrap> {
        let mut req_builer = client.request(method.clone(), url);
        if let Some(headers) = headers {
            for (k, v) in headers.iter() {
                req_builer = req_builer.header(k as &str, v.to_string());
            }
        }
        if let Some(timeout) = timeout_millis {
            req_builer = req_builer.timeout(ms(timeout));
        }
        if !body.is_empty() {
            req_builer = req_builer.body(body);
        }
        log::debug!("request,method:{},url:{}", method, url);
        let res = req_builer
            .send()
            .await
            .map_err(|source| FetchError::Network {
                endpoint: url.to_owned(),
                source,
            })?;
        Self::get_response_wrap(url, res).await
    }

    /// `url?query`, or `url` alone when there is nothing to append.
    pub fn with_query(url: &str, pairs: &[(String, String)]) -> FetchResult<String> {
        if pairs.is_empty() {
            return Ok(url.to_owned());
        }
        let query = serde_urlencoded::to_string(pairs)
            .map_err(|e| FetchError::InvalidRequest(e.to_string()))?;
        Ok(format!("{}?{}", url, query))
    }
}
