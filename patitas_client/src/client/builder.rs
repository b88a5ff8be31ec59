use std::{env, sync::Arc};

use crate::list::ListOptions;

use super::resource::request_client::{ResourceRequestClient, DEFAULT_TIMEOUT_MILLIS};
use super::{ApiEndpoint, Credential, PatitasClient};

#[derive(Clone, Debug)]
pub struct ClientBuilder {
    endpoint_addr: String,
    credential: Option<Credential>,
    timeout_millis: u64,
    list_options: ListOptions,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Starts from `PATITAS_API_URL`, `PATITAS_API_TOKEN` and
    /// `PATITAS_TIMEOUT_MILLIS` when they are set.
    pub fn new() -> Self {
        let endpoint_addr = env::var("PATITAS_API_URL").unwrap_or_default();
        let credential = env::var("PATITAS_API_TOKEN")
            .ok()
            .map(|e| Credential::new(&e))
            .filter(|e| e.is_valid());
        let timeout_millis = env::var("PATITAS_TIMEOUT_MILLIS")
            .ok()
            .and_then(|e| e.trim().parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MILLIS);
        Self {
            endpoint_addr,
            credential,
            timeout_millis,
            list_options: Default::default(),
        }
    }

    pub fn set_endpoint_addr(mut self, addr: &str) -> Self {
        self.endpoint_addr = addr.to_owned();
        self
    }

    pub fn set_endpoint(mut self, endpoint: ApiEndpoint) -> Self {
        self.endpoint_addr = endpoint.base_url;
        self
    }

    pub fn set_credential(mut self, credential: Option<Credential>) -> Self {
        self.credential = credential.filter(|e| e.is_valid());
        self
    }

    pub fn set_token(self, token: &str) -> Self {
        self.set_credential(Some(Credential::new(token)))
    }

    pub fn set_timeout_millis(mut self, timeout_millis: u64) -> Self {
        self.timeout_millis = timeout_millis;
        self
    }

    pub fn set_list_options(mut self, list_options: ListOptions) -> Self {
        self.list_options = list_options;
        self
    }

    pub fn build(self) -> anyhow::Result<PatitasClient> {
        let endpoint = Arc::new(ApiEndpoint::parse(&self.endpoint_addr)?);
        if self.credential.is_none() {
            log::warn!("no api token configured, requests to {} are anonymous", &endpoint.base_url);
        }
        let mut request_client = ResourceRequestClient::new(endpoint, self.credential)?;
        request_client.set_timeout_millis(self.timeout_millis);
        log::info!(
            "patitas client built,endpoint:{},timeout:{}ms",
            &request_client.endpoint.base_url,
            self.timeout_millis
        );
        Ok(PatitasClient {
            request_client,
            list_options: self.list_options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_explicit_values() {
        let client = ClientBuilder::new()
            .set_endpoint_addr("https://patitas.example.org/api")
            .set_token("abc")
            .set_timeout_millis(3000)
            .build()
            .unwrap();
        assert_eq!(
            client.endpoint().base_url,
            "https://patitas.example.org/api/"
        );
        assert_eq!(client.request_client.timeout_millis, 3000);
        assert_eq!(
            client.request_client.headers.get("Authorization"),
            Some(&"Bearer abc".to_owned())
        );
        assert_eq!(
            client.casos().collection_url(),
            "https://patitas.example.org/api/casos/"
        );
    }

    #[test]
    fn test_blank_token_is_dropped() {
        let client = ClientBuilder::new()
            .set_endpoint_addr("localhost:8000/api/")
            .set_token("  ")
            .build()
            .unwrap();
        assert!(client.request_client.headers.get("Authorization").is_none());
    }

    #[test]
    fn test_bad_scheme_fails() {
        assert!(ClientBuilder::new()
            .set_endpoint_addr("ftp://patitas.example.org")
            .build()
            .is_err());
    }

    #[test]
    fn test_list_options_are_kept() {
        let options = ListOptions {
            keep_previous_data: true,
            ..Default::default()
        };
        let client = ClientBuilder::new()
            .set_endpoint_addr("localhost:8000")
            .set_list_options(options)
            .build()
            .unwrap();
        assert!(client.list_options.keep_previous_data);
    }
}
