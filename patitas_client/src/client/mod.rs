use std::sync::Arc;

pub mod api_model;
pub mod builder;
pub mod error;
pub mod model;
pub mod resource;
pub mod utils;

use md5::{Digest, Md5};

use self::api_model::DateRange;
use self::error::{FetchError, FetchResult};
use self::model::{
    Caso, DashboardResponse, Donacion, Donante, Gasto, HogarDePaso, Proveedor,
};
use self::resource::request_client::ResourceRequestClient;
use self::resource::{Entity, ResourceClient};
use crate::list::controller::ListController;
use crate::list::ListOptions;

pub use self::builder::ClientBuilder;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api/";

pub fn now_millis() -> u64 {
    use std::time::SystemTime;
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

pub fn get_md5(content: &[u8]) -> String {
    let mut m = Md5::new();
    m.update(content);
    hex::encode(m.finalize())
}

/// Base URL of the backend API. Always stored with a trailing slash so
/// resource paths can be appended directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    pub base_url: String,
}

impl ApiEndpoint {
    pub fn parse(addr: &str) -> FetchResult<Self> {
        let addr = addr.trim();
        if addr.is_empty() {
            return Ok(Self::default());
        }
        let base_url = if addr.starts_with("http://") || addr.starts_with("https://") {
            addr.to_owned()
        } else if addr.contains("://") {
            return Err(FetchError::InvalidRequest(format!(
                "unsupported api url scheme: {}",
                addr
            )));
        } else {
            format!("http://{}", addr)
        };
        let base_url = if base_url.ends_with('/') {
            base_url
        } else {
            base_url + "/"
        };
        Ok(Self { base_url })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiEndpoint {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
        }
    }
}

/// Bearer credential handed over by whatever owns the session.
#[derive(Clone)]
pub struct Credential {
    pub token: String,
}

impl Credential {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.trim().to_owned(),
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn header_value(&self) -> String {
        format!("Bearer {}", &self.token)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential").field("token", &"***").finish()
    }
}

/// Entry point handed out by [`ClientBuilder`].
#[derive(Clone)]
pub struct PatitasClient {
    pub(crate) request_client: ResourceRequestClient,
    pub(crate) list_options: ListOptions,
}

impl PatitasClient {
    pub fn endpoint(&self) -> Arc<ApiEndpoint> {
        self.request_client.endpoint.clone()
    }

    pub fn resource<T: Entity>(&self) -> ResourceClient<T> {
        ResourceClient::new(self.request_client.clone())
    }

    pub fn casos(&self) -> ResourceClient<Caso> {
        self.resource()
    }

    pub fn donaciones(&self) -> ResourceClient<Donacion> {
        self.resource()
    }

    pub fn donantes(&self) -> ResourceClient<Donante> {
        self.resource()
    }

    pub fn gastos(&self) -> ResourceClient<Gasto> {
        self.resource()
    }

    pub fn proveedores(&self) -> ResourceClient<Proveedor> {
        self.resource()
    }

    pub fn hogares(&self) -> ResourceClient<HogarDePaso> {
        self.resource()
    }

    pub async fn dashboard(&self, range: &DateRange) -> FetchResult<DashboardResponse> {
        self.request_client
            .get_json("dashboard/", &range.to_query_pairs())
            .await
    }

    /// Starts a list controller for `T` on the current actix system.
    pub fn list_controller<T: Entity + Unpin>(&self) -> ListController<T> {
        self.list_controller_with(self.list_options.clone())
    }

    pub fn list_controller_with<T: Entity + Unpin>(
        &self,
        options: ListOptions,
    ) -> ListController<T> {
        let source = Arc::new(self.resource::<T>());
        ListController::new(source, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_parse() {
        let endpoint = ApiEndpoint::parse("localhost:8000/api").unwrap();
        assert_eq!(endpoint.base_url, "http://localhost:8000/api/");
        assert_eq!(
            endpoint.url("/casos/"),
            "http://localhost:8000/api/casos/"
        );

        let endpoint = ApiEndpoint::parse("https://patitas.example.org/api/").unwrap();
        assert_eq!(endpoint.url("donaciones/12/"), "https://patitas.example.org/api/donaciones/12/");

        assert_eq!(ApiEndpoint::parse("").unwrap(), ApiEndpoint::default());
        assert!(ApiEndpoint::parse("ftp://patitas.example.org").is_err());
    }

    #[test]
    fn test_credential() {
        let credential = Credential::new(" abc ");
        assert!(credential.is_valid());
        assert_eq!(credential.header_value(), "Bearer abc");
        assert!(!format!("{:?}", credential).contains("abc"));
        assert!(!Credential::new("").is_valid());
    }

    #[test]
    fn test_get_md5() {
        assert_eq!(get_md5(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_ne!(get_md5(b"{\"count\":1}"), get_md5(b"{\"count\":2}"));
    }
}
