use std::fmt::Debug;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::api_model::{filter_query_pairs, DateRange, ListFilters, ListQueryParams, PaginatedResponse};
use super::error::FetchResult;

pub mod request_client;

use self::request_client::ResourceRequestClient;

/// Backend collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Casos,
    Donaciones,
    Donantes,
    Gastos,
    Proveedores,
    Hogares,
}

impl Resource {
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Casos => "casos",
            Resource::Donaciones => "donaciones",
            Resource::Donantes => "donantes",
            Resource::Gastos => "gastos",
            Resource::Proveedores => "proveedores",
            Resource::Hogares => "hogares",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Resource::Casos => "casos/",
            Resource::Donaciones => "donaciones/",
            Resource::Donantes => "donantes/",
            Resource::Gastos => "gastos/",
            Resource::Proveedores => "proveedores/",
            Resource::Hogares => "hogares/",
        }
    }

    pub fn detail_path(&self, id: i64) -> String {
        format!("{}{}/", self.path(), id)
    }

    pub fn action_path(&self, id: Option<i64>, action: &str) -> String {
        match id {
            Some(id) => format!("{}{}/{}/", self.path(), id, action),
            None => format!("{}{}/", self.path(), action),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Excel,
}

impl ExportFormat {
    pub fn action(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "exportar_csv",
            ExportFormat::Excel => "exportar_excel",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
        }
    }
}

/// Export payload as handed back by the backend; the bytes are not inspected.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    pub(crate) fn file_name_from_disposition(disposition: Option<&str>) -> Option<String> {
        let disposition = disposition?;
        disposition
            .split(';')
            .map(|e| e.trim())
            .find_map(|e| e.strip_prefix("filename="))
            .map(|e| e.trim_matches('"').to_owned())
            .filter(|e| !e.is_empty() && !e.contains('/') && !e.contains('\\'))
    }

    pub async fn save_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(&self.file_name);
        tokio::fs::write(&path, &self.bytes).await?;
        log::info!("export saved:{},bytes:{}", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// A create/update body. Checked once before it leaves the client.
pub trait Payload: Serialize + Send + Sync {
    fn validate(&self) -> FetchResult<()> {
        Ok(())
    }
}

/// A record type served by one backend collection.
pub trait Entity: DeserializeOwned + Debug + Send + Sync + 'static {
    const RESOURCE: Resource;
    type Payload: Payload;
    type Filters: ListFilters + Default + Send + Sync;

    fn id(&self) -> i64;
}

pub struct ResourceClient<T> {
    pub(crate) request_client: ResourceRequestClient,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            request_client: self.request_client.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(request_client: ResourceRequestClient) -> Self {
        Self {
            request_client,
            _marker: PhantomData,
        }
    }

    pub fn resource(&self) -> Resource {
        T::RESOURCE
    }

    pub fn collection_url(&self) -> String {
        self.request_client.endpoint.url(T::RESOURCE.path())
    }

    pub async fn list(&self, params: &ListQueryParams) -> FetchResult<PaginatedResponse<T>> {
        let (page, _) = self.request_client.list_page(T::RESOURCE, params).await?;
        Ok(page)
    }

    pub async fn get(&self, id: i64) -> FetchResult<T> {
        self.request_client
            .get_json(&T::RESOURCE.detail_path(id), &[])
            .await
    }

    pub async fn create(&self, payload: &T::Payload) -> FetchResult<T> {
        payload.validate()?;
        let value: T = self
            .request_client
            .send_json(Method::POST, T::RESOURCE.path(), payload)
            .await?;
        log::info!("create {}:{}", T::RESOURCE.name(), value.id());
        Ok(value)
    }

    pub async fn update(&self, id: i64, payload: &T::Payload) -> FetchResult<T> {
        payload.validate()?;
        self.request_client
            .send_json(Method::PUT, &T::RESOURCE.detail_path(id), payload)
            .await
    }

    /// Partial update; only the given fields are sent.
    pub async fn patch(&self, id: i64, fields: &serde_json::Value) -> FetchResult<T> {
        self.request_client
            .send_json(Method::PATCH, &T::RESOURCE.detail_path(id), fields)
            .await
    }

    pub async fn delete(&self, id: i64) -> FetchResult<()> {
        self.request_client
            .delete(&T::RESOURCE.detail_path(id))
            .await
    }

    pub async fn export(&self, format: ExportFormat, filters: &T::Filters) -> FetchResult<ExportFile> {
        let query = filter_query_pairs(filters);
        let resp = self
            .request_client
            .get_bytes(&T::RESOURCE.action_path(None, format.action()), &query)
            .await?;
        let file_name =
            ExportFile::file_name_from_disposition(resp.get_header("Content-Disposition"))
                .unwrap_or_else(|| format!("{}.{}", T::RESOURCE.name(), format.extension()));
        Ok(ExportFile {
            file_name,
            content_type: resp.get_header("Content-Type").map(|e| e.to_owned()),
            bytes: resp.body,
        })
    }

    /// `{resource}/kpis/` for the given query.
    pub async fn kpis<K: DeserializeOwned>(&self, query: &[(String, String)]) -> FetchResult<K> {
        self.request_client
            .get_json(&T::RESOURCE.action_path(None, "kpis"), query)
            .await
    }

    pub async fn kpis_in_range<K: DeserializeOwned>(&self, range: &DateRange) -> FetchResult<K> {
        self.kpis(&range.to_query_pairs()).await
    }

    pub(crate) async fn action<K: DeserializeOwned>(&self, id: Option<i64>, action: &str) -> FetchResult<K> {
        self.request_client
            .get_json(&T::RESOURCE.action_path(id, action), &[])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_paths() {
        assert_eq!(Resource::Casos.detail_path(7), "casos/7/");
        assert_eq!(Resource::Casos.action_path(Some(7), "balance"), "casos/7/balance/");
        assert_eq!(
            Resource::Donaciones.action_path(None, ExportFormat::Excel.action()),
            "donaciones/exportar_excel/"
        );
        assert_eq!(Resource::Gastos.action_path(None, "kpis"), "gastos/kpis/");
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            ExportFile::file_name_from_disposition(Some("attachment; filename=\"donaciones.csv\"")),
            Some("donaciones.csv".to_owned())
        );
        assert_eq!(
            ExportFile::file_name_from_disposition(Some("attachment; filename=casos.xlsx")),
            Some("casos.xlsx".to_owned())
        );
        assert_eq!(
            ExportFile::file_name_from_disposition(Some("attachment; filename=\"../etc/passwd\"")),
            None
        );
        assert_eq!(ExportFile::file_name_from_disposition(Some("inline")), None);
        assert_eq!(ExportFile::file_name_from_disposition(None), None);
    }

    #[actix_rt::test]
    async fn test_export_save_to() {
        let dir = tempfile::tempdir().unwrap();
        let file = ExportFile {
            file_name: "gastos.csv".to_owned(),
            content_type: Some("text/csv".to_owned()),
            bytes: b"id,monto\n1,20\n".to_vec(),
        };
        let path = file.save_to(dir.path()).await.unwrap();
        assert_eq!(path, dir.path().join("gastos.csv"));
        assert_eq!(std::fs::read(&path).unwrap(), b"id,monto\n1,20\n".to_vec());
    }
}
