use serde::{Deserialize, Serialize};

use crate::client::api_model::ListFilters;
use crate::client::error::FetchResult;
use crate::client::resource::{Entity, Payload, Resource, ResourceClient};

use super::gasto::Gasto;
use super::require_text;
use super::stats::ProveedoresStats;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proveedor {
    pub id_proveedor: i64,
    pub nombre_proveedor: String,
    #[serde(default)]
    pub tipo_proveedor: Option<String>,
    #[serde(default)]
    pub nit: Option<String>,
    #[serde(default)]
    pub nombre_contacto: Option<String>,
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub ciudad: Option<String>,
}

impl Entity for Proveedor {
    const RESOURCE: Resource = Resource::Proveedores;
    type Payload = ProveedorPayload;
    type Filters = ProveedorFilters;

    fn id(&self) -> i64 {
        self.id_proveedor
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProveedorPayload {
    pub nombre_proveedor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_proveedor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre_contacto: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ciudad: Option<String>,
}

impl Payload for ProveedorPayload {
    fn validate(&self) -> FetchResult<()> {
        require_text("nombre_proveedor", &self.nombre_proveedor)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProveedorFilters {
    pub tipo_proveedor: Option<String>,
    pub ciudad: Option<String>,
}

impl ListFilters for ProveedorFilters {
    fn filter_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("tipo_proveedor", self.tipo_proveedor.clone()),
            ("ciudad", self.ciudad.clone()),
        ]
    }
}

impl ResourceClient<Proveedor> {
    pub async fn gastos(&self, id: i64) -> FetchResult<Vec<Gasto>> {
        self.action(Some(id), "gastos").await
    }

    pub async fn stats(&self) -> FetchResult<ProveedoresStats> {
        self.kpis(&[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_skips_unset_fields() {
        let payload = ProveedorPayload {
            nombre_proveedor: "VetSur".to_owned(),
            ciudad: Some("Cali".to_owned()),
            ..Default::default()
        };
        assert!(payload.validate().is_ok());
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"nombre_proveedor":"VetSur","ciudad":"Cali"}"#
        );
        assert!(ProveedorPayload::default().validate().is_err());
    }
}
