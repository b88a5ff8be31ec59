use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::api_model::{filter_query_pairs, ListFilters};
use crate::client::error::FetchResult;
use crate::client::resource::{Entity, Payload, Resource, ResourceClient};

use super::stats::GastosStats;
use super::{de_amount, require_not_future, require_positive, require_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GastoEstado {
    Pagado,
    Pendiente,
    Anulado,
}

impl GastoEstado {
    pub fn as_str(&self) -> &'static str {
        match self {
            GastoEstado::Pagado => "PAGADO",
            GastoEstado::Pendiente => "PENDIENTE",
            GastoEstado::Anulado => "ANULADO",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gasto {
    pub id_gasto: i64,
    pub nombre_gasto: String,
    pub fecha_pago: NaiveDate,
    pub id_caso: i64,
    #[serde(default)]
    pub caso_nombre: Option<String>,
    #[serde(default)]
    pub medio_pago: Option<String>,
    #[serde(deserialize_with = "de_amount")]
    pub monto: f64,
    pub estado: GastoEstado,
    #[serde(default)]
    pub comprobante: Option<String>,
    pub id_proveedor: i64,
    #[serde(default)]
    pub proveedor_nombre: Option<String>,
}

impl Entity for Gasto {
    const RESOURCE: Resource = Resource::Gastos;
    type Payload = GastoPayload;
    type Filters = GastoFilters;

    fn id(&self) -> i64 {
        self.id_gasto
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GastoPayload {
    pub nombre_gasto: String,
    pub fecha_pago: NaiveDate,
    pub id_caso: i64,
    pub id_proveedor: i64,
    pub medio_pago: String,
    pub monto: f64,
    pub estado: GastoEstado,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comprobante: Option<String>,
}

impl Payload for GastoPayload {
    fn validate(&self) -> FetchResult<()> {
        require_text("nombre_gasto", &self.nombre_gasto)?;
        require_positive("monto", self.monto)?;
        require_not_future("fecha_pago", self.fecha_pago)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GastoFilters {
    pub estado: Option<GastoEstado>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub caso: Option<i64>,
}

impl ListFilters for GastoFilters {
    fn filter_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("estado", self.estado.map(|e| e.as_str().to_owned())),
            ("start_date", self.start_date.map(|d| d.to_string())),
            ("end_date", self.end_date.map(|d| d.to_string())),
            ("caso", self.caso.map(|e| e.to_string())),
        ]
    }
}

impl ResourceClient<Gasto> {
    /// Expense KPIs accept the case filter besides the date range.
    pub async fn stats(&self, filters: &GastoFilters) -> FetchResult<GastosStats> {
        let query: Vec<(String, String)> = filter_query_pairs(filters)
            .into_iter()
            .filter(|(k, _)| k != "estado")
            .collect();
        self.kpis(&query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_gasto() {
        let text = r#"{"id_gasto":5,"nombre_gasto":"Cirugía","fecha_pago":"2025-01-20","id_caso":12,
            "caso_nombre":"Luna","medio_pago":"EFECTIVO","monto":"80000.00","estado":"PENDIENTE",
            "id_proveedor":2,"proveedor_nombre":"VetSur"}"#;
        let gasto: Gasto = serde_json::from_str(text).unwrap();
        assert_eq!(gasto.id(), 5);
        assert_eq!(gasto.estado, GastoEstado::Pendiente);
        assert_eq!(gasto.monto, 80000f64);
    }

    #[test]
    fn test_filters() {
        let filters = GastoFilters {
            estado: Some(GastoEstado::Pagado),
            caso: Some(12),
            ..Default::default()
        };
        assert_eq!(
            filter_query_pairs(&filters),
            vec![
                ("estado".to_owned(), "PAGADO".to_owned()),
                ("caso".to_owned(), "12".to_owned()),
            ]
        );
    }

    #[test]
    fn test_payload_validate() {
        let payload = GastoPayload {
            nombre_gasto: "Vacunas".to_owned(),
            fecha_pago: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            id_caso: 1,
            id_proveedor: 1,
            medio_pago: "EFECTIVO".to_owned(),
            monto: -5f64,
            estado: GastoEstado::Pagado,
            comprobante: None,
        };
        assert!(payload.validate().is_err());
    }
}
