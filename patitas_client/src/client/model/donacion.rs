use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::api_model::{DateRange, ListFilters};
use crate::client::error::FetchResult;
use crate::client::resource::{Entity, Payload, Resource, ResourceClient};

use super::stats::DonacionesStats;
use super::{de_amount, require_not_future, require_positive, require_text};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donacion {
    pub id_donacion: i64,
    pub id_donante: i64,
    pub id_caso: i64,
    #[serde(default)]
    pub donante_nombre: Option<String>,
    #[serde(default)]
    pub caso_nombre: Option<String>,
    pub fecha_donacion: NaiveDate,
    #[serde(deserialize_with = "de_amount")]
    pub monto: f64,
    #[serde(default)]
    pub medio_pago: Option<String>,
    // Backend states are free text (APROBADA, Completado, ...).
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub comprobante: Option<String>,
}

impl Entity for Donacion {
    const RESOURCE: Resource = Resource::Donaciones;
    type Payload = DonacionPayload;
    type Filters = DonacionFilters;

    fn id(&self) -> i64 {
        self.id_donacion
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonacionPayload {
    pub id_donante: i64,
    pub id_caso: i64,
    pub fecha_donacion: NaiveDate,
    pub monto: f64,
    pub medio_pago: String,
    pub estado: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comprobante: Option<String>,
}

impl Payload for DonacionPayload {
    fn validate(&self) -> FetchResult<()> {
        require_positive("monto", self.monto)?;
        require_not_future("fecha_donacion", self.fecha_donacion)?;
        require_text("medio_pago", &self.medio_pago)?;
        require_text("estado", &self.estado)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DonacionFilters {
    pub estado: Option<String>,
    pub medio_pago: Option<String>,
    pub fecha_donacion: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ListFilters for DonacionFilters {
    fn filter_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("estado", self.estado.clone()),
            ("medio_pago", self.medio_pago.clone()),
            ("fecha_donacion", self.fecha_donacion.map(|d| d.to_string())),
            ("start_date", self.start_date.map(|d| d.to_string())),
            ("end_date", self.end_date.map(|d| d.to_string())),
        ]
    }
}

impl ResourceClient<Donacion> {
    pub async fn stats(&self, range: &DateRange) -> FetchResult<DonacionesStats> {
        self.kpis_in_range(range).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> DonacionPayload {
        DonacionPayload {
            id_donante: 4,
            id_caso: 12,
            fecha_donacion: NaiveDate::from_ymd_opt(2025, 2, 14).unwrap(),
            monto: 50000f64,
            medio_pago: "TRANSFERENCIA".to_owned(),
            estado: "APROBADA".to_owned(),
            comprobante: None,
        }
    }

    #[test]
    fn test_decode_donacion() {
        let text = r#"{"id_donacion":99,"id_donante":4,"id_caso":12,"donante_nombre":"Ana","caso_nombre":"Luna",
            "fecha_donacion":"2025-02-14","monto":"50000.00","medio_pago":"PSE","estado":"Aprobada"}"#;
        let donacion: Donacion = serde_json::from_str(text).unwrap();
        assert_eq!(donacion.id(), 99);
        assert_eq!(donacion.monto, 50000f64);
        assert_eq!(donacion.estado.as_deref(), Some("Aprobada"));
        assert_eq!(donacion.comprobante, None);
    }

    #[test]
    fn test_payload_validate() {
        assert!(payload().validate().is_ok());

        let mut p = payload();
        p.monto = 0f64;
        assert!(p.validate().is_err());

        let mut p = payload();
        p.fecha_donacion = chrono::Local::now().date_naive() + chrono::Duration::days(2);
        assert!(p.validate().is_err());

        let mut p = payload();
        p.medio_pago.clear();
        assert!(p.validate().is_err());
    }
}
