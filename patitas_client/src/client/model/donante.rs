use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::api_model::{DateRange, ListFilters};
use crate::client::error::{FetchError, FetchResult};
use crate::client::resource::{Entity, Payload, Resource, ResourceClient};

use super::donacion::Donacion;
use super::stats::DonantesStats;
use super::{de_opt_amount, require_text};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donante {
    pub id_donante: i64,
    pub donante: String,
    #[serde(default)]
    pub tipo_id: Option<String>,
    #[serde(default)]
    pub identificacion: Option<String>,
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub ciudad: Option<String>,
    #[serde(default)]
    pub pais: Option<String>,
    #[serde(default)]
    pub tipo_donante: Option<String>,
    #[serde(default)]
    pub notas: Option<String>,
    #[serde(default)]
    pub fecha_creacion: Option<String>,
    #[serde(default, deserialize_with = "de_opt_amount")]
    pub total_donado: Option<f64>,
    #[serde(default)]
    pub cantidad_donaciones: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_amount")]
    pub promedio_donacion: Option<f64>,
    #[serde(default)]
    pub ultima_donacion: Option<NaiveDate>,
}

impl Entity for Donante {
    const RESOURCE: Resource = Resource::Donantes;
    type Payload = DonantePayload;
    type Filters = DonanteFilters;

    fn id(&self) -> i64 {
        self.id_donante
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DonantePayload {
    pub donante: String,
    pub tipo_id: String,
    pub identificacion: String,
    pub correo: String,
    pub telefono: String,
    pub ciudad: String,
    pub pais: String,
    pub tipo_donante: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notas: Option<String>,
}

impl Payload for DonantePayload {
    fn validate(&self) -> FetchResult<()> {
        require_text("donante", &self.donante)?;
        require_text("identificacion", &self.identificacion)?;
        let correo = self.correo.trim();
        if !correo.is_empty() && !correo.contains('@') {
            return Err(FetchError::Validation(format!("invalid correo: {}", correo)));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DonanteFilters {
    pub tipo_id: Option<String>,
    pub tipo_donante: Option<String>,
    pub ciudad: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ListFilters for DonanteFilters {
    fn filter_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("tipo_id", self.tipo_id.clone()),
            ("tipo_donante", self.tipo_donante.clone()),
            ("ciudad", self.ciudad.clone()),
            ("start_date", self.start_date.map(|d| d.to_string())),
            ("end_date", self.end_date.map(|d| d.to_string())),
        ]
    }
}

impl ResourceClient<Donante> {
    pub async fn donaciones(&self, id: i64) -> FetchResult<Vec<Donacion>> {
        self.action(Some(id), "donaciones").await
    }

    pub async fn top(&self) -> FetchResult<Vec<Donante>> {
        self.action(None, "top").await
    }

    pub async fn stats(&self, range: &DateRange) -> FetchResult<DonantesStats> {
        self.kpis_in_range(range).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_donante_with_nulls() {
        let text = r#"{"id_donante":4,"donante":"Ana Pérez","tipo_id":"CC","identificacion":"1020",
            "correo":null,"ciudad":"Medellín","pais":"Colombia","tipo_donante":"RECURRENTE",
            "total_donado":"150000.00","cantidad_donaciones":3,"promedio_donacion":50000.0,
            "ultima_donacion":"2025-02-14"}"#;
        let donante: Donante = serde_json::from_str(text).unwrap();
        assert_eq!(donante.id(), 4);
        assert_eq!(donante.correo, None);
        assert_eq!(donante.total_donado, Some(150000f64));
        assert_eq!(donante.ultima_donacion, NaiveDate::from_ymd_opt(2025, 2, 14));
    }

    #[test]
    fn test_payload_validate() {
        let mut payload = DonantePayload {
            donante: "Ana".to_owned(),
            identificacion: "1020".to_owned(),
            ..Default::default()
        };
        assert!(payload.validate().is_ok());
        payload.correo = "ana.example.org".to_owned();
        assert!(payload.validate().is_err());
        payload.correo = "ana@example.org".to_owned();
        assert!(payload.validate().is_ok());
    }
}
