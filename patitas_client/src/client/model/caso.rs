use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::api_model::{DateRange, ListFilters};
use crate::client::error::{FetchError, FetchResult};
use crate::client::resource::{Entity, Payload, Resource, ResourceClient};

use super::donacion::Donacion;
use super::gasto::Gasto;
use super::stats::CasosStats;
use super::{de_amount, de_opt_amount, require_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CasoEstado {
    Abierto,
    EnTratamiento,
    Adoptado,
    Fallecido,
    Cerrado,
}

impl CasoEstado {
    pub fn as_str(&self) -> &'static str {
        match self {
            CasoEstado::Abierto => "ABIERTO",
            CasoEstado::EnTratamiento => "EN_TRATAMIENTO",
            CasoEstado::Adoptado => "ADOPTADO",
            CasoEstado::Fallecido => "FALLECIDO",
            CasoEstado::Cerrado => "CERRADO",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, CasoEstado::Abierto | CasoEstado::EnTratamiento)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caso {
    pub id_caso: i64,
    pub nombre_caso: String,
    pub estado: CasoEstado,
    pub fecha_ingreso: NaiveDate,
    #[serde(default)]
    pub fecha_salida: Option<NaiveDate>,
    #[serde(default)]
    pub veterinaria: Option<String>,
    #[serde(default)]
    pub diagnostico: Option<String>,
    #[serde(default)]
    pub id_hogar_de_paso: Option<i64>,
    #[serde(default)]
    pub nombre_hogar_de_paso: Option<String>,
    #[serde(default, deserialize_with = "de_opt_amount")]
    pub total_recaudado: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_amount")]
    pub total_gastado: Option<f64>,
    #[serde(default)]
    pub dias_activo: Option<i64>,
}

impl Entity for Caso {
    const RESOURCE: Resource = Resource::Casos;
    type Payload = CasoPayload;
    type Filters = CasoFilters;

    fn id(&self) -> i64 {
        self.id_caso
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CasoPayload {
    pub nombre_caso: String,
    pub estado: CasoEstado,
    pub fecha_ingreso: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_salida: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub veterinaria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostico: Option<String>,
    pub id_hogar_de_paso: Option<i64>,
}

impl Payload for CasoPayload {
    fn validate(&self) -> FetchResult<()> {
        require_text("nombre_caso", &self.nombre_caso)?;
        if let Some(salida) = self.fecha_salida {
            if salida < self.fecha_ingreso {
                return Err(FetchError::Validation(
                    "fecha_salida must not be before fecha_ingreso".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CasoFilters {
    pub estado: Option<CasoEstado>,
    pub veterinaria: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ListFilters for CasoFilters {
    fn filter_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("estado", self.estado.map(|e| e.as_str().to_owned())),
            ("veterinaria", self.veterinaria.clone()),
            ("start_date", self.start_date.map(|d| d.to_string())),
            ("end_date", self.end_date.map(|d| d.to_string())),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CasoBalance {
    pub caso: String,
    #[serde(deserialize_with = "de_amount")]
    pub total_recaudado: f64,
    #[serde(deserialize_with = "de_amount")]
    pub total_gastado: f64,
    #[serde(deserialize_with = "de_amount")]
    pub balance: f64,
    #[serde(default)]
    pub donaciones: Vec<Donacion>,
    #[serde(default)]
    pub gastos: Vec<Gasto>,
}

impl ResourceClient<Caso> {
    pub async fn balance(&self, id: i64) -> FetchResult<CasoBalance> {
        self.action(Some(id), "balance").await
    }

    pub async fn activos(&self) -> FetchResult<Vec<Caso>> {
        self.action(None, "activos").await
    }

    pub async fn stats(&self, range: &DateRange) -> FetchResult<CasosStats> {
        self.kpis_in_range(range).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::api_model::filter_query_pairs;

    #[test]
    fn test_decode_caso() {
        let text = r#"{
            "id_caso": 12,
            "nombre_caso": "Luna",
            "estado": "EN_TRATAMIENTO",
            "fecha_ingreso": "2025-03-02",
            "fecha_salida": null,
            "veterinaria": "VetSur",
            "id_hogar_de_paso": 3,
            "nombre_hogar_de_paso": "Casa Azul",
            "total_recaudado": "350000.00",
            "total_gastado": "120500.50",
            "dias_activo": 41
        }"#;
        let caso: Caso = serde_json::from_str(text).unwrap();
        assert_eq!(caso.id(), 12);
        assert_eq!(caso.estado, CasoEstado::EnTratamiento);
        assert!(caso.estado.is_active());
        assert_eq!(caso.total_gastado, Some(120500.5));
        assert_eq!(caso.diagnostico, None);
    }

    #[test]
    fn test_payload_validate() {
        let mut payload = CasoPayload {
            nombre_caso: "Tobi".to_owned(),
            estado: CasoEstado::Abierto,
            fecha_ingreso: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            fecha_salida: None,
            veterinaria: None,
            diagnostico: None,
            id_hogar_de_paso: None,
        };
        assert!(payload.validate().is_ok());
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["estado"], "ABIERTO");
        assert!(value.get("veterinaria").is_none());

        payload.fecha_salida = NaiveDate::from_ymd_opt(2025, 4, 1);
        assert!(payload.validate().is_err());
        payload.fecha_salida = None;
        payload.nombre_caso = " ".to_owned();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_filters() {
        let filters = CasoFilters {
            estado: Some(CasoEstado::Adoptado),
            veterinaria: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            filter_query_pairs(&filters),
            vec![("estado".to_owned(), "ADOPTADO".to_owned())]
        );
    }
}
