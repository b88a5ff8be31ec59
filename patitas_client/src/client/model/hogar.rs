use serde::{Deserialize, Serialize};

use crate::client::api_model::ListFilters;
use crate::client::error::{FetchError, FetchResult};
use crate::client::resource::{Entity, Payload, Resource};

use super::require_text;

/// Foster home a case can be placed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HogarDePaso {
    pub id_hogar_de_paso: i64,
    pub nombre_hogar: String,
    #[serde(default)]
    pub capacidad: Option<i64>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
}

impl Entity for HogarDePaso {
    const RESOURCE: Resource = Resource::Hogares;
    type Payload = HogarPayload;
    type Filters = HogarFilters;

    fn id(&self) -> i64 {
        self.id_hogar_de_paso
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HogarPayload {
    pub nombre_hogar: String,
    pub capacidad: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
}

impl Payload for HogarPayload {
    fn validate(&self) -> FetchResult<()> {
        require_text("nombre_hogar", &self.nombre_hogar)?;
        if let Some(capacidad) = self.capacidad {
            if capacidad < 0 {
                return Err(FetchError::Validation(
                    "capacidad must not be negative".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

/// Foster homes are only searched, never filtered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HogarFilters;

impl ListFilters for HogarFilters {
    fn filter_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![]
    }
}
