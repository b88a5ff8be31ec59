pub mod caso;
pub mod donacion;
pub mod donante;
pub mod gasto;
pub mod hogar;
pub mod proveedor;
pub mod stats;

use serde::{Deserialize, Deserializer};

use super::error::{FetchError, FetchResult};

pub use self::caso::{Caso, CasoBalance, CasoEstado, CasoFilters, CasoPayload};
pub use self::donacion::{Donacion, DonacionFilters, DonacionPayload};
pub use self::donante::{Donante, DonanteFilters, DonantePayload};
pub use self::gasto::{Gasto, GastoEstado, GastoFilters, GastoPayload};
pub use self::hogar::{HogarDePaso, HogarFilters, HogarPayload};
pub use self::proveedor::{Proveedor, ProveedorFilters, ProveedorPayload};
pub use self::stats::{
    BalancePoint, CasoDestacado, CasosStats, ChartPoint, DashboardKpis, DashboardResponse,
    DashboardTrends, DonacionesStats, DonantesStats, GastoCategoria, GastosStats, PaisStat,
    ProveedoresStats, TopDonante, Trend,
};

// Decimal fields arrive as JSON strings ("1500.00") from the serializers
// and as numbers from aggregate endpoints.
#[derive(Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Number(f64),
    Text(String),
}

impl AmountRepr {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            AmountRepr::Number(v) => Ok(v),
            AmountRepr::Text(v) => v
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("invalid amount: {}", v))),
        }
    }
}

pub(crate) fn de_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    AmountRepr::deserialize(deserializer)?.into_f64()
}

pub(crate) fn de_opt_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<AmountRepr>::deserialize(deserializer)? {
        Some(v) => v.into_f64().map(Some),
        None => Ok(None),
    }
}

pub(crate) fn require_text(field: &str, value: &str) -> FetchResult<()> {
    if value.trim().is_empty() {
        return Err(FetchError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

pub(crate) fn require_positive(field: &str, value: f64) -> FetchResult<()> {
    if !(value > 0f64) {
        return Err(FetchError::Validation(format!("{} must be positive", field)));
    }
    Ok(())
}

pub(crate) fn require_not_future(field: &str, value: chrono::NaiveDate) -> FetchResult<()> {
    let today = chrono::Local::now().date_naive();
    if value > today {
        return Err(FetchError::Validation(format!(
            "{} must not be in the future",
            field
        )));
    }
    Ok(())
}
