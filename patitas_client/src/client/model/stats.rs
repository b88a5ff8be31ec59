//! Read-only KPI payloads. Every figure is computed by the backend.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartPoint {
    pub fecha: String,
    pub monto: f64,
    pub cantidad: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CasosStats {
    pub dias_promedio_por_caso: f64,
    pub costo_diario_promedio_caso: f64,
    pub costo_diario_fundacion: f64,
    pub casos_con_deficit: i64,
    pub promedio_recaudado: f64,
    pub promedio_gastado: f64,
    pub promedio_casos_mensuales: f64,
    pub total_historico: i64,
    pub casos_activos: i64,
    pub abierto: i64,
    pub en_tratamiento: i64,
    pub adoptados: i64,
    pub cerrado: i64,
    pub fallecido: i64,
    pub sin_hogar: i64,
    pub tiempo_promedio: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DonacionesStats {
    pub total_recaudado: f64,
    pub donacion_promedio: f64,
    pub cantidad_donaciones: i64,
    pub donantes_unicos: i64,
    pub cantidad_exitosas: i64,
    pub cantidad_rechazadas: i64,
    pub cantidad_fallidas: i64,
    pub variacion_recaudo: f64,
    pub variacion_promedio: f64,
    pub variacion_exitosas: f64,
    pub variacion_rechazadas: f64,
    pub variacion_fallidas: f64,
    pub variacion_total_intentos: f64,
    pub variacion_donantes_unicos: f64,
    pub chart_data: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DonantesStats {
    pub total_donantes: i64,
    pub recurrentes: i64,
    pub nuevos_mes: i64,
    pub ltv_promedio: f64,
    pub mayor_donacion: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GastosStats {
    pub total_gasto: f64,
    pub promedio_gasto: f64,
    pub numero_gastos: i64,
    pub gastos_pendientes: f64,
    pub count_pendientes: i64,
    pub variacion_total: f64,
    pub variacion_promedio: f64,
    pub chart_data: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProveedoresStats {
    pub total_proveedores: i64,
    pub nuevos_mes: i64,
    pub con_actividad: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardKpis {
    pub total_donado: f64,
    pub total_gastado: f64,
    pub balance_neto: f64,
    pub casos_activos_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Trend {
    pub value: f64,
    pub is_positive: bool,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardTrends {
    pub total_donado: Trend,
    pub total_gastado: Trend,
    pub balance_neto: Trend,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaisStat {
    pub pais: String,
    pub count: i64,
    pub total_dinero: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CasoDestacado {
    pub id_caso: i64,
    pub nombre_caso: String,
    pub total_recaudado: Option<f64>,
    pub total_gastado: Option<f64>,
    pub estado: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalancePoint {
    pub fecha: String,
    pub donaciones: f64,
    pub gastos: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GastoCategoria {
    pub categoria: String,
    pub total: f64,
    pub cantidad: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopDonante {
    pub id: i64,
    pub nombre: String,
    pub pais: String,
    pub total_donado: f64,
    pub num_donaciones: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardResponse {
    pub kpis: DashboardKpis,
    pub trends: DashboardTrends,
    pub top_paises: Vec<PaisStat>,
    pub casos_destacados: Vec<CasoDestacado>,
    pub balance_historico: Vec<BalancePoint>,
    pub gastos_por_categoria: Vec<GastoCategoria>,
    pub top_donantes: Vec<TopDonante>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_dashboard() {
        let text = r#"{
            "kpis": {"total_donado": 1200000.0, "total_gastado": 450000.5, "balance_neto": 749999.5, "casos_activos_count": 8},
            "trends": {
                "total_donado": {"value": 12.5, "isPositive": true, "label": "vs mes anterior"},
                "total_gastado": {"value": 3.0, "isPositive": false, "label": "vs mes anterior"}
            },
            "top_paises": [{"pais": "Colombia", "count": 40, "total_dinero": 900000}],
            "balance_historico": [{"fecha": "2025-01", "donaciones": 100, "gastos": 40, "balance": 60}]
        }"#;
        let dashboard: DashboardResponse = serde_json::from_str(text).unwrap();
        assert_eq!(dashboard.kpis.casos_activos_count, 8);
        assert!(dashboard.trends.total_donado.is_positive);
        assert_eq!(dashboard.trends.balance_neto, Trend::default());
        assert_eq!(dashboard.top_paises[0].pais, "Colombia");
        assert_eq!(dashboard.balance_historico[0].balance, 60f64);
        assert!(dashboard.top_donantes.is_empty());
    }

    #[test]
    fn test_decode_partial_stats() {
        let stats: GastosStats =
            serde_json::from_str(r#"{"total_gasto": 10, "count_pendientes": 2}"#).unwrap();
        assert_eq!(stats.total_gasto, 10f64);
        assert_eq!(stats.count_pendientes, 2);
        assert!(stats.chart_data.is_empty());
    }
}
