use chrono::{Duration, Local};
use demos::init_logger;
use patitas_client::client::api_model::DateRange;
use patitas_client::client::model::DonacionFilters;
use patitas_client::client::resource::ExportFormat;
use patitas_client::ClientBuilder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();
    let client = ClientBuilder::new().build()?;
    let today = Local::now().date_naive();
    let range = DateRange::new(Some(today - Duration::days(30)), Some(today));

    let dashboard = client.dashboard(&range).await?;
    log::info!(
        "donado:{},gastado:{},balance:{},casos activos:{}",
        dashboard.kpis.total_donado,
        dashboard.kpis.total_gastado,
        dashboard.kpis.balance_neto,
        dashboard.kpis.casos_activos_count
    );
    for item in &dashboard.top_donantes {
        log::info!("top donante:{},{}", item.nombre, item.total_donado);
    }

    let stats = client.donaciones().stats(&range).await?;
    log::info!(
        "donaciones:{},recaudado:{},promedio:{}",
        stats.cantidad_donaciones,
        stats.total_recaudado,
        stats.donacion_promedio
    );
    for caso in client.casos().activos().await? {
        let balance = client.casos().balance(caso.id_caso).await?;
        log::info!("caso {}:{:?}", caso.nombre_caso, balance);
    }

    let filters = DonacionFilters {
        start_date: range.start_date,
        end_date: range.end_date,
        ..Default::default()
    };
    let file = client
        .donaciones()
        .export(ExportFormat::Csv, &filters)
        .await?;
    let path = file.save_to(&std::env::temp_dir()).await?;
    log::info!("export written to {}", path.display());
    Ok(())
}
