use std::time::Duration;

use demos::{init_logger, print_snapshot};
use patitas_client::client::api_model::PageSize;
use patitas_client::client::model::{Caso, CasoEstado, CasoFilters};
use patitas_client::list::listener::ListStatus;
use patitas_client::list::{ListController, ListOptions, ListSnapshot};
use patitas_client::ClientBuilder;

async fn wait_ready(controller: &ListController<Caso>) -> anyhow::Result<ListSnapshot<Caso>> {
    loop {
        let snapshot = controller.snapshot().await?;
        if snapshot.status != ListStatus::Loading {
            return Ok(snapshot);
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}

#[actix_rt::main]
async fn main() -> anyhow::Result<()> {
    init_logger();
    let client = ClientBuilder::new()
        .set_list_options(ListOptions::new(true))
        .build()?;
    let controller = client.list_controller::<Caso>();
    print_snapshot("casos", &wait_ready(&controller).await?);

    controller.set_search("luna").await?;
    tokio::time::sleep(Duration::from_millis(700)).await;
    print_snapshot("search luna", &wait_ready(&controller).await?);

    let filters = CasoFilters {
        estado: Some(CasoEstado::Abierto),
        ..Default::default()
    };
    controller.set_filters(&filters).await?;
    print_snapshot("abiertos", &wait_ready(&controller).await?);

    controller.set_page_size(PageSize::TwentyFive).await?;
    print_snapshot("25 per page", &wait_ready(&controller).await?);

    if controller.next_page().await? {
        print_snapshot("next page", &wait_ready(&controller).await?);
    }
    Ok(())
}
