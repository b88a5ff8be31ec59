use patitas_client::list::ListSnapshot;

pub fn init_logger() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "INFO");
    }
    env_logger::init();
}

pub fn print_snapshot<T: std::fmt::Debug>(title: &str, snapshot: &ListSnapshot<T>) {
    let view = &snapshot.pagination;
    log::info!(
        "{} status:{:?},page:{}/{},items:{}-{} of {},buttons:{:?}",
        title,
        snapshot.status,
        view.current_page,
        view.total_pages,
        view.start_item,
        view.end_item,
        view.total_items,
        view.page_buttons
    );
    for row in snapshot.rows() {
        log::info!("  {:?}", row);
    }
    if let Some(error) = &snapshot.error {
        log::warn!("{} error:{}", title, error.message);
    }
}
