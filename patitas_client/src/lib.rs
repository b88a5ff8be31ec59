pub mod client;
pub mod list;

pub use client::builder::ClientBuilder;
pub use client::error::{FetchError, FetchResult};
pub use client::PatitasClient;
pub use list::controller::ListController;
pub use list::pagination::{derive_pagination_view, PaginationView};
