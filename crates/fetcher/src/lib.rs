mod models;
mod endpoint;
mod fetcher;
mod errors;

pub use models::{StatusFetcher, StatusResponse, ServerEntry};
pub use endpoint::{StatusEndpoint, HttpEndpoint};
pub use fetcher::{normalize, NO_RESPONSE};
pub use errors::FetchError;
