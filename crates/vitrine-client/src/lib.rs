mod cache;
pub use cache::PageCache;

mod client;
pub use client::StorefrontClient;

mod config;
pub use config::ClientConfig;

mod error;
pub use error::ClientError;

mod fetch;
pub use fetch::{Fetch, HttpFetcher};

mod manager;
pub use manager::{QueryOptions, QuerySnapshot, ResourceQuery};

mod session;
pub use session::{RefreshToken, SessionContext, SessionToken};
