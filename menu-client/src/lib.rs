//! Client for the home bar menu API.
//!
//! - [`CatalogClient`]: typed `list` / `get` / `create` / `update` / `delete` calls that return
//!   canonical [`menu_catalog::Drink`]s
//! - [`Transport`]: the request/response seam, with [`HttpTransport`] (reqwest) as the default
//! - [`MenuPage`]: the page-view read-through cache, with an optional built-in fallback menu
//! - [`ClientConfig`]: base URL and timeout, usually from the environment
#![forbid(unsafe_code)]

mod client;
mod config;
mod error;
mod page;
mod transport;

#[cfg(test)]
mod tests;

pub use client::CatalogClient;
pub use config::{BASE_URL_VARS, ClientConfig, DEFAULT_BASE_URL, TIMEOUT_VAR, join_url};
pub use error::{CatalogError, TransportError};
pub use page::{CatalogSource, FallbackPolicy, MenuPage};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};

pub use menu_catalog;
