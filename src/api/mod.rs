//! Market data API gateway
//!
//! `ApiClient` does authenticated GETs against the configured base URL;
//! `DealerGammaService` is the typed wrapper for the dealer gamma endpoint.

mod client;
mod error;
mod gamma;

pub use client::ApiClient;
pub use error::ApiError;
pub use gamma::{
    gamma_columns, transform_gamma_data_for_table, DealerGammaResponse, DealerGammaService,
    GammaPoint,
};

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.wrt.capital";

/// Dealer gamma endpoint; the symbol is appended as an encoded path segment
pub const DEALER_GAMMA: &str = "/dealergamma";

/// Headers sent with every request
pub const DEFAULT_HEADERS: &[(&str, &str)] = &[("content-type", "application/json")];
